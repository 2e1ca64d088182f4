// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Launch address handling for externally shared links.
//!
//! A share can arrive as a `share_url` query parameter on the launch
//! address, or directly via `--share-url`. It is handed out exactly once
//! and the parameter is stripped from the visible address whatever the
//! ingestion outcome.

use crate::config::Args;
use url::Url;

/// Query parameter carrying a shared link.
pub const SHARE_PARAM: &str = "share_url";

#[derive(Debug, Clone, Default)]
pub struct LaunchAddress {
    address: Option<Url>,
    explicit: Option<String>,
    consumed: bool,
}

impl LaunchAddress {
    /// Build from a launch address string (invalid addresses are ignored).
    pub fn parse(address: Option<&str>) -> Self {
        let address = address.and_then(|raw| match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(e) => {
                log::warn!("Ignoring unparseable launch address {:?}: {}", raw, e);
                None
            }
        });
        Self {
            address,
            explicit: None,
            consumed: false,
        }
    }

    pub fn from_args(args: &Args) -> Self {
        let mut launch = Self::parse(args.launch_url.as_deref());
        launch.explicit = args.share_url.clone();
        launch
    }

    /// Address as it should now be displayed.
    pub fn visible_address(&self) -> Option<&str> {
        self.address.as_ref().map(Url::as_str)
    }

    /// Hand out the shared link, once. Later calls return `None`.
    pub fn take_shared_url(&mut self) -> Option<String> {
        if self.consumed {
            return None;
        }
        self.consumed = true;

        let from_query = self.address.as_mut().and_then(strip_share_param);
        self.explicit
            .take()
            .or(from_query)
            .filter(|link| !link.trim().is_empty())
    }
}

/// Remove `share_url` from the query, returning its value.
fn strip_share_param(url: &mut Url) -> Option<String> {
    let mut shared = None;
    let mut kept: Vec<(String, String)> = Vec::new();
    for (key, value) in url.query_pairs() {
        if key == SHARE_PARAM {
            shared.get_or_insert_with(|| value.into_owned());
        } else {
            kept.push((key.into_owned(), value.into_owned()));
        }
    }

    if shared.is_some() {
        if kept.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(kept);
        }
    }
    shared
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_take_once_and_strip() {
        let mut launch =
            LaunchAddress::parse(Some("reelmarks://open?share_url=https://youtu.be/dQw4w9WgXcQ"));
        assert_eq!(launch.take_shared_url().as_deref(), Some("https://youtu.be/dQw4w9WgXcQ"));
        assert_eq!(launch.visible_address(), Some("reelmarks://open"));
        assert_eq!(launch.take_shared_url(), None);
    }

    #[test]
    fn test_encoded_param_keeps_other_query() {
        let mut launch = LaunchAddress::parse(Some(
            "https://reelmarks.app/?theme=dark&share_url=https%3A%2F%2Fyoutu.be%2FdQw4w9WgXcQ%3Ft%3D5",
        ));
        assert_eq!(
            launch.take_shared_url().as_deref(),
            Some("https://youtu.be/dQw4w9WgXcQ?t=5")
        );
        assert_eq!(launch.visible_address(), Some("https://reelmarks.app/?theme=dark"));
    }

    #[test]
    fn test_empty_param_is_stripped() {
        let mut launch = LaunchAddress::parse(Some("reelmarks://open?share_url="));
        assert_eq!(launch.take_shared_url(), None);
        assert_eq!(launch.visible_address(), Some("reelmarks://open"));
    }

    #[test]
    fn test_no_address() {
        let mut launch = LaunchAddress::parse(None);
        assert_eq!(launch.take_shared_url(), None);
        let mut bad = LaunchAddress::parse(Some("not a url"));
        assert_eq!(bad.visible_address(), None);
        assert_eq!(bad.take_shared_url(), None);
    }

    #[test]
    fn test_explicit_flag_wins() {
        let args = Args::parse_from([
            "reelmarks",
            "reelmarks://open?share_url=aaaaaaaaaaa",
            "--share-url",
            "https://youtu.be/dQw4w9WgXcQ",
        ]);
        let mut launch = LaunchAddress::from_args(&args);
        assert_eq!(launch.take_shared_url().as_deref(), Some("https://youtu.be/dQw4w9WgXcQ"));
        // The query parameter is still stripped.
        assert_eq!(launch.visible_address(), Some("reelmarks://open"));
        assert_eq!(launch.take_shared_url(), None);
    }
}
