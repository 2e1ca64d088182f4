// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Time expression parsing and display formatting.
//!
//! A time expression is `[H:]M:SS`-style text optionally followed by a
//! free-text note, e.g. `"1:23:45 bridge"` or `"83"`.

/// A parsed time expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeExpression {
    pub seconds: u64,
    pub note: String,
}

/// Parse `"<time> <note>"` into seconds and a trimmed note.
///
/// The time token is the leading run of digits and colons, split into 1 to
/// 3 groups (seconds, minutes:seconds or hours:minutes:seconds). Groups are
/// not range-checked, so `"90"` and `"1:30"` are equivalent.
pub fn parse_time_expression(text: &str) -> Option<TimeExpression> {
    let text = text.trim_start();
    let token_len = text
        .find(|c: char| !(c.is_ascii_digit() || c == ':'))
        .unwrap_or(text.len());
    if token_len == 0 {
        return None;
    }
    let (token, rest) = text.split_at(token_len);

    let groups = token
        .split(':')
        .map(|group| group.parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;

    let seconds = match groups.as_slice() {
        [s] => Some(*s),
        [m, s] => m.checked_mul(60)?.checked_add(*s),
        [h, m, s] => h
            .checked_mul(3600)?
            .checked_add(m.checked_mul(60)?)?
            .checked_add(*s),
        _ => None,
    }?;

    Some(TimeExpression {
        seconds,
        note: rest.trim().to_string(),
    })
}

/// Format whole seconds as `H:MM:SS`, or `M:SS` below one hour.
pub fn format_seconds(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Round a playback position to the whole second a marker is stored at.
///
/// Negative and non-finite positions clamp to zero.
pub fn round_to_second(position: f64) -> u64 {
    if position.is_finite() && position > 0.0 {
        position.round() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(text: &str) -> Option<(u64, String)> {
        parse_time_expression(text).map(|t| (t.seconds, t.note))
    }

    #[test]
    fn test_parse_group_counts() {
        assert_eq!(parsed("83"), Some((83, String::new())));
        assert_eq!(parsed("1:23 chorus"), Some((83, "chorus".into())));
        assert_eq!(parsed("  1:23:45   some note  "), Some((5025, "some note".into())));
        assert_eq!(parsed("0:00"), Some((0, String::new())));
        assert_eq!(parsed("2:75"), Some((195, String::new())));
        assert_eq!(parsed("12abc"), Some((12, "abc".into())));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parsed(""), None);
        assert_eq!(parsed("   "), None);
        assert_eq!(parsed("note only"), None);
        assert_eq!(parsed("-5"), None);
        assert_eq!(parsed("1::2"), None);
        assert_eq!(parsed(":30"), None);
        assert_eq!(parsed("1:"), None);
        assert_eq!(parsed("1:2:3:4"), None);
        assert_eq!(parsed("99999999999999999999"), None);
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0), "0:00");
        assert_eq!(format_seconds(7), "0:07");
        assert_eq!(format_seconds(83), "1:23");
        assert_eq!(format_seconds(600), "10:00");
        assert_eq!(format_seconds(3600), "1:00:00");
        assert_eq!(format_seconds(5025), "1:23:45");
        assert_eq!(format_seconds(36_061), "10:01:01");
    }

    #[test]
    fn test_format_parse_roundtrip() {
        for n in (0..20_000).step_by(37).chain([59, 60, 3599, 3600, 359_999]) {
            let text = format!("{} note", format_seconds(n));
            let parsed = parse_time_expression(&text).unwrap();
            assert_eq!(parsed.seconds, n);
            assert_eq!(format_seconds(parsed.seconds), format_seconds(n));
            assert_eq!(parsed.note, "note");
        }
    }

    #[test]
    fn test_round_to_second() {
        assert_eq!(round_to_second(82.4), 82);
        assert_eq!(round_to_second(82.5), 83);
        assert_eq!(round_to_second(-1.0), 0);
        assert_eq!(round_to_second(f64::NAN), 0);
    }
}
