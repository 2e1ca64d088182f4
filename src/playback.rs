// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback service boundary.
//!
//! Each tracked video gets one player. The registry owns them, creates them
//! on demand through a [`PlayerFactory`], and enforces single playback
//! focus: starting one player pauses every other player that is playing.

use crate::error::{ReelmarksError, Result};
use std::collections::HashMap;
use std::time::Instant;

/// Player transport state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Unstarted,
    Playing,
    Paused,
    Buffering,
    Ended,
    Cued,
}

/// An embedded player bound to one video.
pub trait PlaybackService {
    /// Current position in seconds.
    fn current_time(&self) -> f64;
    fn seek_to(&mut self, seconds: f64, allow_seek_ahead: bool);
    fn play(&mut self);
    fn pause(&mut self);
    fn state(&self) -> PlayerState;
    /// Release the player's resources. The player is not used afterwards.
    fn destroy(&mut self);

    /// Whether the player can answer position queries yet.
    fn is_ready(&self) -> bool {
        true
    }
}

/// Creates players for video ids.
pub trait PlayerFactory {
    fn create(&mut self, video_id: &str) -> Box<dyn PlaybackService>;
}

/// Owns one player per tracked video.
pub struct PlayerRegistry {
    players: HashMap<String, Box<dyn PlaybackService>>,
    factory: Box<dyn PlayerFactory>,
}

impl PlayerRegistry {
    pub fn new(factory: Box<dyn PlayerFactory>) -> Self {
        Self {
            players: HashMap::new(),
            factory,
        }
    }

    pub fn get(&self, video_id: &str) -> Option<&dyn PlaybackService> {
        self.players.get(video_id).map(|p| p.as_ref())
    }

    /// Get the player for a video, creating it if needed.
    pub fn ensure(&mut self, video_id: &str) -> &mut dyn PlaybackService {
        let factory = &mut self.factory;
        self.players
            .entry(video_id.to_string())
            .or_insert_with(|| {
                log::debug!("Creating player for {}", video_id);
                factory.create(video_id)
            })
            .as_mut()
    }

    /// Destroy and forget the player for a video. No-op if there is none.
    pub fn release(&mut self, video_id: &str) {
        if let Some(mut player) = self.players.remove(video_id) {
            player.destroy();
            log::debug!("Destroyed player for {}", video_id);
        }
    }

    /// Match the registry to the tracked ids: create missing players and
    /// release players whose video is gone.
    pub fn sync<'a>(&mut self, video_ids: impl IntoIterator<Item = &'a str>) {
        let wanted: Vec<&str> = video_ids.into_iter().collect();
        let stale: Vec<String> = self
            .players
            .keys()
            .filter(|id| !wanted.contains(&id.as_str()))
            .cloned()
            .collect();
        for id in stale {
            self.release(&id);
        }
        for id in wanted {
            self.ensure(id);
        }
    }

    /// Pause every playing player except `keep`.
    pub fn pause_others(&mut self, keep: Option<&str>) {
        for (id, player) in self.players.iter_mut() {
            if Some(id.as_str()) != keep && player.state() == PlayerState::Playing {
                player.pause();
            }
        }
    }

    /// Position of a ready player, for capturing a marker.
    pub fn current_time(&self, video_id: &str) -> Result<f64> {
        match self.players.get(video_id) {
            Some(player) if player.is_ready() => Ok(player.current_time()),
            _ => Err(ReelmarksError::ExternalServiceUnavailable(
                "Player not found or not ready. Please play the video first.".to_string(),
            )),
        }
    }

    /// Seek a video to `seconds` and play it, pausing all other players.
    pub fn seek_and_play(&mut self, video_id: &str, seconds: u64) -> Result<()> {
        match self.players.get(video_id) {
            Some(player) if player.is_ready() => {}
            _ => {
                return Err(ReelmarksError::ExternalServiceUnavailable(
                    "Player not found or not ready.".to_string(),
                ))
            }
        }
        self.pause_others(Some(video_id));
        if let Some(player) = self.players.get_mut(video_id) {
            player.seek_to(seconds as f64, true);
            player.play();
        }
        Ok(())
    }

    pub fn pause(&mut self, video_id: &str) {
        if let Some(player) = self.players.get_mut(video_id) {
            player.pause();
        }
    }
}

/// Wall-clock transport used by the desktop shell in place of an embedded
/// web player.
#[derive(Debug, Clone)]
pub struct ClockPlayer {
    video_id: String,
    position: f64,
    playing_since: Option<Instant>,
    state: PlayerState,
}

impl ClockPlayer {
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            position: 0.0,
            playing_since: None,
            state: PlayerState::Unstarted,
        }
    }
}

impl PlaybackService for ClockPlayer {
    fn current_time(&self) -> f64 {
        let running = self
            .playing_since
            .map(|since| since.elapsed().as_secs_f64())
            .unwrap_or(0.0);
        self.position + running
    }

    fn seek_to(&mut self, seconds: f64, _allow_seek_ahead: bool) {
        self.position = seconds.max(0.0);
        if self.playing_since.is_some() {
            self.playing_since = Some(Instant::now());
        } else if self.state == PlayerState::Unstarted {
            self.state = PlayerState::Cued;
        }
    }

    fn play(&mut self) {
        if self.playing_since.is_none() {
            log::debug!("Playing {} from {:.1}s", self.video_id, self.position);
            self.playing_since = Some(Instant::now());
        }
        self.state = PlayerState::Playing;
    }

    fn pause(&mut self) {
        self.position = self.current_time();
        self.playing_since = None;
        self.state = PlayerState::Paused;
    }

    fn state(&self) -> PlayerState {
        self.state
    }

    fn destroy(&mut self) {
        self.playing_since = None;
        self.state = PlayerState::Ended;
    }
}

/// Factory for [`ClockPlayer`]s.
#[derive(Debug, Default)]
pub struct ClockPlayerFactory;

impl PlayerFactory for ClockPlayerFactory {
    fn create(&mut self, video_id: &str) -> Box<dyn PlaybackService> {
        Box::new(ClockPlayer::new(video_id))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Calls made on fake players, shared with the test.
    pub(crate) type CallLog = Rc<RefCell<Vec<String>>>;

    /// Scripted player that records every call.
    pub(crate) struct FakePlayer {
        pub id: String,
        pub time: f64,
        pub state: PlayerState,
        pub ready: bool,
        pub log: CallLog,
    }

    impl PlaybackService for FakePlayer {
        fn current_time(&self) -> f64 {
            self.time
        }
        fn seek_to(&mut self, seconds: f64, allow_seek_ahead: bool) {
            self.time = seconds;
            self.log
                .borrow_mut()
                .push(format!("seek {} {} {}", self.id, seconds, allow_seek_ahead));
        }
        fn play(&mut self) {
            self.state = PlayerState::Playing;
            self.log.borrow_mut().push(format!("play {}", self.id));
        }
        fn pause(&mut self) {
            self.state = PlayerState::Paused;
            self.log.borrow_mut().push(format!("pause {}", self.id));
        }
        fn state(&self) -> PlayerState {
            self.state
        }
        fn destroy(&mut self) {
            self.log.borrow_mut().push(format!("destroy {}", self.id));
        }
        fn is_ready(&self) -> bool {
            self.ready
        }
    }

    /// Factory handing out [`FakePlayer`]s at a fixed position.
    #[derive(Default)]
    pub(crate) struct FakeFactory {
        pub log: CallLog,
        pub time: f64,
        pub not_ready: Vec<String>,
    }

    impl PlayerFactory for FakeFactory {
        fn create(&mut self, video_id: &str) -> Box<dyn PlaybackService> {
            self.log.borrow_mut().push(format!("create {}", video_id));
            Box::new(FakePlayer {
                id: video_id.to_string(),
                time: self.time,
                state: PlayerState::Unstarted,
                ready: !self.not_ready.iter().any(|id| id == video_id),
                log: self.log.clone(),
            })
        }
    }

    fn registry() -> (PlayerRegistry, CallLog) {
        let factory = FakeFactory::default();
        let log = factory.log.clone();
        (PlayerRegistry::new(Box::new(factory)), log)
    }

    #[test]
    fn test_single_playback_focus() {
        let (mut players, log) = registry();
        players.sync(["aaaaaaaaaaa", "bbbbbbbbbbb"]);
        players.seek_and_play("aaaaaaaaaaa", 30).unwrap();
        log.borrow_mut().clear();

        players.seek_and_play("bbbbbbbbbbb", 83).unwrap();
        assert_eq!(
            *log.borrow(),
            vec!["pause aaaaaaaaaaa", "seek bbbbbbbbbbb 83 true", "play bbbbbbbbbbb"]
        );
        assert_eq!(players.get("aaaaaaaaaaa").unwrap().state(), PlayerState::Paused);
    }

    #[test]
    fn test_sync_creates_and_releases() {
        let (mut players, log) = registry();
        players.sync(["aaaaaaaaaaa", "bbbbbbbbbbb"]);
        assert!(players.get("aaaaaaaaaaa").is_some());
        assert!(players.get("bbbbbbbbbbb").is_some());

        players.sync(["bbbbbbbbbbb"]);
        assert!(players.get("aaaaaaaaaaa").is_none());
        assert!(log.borrow().contains(&"destroy aaaaaaaaaaa".to_string()));

        // Releasing an unknown id is harmless.
        players.release("zzzzzzzzzzz");
        assert!(players.get("bbbbbbbbbbb").is_some());
    }

    #[test]
    fn test_unavailable_player() {
        let factory = FakeFactory {
            not_ready: vec!["aaaaaaaaaaa".to_string()],
            ..Default::default()
        };
        let mut players = PlayerRegistry::new(Box::new(factory));
        players.ensure("aaaaaaaaaaa");

        assert!(matches!(
            players.current_time("aaaaaaaaaaa"),
            Err(ReelmarksError::ExternalServiceUnavailable(_))
        ));
        assert!(players.current_time("missing0000").is_err());
        assert!(players.seek_and_play("aaaaaaaaaaa", 5).is_err());
    }

    #[test]
    fn test_clock_player_transport() {
        let mut player = ClockPlayer::new("dQw4w9WgXcQ");
        assert_eq!(player.state(), PlayerState::Unstarted);
        player.seek_to(83.0, true);
        assert_eq!(player.state(), PlayerState::Cued);
        assert_eq!(player.current_time(), 83.0);

        player.play();
        assert_eq!(player.state(), PlayerState::Playing);
        assert!(player.current_time() >= 83.0);

        player.pause();
        let paused_at = player.current_time();
        assert_eq!(player.current_time(), paused_at);
        assert_eq!(player.state(), PlayerState::Paused);

        player.seek_to(-4.0, true);
        assert_eq!(player.current_time(), 0.0);
    }
}
