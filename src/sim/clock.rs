//! Game clock with pause excision
//!
//! Elapsed time is `now - session_start`. Resuming moves `session_start`
//! forward by the pause length, so everything downstream can keep doing
//! plain `now - timestamp` arithmetic.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameClock {
    session_start: f64,
    paused_at: Option<f64>,
}

impl GameClock {
    pub fn new(now: f64) -> Self {
        Self {
            session_start: now,
            paused_at: None,
        }
    }

    /// Fresh session starting at `now`
    pub fn reset(&mut self, now: f64) {
        self.session_start = now;
        self.paused_at = None;
    }

    pub fn session_start(&self) -> f64 {
        self.session_start
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Game time since the session started (ms). Frozen while paused.
    pub fn elapsed(&self, now: f64) -> f64 {
        let now = self.paused_at.unwrap_or(now);
        (now - self.session_start).max(0.0)
    }

    /// Record the pause start. Pausing twice keeps the first timestamp.
    pub fn pause(&mut self, now: f64) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    /// End the pause and return how far every game timestamp must shift
    pub fn resume(&mut self, now: f64) -> f64 {
        match self.paused_at.take() {
            Some(paused_at) => {
                let shift = (now - paused_at).max(0.0);
                self.session_start += shift;
                shift
            }
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_tracks_wall_time() {
        let clock = GameClock::new(1000.0);
        assert_eq!(clock.elapsed(1000.0), 0.0);
        assert_eq!(clock.elapsed(3500.0), 2500.0);
        // Timestamps before the start never go negative
        assert_eq!(clock.elapsed(500.0), 0.0);
    }

    #[test]
    fn test_pause_freezes_elapsed() {
        let mut clock = GameClock::new(0.0);
        clock.pause(10_000.0);
        assert!(clock.is_paused());
        assert_eq!(clock.elapsed(25_000.0), 10_000.0);

        let shift = clock.resume(40_000.0);
        assert_eq!(shift, 30_000.0);
        assert!(!clock.is_paused());
        assert_eq!(clock.elapsed(40_000.0), 10_000.0);
        assert_eq!(clock.elapsed(90_000.0), 60_000.0);
        assert_eq!(clock.session_start(), 30_000.0);
    }

    #[test]
    fn test_resume_without_pause_is_noop() {
        let mut clock = GameClock::new(100.0);
        assert_eq!(clock.resume(5000.0), 0.0);
        assert_eq!(clock.session_start(), 100.0);
    }

    #[test]
    fn test_double_pause_keeps_first_timestamp() {
        let mut clock = GameClock::new(0.0);
        clock.pause(1000.0);
        clock.pause(2000.0);
        assert_eq!(clock.resume(3000.0), 2000.0);
    }

    #[test]
    fn test_reset_clears_pause() {
        let mut clock = GameClock::new(0.0);
        clock.pause(1000.0);
        clock.reset(5000.0);
        assert!(!clock.is_paused());
        assert_eq!(clock.elapsed(6000.0), 1000.0);
    }
}
