//! Session timer
//!
//! Counts whole seconds while running. The host owns the actual tick source
//! (an interval in the browser), forwards each tick, and keeps that source in
//! line with `is_running`. `start`/`stop` report whether the call changed state.

use serde::Serialize;

/// Elapsed-seconds counter for one session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionTimer {
    elapsed: u32,
    running: bool,
}

impl SessionTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Stop counting. Returns false if it was not running.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        true
    }

    /// Advance by one second (ignored while stopped)
    pub fn tick(&mut self) {
        if self.running {
            self.elapsed = self.elapsed.saturating_add(1);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed
    }
}

/// Format seconds as `45s` or `2m 5s`
pub fn format_duration(seconds: u32) -> String {
    if seconds < 60 {
        return format!("{}s", seconds);
    }
    format!("{}m {}s", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(60), "1m 0s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(3600), "60m 0s");
    }

    #[test]
    fn test_ticks_only_count_while_running() {
        let mut timer = SessionTimer::new();
        timer.tick();
        assert_eq!(timer.elapsed_seconds(), 0);

        assert!(timer.start());
        timer.tick();
        timer.tick();
        assert_eq!(timer.elapsed_seconds(), 2);

        assert!(timer.stop());
        timer.tick();
        assert_eq!(timer.elapsed_seconds(), 2);
    }

    #[test]
    fn test_start_stop_idempotent() {
        let mut timer = SessionTimer::new();
        assert!(!timer.stop());
        assert!(timer.start());
        assert!(!timer.start());
        assert!(timer.is_running());
        assert!(timer.stop());
        assert!(!timer.stop());
        assert!(!timer.is_running());
    }

    #[test]
    fn test_restart_keeps_elapsed() {
        let mut timer = SessionTimer::new();
        timer.start();
        timer.tick();
        timer.stop();
        timer.start();
        timer.tick();
        assert_eq!(timer.elapsed_seconds(), 2);
    }
}
