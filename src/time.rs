//! Frame clock feeding the per-frame transform.
//!
//! The transform takes time as plain seconds. `FrameClock` produces that
//! value from a monotonic clock, scaled and pausable.
//!
//! # Example
//!
//! ```ignore
//! use nebula::time::FrameClock;
//!
//! let mut clock = FrameClock::new();
//!
//! // Once per frame:
//! let t = clock.tick();
//! let uniforms = scene.frame_uniforms(t)?;
//! ```

use std::time::{Duration, Instant};

/// Playback rate the presets are tuned for.
pub const DEFAULT_TIME_SCALE: f32 = 0.5;

/// Monotonic, scaled animation time.
#[derive(Debug)]
pub struct FrameClock {
    /// Real time at the last scale change or resume.
    anchor: Instant,
    /// Scaled seconds accumulated before `anchor`.
    banked: f64,
    /// Scaled seconds at the most recent tick.
    seconds: f32,
    frame_count: u64,
    time_scale: f32,
    paused: bool,
}

impl FrameClock {
    /// Start a clock at zero running at [`DEFAULT_TIME_SCALE`].
    pub fn new() -> Self {
        Self::with_time_scale(DEFAULT_TIME_SCALE)
    }

    pub fn with_time_scale(scale: f32) -> Self {
        Self {
            anchor: Instant::now(),
            banked: 0.0,
            seconds: 0.0,
            frame_count: 0,
            time_scale: scale.max(0.0),
            paused: false,
        }
    }

    /// Advance to now and return the animation time in seconds.
    pub fn tick(&mut self) -> f32 {
        self.seconds = self.current() as f32;
        self.frame_count += 1;
        self.seconds
    }

    /// Animation time at the last tick.
    #[inline]
    pub fn seconds(&self) -> f32 {
        self.seconds
    }

    /// Ticks since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Change the playback rate without jumping the current time.
    /// Negative scales clamp to 0.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.rebase();
        self.time_scale = scale.max(0.0);
    }

    /// Freeze animation time. Ticks keep returning the frozen value.
    pub fn pause(&mut self) {
        if !self.paused {
            self.rebase();
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.anchor = Instant::now();
            self.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Jump animation time forward (or back) by `secs`, e.g. to scrub.
    pub fn advance(&mut self, secs: f32) {
        self.banked += secs as f64;
    }

    fn current(&self) -> f64 {
        if self.paused {
            self.banked
        } else {
            self.banked + self.scaled(self.anchor.elapsed())
        }
    }

    fn scaled(&self, real: Duration) -> f64 {
        real.as_secs_f64() * self.time_scale as f64
    }

    fn rebase(&mut self) {
        if !self.paused {
            self.banked = self.current();
        }
        self.anchor = Instant::now();
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clock_new() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.seconds(), 0.0);
        assert!(!clock.is_paused());
        assert_eq!(clock.time_scale(), DEFAULT_TIME_SCALE);
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut clock = FrameClock::with_time_scale(1.0);
        let a = clock.tick();
        thread::sleep(Duration::from_millis(10));
        let b = clock.tick();
        assert!(b > a);
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn test_clock_pause_freezes_time() {
        let mut clock = FrameClock::with_time_scale(1.0);
        thread::sleep(Duration::from_millis(5));
        clock.pause();
        let frozen = clock.tick();
        thread::sleep(Duration::from_millis(10));
        assert_eq!(clock.tick(), frozen);

        clock.resume();
        thread::sleep(Duration::from_millis(5));
        assert!(clock.tick() > frozen);
    }

    #[test]
    fn test_zero_scale_stops_time() {
        let mut clock = FrameClock::with_time_scale(0.0);
        thread::sleep(Duration::from_millis(5));
        assert_eq!(clock.tick(), 0.0);

        clock.set_time_scale(-3.0);
        assert_eq!(clock.time_scale(), 0.0);
    }

    #[test]
    fn test_advance_scrubs() {
        let mut clock = FrameClock::with_time_scale(0.0);
        clock.advance(2.5);
        assert_eq!(clock.tick(), 2.5);
    }
}
