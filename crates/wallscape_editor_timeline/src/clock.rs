// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline state and the wall-clock playback sampler.

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Default timeline duration in seconds
pub const DEFAULT_DURATION: f32 = 5.0;
/// Default advisory frame rate
pub const DEFAULT_FPS: f32 = 60.0;
/// Smallest allowed timeline duration in seconds
pub const MIN_DURATION: f32 = 0.1;

/// Seeks within this of the current time are treated as no-ops, so a
/// continuously-bound scrub control cannot cause redundant updates.
const SEEK_EPSILON: f32 = 1e-6;

fn default_duration() -> f32 {
    DEFAULT_DURATION
}

fn default_fps() -> f32 {
    DEFAULT_FPS
}

fn default_loop() -> bool {
    true
}

/// Current time, duration, and transport state of the timeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineState {
    /// Total duration in seconds, always positive
    #[serde(default = "default_duration")]
    pub duration: f32,
    /// Advisory frame rate for future discretization
    #[serde(default = "default_fps")]
    pub fps: f32,
    /// Playhead position in seconds, within `[0, duration]`
    #[serde(default)]
    pub current_time: f32,
    /// Whether playback is running
    #[serde(default)]
    pub playing: bool,
    /// Whether playback wraps at the end instead of stopping
    #[serde(default = "default_loop", rename = "loop")]
    pub looping: bool,
}

impl Default for TimelineState {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            fps: DEFAULT_FPS,
            current_time: 0.0,
            playing: false,
            looping: true,
        }
    }
}

impl TimelineState {
    /// Start playback
    pub fn play(&mut self) {
        self.playing = true;
        tracing::debug!(time = self.current_time, "Playback started");
    }

    /// Pause playback at the current position
    pub fn pause(&mut self) {
        self.playing = false;
        tracing::debug!(time = self.current_time, "Playback paused");
    }

    /// Toggle between playing and paused
    pub fn toggle_play(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Enable or disable looping
    pub fn set_loop(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Seek to a time, clamped into `[0, duration]`.
    ///
    /// Returns `false` when the clamped time matches the current time
    /// within a tight tolerance; the state is untouched in that case.
    pub fn set_time(&mut self, time: f32) -> bool {
        let clamped = time.clamp(0.0, self.duration);
        if (self.current_time - clamped).abs() < SEEK_EPSILON {
            return false;
        }
        self.current_time = clamped;
        true
    }

    /// Change the duration, clamped to the positive minimum.
    ///
    /// The playhead is clamped down if it now lies past the end.
    pub fn set_duration(&mut self, duration: f32) {
        self.duration = duration.max(MIN_DURATION);
        self.current_time = self.current_time.min(self.duration);
    }

    /// Advance the playhead by an elapsed wall-clock delta.
    ///
    /// Does nothing while paused. Reaching the end wraps into
    /// `[0, duration)` when looping, otherwise clamps to the end and
    /// pauses.
    pub fn advance(&mut self, dt: f32) {
        if !self.playing {
            return;
        }
        let mut t = self.current_time + dt;
        if t >= self.duration {
            if self.looping {
                t %= self.duration;
            } else {
                t = self.duration;
                self.playing = false;
                tracing::debug!(duration = self.duration, "Playback finished");
            }
        }
        self.current_time = t;
    }
}

/// Wall-clock sampler that re-arms once per playback tick.
///
/// The clock owns the "last sampled" instant that turns the host's
/// per-refresh callbacks into elapsed deltas. It is an explicit owned
/// resource: arming happens on the first sample, and [`cancel`]
/// disarms it unconditionally and idempotently.
///
/// [`cancel`]: PlaybackClock::cancel
#[derive(Debug, Default)]
pub struct PlaybackClock {
    last_tick: Option<Instant>,
}

impl PlaybackClock {
    /// Create a disarmed clock
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the clock has a pending sample
    pub fn is_armed(&self) -> bool {
        self.last_tick.is_some()
    }

    /// Sample the clock, returning the elapsed seconds since the
    /// previous sample.
    ///
    /// The first sample after creation or cancellation arms the clock
    /// and returns zero, so playback resumes without a time jump.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let dt = match self.last_tick {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => 0.0,
        };
        self.last_tick = Some(now);
        dt
    }

    /// Disarm the clock. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        self.last_tick = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let tl = TimelineState::default();
        assert_eq!(tl.duration, DEFAULT_DURATION);
        assert_eq!(tl.fps, DEFAULT_FPS);
        assert_eq!(tl.current_time, 0.0);
        assert!(!tl.playing);
        assert!(tl.looping);
    }

    #[test]
    fn test_toggle_play() {
        let mut tl = TimelineState::default();
        tl.toggle_play();
        assert!(tl.playing);
        tl.toggle_play();
        assert!(!tl.playing);
    }

    #[test]
    fn test_set_time_clamps() {
        let mut tl = TimelineState::default();
        // Clamped to 0, which is already the current time
        assert!(!tl.set_time(-2.0));
        assert_eq!(tl.current_time, 0.0);
        assert!(tl.set_time(99.0));
        assert_eq!(tl.current_time, tl.duration);
    }

    #[test]
    fn test_set_time_is_idempotent() {
        let mut tl = TimelineState::default();
        assert!(tl.set_time(2.5));
        assert!(!tl.set_time(2.5));
        assert!(!tl.set_time(2.5 + 1e-7));
        assert_eq!(tl.current_time, 2.5);
    }

    #[test]
    fn test_set_duration_floors_and_clamps_playhead() {
        let mut tl = TimelineState::default();
        tl.set_time(4.0);
        tl.set_duration(2.0);
        assert_eq!(tl.duration, 2.0);
        assert_eq!(tl.current_time, 2.0);

        tl.set_duration(0.0);
        assert_eq!(tl.duration, MIN_DURATION);
        assert_eq!(tl.current_time, MIN_DURATION);
    }

    #[test]
    fn test_advance_loops_with_modulo() {
        let mut tl = TimelineState::default();
        tl.looping = true;
        tl.play();
        for _ in 0..6 {
            tl.advance(1.0);
        }
        assert!((tl.current_time - 1.0).abs() < 1e-4);
        assert!(tl.playing);
    }

    #[test]
    fn test_advance_clamps_and_pauses_without_loop() {
        let mut tl = TimelineState::default();
        tl.looping = false;
        tl.play();
        tl.advance(6.0);
        assert_eq!(tl.current_time, tl.duration);
        assert!(!tl.playing);
    }

    #[test]
    fn test_advance_ignored_while_paused() {
        let mut tl = TimelineState::default();
        tl.advance(1.0);
        assert_eq!(tl.current_time, 0.0);
    }

    #[test]
    fn test_exact_end_wraps_to_zero_when_looping() {
        let mut tl = TimelineState::default();
        tl.play();
        tl.advance(5.0);
        assert_eq!(tl.current_time, 0.0);
        assert!(tl.playing);
    }

    #[test]
    fn test_clock_first_tick_is_zero() {
        let mut clock = PlaybackClock::new();
        assert!(!clock.is_armed());
        let dt = clock.tick(Instant::now());
        assert_eq!(dt, 0.0);
        assert!(clock.is_armed());
    }

    #[test]
    fn test_clock_measures_elapsed_time() {
        let mut clock = PlaybackClock::new();
        let start = Instant::now();
        clock.tick(start);
        let dt = clock.tick(start + Duration::from_millis(250));
        assert!((dt - 0.25).abs() < 1e-3);
    }

    #[test]
    fn test_cancel_is_idempotent_and_rearms_cleanly() {
        let mut clock = PlaybackClock::new();
        let start = Instant::now();
        clock.tick(start);
        clock.cancel();
        clock.cancel();
        assert!(!clock.is_armed());

        // After cancellation the next sample must not see stale elapsed time
        let dt = clock.tick(start + Duration::from_secs(10));
        assert_eq!(dt, 0.0);
    }
}
