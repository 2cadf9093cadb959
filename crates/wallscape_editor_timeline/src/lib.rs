// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline engine for Wallscape Editor.
//!
//! This crate drives time-based property animation:
//! - Keyframes with forward-compatible easing
//! - Per-(layer, property) animation tracks with linear interpolation
//! - The flat track collection, independent of the tree's shape
//! - Timeline state and the wall-clock playback sampler
//! - Pure resolution of a layer's effective properties at a query time
//!
//! ## Architecture
//!
//! Evaluation is pure and clamped: querying outside the keyframed range
//! returns the boundary value, and a missing or empty track falls back
//! to the layer's static property. Nothing here is cached across time
//! steps; resolution is recomputed whenever time or a track changes.

pub mod clock;
pub mod keyframe;
pub mod resolve;
pub mod track;

pub use clock::{PlaybackClock, TimelineState, DEFAULT_DURATION, DEFAULT_FPS, MIN_DURATION};
pub use keyframe::{Easing, Keyframe, TIME_EPSILON};
pub use resolve::{resolve_layer, resolve_layers};
pub use track::{AnimatedProperty, AnimationSet, AnimationTrack, TrackId};
