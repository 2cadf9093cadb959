// SPDX-License-Identifier: MIT OR Apache-2.0
//! Keyframe definitions for animation tracks.

use serde::{Deserialize, Serialize};

/// Two keyframe times closer than this are considered the same instant.
///
/// Recording a keyframe within this window of an existing one replaces
/// its value instead of inserting a duplicate.
pub const TIME_EPSILON: f32 = 1e-3;

/// Easing applied between a keyframe and the next one.
///
/// Only linear easing exists today; the field is carried on every
/// keyframe for forward compatibility and evaluation ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant-rate interpolation
    #[default]
    Linear,
}

/// A (time, value) sample on an animation track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Time in seconds, never negative
    pub time: f32,
    /// Property value at this time
    pub value: f32,
    /// Easing toward the next keyframe
    #[serde(default)]
    pub easing: Easing,
}

impl Keyframe {
    /// Create a linear keyframe
    pub fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            easing: Easing::Linear,
        }
    }

    /// Whether another time falls within the same-instant window
    pub fn is_at(&self, time: f32) -> bool {
        (self.time - time).abs() < TIME_EPSILON
    }
}
