// SPDX-License-Identifier: MIT OR Apache-2.0
//! Animation tracks: the keyframe history for one (layer, property) pair.

use crate::keyframe::Keyframe;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wallscape_editor_scene::LayerId;

/// Segments shorter than this interpolate as a step to avoid division
/// blow-up when two keyframes share nearly the same time.
const MIN_SEGMENT: f32 = 1e-6;

/// Unique identifier for a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId(pub Uuid);

impl TrackId {
    /// Create a new random track ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::new()
    }
}

/// The fixed set of animatable scalar properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimatedProperty {
    /// Horizontal position
    #[serde(rename = "position.x")]
    PositionX,
    /// Vertical position
    #[serde(rename = "position.y")]
    PositionY,
    /// Width
    #[serde(rename = "size.w")]
    SizeW,
    /// Height
    #[serde(rename = "size.h")]
    SizeH,
    /// Rotation in degrees
    #[serde(rename = "rotation")]
    Rotation,
    /// Opacity
    #[serde(rename = "opacity")]
    Opacity,
}

impl AnimatedProperty {
    /// All animatable properties, in resolution order
    pub const ALL: [AnimatedProperty; 6] = [
        AnimatedProperty::PositionX,
        AnimatedProperty::PositionY,
        AnimatedProperty::SizeW,
        AnimatedProperty::SizeH,
        AnimatedProperty::Rotation,
        AnimatedProperty::Opacity,
    ];

    /// Dotted property path, for display and logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::PositionX => "position.x",
            Self::PositionY => "position.y",
            Self::SizeW => "size.w",
            Self::SizeH => "size.h",
            Self::Rotation => "rotation",
            Self::Opacity => "opacity",
        }
    }
}

impl std::fmt::Display for AnimatedProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Time-ordered keyframes for one (layer, property) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationTrack {
    /// Unique track ID
    pub id: TrackId,
    /// Target layer
    pub layer: LayerId,
    /// Target property
    pub property: AnimatedProperty,
    /// Keyframes sorted by time ascending, no two at the same instant
    keyframes: Vec<Keyframe>,
}

impl AnimationTrack {
    /// Create an empty track
    pub fn new(layer: LayerId, property: AnimatedProperty) -> Self {
        Self {
            id: TrackId::new(),
            layer,
            property,
            keyframes: Vec::new(),
        }
    }

    /// Keyframes sorted by time ascending
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Number of keyframes
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// Whether the track has no keyframes
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Insert a keyframe, or overwrite the value of an existing keyframe
    /// at the same instant.
    pub fn set_keyframe(&mut self, time: f32, value: f32) {
        if let Some(existing) = self.keyframes.iter_mut().find(|k| k.is_at(time)) {
            existing.value = value;
            return;
        }
        self.keyframes.push(Keyframe::new(time, value));
        self.keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    /// Remove any keyframe at the given instant. No-op if none matches.
    pub fn remove_keyframe(&mut self, time: f32) {
        self.keyframes.retain(|k| !k.is_at(time));
    }

    /// First keyframe, if any
    pub fn first(&self) -> Option<&Keyframe> {
        self.keyframes.first()
    }

    /// Last keyframe, if any
    pub fn last(&self) -> Option<&Keyframe> {
        self.keyframes.last()
    }

    /// Evaluate the track at a time.
    ///
    /// Returns `None` for an empty track. Outside the keyframed range
    /// the boundary value is returned; the track never extrapolates.
    pub fn value_at(&self, time: f32) -> Option<f32> {
        let first = self.keyframes.first()?;
        if time <= first.time {
            return Some(first.value);
        }
        let last = self.keyframes.last()?;
        if time >= last.time {
            return Some(last.value);
        }

        for pair in self.keyframes.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if time >= a.time && time <= b.time {
                let u = (time - a.time) / (b.time - a.time).max(MIN_SEGMENT);
                return Some(a.value + (b.value - a.value) * u);
            }
        }

        // Unreachable while the sorted invariant holds
        Some(last.value)
    }
}

/// Flat collection of animation tracks, independent of the tree's shape.
///
/// At most one track exists per (layer, property) pair, enforced by the
/// get-or-create path in [`AnimationSet::set_keyframe`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimationSet {
    tracks: IndexMap<TrackId, AnimationTrack>,
}

impl AnimationSet {
    /// Create an empty track collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether there are no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Iterate over all tracks in creation order
    pub fn iter(&self) -> impl Iterator<Item = &AnimationTrack> {
        self.tracks.values()
    }

    /// The track for a (layer, property) pair, if one exists
    pub fn track_for(&self, layer: LayerId, property: AnimatedProperty) -> Option<&AnimationTrack> {
        self.tracks
            .values()
            .find(|t| t.layer == layer && t.property == property)
    }

    /// Tracks targeting the given layer
    pub fn tracks_for_layer(&self, layer: LayerId) -> impl Iterator<Item = &AnimationTrack> {
        self.tracks.values().filter(move |t| t.layer == layer)
    }

    /// Record a keyframe, creating the (layer, property) track on first use.
    ///
    /// Returns the id of the track that received the keyframe.
    pub fn set_keyframe(
        &mut self,
        layer: LayerId,
        property: AnimatedProperty,
        time: f32,
        value: f32,
    ) -> TrackId {
        let existing = self
            .tracks
            .values_mut()
            .find(|t| t.layer == layer && t.property == property);
        match existing {
            Some(track) => {
                track.set_keyframe(time, value);
                track.id
            }
            None => {
                let mut track = AnimationTrack::new(layer, property);
                track.set_keyframe(time, value);
                let id = track.id;
                tracing::debug!(%property, time, "Track created");
                self.tracks.insert(id, track);
                id
            }
        }
    }

    /// Remove keyframes at the given instant from the matching track.
    /// No-op if the track or the keyframe does not exist.
    pub fn remove_keyframe(&mut self, layer: LayerId, property: AnimatedProperty, time: f32) {
        if let Some(track) = self
            .tracks
            .values_mut()
            .find(|t| t.layer == layer && t.property == property)
        {
            track.remove_keyframe(time);
        }
    }

    /// Evaluate the track for a (layer, property) pair at a time.
    ///
    /// Returns `None` if the track is missing or empty, so callers fall
    /// back to the layer's static value.
    pub fn value_for(&self, layer: LayerId, property: AnimatedProperty, time: f32) -> Option<f32> {
        self.track_for(layer, property)?.value_at(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyframe::TIME_EPSILON;

    fn track_with(keys: &[(f32, f32)]) -> AnimationTrack {
        let mut track = AnimationTrack::new(LayerId::new(), AnimatedProperty::PositionX);
        for &(t, v) in keys {
            track.set_keyframe(t, v);
        }
        track
    }

    #[test]
    fn test_value_at_boundaries_are_exact() {
        let track = track_with(&[(0.0, 10.0), (2.0, 20.0)]);
        assert_eq!(track.value_at(0.0), Some(10.0));
        assert_eq!(track.value_at(2.0), Some(20.0));
    }

    #[test]
    fn test_value_at_clamps_outside_range() {
        let track = track_with(&[(0.0, 10.0), (2.0, 20.0)]);
        assert_eq!(track.value_at(-1.0), Some(10.0));
        assert_eq!(track.value_at(5.0), Some(20.0));
    }

    #[test]
    fn test_linear_interpolation() {
        let track = track_with(&[(0.0, 10.0), (2.0, 20.0)]);
        assert_eq!(track.value_at(1.0), Some(15.0));
        assert_eq!(track.value_at(0.5), Some(12.5));
    }

    #[test]
    fn test_multi_segment_interpolation() {
        let track = track_with(&[(0.0, 0.0), (1.0, 10.0), (2.0, 4.0)]);
        assert_eq!(track.value_at(0.5), Some(5.0));
        assert_eq!(track.value_at(1.5), Some(7.0));
    }

    #[test]
    fn test_empty_track_evaluates_to_none() {
        let track = AnimationTrack::new(LayerId::new(), AnimatedProperty::Opacity);
        assert_eq!(track.value_at(1.0), None);
    }

    #[test]
    fn test_near_coincident_keyframes_do_not_blow_up() {
        let mut track = AnimationTrack::new(LayerId::new(), AnimatedProperty::Rotation);
        // Bypass the same-instant window by spacing slightly beyond it
        track.set_keyframe(1.0, 0.0);
        track.set_keyframe(1.0 + TIME_EPSILON * 1.5, 100.0);
        let v = track.value_at(1.0 + TIME_EPSILON).unwrap();
        assert!(v.is_finite());
        assert!((0.0..=100.0).contains(&v));
    }

    #[test]
    fn test_set_keyframe_replaces_within_epsilon() {
        let mut track = track_with(&[(1.0, 5.0)]);
        track.set_keyframe(1.0 + TIME_EPSILON / 2.0, 9.0);
        assert_eq!(track.len(), 1);
        assert_eq!(track.value_at(1.0), Some(9.0));
    }

    #[test]
    fn test_set_keyframe_idempotent_for_same_time_and_value() {
        let mut track = track_with(&[(1.0, 5.0)]);
        track.set_keyframe(1.0, 5.0);
        track.set_keyframe(1.0, 5.0);
        assert_eq!(track.len(), 1);
    }

    #[test]
    fn test_keyframes_stay_sorted() {
        let track = track_with(&[(3.0, 3.0), (1.0, 1.0), (2.0, 2.0)]);
        let times: Vec<f32> = track.keyframes().iter().map(|k| k.time).collect();
        assert_eq!(times, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_remove_keyframe_is_total() {
        let mut track = track_with(&[(0.0, 1.0), (1.0, 2.0)]);
        track.remove_keyframe(1.0);
        assert_eq!(track.len(), 1);
        // Removing again, or at a time with no keyframe, is a no-op
        track.remove_keyframe(1.0);
        track.remove_keyframe(7.0);
        assert_eq!(track.len(), 1);
    }

    #[test]
    fn test_set_creates_one_track_per_pair() {
        let mut set = AnimationSet::new();
        let layer = LayerId::new();
        let a = set.set_keyframe(layer, AnimatedProperty::PositionX, 0.0, 1.0);
        let b = set.set_keyframe(layer, AnimatedProperty::PositionX, 1.0, 2.0);
        assert_eq!(a, b);
        assert_eq!(set.len(), 1);
        assert_eq!(set.track_for(layer, AnimatedProperty::PositionX).unwrap().len(), 2);

        set.set_keyframe(layer, AnimatedProperty::Opacity, 0.0, 1.0);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_set_remove_keyframe_missing_track_is_noop() {
        let mut set = AnimationSet::new();
        set.remove_keyframe(LayerId::new(), AnimatedProperty::Rotation, 1.0);
        assert!(set.is_empty());
    }

    #[test]
    fn test_removing_all_keyframes_keeps_the_track() {
        let mut set = AnimationSet::new();
        let layer = LayerId::new();
        set.set_keyframe(layer, AnimatedProperty::SizeW, 0.5, 80.0);
        set.remove_keyframe(layer, AnimatedProperty::SizeW, 0.5);
        assert_eq!(set.len(), 1);
        assert_eq!(set.value_for(layer, AnimatedProperty::SizeW, 0.5), None);
    }

    #[test]
    fn test_tracks_for_layer_filters() {
        let mut set = AnimationSet::new();
        let a = LayerId::new();
        let b = LayerId::new();
        set.set_keyframe(a, AnimatedProperty::PositionX, 0.0, 1.0);
        set.set_keyframe(a, AnimatedProperty::PositionY, 0.0, 1.0);
        set.set_keyframe(b, AnimatedProperty::Opacity, 0.0, 0.5);
        assert_eq!(set.tracks_for_layer(a).count(), 2);
        assert_eq!(set.tracks_for_layer(b).count(), 1);
    }
}
