// SPDX-License-Identifier: MIT OR Apache-2.0
//! The versioned document: scene, selection, timeline, and tracks.

use serde::{Deserialize, Serialize};
use wallscape_editor_scene::{Layer, LayerId, LayerTree, ProjectMeta};
use wallscape_editor_timeline::{resolve_layers, AnimationSet, TimelineState};

/// The unit of editing, undo/redo, and persistence.
///
/// Documents hydrated from older snapshots backfill a default timeline
/// and an empty track collection when those sections are absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Project identity and canvas settings
    pub meta: ProjectMeta,
    /// Root-level layer sequence
    #[serde(default)]
    pub layers: LayerTree,
    /// Currently selected layer, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<LayerId>,
    /// Timeline playback state
    #[serde(default)]
    pub timeline: TimelineState,
    /// Animation tracks, flat and independent of the tree's shape
    #[serde(default)]
    pub animations: AnimationSet,
}

impl Document {
    /// Create a fresh document: empty tree, zero tracks, timeline at
    /// t = 0, paused.
    pub fn new(meta: ProjectMeta) -> Self {
        Self {
            meta,
            layers: LayerTree::new(),
            selected: None,
            timeline: TimelineState::default(),
            animations: AnimationSet::new(),
        }
    }

    /// The currently selected layer, looked up through groups
    pub fn selected_layer(&self) -> Option<&Layer> {
        self.layers.find(self.selected?)
    }

    /// Resolve every layer at the current timeline position
    pub fn resolved_layers(&self) -> Vec<Layer> {
        resolve_layers(
            self.layers.layers(),
            &self.animations,
            self.timeline.current_time,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wallscape_editor_scene::ShapeKind;
    use wallscape_editor_timeline::{AnimatedProperty, DEFAULT_DURATION, DEFAULT_FPS};

    #[test]
    fn test_fresh_document_is_empty_and_paused() {
        let doc = Document::new(ProjectMeta::new("Drift", 390.0, 844.0));
        assert!(doc.layers.is_empty());
        assert!(doc.selected.is_none());
        assert!(doc.animations.is_empty());
        assert_eq!(doc.timeline.current_time, 0.0);
        assert!(!doc.timeline.playing);
    }

    #[test]
    fn test_hydration_backfills_timeline_and_tracks() {
        // Snapshot written before timeline/animation support existed
        let json = r##"{
            "meta": {
                "id": "9d1f0a62-18a8-4a7e-9f7e-3f6d21c0aa01",
                "name": "Legacy",
                "width": 390.0,
                "height": 844.0,
                "background": "#e5e7eb"
            },
            "layers": []
        }"##;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.timeline.duration, DEFAULT_DURATION);
        assert_eq!(doc.timeline.fps, DEFAULT_FPS);
        assert!(doc.timeline.looping);
        assert!(doc.animations.is_empty());
        assert!(doc.selected.is_none());
    }

    #[test]
    fn test_serde_roundtrip_deep_equals() {
        let mut doc = Document::new(ProjectMeta::new("Tides", 1920.0, 1080.0));
        let layer = Layer::shape(ShapeKind::Circle);
        let id = doc.layers.push(layer);
        doc.selected = Some(id);
        doc.animations
            .set_keyframe(id, AnimatedProperty::Opacity, 1.0, 0.5);
        doc.timeline.set_time(1.0);

        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_resolved_layers_follow_the_playhead() {
        let mut doc = Document::new(ProjectMeta::new("Orbit", 390.0, 844.0));
        let id = doc.layers.push(Layer::shape(ShapeKind::Rect));
        doc.animations
            .set_keyframe(id, AnimatedProperty::Rotation, 0.0, 0.0);
        doc.animations
            .set_keyframe(id, AnimatedProperty::Rotation, 4.0, 360.0);

        doc.timeline.set_time(2.0);
        assert_eq!(doc.resolved_layers()[0].rotation, 180.0);

        doc.timeline.set_time(4.0);
        assert_eq!(doc.resolved_layers()[0].rotation, 360.0);
    }
}
