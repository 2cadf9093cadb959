// SPDX-License-Identifier: MIT OR Apache-2.0
//! Resolution: a layer's effective properties at a query time.
//!
//! Resolution is pure. It clones the input layer, overrides every
//! animatable channel that has a non-empty track, and recurses into
//! group children so nested layers animate independently. Results are
//! never cached; callers re-resolve whenever time or a track changes.

use crate::track::{AnimatedProperty, AnimationSet};
use wallscape_editor_scene::Layer;

/// Resolve one layer (and, for groups, its whole subtree) at a time.
///
/// Channels without a track, or with an empty track, keep the layer's
/// static value.
pub fn resolve_layer(layer: &Layer, tracks: &AnimationSet, time: f32) -> Layer {
    let mut resolved = layer.clone();

    for property in AnimatedProperty::ALL {
        let Some(value) = tracks.value_for(layer.id, property, time) else {
            continue;
        };
        match property {
            AnimatedProperty::PositionX => resolved.position.x = value,
            AnimatedProperty::PositionY => resolved.position.y = value,
            AnimatedProperty::SizeW => resolved.size.w = value,
            AnimatedProperty::SizeH => resolved.size.h = value,
            AnimatedProperty::Rotation => resolved.rotation = value,
            AnimatedProperty::Opacity => resolved.opacity = value,
        }
    }

    if let Some(children) = resolved.children_mut() {
        let animated: Vec<Layer> = children
            .iter()
            .map(|child| resolve_layer(child, tracks, time))
            .collect();
        *children = animated;
    }

    resolved
}

/// Resolve a root-level layer sequence at a time
pub fn resolve_layers(layers: &[Layer], tracks: &AnimationSet, time: f32) -> Vec<Layer> {
    layers
        .iter()
        .map(|layer| resolve_layer(layer, tracks, time))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::AnimationSet;
    use wallscape_editor_scene::{Layer, ShapeKind, Vec2};

    #[test]
    fn test_static_layer_resolves_unchanged() {
        let layer = Layer::shape(ShapeKind::Rect);
        let tracks = AnimationSet::new();
        let resolved = resolve_layer(&layer, &tracks, 2.0);
        assert_eq!(resolved, layer);
    }

    #[test]
    fn test_tracked_channels_override_static_values() {
        let mut layer = Layer::shape(ShapeKind::Rect);
        layer.position = Vec2::new(0.0, 40.0);

        let mut tracks = AnimationSet::new();
        tracks.set_keyframe(layer.id, AnimatedProperty::PositionX, 0.0, 0.0);
        tracks.set_keyframe(layer.id, AnimatedProperty::PositionX, 2.0, 100.0);
        tracks.set_keyframe(layer.id, AnimatedProperty::Opacity, 0.0, 1.0);
        tracks.set_keyframe(layer.id, AnimatedProperty::Opacity, 2.0, 0.0);

        let resolved = resolve_layer(&layer, &tracks, 1.0);
        assert_eq!(resolved.position.x, 50.0);
        assert_eq!(resolved.position.y, 40.0); // untracked channel stays static
        assert_eq!(resolved.opacity, 0.5);
    }

    #[test]
    fn test_group_children_resolve_recursively() {
        let mut group = Layer::group("Scene");
        let mut child = Layer::text();
        child.position = Vec2::new(10.0, 10.0);
        let child_id = child.id;
        group.children_mut().unwrap().push(child);

        let mut tracks = AnimationSet::new();
        tracks.set_keyframe(child_id, AnimatedProperty::PositionY, 0.0, 0.0);
        tracks.set_keyframe(child_id, AnimatedProperty::PositionY, 4.0, 80.0);

        let resolved = resolve_layer(&group, &tracks, 2.0);
        let resolved_child = &resolved.children().unwrap()[0];
        assert_eq!(resolved_child.position.y, 40.0);
        assert_eq!(resolved_child.position.x, 10.0);
    }

    #[test]
    fn test_resolution_does_not_mutate_inputs() {
        let layer = Layer::shape(ShapeKind::Circle);
        let mut tracks = AnimationSet::new();
        tracks.set_keyframe(layer.id, AnimatedProperty::Rotation, 0.0, 0.0);
        tracks.set_keyframe(layer.id, AnimatedProperty::Rotation, 1.0, 90.0);

        let before = layer.clone();
        let _ = resolve_layer(&layer, &tracks, 0.5);
        assert_eq!(layer, before);
    }

    #[test]
    fn test_resolve_layers_maps_the_sequence() {
        let a = Layer::shape(ShapeKind::Rect);
        let b = Layer::text();
        let mut tracks = AnimationSet::new();
        tracks.set_keyframe(b.id, AnimatedProperty::Opacity, 0.0, 0.2);

        let resolved = resolve_layers(&[a.clone(), b.clone()], &tracks, 3.0);
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0], a);
        assert_eq!(resolved[1].opacity, 0.2);
    }
}
