// SPDX-License-Identifier: MIT OR Apache-2.0
//! The layer tree: id-addressed recursive operations over groups.
//!
//! All operations are total. Updating or deleting an id that does not
//! exist anywhere in the tree leaves the tree unchanged and reports the
//! miss through the return value instead of failing.

use crate::layer::{Layer, LayerId, LayerPatch};
use serde::{Deserialize, Serialize};

/// Ordered root-level sequence of layers, back to front.
///
/// Groups own their children, so the tree is fully described by its
/// root sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerTree {
    layers: Vec<Layer>,
}

impl LayerTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Root-level layers, back to front
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Mutable access to the root-level layers, for direct tree edits
    /// such as moving a layer into a group
    pub fn layers_mut(&mut self) -> &mut Vec<Layer> {
        &mut self.layers
    }

    /// Number of root-level layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the tree has no layers at all
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Append a layer to the root-level sequence and return its id
    pub fn push(&mut self, layer: Layer) -> LayerId {
        let id = layer.id;
        self.layers.push(layer);
        id
    }

    /// Find a layer anywhere in the tree
    pub fn find(&self, id: LayerId) -> Option<&Layer> {
        find_in(&self.layers, id)
    }

    /// Find a layer anywhere in the tree, mutably
    pub fn find_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        find_in_mut(&mut self.layers, id)
    }

    /// Whether a layer with the given id exists anywhere in the tree
    pub fn contains(&self, id: LayerId) -> bool {
        self.find(id).is_some()
    }

    /// Replace only the patch's fields on the matching layer.
    ///
    /// Returns `true` if a layer was updated, `false` if the id was not
    /// found (the tree is unchanged in that case).
    pub fn update(&mut self, id: LayerId, patch: &LayerPatch) -> bool {
        match self.find_mut(id) {
            Some(layer) => {
                patch.apply_to(layer);
                true
            }
            None => false,
        }
    }

    /// Remove the matching layer wherever it occurs, top level or nested.
    ///
    /// Returns `true` if a layer was removed.
    pub fn delete(&mut self, id: LayerId) -> bool {
        delete_in(&mut self.layers, id)
    }

    /// Depth-first traversal of every layer in the tree
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        let mut out = Vec::new();
        collect(&self.layers, &mut out);
        out.into_iter()
    }

    /// Total number of layers in the tree, including nested ones
    pub fn total_count(&self) -> usize {
        self.iter().count()
    }
}

impl From<Vec<Layer>> for LayerTree {
    fn from(layers: Vec<Layer>) -> Self {
        Self { layers }
    }
}

fn find_in(layers: &[Layer], id: LayerId) -> Option<&Layer> {
    for layer in layers {
        if layer.id == id {
            return Some(layer);
        }
        if let Some(children) = layer.children() {
            if let Some(found) = find_in(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn find_in_mut(layers: &mut [Layer], id: LayerId) -> Option<&mut Layer> {
    for layer in layers {
        if layer.id == id {
            return Some(layer);
        }
        if let Some(children) = layer.children_mut() {
            if let Some(found) = find_in_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn delete_in(layers: &mut Vec<Layer>, id: LayerId) -> bool {
    let before = layers.len();
    layers.retain(|l| l.id != id);
    if layers.len() != before {
        return true;
    }
    for layer in layers {
        if let Some(children) = layer.children_mut() {
            if delete_in(children, id) {
                return true;
            }
        }
    }
    false
}

fn collect<'a>(layers: &'a [Layer], out: &mut Vec<&'a Layer>) {
    for layer in layers {
        out.push(layer);
        if let Some(children) = layer.children() {
            collect(children, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{ShapeKind, Vec2};

    /// Tree with a shape at the root and a group holding a nested text layer.
    fn sample_tree() -> (LayerTree, LayerId, LayerId, LayerId) {
        let mut tree = LayerTree::new();
        let shape_id = tree.push(Layer::shape(ShapeKind::Rect));

        let mut group = Layer::group("Group");
        let nested = Layer::text();
        let nested_id = nested.id;
        group.children_mut().unwrap().push(nested);
        let group_id = tree.push(group);

        (tree, shape_id, group_id, nested_id)
    }

    #[test]
    fn test_find_recurses_into_groups() {
        let (tree, shape_id, group_id, nested_id) = sample_tree();
        assert!(tree.find(shape_id).is_some());
        assert!(tree.find(group_id).is_some());
        assert_eq!(tree.find(nested_id).unwrap().kind_name(), "text");
        assert!(tree.contains(nested_id));
        assert!(!tree.contains(LayerId::new()));
    }

    #[test]
    fn test_update_nested_layer() {
        let (mut tree, _, _, nested_id) = sample_tree();
        let moved = tree.update(nested_id, &LayerPatch::position(Vec2::new(7.0, 9.0)));
        assert!(moved);
        assert_eq!(tree.find(nested_id).unwrap().position, Vec2::new(7.0, 9.0));
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let (mut tree, ..) = sample_tree();
        let before = tree.clone();
        let updated = tree.update(LayerId::new(), &LayerPatch::position(Vec2::new(1.0, 1.0)));
        assert!(!updated);
        assert_eq!(tree, before);
    }

    #[test]
    fn test_delete_top_level() {
        let (mut tree, shape_id, ..) = sample_tree();
        assert!(tree.delete(shape_id));
        assert!(!tree.contains(shape_id));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_delete_nested_layer() {
        let (mut tree, _, group_id, nested_id) = sample_tree();
        assert!(tree.delete(nested_id));
        assert!(!tree.contains(nested_id));
        assert!(tree.contains(group_id));
        assert_eq!(tree.find(group_id).unwrap().children().unwrap().len(), 0);
    }

    #[test]
    fn test_delete_group_removes_subtree() {
        let (mut tree, shape_id, group_id, nested_id) = sample_tree();
        assert!(tree.delete(group_id));
        assert!(!tree.contains(group_id));
        assert!(!tree.contains(nested_id));
        assert!(tree.contains(shape_id));
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let (mut tree, ..) = sample_tree();
        let before = tree.clone();
        assert!(!tree.delete(LayerId::new()));
        assert_eq!(tree, before);
    }

    #[test]
    fn test_iter_walks_depth_first() {
        let (tree, shape_id, group_id, nested_id) = sample_tree();
        let ids: Vec<LayerId> = tree.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![shape_id, group_id, nested_id]);
        assert_eq!(tree.total_count(), 3);
        assert_eq!(tree.len(), 2);
    }
}
