// SPDX-License-Identifier: MIT OR Apache-2.0
//! Canvas drag sessions.
//!
//! A completed drag is equivalent to "record start keyframes, then end
//! keyframes" on the position tracks, with every pointer move in
//! between applied transiently. Beginning a drag records the starting
//! keyframes immediately, even if the pointer never moves afterwards,
//! so touching a layer always snapshots its pose on the timeline.

use crate::error::DocumentError;
use crate::persist::DocumentStorage;
use crate::store::DocumentStore;
use wallscape_editor_scene::{LayerId, LayerPatch, Vec2};
use wallscape_editor_timeline::AnimatedProperty;

/// In-progress drag of a single layer
#[derive(Debug, Clone, Copy)]
pub(crate) struct DragSession {
    layer: LayerId,
    start: Vec2,
}

impl<S: DocumentStorage> DocumentStore<S> {
    /// Begin dragging a layer: select it and record position keyframes
    /// at the current timeline position.
    ///
    /// Returns `false` without starting a drag when the layer id does
    /// not exist. Beginning a new drag replaces any session left over
    /// from a lost release event.
    pub fn begin_drag(&mut self, layer: LayerId) -> Result<bool, DocumentError> {
        let doc = self.document().ok_or(DocumentError::NotInitialized)?;
        let Some(target) = doc.layers.find(layer) else {
            return Ok(false);
        };
        let start = target.position;

        self.select_layer(Some(layer))?;
        self.add_keyframe(layer, AnimatedProperty::PositionX, start.x)?;
        self.add_keyframe(layer, AnimatedProperty::PositionY, start.y)?;

        self.drag = Some(DragSession { layer, start });
        tracing::debug!(x = start.x, y = start.y, "Drag started");
        Ok(true)
    }

    /// Move the dragged layer by a pointer delta from the drag origin.
    ///
    /// Transient: no history checkpoint, no save. No-op when no drag is
    /// in progress.
    pub fn drag_by(&mut self, dx: f32, dy: f32) -> Result<(), DocumentError> {
        let Some(session) = self.drag else {
            return Ok(());
        };
        let target = Vec2::new(session.start.x + dx, session.start.y + dy);
        self.update_layer_transient(session.layer, LayerPatch::position(target))
    }

    /// Finish the drag: record position keyframes at the final resolved
    /// position. No-op when no drag is in progress.
    pub fn end_drag(&mut self, dx: f32, dy: f32) -> Result<(), DocumentError> {
        let Some(session) = self.drag.take() else {
            return Ok(());
        };
        let end = Vec2::new(session.start.x + dx, session.start.y + dy);
        self.add_keyframe(session.layer, AnimatedProperty::PositionX, end.x)?;
        self.add_keyframe(session.layer, AnimatedProperty::PositionY, end.y)?;
        tracing::debug!(x = end.x, y = end.y, "Drag finished");
        Ok(())
    }

    /// Whether a drag session is in progress
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}
