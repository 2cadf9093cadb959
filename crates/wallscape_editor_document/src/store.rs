// SPDX-License-Identifier: MIT OR Apache-2.0
//! The document store: the single mutation entry point.
//!
//! Mutations come in two kinds, distinguished by persistence intent:
//!
//! - **Persisted** (layer add/update/delete, keyframe add/remove,
//!   selection, duration change): the pre-mutation document is
//!   snapshotted into history, the change is applied, and a save goes
//!   to the persistence bridge.
//! - **Transient** (live drags, playback ticks, live scrubs): the
//!   change is applied directly, bypassing history and storage, so
//!   high-frequency updates never thrash either.
//!
//! Everything runs synchronously on the caller's thread; drags,
//! playback, and saves are serialized through this one entry point.
//! Saves are fire-and-forget: failures are logged and editing
//! continues on the in-memory document.

use crate::config::EditorConfig;
use crate::document::Document;
use crate::drag::DragSession;
use crate::error::DocumentError;
use crate::history::DocumentHistory;
use crate::persist::DocumentStorage;
use std::time::Instant;
use wallscape_editor_scene::{Layer, LayerId, LayerPatch, ProjectMeta, ShapeKind};
use wallscape_editor_timeline::{AnimatedProperty, PlaybackClock, TimelineState};

/// Owner of the live document, its history, and the persistence bridge
pub struct DocumentStore<S> {
    doc: Option<Document>,
    history: DocumentHistory,
    storage: S,
    clock: PlaybackClock,
    pub(crate) drag: Option<DragSession>,
    autosave: bool,
    fresh_timeline: TimelineState,
}

impl<S: DocumentStorage> DocumentStore<S> {
    /// Create an uninitialized store over a persistence bridge.
    ///
    /// Every mutation fails with [`DocumentError::NotInitialized`]
    /// until [`open`](Self::open) succeeds.
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, &EditorConfig::default())
    }

    /// Create an uninitialized store using editor preferences for the
    /// history depth, autosave behavior, and new-document timeline.
    pub fn with_config(storage: S, config: &EditorConfig) -> Self {
        let mut fresh_timeline = TimelineState::default();
        fresh_timeline.set_duration(config.default_duration);
        fresh_timeline.fps = config.default_fps;
        Self {
            doc: None,
            history: DocumentHistory::with_depth(config.history_depth),
            storage,
            clock: PlaybackClock::new(),
            drag: None,
            autosave: config.autosave,
            fresh_timeline,
        }
    }

    /// Open the editing session for a project.
    ///
    /// Loads the last saved snapshot for `meta.id`; when none exists, a
    /// fresh document is created from `meta`. Either way the history is
    /// reset and any playback or drag state is dropped.
    pub fn open(&mut self, meta: ProjectMeta) -> Result<(), DocumentError> {
        let doc = match self.storage.load(meta.id)? {
            Some(doc) => {
                tracing::info!(project = %doc.meta.id, name = %doc.meta.name, "Opened project");
                doc
            }
            None => {
                tracing::info!(project = %meta.id, name = %meta.name, "Created project");
                let mut doc = Document::new(meta);
                doc.timeline = self.fresh_timeline;
                doc
            }
        };
        self.doc = Some(doc);
        self.history.clear();
        self.clock.cancel();
        self.drag = None;
        Ok(())
    }

    /// End the editing session, discarding the document and history
    pub fn close(&mut self) {
        self.doc = None;
        self.history.clear();
        self.clock.cancel();
        self.drag = None;
    }

    /// Whether a document has been opened or created
    pub fn is_initialized(&self) -> bool {
        self.doc.is_some()
    }

    /// The live document, if initialized
    pub fn document(&self) -> Option<&Document> {
        self.doc.as_ref()
    }

    /// Undo/redo state, read-only
    pub fn history(&self) -> &DocumentHistory {
        &self.history
    }

    /// The persistence bridge, read-only
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The currently selected layer, looked up through groups
    pub fn selected_layer(&self) -> Option<&Layer> {
        self.doc.as_ref()?.selected_layer()
    }

    /// Every layer resolved at the current timeline position, for the
    /// render surface. Empty when no document is open.
    pub fn resolved_layers(&self) -> Vec<Layer> {
        self.doc
            .as_ref()
            .map(Document::resolved_layers)
            .unwrap_or_default()
    }

    // Mutation plumbing

    /// Persisted mutation: snapshot history, apply, save.
    fn commit<R>(&mut self, f: impl FnOnce(&mut Document) -> R) -> Result<R, DocumentError> {
        let doc = self.doc.as_mut().ok_or(DocumentError::NotInitialized)?;
        let snapshot = doc.clone();
        let out = f(doc);
        self.history.push(snapshot);
        self.save_current();
        Ok(out)
    }

    /// Transient mutation: apply only.
    fn transient<R>(&mut self, f: impl FnOnce(&mut Document) -> R) -> Result<R, DocumentError> {
        let doc = self.doc.as_mut().ok_or(DocumentError::NotInitialized)?;
        Ok(f(doc))
    }

    /// Saved-but-untracked mutation: apply, save, no history checkpoint.
    fn saved_only<R>(&mut self, f: impl FnOnce(&mut Document) -> R) -> Result<R, DocumentError> {
        let doc = self.doc.as_mut().ok_or(DocumentError::NotInitialized)?;
        let out = f(doc);
        self.save_current();
        Ok(out)
    }

    fn save_current(&mut self) {
        if !self.autosave {
            return;
        }
        let Some(doc) = self.doc.as_ref() else {
            return;
        };
        if let Err(err) = self.storage.save(doc.meta.id, doc) {
            tracing::warn!(error = %err, "Autosave failed; document kept in memory");
        }
    }

    // Layer mutations

    /// Add a text layer at the root level and select it
    pub fn add_text_layer(&mut self) -> Result<LayerId, DocumentError> {
        self.add_layer(Layer::text())
    }

    /// Add an image layer at the root level and select it
    pub fn add_image_layer(&mut self, src: Option<String>) -> Result<LayerId, DocumentError> {
        self.add_layer(Layer::image(src))
    }

    /// Add a shape layer at the root level and select it
    pub fn add_shape_layer(&mut self, kind: ShapeKind) -> Result<LayerId, DocumentError> {
        self.add_layer(Layer::shape(kind))
    }

    fn add_layer(&mut self, layer: Layer) -> Result<LayerId, DocumentError> {
        let kind = layer.kind_name();
        let id = self.commit(|doc| {
            let id = doc.layers.push(layer);
            doc.selected = Some(id);
            id
        })?;
        tracing::debug!(kind, "Layer added");
        Ok(id)
    }

    /// Replace only the patch's fields on the matching layer.
    ///
    /// A missing id is a no-op, not an error.
    pub fn update_layer(&mut self, id: LayerId, patch: LayerPatch) -> Result<(), DocumentError> {
        self.commit(|doc| {
            doc.layers.update(id, &patch);
        })
    }

    /// Like [`update_layer`](Self::update_layer) but transient: no
    /// history checkpoint, no save. Used for pointer-driven updates.
    pub fn update_layer_transient(
        &mut self,
        id: LayerId,
        patch: LayerPatch,
    ) -> Result<(), DocumentError> {
        self.transient(|doc| {
            doc.layers.update(id, &patch);
        })
    }

    /// Delete a layer wherever it occurs in the tree.
    ///
    /// Clears the selection when the deleted layer was selected or was
    /// an ancestor of the selection. Returns whether a layer was
    /// removed; a missing id is a no-op.
    pub fn delete_layer(&mut self, id: LayerId) -> Result<bool, DocumentError> {
        self.commit(|doc| {
            let removed = doc.layers.delete(id);
            if let Some(selected) = doc.selected {
                if selected == id || !doc.layers.contains(selected) {
                    doc.selected = None;
                }
            }
            removed
        })
    }

    /// Change the selection
    pub fn select_layer(&mut self, id: Option<LayerId>) -> Result<(), DocumentError> {
        self.commit(|doc| {
            doc.selected = id;
        })
    }

    // Keyframe mutations

    /// Record a keyframe for a layer property at the current timeline
    /// position, creating the track on first use. Recording at the
    /// same instant as an existing keyframe replaces its value.
    pub fn add_keyframe(
        &mut self,
        layer: LayerId,
        property: AnimatedProperty,
        value: f32,
    ) -> Result<(), DocumentError> {
        self.commit(|doc| {
            let time = doc.timeline.current_time;
            doc.animations.set_keyframe(layer, property, time, value);
        })
    }

    /// Remove keyframes at the given time from the matching track.
    /// Missing track or keyframe is a no-op.
    pub fn remove_keyframe(
        &mut self,
        layer: LayerId,
        property: AnimatedProperty,
        time: f32,
    ) -> Result<(), DocumentError> {
        self.commit(|doc| {
            doc.animations.remove_keyframe(layer, property, time);
        })
    }

    /// Record a keyframe for the selected layer at the property's
    /// current static (un-animated) value.
    ///
    /// Returns `false` without touching the document when nothing is
    /// selected.
    pub fn keyframe_selected(&mut self, property: AnimatedProperty) -> Result<bool, DocumentError> {
        let doc = self.doc.as_ref().ok_or(DocumentError::NotInitialized)?;
        let Some(layer) = doc.selected_layer() else {
            return Ok(false);
        };
        let (id, value) = (layer.id, static_value(layer, property));
        self.add_keyframe(id, property, value)?;
        Ok(true)
    }

    // Timeline control

    /// Seek the playhead, clamped into the timeline.
    ///
    /// Seeks within a tight tolerance of the current time are no-ops
    /// with no observable effect. A non-transient seek saves; neither
    /// kind checkpoints history.
    pub fn set_time(&mut self, time: f32, transient: bool) -> Result<bool, DocumentError> {
        let doc = self.doc.as_mut().ok_or(DocumentError::NotInitialized)?;
        let changed = doc.timeline.set_time(time);
        if changed && !transient {
            self.save_current();
        }
        Ok(changed)
    }

    /// Change the timeline duration (clamped to the positive minimum,
    /// clamping the playhead down with it)
    pub fn set_duration(&mut self, duration: f32) -> Result<(), DocumentError> {
        self.commit(|doc| {
            doc.timeline.set_duration(duration);
        })
    }

    /// Enable or disable looping. Saved, but not a history checkpoint.
    pub fn set_loop(&mut self, looping: bool) -> Result<(), DocumentError> {
        self.saved_only(|doc| {
            doc.timeline.set_loop(looping);
        })
    }

    /// Start playback
    pub fn play(&mut self) -> Result<(), DocumentError> {
        self.saved_only(|doc| doc.timeline.play())
    }

    /// Pause playback and disarm the clock
    pub fn pause(&mut self) -> Result<(), DocumentError> {
        self.saved_only(|doc| doc.timeline.pause())?;
        self.clock.cancel();
        Ok(())
    }

    /// Toggle between playing and paused
    pub fn toggle_play(&mut self) -> Result<(), DocumentError> {
        let playing = self.saved_only(|doc| {
            doc.timeline.toggle_play();
            doc.timeline.playing
        })?;
        if !playing {
            self.clock.cancel();
        }
        Ok(())
    }

    /// Playback tick: advance the playhead by the wall-clock delta
    /// since the previous tick.
    ///
    /// Ticks are transient mutations. While paused the clock is
    /// disarmed (repeatedly, harmlessly) and the tick does nothing.
    /// Returns whether playback was running.
    pub fn tick(&mut self, now: Instant) -> Result<bool, DocumentError> {
        let doc = self.doc.as_mut().ok_or(DocumentError::NotInitialized)?;
        if !doc.timeline.playing {
            self.clock.cancel();
            return Ok(false);
        }
        let dt = self.clock.tick(now);
        doc.timeline.advance(dt);
        if !doc.timeline.playing {
            // Reached the end without looping
            self.clock.cancel();
        }
        Ok(true)
    }

    // History

    /// Restore the most recent history snapshot. No-op when history is
    /// empty. Returns whether a snapshot was restored.
    pub fn undo(&mut self) -> Result<bool, DocumentError> {
        let doc = self.doc.as_mut().ok_or(DocumentError::NotInitialized)?;
        let Some(previous) = self.history.undo(doc) else {
            return Ok(false);
        };
        *doc = previous;
        self.save_current();
        Ok(true)
    }

    /// Symmetric to [`undo`](Self::undo)
    pub fn redo(&mut self) -> Result<bool, DocumentError> {
        let doc = self.doc.as_mut().ok_or(DocumentError::NotInitialized)?;
        let Some(next) = self.history.redo(doc) else {
            return Ok(false);
        };
        *doc = next;
        self.save_current();
        Ok(true)
    }

    // Persistence

    /// Save the current document immediately, bypassing the autosave
    /// toggle. Unlike automatic saves, failures are returned.
    pub fn persist(&mut self) -> Result<(), DocumentError> {
        let doc = self.doc.as_ref().ok_or(DocumentError::NotInitialized)?;
        self.storage.save(doc.meta.id, doc)?;
        Ok(())
    }
}

/// A layer's static (un-animated) value for an animatable property
fn static_value(layer: &Layer, property: AnimatedProperty) -> f32 {
    match property {
        AnimatedProperty::PositionX => layer.position.x,
        AnimatedProperty::PositionY => layer.position.y,
        AnimatedProperty::SizeW => layer.size.w,
        AnimatedProperty::SizeH => layer.size.h,
        AnimatedProperty::Rotation => layer.rotation,
        AnimatedProperty::Opacity => layer.opacity,
    }
}
