// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene graph for Wallscape Editor.
//!
//! This crate provides the document-side scene model:
//! - Typed layers (image, text, shape, group) with geometry and style
//! - The layer tree with id-addressed recursive operations
//! - Project metadata (canvas size, background)
//! - Viewport fit math for centering the canvas in a preview pane
//!
//! ## Architecture
//!
//! Layers are plain data: the tree carries no behavior beyond traversal
//! and id-addressed mutation. Everything time-dependent (animation,
//! playback) lives in `wallscape_editor_timeline`, and the mutation
//! policy (history, persistence) lives in `wallscape_editor_document`.

pub mod layer;
pub mod project;
pub mod tree;
pub mod viewport;

pub use layer::{
    ContentPatch, ImageFit, Layer, LayerContent, LayerId, LayerPatch, LayerStyle, ShapeKind, Size,
    TextAlign, Vec2,
};
pub use project::{ProjectId, ProjectMeta, DEFAULT_BACKGROUND};
pub use tree::LayerTree;
pub use viewport::CanvasFit;
