// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fit math for centering the project canvas inside a preview viewport.

use crate::layer::Size;

/// Scale and centering offset that fit a canvas into a padded viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasFit {
    /// Uniform scale applied to the canvas
    pub scale: f32,
    /// Horizontal offset of the scaled canvas within the viewport
    pub offset_x: f32,
    /// Vertical offset of the scaled canvas within the viewport
    pub offset_y: f32,
}

impl CanvasFit {
    /// Compute the largest uniform scale at which the canvas fits inside
    /// the viewport minus padding on every side, centered.
    ///
    /// Degenerate inputs (zero-sized canvas, viewport smaller than the
    /// padding) fall back to a scale of 1.
    pub fn compute(canvas: Size, viewport: Size, padding: f32) -> Self {
        let max_w = viewport.w - padding * 2.0;
        let max_h = viewport.h - padding * 2.0;
        let s = (max_w / canvas.w).min(max_h / canvas.h);
        let scale = if s.is_finite() && s > 0.0 { s } else { 1.0 };
        Self {
            scale,
            offset_x: (viewport.w - canvas.w * scale) / 2.0,
            offset_y: (viewport.h - canvas.h * scale) / 2.0,
        }
    }
}
