// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layer definitions for the scene graph.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a layer.
///
/// Ids are unique across the entire tree, not just among siblings:
/// animation tracks and the selection reference layers by id alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(pub Uuid);

impl LayerId {
    /// Create a new random layer ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

/// 2D point in canvas units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate
    pub y: f32,
}

impl Vec2 {
    /// Create a point from its coordinates
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width/height pair in canvas units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub w: f32,
    /// Height
    pub h: f32,
}

impl Size {
    /// Create a size from width and height
    pub const fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }
}

/// How an image is scaled into its layer bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ImageFit {
    /// Scale to cover the bounds, cropping overflow
    #[default]
    Cover,
    /// Scale to fit entirely within the bounds
    Contain,
    /// Stretch to fill the bounds exactly
    Fill,
    /// Natural size, no scaling
    None,
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    /// Align to the left edge
    #[default]
    Left,
    /// Center within the bounds
    Center,
    /// Align to the right edge
    Right,
}

/// Shape primitive drawn by a shape layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    /// Axis-aligned rectangle
    #[default]
    Rect,
    /// Circle inscribed in the layer bounds
    Circle,
    /// Rectangle with rounded corners
    RoundedRect,
}

/// Optional decoration shared by every layer variant.
///
/// Absent fields mean "unset", not zero; the render surface falls back
/// to its own defaults for unset values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayerStyle {
    /// Background fill color (CSS color string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Border color (CSS color string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    /// Border width in canvas units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f32>,
    /// Corner radius in canvas units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f32>,
}

/// Variant payload of a layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayerContent {
    /// Bitmap referenced by source string
    Image {
        /// Source reference (URL or asset path)
        src: String,
        /// Scaling mode into the layer bounds
        #[serde(default)]
        fit: ImageFit,
    },
    /// A run of styled text
    Text {
        /// Text to display
        text: String,
        /// Text color (CSS color string)
        color: String,
        /// Font size in canvas units
        font_size: f32,
        /// Horizontal alignment
        #[serde(default)]
        align: TextAlign,
    },
    /// Vector shape primitive
    Shape {
        /// Shape primitive kind
        shape: ShapeKind,
        /// Fill color (CSS color string)
        fill: String,
        /// Stroke color, if stroked
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stroke: Option<String>,
        /// Stroke width, if stroked
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stroke_width: Option<f32>,
        /// Corner radius for rounded rectangles
        #[serde(default, skip_serializing_if = "Option::is_none")]
        radius: Option<f32>,
    },
    /// Ordered collection of child layers.
    ///
    /// A group exclusively owns its children; every layer has exactly
    /// one parent (a group or the tree root).
    Group {
        /// Child layers, back to front
        children: Vec<Layer>,
    },
}

/// Default layer position offset from the canvas origin
pub const DEFAULT_POSITION: Vec2 = Vec2::new(50.0, 50.0);
/// Default size for text layers
pub const DEFAULT_SIZE: Size = Size::new(120.0, 40.0);
/// Default size for image layers
pub const DEFAULT_IMAGE_SIZE: Size = Size::new(200.0, 120.0);
/// Default size for shape layers
pub const DEFAULT_SHAPE_SIZE: Size = Size::new(120.0, 120.0);
/// Placeholder source for image layers created without one
pub const PLACEHOLDER_IMAGE_SRC: &str = "https://placehold.co/200x120/png";
/// Default fill color for shape layers
pub const DEFAULT_SHAPE_FILL: &str = "#60a5fa";
/// Default text color
pub const DEFAULT_TEXT_COLOR: &str = "#111827";
/// Corner radius applied to new rounded rectangles
pub const DEFAULT_ROUNDED_RADIUS: f32 = 8.0;

fn default_opacity() -> f32 {
    1.0
}

fn default_visible() -> bool {
    true
}

/// A positioned, sized visual node in the scene graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Unique layer ID, stable for the layer's lifetime
    pub id: LayerId,
    /// Display name
    pub name: String,
    /// Top-left position in canvas units
    pub position: Vec2,
    /// Bounds in canvas units
    pub size: Size,
    /// Rotation in degrees
    #[serde(default)]
    pub rotation: f32,
    /// Opacity, intended range 0..1
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// Whether the layer is rendered
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Optional decoration
    #[serde(default)]
    pub style: LayerStyle,
    /// Variant payload
    #[serde(flatten)]
    pub content: LayerContent,
}

impl Layer {
    fn base(name: impl Into<String>, content: LayerContent) -> Self {
        Self {
            id: LayerId::new(),
            name: name.into(),
            position: DEFAULT_POSITION,
            size: DEFAULT_SIZE,
            rotation: 0.0,
            opacity: 1.0,
            visible: true,
            style: LayerStyle::default(),
            content,
        }
    }

    /// Create a text layer with default geometry and styling
    pub fn text() -> Self {
        Self::base(
            "Text Layer",
            LayerContent::Text {
                text: "Text Layer".to_string(),
                color: DEFAULT_TEXT_COLOR.to_string(),
                font_size: 16.0,
                align: TextAlign::Left,
            },
        )
    }

    /// Create an image layer; falls back to a placeholder source
    pub fn image(src: Option<String>) -> Self {
        let mut layer = Self::base(
            "Image Layer",
            LayerContent::Image {
                src: src.unwrap_or_else(|| PLACEHOLDER_IMAGE_SRC.to_string()),
                fit: ImageFit::Cover,
            },
        );
        layer.size = DEFAULT_IMAGE_SIZE;
        layer
    }

    /// Create a shape layer of the given kind
    pub fn shape(kind: ShapeKind) -> Self {
        let radius = match kind {
            ShapeKind::RoundedRect => Some(DEFAULT_ROUNDED_RADIUS),
            ShapeKind::Rect | ShapeKind::Circle => None,
        };
        let mut layer = Self::base(
            "Shape Layer",
            LayerContent::Shape {
                shape: kind,
                fill: DEFAULT_SHAPE_FILL.to_string(),
                stroke: None,
                stroke_width: None,
                radius,
            },
        );
        layer.size = DEFAULT_SHAPE_SIZE;
        layer
    }

    /// Create an empty group layer
    pub fn group(name: impl Into<String>) -> Self {
        Self::base(name, LayerContent::Group { children: Vec::new() })
    }

    /// Whether this layer is a group
    pub fn is_group(&self) -> bool {
        matches!(self.content, LayerContent::Group { .. })
    }

    /// Child layers, if this layer is a group
    pub fn children(&self) -> Option<&[Layer]> {
        match &self.content {
            LayerContent::Group { children } => Some(children),
            _ => None,
        }
    }

    /// Mutable child layers, if this layer is a group
    pub fn children_mut(&mut self) -> Option<&mut Vec<Layer>> {
        match &mut self.content {
            LayerContent::Group { children } => Some(children),
            _ => None,
        }
    }

    /// Short name of the layer variant, for display and logging
    pub fn kind_name(&self) -> &'static str {
        match self.content {
            LayerContent::Image { .. } => "image",
            LayerContent::Text { .. } => "text",
            LayerContent::Shape { .. } => "shape",
            LayerContent::Group { .. } => "group",
        }
    }
}

/// Partial update for a layer's common fields.
///
/// `None` fields leave the layer unchanged. `style`, when present,
/// replaces the whole style block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerPatch {
    /// New display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec2>,
    /// New size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// New rotation in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    /// New opacity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    /// New visibility flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    /// Replacement style block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<LayerStyle>,
    /// Variant-specific update, ignored when the variant does not match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentPatch>,
}

impl LayerPatch {
    /// Patch that only moves the layer
    pub fn position(position: Vec2) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    /// Patch that only renames the layer
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Patch that only resizes the layer
    pub fn size(size: Size) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }

    /// Apply this patch to a layer, replacing only the given fields
    pub fn apply_to(&self, layer: &mut Layer) {
        if let Some(name) = &self.name {
            layer.name = name.clone();
        }
        if let Some(position) = self.position {
            layer.position = position;
        }
        if let Some(size) = self.size {
            layer.size = size;
        }
        if let Some(rotation) = self.rotation {
            layer.rotation = rotation;
        }
        if let Some(opacity) = self.opacity {
            layer.opacity = opacity;
        }
        if let Some(visible) = self.visible {
            layer.visible = visible;
        }
        if let Some(style) = &self.style {
            layer.style = style.clone();
        }
        if let Some(content) = &self.content {
            content.apply_to(&mut layer.content);
        }
    }
}

/// Partial update for a layer's variant payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentPatch {
    /// Update fields of an image layer
    Image {
        /// New source reference
        #[serde(default, skip_serializing_if = "Option::is_none")]
        src: Option<String>,
        /// New fit mode
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fit: Option<ImageFit>,
    },
    /// Update fields of a text layer
    Text {
        /// New text
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        /// New text color
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
        /// New font size
        #[serde(default, skip_serializing_if = "Option::is_none")]
        font_size: Option<f32>,
        /// New alignment
        #[serde(default, skip_serializing_if = "Option::is_none")]
        align: Option<TextAlign>,
    },
    /// Update fields of a shape layer
    Shape {
        /// New shape kind
        #[serde(default, skip_serializing_if = "Option::is_none")]
        shape: Option<ShapeKind>,
        /// New fill color
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<String>,
        /// New stroke color
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stroke: Option<String>,
        /// New stroke width
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stroke_width: Option<f32>,
        /// New corner radius
        #[serde(default, skip_serializing_if = "Option::is_none")]
        radius: Option<f32>,
    },
}

impl ContentPatch {
    /// Apply this patch if the layer's variant matches, otherwise do nothing
    pub fn apply_to(&self, content: &mut LayerContent) {
        match (self, content) {
            (ContentPatch::Image { src, fit }, LayerContent::Image { src: s, fit: f }) => {
                if let Some(src) = src {
                    *s = src.clone();
                }
                if let Some(fit) = fit {
                    *f = *fit;
                }
            }
            (
                ContentPatch::Text {
                    text,
                    color,
                    font_size,
                    align,
                },
                LayerContent::Text {
                    text: t,
                    color: c,
                    font_size: fs,
                    align: a,
                },
            ) => {
                if let Some(text) = text {
                    *t = text.clone();
                }
                if let Some(color) = color {
                    *c = color.clone();
                }
                if let Some(font_size) = font_size {
                    *fs = *font_size;
                }
                if let Some(align) = align {
                    *a = *align;
                }
            }
            (
                ContentPatch::Shape {
                    shape,
                    fill,
                    stroke,
                    stroke_width,
                    radius,
                },
                LayerContent::Shape {
                    shape: sh,
                    fill: fl,
                    stroke: st,
                    stroke_width: sw,
                    radius: r,
                },
            ) => {
                if let Some(shape) = shape {
                    *sh = *shape;
                }
                if let Some(fill) = fill {
                    *fl = fill.clone();
                }
                if let Some(stroke) = stroke {
                    *st = Some(stroke.clone());
                }
                if let Some(stroke_width) = stroke_width {
                    *sw = Some(*stroke_width);
                }
                if let Some(radius) = radius {
                    *r = Some(*radius);
                }
            }
            _ => {}
        }
    }
}
