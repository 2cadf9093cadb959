// SPDX-License-Identifier: MIT OR Apache-2.0
//! Project metadata: identity and canvas settings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default canvas background color
pub const DEFAULT_BACKGROUND: &str = "#e5e7eb";

/// Unique identifier for a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub Uuid);

impl ProjectId {
    /// Create a new random project ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

fn default_background() -> String {
    DEFAULT_BACKGROUND.to_string()
}

/// Project-level metadata: identity and canvas settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMeta {
    /// Project identity used as the persistence key
    pub id: ProjectId,
    /// Project display name
    pub name: String,
    /// Canvas width in canvas units
    pub width: f32,
    /// Canvas height in canvas units
    pub height: f32,
    /// Canvas background color (CSS color string)
    #[serde(default = "default_background")]
    pub background: String,
}

impl ProjectMeta {
    /// Create metadata for a new project with the default background
    pub fn new(name: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            width,
            height,
            background: default_background(),
        }
    }
}
