//! Template manifest file format.
//!
//! ```json
//! {
//!   "name": "wedding-spread-04",
//!   "width": 3600,
//!   "height": 1200,
//!   "layers": [
//!     { "kind": "composite", "name": "left page", "children": [
//!       { "kind": "leaf", "name": "Photo 1", "bounds": [120, 120, 1680, 1080] }
//!     ]},
//!     { "kind": "leaf", "name": "Background", "bounds": [0, 0, 3600, 1200], "placeholder": false }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use photoslot_core::bounds::Bounds;
use photoslot_core::error::{PhotoslotError, Result};
use photoslot_core::tree::LayerTree;

/// A template document: canvas size plus its layer tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDocument {
    #[serde(default)]
    pub name: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub layers: LayerTree,
}

impl TemplateDocument {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| PhotoslotError::ManifestParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| PhotoslotError::ManifestParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// The whole canvas.
    pub fn canvas(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.width, self.height)
    }
}
