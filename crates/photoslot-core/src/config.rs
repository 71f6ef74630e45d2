//! `photoslot.config.json` loading and saving.
//!
//! Every field has a default, so a partial file (or none at all) is valid.
//!
//! ```json
//! {
//!   "prefix": "ammu",
//!   "numbering": "ascending",
//!   "unmatched": "report",
//!   "image_extensions": ["jpg", "jpeg", "png"],
//!   "sort": { "extensions": ["jpg", "jpeg", "png", "tif", "tiff", "bmp"] }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PhotoslotError, Result};
use crate::naming::Numbering;
use crate::placement::{BatchOptions, UnmatchedPolicy};
use crate::probe::default_extensions;
use crate::sorter::SortOptions;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "photoslot.config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoslotConfig {
    /// Label prefix: slots are named `<prefix>_<orientation>_<ordinal>`.
    pub prefix: String,
    pub numbering: Numbering,
    pub unmatched: UnmatchedPolicy,
    /// Extensions picked up when placing photos from a folder.
    pub image_extensions: Vec<String>,
    pub sort: SortConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    pub extensions: Vec<String>,
}

impl Default for PhotoslotConfig {
    fn default() -> Self {
        Self {
            prefix: "ammu".into(),
            numbering: Numbering::Ascending,
            unmatched: UnmatchedPolicy::Report,
            image_extensions: vec!["jpg".into(), "jpeg".into(), "png".into()],
            sort: SortConfig::default(),
        }
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

impl PhotoslotConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| PhotoslotError::ConfigNotFound {
                path: path.to_path_buf(),
                source: e,
            })?;
        serde_json::from_str(&contents).map_err(|e| PhotoslotError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| PhotoslotError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            prefix: self.prefix.clone(),
            numbering: self.numbering,
            unmatched: self.unmatched,
        }
    }

    pub fn sort_options(&self, dry_run: bool) -> SortOptions {
        SortOptions {
            extensions: self.sort.extensions.clone(),
            dry_run,
        }
    }
}
