//! Unified error types for photoslot.

use std::path::PathBuf;
use thiserror::Error;

use crate::naming::Slot;

/// All errors that can occur during photoslot operations.
#[derive(Error, Debug)]
pub enum PhotoslotError {
    // --- Run preconditions ---

    /// The template has no layer tree, or the tree contains no placeholder leaves.
    #[error("no placeholder tree provided (the template has no placeholder layers)")]
    NoTreeProvided,

    /// The batch was started with an empty image list.
    #[error("no input images provided")]
    NoInputImages,

    // --- Per-image ---

    /// An image's orientation and ordinal have no corresponding slot.
    #[error("image #{index} has no matching slot ({slot})")]
    UnmatchedImage { index: usize, slot: Slot },

    /// The host failed to place one image into its slot.
    #[error("failed to place image into '{label}': {reason}")]
    PlacementFailure { label: String, reason: String },

    /// The image header could not be read to determine its dimensions.
    #[error("cannot read image dimensions of {path}: {reason}")]
    ImageProbe { path: PathBuf, reason: String },

    /// A node path does not address a leaf in the layer tree.
    #[error("no layer at {0}")]
    LayerNotFound(String),

    // --- Configuration ---

    /// The configuration file was not found.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration or report file exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The template manifest is not valid JSON or does not describe a layer tree.
    #[error("failed to parse template manifest at {path}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A catch-all for errors from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PhotoslotError {
    /// Whether this error halts the whole run rather than a single image.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::UnmatchedImage { .. } | Self::PlacementFailure { .. } | Self::ImageProbe { .. }
        )
    }
}

/// Alias for `Result<T, PhotoslotError>`.
pub type Result<T> = std::result::Result<T, PhotoslotError>;
