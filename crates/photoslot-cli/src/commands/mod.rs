//! CLI command implementations for photoslot.
//!
//! Each module corresponds to a subcommand (`photoslot <command>`).

pub mod label;
pub mod matching;
pub mod place;
pub mod sort;

use std::path::{Path, PathBuf};

use anyhow::Result;
use dialoguer::Input;

use photoslot_core::config::PhotoslotConfig;
use photoslot_core::error::PhotoslotError;
use photoslot_core::probe::{collect_images, probe_all, ProbedImages};

/// Resolve and probe the photos to work on.
///
/// Explicit paths come first, then every supported file in `from`. With
/// neither given on an interactive terminal, asks for a folder. Unreadable
/// photos are returned alongside the readable ones, with their positions.
pub fn gather_images(
    images: &[PathBuf],
    from: Option<&Path>,
    config: &PhotoslotConfig,
) -> Result<ProbedImages> {
    let mut paths = images.to_vec();

    let folder = match from {
        Some(dir) => Some(dir.to_path_buf()),
        None if paths.is_empty() && console::user_attended() => {
            let answer: String = Input::new()
                .with_prompt("Folder with photos to place")
                .allow_empty(true)
                .interact_text()?;
            (!answer.trim().is_empty()).then(|| PathBuf::from(answer.trim()))
        }
        None => None,
    };
    if let Some(dir) = folder {
        paths.extend(collect_images(&dir, &config.image_extensions)?);
    }

    let probed = probe_all(&paths);
    if probed.images.is_empty() {
        return Err(PhotoslotError::NoInputImages.into());
    }
    if !probed.unreadable.is_empty() {
        crate::output::print_warning(&format!(
            "{} of {} photos could not be read",
            probed.unreadable.len(),
            probed.total()
        ));
    }
    Ok(probed)
}
