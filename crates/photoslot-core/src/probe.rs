//! Reading image dimensions from disk.
//!
//! Only the file header is decoded; pixels are never loaded.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PhotoslotError, Result};
use crate::orientation::{classify_orientation, Orientation, Oriented};

/// Extensions accepted when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tif", "tiff", "bmp"];

/// An input photo and its pixel size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl Oriented for ImageInfo {
    fn orientation(&self) -> Orientation {
        classify_orientation(self.width, self.height)
    }
}

/// Read the pixel dimensions of the image at `path`.
pub fn probe_image(path: &Path) -> Result<ImageInfo> {
    let (width, height) =
        image::image_dimensions(path).map_err(|e| PhotoslotError::ImageProbe {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(ImageInfo {
        path: path.to_path_buf(),
        width,
        height,
    })
}

/// Whether `path` has one of `extensions` (case-insensitive).
pub fn is_supported(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Supported image files directly inside `dir`, sorted by file name.
///
/// Subdirectories are not descended into.
pub fn collect_images(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() && is_supported(&path, extensions) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// A file name for reports and logs, or the whole path if there is none.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// A photo whose header could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeFailure {
    /// Position in the probed path list.
    pub index: usize,
    pub path: PathBuf,
    pub reason: String,
}

/// Result of probing a list of paths.
///
/// `images[i]` came from input position `positions[i]`, so outcomes computed
/// over `images` can be mapped back to the caller's order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbedImages {
    pub images: Vec<ImageInfo>,
    pub positions: Vec<usize>,
    pub unreadable: Vec<ProbeFailure>,
}

impl ProbedImages {
    /// Number of paths that were probed.
    pub fn total(&self) -> usize {
        self.images.len() + self.unreadable.len()
    }
}

/// Probe every path.
///
/// Unreadable files are logged and kept aside; they never abort the batch.
pub fn probe_all(paths: &[PathBuf]) -> ProbedImages {
    let mut probed = ProbedImages::default();
    for (index, path) in paths.iter().enumerate() {
        match probe_image(path) {
            Ok(info) => {
                probed.images.push(info);
                probed.positions.push(index);
            }
            Err(e) => {
                tracing::info!("{e}");
                let reason = match e {
                    PhotoslotError::ImageProbe { reason, .. } => reason,
                    other => other.to_string(),
                };
                probed.unreadable.push(ProbeFailure {
                    index,
                    path: path.clone(),
                    reason,
                });
            }
        }
    }
    probed
}

/// [`DEFAULT_EXTENSIONS`] as owned strings.
pub fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(path: &Path, width: u32, height: u32) {
        image::RgbImage::new(width, height).save(path).unwrap();
    }

    #[test]
    fn test_probe_reads_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        write_png(&path, 8, 3);

        let info = probe_image(&path).unwrap();
        assert_eq!((info.width, info.height), (8, 3));
        assert_eq!(info.orientation(), Orientation::Landscape);
    }

    #[test]
    fn test_probe_garbage_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"not an image").unwrap();

        let err = probe_image(&path).unwrap_err();
        assert!(matches!(err, PhotoslotError::ImageProbe { .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_is_supported_case_insensitive() {
        let exts = default_extensions();
        assert!(is_supported(Path::new("a/IMG_001.JPG"), &exts));
        assert!(is_supported(Path::new("b.tiff"), &exts));
        assert!(!is_supported(Path::new("notes.txt"), &exts));
        assert!(!is_supported(Path::new("no_extension"), &exts));
    }

    #[test]
    fn test_collect_images_sorted_and_flat() {
        let dir = tempfile::tempdir().unwrap();
        write_png(&dir.path().join("b.png"), 2, 2);
        write_png(&dir.path().join("a.png"), 2, 2);
        std::fs::write(dir.path().join("readme.md"), "x").unwrap();
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let files = collect_images(dir.path(), &default_extensions()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_probe_all_keeps_input_positions() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.png");
        let bad = dir.path().join("bad.png");
        write_png(&good, 3, 9);
        std::fs::write(&bad, b"nope").unwrap();

        let probed = probe_all(&[bad.clone(), good.clone()]);
        assert_eq!(probed.total(), 2);
        assert_eq!(probed.images.len(), 1);
        assert_eq!(probed.images[0].path, good);
        assert_eq!(probed.positions, vec![1]);
        assert_eq!(probed.unreadable.len(), 1);
        assert_eq!(probed.unreadable[0].index, 0);
        assert_eq!(probed.unreadable[0].path, bad);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("photos/IMG_1.jpg")), "IMG_1.jpg");
        assert_eq!(display_name(Path::new("/")), "/");
    }
}
