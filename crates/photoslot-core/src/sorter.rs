//! Sorting a folder of photos into `Vertical/` and `Horizontal/`.
//!
//! Each photo is moved to `<dir>/<Bucket>/<Bucket>_<n>.<ext>`, where `n`
//! counts moves into that bucket starting at 1 and `ext` is the original
//! extension. Existing files are never overwritten: the photo is skipped and
//! the counter stays where it was.
//!
//! Squares go to `Horizontal`. Only strictly taller-than-wide photos are
//! vertical here, unlike slot matching where squares count as portrait.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::{PhotoslotError, Result};
use crate::probe::{collect_images, default_extensions, probe_image};

/// Destination folder for a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortBucket {
    Vertical,
    Horizontal,
}

impl SortBucket {
    pub fn classify(width: u32, height: u32) -> Self {
        if width < height {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }

    /// Folder name, also used as the file name prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vertical => "Vertical",
            Self::Horizontal => "Horizontal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOptions {
    pub extensions: Vec<String>,
    /// Plan only; leave the filesystem untouched.
    pub dry_run: bool,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            dry_run: false,
        }
    }
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SortAction {
    Moved {
        from: PathBuf,
        to: PathBuf,
        bucket: SortBucket,
    },
    /// Destination already existed.
    Skipped { from: PathBuf, to: PathBuf },
    Failed { from: PathBuf, reason: String },
}

impl SortAction {
    pub fn source(&self) -> &Path {
        match self {
            Self::Moved { from, .. } | Self::Skipped { from, .. } | Self::Failed { from, .. } => from,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SortReport {
    pub total: usize,
    pub actions: Vec<SortAction>,
    pub elapsed: Duration,
    pub dry_run: bool,
}

impl SortReport {
    pub fn moved(&self) -> usize {
        self.count(|a| matches!(a, SortAction::Moved { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|a| matches!(a, SortAction::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|a| matches!(a, SortAction::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&SortAction) -> bool) -> usize {
        self.actions.iter().filter(|a| pred(a)).count()
    }
}

/// Supported image files in `dir`, in processing order.
pub fn scan(dir: &Path, options: &SortOptions) -> Result<Vec<PathBuf>> {
    let files = collect_images(dir, &options.extensions)?;
    if files.is_empty() {
        return Err(PhotoslotError::NoInputImages);
    }
    Ok(files)
}

/// Sort `files` (normally from [`scan`]) into bucket folders under `dir`.
///
/// `on_action` is called after every file, in order.
pub fn sort_files(
    dir: &Path,
    files: &[PathBuf],
    options: &SortOptions,
    mut on_action: impl FnMut(&SortAction),
) -> Result<SortReport> {
    let started = Instant::now();

    if !options.dry_run {
        for bucket in [SortBucket::Vertical, SortBucket::Horizontal] {
            std::fs::create_dir_all(dir.join(bucket.as_str()))?;
        }
    }

    let mut vertical = 1u32;
    let mut horizontal = 1u32;
    let mut actions = Vec::with_capacity(files.len());

    for file in files {
        let action = match probe_image(file) {
            Ok(info) => {
                let bucket = SortBucket::classify(info.width, info.height);
                let counter = match bucket {
                    SortBucket::Vertical => &mut vertical,
                    SortBucket::Horizontal => &mut horizontal,
                };
                let to = destination(dir, bucket, *counter, file);

                if to.exists() {
                    tracing::info!("skipping (already exists): {}", to.display());
                    SortAction::Skipped {
                        from: file.clone(),
                        to,
                    }
                } else {
                    let moved = if options.dry_run {
                        Ok(())
                    } else {
                        move_file(file, &to)
                    };
                    match moved {
                        Ok(()) => {
                            *counter += 1;
                            tracing::info!("moved: {} -> {}", file.display(), to.display());
                            SortAction::Moved {
                                from: file.clone(),
                                to,
                                bucket,
                            }
                        }
                        Err(e) => SortAction::Failed {
                            from: file.clone(),
                            reason: e.to_string(),
                        },
                    }
                }
            }
            Err(e) => SortAction::Failed {
                from: file.clone(),
                reason: e.to_string(),
            },
        };

        if let SortAction::Failed { from, reason } = &action {
            tracing::info!("error with file {}: {reason}", from.display());
        }
        on_action(&action);
        actions.push(action);
    }

    Ok(SortReport {
        total: files.len(),
        actions,
        elapsed: started.elapsed(),
        dry_run: options.dry_run,
    })
}

/// [`scan`] then [`sort_files`].
pub fn sort_directory(dir: &Path, options: &SortOptions) -> Result<SortReport> {
    let files = scan(dir, options)?;
    sort_files(dir, &files, options, |_| {})
}

fn destination(dir: &Path, bucket: SortBucket, n: u32, source: &Path) -> PathBuf {
    let name = match source.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{n}.{ext}", bucket.as_str()),
        None => format!("{}_{n}", bucket.as_str()),
    };
    dir.join(bucket.as_str()).join(name)
}

/// Rename, falling back to copy + remove across filesystems.
fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }
    std::fs::copy(from, to)?;
    std::fs::remove_file(from)
}
