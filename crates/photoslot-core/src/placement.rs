//! Placing matched images into their slots.
//!
//! The actual paste, resize, move and clip are done by a [`PlacementHost`].
//! This module computes the cover-fit geometry, drives the batch, and turns
//! every per-image problem into a [`PlacementOutcome`] instead of aborting.

use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::error::{PhotoslotError, Result};
use crate::matcher::{match_images, MatchOutcome};
use crate::naming::{build_name_table, NameEntry, Numbering, Slot};
use crate::orientation::Oriented;
use crate::probe::{display_name, ProbeFailure};
use crate::tree::{LayerTree, NodePath};

/// Name given to the layer pasted into slot `label`.
pub fn pasted_layer_name(label: &str) -> String {
    format!("Pasted_{label}")
}

/// How a pasted layer is scaled and moved to cover its slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementPlan {
    /// Uniform scale about the pasted layer's centre, in percent.
    pub scale_percent: f64,
    pub dx: f64,
    pub dy: f64,
    /// Bounds of the pasted layer after scaling and translation.
    pub bounds: Bounds,
}

/// Cover-fit `pasted` onto `target`.
///
/// The scale is the larger of the two axis ratios, so the result covers the
/// slot on both axes and the overflow is hidden by the clipping mask. The
/// scaled layer is then centred on the slot.
pub fn plan_placement(target: &Bounds, pasted: &Bounds) -> Result<PlacementPlan> {
    if pasted.is_degenerate() {
        return Err(PhotoslotError::PlacementFailure {
            label: String::new(),
            reason: format!("pasted layer has no area ({}x{})", pasted.width(), pasted.height()),
        });
    }

    let scale = f64::max(
        target.width() / pasted.width(),
        target.height() / pasted.height(),
    );
    let scaled = pasted.scaled_about_center(scale);
    let (tx, ty) = target.center();
    let (sx, sy) = scaled.center();
    let (dx, dy) = (tx - sx, ty - sy);

    Ok(PlacementPlan {
        scale_percent: scale * 100.0,
        dx,
        dy,
        bounds: scaled.translated(dx, dy),
    })
}

/// What to do with images that have no slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnmatchedPolicy {
    /// List every unmatched image.
    #[default]
    Report,
    /// Skip quietly.
    SilentSkip,
}

impl UnmatchedPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::SilentSkip => "silent-skip",
        }
    }
}

/// The image-editing application seen from the batch driver.
pub trait PlacementHost {
    type Image: Oriented;

    /// The template's layer tree, or `None` if there is no template.
    fn placeholder_tree(&self) -> Option<LayerTree>;

    /// Rename the placeholder at `path` to its computed label.
    fn rename_placeholder(&mut self, path: &NodePath, label: &str) -> Result<()>;

    /// Paste `image` into the slot described by `entry`, scale it to cover
    /// the slot, and clip it.
    fn place(&mut self, image: &Self::Image, entry: &NameEntry) -> Result<()>;

    /// Called once per image after its placement attempt (e.g. to close the
    /// photo document).
    fn finish(&mut self, _image: &Self::Image) {}

    /// Short description of an image for logs and reports.
    fn describe(&self, _image: &Self::Image) -> String {
        String::new()
    }
}

/// Options for [`run_batch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    pub prefix: String,
    pub numbering: Numbering,
    pub unmatched: UnmatchedPolicy,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            prefix: "ammu".into(),
            numbering: Numbering::Ascending,
            unmatched: UnmatchedPolicy::Report,
        }
    }
}

/// Result for one input image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlacementOutcome {
    Placed {
        index: usize,
        image: String,
        label: String,
    },
    Unmatched {
        index: usize,
        image: String,
        slot: Slot,
    },
    Failed {
        index: usize,
        image: String,
        label: String,
        reason: String,
    },
    /// The image header could not be read, so the image was never matched.
    Unreadable {
        index: usize,
        image: String,
        reason: String,
    },
}

impl PlacementOutcome {
    /// Position of the image in the input sequence.
    pub fn index(&self) -> usize {
        match self {
            Self::Placed { index, .. }
            | Self::Unmatched { index, .. }
            | Self::Failed { index, .. }
            | Self::Unreadable { index, .. } => *index,
        }
    }

    fn index_mut(&mut self) -> &mut usize {
        match self {
            Self::Placed { index, .. }
            | Self::Unmatched { index, .. }
            | Self::Failed { index, .. }
            | Self::Unreadable { index, .. } => index,
        }
    }
}

/// Everything that happened in one batch, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Placeholders relabelled before matching.
    pub labelled: usize,
    pub outcomes: Vec<PlacementOutcome>,
}

impl BatchReport {
    pub fn placed(&self) -> usize {
        self.count(|o| matches!(o, PlacementOutcome::Placed { .. }))
    }

    pub fn unmatched(&self) -> usize {
        self.count(|o| matches!(o, PlacementOutcome::Unmatched { .. }))
    }

    /// Failed placements plus unreadable images.
    pub fn failed(&self) -> usize {
        self.count(|o| {
            matches!(
                o,
                PlacementOutcome::Failed { .. } | PlacementOutcome::Unreadable { .. }
            )
        })
    }

    /// Re-index a report built over a filtered image list.
    ///
    /// `positions[i]` is the input position of the `i`-th batch image. Every
    /// file in `unreadable` gets an [`PlacementOutcome::Unreadable`] entry, and
    /// the outcomes end up sorted by input position.
    pub fn merge_unreadable(&mut self, positions: &[usize], unreadable: &[ProbeFailure]) {
        for outcome in &mut self.outcomes {
            let index = outcome.index_mut();
            if let Some(&position) = positions.get(*index) {
                *index = position;
            }
        }
        self.outcomes
            .extend(unreadable.iter().map(|failure| PlacementOutcome::Unreadable {
                index: failure.index,
                image: display_name(&failure.path),
                reason: failure.reason.clone(),
            }));
        self.outcomes.sort_by_key(PlacementOutcome::index);
    }

    fn count(&self, pred: impl Fn(&PlacementOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

/// Relabel the host's placeholders and place every image.
///
/// Fails only when there is nothing to do (no placeholders, no images) or
/// when relabelling fails. Per-image failures end up in the report.
pub fn run_batch<H: PlacementHost>(
    host: &mut H,
    images: &[H::Image],
    options: &BatchOptions,
) -> Result<BatchReport> {
    let tree = match host.placeholder_tree() {
        Some(tree) if tree.has_placeholders() => tree,
        _ => return Err(PhotoslotError::NoTreeProvided),
    };
    if images.is_empty() {
        return Err(PhotoslotError::NoInputImages);
    }

    let table = build_name_table(&tree, &options.prefix, options.numbering);
    for entry in table.entries() {
        host.rename_placeholder(&entry.path, &entry.label)?;
    }
    tracing::info!("relabelled {} placeholders", table.len());

    let mut report = BatchReport {
        labelled: table.len(),
        outcomes: Vec::with_capacity(images.len()),
    };

    let mut matches = match_images(images.iter(), &table);
    while let Some(outcome) = matches.next() {
        match outcome {
            MatchOutcome::Matched(assignment) => {
                let image = host.describe(assignment.image);
                let label = assignment.label().to_string();
                match host.place(assignment.image, assignment.entry) {
                    Ok(()) => {
                        tracing::info!("placed #{} {image} into {label}", assignment.index);
                        report.outcomes.push(PlacementOutcome::Placed {
                            index: assignment.index,
                            image,
                            label,
                        });
                    }
                    Err(e) => {
                        tracing::info!("#{} {image}: {e}", assignment.index);
                        matches.release(assignment.slot());
                        report.outcomes.push(PlacementOutcome::Failed {
                            index: assignment.index,
                            image,
                            label,
                            reason: e.to_string(),
                        });
                    }
                }
                host.finish(assignment.image);
            }
            MatchOutcome::Unmatched { index, image, slot } => {
                let err = PhotoslotError::UnmatchedImage { index, slot };
                match options.unmatched {
                    UnmatchedPolicy::Report => tracing::info!("{err}, skipping"),
                    UnmatchedPolicy::SilentSkip => tracing::debug!("{err}, skipping"),
                }
                report.outcomes.push(PlacementOutcome::Unmatched {
                    index,
                    image: host.describe(image),
                    slot,
                });
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::Orientation;
    use crate::tree::Node;

    #[test]
    fn test_plan_covers_and_centres() {
        let target = Bounds::new(100.0, 100.0, 500.0, 300.0);
        let pasted = Bounds::centered(1000.0, 1000.0, 800.0, 600.0);
        let plan = plan_placement(&target, &pasted).unwrap();

        // Width ratio 0.5 beats height ratio 1/3.
        assert_eq!(plan.scale_percent, 50.0);
        assert!(plan.bounds.covers(&target));
        assert_eq!(plan.bounds.center(), (300.0, 200.0));
        assert_eq!(plan.bounds.width(), 400.0);
        assert_eq!(plan.bounds.height(), 300.0);
        assert_eq!((plan.dx, plan.dy), (-700.0, -800.0));
    }

    #[test]
    fn test_plan_upscales_small_photo() {
        let target = Bounds::new(0.0, 0.0, 200.0, 400.0);
        let pasted = Bounds::new(0.0, 0.0, 50.0, 50.0);
        let plan = plan_placement(&target, &pasted).unwrap();
        assert_eq!(plan.scale_percent, 800.0);
        assert!(plan.bounds.covers(&target));
    }

    #[test]
    fn test_plan_rejects_empty_layer() {
        let target = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let pasted = Bounds::new(5.0, 5.0, 5.0, 9.0);
        assert!(matches!(
            plan_placement(&target, &pasted),
            Err(PhotoslotError::PlacementFailure { .. })
        ));
    }

    type Img = (&'static str, (u32, u32));

    /// Records calls; fails placement for images listed in `fail`.
    struct FakeHost {
        tree: Option<LayerTree>,
        renamed: Vec<String>,
        placed: Vec<(String, String)>,
        finished: usize,
        fail: Vec<&'static str>,
    }

    impl FakeHost {
        fn new(tree: Option<LayerTree>) -> Self {
            Self {
                tree,
                renamed: vec![],
                placed: vec![],
                finished: 0,
                fail: vec![],
            }
        }
    }

    impl PlacementHost for FakeHost {
        type Image = Img;

        fn placeholder_tree(&self) -> Option<LayerTree> {
            self.tree.clone()
        }

        fn rename_placeholder(&mut self, _path: &NodePath, label: &str) -> Result<()> {
            self.renamed.push(label.to_string());
            Ok(())
        }

        fn place(&mut self, image: &Self::Image, entry: &NameEntry) -> Result<()> {
            if self.fail.contains(&image.0) {
                return Err(PhotoslotError::PlacementFailure {
                    label: entry.label.clone(),
                    reason: "paste failed".into(),
                });
            }
            self.placed.push((image.0.to_string(), entry.label.clone()));
            Ok(())
        }

        fn finish(&mut self, _image: &Self::Image) {
            self.finished += 1;
        }

        fn describe(&self, image: &Self::Image) -> String {
            image.0.to_string()
        }
    }

    impl Oriented for Img {
        fn orientation(&self) -> Orientation {
            self.1.orientation()
        }
    }

    fn two_slot_tree() -> LayerTree {
        LayerTree::new(vec![Node::group(
            "spread",
            vec![
                Node::placeholder("left", Bounds::new(0.0, 0.0, 400.0, 300.0)),
                Node::placeholder("right", Bounds::new(0.0, 0.0, 300.0, 400.0)),
            ],
        )])
    }

    #[test]
    fn test_batch_places_and_reports_unmatched() {
        let mut host = FakeHost::new(Some(two_slot_tree()));
        let images: [Img; 3] = [("a", (6, 4)), ("b", (4, 6)), ("c", (6, 4))];
        let report = run_batch(&mut host, &images, &BatchOptions::default()).unwrap();

        assert_eq!(host.renamed, vec!["ammu_landscape_1", "ammu_portrait_1"]);
        assert_eq!(
            host.placed,
            vec![
                ("a".to_string(), "ammu_landscape_1".to_string()),
                ("b".to_string(), "ammu_portrait_1".to_string()),
            ]
        );
        assert_eq!(report.labelled, 2);
        assert_eq!((report.placed(), report.unmatched(), report.failed()), (2, 1, 0));
        assert_eq!(host.finished, 2);
        let indices: Vec<usize> = report.outcomes.iter().map(|o| o.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_failed_placement_does_not_abort_and_frees_slot() {
        let mut host = FakeHost::new(Some(two_slot_tree()));
        host.fail = vec!["a"];
        let images: [Img; 2] = [("a", (6, 4)), ("b", (6, 4))];
        let report = run_batch(&mut host, &images, &BatchOptions::default()).unwrap();

        assert!(matches!(&report.outcomes[0], PlacementOutcome::Failed { label, .. } if label == "ammu_landscape_1"));
        assert_eq!(host.placed, vec![("b".to_string(), "ammu_landscape_1".to_string())]);
        assert_eq!(host.finished, 2);
    }

    #[test]
    fn test_missing_tree_is_fatal() {
        let images: [Img; 1] = [("a", (6, 4))];
        let mut no_doc = FakeHost::new(None);
        assert!(matches!(
            run_batch(&mut no_doc, &images, &BatchOptions::default()),
            Err(PhotoslotError::NoTreeProvided)
        ));

        let mut no_slots = FakeHost::new(Some(LayerTree::new(vec![Node::group("g", vec![])])));
        let err = run_batch(&mut no_slots, &images, &BatchOptions::default()).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_no_images_is_fatal() {
        let mut host = FakeHost::new(Some(two_slot_tree()));
        assert!(matches!(
            run_batch(&mut host, &[], &BatchOptions::default()),
            Err(PhotoslotError::NoInputImages)
        ));
        assert!(host.renamed.is_empty());
    }

    #[test]
    fn test_silent_skip_still_records_outcome() {
        let mut host = FakeHost::new(Some(two_slot_tree()));
        let options = BatchOptions {
            unmatched: UnmatchedPolicy::SilentSkip,
            ..BatchOptions::default()
        };
        let images: [Img; 2] = [("a", (4, 6)), ("b", (4, 6))];
        let report = run_batch(&mut host, &images, &options).unwrap();
        assert_eq!(report.unmatched(), 1);
    }

    /// Collects formatted log output.
    #[derive(Clone, Default)]
    struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_per_image_problems_stay_below_warn() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .finish();

        let mut host = FakeHost::new(Some(two_slot_tree()));
        host.fail = vec!["a"];
        let images: [Img; 3] = [("a", (6, 4)), ("b", (4, 6)), ("c", (4, 6))];
        let report = tracing::subscriber::with_default(subscriber, || {
            run_batch(&mut host, &images, &BatchOptions::default()).unwrap()
        });

        assert_eq!((report.placed(), report.unmatched(), report.failed()), (1, 1, 1));
        assert!(logs.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unreadable_images_keep_input_positions() {
        // Input: [broken, b, unreadable, c]; only b and c reached the batch.
        let mut host = FakeHost::new(Some(two_slot_tree()));
        let images: [Img; 2] = [("b", (6, 4)), ("c", (4, 6))];
        let mut report = run_batch(&mut host, &images, &BatchOptions::default()).unwrap();
        let unreadable = vec![
            ProbeFailure {
                index: 0,
                path: "photos/broken.jpg".into(),
                reason: "bad header".into(),
            },
            ProbeFailure {
                index: 2,
                path: "photos/truncated.png".into(),
                reason: "eof".into(),
            },
        ];
        report.merge_unreadable(&[1, 3], &unreadable);

        let indices: Vec<usize> = report.outcomes.iter().map(|o| o.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert!(matches!(
            &report.outcomes[0],
            PlacementOutcome::Unreadable { image, reason, .. } if image == "broken.jpg" && reason == "bad header"
        ));
        assert!(matches!(
            &report.outcomes[1],
            PlacementOutcome::Placed { image, .. } if image == "b"
        ));
        assert!(matches!(
            &report.outcomes[3],
            PlacementOutcome::Placed { image, .. } if image == "c"
        ));
        assert_eq!((report.placed(), report.unmatched(), report.failed()), (2, 0, 2));
    }
}
