use std::path::{Path, PathBuf};

use anyhow::Result;

use photoslot_core::config::PhotoslotConfig;
use photoslot_core::placement::{run_batch, PlacementOutcome};
use photoslot_manifest::{ManifestHost, TemplateDocument};

use crate::output;
use crate::{NumberingChoice, UnmatchedChoice};

/// Place photos into the template's slots.
///
/// Relabels every placeholder, matches photos by orientation in the order
/// given, and records each placed layer in the template. A photo that cannot
/// be placed is reported and the rest of the batch carries on.
#[allow(clippy::too_many_arguments)]
pub fn run(
    config: &PhotoslotConfig,
    template: &Path,
    images: &[PathBuf],
    from: Option<&Path>,
    output_path: Option<&Path>,
    report_path: Option<&Path>,
    numbering: Option<NumberingChoice>,
    unmatched: Option<UnmatchedChoice>,
) -> Result<()> {
    output::print_header("photoslot place");

    let mut options = config.batch_options();
    if let Some(choice) = numbering {
        options.numbering = choice.numbering();
    }
    if let Some(choice) = unmatched {
        options.unmatched = choice.policy();
    }

    output::print_step(1, 3, "Reading template and photos...");
    let document = TemplateDocument::load(template)?;
    let photos = super::gather_images(images, from, config)?;
    output::print_key_value("Template", &template.display().to_string());
    output::print_key_value("Photos", &photos.total().to_string());
    output::print_key_value("Numbering", options.numbering.as_str());

    output::print_step(2, 3, "Placing photos...");
    let mut host = ManifestHost::new(document);
    let mut report = run_batch(&mut host, &photos.images, &options)?;
    report.merge_unreadable(&photos.positions, &photos.unreadable);

    for outcome in &report.outcomes {
        match outcome {
            PlacementOutcome::Placed { image, label, .. } => output::print_mapping(image, label),
            PlacementOutcome::Unmatched { image, slot, .. } => {
                output::print_unmatched(image, *slot, options.unmatched)
            }
            PlacementOutcome::Failed {
                image,
                label,
                reason,
                ..
            } => output::print_error(&format!("{image} -> {label}: {reason}")),
            PlacementOutcome::Unreadable { image, reason, .. } => {
                output::print_error(&format!("{image}: unreadable ({reason})"))
            }
        }
    }

    output::print_step(3, 3, "Saving template...");
    let destination = output_path.unwrap_or(template);
    host.into_document().save(destination)?;
    if let Some(path) = report_path {
        photoslot_core::report::save(&report, path)?;
        output::print_key_value("Report", &path.display().to_string());
    }

    output::print_success(&format!(
        "{} placed, {} without a slot, {} failed",
        report.placed(),
        report.unmatched(),
        report.failed()
    ));
    output::print_key_value("Template", &destination.display().to_string());

    Ok(())
}
