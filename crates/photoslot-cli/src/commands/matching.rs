use std::path::{Path, PathBuf};

use anyhow::Result;

use photoslot_core::config::PhotoslotConfig;
use photoslot_core::error::PhotoslotError;
use photoslot_core::matcher::{match_images, MatchOutcome};
use photoslot_core::naming::build_name_table;
use photoslot_manifest::TemplateDocument;

use crate::output;
use crate::NumberingChoice;

/// Show which slot each photo would be placed into.
///
/// Nothing is written. Photos without a slot are listed according to the
/// configured unmatched policy.
pub fn run(
    config: &PhotoslotConfig,
    template: &Path,
    images: &[PathBuf],
    from: Option<&Path>,
    numbering: Option<NumberingChoice>,
) -> Result<()> {
    output::print_header("photoslot match");

    let document = TemplateDocument::load(template)?;
    if !document.layers.has_placeholders() {
        return Err(PhotoslotError::NoTreeProvided.into());
    }
    let photos = super::gather_images(images, from, config)?;
    let numbering = numbering
        .map(|n| n.numbering())
        .unwrap_or(config.numbering);
    let table = build_name_table(&document.layers, &config.prefix, numbering);

    output::print_key_value("Template", &template.display().to_string());
    output::print_key_value("Slots", &table.len().to_string());
    output::print_key_value("Numbering", numbering.as_str());
    output::print_key_value("Photos", &photos.total().to_string());
    println!();

    let mut matched = 0;
    for outcome in match_images(&photos.images, &table) {
        match outcome {
            MatchOutcome::Matched(assignment) => {
                matched += 1;
                output::print_mapping(
                    &assignment.image.path.display().to_string(),
                    assignment.label(),
                );
            }
            MatchOutcome::Unmatched { image, slot, .. } => {
                output::print_unmatched(&image.path.display().to_string(), slot, config.unmatched);
            }
        }
    }

    println!();
    output::print_success(&format!("{matched} of {} photos have a slot", photos.total()));
    Ok(())
}
