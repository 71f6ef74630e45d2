use std::path::Path;

use anyhow::Result;

use photoslot_core::config::PhotoslotConfig;
use photoslot_core::error::PhotoslotError;
use photoslot_core::naming::build_name_table;
use photoslot_core::orientation::Orientation;
use photoslot_manifest::TemplateDocument;

use crate::output;
use crate::NumberingChoice;

/// Name every placeholder of a template by orientation.
///
/// Prints the old and new name of each placeholder in layer order. With an
/// output path, writes the relabelled template there.
pub fn run(
    config: &PhotoslotConfig,
    template: &Path,
    output_path: Option<&Path>,
    numbering: Option<NumberingChoice>,
) -> Result<()> {
    output::print_header("photoslot label");

    let mut document = TemplateDocument::load(template)?;
    if !document.layers.has_placeholders() {
        return Err(PhotoslotError::NoTreeProvided.into());
    }

    let numbering = numbering
        .map(|n| n.numbering())
        .unwrap_or(config.numbering);

    output::print_key_value("Template", &template.display().to_string());
    output::print_key_value("Prefix", &config.prefix);
    output::print_key_value("Numbering", numbering.as_str());

    let table = build_name_table(&document.layers, &config.prefix, numbering);
    output::print_key_value(
        "Slots",
        &format!(
            "{} landscape, {} portrait",
            table.count(Orientation::Landscape),
            table.count(Orientation::Portrait)
        ),
    );
    println!();
    for entry in table.entries() {
        output::print_mapping(&entry.original_name, &entry.label);
    }

    if let Some(path) = output_path {
        let renamed = table.apply(&mut document.layers);
        document.save(path)?;
        output::print_success(&format!(
            "Relabelled {renamed} placeholders into {}",
            path.display()
        ));
    }

    Ok(())
}
