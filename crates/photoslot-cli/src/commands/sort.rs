use std::path::Path;

use anyhow::Result;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};

use photoslot_core::config::PhotoslotConfig;
use photoslot_core::report::format_sort;
use photoslot_core::sorter::{self, SortAction};

use crate::output;

/// Move photos into `Vertical/` and `Horizontal/` subfolders of `dir`.
///
/// Photos are renamed `Vertical_<n>` / `Horizontal_<n>` in file name order.
/// Asks before touching anything unless `yes` or `dry_run` is set.
pub fn run(config: &PhotoslotConfig, dir: &Path, dry_run: bool, yes: bool) -> Result<()> {
    output::print_header("photoslot sort");

    let options = config.sort_options(dry_run);
    let files = sorter::scan(dir, &options)?;

    output::print_key_value("Folder", &dir.display().to_string());
    output::print_key_value("Photos", &files.len().to_string());
    if dry_run {
        output::print_key_value("Mode", "dry run");
    }

    if !dry_run && !yes {
        let proceed = Confirm::new()
            .with_prompt(format!(
                "Move {} photos into Vertical/ and Horizontal/?",
                files.len()
            ))
            .default(true)
            .interact()?;
        if !proceed {
            output::print_warning("Cancelled, nothing was moved");
            return Ok(());
        }
    }

    let bar = ProgressBar::new(files.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {wide_msg}")?
            .progress_chars("=> "),
    );

    let report = sorter::sort_files(dir, &files, &options, |action| {
        if let SortAction::Failed { from, reason } = action {
            bar.println(format!("error with {}: {reason}", from.display()));
        }
        bar.set_message(action.source().display().to_string());
        bar.inc(1);
    })?;
    bar.finish_and_clear();

    println!("{}", format_sort(&report));
    if report.failed() > 0 {
        output::print_warning(&format!("{} files could not be sorted", report.failed()));
    }
    output::print_success("Sorting complete");

    Ok(())
}
