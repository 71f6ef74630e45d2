//! Terminal output for the photoslot CLI.
//!
//! Provides consistent, colored output using the [`console`] crate.

use console::style;

use photoslot_core::naming::Slot;
use photoslot_core::placement::UnmatchedPolicy;

/// Print a bold cyan header with an underline separator.
pub fn print_header(text: &str) {
    println!("\n{}", style(text).bold().cyan());
    println!("{}", style("=".repeat(text.len())).dim());
}

/// Print a success message prefixed with green `[OK]`.
pub fn print_success(text: &str) {
    println!("{} {}", style("[OK]").green().bold(), text);
}

/// Print a warning message prefixed with yellow `[WARN]`.
pub fn print_warning(text: &str) {
    println!("{} {}", style("[WARN]").yellow().bold(), text);
}

/// Print an error message prefixed with red `[ERROR]`.
pub fn print_error(text: &str) {
    println!("{} {}", style("[ERROR]").red().bold(), text);
}

/// Print a progress step indicator like `[2/3] Placing photos...`.
pub fn print_step(step: u32, total: u32, text: &str) {
    println!("{} {}", style(format!("[{step}/{total}]")).dim(), text);
}

/// Print a key-value pair with dimmed key formatting.
pub fn print_key_value(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Print a rename or assignment like `  IMG_0042.jpg -> ammu_portrait_3`.
pub fn print_mapping(from: &str, to: &str) {
    println!("  {} {} {}", from, style("->").dim(), style(to).bold());
}

/// Print a photo with no slot. Only shown under [`UnmatchedPolicy::Report`].
pub fn print_unmatched(image: &str, slot: Slot, policy: UnmatchedPolicy) {
    if policy == UnmatchedPolicy::Report {
        print_warning(&format!("{image}: no {slot} slot left, skipped"));
    }
}
