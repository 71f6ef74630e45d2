//! photoslot CLI: fill album templates with photos by orientation.
//!
//! Provides four commands:
//! `label`, `match`, `place`, and `sort`.
//!
//! Template handling goes through the [`photoslot_core::placement::PlacementHost`]
//! trait; the CLI uses the JSON manifest host from `photoslot-manifest`.

mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use photoslot_core::naming::Numbering;
use photoslot_core::placement::UnmatchedPolicy;

#[derive(Parser)]
#[command(
    name = "photoslot",
    about = "Place photos into orientation-named template slots, or sort photos by orientation",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to photoslot.config.json (defaults apply if it does not exist)
    #[arg(long, global = true, default_value = photoslot_core::config::CONFIG_FILE)]
    config: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Name every placeholder of a template by orientation
    Label {
        /// Template manifest (JSON)
        #[arg(long, short)]
        template: PathBuf,

        /// Write the relabelled template here
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Override the slot numbering direction
        #[arg(long, value_enum)]
        numbering: Option<NumberingChoice>,
    },

    /// Show which slot each photo would go into, without placing anything
    Match {
        /// Template manifest (JSON)
        #[arg(long, short)]
        template: PathBuf,

        /// Photos, in placement order
        images: Vec<PathBuf>,

        /// Take every supported photo from this folder (sorted by name)
        #[arg(long)]
        from: Option<PathBuf>,

        /// Override the slot numbering direction
        #[arg(long, value_enum)]
        numbering: Option<NumberingChoice>,
    },

    /// Place photos into the template's slots
    Place {
        /// Template manifest (JSON)
        #[arg(long, short)]
        template: PathBuf,

        /// Photos, in placement order
        images: Vec<PathBuf>,

        /// Take every supported photo from this folder (sorted by name)
        #[arg(long)]
        from: Option<PathBuf>,

        /// Where to write the filled template (default: overwrite --template)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Also write a JSON report of every placement
        #[arg(long)]
        report: Option<PathBuf>,

        /// Override the slot numbering direction
        #[arg(long, value_enum)]
        numbering: Option<NumberingChoice>,

        /// Override what happens to photos without a slot
        #[arg(long, value_enum)]
        unmatched: Option<UnmatchedChoice>,
    },

    /// Move photos into Vertical/ and Horizontal/ subfolders
    Sort {
        /// Folder containing the photos
        dir: PathBuf,

        /// Only show what would be moved
        #[arg(long)]
        dry_run: bool,

        /// Do not ask for confirmation
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(ValueEnum, Clone, Debug)]
pub enum NumberingChoice {
    Ascending,
    Descending,
}

impl NumberingChoice {
    pub fn numbering(&self) -> Numbering {
        match self {
            Self::Ascending => Numbering::Ascending,
            Self::Descending => Numbering::Descending,
        }
    }
}

#[derive(ValueEnum, Clone, Debug)]
pub enum UnmatchedChoice {
    Report,
    Skip,
}

impl UnmatchedChoice {
    pub fn policy(&self) -> UnmatchedPolicy {
        match self {
            Self::Report => UnmatchedPolicy::Report,
            Self::Skip => UnmatchedPolicy::SilentSkip,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = photoslot_core::config::PhotoslotConfig::load_or_default(&cli.config)?;
    tracing::debug!("using config: {config:?}");

    match cli.command {
        Commands::Label {
            template,
            output,
            numbering,
        } => {
            commands::label::run(&config, &template, output.as_deref(), numbering)?;
        }
        Commands::Match {
            template,
            images,
            from,
            numbering,
        } => {
            commands::matching::run(&config, &template, &images, from.as_deref(), numbering)?;
        }
        Commands::Place {
            template,
            images,
            from,
            output,
            report,
            numbering,
            unmatched,
        } => {
            commands::place::run(
                &config,
                &template,
                &images,
                from.as_deref(),
                output.as_deref(),
                report.as_deref(),
                numbering,
                unmatched,
            )?;
        }
        Commands::Sort { dir, dry_run, yes } => {
            commands::sort::run(&config, &dir, dry_run, yes)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_numbering_override_on_every_template_command() {
        for command in ["label", "match", "place"] {
            let cli = Cli::try_parse_from([
                "photoslot",
                command,
                "--template",
                "spread.json",
                "--numbering",
                "descending",
            ])
            .unwrap();
            let numbering = match cli.command {
                Commands::Label { numbering, .. }
                | Commands::Match { numbering, .. }
                | Commands::Place { numbering, .. } => numbering,
                Commands::Sort { .. } => unreachable!(),
            };
            assert_eq!(
                numbering.map(|n| n.numbering()),
                Some(Numbering::Descending),
                "{command}"
            );
        }
    }
}
