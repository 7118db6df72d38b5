use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use harmonizer::{
    AestheticProfile, MigrationOptions, MigrationOrchestrator, MismatchStrategy, OutputMode,
    StyleStrategy,
};

/// Migrate components, pages, utilities and styles from one frontend
/// project into another.
#[derive(Debug, Parser)]
#[command(name = "harmonizer", version, about)]
struct Cli {
    /// Project root that receives the migrated files.
    #[arg(long)]
    target: PathBuf,

    /// Project root that contributes the files.
    #[arg(long)]
    source: PathBuf,

    /// Log every decision without writing any files.
    #[arg(long)]
    dry_run: bool,

    /// Generate a smoke test next to each migrated component.
    #[arg(long)]
    generate_tests: bool,

    /// Stylesheet transformation strategy.
    #[arg(long, value_enum, default_value_t = StyleStrategy::None)]
    style_strategy: StyleStrategy,

    /// Selector prefix used by the prefix-styles strategy.
    #[arg(long, default_value = "migrated-")]
    style_prefix: String,

    /// What to produce beyond the migrated tree.
    #[arg(long, value_enum, default_value_t = OutputMode::Migrate)]
    output_mode: OutputMode,

    /// How to treat cross-project mismatches.
    #[arg(long, value_enum, default_value_t = MismatchStrategy::Approximate)]
    mismatch_strategy: MismatchStrategy,

    /// Aesthetic profile for style substitution.
    #[arg(long, value_enum, default_value_t = AestheticProfile::Auto)]
    aesthetic: AestheticProfile,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut options = MigrationOptions::default();
    options.dry_run = cli.dry_run;
    options.generate_tests = cli.generate_tests;
    options.style_strategy = cli.style_strategy;
    options.style_prefix = cli.style_prefix;
    options.output_mode = cli.output_mode;
    options.mismatch_strategy = cli.mismatch_strategy;
    options.aesthetic_profile = cli.aesthetic;

    let mut orchestrator = MigrationOrchestrator::new(cli.target, cli.source, options);
    match orchestrator.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
