use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod commands;

use commands::{extract::ExtractArgs, list::ListArgs};

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["extract", "list_entries"])))]
struct Cli {
    /// A container file, or a directory to scan for containers
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Directory extracted resources are written to
    #[arg(value_name = "OUTPUT", default_value = ".")]
    output: PathBuf,

    /// Extract all resources to individual files
    #[arg(short, long)]
    extract: bool,

    /// List directory entries without extracting
    #[arg(short, long)]
    list_entries: bool,

    /// Overwrite files that already exist in the output directory
    #[arg(short, long)]
    overwrite_existing: bool,
}

fn main() -> miette::Result<()> {
    better_panic::install();

    // a builder for `FmtSubscriber`.
    let subscriber = FmtSubscriber::builder()
        // all spans/events with a level higher than TRACE (e.g, debug, info, warn, etc.)
        // will be written to stdout.
        .with_max_level(Level::INFO)
        // completes the builder.
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();
    if cli.list_entries {
        ListArgs { input: cli.input }.handle()
    } else {
        ExtractArgs {
            input: cli.input,
            output: cli.output,
            overwrite: cli.overwrite_existing,
        }
        .handle()
    }
}
