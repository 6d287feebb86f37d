mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "beamsched",
    version,
    about = "Beam schedule extraction from structural drawing snapshots"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tabulate a drawing that shows one beam
    Single {
        #[command(flatten)]
        args: ScheduleArgs,
    },
    /// Tabulate a drawing with several beam spans side by side
    Multi {
        #[command(flatten)]
        args: ScheduleArgs,
    },
    /// Inspect and validate layer maps
    Layers {
        #[command(subcommand)]
        action: LayersAction,
    },
}

#[derive(clap::Args)]
struct ScheduleArgs {
    /// Path to the JSON drawing snapshot
    snapshot: PathBuf,

    /// Custom JSON layer map (default: built-in layer names)
    #[arg(short, long = "layers", value_name = "FILE")]
    layers: Option<PathBuf>,

    /// Output format: table (default) or json
    #[arg(short, long, default_value = "table")]
    output: String,

    /// Write the schedule as JSON to a file
    #[arg(short = 'O', long = "out", value_name = "FILE")]
    out: Option<PathBuf>,
}

#[derive(Subcommand)]
enum LayersAction {
    /// Print the built-in layer map
    Show,
    /// Validate a custom layer map file
    Validate {
        /// Path to JSON layer map
        file: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Single { args } => commands::schedule::run(
            beamsched_core::classify::Workflow::Single,
            args.snapshot,
            args.layers,
            &args.output,
            args.out,
        ),
        Commands::Multi { args } => commands::schedule::run(
            beamsched_core::classify::Workflow::Multi,
            args.snapshot,
            args.layers,
            &args.output,
            args.out,
        ),
        Commands::Layers { action } => match action {
            LayersAction::Show => commands::layers::show(),
            LayersAction::Validate { file } => commands::layers::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
