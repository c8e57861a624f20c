mod commands;
mod logging;
mod output;

use clap::{Args, Parser, Subcommand};
use idability_core::parsing::values::parse_value;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "idability",
    version,
    about = "Build and evaluate hitting-set codes that identify subjects in feature tables"
)]
struct Cli {
    /// Log every subject's code construction (or set IDABILITY_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a code for every subject of a table
    Encode {
        /// Tab-delimited table: features as rows, subjects as columns
        table: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,

        /// Codes file to write (default: <table>.codes.txt)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Also write a JSON trace of every build step
        #[arg(long, value_name = "FILE")]
        trace: Option<PathBuf>,
    },
    /// Match codes from an earlier run against a table
    Decode {
        /// Tab-delimited table: features as rows, subjects as columns
        table: PathBuf,

        /// Codes file produced by `idability encode`
        #[arg(short, long, value_name = "FILE")]
        codes: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,

        /// Hits file to write (default: <table>.<codes>.hits.txt)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Summary format on stdout: table (default) or json
        #[arg(short, long, default_value = "table")]
        format: String,
    },
    /// Inspect the named configuration presets
    Presets {
        #[command(subcommand)]
        action: PresetsAction,
    },
}

#[derive(Subcommand)]
enum PresetsAction {
    /// List available presets
    List,
    /// Print a preset as a JSON configuration file
    Show {
        /// Preset name (e.g., "rpkm")
        name: String,
    },
}

/// Settings shared by encode and decode. A preset or config file provides the
/// base; individual flags override it.
#[derive(Args, Clone, Default)]
pub struct ConfigArgs {
    /// Named preset: simple (default), relab or rpkm
    #[arg(short = 'e', long, value_name = "NAME", conflicts_with = "config")]
    pub preset: Option<String>,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Values at or above this are confidently present
    #[arg(short = 'd', long, value_name = "VALUE", value_parser = parse_value)]
    pub presence: Option<Decimal>,

    /// Values at or below this are confidently absent
    #[arg(short = 'n', long, value_name = "VALUE", value_parser = parse_value)]
    pub absence: Option<Decimal>,

    /// Lengthen codes past uniqueness up to this many features
    #[arg(short, long, value_name = "N")]
    pub min_code_size: Option<usize>,

    /// Feature prioritization: rarity or abundance_gap
    #[arg(short, long, value_name = "MODE")]
    pub ranking: Option<String>,

    /// Knock out candidates at least this Jaccard-similar to a taken feature
    #[arg(short = 'j', long, value_name = "CUTOFF", value_parser = parse_value)]
    pub similarity_cutoff: Option<Decimal>,

    /// Disable redundant-feature pruning even if the preset enables it
    #[arg(long, conflicts_with = "similarity_cutoff")]
    pub no_pruning: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Encode {
            table,
            config,
            output,
            trace,
        } => commands::encode::run(table, &config, output, trace),
        Commands::Decode {
            table,
            codes,
            config,
            output,
            format,
        } => commands::decode::run(table, codes, &config, output, &format),
        Commands::Presets { action } => match action {
            PresetsAction::List => commands::presets::list(),
            PresetsAction::Show { name } => commands::presets::show(&name),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
