//! askscale CLI: score questionnaire sessions and render reports.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "askscale", version, about = "Likert questionnaire scoring and narrative reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a session and generate its report
    Score {
        /// Responses JSON file ({"<item id>": <1-5>})
        #[arg(long)]
        responses: PathBuf,

        /// Catalog TOML file (overrides config)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Content pools TOML file (overrides config)
        #[arg(long)]
        pools: Option<PathBuf>,

        /// Seed for reproducible selection
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: text, json, markdown, html
        #[arg(long)]
        format: Option<String>,

        /// Write the report to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate catalog and pool files
    Validate {
        /// Catalog TOML file (overrides config)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Content pools TOML file (overrides config)
        #[arg(long)]
        pools: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List the known dimensions
    Dimensions,

    /// Create starter config, catalog, pools and example responses
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("askscale=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            responses,
            catalog,
            pools,
            seed,
            format,
            output,
            config,
        } => commands::score::execute(responses, catalog, pools, seed, format, output, config),
        Commands::Validate {
            catalog,
            pools,
            config,
        } => commands::validate::execute(catalog, pools, config),
        Commands::Dimensions => commands::dimensions::execute(),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
