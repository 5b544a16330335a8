//! safequiz: the terminal front end for the digital-safety quiz.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "safequiz", version, about = "Digital-safety quiz for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the quiz interactively
    Play {
        /// Path to a custom question bank (.toml)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Seed for a reproducible option order
        #[arg(long)]
        seed: Option<u64>,

        /// Present options in the order they are defined
        #[arg(long)]
        no_shuffle: bool,

        /// Also print the final summary as a JSON line
        #[arg(long)]
        json: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to a bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// List the questions of a bank without revealing answers
    Questions {
        /// Path to a custom question bank (.toml)
        #[arg(long)]
        bank: Option<PathBuf>,
    },

    /// Show the tier thresholds
    Tiers,

    /// Classify a score into its tier
    Classify {
        /// Total score
        #[arg(allow_negative_numbers = true)]
        score: i64,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a starter config and example question bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("safequiz=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            bank,
            seed,
            no_shuffle,
            json,
            config,
        } => commands::play::execute(bank, seed, no_shuffle, json, config),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Questions { bank } => commands::questions::execute(bank),
        Commands::Tiers => commands::tiers::execute(),
        Commands::Classify { score, json } => commands::classify::execute(score, json),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
