use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tracing::{error, info, warn, Level};
use trendforge::api;
use trendforge::config::EngineConfig;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, short, long, default_value = "data/splits.csv")]
    rows: String,

    /// JSON engine profile (thresholds, score groups, consensus questions).
    #[arg(global = true, short, long)]
    profile: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Rank(cmd::rank::RankArgs),
    Report(cmd::report::ReportArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🚀 Initializing TrendForge...");

    let (cli_params, sub_matches) = match &cli.command {
        Commands::Rank(args) => (&args.params, matches.subcommand_matches("rank")),
        Commands::Report(args) => (&args.params, matches.subcommand_matches("report")),
    };

    // File profile is the base; explicitly typed flags override it.
    let mut config = match &cli.profile {
        Some(path) => {
            info!("⚖️  Loading engine profile from: {}", path);
            EngineConfig::load_from_file(path).unwrap_or_else(|e| {
                error!("{}", e);
                process::exit(1);
            })
        }
        None => {
            warn!("⚠️  No engine profile given. Using embedded defaults.");
            EngineConfig::default()
        }
    };
    if let Some(m) = sub_matches {
        config.params.merge_from_cli(cli_params, m);
    }

    let board = api::load_board(&cli.rows).unwrap_or_else(|e| {
        error!("❌ Could not load rows from '{}': {}", cli.rows, e);
        process::exit(1);
    });

    let outcome = match cli.command {
        Commands::Rank(args) => cmd::rank::run(args, &board, &config),
        Commands::Report(args) => cmd::report::run(args, &board, &config),
    };

    if let Err(e) = outcome {
        error!("{}", e);
        process::exit(1);
    }
}
