use crate::reports;
use clap::Args;
use trendforge::api::evaluate_board;
use trendforge::board::GameBoard;
use trendforge::config::{EngineConfig, EngineParams};
use trendforge::error::TfResult;

#[derive(Args, Debug, Clone)]
pub struct RankArgs {
    #[command(flatten)]
    pub params: EngineParams,

    /// `chronological` or the name of a score group.
    #[arg(short, long, default_value = "chronological")]
    pub sort: String,

    /// Only games where either team contains this text.
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    /// Print the ordered reports as JSON instead of a table.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: RankArgs, board: &GameBoard, config: &EngineConfig) -> TfResult<()> {
    let mode = config.sort_mode(&args.sort)?;
    let reports = evaluate_board(board, config, &mode, args.search.as_deref());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    println!("\n📊 === GAMES BY {} === 📊", mode.to_string().to_uppercase());
    reports::print_ranking_table(&reports, &mode, config);
    Ok(())
}
