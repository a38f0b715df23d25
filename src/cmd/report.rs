use crate::reports;
use clap::Args;
use trendforge::api::evaluate_board;
use trendforge::board::GameBoard;
use trendforge::config::{EngineConfig, EngineParams};
use trendforge::error::{TfResult, TrendForgeError};
use trendforge::signals::SortMode;

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub params: EngineParams,

    #[arg(short, long)]
    pub game: Option<String>,

    #[arg(short = 'q', long)]
    pub search: Option<String>,
}

pub fn run(args: ReportArgs, board: &GameBoard, config: &EngineConfig) -> TfResult<()> {
    let reports = evaluate_board(
        board,
        config,
        &SortMode::Chronological,
        args.search.as_deref(),
    );

    let selected: Vec<_> = reports
        .iter()
        .filter(|r| args.game.as_ref().map_or(true, |id| &r.id == id))
        .collect();

    if selected.is_empty() {
        if let Some(id) = &args.game {
            return Err(TrendForgeError::Validation(format!(
                "Game '{}' is not on the board",
                id
            )));
        }
    }

    println!("\n🔎 === TREND REPORT === 🔎");
    for report in selected {
        reports::print_game_report(report);
    }
    Ok(())
}
