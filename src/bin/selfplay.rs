use anyhow::Context;
use clap::Parser;
use dragonchess::search::Weights;
use dragonchess::selfplay::{run_matches, MatchParams, MatchSummary};
use dragonchess::StrategyKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dragonchess-selfplay", about = "Play engine-vs-engine games and summarise the results")]
struct Args {
    #[arg(long, default_value_t = 10)]
    games: usize,
    #[arg(long, default_value_t = 500)]
    max_plies: usize,
    #[arg(long, value_enum, default_value_t = StrategyKind::Search)]
    gold: StrategyKind,
    #[arg(long, value_enum, default_value_t = StrategyKind::Random)]
    scarlet: StrategyKind,
    #[arg(long, default_value_t = 200)]
    movetime_ms: u64,
    #[arg(long, default_value_t = 3)]
    max_depth: u32,
    #[arg(long, default_value_t = 1)]
    threads: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Evaluator weights (JSON object or flat array)
    #[arg(long)]
    weights: Option<PathBuf>,
    /// Write the summary and game records here as JSON
    #[arg(long)]
    out: Option<PathBuf>,
    #[arg(long, default_value_t = false)]
    progress: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let weights = match &a.weights {
        Some(p) => Weights::load_json(p).with_context(|| format!("loading weights from {}", p.display()))?,
        None => Weights::default(),
    };
    let params = MatchParams {
        games: a.games,
        max_plies: a.max_plies,
        seed: a.seed,
        gold: a.gold,
        scarlet: a.scarlet,
        movetime_ms: Some(a.movetime_ms),
        max_depth: a.max_depth,
        threads: a.threads,
        progress: a.progress,
        weights,
    };
    eprintln!("Playing {} games ({:?} vs {:?}, movetime={}ms, depth<={}, threads={})", a.games, a.gold, a.scarlet, a.movetime_ms, a.max_depth, a.threads);
    let records = run_matches(&params);
    let summary = MatchSummary::from_records(&records);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    if let Some(out) = &a.out {
        let doc = serde_json::json!({ "summary": summary, "games": records });
        std::fs::write(out, serde_json::to_string_pretty(&doc)?).with_context(|| format!("writing {}", out.display()))?;
        eprintln!("Wrote {}", out.display());
    }
    Ok(())
}
