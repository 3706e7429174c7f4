use crate::board::Side;
use crate::game::{Game, Outcome};
use crate::search::{SearchParams, Weights};
use crate::strategy::{Strategy, StrategyKind};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct MatchParams {
    pub games: usize,
    pub max_plies: usize,
    pub seed: u64,
    pub gold: StrategyKind,
    pub scarlet: StrategyKind,
    pub movetime_ms: Option<u64>,
    pub max_depth: u32,
    pub threads: usize,
    pub progress: bool,
    pub weights: Weights,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            games: 10,
            max_plies: 500,
            seed: 42,
            gold: StrategyKind::Search,
            scarlet: StrategyKind::Random,
            movetime_ms: Some(200),
            max_depth: 3,
            threads: 1,
            progress: false,
            weights: Weights::default(),
        }
    }
}

impl MatchParams {
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            max_depth: self.max_depth.max(1),
            movetime: self.movetime_ms.map(Duration::from_millis),
            ..SearchParams::default()
        }
    }

    /// Seed of game `index`; both strategies derive their own streams from it.
    pub fn game_seed(&self, index: usize) -> u64 {
        self.seed ^ (index as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub notations: Vec<String>,
    /// `None` when the game was cut off or a side had nothing to play.
    pub outcome: Option<Outcome>,
    pub plies: usize,
}

/// Plays one game from the initial layout. Each half-move asks the side to move's
/// strategy, applies the move and refreshes the derived state.
pub fn play_game(gold: &mut dyn Strategy, scarlet: &mut dyn Strategy, max_plies: usize) -> GameRecord {
    play_from(Game::new(), gold, scarlet, max_plies)
}

pub fn play_from(mut game: Game, gold: &mut dyn Strategy, scarlet: &mut dyn Strategy, max_plies: usize) -> GameRecord {
    game.update();
    while !game.is_over() && game.move_log().len() < max_plies {
        let strategy: &mut dyn Strategy = match game.turn() { Side::Gold => &mut *gold, Side::Scarlet => &mut *scarlet };
        let Some(mv) = strategy.choose_move(&game) else { break };
        if let Err(e) = game.apply_move(mv) {
            warn!("{} strategy produced a rejected move {}: {}", strategy.name(), mv, e);
            break;
        }
        game.update();
    }
    GameRecord { notations: game.notations().to_vec(), outcome: game.outcome(), plies: game.move_log().len() }
}

fn play_indexed(params: &MatchParams, search: SearchParams, index: usize) -> GameRecord {
    let seed = params.game_seed(index);
    let mut gold = params.gold.build(search, &params.weights, seed);
    let mut scarlet = params.scarlet.build(search, &params.weights, seed.rotate_left(32) ^ 1);
    let rec = play_game(gold.as_mut(), scarlet.as_mut(), params.max_plies);
    info!(
        "game {} finished after {} plies: {}",
        index, rec.plies, rec.outcome.map(|o| o.to_string()).unwrap_or_else(|| "undecided".to_string())
    );
    rec
}

/// Runs `params.games` independent games on a rayon pool. Records come back in game
/// order; each game owns its session, strategies and transposition table.
pub fn run_matches(params: &MatchParams) -> Vec<GameRecord> {
    let search = params.search_params();
    let bar = if params.progress {
        let pb = ProgressBar::new(params.games as u64);
        if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} games {elapsed_precise}") { pb.set_style(style); }
        Some(pb)
    } else {
        None
    };
    let run = || -> Vec<GameRecord> {
        (0..params.games).into_par_iter().map(|i| {
            let rec = play_indexed(params, search, i);
            if let Some(pb) = &bar { pb.inc(1); }
            rec
        }).collect()
    };
    let records = match rayon::ThreadPoolBuilder::new().num_threads(params.threads.max(1)).build() {
        Ok(pool) => pool.install(run),
        Err(e) => {
            warn!("could not build a {}-thread pool ({}), using the global pool", params.threads, e);
            run()
        }
    };
    if let Some(pb) = bar { pb.finish_and_clear(); }
    records
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub games: usize,
    pub gold_wins: usize,
    pub scarlet_wins: usize,
    pub draws: usize,
    pub undecided: usize,
    pub average_plies: f64,
}

impl MatchSummary {
    pub fn from_records(records: &[GameRecord]) -> Self {
        let mut s = MatchSummary { games: records.len(), ..Default::default() };
        for r in records {
            match r.outcome {
                Some(Outcome::Winner(Side::Gold)) => s.gold_wins += 1,
                Some(Outcome::Winner(Side::Scarlet)) => s.scarlet_wins += 1,
                Some(Outcome::Draw) => s.draws += 1,
                None => s.undecided += 1,
            }
        }
        if !records.is_empty() {
            s.average_plies = records.iter().map(|r| r.plies as f64).sum::<f64>() / records.len() as f64;
        }
        s
    }
}
