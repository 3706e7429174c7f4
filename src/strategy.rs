use crate::game::Game;
use crate::movegen::Move;
use crate::search::{SearchParams, SearchResult, Searcher, Weights};
use log::warn;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// A move-selection policy. Harnesses call `choose_move` once per turn and apply the
/// result; `None` means the side to move has nothing to play.
pub trait Strategy: Send {
    fn name(&self) -> &'static str;
    fn choose_move(&mut self, game: &Game) -> Option<Move>;
}

/// Uniform choice over all legal moves.
pub struct RandomStrategy {
    rng: SmallRng,
}

impl RandomStrategy {
    pub fn new(seed: u64) -> Self { Self { rng: SmallRng::seed_from_u64(seed) } }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &'static str { "random" }

    fn choose_move(&mut self, game: &Game) -> Option<Move> {
        game.legal_moves().choose(&mut self.rng).copied()
    }
}

/// Time-bounded alpha-beta; plays a random legal move when the search yields none.
pub struct SearchStrategy {
    searcher: Searcher,
    params: SearchParams,
    fallback: RandomStrategy,
    last: Option<SearchResult>,
}

impl SearchStrategy {
    pub fn new(params: SearchParams, weights: Weights, seed: u64) -> Self {
        Self { searcher: Searcher::new(weights), params, fallback: RandomStrategy::new(seed), last: None }
    }

    pub fn params(&self) -> &SearchParams { &self.params }

    /// Result of the most recent search, if any.
    pub fn last_result(&self) -> Option<&SearchResult> { self.last.as_ref() }
}

impl Strategy for SearchStrategy {
    fn name(&self) -> &'static str { "search" }

    fn choose_move(&mut self, game: &Game) -> Option<Move> {
        if game.is_over() { return None; }
        let res = self.searcher.search(game.position(), self.params);
        let best = res.best_move;
        let depth = res.depth;
        self.last = Some(res);
        if best.is_some() { return best; }
        let fallback = self.fallback.choose_move(game);
        if fallback.is_some() { warn!("search returned no move (depth {}), playing a random move", depth); }
        fallback
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Random,
    Search,
}

impl StrategyKind {
    pub fn build(self, params: SearchParams, weights: &Weights, seed: u64) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Random => Box::new(RandomStrategy::new(seed)),
            StrategyKind::Search => Box::new(SearchStrategy::new(params, weights.clone(), seed)),
        }
    }
}
