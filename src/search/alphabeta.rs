use crate::board::Position;
use crate::movegen::Move;
use crate::search::eval::{evaluate, Weights, BASE_VALUES, KING_VALUE};
use crate::search::tt::{Bound, Entry, Tt};
use crate::search::zobrist;
use log::debug;
use std::cmp::Reverse;
use std::time::{Duration, Instant};

pub const DEFAULT_MOVETIME: Duration = Duration::from_secs(5);
pub const DEFAULT_TT_ENTRIES: usize = 1 << 16;

#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    pub max_depth: u32,
    pub movetime: Option<Duration>,
    pub max_nodes: Option<u64>,
    pub use_tt: bool,
    /// Keep entries from the previous search instead of clearing the table.
    pub reuse_tt: bool,
    pub order_captures: bool,
    pub tt_entries: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_depth: 64,
            movetime: Some(DEFAULT_MOVETIME),
            max_nodes: None,
            use_tt: true,
            reuse_tt: false,
            order_captures: true,
            tt_entries: DEFAULT_TT_ENTRIES,
        }
    }
}

#[derive(Default, Debug, Clone)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    /// Score of the deepest completed iteration, from the side to move's view.
    pub score: f64,
    /// Deepest fully completed depth; 0 when not even depth 1 finished.
    pub depth: u32,
    pub nodes: u64,
    pub elapsed: Duration,
}

/// Iterative-deepening alpha-beta (negamax form). Owns its transposition table;
/// one searcher per thread.
pub struct Searcher {
    tt: Tt,
    weights: Weights,
    nodes: u64,
    node_limit: u64,
    deadline: Option<Instant>,
    order_captures: bool,
    use_tt: bool,
}

impl Default for Searcher {
    fn default() -> Self { Self::new(Weights::default()) }
}

impl Searcher {
    pub fn new(weights: Weights) -> Self {
        Self {
            tt: Tt::with_capacity(DEFAULT_TT_ENTRIES),
            weights,
            nodes: 0,
            node_limit: u64::MAX,
            deadline: None,
            order_captures: true,
            use_tt: true,
        }
    }

    pub fn weights(&self) -> &Weights { &self.weights }
    pub fn set_weights(&mut self, weights: Weights) { self.weights = weights; }
    pub fn nodes(&self) -> u64 { self.nodes }
    pub fn tt(&self) -> &Tt { &self.tt }

    /// Searches `pos` until the time, node or depth budget runs out and returns the result
    /// of the deepest iteration that completed.
    pub fn search(&mut self, pos: &Position, params: SearchParams) -> SearchResult {
        let start = Instant::now();
        self.nodes = 0;
        self.node_limit = params.max_nodes.unwrap_or(u64::MAX);
        self.deadline = params.movetime.map(|d| start + d);
        self.order_captures = params.order_captures;
        self.use_tt = params.use_tt;
        if self.tt.capacity() != (params.tt_entries.max(4) + 3) / 4 * 4 {
            self.tt.set_capacity_entries(params.tt_entries);
        } else if !params.reuse_tt {
            self.tt.clear();
        }

        let mut result = SearchResult { score: evaluate(&pos.board, pos.turn, &self.weights), ..Default::default() };
        for depth in 1..=params.max_depth.max(1) {
            self.tt.bump_generation();
            let Some((best, score)) = self.search_root(pos, depth) else {
                debug!("depth {} aborted after {} nodes", depth, self.nodes);
                break;
            };
            result.best_move = best;
            result.score = score;
            result.depth = depth;
            debug!(
                "depth {} score {:.2} nodes {} time {}ms best {}",
                depth, score, self.nodes, start.elapsed().as_millis(),
                best.map(|m| m.to_string()).unwrap_or_else(|| "(none)".to_string())
            );
            // No moves, or a king capture is already forced.
            if best.is_none() || score.abs() >= KING_VALUE / 2.0 { break; }
        }
        result.nodes = self.nodes;
        result.elapsed = start.elapsed();
        result
    }

    /// `None` when the budget ran out before the root finished.
    fn search_root(&mut self, pos: &Position, depth: u32) -> Option<(Option<Move>, f64)> {
        let mut moves = pos.legal_moves();
        if moves.is_empty() { return Some((None, self.static_eval(pos))); }
        let tt_move = self.tt_get(pos).and_then(|e| e.best);
        self.order_moves(pos, &mut moves, tt_move);

        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;
        let mut best: Option<Move> = None;
        let mut best_score = f64::NEG_INFINITY;
        for m in moves {
            let child = pos.play(m);
            let score = -self.alphabeta(&child, depth - 1, -beta, -alpha, 1)?;
            if score > best_score { best_score = score; best = Some(m); }
            if score > alpha { alpha = score; }
        }
        self.tt_put(pos, depth, best_score, best, Bound::Exact);
        Some((best, best_score))
    }

    fn alphabeta(&mut self, pos: &Position, depth: u32, mut alpha: f64, beta: f64, ply: u32) -> Option<f64> {
        if self.out_of_budget() { return None; }
        self.nodes += 1;
        // A side without a king has lost; later losses score slightly better so wins come early.
        if !pos.king_present(pos.turn) { return Some(self.static_eval(pos) + ply as f64 * 0.01); }
        if depth == 0 { return Some(self.static_eval(pos)); }

        let tt_entry = if self.use_tt { self.tt_get(pos) } else { None };
        if let Some(en) = tt_entry {
            if en.depth >= depth {
                match en.bound {
                    Bound::Exact => return Some(en.score),
                    Bound::Lower => if en.score >= beta { return Some(en.score); },
                    Bound::Upper => if en.score <= alpha { return Some(en.score); },
                }
            }
        }

        let mut moves = pos.legal_moves();
        if moves.is_empty() { return Some(self.static_eval(pos)); }
        self.order_moves(pos, &mut moves, tt_entry.and_then(|e| e.best));

        let orig_alpha = alpha;
        let mut best = f64::NEG_INFINITY;
        let mut best_move: Option<Move> = None;
        for m in moves {
            let child = pos.play(m);
            let score = -self.alphabeta(&child, depth - 1, -beta, -alpha, ply + 1)?;
            if score > best { best = score; best_move = Some(m); }
            if best > alpha { alpha = best; }
            if alpha >= beta { break; }
        }
        let bound = if best <= orig_alpha { Bound::Upper } else if best >= beta { Bound::Lower } else { Bound::Exact };
        self.tt_put(pos, depth, best, best_move, bound);
        Some(best)
    }

    fn out_of_budget(&self) -> bool {
        if self.nodes >= self.node_limit { return true; }
        matches!(self.deadline, Some(dl) if Instant::now() >= dl)
    }

    fn static_eval(&self, pos: &Position) -> f64 { evaluate(&pos.board, pos.turn, &self.weights) }

    /// TT move first, then captures by victim value, then everything else in generation order.
    fn order_moves(&self, pos: &Position, moves: &mut [Move], tt_move: Option<Move>) {
        if self.order_captures {
            let board = &pos.board;
            moves.sort_by_key(|m| {
                if board.is_enemy(m.to, pos.turn) {
                    Reverse(1 + (BASE_VALUES[board.get(m.to).unsigned_abs() as usize] * 10.0) as i64)
                } else {
                    Reverse(0)
                }
            });
        }
        if let Some(ttm) = tt_move {
            if let Some(i) = moves.iter().position(|&m| m == ttm) { moves[..=i].rotate_right(1); }
        }
    }
}

impl Searcher {
    fn tt_get(&self, pos: &Position) -> Option<Entry> {
        if !self.use_tt { return None; }
        self.tt.get(zobrist::compute(pos))
    }

    fn tt_put(&mut self, pos: &Position, depth: u32, score: f64, best: Option<Move>, bound: Bound) {
        if !self.use_tt { return; }
        self.tt.put(Entry { key: zobrist::compute(pos), depth, score, best, bound, gen: 0 });
    }

    pub fn tt_probe(&self, pos: &Position) -> Option<(u32, Bound)> {
        self.tt.get(zobrist::compute(pos)).map(|e| (e.depth, e.bound))
    }

    pub fn set_tt_capacity(&mut self, entries: usize) { self.tt.set_capacity_entries(entries); }
}
