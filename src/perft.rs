// Leaf counting over legal moves; positions are copied per child, never unmade.
use crate::board::Position;

pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let moves = pos.legal_moves();
    if depth == 1 { return moves.len() as u64; }
    moves.into_iter().map(|m| perft(&pos.play(m), depth - 1)).sum()
}

/// Per-root-move counts, in generation order.
pub fn divide(pos: &Position, depth: u32) -> Vec<(crate::movegen::Move, u64)> {
    if depth == 0 { return Vec::new(); }
    pos.legal_moves().into_iter().map(|m| (m, perft(&pos.play(m), depth - 1))).collect()
}
