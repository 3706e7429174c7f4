pub mod pieces;

use crate::board::{Board, Coord, Piece, Position, Side};
use std::fmt;

/// Legality category of a candidate move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MoveFlag {
    /// Destination must be empty.
    Quiet,
    /// Destination must hold an enemy.
    Capture,
    /// Ranged capture; destination must hold an enemy. The attacker still relocates.
    Afar,
    /// Destination may be empty or hold an enemy.
    Ambiguous,
    /// Unblockable 3D knight jump; same acceptance as `Ambiguous`.
    ThreeD,
}

impl MoveFlag {
    /// Flags rendered with `x` in notation.
    pub fn is_capture(self) -> bool { matches!(self, MoveFlag::Capture | MoveFlag::Afar) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: usize,
    pub to: usize,
    pub flag: MoveFlag,
}

impl Move {
    pub fn new(from: usize, to: usize, flag: MoveFlag) -> Self { Self { from, to, flag } }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.flag.is_capture() { 'x' } else { '-' };
        write!(f, "{}{}{}", crate::notation::index_to_algebraic(self.from), sep, crate::notation::index_to_algebraic(self.to))
    }
}

impl Piece {
    /// Raw candidates for this piece standing on `at`. Not yet filtered by [`accepts`].
    pub fn generate_moves(self, at: Coord, board: &Board, side: Side) -> Vec<Move> {
        let mut out = Vec::with_capacity(32);
        pieces::generate(self, at, board, side, &mut out);
        out
    }
}

/// Raw generator output for `piece` of `side` on `at`, before legality filtering.
pub fn pseudo_moves(piece: Piece, at: Coord, board: &Board, side: Side) -> Vec<Move> { piece.generate_moves(at, board, side) }

/// Flag-specific acceptance of a candidate against the current occupancy.
#[inline]
pub fn accepts(board: &Board, side: Side, mv: Move) -> bool {
    match mv.flag {
        MoveFlag::Quiet => board.is_empty(mv.to),
        MoveFlag::Capture | MoveFlag::Afar => board.is_enemy(mv.to, side),
        MoveFlag::Ambiguous | MoveFlag::ThreeD => board.is_open(mv.to, side),
    }
}

/// Filtered moves of the piece on `from`, which must belong to `side`.
fn push_legal_from(board: &Board, side: Side, from: usize, out: &mut Vec<Move>) {
    let code = board.get(from);
    if !board.is_friend(from, side) { return; }
    let Some(piece) = Piece::from_code(code) else { return; };
    let start = out.len();
    pieces::generate(piece, Coord::from_index(from), board, side, out);
    // Overlapping geometry (a Dragon's first slide step is also a neighbour step) is kept once.
    let mut keep = start;
    for i in start..out.len() {
        let mv = out[i];
        if accepts(board, side, mv) && !out[start..keep].contains(&mv) { out.swap(keep, i); keep += 1; }
    }
    out.truncate(keep);
}

/// Every legal move for the side to move.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(128);
    for (idx, _) in pos.board.pieces() {
        push_legal_from(&pos.board, pos.turn, idx, &mut out);
    }
    out
}

/// Legal moves of the piece on `from`; empty when it is not the side to move's piece.
pub fn legal_moves_from(pos: &Position, from: usize) -> Vec<Move> {
    let mut out = Vec::new();
    if from < crate::board::TOTAL_SQUARES { push_legal_from(&pos.board, pos.turn, from, &mut out); }
    out
}
