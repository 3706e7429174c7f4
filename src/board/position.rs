use super::{Board, Piece, Side};
use crate::movegen::{self, Move};

/// A board snapshot plus the side to move. Children are produced by copy, never by
/// mutating a shared board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub board: Board,
    pub turn: Side,
}

impl Position {
    pub fn startpos() -> Self { Self { board: Board::initial(), turn: Side::Gold } }

    pub fn new(board: Board, turn: Side) -> Self { Self { board, turn } }

    /// Child position after `mv`. Any occupant of the destination is removed; AFAR
    /// relocates the attacker like an ordinary capture.
    pub fn play(&self, mv: Move) -> Position {
        let mut board = self.board;
        let piece = board.get(mv.from);
        board.set(mv.to, piece);
        board.clear(mv.from);
        Position { board, turn: self.turn.opposite() }
    }

    pub fn king_present(&self, side: Side) -> bool { self.board.find(Piece::King.code(side)).is_some() }

    pub fn legal_moves(&self) -> Vec<Move> { movegen::legal_moves(self) }

    pub fn legal_moves_from(&self, from: usize) -> Vec<Move> { movegen::legal_moves_from(self, from) }
}

impl Default for Position {
    fn default() -> Self { Self::startpos() }
}
