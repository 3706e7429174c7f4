use crate::board::{pos_to_index, Board, Piece, Position, Side, BOARD_COLS, BOARD_ROWS, GROUND, NUM_BOARDS, TOTAL_SQUARES, UNDERWORLD};
use crate::error::GameError;
use crate::movegen::Move;
use crate::notation;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::{self, Write as _};

/// Half-moves without a capture after which the game is drawn.
pub const NO_PROGRESS_LIMIT: u32 = 250;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Winner(Side),
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Outcome::Winner(s) => f.write_str(s.name()), Outcome::Draw => f.write_str("Draw") }
    }
}

/// Hex SHA-256 of the board bytes followed by the side name.
pub fn state_digest(board: &Board, turn: Side) -> String {
    let mut h = Sha256::new();
    h.update(board.to_bytes());
    h.update(turn.name().as_bytes());
    format!("{:x}", h.finalize())
}

/// A game session. Mutated through [`Game::apply_move`] followed by [`Game::update`]
/// once per half-move; rejects further moves after a terminal state.
#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    move_log: Vec<Move>,
    notations: Vec<String>,
    state_history: Vec<String>,
    no_progress: u32,
    game_over: bool,
    outcome: Option<Outcome>,
    frozen: [bool; TOTAL_SQUARES],
}

impl Default for Game {
    fn default() -> Self { Self::new() }
}

impl Game {
    /// Initial layout, Gold to move.
    pub fn new() -> Self { Self::from_position(Position::startpos()) }

    pub fn from_position(position: Position) -> Self {
        Self {
            position,
            move_log: Vec::new(),
            notations: Vec::new(),
            state_history: Vec::new(),
            no_progress: 0,
            game_over: false,
            outcome: None,
            frozen: [false; TOTAL_SQUARES],
        }
    }

    pub fn position(&self) -> &Position { &self.position }
    pub fn board(&self) -> &Board { &self.position.board }

    /// Direct board access for harnesses and setups. Call [`Game::update`] afterwards.
    pub fn board_mut(&mut self) -> &mut Board { &mut self.position.board }

    pub fn turn(&self) -> Side { self.position.turn }
    pub fn move_log(&self) -> &[Move] { &self.move_log }
    pub fn notations(&self) -> &[String] { &self.notations }
    pub fn state_history(&self) -> &[String] { &self.state_history }
    pub fn no_progress(&self) -> u32 { self.no_progress }
    pub fn is_over(&self) -> bool { self.game_over }
    pub fn outcome(&self) -> Option<Outcome> { self.outcome }
    pub fn frozen(&self) -> &[bool; TOTAL_SQUARES] { &self.frozen }
    pub fn is_frozen(&self, index: usize) -> bool { self.frozen.get(index).copied().unwrap_or(false) }

    pub fn legal_moves(&self) -> Vec<Move> {
        if self.game_over { return Vec::new(); }
        self.position.legal_moves()
    }

    pub fn legal_moves_from(&self, index: usize) -> Vec<Move> {
        if self.game_over { return Vec::new(); }
        self.position.legal_moves_from(index)
    }

    /// Plays `mv` for the side to move. The board is untouched when the move is rejected.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), GameError> {
        if self.game_over { return Err(GameError::GameOver); }
        let illegal = |reason: &'static str| GameError::IllegalMove { from: mv.from, to: mv.to, reason };
        if mv.from >= TOTAL_SQUARES || mv.to >= TOTAL_SQUARES { return Err(illegal("square out of range")); }
        let board = &self.position.board;
        let mover = board.get(mv.from);
        let Some(side) = Side::from_code(mover) else { return Err(illegal("source square is empty")) };
        if side != self.position.turn { return Err(illegal("piece does not belong to the side to move")); }
        if board.is_friend(mv.to, side) { return Err(illegal("destination holds a friendly piece")); }

        let captured = board.is_enemy(mv.to, side);
        let text = notation::move_notation(board, mv);
        trace!("{} plays {}", side, text);

        self.position = self.position.play(mv);
        if captured { self.no_progress = 0; } else { self.no_progress += 1; }
        self.move_log.push(mv);
        self.notations.push(text);
        self.state_history.push(state_digest(&self.position.board, side));
        Ok(())
    }

    /// Recomputes frozen cells and checks terminal conditions: inactivity draw first,
    /// then a missing Gold king, then a missing Scarlet king.
    pub fn update(&mut self) {
        self.frozen = [false; TOTAL_SQUARES];
        let board = &self.position.board;
        for row in 0..BOARD_ROWS {
            for col in 0..BOARD_COLS {
                let below = board.get(pos_to_index(UNDERWORLD, row, col));
                if Piece::from_code(below) != Some(Piece::Basilisk) { continue; }
                let above = pos_to_index(GROUND, row, col);
                if (board.get(above) as i32) * (below as i32) < 0 { self.frozen[above] = true; }
            }
        }
        if self.game_over { return; }

        let outcome = if self.no_progress >= NO_PROGRESS_LIMIT {
            Some(Outcome::Draw)
        } else if !self.position.king_present(Side::Gold) {
            Some(Outcome::Winner(Side::Scarlet))
        } else if !self.position.king_present(Side::Scarlet) {
            Some(Outcome::Winner(Side::Gold))
        } else {
            None
        };
        if let Some(o) = outcome {
            debug!("game over after {} half-moves: {}", self.move_log.len(), o);
            self.game_over = true;
            self.outcome = Some(o);
        }
    }

    /// Plain-text dump of the three boards; frozen cells are marked with '*'.
    pub fn render(&self) -> String {
        let mut s = String::new();
        for layer in 0..NUM_BOARDS {
            let _ = writeln!(s, "Board {}", layer + 1);
            for row in 0..BOARD_ROWS {
                let _ = write!(s, "{:>2} ", BOARD_ROWS - row);
                for col in 0..BOARD_COLS {
                    let idx = pos_to_index(layer, row, col);
                    let code = self.position.board.get(idx);
                    let c = if code == 0 { '.' } else { notation::piece_letter(code) };
                    let mark = if self.frozen[idx] { '*' } else { ' ' };
                    let _ = write!(s, "{c}{mark}");
                }
                s.push('\n');
            }
            s.push_str("   ");
            for col in 0..BOARD_COLS { let _ = write!(s, "{} ", (b'a' + col as u8) as char); }
            s.push('\n');
        }
        s
    }
}
