// Three-board Dragonchess: rules, game sessions, evaluation and alpha-beta search
pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod search;
pub mod selfplay;
pub mod strategy;

pub use board::{Board, Coord, Piece, Position, Side};
pub use error::{GameError, WeightsError};
pub use game::{Game, Outcome};
pub use movegen::{Move, MoveFlag};
pub use strategy::{RandomStrategy, SearchStrategy, Strategy, StrategyKind};

// Harness entry points; one `apply_move` + `refresh_derived_state` pair per half-move.

/// Initial layout, Gold to move.
pub fn create_game() -> Game { Game::new() }

pub fn legal_moves(game: &Game) -> Vec<Move> { game.legal_moves() }

pub fn legal_moves_from(game: &Game, index: usize) -> Vec<Move> { game.legal_moves_from(index) }

pub fn apply_move(game: &mut Game, mv: Move) -> Result<(), GameError> { game.apply_move(mv) }

pub fn refresh_derived_state(game: &mut Game) { game.update() }

pub fn choose_move(strategy: &mut dyn Strategy, game: &Game) -> Option<Move> { strategy.choose_move(game) }
