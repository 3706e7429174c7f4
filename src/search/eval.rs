use crate::board::{Board, Coord, Piece, Side, BOARD_COLS, BOARD_ROWS};
use crate::error::WeightsError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Base material by absolute piece code. The king dwarfs everything else.
pub const BASE_VALUES: [f64; 16] = [0.0, 1.0, 5.0, 8.0, 5.0, 2.5, 4.5, 4.0, 9.0, 11.0, 10000.0, 10.0, 1.0, 3.0, 4.0, 2.0];

/// Score magnitude at which a king is known to be gone.
pub const KING_VALUE: f64 = BASE_VALUES[10];

/// Flat parameter vector: 14 material multipliers (non-king pieces, log scale),
/// 15 middlegame weights, 15 endgame weights.
pub const PARAM_COUNT: usize = 14 + 15 + 15;

/// Evaluator parameters indexed by absolute piece code (slot 0 unused).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub piece_values: [f64; 16],
    pub mg: [f64; 16],
    pub eg: [f64; 16],
}

impl Default for Weights {
    fn default() -> Self {
        let mut mg = [0.10; 16];
        let mut eg = [0.15; 16];
        mg[0] = 0.0;
        eg[0] = 0.0;
        Self { piece_values: BASE_VALUES, mg, eg }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WeightsFile {
    Table(Weights),
    Vector(Vec<f64>),
}

fn tunable_pieces() -> impl Iterator<Item = Piece> { Piece::ALL.into_iter().filter(|&p| p != Piece::King) }

impl Weights {
    /// Decodes a flat vector. A zero multiplier keeps the base value.
    pub fn from_vector(v: &[f64]) -> Result<Self, WeightsError> {
        if v.len() != PARAM_COUNT { return Err(WeightsError::Length { expected: PARAM_COUNT, got: v.len() }); }
        let mut w = Weights { piece_values: BASE_VALUES, mg: [0.0; 16], eg: [0.0; 16] };
        for (i, p) in tunable_pieces().enumerate() {
            w.piece_values[p.index()] = BASE_VALUES[p.index()] * v[i].exp();
        }
        for p in Piece::ALL {
            w.mg[p.index()] = v[14 + p.index() - 1];
            w.eg[p.index()] = v[29 + p.index() - 1];
        }
        Ok(w)
    }

    pub fn to_vector(&self) -> Vec<f64> {
        let mut v = Vec::with_capacity(PARAM_COUNT);
        v.extend(tunable_pieces().map(|p| (self.piece_values[p.index()] / BASE_VALUES[p.index()]).ln()));
        v.extend(Piece::ALL.iter().map(|p| self.mg[p.index()]));
        v.extend(Piece::ALL.iter().map(|p| self.eg[p.index()]));
        v
    }

    /// Reads either a full `Weights` object or a flat parameter array.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, WeightsError> {
        let text = std::fs::read_to_string(path)?;
        match serde_json::from_str::<WeightsFile>(&text)? {
            WeightsFile::Table(w) => Ok(w),
            WeightsFile::Vector(v) => Self::from_vector(&v),
        }
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), WeightsError> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

static INITIAL_MATERIAL: OnceLock<f64> = OnceLock::new();

fn non_king_material(board: &Board) -> f64 {
    board.pieces()
        .filter_map(|(_, c)| Piece::from_code(c))
        .filter(|&p| p != Piece::King)
        .map(|p| BASE_VALUES[p.index()])
        .sum()
}

/// 1.0 with all pieces on the board, falling toward 0.0 as material comes off.
pub fn phase(board: &Board) -> f64 {
    let full = *INITIAL_MATERIAL.get_or_init(|| non_king_material(&Board::initial()));
    (non_king_material(board) / full).clamp(0.0, 1.0)
}

// Both in [0, 1]: distance to the centre of the layer, and progress toward the enemy back row.
fn centrality(c: Coord) -> f64 {
    let cr = (BOARD_ROWS as f64 - 1.0) / 2.0;
    let cc = (BOARD_COLS as f64 - 1.0) / 2.0;
    1.0 - ((c.row as f64 - cr).abs() / cr + (c.col as f64 - cc).abs() / cc) / 2.0
}

fn advancement(c: Coord, side: Side) -> f64 {
    let last = (BOARD_ROWS - 1) as f64;
    match side { Side::Gold => (last - c.row as f64) / last, Side::Scarlet => c.row as f64 / last }
}

/// Favourability of `board` for `side`: own material plus phase-blended positional
/// bonuses, minus the opponent's.
pub fn evaluate(board: &Board, side: Side, w: &Weights) -> f64 {
    let ph = phase(board);
    let mut score = 0.0;
    for (idx, code) in board.pieces() {
        let (Some(piece), Some(owner)) = (Piece::from_code(code), Side::from_code(code)) else { continue };
        let t = piece.index();
        let c = Coord::from_index(idx);
        let v = w.piece_values[t] + ph * w.mg[t] * centrality(c) + (1.0 - ph) * w.eg[t] * advancement(c, owner);
        if owner == side { score += v; } else { score -= v; }
    }
    score
}
