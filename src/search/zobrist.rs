use crate::board::{Position, Side, TOTAL_SQUARES};
use std::sync::OnceLock;

// One key per (cell, signed piece code); codes -15..=15 map to slots 0..=30.
const CODE_SLOTS: usize = 31;

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

static TABLE: OnceLock<Vec<u64>> = OnceLock::new();
static SIDE_KEY: OnceLock<u64> = OnceLock::new();

fn init_table() -> &'static [u64] {
    TABLE.get_or_init(|| {
        let mut seed = 0xD5A6_0C4E_55F1_7B23;
        (0..CODE_SLOTS * TOTAL_SQUARES).map(|_| { seed = splitmix64(seed); seed }).collect()
    })
}

fn init_side() -> u64 {
    *SIDE_KEY.get_or_init(|| splitmix64(0x5CA7_1E70_6011_D000))
}

#[inline]
pub fn piece_key(index: usize, code: i8) -> u64 {
    let slot = (code as i32 + 15) as usize;
    init_table()[slot * TOTAL_SQUARES + index]
}

/// Hash of (board contents, side to move).
pub fn compute(pos: &Position) -> u64 {
    let mut key = 0u64;
    for (idx, code) in pos.board.pieces() { key ^= piece_key(idx, code); }
    if pos.turn == Side::Scarlet { key ^= init_side(); }
    key
}
