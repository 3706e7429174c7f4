pub mod layout;
pub mod position;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use position::Position;

// Board dimensions
pub const NUM_BOARDS: usize = 3;
pub const BOARD_ROWS: usize = 8;
pub const BOARD_COLS: usize = 12;
pub const LAYER_SQUARES: usize = BOARD_ROWS * BOARD_COLS;
pub const TOTAL_SQUARES: usize = NUM_BOARDS * LAYER_SQUARES;

// Layer indices, top to bottom
pub const SKY: usize = 0;
pub const GROUND: usize = 1;
pub const UNDERWORLD: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Gold,
    Scarlet,
}

impl Side {
    /// Sign carried by this side's piece codes.
    pub fn sign(self) -> i8 { match self { Side::Gold => 1, Side::Scarlet => -1 } }

    pub fn opposite(self) -> Side { match self { Side::Gold => Side::Scarlet, Side::Scarlet => Side::Gold } }

    /// Row delta of a forward step. Gold starts on the high rows and moves toward row 0.
    pub fn forward(self) -> i32 { match self { Side::Gold => -1, Side::Scarlet => 1 } }

    pub fn name(self) -> &'static str { match self { Side::Gold => "Gold", Side::Scarlet => "Scarlet" } }

    pub fn from_code(code: i8) -> Option<Side> {
        if code > 0 { Some(Side::Gold) } else if code < 0 { Some(Side::Scarlet) } else { None }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// The fifteen piece kinds. The discriminant is the absolute piece code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Piece {
    Sylph = 1,
    Griffin = 2,
    Dragon = 3,
    Oliphant = 4,
    Unicorn = 5,
    Hero = 6,
    Thief = 7,
    Cleric = 8,
    Mage = 9,
    King = 10,
    Paladin = 11,
    Warrior = 12,
    Basilisk = 13,
    Elemental = 14,
    Dwarf = 15,
}

impl Piece {
    pub const ALL: [Piece; 15] = [
        Piece::Sylph, Piece::Griffin, Piece::Dragon, Piece::Oliphant, Piece::Unicorn,
        Piece::Hero, Piece::Thief, Piece::Cleric, Piece::Mage, Piece::King,
        Piece::Paladin, Piece::Warrior, Piece::Basilisk, Piece::Elemental, Piece::Dwarf,
    ];

    /// Kind of a signed piece code; `None` for an empty cell or an unknown code.
    pub fn from_code(code: i8) -> Option<Piece> {
        let abs = code.unsigned_abs() as usize;
        if (1..=15).contains(&abs) { Some(Piece::ALL[abs - 1]) } else { None }
    }

    pub fn index(self) -> usize { self as usize }

    pub fn code(self, side: Side) -> i8 { self as i8 * side.sign() }

    pub fn letter(self) -> char {
        match self {
            Piece::Sylph => 'S',
            Piece::Griffin => 'G',
            Piece::Dragon => 'R',
            Piece::Oliphant => 'O',
            Piece::Unicorn => 'U',
            Piece::Hero => 'H',
            Piece::Thief => 'T',
            Piece::Cleric => 'C',
            Piece::Mage => 'M',
            Piece::King => 'K',
            Piece::Paladin => 'P',
            Piece::Warrior => 'W',
            Piece::Basilisk => 'B',
            Piece::Elemental => 'E',
            Piece::Dwarf => 'D',
        }
    }
}

#[inline]
pub fn pos_to_index(layer: usize, row: usize, col: usize) -> usize {
    layer * LAYER_SQUARES + row * BOARD_COLS + col
}

#[inline]
pub fn index_to_pos(index: usize) -> (usize, usize, usize) {
    let layer = index / LAYER_SQUARES;
    let rem = index % LAYER_SQUARES;
    (layer, rem / BOARD_COLS, rem % BOARD_COLS)
}

#[inline]
pub fn in_bounds(layer: i32, row: i32, col: i32) -> bool {
    (0..NUM_BOARDS as i32).contains(&layer) && (0..BOARD_ROWS as i32).contains(&row) && (0..BOARD_COLS as i32).contains(&col)
}

/// A cell address on the stacked boards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    pub layer: usize,
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(layer: usize, row: usize, col: usize) -> Self { Self { layer, row, col } }

    pub fn from_index(index: usize) -> Self {
        let (layer, row, col) = index_to_pos(index);
        Self { layer, row, col }
    }

    pub fn index(self) -> usize { pos_to_index(self.layer, self.row, self.col) }

    /// Cell at `layer` shifted by (dr, dc) from this row/col, if it is on the board.
    pub fn shifted(self, layer: usize, dr: i32, dc: i32) -> Option<Coord> {
        let (r, c) = (self.row as i32 + dr, self.col as i32 + dc);
        if in_bounds(layer as i32, r, c) { Some(Coord::new(layer, r as usize, c as usize)) } else { None }
    }

    /// Cell displaced by (dl, dr, dc), if it is on the board.
    pub fn offset(self, dl: i32, dr: i32, dc: i32) -> Option<Coord> {
        let l = self.layer as i32 + dl;
        if !(0..NUM_BOARDS as i32).contains(&l) { return None; }
        self.shifted(l as usize, dr, dc)
    }
}

/// Flat array of signed piece codes: 0 empty, +1..+15 Gold, -1..-15 Scarlet.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [i8; TOTAL_SQUARES],
}

impl Default for Board {
    fn default() -> Self { Self::empty() }
}

impl Board {
    pub fn empty() -> Self { Self { cells: [0; TOTAL_SQUARES] } }

    pub fn initial() -> Self { layout::create_initial_board() }

    #[inline]
    pub fn get(&self, index: usize) -> i8 { self.cells[index] }

    #[inline]
    pub fn set(&mut self, index: usize, code: i8) { self.cells[index] = code; }

    pub fn place(&mut self, coord: Coord, piece: Piece, side: Side) { self.cells[coord.index()] = piece.code(side); }

    pub fn clear(&mut self, index: usize) { self.cells[index] = 0; }

    pub fn cells(&self) -> &[i8; TOTAL_SQUARES] { &self.cells }

    #[inline]
    pub fn is_empty(&self, index: usize) -> bool { self.cells[index] == 0 }

    /// True when the cell holds a piece of the side opposing `side`.
    #[inline]
    pub fn is_enemy(&self, index: usize, side: Side) -> bool { (self.cells[index] as i32) * (side.sign() as i32) < 0 }

    #[inline]
    pub fn is_friend(&self, index: usize, side: Side) -> bool { (self.cells[index] as i32) * (side.sign() as i32) > 0 }

    /// Empty or enemy-occupied.
    #[inline]
    pub fn is_open(&self, index: usize, side: Side) -> bool { !self.is_friend(index, side) }

    pub fn count(&self, code: i8) -> usize { self.cells.iter().filter(|&&c| c == code).count() }

    pub fn find(&self, code: i8) -> Option<usize> { self.cells.iter().position(|&c| c == code) }

    /// Occupied cells as (index, code).
    pub fn pieces(&self) -> impl Iterator<Item = (usize, i8)> + '_ {
        self.cells.iter().enumerate().filter(|(_, &c)| c != 0).map(|(i, &c)| (i, c))
    }

    pub fn to_bytes(&self) -> [u8; TOTAL_SQUARES] {
        let mut out = [0u8; TOTAL_SQUARES];
        for (o, &c) in out.iter_mut().zip(self.cells.iter()) { *o = c as u8; }
        out
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({} pieces)", self.pieces().count())
    }
}
