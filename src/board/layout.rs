use super::{pos_to_index, Board, Piece, Side, BOARD_COLS, GROUND, SKY, UNDERWORLD};

// Back rank of the ground board, left to right, identical for both sides.
const GROUND_BACK_RANK: [Piece; BOARD_COLS] = [
    Piece::Oliphant, Piece::Unicorn, Piece::Hero, Piece::Thief,
    Piece::Cleric, Piece::Mage, Piece::King, Piece::Paladin,
    Piece::Thief, Piece::Hero, Piece::Unicorn, Piece::Oliphant,
];

/// Starting layout. Scarlet occupies rows 0-1 of every layer, Gold rows 6-7.
pub fn create_initial_board() -> Board {
    let mut b = Board::empty();
    let mut put = |layer: usize, row: usize, col: usize, piece: Piece, side: Side| {
        b.set(pos_to_index(layer, row, col), piece.code(side));
    };

    for (side, back, front) in [(Side::Scarlet, 0, 1), (Side::Gold, 7, 6)] {
        // Sky: griffins flank the dragon, sylphs on every even file.
        put(SKY, back, 2, Piece::Griffin, side);
        put(SKY, back, 6, Piece::Dragon, side);
        put(SKY, back, 10, Piece::Griffin, side);
        for col in (0..BOARD_COLS).step_by(2) { put(SKY, front, col, Piece::Sylph, side); }

        for (col, &piece) in GROUND_BACK_RANK.iter().enumerate() { put(GROUND, back, col, piece, side); }
        for col in 0..BOARD_COLS { put(GROUND, front, col, Piece::Warrior, side); }

        // Underworld: basilisks flank the elemental, dwarves on every odd file.
        put(UNDERWORLD, back, 2, Piece::Basilisk, side);
        put(UNDERWORLD, back, 6, Piece::Elemental, side);
        put(UNDERWORLD, back, 10, Piece::Basilisk, side);
        for col in (1..BOARD_COLS).step_by(2) { put(UNDERWORLD, front, col, Piece::Dwarf, side); }
    }
    b
}
