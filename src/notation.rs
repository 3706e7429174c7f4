// Move notation: "<letter><board><file><rank><sep><board><file><rank>", e.g. "W2f2-2f3".
// Boards count 1-3 from the top, files a-l across columns, ranks count from the far row.
use crate::board::{index_to_pos, pos_to_index, Board, Piece, Position, BOARD_COLS, BOARD_ROWS, NUM_BOARDS, TOTAL_SQUARES};
use crate::movegen::Move;

/// Uppercase for Gold, lowercase for Scarlet, '?' for an empty or unknown code.
pub fn piece_letter(code: i8) -> char {
    match Piece::from_code(code) {
        Some(p) if code > 0 => p.letter(),
        Some(p) => p.letter().to_ascii_lowercase(),
        None => '?',
    }
}

pub fn index_to_algebraic(index: usize) -> String {
    let (layer, row, col) = index_to_pos(index);
    let file = (b'a' + col as u8) as char;
    format!("{}{}{}", layer + 1, file, BOARD_ROWS - row)
}

pub fn algebraic_to_index(s: &str) -> Option<usize> {
    let b = s.as_bytes();
    if b.len() != 3 { return None; }
    let layer = (b[0] as char).to_digit(10)? as usize;
    let col = b[1].checked_sub(b'a')? as usize;
    let rank = (b[2] as char).to_digit(10)? as usize;
    if !(1..=NUM_BOARDS).contains(&layer) || col >= BOARD_COLS || !(1..=BOARD_ROWS).contains(&rank) { return None; }
    let idx = pos_to_index(layer - 1, BOARD_ROWS - rank, col);
    debug_assert!(idx < TOTAL_SQUARES);
    Some(idx)
}

/// Notation of `mv` as played from `board` (the mover is read from the source cell).
pub fn move_notation(board: &Board, mv: Move) -> String {
    format!("{}{}", piece_letter(board.get(mv.from)), mv)
}

/// Resolves text such as "2f2-2f3", "W2f2-2f3" or "2f2x2f3" against the legal moves of `pos`.
pub fn parse_move(pos: &Position, text: &str) -> Option<Move> {
    let t = text.trim();
    let t = match t.chars().next() { Some(c) if c.is_ascii_alphabetic() => &t[1..], _ => t };
    if t.len() != 7 || !t.is_ascii() { return None; }
    let (from, rest) = t.split_at(3);
    let (sep, to) = rest.split_at(1);
    if sep != "-" && sep != "x" { return None; }
    let (from, to) = (algebraic_to_index(from)?, algebraic_to_index(to)?);
    pos.legal_moves_from(from).into_iter().find(|m| m.to == to)
}
