use dragonchess::board::{pos_to_index, GROUND, SKY, UNDERWORLD};
use dragonchess::notation::{algebraic_to_index, index_to_algebraic, move_notation, parse_move, piece_letter};
use dragonchess::{Game, Position};

#[test]
fn piece_letters_follow_side_case() {
    assert_eq!(piece_letter(1), 'S');
    assert_eq!(piece_letter(-1), 's');
    assert_eq!(piece_letter(3), 'R');
    assert_eq!(piece_letter(-10), 'k');
    assert_eq!(piece_letter(15), 'D');
    assert_eq!(piece_letter(0), '?');
}

#[test]
fn algebraic_squares() {
    assert_eq!(index_to_algebraic(pos_to_index(GROUND, 6, 5)), "2f2");
    assert_eq!(index_to_algebraic(pos_to_index(SKY, 0, 0)), "1a8");
    assert_eq!(index_to_algebraic(pos_to_index(UNDERWORLD, 7, 11)), "3l1");
    assert_eq!(algebraic_to_index("2f2"), Some(pos_to_index(GROUND, 6, 5)));
    assert_eq!(algebraic_to_index("3m1"), None);
}

#[test]
fn move_text_uses_capture_separator() {
    let mut g = Game::new();
    let mv = g.legal_moves_from(pos_to_index(GROUND, 6, 5))[0];
    assert_eq!(move_notation(g.board(), mv), "W2f2-2f3");
    g.apply_move(mv).unwrap();
    assert_eq!(g.notations(), &["W2f2-2f3".to_string()]);
}

#[test]
fn parse_resolves_every_opening_move() {
    let pos = Position::startpos();
    for m in pos.legal_moves() {
        let text = m.to_string();
        let got = parse_move(&pos, &text).unwrap_or_else(|| panic!("could not parse {text}"));
        assert_eq!((got.from, got.to), (m.from, m.to));
    }
    let w = parse_move(&pos, "W2f2-2f3").expect("lettered move");
    assert_eq!(w.to, pos_to_index(GROUND, 5, 5));
    for bad in ["", "2f2", "2f2-2f5", "2f2+2f3", "2f7-2f6", "ü2f2-2f3"] {
        assert!(parse_move(&pos, bad).is_none(), "{bad:?} parsed");
    }
}
