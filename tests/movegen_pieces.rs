use dragonchess::board::{pos_to_index, Board, Coord, Piece, Side, GROUND, SKY, UNDERWORLD};
use dragonchess::movegen::{legal_moves_from, pseudo_moves, MoveFlag};
use dragonchess::notation::move_notation;
use dragonchess::Position;
use std::collections::{BTreeSet, HashSet};

fn lone(piece: Piece, side: Side, layer: usize, row: usize, col: usize) -> (Board, usize) {
    let mut b = Board::empty();
    let idx = pos_to_index(layer, row, col);
    b.set(idx, piece.code(side));
    (b, idx)
}

fn moves(board: Board, side: Side, from: usize) -> Vec<(usize, MoveFlag)> {
    legal_moves_from(&Position::new(board, side), from).into_iter().map(|m| (m.to, m.flag)).collect()
}

fn dests(board: Board, side: Side, from: usize) -> BTreeSet<usize> {
    moves(board, side, from).into_iter().map(|(to, _)| to).collect()
}

#[test]
fn sylph_on_sky() {
    let (mut b, at) = lone(Piece::Sylph, Side::Gold, SKY, 3, 3);
    let mut got = moves(b, Side::Gold, at);
    got.sort();
    let mut want = vec![(pos_to_index(SKY, 2, 2), MoveFlag::Quiet), (pos_to_index(SKY, 2, 4), MoveFlag::Quiet)];
    want.sort();
    assert_eq!(got, want);

    b.set(pos_to_index(SKY, 2, 3), Piece::Warrior.code(Side::Scarlet));
    b.set(pos_to_index(GROUND, 3, 3), Piece::Warrior.code(Side::Scarlet));
    let got = moves(b, Side::Gold, at);
    assert_eq!(got.len(), 4);
    assert!(got.contains(&(pos_to_index(SKY, 2, 3), MoveFlag::Capture)));
    assert!(got.contains(&(pos_to_index(GROUND, 3, 3), MoveFlag::Capture)));
}

#[test]
fn sylph_on_ground_returns_to_sky() {
    let (b, at) = lone(Piece::Sylph, Side::Gold, GROUND, 3, 3);
    let d = dests(b, Side::Gold, at);
    assert!(d.contains(&pos_to_index(SKY, 3, 3)));
    for col in (0..12).step_by(2) { assert!(d.contains(&pos_to_index(SKY, 7, col)), "home cell col {col}"); }
    assert_eq!(d.len(), 7);
}

#[test]
fn warrior_steps_forward_and_captures_diagonally() {
    let (mut b, at) = lone(Piece::Warrior, Side::Gold, GROUND, 4, 5);
    assert_eq!(moves(b, Side::Gold, at), vec![(pos_to_index(GROUND, 3, 5), MoveFlag::Quiet)]);

    b.set(pos_to_index(GROUND, 3, 4), Piece::Dwarf.code(Side::Scarlet));
    b.set(pos_to_index(GROUND, 3, 6), Piece::Dwarf.code(Side::Scarlet));
    let got = moves(b, Side::Gold, at);
    assert_eq!(got.len(), 3);
    assert!(got.contains(&(pos_to_index(GROUND, 3, 4), MoveFlag::Capture)));
    assert!(got.contains(&(pos_to_index(GROUND, 3, 6), MoveFlag::Capture)));

    // Friendly pieces are never captured, and an occupied forward cell blocks the step.
    b.set(pos_to_index(GROUND, 3, 4), Piece::Dwarf.code(Side::Gold));
    b.set(pos_to_index(GROUND, 3, 5), Piece::Dwarf.code(Side::Scarlet));
    assert_eq!(moves(b, Side::Gold, at), vec![(pos_to_index(GROUND, 3, 6), MoveFlag::Capture)]);
}

#[test]
fn scarlet_warrior_moves_down_the_board() {
    let (b, at) = lone(Piece::Warrior, Side::Scarlet, GROUND, 4, 5);
    assert_eq!(moves(b, Side::Scarlet, at), vec![(pos_to_index(GROUND, 5, 5), MoveFlag::Quiet)]);
}

#[test]
fn unicorn_has_eight_jumps_from_the_centre() {
    let (b, at) = lone(Piece::Unicorn, Side::Gold, GROUND, 4, 5);
    assert_eq!(dests(b, Side::Gold, at).len(), 8);
    let (b, at) = lone(Piece::Unicorn, Side::Gold, GROUND, 0, 0);
    assert_eq!(dests(b, Side::Gold, at).len(), 2);
}

#[test]
fn dragon_slides_and_strikes_afar() {
    let (mut b, at) = lone(Piece::Dragon, Side::Gold, SKY, 4, 5);
    let d = dests(b, Side::Gold, at);
    assert_eq!(d.len(), 18);
    // First diagonal slide steps coincide with neighbour steps and are listed once.
    assert_eq!(moves(b, Side::Gold, at).len(), 18);
    assert!(d.contains(&pos_to_index(SKY, 0, 1)));
    assert!(d.contains(&pos_to_index(SKY, 7, 8)));

    b.set(pos_to_index(GROUND, 4, 5), Piece::Warrior.code(Side::Scarlet));
    b.set(pos_to_index(GROUND, 3, 5), Piece::Warrior.code(Side::Scarlet));
    b.set(pos_to_index(GROUND, 3, 4), Piece::Warrior.code(Side::Scarlet));
    let got = moves(b, Side::Gold, at);
    assert!(got.contains(&(pos_to_index(GROUND, 4, 5), MoveFlag::Afar)));
    assert!(got.contains(&(pos_to_index(GROUND, 3, 5), MoveFlag::Afar)));
    assert!(!got.iter().any(|&(to, _)| to == pos_to_index(GROUND, 3, 4)));
}

#[test]
fn griffin_jumps_and_descends() {
    let (b, at) = lone(Piece::Griffin, Side::Gold, SKY, 4, 5);
    let d = dests(b, Side::Gold, at);
    assert_eq!(d.len(), 12);
    assert!(d.contains(&pos_to_index(SKY, 1, 3)));
    assert!(d.contains(&pos_to_index(GROUND, 5, 6)));
}

#[test]
fn ground_pieces_reach_other_layers() {
    let (b, at) = lone(Piece::Hero, Side::Gold, GROUND, 4, 5);
    assert_eq!(dests(b, Side::Gold, at).len(), 16);

    let (b, at) = lone(Piece::Cleric, Side::Gold, GROUND, 4, 5);
    let d = dests(b, Side::Gold, at);
    assert_eq!(d.len(), 10);
    assert!(d.contains(&pos_to_index(SKY, 4, 5)) && d.contains(&pos_to_index(UNDERWORLD, 4, 5)));

    let (b, at) = lone(Piece::King, Side::Gold, SKY, 2, 2);
    assert_eq!(dests(b, Side::Gold, at).into_iter().collect::<Vec<_>>(), vec![pos_to_index(GROUND, 2, 2)]);

    let (b, at) = lone(Piece::Mage, Side::Gold, SKY, 4, 5);
    assert_eq!(dests(b, Side::Gold, at).len(), 6);
}

#[test]
fn paladin_three_dimensional_jumps() {
    let (b, at) = lone(Piece::Paladin, Side::Gold, GROUND, 4, 5);
    let got = moves(b, Side::Gold, at);
    let jumps: Vec<usize> = got.iter().filter(|(_, f)| *f == MoveFlag::ThreeD).map(|&(to, _)| to).collect();
    assert_eq!(jumps.len(), 8);
    assert!(jumps.contains(&pos_to_index(SKY, 2, 5)));
    assert!(jumps.contains(&pos_to_index(UNDERWORLD, 4, 7)));
    assert_eq!(got.len(), 24);
}

#[test]
fn elemental_strikes_the_ground_only_at_enemies() {
    let (mut b, at) = lone(Piece::Elemental, Side::Gold, UNDERWORLD, 4, 5);
    assert_eq!(moves(b, Side::Gold, at).len(), 12);
    let raw = pseudo_moves(Piece::Elemental, Coord::from_index(at), &b, Side::Gold);
    assert_eq!(raw.iter().filter(|m| m.flag == MoveFlag::Capture).count(), 4);

    let target = pos_to_index(GROUND, 3, 5);
    b.set(target, Piece::Warrior.code(Side::Scarlet));
    assert!(moves(b, Side::Gold, at).contains(&(target, MoveFlag::Capture)));

    // A piece on the intermediate underworld cell blocks the strike.
    b.set(pos_to_index(UNDERWORLD, 3, 5), Piece::Dwarf.code(Side::Gold));
    assert!(!dests(b, Side::Gold, at).contains(&target));
}

#[test]
fn basilisk_captures_forward_and_retreats_quietly() {
    let (mut b, at) = lone(Piece::Basilisk, Side::Gold, UNDERWORLD, 4, 5);
    assert_eq!(moves(b, Side::Gold, at), vec![(pos_to_index(UNDERWORLD, 5, 5), MoveFlag::Quiet)]);
    b.set(pos_to_index(UNDERWORLD, 3, 5), Piece::Dwarf.code(Side::Scarlet));
    let got = moves(b, Side::Gold, at);
    assert_eq!(got.len(), 2);
    assert!(got.contains(&(pos_to_index(UNDERWORLD, 3, 5), MoveFlag::Ambiguous)));

    let take = legal_moves_from(&Position::new(b, Side::Gold), at).into_iter().find(|m| m.to == pos_to_index(UNDERWORLD, 3, 5));
    assert_eq!(take.map(|m| move_notation(&b, m)), Some("B3f4-3f5".to_string()));
}

#[test]
fn dwarf_steps_back_at_the_far_edge() {
    let (b, at) = lone(Piece::Dwarf, Side::Gold, UNDERWORLD, 4, 5);
    let d = dests(b, Side::Gold, at);
    assert_eq!(d.len(), 3);
    assert!(!d.contains(&pos_to_index(UNDERWORLD, 5, 5)));

    let (b, at) = lone(Piece::Dwarf, Side::Gold, UNDERWORLD, 0, 5);
    let d = dests(b, Side::Gold, at);
    assert_eq!(d.len(), 3);
    assert!(d.contains(&pos_to_index(UNDERWORLD, 1, 5)));
}

#[test]
fn opening_moves_never_land_on_friends() {
    let pos = Position::startpos();
    for m in pos.legal_moves() {
        assert!(pos.board.is_friend(m.from, pos.turn));
        assert!(!pos.board.is_friend(m.to, pos.turn), "move {m} lands on a friend");
    }
    // Squares of the side not to move yield nothing.
    assert!(pos.legal_moves_from(pos_to_index(GROUND, 1, 5)).is_empty());
    assert!(pos.legal_moves_from(9999).is_empty());
}

#[test]
fn opening_moves_are_distinct() {
    let pos = Position::startpos();
    let all = pos.legal_moves();
    let distinct: HashSet<_> = all.iter().copied().collect();
    assert_eq!(distinct.len(), all.len());
}

#[test]
fn thief_slide_stops_at_the_first_occupied_cell() {
    let (mut b, at) = lone(Piece::Thief, Side::Gold, GROUND, 4, 5);
    b.set(pos_to_index(GROUND, 2, 3), Piece::Warrior.code(Side::Gold));
    b.set(pos_to_index(GROUND, 6, 7), Piece::Warrior.code(Side::Scarlet));
    let got = moves(b, Side::Gold, at);
    let d = dests(b, Side::Gold, at);
    assert_eq!(d.len(), 10);
    assert!(d.contains(&pos_to_index(GROUND, 3, 4)));
    assert!(!d.contains(&pos_to_index(GROUND, 2, 3)));
    assert!(!d.contains(&pos_to_index(GROUND, 1, 2)));
    assert!(d.contains(&pos_to_index(GROUND, 0, 9)));
    assert!(d.contains(&pos_to_index(GROUND, 7, 2)));
    assert!(got.contains(&(pos_to_index(GROUND, 6, 7), MoveFlag::Ambiguous)));
    assert!(!d.contains(&pos_to_index(GROUND, 7, 8)));
}

#[test]
fn elemental_on_ground_descends_past_an_empty_neighbour() {
    let (mut b, at) = lone(Piece::Elemental, Side::Gold, GROUND, 4, 5);
    let mut got = moves(b, Side::Gold, at);
    got.sort();
    let mut want: Vec<_> = [(5, 5), (3, 5), (4, 6), (4, 4)].iter().map(|&(r, c)| (pos_to_index(UNDERWORLD, r, c), MoveFlag::Quiet)).collect();
    want.sort();
    assert_eq!(got, want);

    b.set(pos_to_index(UNDERWORLD, 3, 5), Piece::Dwarf.code(Side::Scarlet));
    b.set(pos_to_index(UNDERWORLD, 5, 5), Piece::Dwarf.code(Side::Gold));
    b.set(pos_to_index(GROUND, 4, 4), Piece::Warrior.code(Side::Gold));
    let mut got = moves(b, Side::Gold, at);
    got.sort();
    let mut want = vec![(pos_to_index(UNDERWORLD, 3, 5), MoveFlag::Capture), (pos_to_index(UNDERWORLD, 4, 6), MoveFlag::Quiet)];
    want.sort();
    assert_eq!(got, want);
}

#[test]
fn elemental_two_step_needs_an_empty_intermediate() {
    let (mut b, at) = lone(Piece::Elemental, Side::Gold, UNDERWORLD, 4, 5);
    b.set(pos_to_index(UNDERWORLD, 3, 5), Piece::Dwarf.code(Side::Scarlet));
    b.set(pos_to_index(UNDERWORLD, 4, 6), Piece::Dwarf.code(Side::Gold));
    let got = moves(b, Side::Gold, at);
    let d = dests(b, Side::Gold, at);
    assert!(got.contains(&(pos_to_index(UNDERWORLD, 3, 5), MoveFlag::Ambiguous)));
    assert!(!d.contains(&pos_to_index(UNDERWORLD, 2, 5)));
    assert!(!d.contains(&pos_to_index(UNDERWORLD, 4, 6)));
    assert!(!d.contains(&pos_to_index(UNDERWORLD, 4, 7)));
    for (r, c) in [(5, 5), (6, 5), (4, 4), (4, 3)] { assert!(d.contains(&pos_to_index(UNDERWORLD, r, c)), "({r}, {c})"); }
}

#[test]
fn dwarf_moves_between_ground_and_underworld() {
    let (b, at) = lone(Piece::Dwarf, Side::Gold, GROUND, 4, 5);
    let got = moves(b, Side::Gold, at);
    assert_eq!(got.len(), 4);
    assert!(got.contains(&(pos_to_index(UNDERWORLD, 4, 5), MoveFlag::Quiet)));

    let (mut b, at) = lone(Piece::Dwarf, Side::Gold, UNDERWORLD, 4, 5);
    b.set(pos_to_index(GROUND, 4, 5), Piece::Warrior.code(Side::Scarlet));
    let got = moves(b, Side::Gold, at);
    assert_eq!(got.len(), 4);
    assert!(got.contains(&(pos_to_index(GROUND, 4, 5), MoveFlag::Capture)));

    b.set(pos_to_index(GROUND, 4, 5), Piece::Warrior.code(Side::Gold));
    assert!(!dests(b, Side::Gold, at).contains(&pos_to_index(GROUND, 4, 5)));
}

#[test]
fn griffin_on_ground_steps_diagonally_on_two_boards() {
    let (b, at) = lone(Piece::Griffin, Side::Gold, GROUND, 4, 5);
    let mut want = BTreeSet::new();
    for layer in [GROUND, SKY] {
        for (r, c) in [(3, 4), (3, 6), (5, 4), (5, 6)] { want.insert(pos_to_index(layer, r, c)); }
    }
    assert_eq!(dests(b, Side::Gold, at), want);
    let (b, at) = lone(Piece::Griffin, Side::Gold, UNDERWORLD, 4, 5);
    assert!(dests(b, Side::Gold, at).is_empty());
}

#[test]
fn mage_on_ground_slides_and_changes_board() {
    let (mut b, at) = lone(Piece::Mage, Side::Gold, GROUND, 4, 5);
    let d = dests(b, Side::Gold, at);
    assert_eq!(d.len(), 34);
    for idx in [pos_to_index(SKY, 4, 5), pos_to_index(UNDERWORLD, 4, 5), pos_to_index(GROUND, 4, 11), pos_to_index(GROUND, 0, 5), pos_to_index(GROUND, 7, 8)] {
        assert!(d.contains(&idx));
    }

    b.set(pos_to_index(GROUND, 4, 8), Piece::Warrior.code(Side::Scarlet));
    b.set(pos_to_index(SKY, 4, 5), Piece::Sylph.code(Side::Gold));
    let d = dests(b, Side::Gold, at);
    assert!(d.contains(&pos_to_index(GROUND, 4, 8)));
    assert!(!d.contains(&pos_to_index(GROUND, 4, 9)));
    assert!(!d.contains(&pos_to_index(SKY, 4, 5)));
    assert_eq!(d.len(), 30);
}

#[test]
fn king_on_ground_steps_and_changes_board() {
    let (b, at) = lone(Piece::King, Side::Gold, GROUND, 4, 5);
    let d = dests(b, Side::Gold, at);
    assert_eq!(d.len(), 10);
    assert!(d.contains(&pos_to_index(SKY, 4, 5)));
    assert!(d.contains(&pos_to_index(UNDERWORLD, 4, 5)));
    assert!(d.contains(&pos_to_index(GROUND, 3, 4)));

    let (b, at) = lone(Piece::King, Side::Gold, UNDERWORLD, 4, 5);
    assert_eq!(dests(b, Side::Gold, at).into_iter().collect::<Vec<_>>(), vec![pos_to_index(GROUND, 4, 5)]);
}

#[test]
fn hero_off_ground_returns_diagonally() {
    let want: BTreeSet<usize> = [(3, 4), (3, 6), (5, 4), (5, 6)].iter().map(|&(r, c)| pos_to_index(GROUND, r, c)).collect();
    for layer in [SKY, UNDERWORLD] {
        let (b, at) = lone(Piece::Hero, Side::Gold, layer, 4, 5);
        assert_eq!(dests(b, Side::Gold, at), want, "hero on layer {layer}");
    }
}

#[test]
fn scarlet_sylph_returns_to_odd_home_cells() {
    let (b, at) = lone(Piece::Sylph, Side::Scarlet, GROUND, 3, 3);
    let d = dests(b, Side::Scarlet, at);
    assert!(d.contains(&pos_to_index(SKY, 3, 3)));
    for col in (1..12).step_by(2) { assert!(d.contains(&pos_to_index(SKY, 0, col)), "home cell col {col}"); }
    assert_eq!(d.len(), 7);

    // Standing under its own home cell, that cell is reached by the plain step up only.
    let (b, at) = lone(Piece::Sylph, Side::Scarlet, GROUND, 0, 3);
    let got = moves(b, Side::Scarlet, at);
    assert_eq!(got.len(), 6);
    assert!(got.contains(&(pos_to_index(SKY, 0, 3), MoveFlag::Quiet)));
}
