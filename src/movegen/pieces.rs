// Per-piece candidate generation. Every generator looks only at the layers its
// piece may use; occupancy is checked inline where the geometry depends on it
// (slides, steps that need an empty intermediate) and otherwise left to `accepts`.
use super::{Move, MoveFlag};
use crate::board::{Board, Coord, Piece, Side, BOARD_COLS, BOARD_ROWS, GROUND, SKY, UNDERWORLD};

const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const NEIGHBOURS: [(i32, i32); 8] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];
const KNIGHT: [(i32, i32); 8] = [(2, 1), (2, -1), (-2, 1), (-2, -1), (1, 2), (1, -2), (-1, 2), (-1, -2)];
const GRIFFIN_JUMPS: [(i32, i32); 8] = [(3, 2), (3, -2), (-3, 2), (-3, -2), (2, 3), (2, -3), (-2, 3), (-2, -3)];

/// Appends the candidates of `piece` on `at` to `out`.
pub fn generate(piece: Piece, at: Coord, board: &Board, side: Side, out: &mut Vec<Move>) {
    let mut g = Gen { board, side, at, from: at.index(), out };
    match piece {
        Piece::Sylph => sylph(&mut g),
        Piece::Griffin => griffin(&mut g),
        Piece::Dragon => dragon(&mut g),
        Piece::Oliphant => oliphant(&mut g),
        Piece::Unicorn => unicorn(&mut g),
        Piece::Hero => hero(&mut g),
        Piece::Thief => thief(&mut g),
        Piece::Cleric => cleric(&mut g),
        Piece::Mage => mage(&mut g),
        Piece::King => king(&mut g),
        Piece::Paladin => paladin(&mut g),
        Piece::Warrior => warrior(&mut g),
        Piece::Basilisk => basilisk(&mut g),
        Piece::Elemental => elemental(&mut g),
        Piece::Dwarf => dwarf(&mut g),
    }
}

struct Gen<'a> {
    board: &'a Board,
    side: Side,
    at: Coord,
    from: usize,
    out: &'a mut Vec<Move>,
}

impl Gen<'_> {
    fn emit(&mut self, to: Coord, flag: MoveFlag) { self.out.push(Move::new(self.from, to.index(), flag)); }

    fn cell(&self, layer: usize, dr: i32, dc: i32) -> Option<Coord> { self.at.shifted(layer, dr, dc) }

    fn empty(&self, c: Coord) -> bool { self.board.is_empty(c.index()) }
    fn enemy(&self, c: Coord) -> bool { self.board.is_enemy(c.index(), self.side) }
    fn open(&self, c: Coord) -> bool { self.board.is_open(c.index(), self.side) }

    fn quiet(&mut self, layer: usize, dr: i32, dc: i32) {
        if let Some(c) = self.cell(layer, dr, dc) { if self.empty(c) { self.emit(c, MoveFlag::Quiet); } }
    }

    fn capture(&mut self, layer: usize, dr: i32, dc: i32) {
        if let Some(c) = self.cell(layer, dr, dc) { if self.enemy(c) { self.emit(c, MoveFlag::Capture); } }
    }

    fn afar(&mut self, layer: usize, dr: i32, dc: i32) {
        if let Some(c) = self.cell(layer, dr, dc) { if self.enemy(c) { self.emit(c, MoveFlag::Afar); } }
    }

    /// Move-or-capture onto a cell that is empty or enemy-held.
    fn contact(&mut self, layer: usize, dr: i32, dc: i32) {
        if let Some(c) = self.cell(layer, dr, dc) { if self.open(c) { self.emit(c, MoveFlag::Ambiguous); } }
    }

    fn contacts(&mut self, layer: usize, offsets: &[(i32, i32)]) {
        for &(dr, dc) in offsets { self.contact(layer, dr, dc); }
    }

    /// Unlimited slide on the current layer; stops on the first occupied cell, taking it if enemy.
    fn slide(&mut self, dr: i32, dc: i32) {
        let layer = self.at.layer;
        let mut step = 1;
        while let Some(c) = self.cell(layer, dr * step, dc * step) {
            if self.empty(c) {
                self.emit(c, MoveFlag::Ambiguous);
            } else {
                if self.enemy(c) { self.emit(c, MoveFlag::Ambiguous); }
                break;
            }
            step += 1;
        }
    }

    fn slides(&mut self, dirs: &[(i32, i32)]) {
        for &(dr, dc) in dirs { self.slide(dr, dc); }
    }

    /// Straight up/down by one layer, same row and column.
    fn vertical(&mut self, dl: i32) {
        if let Some(c) = self.at.offset(dl, 0, 0) { if self.open(c) { self.emit(c, MoveFlag::Ambiguous); } }
    }
}

fn sylph(g: &mut Gen) {
    let fwd = g.side.forward();
    match g.at.layer {
        SKY => {
            g.quiet(SKY, fwd, -1);
            g.quiet(SKY, fwd, 1);
            g.capture(SKY, fwd, 0);
            g.capture(GROUND, 0, 0);
        }
        GROUND => {
            g.quiet(SKY, 0, 0);
            // Retreat to any free home cell on the sky board.
            let (home_row, first_col) = match g.side { Side::Gold => (BOARD_ROWS - 1, 0), Side::Scarlet => (0, 1) };
            for col in (first_col..BOARD_COLS).step_by(2) {
                let c = Coord::new(SKY, home_row, col);
                if (c.row, c.col) == (g.at.row, g.at.col) { continue; }
                if g.empty(c) { g.emit(c, MoveFlag::Quiet); }
            }
        }
        _ => {}
    }
}

fn griffin(g: &mut Gen) {
    match g.at.layer {
        SKY => {
            g.contacts(SKY, &GRIFFIN_JUMPS);
            g.contacts(GROUND, &DIAGONAL);
        }
        GROUND => {
            g.contacts(GROUND, &DIAGONAL);
            g.contacts(SKY, &DIAGONAL);
        }
        _ => {}
    }
}

fn dragon(g: &mut Gen) {
    if g.at.layer != SKY { return; }
    g.contacts(SKY, &NEIGHBOURS);
    g.slides(&DIAGONAL);
    g.afar(GROUND, 0, 0);
    for (dr, dc) in ORTHOGONAL { g.afar(GROUND, dr, dc); }
}

fn oliphant(g: &mut Gen) {
    if g.at.layer == GROUND { g.slides(&ORTHOGONAL); }
}

fn unicorn(g: &mut Gen) {
    if g.at.layer == GROUND { g.contacts(GROUND, &KNIGHT); }
}

fn hero(g: &mut Gen) {
    if g.at.layer == GROUND {
        // One or two cells diagonally; the two-cell step jumps.
        for (dr, dc) in DIAGONAL {
            g.contact(GROUND, dr, dc);
            g.contact(GROUND, 2 * dr, 2 * dc);
        }
        g.contacts(SKY, &DIAGONAL);
        g.contacts(UNDERWORLD, &DIAGONAL);
    } else {
        g.contacts(GROUND, &DIAGONAL);
    }
}

fn thief(g: &mut Gen) {
    if g.at.layer == GROUND { g.slides(&DIAGONAL); }
}

fn cleric(g: &mut Gen) {
    g.contacts(g.at.layer, &NEIGHBOURS);
    match g.at.layer {
        SKY => g.vertical(1),
        GROUND => { g.vertical(-1); g.vertical(1); }
        _ => g.vertical(-1),
    }
}

fn mage(g: &mut Gen) {
    if g.at.layer == GROUND {
        g.slides(&NEIGHBOURS);
        g.vertical(-1);
        g.vertical(1);
    } else {
        // One step orthogonally, or two along the file.
        let layer = g.at.layer;
        g.contacts(layer, &ORTHOGONAL);
        g.contact(layer, 2, 0);
        g.contact(layer, -2, 0);
    }
}

fn king(g: &mut Gen) {
    if g.at.layer == GROUND {
        g.contacts(GROUND, &NEIGHBOURS);
        g.vertical(-1);
        g.vertical(1);
    } else {
        g.contact(GROUND, 0, 0);
    }
}

fn paladin(g: &mut Gen) {
    g.contacts(g.at.layer, &NEIGHBOURS);
    if g.at.layer == GROUND { g.contacts(GROUND, &KNIGHT); }
    // 3D knight jumps: sorted |deltas| are (0, 1, 2) with a layer change.
    for dl in [-2i32, -1, 1, 2] {
        for dr in -2i32..=2 {
            for dc in -2i32..=2 {
                let mut d = [dl.abs(), dr.abs(), dc.abs()];
                d.sort_unstable();
                if d != [0, 1, 2] { continue; }
                if let Some(c) = g.at.offset(dl, dr, dc) {
                    if g.open(c) { g.emit(c, MoveFlag::ThreeD); }
                }
            }
        }
    }
}

fn warrior(g: &mut Gen) {
    if g.at.layer != GROUND { return; }
    let fwd = g.side.forward();
    g.quiet(GROUND, fwd, 0);
    g.capture(GROUND, fwd, -1);
    g.capture(GROUND, fwd, 1);
}

fn basilisk(g: &mut Gen) {
    if g.at.layer != UNDERWORLD { return; }
    let fwd = g.side.forward();
    // Forward cells are attack-only.
    for dc in [0, -1, 1] {
        if let Some(c) = g.cell(UNDERWORLD, fwd, dc) { if g.enemy(c) { g.emit(c, MoveFlag::Ambiguous); } }
    }
    g.quiet(UNDERWORLD, -fwd, 0);
}

fn elemental(g: &mut Gen) {
    match g.at.layer {
        UNDERWORLD => {
            for (dr, dc) in ORTHOGONAL {
                let Some(near) = g.cell(UNDERWORLD, dr, dc) else { continue };
                if !g.open(near) { continue; }
                g.emit(near, MoveFlag::Ambiguous);
                // The two-cell step needs the intermediate cell empty.
                if !g.empty(near) { continue; }
                g.contact(UNDERWORLD, 2 * dr, 2 * dc);
            }
            for (dr, dc) in DIAGONAL { g.quiet(UNDERWORLD, dr, dc); }
            // Strike up into the ground board past an empty neighbour; occupancy is checked by the filter.
            for (dr, dc) in ORTHOGONAL {
                let Some(near) = g.cell(UNDERWORLD, dr, dc) else { continue };
                if !g.empty(near) { continue; }
                if let Some(target) = g.cell(GROUND, dr, dc) { g.emit(target, MoveFlag::Capture); }
            }
        }
        GROUND => {
            for (dr, dc) in ORTHOGONAL {
                let Some(near) = g.cell(GROUND, dr, dc) else { continue };
                if !g.empty(near) { continue; }
                let Some(target) = g.cell(UNDERWORLD, dr, dc) else { continue };
                if g.empty(target) {
                    g.emit(target, MoveFlag::Quiet);
                } else if g.enemy(target) {
                    g.emit(target, MoveFlag::Capture);
                }
            }
        }
        _ => {}
    }
}

fn dwarf(g: &mut Gen) {
    let layer = g.at.layer;
    if layer != GROUND && layer != UNDERWORLD { return; }
    let fwd = g.side.forward();
    g.quiet(layer, fwd, 0);
    g.quiet(layer, 0, -1);
    g.quiet(layer, 0, 1);
    g.capture(layer, fwd, -1);
    g.capture(layer, fwd, 1);
    if layer == UNDERWORLD {
        g.capture(GROUND, 0, 0);
    } else {
        g.quiet(UNDERWORLD, 0, 0);
    }
    // At the far edge a dwarf may step back instead.
    if g.cell(layer, fwd, 0).is_none() { g.quiet(layer, -fwd, 0); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::pos_to_index;

    fn gen(piece: Piece, at: Coord, board: &Board, side: Side) -> Vec<Move> {
        let mut out = Vec::new();
        generate(piece, at, board, side, &mut out);
        out
    }

    #[test]
    fn pieces_confined_to_ground_emit_nothing_elsewhere() {
        let b = Board::empty();
        for p in [Piece::Oliphant, Piece::Unicorn, Piece::Thief, Piece::Warrior] {
            assert!(gen(p, Coord::new(SKY, 4, 4), &b, Side::Gold).is_empty(), "{p:?} moved on sky");
            assert!(gen(p, Coord::new(UNDERWORLD, 4, 4), &b, Side::Gold).is_empty(), "{p:?} moved in underworld");
        }
        assert!(gen(Piece::Dragon, Coord::new(GROUND, 4, 4), &b, Side::Gold).is_empty());
        assert!(gen(Piece::Basilisk, Coord::new(GROUND, 4, 4), &b, Side::Gold).is_empty());
    }

    #[test]
    fn slide_stops_on_friend_and_takes_enemy() {
        let mut b = Board::empty();
        let at = Coord::new(GROUND, 4, 4);
        b.set(pos_to_index(GROUND, 4, 7), Piece::Warrior.code(Side::Gold));
        b.set(pos_to_index(GROUND, 2, 4), Piece::Warrior.code(Side::Scarlet));
        let moves = gen(Piece::Oliphant, at, &b, Side::Gold);
        let dests: Vec<usize> = moves.iter().map(|m| m.to).collect();
        assert!(dests.contains(&pos_to_index(GROUND, 4, 6)));
        assert!(!dests.contains(&pos_to_index(GROUND, 4, 7)));
        assert!(dests.contains(&pos_to_index(GROUND, 2, 4)));
        assert!(!dests.contains(&pos_to_index(GROUND, 1, 4)));
    }
}
