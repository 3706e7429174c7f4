// Per-search transposition table. Owned by one `Searcher`, never shared across threads.
use crate::movegen::Move;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Clone, Copy, Debug)]
pub struct Entry {
    pub key: u64,
    pub depth: u32,
    pub score: f64,
    pub best: Option<Move>,
    pub bound: Bound,
    pub gen: u32,
}

const WAYS: usize = 4;

#[derive(Default, Clone, Copy)]
struct Bucket {
    slots: [Option<Entry>; WAYS],
}

impl Bucket {
    fn find(&self, key: u64) -> Option<Entry> { self.slots.iter().flatten().find(|e| e.key == key).copied() }

    fn occupied(&self) -> usize { self.slots.iter().flatten().count() }

    /// Way that `incoming` should overwrite, or `None` when a deeper result for the same key stays.
    fn victim(&self, incoming: &Entry) -> Option<usize> {
        let same = self.slots.iter().position(|s| s.is_some_and(|cur| cur.key == incoming.key));
        if let Some(i) = same {
            return self.slots[i].filter(|cur| incoming.depth >= cur.depth).map(|_| i);
        }
        if let Some(i) = self.slots.iter().position(Option::is_none) { return Some(i); }
        // Full: shallowest first, older generation on ties.
        (0..WAYS).min_by_key(|&i| self.slots[i].map_or((0, 0), |cur| (cur.depth, cur.gen)))
    }
}

#[derive(Default)]
pub struct Tt {
    buckets: Vec<Bucket>,
    gen: u32,
}

impl Tt {
    pub fn new() -> Self { Self::default() }

    pub fn with_capacity(entries: usize) -> Self {
        let mut t = Self::new();
        t.set_capacity_entries(entries);
        t
    }

    pub fn clear(&mut self) {
        self.buckets.fill(Bucket::default());
        self.gen = 0;
    }

    /// Maps a key onto `0..buckets` by its high bits.
    fn slot_of(&self, key: u64) -> usize { ((u128::from(key) * self.buckets.len() as u128) >> 64) as usize }

    pub fn get(&self, key: u64) -> Option<Entry> {
        if self.buckets.is_empty() { return None; }
        self.buckets[self.slot_of(key)].find(key)
    }

    pub fn len(&self) -> usize { self.buckets.iter().map(Bucket::occupied).sum() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn capacity(&self) -> usize { self.buckets.len() * WAYS }

    /// Resizes to hold at least `cap` entries (one bucket minimum) and drops every stored entry.
    pub fn set_capacity_entries(&mut self, cap: usize) {
        self.buckets = vec![Bucket::default(); cap.div_ceil(WAYS).max(1)];
    }

    pub fn put(&mut self, e: Entry) {
        if self.buckets.is_empty() { return; }
        let e = Entry { gen: self.gen, ..e };
        let idx = self.slot_of(e.key);
        let bucket = &mut self.buckets[idx];
        if let Some(way) = bucket.victim(&e) { bucket.slots[way] = Some(e); }
    }

    /// Ages existing entries; called once per iterative-deepening iteration.
    pub fn bump_generation(&mut self) { self.gen = self.gen.wrapping_add(1); }
}
