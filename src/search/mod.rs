pub mod alphabeta;
pub mod eval;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{SearchParams, SearchResult, Searcher};
pub use eval::{evaluate, Weights};
