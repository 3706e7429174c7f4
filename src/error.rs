use thiserror::Error;

/// Errors raised by the game session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("illegal move {from} -> {to}: {reason}")]
    IllegalMove { from: usize, to: usize, reason: &'static str },

    #[error("game is already over")]
    GameOver,
}

/// Errors raised while building evaluator weights.
#[derive(Debug, Error)]
pub enum WeightsError {
    #[error("weight vector has {got} values, expected {expected}")]
    Length { expected: usize, got: usize },

    #[error("failed to read weights: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse weights: {0}")]
    Json(#[from] serde_json::Error),
}
