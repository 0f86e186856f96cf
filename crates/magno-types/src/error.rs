use thiserror::Error;

#[derive(Error, Debug)]
pub enum MagnoError {
    #[error("Solver diverged at step {step}: {message}")]
    SolverDiverged { step: usize, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Field shape mismatch for {field}: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        field: &'static str,
        expected: (usize, usize),
        got: (usize, usize),
    },

    #[error("Render error: {0}")]
    Render(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type MagnoResult<T> = Result<T, MagnoError>;
