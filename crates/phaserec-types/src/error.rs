use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconError {
    #[error("Invalid target porosity {porosity}: correlation function must imply 0 < p < 1")]
    InvalidPorosity { porosity: f64 },

    #[error("Shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("FFT error: {0}")]
    Fft(#[from] realfft::FftError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("NPY error: {0}")]
    Npy(String),
}

pub type ReconResult<T> = Result<T, ReconError>;
