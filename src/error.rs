//! Error types for this crate.
//!
//! All fallible operations return [`Result<T>`] which uses [`PipelineError`] as the error type.
//!
//! Note that [`SentimentScorer::score`](crate::sentiment::SentimentScorer::score) never returns
//! an error: model failures degrade to a neutral guess. Use
//! [`SentimentScorer::try_score`](crate::sentiment::SentimentScorer::try_score) to observe them.

use thiserror::Error;

/// A [`Result`](std::result::Result) alias using [`PipelineError`] as the error type.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// The unified error type for all crate errors.
///
/// # Example
///
/// ```rust,no_run
/// use emoji_sentiment::error::PipelineError;
///
/// fn handle_error(e: PipelineError) {
///     match &e {
///         PipelineError::Download(_) => {
///             // Network issue - retry later
///         }
///         PipelineError::Device(_) => {
///             // GPU unavailable - fall back to CPU
///         }
///         PipelineError::Model(_) => {
///             // Classifier returned something that is not a star distribution
///         }
///         PipelineError::Table(_) | PipelineError::UnsupportedFormat(_) => {
///             // Bad input file - fix and retry
///         }
///         _ => eprintln!("error: {e}"),
///     }
/// }
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PipelineError {
    /// Network or download failure. Retry may help.
    #[error("{0}")]
    Download(String),

    /// Tokenizer loading or encoding failure.
    #[error("{0}")]
    Tokenization(String),

    /// Device initialization failure. Fall back to CPU.
    #[error("{0}")]
    Device(String),

    /// The model could not be loaded or produced a malformed star distribution.
    #[error("{0}")]
    Model(String),

    /// The comment table could not be read, written, or has no usable comment column.
    #[error("{0}")]
    Table(String),

    /// Input file extension is not supported.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Internal error. Report if seen.
    #[error("{0}")]
    Unexpected(String),
}

impl From<hf_hub::api::sync::ApiError> for PipelineError {
    fn from(value: hf_hub::api::sync::ApiError) -> Self {
        PipelineError::Download(format!("HuggingFace API error: {}", value))
    }
}

impl From<candle_core::Error> for PipelineError {
    fn from(value: candle_core::Error) -> Self {
        PipelineError::Model(value.to_string())
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(value: std::io::Error) -> Self {
        PipelineError::Unexpected(value.to_string())
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(value: serde_json::Error) -> Self {
        PipelineError::Model(format!("invalid model config: {value}"))
    }
}

impl From<csv::Error> for PipelineError {
    fn from(value: csv::Error) -> Self {
        PipelineError::Table(value.to_string())
    }
}
