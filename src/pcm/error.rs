use thiserror::Error;

/// Configuration rejected by [`AnalyzerConfig::open`](super::AnalyzerConfig::open).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerError {
    #[error("bad analyzer parameters: {0}")]
    BadParameters(String),
}

/// Errors from [`parse_mime_type`](super::parse_mime_type).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MimeError {
    #[error("unrecognized MIME type {0:?}")]
    Unsupported(String),

    #[error("invalid {name} {value:?}")]
    InvalidParameter { name: String, value: String },

    #[error("incomplete header (need rate and channels): {0:?}")]
    Incomplete(String),
}
