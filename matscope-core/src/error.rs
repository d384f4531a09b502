//! Error types for matscope-core

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias using matscope Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for matscope
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Configuration error: {0}")]
    #[diagnostic(code(matscope::config))]
    Config(String),

    #[error("IO error: {0}")]
    #[diagnostic(code(matscope::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(matscope::serde))]
    Serde(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    #[diagnostic(code(matscope::toml))]
    Toml(#[from] toml::de::Error),

    /// The data source could not be reached or returned malformed records.
    /// An empty result set is not an error.
    #[error("Data source error: {0}")]
    #[diagnostic(code(matscope::data_source))]
    DataSource(String),

    /// The document library failed while laying out or writing a report.
    #[error("Report rendering error: {0}")]
    #[diagnostic(code(matscope::render))]
    Render(String),

    #[error("Invalid filter: {0}")]
    #[diagnostic(code(matscope::filter))]
    InvalidFilter(String),
}
