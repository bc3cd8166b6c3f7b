//! Error types for the leaderboard scraper.
//!
//! Timeouts of bounded waits are not errors: a wait that does not resolve is a
//! [`WaitOutcome::NotFound`](crate::browser::WaitOutcome) value and the caller picks the
//! fallback. The variants below are the failures that can abort an
//! item, a filter dimension, or the whole run.

use thiserror::Error;

/// Result type alias using our custom error types.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type that encompasses all application errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Browser automation errors
    #[error("browser error: {0}")]
    Browser(#[from] BrowserError),

    /// Table or listing extraction errors
    #[error("extraction error: {0}")]
    Parse(#[from] ParseError),

    /// Output file errors
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// The main traversal produced no athlete table at all
    #[error("no athlete data was collected")]
    NoData,

    /// The run was cancelled by a signal before the output was written
    #[error("run interrupted")]
    Interrupted,

    /// Generic errors that don't fit other categories
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable parsing failed
    #[error("failed to parse environment variables: {0}")]
    EnvParse(String),

    /// Configuration value is invalid
    #[error("invalid configuration value for {field}: {message}")]
    Invalid { field: String, message: String },
}

/// Errors raised by the browser collaborator.
#[derive(Error, Debug)]
pub enum BrowserError {
    /// The browser process could not be started
    #[error("failed to launch browser: {0}")]
    Launch(String),

    /// Navigation to a URL failed
    #[error("failed to navigate to {url}: {message}")]
    Navigation { url: String, message: String },

    /// Evaluating the DOM query script failed
    #[error("script evaluation failed: {0}")]
    Script(String),

    /// Locating or clicking an element failed
    #[error("interaction with '{selector}' failed: {message}")]
    Interaction { selector: String, message: String },

    /// Shutting the browser down failed
    #[error("failed to close browser: {0}")]
    Close(String),

    /// The session has already been closed
    #[error("browser session is closed")]
    Closed,
}

/// HTML extraction errors.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Invalid CSS selector
    #[error("invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// A body row does not line up with the header cells
    #[error("row has {found} cells but the table has {expected} headers")]
    RowWidth { expected: usize, found: usize },

    /// Unexpected HTML structure
    #[error("unexpected HTML structure: {0}")]
    UnexpectedStructure(String),
}

/// Output file errors.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write output file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl ConfigError {
    /// Creates a new environment parse error.
    pub fn env_parse(err: impl std::fmt::Display) -> Self {
        Self::EnvParse(err.to_string())
    }

    /// Creates a new invalid configuration error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl BrowserError {
    /// Creates a navigation error for the given URL.
    pub fn navigation(url: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Navigation {
            url: url.into(),
            message: err.to_string(),
        }
    }

    /// Creates an interaction error for the given selector.
    pub fn interaction(selector: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Interaction {
            selector: selector.into(),
            message: err.to_string(),
        }
    }

    /// Whether a bounded wait may keep polling after this error.
    ///
    /// Script failures happen while a document is being replaced (the execution
    /// context goes away mid-evaluation), so they only mean "not ready yet".
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Script(_))
    }
}

impl ParseError {
    /// Creates an invalid selector error.
    pub fn invalid_selector(selector: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: err.to_string(),
        }
    }
}
