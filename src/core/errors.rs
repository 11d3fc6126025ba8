//! Custom error types for translation and evaluation operations

use thiserror::Error;

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Provider API request failed
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code returned by the provider
        status: u16,
        /// Error body text
        message: String,
    },

    /// Provider returned a response the client could not use
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        /// What was wrong with the response
        message: String,
    },

    /// Reference corpus download failed with a non-200 status
    #[error("Failed to download {url}. HTTP status code: {status}")]
    DownloadError {
        /// The URL that was requested
        url: String,
        /// HTTP status code of the failed response
        status: u16,
    },

    /// Reference and candidate sequences are not the same length
    #[error("The number of reference texts ({references}) and candidate texts ({candidates}) must be equal")]
    LengthMismatch {
        /// Number of reference texts
        references: usize,
        /// Number of candidate texts
        candidates: usize,
    },

    /// File operation error
    #[error("File error: {path} - {message}")]
    FileError {
        /// Path of the file involved
        path: String,
        /// Underlying error text
        message: String,
    },

    /// XML parse error
    #[error("Error parsing XML: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
