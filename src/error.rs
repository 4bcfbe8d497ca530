//! Error types for the scan pipeline.
//!
//! Every variant of [`ScanError`] aborts the scan before a report is written.
//! Registry lookups never produce one; they degrade to an unavailable
//! suggestion instead.

use std::path::PathBuf;

/// Fatal scan failure.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// None of the known manifest files exist in the project directory.
    #[error("no dependency file found in {}", dir.display())]
    ManifestNotFound { dir: PathBuf },

    /// The vulnerability scanner process could not be started.
    #[error("failed to run `{command}`: {source}. Is it installed?")]
    AuditLaunch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The scanner output is not the expected JSON document.
    #[error("vulnerability scan output could not be parsed as JSON: {0}")]
    ScanOutputUnparseable(#[source] serde_json::Error),

    /// Advisory translation failed.
    #[error(transparent)]
    Translation(#[from] TranslateError),

    /// The HTTP client could not be built.
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    /// The report file could not be written.
    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),

    /// The report could not be encoded.
    #[error("failed to encode report: {0}")]
    ReportEncode(#[source] serde_json::Error),
}

/// Failure of the translation service.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("translation request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("translation service returned {0}")]
    Status(reqwest::StatusCode),

    #[error("unexpected translation response: {0}")]
    Malformed(String),
}
