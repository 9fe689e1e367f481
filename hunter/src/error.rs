//! Error types for fetching postings and writing output files.

use std::path::PathBuf;
use thiserror::Error;

/// A posting source could not be reached or returned data we cannot read.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("malformed data from {origin}: {reason}")]
    Malformed { origin: String, reason: String },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An output file could not be opened or written.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("cannot open {} for writing", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("internships and entry-level output both point at {}", path.display())]
    SameTarget { path: PathBuf },

    #[error("failed writing {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Anything that stops a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("source '{source_name}' failed")]
    Fetch {
        source_name: String,
        #[source]
        error: FetchError,
    },

    #[error(transparent)]
    Output(#[from] OutputError),
}
