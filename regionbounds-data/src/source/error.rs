//! Error types produced while fetching source archives.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors produced while making a source shapefile available on disk.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceFetchError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    Client { source: reqwest::Error },
    /// The archive URL could not be formed from the base URL.
    #[error("invalid archive URL for {archive}: {source}")]
    InvalidUrl {
        archive: String,
        source: url::ParseError,
    },
    /// The archive could not be downloaded.
    #[error("failed to download archive: {source}")]
    Download { source: TransportError },
    /// Preparing the working directory failed.
    #[error("failed to create working directory {path:?}: {source}")]
    CreateDir { source: io::Error, path: PathBuf },
    /// Writing the archive to disk failed.
    #[error("failed to write archive to {path:?}: {source}")]
    WriteArchive { source: io::Error, path: PathBuf },
    /// The archive could not be unpacked.
    #[error("failed to extract archive {path:?}: {source}")]
    Extract {
        source: zip::result::ZipError,
        path: PathBuf,
    },
    /// Extraction finished but the expected shapefile is absent.
    #[error("archive {archive:?} did not contain {expected:?}")]
    MissingAfterExtract { archive: PathBuf, expected: PathBuf },
    /// Deleting the archive after extraction failed.
    #[error("failed to remove archive {path:?}: {source}")]
    RemoveArchive { source: io::Error, path: PathBuf },
}

/// Transport-level errors encountered while issuing HTTP requests.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The server returned an HTTP error status.
    #[error("request to {url} failed with status {status}: {message}")]
    Http {
        /// Fully qualified request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Short error description supplied by the server.
        message: String,
    },
    /// The request failed due to an I/O error.
    #[error("network error contacting {url}: {source}")]
    Network {
        /// Fully qualified request URL.
        url: String,
        /// I/O error reported by the transport.
        source: io::Error,
    },
}
