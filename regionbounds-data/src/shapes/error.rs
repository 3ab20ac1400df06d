//! Errors raised while streaming shapefile records.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by [`ShapeRecordReader`](super::ShapeRecordReader).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ShapeReadError {
    /// The shapefile or its attribute table could not be opened.
    #[error("failed to open shapefile at {path:?}: {source}")]
    Open {
        #[source]
        source: shapefile::Error,
        path: PathBuf,
    },
    /// Reading the file failed; the stream ends after this error.
    #[error("failed to read record {index} from {path:?}: {source}")]
    Decode {
        #[source]
        source: shapefile::Error,
        path: PathBuf,
        index: usize,
    },
    /// A single record could not be decoded; later records remain readable.
    #[error("malformed record {index} in {path:?}: {source}")]
    MalformedRecord {
        #[source]
        source: shapefile::Error,
        path: PathBuf,
        index: usize,
    },
}

impl ShapeReadError {
    /// Whether the stream can continue after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }

    pub(crate) fn from_record(source: shapefile::Error, path: PathBuf, index: usize) -> Self {
        match source {
            shapefile::Error::IoError(_) => Self::Decode {
                source,
                path,
                index,
            },
            _ => Self::MalformedRecord {
                source,
                path,
                index,
            },
        }
    }
}
