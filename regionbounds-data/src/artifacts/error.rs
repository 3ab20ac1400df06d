//! Errors raised while writing build artefacts.

use camino::Utf8PathBuf;
use regionbounds_core::RegionId;
use rusqlite::Error as SqliteError;
use thiserror::Error;

/// Errors raised when persisting the region set. All of them abort the build.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArtifactWriteError {
    /// Failed to create the output directory.
    #[error("failed to create output directory {path:?}: {source}")]
    CreateDirectory {
        /// Directory that could not be created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path:?}: {source}")]
    Open {
        /// Destination database path.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Enabling SQLite foreign keys failed.
    #[error("failed to enable SQLite foreign keys: {source}")]
    ForeignKeys {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Beginning the transaction failed.
    #[error("failed to begin region persistence transaction: {source}")]
    BeginTransaction {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Dropping or creating the tables failed.
    #[error("failed to recreate region tables: {source}")]
    CreateSchema {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Preparing an insert statement failed.
    #[error("failed to prepare insert statement: {source}")]
    PrepareInsert {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// A region identifier could not be represented as an SQLite integer.
    #[error("region id {id} exceeds SQLite i64 range")]
    IdOutOfRange {
        /// Identifier that failed the conversion.
        id: RegionId,
    },
    /// Writing a `region_bounds` row failed.
    #[error("failed to persist region {id}: {source}")]
    PersistRegion {
        /// Identifier of the region being persisted.
        id: RegionId,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// A state polygon held a geometry other than a polygon or multipolygon.
    #[error("state polygon for region {region_id} is a {kind}")]
    UnsupportedGeometry {
        /// Identifier of the owning state region.
        region_id: RegionId,
        /// Geometry type that was found.
        kind: &'static str,
    },
    /// Serialising a state polygon to GeoJSON failed.
    #[error("failed to serialize polygon for region {region_id}: {source}")]
    SerializeGeometry {
        /// Identifier of the owning state region.
        region_id: RegionId,
        /// Source error produced by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Writing a `state_regions` row failed.
    #[error("failed to persist polygon for region {region_id}: {source}")]
    PersistPolygon {
        /// Identifier of the owning state region.
        region_id: RegionId,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Committing the transaction failed.
    #[error("failed to commit region persistence transaction: {source}")]
    Commit {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Creating or writing the search index file failed.
    #[error("failed to write search index to {path:?}: {source}")]
    WriteIndex {
        /// Destination index path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Serialising the search index failed.
    #[error("failed to serialize search index to {path:?}: {source}")]
    SerializeIndex {
        /// Destination index path.
        path: Utf8PathBuf,
        /// Source error produced by `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Writing a gzip copy failed.
    #[error("failed to compress {path:?}: {source}")]
    Compress {
        /// Compressed output path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
