//! Data access and build pipeline for the regions bounds database.
//!
//! Responsibilities:
//! - Fetch and unpack the census shapefile archives.
//! - Stream shapefile records into the core aggregator.
//! - Persist the aggregated regions as SQLite, JSON and gzip artefacts.
//!
//! Boundaries:
//! - Naming, bounds and merge rules live in `regionbounds-core`.
//! - Datasets are processed sequentially; ids depend on that order.
//! - Output files are created through `regionbounds-fs`; the download cache
//!   uses `std::fs` directly.
//!
//! Invariants:
//! - No global mutable state; the aggregator is passed explicitly.
//! - Artefacts are written only after every dataset has been ingested.

pub mod artifacts;
mod catalogue;
mod ingest;
pub mod shapes;
pub mod source;

pub use artifacts::{ArtifactPaths, ArtifactWriteError, write_artifacts};
pub use catalogue::{SourceDataset, default_datasets};
pub use ingest::{
    BuildError, BuildReport, DatasetReport, IngestSummary, build_artifacts, build_region_set,
    ingest_shapefile,
};
