//! Driving datasets through fetching, reading and aggregation.
//!
//! Datasets are processed one at a time in region-kind order. Each shapefile
//! is fully streamed into the shared [`RegionAggregator`] before the next one
//! is fetched, so region ids follow first appearance across the whole run.

use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
};

use log::{info, warn};
use regionbounds_core::{NameRule, RecordOutcome, RegionAggregator, RegionSet};
use thiserror::Error;

use crate::artifacts::{ArtifactPaths, ArtifactWriteError, write_artifacts};
use crate::catalogue::SourceDataset;
use crate::shapes::{ShapeReadError, ShapeRecordReader};
use crate::source::{ArchiveSource, FetchOutcome, SourceFetchError, ensure_source_file};

/// Per-file record counts gathered while ingesting one shapefile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Records read from the file, malformed ones included.
    pub records: u64,
    /// Records that created a new region.
    pub created: u64,
    /// Records merged into an existing region.
    pub merged: u64,
    /// Records skipped, grouped by [`SkipReason::label`](regionbounds_core::SkipReason::label).
    pub skipped: BTreeMap<&'static str, u64>,
    /// Records the reader could not decode.
    pub malformed: u64,
}

impl IngestSummary {
    fn record(&mut self, outcome: RecordOutcome) {
        self.records += 1;
        match outcome {
            RecordOutcome::Created(_) => self.created += 1,
            RecordOutcome::Merged(_) => self.merged += 1,
            RecordOutcome::Skipped(reason) => {
                *self.skipped.entry(reason.label()).or_default() += 1;
            }
        }
    }

    fn record_malformed(&mut self) {
        self.records += 1;
        self.malformed += 1;
    }

    /// Total records excluded for any skip reason.
    pub fn skipped_total(&self) -> u64 {
        self.skipped.values().sum()
    }
}

impl fmt::Display for IngestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records, {} created, {} merged, {} malformed",
            self.records, self.created, self.merged, self.malformed
        )?;
        for (label, count) in &self.skipped {
            write!(f, ", {count} skipped ({label})")?;
        }
        Ok(())
    }
}

/// Outcome of processing one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetReport {
    /// The dataset that was processed.
    pub dataset: SourceDataset,
    /// Whether the shapefile was cached or downloaded.
    pub fetch: FetchOutcome,
    /// Record counts for the file.
    pub summary: IngestSummary,
}

/// Aggregated regions together with the per-dataset reports.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    /// Final regions, search index and state polygons.
    pub region_set: RegionSet,
    /// One report per dataset, in processing order.
    pub datasets: Vec<DatasetReport>,
}

/// Errors that abort a build.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuildError {
    /// A dataset could not be made available locally.
    #[error("failed to fetch {dataset}: {source}")]
    Fetch {
        /// Archive name of the dataset.
        dataset: String,
        #[source]
        source: SourceFetchError,
    },
    /// A shapefile could not be read.
    #[error("failed to read {dataset}: {source}")]
    Read {
        /// Archive name of the dataset.
        dataset: String,
        #[source]
        source: ShapeReadError,
    },
    /// The artefacts could not be written.
    #[error("failed to write build artefacts: {source}")]
    Write {
        #[source]
        source: ArtifactWriteError,
    },
}

/// Stream every record of one shapefile into `aggregator`.
///
/// Malformed records are logged and counted; any other read error is returned.
///
/// # Examples
/// ```no_run
/// use std::path::Path;
/// use regionbounds_core::RegionAggregator;
/// use regionbounds_data::{SourceDataset, ingest_shapefile};
///
/// # fn main() -> Result<(), regionbounds_data::shapes::ShapeReadError> {
/// let mut aggregator = RegionAggregator::new();
/// let dataset = SourceDataset::states();
/// let summary = ingest_shapefile(Path::new(&dataset.shapefile), &dataset.rule, &mut aggregator)?;
/// println!("{summary}");
/// # Ok(())
/// # }
/// ```
pub fn ingest_shapefile(
    path: &Path,
    rule: &NameRule,
    aggregator: &mut RegionAggregator,
) -> Result<IngestSummary, ShapeReadError> {
    let mut reader = ShapeRecordReader::open(path)?;
    let mut summary = IngestSummary::default();
    for item in reader.records() {
        match item {
            Ok(record) => {
                summary.record(aggregator.ingest(rule, &record.geometry, &record.attributes));
            }
            Err(err) if err.is_recoverable() => {
                warn!("Skipping {err}");
                summary.record_malformed();
            }
            Err(err) => return Err(err),
        }
    }
    info!("Ingested {}: {summary}", path.display());
    Ok(summary)
}

/// Fetch and ingest `datasets` in region-kind order into a fresh aggregator.
///
/// # Examples
/// ```no_run
/// use std::path::Path;
/// use regionbounds_data::source::HttpArchiveSource;
/// use regionbounds_data::{build_region_set, default_datasets};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let source = HttpArchiveSource::new("https://www2.census.gov/geo/tiger/GENZ2020/shp")?;
/// let report = build_region_set(&source, &default_datasets(), Path::new("cache")).await?;
/// println!("{} regions", report.region_set.regions.len());
/// # Ok(())
/// # }
/// ```
pub async fn build_region_set<S: ArchiveSource + ?Sized>(
    source: &S,
    datasets: &[SourceDataset],
    work_dir: &Path,
) -> Result<BuildReport, BuildError> {
    let mut ordered = datasets.to_vec();
    ordered.sort_by_key(SourceDataset::kind);

    let mut aggregator = RegionAggregator::new();
    let mut reports = Vec::with_capacity(ordered.len());
    for dataset in ordered {
        let fetch = ensure_source_file(source, &dataset.archive, &dataset.shapefile, work_dir)
            .await
            .map_err(|source| BuildError::Fetch {
                dataset: dataset.archive.to_string(),
                source,
            })?;
        let path: PathBuf = fetch.path().clone();
        let summary = ingest_shapefile(&path, &dataset.rule, &mut aggregator).map_err(|source| {
            BuildError::Read {
                dataset: dataset.archive.to_string(),
                source,
            }
        })?;
        reports.push(DatasetReport {
            dataset,
            fetch,
            summary,
        });
    }

    let region_set = aggregator.into_region_set();
    info!(
        "Aggregated {} regions, {} index entries, {} state polygons",
        region_set.regions.len(),
        region_set.search_index.len(),
        region_set.state_polygons.len()
    );
    Ok(BuildReport {
        region_set,
        datasets: reports,
    })
}

/// Build the region set and write all artefacts once every dataset succeeded.
pub async fn build_artifacts<S: ArchiveSource + ?Sized>(
    source: &S,
    datasets: &[SourceDataset],
    work_dir: &Path,
    paths: &ArtifactPaths,
) -> Result<BuildReport, BuildError> {
    let report = build_region_set(source, datasets, work_dir).await?;
    write_artifacts(paths, &report.region_set).map_err(|source| BuildError::Write { source })?;
    Ok(report)
}

#[cfg(test)]
mod tests;
