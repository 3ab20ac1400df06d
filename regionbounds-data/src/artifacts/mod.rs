//! Writing the aggregated regions to their on-disk artefacts.
//!
//! A build produces four files in one output directory: the SQLite bounds
//! store, the JSON search index and a gzip copy of each.

mod error;
mod files;
mod geojson;
mod sqlite;

use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use regionbounds_core::RegionSet;

pub use error::ArtifactWriteError;
pub use files::{gzip_copy, write_search_index};
pub use geojson::GeoJsonGeometry;
pub use sqlite::persist_regions_to_sqlite;

/// File name of the SQLite bounds store.
pub const DATABASE_FILE: &str = "region_bounds.db";
/// File name of the JSON search index.
pub const SEARCH_INDEX_FILE: &str = "search_index.json";
/// File name of the compressed bounds store.
pub const DATABASE_GZ_FILE: &str = "region_bounds.db.gz";
/// File name of the compressed search index.
pub const SEARCH_INDEX_GZ_FILE: &str = "search_index.json.gz";

/// Locations of the four build artefacts.
///
/// # Examples
/// ```
/// use camino::Utf8Path;
/// use regionbounds_data::artifacts::ArtifactPaths;
///
/// let paths = ArtifactPaths::in_dir(Utf8Path::new("dist"));
/// let names: Vec<_> = paths.release_assets().iter().map(|(name, _)| *name).collect();
/// assert_eq!(
///     names,
///     ["region_bounds.db", "search_index.json", "region_bounds.db.gz", "search_index.json.gz"]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Directory holding every artefact.
    pub dir: Utf8PathBuf,
    /// SQLite bounds store.
    pub database: Utf8PathBuf,
    /// JSON search index.
    pub search_index: Utf8PathBuf,
    /// Gzip copy of the bounds store.
    pub database_gz: Utf8PathBuf,
    /// Gzip copy of the search index.
    pub search_index_gz: Utf8PathBuf,
}

impl ArtifactPaths {
    /// Standard artefact names inside `dir`.
    pub fn in_dir(dir: &Utf8Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            database: dir.join(DATABASE_FILE),
            search_index: dir.join(SEARCH_INDEX_FILE),
            database_gz: dir.join(DATABASE_GZ_FILE),
            search_index_gz: dir.join(SEARCH_INDEX_GZ_FILE),
        }
    }

    /// Asset names and paths in publication order.
    pub fn release_assets(&self) -> [(&'static str, &Utf8Path); 4] {
        [
            (DATABASE_FILE, self.database.as_path()),
            (SEARCH_INDEX_FILE, self.search_index.as_path()),
            (DATABASE_GZ_FILE, self.database_gz.as_path()),
            (SEARCH_INDEX_GZ_FILE, self.search_index_gz.as_path()),
        ]
    }
}

/// Write the bounds store, the search index and their gzip copies.
pub fn write_artifacts(
    paths: &ArtifactPaths,
    region_set: &RegionSet,
) -> Result<(), ArtifactWriteError> {
    regionbounds_fs::ensure_dir(&paths.dir).map_err(|source| {
        ArtifactWriteError::CreateDirectory {
            path: paths.dir.clone(),
            source,
        }
    })?;

    persist_regions_to_sqlite(&paths.database, region_set)?;
    info!(
        "Wrote {} regions and {} state polygons to {}",
        region_set.regions.len(),
        region_set.state_polygons.len(),
        paths.database
    );
    write_search_index(&paths.search_index, &region_set.search_index)?;
    info!(
        "Wrote {} search index entries to {}",
        region_set.search_index.len(),
        paths.search_index
    );

    for (source, destination) in [
        (&paths.database, &paths.database_gz),
        (&paths.search_index, &paths.search_index_gz),
    ] {
        let bytes = gzip_copy(source, destination)?;
        info!("Compressed {source} to {destination} ({bytes} bytes)");
    }
    Ok(())
}
