//! Test helpers for building artefact directories and fixture datasets.

use camino::{Utf8Path, Utf8PathBuf};
use regionbounds_data::ArtifactPaths;
use regionbounds_data::SourceDataset;
use regionbounds_data::shapes::test_support::{PolygonFixture, rectangle};
use std::fs;
use tempfile::TempDir;

pub(super) fn utf8_temp_dir() -> (TempDir, Utf8PathBuf) {
    let dir = TempDir::new().expect("tempdir");
    let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path");
    (dir, path)
}

/// Write placeholder files for every release asset under `dir`.
pub(super) fn write_placeholder_artifacts(dir: &Utf8Path) -> ArtifactPaths {
    fs::create_dir_all(dir).expect("create output dir");
    let paths = ArtifactPaths::in_dir(dir);
    for (name, path) in paths.release_assets() {
        fs::write(path, name.as_bytes()).expect("write placeholder artefact");
    }
    paths
}

fn stem(dataset: &SourceDataset) -> &str {
    dataset
        .shapefile
        .strip_suffix(".shp")
        .expect("shapefile names end in .shp")
}

/// Seed the working directory with the ZIP and city shapefiles.
pub(super) fn seed_zip_and_city(work_dir: &Utf8Path) {
    PolygonFixture::new(&["ZCTA5CE20"])
        .record(&[rectangle(-118.43, 34.08, -118.39, 34.12)], &["90210"])
        .record(&[rectangle(-118.42, 34.05, -118.38, 34.10)], &["90210"])
        .write(work_dir.as_std_path(), stem(&SourceDataset::zip_codes()))
        .expect("write ZIP shapefile");
    PolygonFixture::new(&["NAME", "STUSPS"])
        .record(
            &[rectangle(-118.42, 34.06, -118.37, 34.09)],
            &["Beverly Hills", "CA"],
        )
        .write(work_dir.as_std_path(), stem(&SourceDataset::cities()))
        .expect("write city shapefile");
}

/// Zipped state shapefile holding Texas and California.
pub(super) fn state_archive() -> Vec<u8> {
    let scratch = TempDir::new().expect("scratch dir");
    PolygonFixture::new(&["STUSPS"])
        .record(&[rectangle(-106.65, 25.84, -93.51, 36.5)], &["TX"])
        .record(&[rectangle(-124.48, 32.53, -114.13, 42.01)], &["CA"])
        .zip(scratch.path(), stem(&SourceDataset::states()))
        .expect("zip state shapefile")
}
