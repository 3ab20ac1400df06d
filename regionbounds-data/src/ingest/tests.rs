use std::path::Path;

use regionbounds_core::{RegionAggregator, RegionKind, SearchIndexEntry};
use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::{BuildError, build_region_set, ingest_shapefile};
use crate::catalogue::SourceDataset;
use crate::shapes::test_support::{PolygonFixture, overwrite_shape_type, rectangle};
use crate::source::{BaseUrl, FetchOutcome, StubSource, block_on_for_tests};

#[fixture]
fn work_dir() -> TempDir {
    TempDir::new().expect("failed to create temporary directory")
}

fn stem(dataset: &SourceDataset) -> &str {
    dataset
        .shapefile
        .strip_suffix(".shp")
        .expect("shapefile names end in .shp")
}

fn zip_fixture() -> PolygonFixture {
    PolygonFixture::new(&["ZCTA5CE20"])
        .record(&[rectangle(-118.43, 34.07, -118.39, 34.11)], &["90210"])
        .record(&[rectangle(-118.45, 34.05, -118.41, 34.09)], &["90210"])
        .record(&[rectangle(-118.0, 34.0, -117.9, 34.1)], &["   "])
}

fn city_fixture() -> PolygonFixture {
    PolygonFixture::new(&["NAME", "STUSPS"]).record(
        &[rectangle(-118.42, 34.06, -118.38, 34.10)],
        &["Beverly Hills", "CA"],
    )
}

fn state_fixture() -> PolygonFixture {
    PolygonFixture::new(&["STUSPS"])
        .record(&[rectangle(-106.6, 25.8, -93.5, 36.5)], &["TX"])
        .record(&[rectangle(-67.3, 17.9, -65.2, 18.5)], &["PR"])
}

fn seed(dir: &Path, dataset: &SourceDataset, fixture: &PolygonFixture) {
    fixture
        .write(dir, stem(dataset))
        .expect("fixture shapefile written");
}

#[rstest]
fn summarises_one_file(work_dir: TempDir) {
    let path = zip_fixture()
        .write(work_dir.path(), "zips")
        .expect("fixture written");
    let mut aggregator = RegionAggregator::new();
    let summary = ingest_shapefile(&path, &SourceDataset::zip_codes().rule, &mut aggregator)
        .expect("ingest succeeds");

    assert_eq!(summary.records, 3);
    assert_eq!(summary.created, 1);
    assert_eq!(summary.merged, 1);
    assert_eq!(summary.skipped.get("missing name"), Some(&1));
    assert_eq!(summary.skipped_total(), 1);
    assert_eq!(summary.malformed, 0);

    let region = aggregator
        .region("90210", RegionKind::Zip)
        .expect("zip region exists");
    assert_eq!(region.bounds.min().x, -118.45);
    assert_eq!(region.bounds.max().y, 34.11);
}

#[rstest]
fn missing_shapefile_is_a_read_error(work_dir: TempDir) {
    let mut aggregator = RegionAggregator::new();
    let err = ingest_shapefile(
        &work_dir.path().join("absent.shp"),
        &SourceDataset::states().rule,
        &mut aggregator,
    )
    .expect_err("missing file should fail");
    assert!(!err.is_recoverable());
}

#[rstest]
fn malformed_record_is_skipped_without_shifting_names(work_dir: TempDir) {
    let path = PolygonFixture::new(&["ZCTA5CE20"])
        .record(&[rectangle(0.0, 0.0, 1.0, 1.0)], &["11111"])
        .record(&[rectangle(10.0, 10.0, 11.0, 11.0)], &["22222"])
        .record(&[rectangle(20.0, 20.0, 21.0, 21.0)], &["33333"])
        .write(work_dir.path(), "zips")
        .expect("fixture written");
    overwrite_shape_type(&path, 1, 99).expect("corrupt middle record");

    let mut aggregator = RegionAggregator::new();
    let summary = ingest_shapefile(&path, &SourceDataset::zip_codes().rule, &mut aggregator)
        .expect("malformed records do not abort ingestion");

    assert_eq!(summary.records, 3);
    assert_eq!(summary.malformed, 1);
    assert_eq!(summary.created, 2);
    assert_eq!(summary.merged, 0);
    assert!(aggregator.region("22222", RegionKind::Zip).is_none());

    let first = aggregator
        .region("11111", RegionKind::Zip)
        .expect("first zip region exists");
    assert_eq!(first.bounds.min().x, 0.0);
    assert_eq!(first.bounds.max().y, 1.0);

    let last = aggregator
        .region("33333", RegionKind::Zip)
        .expect("last zip region keeps its own name");
    assert_eq!(last.bounds.min().x, 20.0);
    assert_eq!(last.bounds.max().y, 21.0);
}

#[rstest]
fn processes_datasets_in_kind_order(work_dir: TempDir) {
    let (zips, cities, states) = (
        SourceDataset::zip_codes(),
        SourceDataset::cities(),
        SourceDataset::states(),
    );
    seed(work_dir.path(), &zips, &zip_fixture());
    seed(work_dir.path(), &cities, &city_fixture());
    seed(work_dir.path(), &states, &state_fixture());
    let source = StubSource::failing(BaseUrl::from("https://example.org"), 500);

    let report = block_on_for_tests(build_region_set(
        &source,
        &[states, cities, zips],
        work_dir.path(),
    ))
    .expect("build succeeds from cached files");

    let kinds: Vec<_> = report
        .datasets
        .iter()
        .map(|dataset| dataset.dataset.kind())
        .collect();
    assert_eq!(kinds, RegionKind::ALL);
    assert!(
        report
            .datasets
            .iter()
            .all(|dataset| matches!(dataset.fetch, FetchOutcome::AlreadyPresent { .. }))
    );
    assert!(source.requests().is_empty());

    let set = report.region_set;
    let named: Vec<_> = set
        .regions
        .iter()
        .map(|region| (region.id, region.name.as_str(), region.kind))
        .collect();
    assert_eq!(
        named,
        vec![
            (1, "90210", RegionKind::Zip),
            (2, "beverly hills, ca", RegionKind::City),
            (3, "tx", RegionKind::State),
            (4, "pr", RegionKind::State),
        ]
    );
    assert_eq!(
        set.search_index,
        vec![
            SearchIndexEntry::new(1, "90210", RegionKind::Zip),
            SearchIndexEntry::new(2, "beverly hills, ca", RegionKind::City),
            SearchIndexEntry::new(3, "tx", RegionKind::State),
            SearchIndexEntry::new(3, "Texas", RegionKind::State),
            SearchIndexEntry::new(4, "pr", RegionKind::State),
        ]
    );
    let polygon_ids: Vec<_> = set.state_polygons.iter().map(|p| p.region_id).collect();
    assert_eq!(polygon_ids, vec![3, 4]);
}

#[rstest]
fn downloads_missing_dataset(work_dir: TempDir) {
    let states = SourceDataset::states();
    let fixture_dir = TempDir::new().expect("fixture directory");
    let archive = state_fixture()
        .zip(fixture_dir.path(), stem(&states))
        .expect("zip fixture");
    let source = StubSource::new(BaseUrl::from("https://example.org/shp"), archive);

    let report = block_on_for_tests(build_region_set(
        &source,
        std::slice::from_ref(&states),
        work_dir.path(),
    ))
    .expect("build succeeds");

    assert_eq!(
        source.requests(),
        vec![format!("https://example.org/shp/{}", states.archive)]
    );
    assert!(matches!(
        report.datasets[0].fetch,
        FetchOutcome::Downloaded { .. }
    ));
    assert_eq!(report.datasets[0].summary.created, 2);
    assert!(!work_dir.path().join(states.archive.as_ref()).exists());
}

#[rstest]
fn fetch_failure_names_the_dataset(work_dir: TempDir) {
    let source = StubSource::failing(BaseUrl::from("https://example.org"), 503);
    let err = block_on_for_tests(build_region_set(
        &source,
        &[SourceDataset::cities()],
        work_dir.path(),
    ))
    .expect_err("download failure aborts the build");
    match err {
        BuildError::Fetch { dataset, .. } => assert_eq!(dataset, "cb_2020_us_place_500k.zip"),
        other => panic!("expected fetch error, got {other:?}"),
    }
}
