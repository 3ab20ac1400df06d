//! Unit coverage for the region aggregator.

use super::*;
use geo::{Coord, CoordsIter, LineString, MultiPolygon, Point, Polygon};
use rstest::{fixture, rstest};

fn zip_rule() -> NameRule {
    NameRule::Zip {
        code_field: "ZCTA5CE20".into(),
    }
}

fn city_rule() -> NameRule {
    NameRule::City {
        name_field: "NAME".into(),
        state_field: "STUSPS".into(),
    }
}

fn state_rule() -> NameRule {
    NameRule::State {
        abbreviation_field: "STUSPS".into(),
    }
}

fn attributes(pairs: &[(&str, &str)]) -> Attributes {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect()
}

fn rectangle(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Geometry<f64> {
    Geometry::Polygon(Polygon::new(
        LineString::from(vec![
            (min_x, min_y),
            (max_x, min_y),
            (max_x, max_y),
            (min_x, max_y),
        ]),
        vec![],
    ))
}

#[fixture]
fn aggregator() -> RegionAggregator {
    RegionAggregator::new()
}

#[rstest]
fn merges_bounds_for_duplicate_names(mut aggregator: RegionAggregator) {
    let zip = attributes(&[("ZCTA5CE20", "90210")]);
    let first = aggregator.ingest(&zip_rule(), &rectangle(0.0, 0.0, 1.0, 1.0), &zip);
    let second = aggregator.ingest(&zip_rule(), &rectangle(0.5, -2.0, 3.0, 0.5), &zip);

    assert_eq!(first, RecordOutcome::Created(1));
    assert_eq!(second, RecordOutcome::Merged(1));
    assert_eq!(aggregator.regions().len(), 1);
    assert_eq!(aggregator.search_index().len(), 1);
    let region = aggregator
        .region("90210", RegionKind::Zip)
        .expect("region exists");
    assert_eq!(region.bounds.min(), Coord { x: 0.0, y: -2.0 });
    assert_eq!(region.bounds.max(), Coord { x: 3.0, y: 1.0 });
}

#[rstest]
fn same_name_in_different_kinds_creates_separate_regions(mut aggregator: RegionAggregator) {
    let geometry = rectangle(0.0, 0.0, 1.0, 1.0);
    aggregator.ingest(&zip_rule(), &geometry, &attributes(&[("ZCTA5CE20", "ca")]));
    aggregator.ingest(&state_rule(), &geometry, &attributes(&[("STUSPS", "CA")]));

    let ids: Vec<_> = aggregator.regions().iter().map(|region| region.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(
        aggregator.region("ca", RegionKind::Zip).map(|r| r.id),
        Some(1)
    );
    assert_eq!(
        aggregator.region("ca", RegionKind::State).map(|r| r.id),
        Some(2)
    );
}

#[rstest]
fn ids_follow_first_appearance(mut aggregator: RegionAggregator) {
    let geometry = rectangle(0.0, 0.0, 1.0, 1.0);
    for code in ["11111", "22222", "11111", "33333"] {
        aggregator.ingest(&zip_rule(), &geometry, &attributes(&[("ZCTA5CE20", code)]));
    }
    aggregator.ingest(
        &city_rule(),
        &geometry,
        &attributes(&[("NAME", "Austin"), ("STUSPS", "TX")]),
    );

    let named: Vec<_> = aggregator
        .regions()
        .iter()
        .map(|region| (region.id, region.name.as_str()))
        .collect();
    assert_eq!(
        named,
        vec![
            (1, "11111"),
            (2, "22222"),
            (3, "33333"),
            (4, "austin, tx")
        ]
    );
}

#[rstest]
fn state_gets_alias_and_polygon(mut aggregator: RegionAggregator) {
    let outcome = aggregator.ingest(
        &state_rule(),
        &rectangle(-106.6, 25.8, -93.5, 36.5),
        &attributes(&[("STUSPS", "TX")]),
    );

    assert_eq!(outcome, RecordOutcome::Created(1));
    assert_eq!(
        aggregator.search_index(),
        &[
            SearchIndexEntry::new(1, "tx", RegionKind::State),
            SearchIndexEntry::new(1, "Texas", RegionKind::State),
        ]
    );
    assert_eq!(aggregator.state_polygons().len(), 1);
    assert_eq!(
        aggregator.state_polygons().first().map(|p| p.region_id),
        Some(1)
    );
}

#[rstest]
fn unknown_state_abbreviation_omits_alias(mut aggregator: RegionAggregator) {
    aggregator.ingest(
        &state_rule(),
        &rectangle(-67.3, 17.9, -65.2, 18.5),
        &attributes(&[("STUSPS", "PR")]),
    );

    assert_eq!(
        aggregator.search_index(),
        &[SearchIndexEntry::new(1, "pr", RegionKind::State)]
    );
    assert_eq!(aggregator.state_polygons().len(), 1);
}

#[rstest]
fn merged_state_keeps_original_polygon(mut aggregator: RegionAggregator) {
    let first = rectangle(0.0, 0.0, 1.0, 1.0);
    let state = attributes(&[("STUSPS", "RI")]);
    aggregator.ingest(&state_rule(), &first, &state);
    let outcome = aggregator.ingest(&state_rule(), &rectangle(5.0, 5.0, 6.0, 6.0), &state);

    assert_eq!(outcome, RecordOutcome::Merged(1));
    assert_eq!(aggregator.search_index().len(), 2);
    assert_eq!(aggregator.state_polygons().len(), 1);
    let polygon = aggregator.state_polygons().first().expect("polygon stored");
    assert_eq!(polygon.geometry, simplify_boundary(&first));
    let region = aggregator.region("ri", RegionKind::State).expect("region");
    assert_eq!(region.bounds.max(), Coord { x: 6.0, y: 6.0 });
}

#[rstest]
fn skips_point_geometries(mut aggregator: RegionAggregator) {
    let outcome = aggregator.ingest(
        &zip_rule(),
        &Geometry::Point(Point::new(-118.4, 34.1)),
        &attributes(&[("ZCTA5CE20", "90210")]),
    );

    assert_eq!(
        outcome,
        RecordOutcome::Skipped(SkipReason::UnsupportedGeometry { kind: "Point" })
    );
    assert!(aggregator.regions().is_empty());
    assert!(aggregator.search_index().is_empty());
}

#[rstest]
fn skips_records_without_names(mut aggregator: RegionAggregator) {
    let outcome = aggregator.ingest(
        &city_rule(),
        &rectangle(0.0, 0.0, 1.0, 1.0),
        &attributes(&[("NAME", "Springfield")]),
    );
    assert_eq!(outcome, RecordOutcome::Skipped(SkipReason::MissingName));
    assert!(!outcome.is_accepted());
}

#[rstest]
fn skips_records_without_valid_coordinates(mut aggregator: RegionAggregator) {
    let outcome = aggregator.ingest(
        &zip_rule(),
        &rectangle(f64::NAN, f64::NAN, f64::NAN, f64::NAN),
        &attributes(&[("ZCTA5CE20", "00000")]),
    );
    assert_eq!(outcome, RecordOutcome::Skipped(SkipReason::NoValidBounds));

    // Skipped records never consume an id.
    let created = aggregator.ingest(
        &zip_rule(),
        &rectangle(0.0, 0.0, 1.0, 1.0),
        &attributes(&[("ZCTA5CE20", "00001")]),
    );
    assert_eq!(created, RecordOutcome::Created(1));
}

#[rstest]
fn accepts_multipolygons(mut aggregator: RegionAggregator) {
    let islands = Geometry::MultiPolygon(MultiPolygon::new(vec![
        Polygon::new(
            LineString::from(vec![(-160.0, 21.0), (-159.0, 21.0), (-159.0, 22.0)]),
            vec![],
        ),
        Polygon::new(
            LineString::from(vec![(-156.0, 19.0), (-155.0, 19.0), (-155.0, 20.0)]),
            vec![],
        ),
    ]));
    aggregator.ingest(&state_rule(), &islands, &attributes(&[("STUSPS", "HI")]));

    let region = aggregator.region("hi", RegionKind::State).expect("region");
    assert_eq!(region.bounds.min(), Coord { x: -160.0, y: 19.0 });
    assert_eq!(region.bounds.max(), Coord { x: -155.0, y: 22.0 });
    let polygon = aggregator.state_polygons().first().expect("polygon");
    assert!(matches!(polygon.geometry, Geometry::MultiPolygon(_)));
}

#[rstest]
fn simplification_drops_near_collinear_points() {
    let detailed = Geometry::Polygon(Polygon::new(
        LineString::from(vec![
            (0.0, 0.0),
            (0.5, 0.001),
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
        ]),
        vec![],
    ));
    let simplified = simplify_boundary(&detailed);
    assert!(simplified.coords_count() < detailed.coords_count());
    assert!(matches!(simplified, Geometry::Polygon(_)));
}

#[rstest]
fn into_region_set_preserves_order(mut aggregator: RegionAggregator) {
    let geometry = rectangle(0.0, 0.0, 1.0, 1.0);
    aggregator.ingest(&zip_rule(), &geometry, &attributes(&[("ZCTA5CE20", "73301")]));
    aggregator.ingest(&state_rule(), &geometry, &attributes(&[("STUSPS", "TX")]));

    let set = aggregator.into_region_set();
    assert_eq!(set.regions.len(), 2);
    assert_eq!(set.search_index.len(), 3);
    assert_eq!(set.state_polygons.len(), 1);
    assert_eq!(set.state_polygons.first().map(|p| p.region_id), Some(2));
}
