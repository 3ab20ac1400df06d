//! SQLite persistence for region bounds and state polygons.

use camino::Utf8Path;
use regionbounds_core::{Region, RegionId, RegionSet, StatePolygon, geometry_kind};
use rusqlite::{Connection, Transaction};
use serde_json::to_string;

use super::ArtifactWriteError;
use super::geojson::GeoJsonGeometry;

const SCHEMA: &str = "
    DROP TABLE IF EXISTS state_regions;
    DROP TABLE IF EXISTS region_bounds;
    CREATE TABLE region_bounds (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        type TEXT NOT NULL CHECK (type IN ('zip', 'city', 'state')),
        xmin REAL NOT NULL,
        ymin REAL NOT NULL,
        xmax REAL NOT NULL,
        ymax REAL NOT NULL
    );
    CREATE INDEX idx_region_bounds_name ON region_bounds (name);
    CREATE TABLE state_regions (
        region_id INTEGER PRIMARY KEY REFERENCES region_bounds (id),
        polygon_geojson TEXT NOT NULL
    );
";

/// Replace the `region_bounds` and `state_regions` tables at `path`.
///
/// Both tables are dropped and recreated inside one transaction, so the file
/// holds either the previous build or this one. The parent directory must
/// already exist.
pub fn persist_regions_to_sqlite(
    path: &Utf8Path,
    region_set: &RegionSet,
) -> Result<(), ArtifactWriteError> {
    let mut connection =
        Connection::open(path.as_std_path()).map_err(|source| ArtifactWriteError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    connection
        .pragma_update(None, "foreign_keys", true)
        .map_err(|source| ArtifactWriteError::ForeignKeys { source })?;

    let transaction = connection
        .transaction()
        .map_err(|source| ArtifactWriteError::BeginTransaction { source })?;
    transaction
        .execute_batch(SCHEMA)
        .map_err(|source| ArtifactWriteError::CreateSchema { source })?;
    persist_regions(&transaction, &region_set.regions)?;
    persist_polygons(&transaction, &region_set.state_polygons)?;
    transaction
        .commit()
        .map_err(|source| ArtifactWriteError::Commit { source })
}

fn sql_id(id: RegionId) -> Result<i64, ArtifactWriteError> {
    i64::try_from(id).map_err(|_| ArtifactWriteError::IdOutOfRange { id })
}

fn persist_regions(
    transaction: &Transaction<'_>,
    regions: &[Region],
) -> Result<(), ArtifactWriteError> {
    let mut statement = transaction
        .prepare(
            "INSERT INTO region_bounds (id, name, type, xmin, ymin, xmax, ymax)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .map_err(|source| ArtifactWriteError::PrepareInsert { source })?;
    for region in regions {
        let (min, max) = (region.bounds.min(), region.bounds.max());
        statement
            .execute((
                sql_id(region.id)?,
                region.name.as_str(),
                region.kind.as_str(),
                min.x,
                min.y,
                max.x,
                max.y,
            ))
            .map_err(|source| ArtifactWriteError::PersistRegion {
                id: region.id,
                source,
            })?;
    }
    Ok(())
}

fn persist_polygons(
    transaction: &Transaction<'_>,
    polygons: &[StatePolygon],
) -> Result<(), ArtifactWriteError> {
    let mut statement = transaction
        .prepare("INSERT INTO state_regions (region_id, polygon_geojson) VALUES (?1, ?2)")
        .map_err(|source| ArtifactWriteError::PrepareInsert { source })?;
    for polygon in polygons {
        let geometry = GeoJsonGeometry::from_geometry(&polygon.geometry).ok_or(
            ArtifactWriteError::UnsupportedGeometry {
                region_id: polygon.region_id,
                kind: geometry_kind(&polygon.geometry),
            },
        )?;
        let geojson =
            to_string(&geometry).map_err(|source| ArtifactWriteError::SerializeGeometry {
                region_id: polygon.region_id,
                source,
            })?;
        statement
            .execute((sql_id(polygon.region_id)?, geojson))
            .map_err(|source| ArtifactWriteError::PersistPolygon {
                region_id: polygon.region_id,
                source,
            })?;
    }
    Ok(())
}
