//! GeoJSON geometry objects for stored state polygons.

use geo::{Geometry, LineString, Polygon};
use serde::Serialize;

type Ring = Vec<[f64; 2]>;

/// A GeoJSON geometry restricted to the polygonal types stored per state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum GeoJsonGeometry {
    /// Exterior ring followed by any holes.
    Polygon(Vec<Ring>),
    /// One ring list per member polygon.
    MultiPolygon(Vec<Vec<Ring>>),
}

fn ring(line: &LineString<f64>) -> Ring {
    line.coords().map(|coord| [coord.x, coord.y]).collect()
}

fn rings(polygon: &Polygon<f64>) -> Vec<Ring> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(ring)
        .collect()
}

impl GeoJsonGeometry {
    /// Convert a polygonal geometry; other types yield `None`.
    pub fn from_geometry(geometry: &Geometry<f64>) -> Option<Self> {
        match geometry {
            Geometry::Polygon(polygon) => Some(Self::Polygon(rings(polygon))),
            Geometry::MultiPolygon(multi) => {
                Some(Self::MultiPolygon(multi.0.iter().map(rings).collect()))
            }
            _ => None,
        }
    }
}
