//! Conversion from shapefile records into `geo` geometries and attribute maps.

use geo::{
    Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};
use regionbounds_core::Attributes;
use shapefile::dbase::{FieldValue, Record};
use shapefile::{PolygonRing, Shape};

trait PlanarPoint {
    fn coord(&self) -> Coord<f64>;
}

impl PlanarPoint for shapefile::Point {
    fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.x,
            y: self.y,
        }
    }
}

impl PlanarPoint for shapefile::PointM {
    fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.x,
            y: self.y,
        }
    }
}

impl PlanarPoint for shapefile::PointZ {
    fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.x,
            y: self.y,
        }
    }
}

fn line<P: PlanarPoint>(points: &[P]) -> LineString<f64> {
    points.iter().map(PlanarPoint::coord).collect()
}

/// Group rings into polygons: each outer ring opens a polygon and the inner
/// rings that follow become its holes.
fn polygons<P: PlanarPoint>(rings: &[PolygonRing<P>]) -> Vec<Polygon<f64>> {
    let mut shells: Vec<(LineString<f64>, Vec<LineString<f64>>)> = Vec::new();
    for ring in rings {
        match ring {
            PolygonRing::Outer(points) => shells.push((line(points), Vec::new())),
            PolygonRing::Inner(points) => match shells.last_mut() {
                Some((_, holes)) => holes.push(line(points)),
                None => shells.push((line(points), Vec::new())),
            },
        }
    }
    shells
        .into_iter()
        .map(|(exterior, holes)| Polygon::new(exterior, holes))
        .collect()
}

fn polygonal<P: PlanarPoint>(rings: &[PolygonRing<P>]) -> Geometry<f64> {
    let mut parts = polygons(rings);
    if parts.len() == 1 {
        if let Some(polygon) = parts.pop() {
            return Geometry::Polygon(polygon);
        }
    }
    Geometry::MultiPolygon(MultiPolygon(parts))
}

fn linear<P: PlanarPoint>(parts: &[Vec<P>]) -> Geometry<f64> {
    match parts {
        [single] => Geometry::LineString(line(single)),
        _ => Geometry::MultiLineString(MultiLineString(
            parts.iter().map(|part| line(part)).collect(),
        )),
    }
}

fn scattered<P: PlanarPoint>(points: &[P]) -> Geometry<f64> {
    Geometry::MultiPoint(MultiPoint(
        points.iter().map(|point| Point(point.coord())).collect(),
    ))
}

/// Convert a shapefile shape into a planar `geo` geometry, dropping M and Z.
///
/// Null shapes and multipatches have no planar equivalent and become an
/// empty geometry collection, which the aggregator rejects as unsupported.
pub fn shape_to_geometry(shape: &Shape) -> Geometry<f64> {
    match shape {
        Shape::Point(point) => Geometry::Point(Point(point.coord())),
        Shape::PointM(point) => Geometry::Point(Point(point.coord())),
        Shape::PointZ(point) => Geometry::Point(Point(point.coord())),
        Shape::Polyline(polyline) => linear(polyline.parts()),
        Shape::PolylineM(polyline) => linear(polyline.parts()),
        Shape::PolylineZ(polyline) => linear(polyline.parts()),
        Shape::Polygon(polygon) => polygonal(polygon.rings()),
        Shape::PolygonM(polygon) => polygonal(polygon.rings()),
        Shape::PolygonZ(polygon) => polygonal(polygon.rings()),
        Shape::Multipoint(points) => scattered(points.points()),
        Shape::MultipointM(points) => scattered(points.points()),
        Shape::MultipointZ(points) => scattered(points.points()),
        Shape::NullShape | Shape::Multipatch(_) => {
            Geometry::GeometryCollection(GeometryCollection::default())
        }
    }
}

fn field_text(value: FieldValue) -> Option<String> {
    match value {
        FieldValue::Character(text) => text,
        FieldValue::Memo(text) => Some(text),
        FieldValue::Numeric(number) => number.map(|n| n.to_string()),
        FieldValue::Float(number) => number.map(|n| n.to_string()),
        FieldValue::Integer(number) => Some(number.to_string()),
        FieldValue::Double(number) | FieldValue::Currency(number) => Some(number.to_string()),
        FieldValue::Logical(flag) => flag.map(|f| f.to_string()),
        _ => None,
    }
}

/// Flatten a dBASE record into string attributes, dropping null fields.
pub fn record_attributes(record: Record) -> Attributes {
    let fields: std::collections::HashMap<String, FieldValue> = record.into();
    fields
        .into_iter()
        .filter_map(|(name, value)| field_text(value).map(|text| (name, text)))
        .collect()
}
