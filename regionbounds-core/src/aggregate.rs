//! Folding source records into regions, search entries and state polygons.
//!
//! The aggregator is a single-writer structure: records are applied one at a
//! time in the order they are read, so identifiers follow first appearance.

use std::collections::HashMap;

use geo::{Geometry, Rect, Simplify};

use crate::{
    Attributes, NameRule, Region, RegionId, RegionKind, RegionSet, SearchIndexEntry, StatePolygon,
    extract_bounds, state_name, union_bounds,
};

/// Douglas-Peucker tolerance, in degrees, applied to state boundaries.
pub const SIMPLIFY_TOLERANCE: f64 = 0.01;

/// Why a record was excluded from the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The naming rule found no usable name.
    MissingName,
    /// The geometry is neither a polygon nor a multipolygon.
    UnsupportedGeometry {
        /// Geometry type that was encountered.
        kind: &'static str,
    },
    /// Every coordinate pair had a non-numeric component.
    NoValidBounds,
}

impl SkipReason {
    /// Short label used in logs and summaries.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MissingName => "missing name",
            Self::UnsupportedGeometry { .. } => "unsupported geometry",
            Self::NoValidBounds => "no valid bounds",
        }
    }
}

/// Result of applying one record to the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A new region was created with this id.
    Created(RegionId),
    /// The record's bounds were merged into an existing region.
    Merged(RegionId),
    /// The record was excluded.
    Skipped(SkipReason),
}

impl RecordOutcome {
    /// Whether the record contributed to a region.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        !matches!(self, Self::Skipped(_))
    }
}

/// Accumulates regions across every source file of a run.
///
/// # Examples
/// ```
/// use geo::{Geometry, LineString, Polygon};
/// use regionbounds_core::{Attributes, NameRule, RecordOutcome, RegionAggregator};
///
/// let rule = NameRule::Zip { code_field: "ZCTA5CE20".into() };
/// let attributes = Attributes::from([("ZCTA5CE20".to_owned(), "90210".to_owned())]);
/// let square = Geometry::Polygon(Polygon::new(
///     LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]),
///     vec![],
/// ));
///
/// let mut aggregator = RegionAggregator::new();
/// assert_eq!(aggregator.ingest(&rule, &square, &attributes), RecordOutcome::Created(1));
/// assert_eq!(aggregator.ingest(&rule, &square, &attributes), RecordOutcome::Merged(1));
/// assert_eq!(aggregator.regions().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RegionAggregator {
    next_id: RegionId,
    regions: Vec<Region>,
    positions: HashMap<(RegionKind, String), usize>,
    search_index: Vec<SearchIndexEntry>,
    state_polygons: Vec<StatePolygon>,
}

impl Default for RegionAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionAggregator {
    /// Create an empty aggregator whose first region receives id 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 1,
            regions: Vec::new(),
            positions: HashMap::new(),
            search_index: Vec::new(),
            state_polygons: Vec::new(),
        }
    }

    /// Apply one source record.
    ///
    /// The name is derived first, then the geometry type is checked, then
    /// bounds are computed. A record that passes all three either creates a
    /// region or widens the bounds of the region already holding its
    /// `(name, kind)` pair.
    pub fn ingest(
        &mut self,
        rule: &NameRule,
        geometry: &Geometry<f64>,
        attributes: &Attributes,
    ) -> RecordOutcome {
        let Some(name) = rule.derive_name(attributes) else {
            return RecordOutcome::Skipped(SkipReason::MissingName);
        };
        match polygonal_bounds(geometry) {
            Ok(bounds) => self.upsert(rule.kind(), name, bounds, geometry),
            Err(reason) => RecordOutcome::Skipped(reason),
        }
    }

    fn upsert(
        &mut self,
        kind: RegionKind,
        name: String,
        bounds: Rect<f64>,
        geometry: &Geometry<f64>,
    ) -> RecordOutcome {
        let key = (kind, name);
        if let Some(region) = self
            .positions
            .get(&key)
            .and_then(|&position| self.regions.get_mut(position))
        {
            region.bounds = union_bounds(&region.bounds, &bounds);
            return RecordOutcome::Merged(region.id);
        }

        let (_, name) = &key;
        let id = self.next_id;
        self.next_id += 1;
        self.search_index
            .push(SearchIndexEntry::new(id, name.as_str(), kind));
        if kind == RegionKind::State {
            if let Some(full_name) = state_name(name) {
                self.search_index
                    .push(SearchIndexEntry::new(id, full_name, kind));
            }
            self.state_polygons.push(StatePolygon {
                region_id: id,
                geometry: simplify_boundary(geometry),
            });
        }
        self.regions.push(Region {
            id,
            name: name.clone(),
            kind,
            bounds,
        });
        self.positions.insert(key, self.regions.len() - 1);
        RecordOutcome::Created(id)
    }

    /// Regions in id order.
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Search entries in insertion order.
    #[must_use]
    pub fn search_index(&self) -> &[SearchIndexEntry] {
        &self.search_index
    }

    /// Simplified state boundaries in creation order.
    #[must_use]
    pub fn state_polygons(&self) -> &[StatePolygon] {
        &self.state_polygons
    }

    /// Find the region holding a `(name, kind)` pair.
    #[must_use]
    pub fn region(&self, name: &str, kind: RegionKind) -> Option<&Region> {
        self.positions
            .get(&(kind, name.to_owned()))
            .and_then(|&position| self.regions.get(position))
    }

    /// Consume the aggregator, yielding the final artefact contents.
    #[must_use]
    pub fn into_region_set(self) -> RegionSet {
        RegionSet {
            regions: self.regions,
            search_index: self.search_index,
            state_polygons: self.state_polygons,
        }
    }
}

fn polygonal_bounds(geometry: &Geometry<f64>) -> Result<Rect<f64>, SkipReason> {
    let bounds = match geometry {
        Geometry::Polygon(polygon) => extract_bounds(polygon),
        Geometry::MultiPolygon(polygons) => extract_bounds(polygons),
        other => {
            return Err(SkipReason::UnsupportedGeometry {
                kind: geometry_kind(other),
            });
        }
    };
    bounds.ok_or(SkipReason::NoValidBounds)
}

/// Simplify a polygonal boundary with [`SIMPLIFY_TOLERANCE`].
///
/// Non-polygonal geometries are returned unchanged.
#[must_use]
pub fn simplify_boundary(geometry: &Geometry<f64>) -> Geometry<f64> {
    match geometry {
        Geometry::Polygon(polygon) => Geometry::Polygon(polygon.simplify(SIMPLIFY_TOLERANCE)),
        Geometry::MultiPolygon(polygons) => {
            Geometry::MultiPolygon(polygons.simplify(SIMPLIFY_TOLERANCE))
        }
        other => other.clone(),
    }
}

/// GeoJSON-style name of a geometry's type.
#[must_use]
pub const fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

#[cfg(test)]
mod tests;
