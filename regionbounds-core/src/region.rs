//! Region records produced by the aggregation pipeline.
//!
//! Coordinates are WGS84 degrees with `x = longitude` and `y = latitude`.

use std::{collections::BTreeMap, fmt, str::FromStr};

use geo::{Geometry, Rect};
use thiserror::Error;

/// Identifier assigned to a [`Region`] in first-seen order, starting at 1.
pub type RegionId = u64;

/// Attribute table attached to a single source record.
///
/// Keys are the source field names; values are the field contents rendered as
/// text.
pub type Attributes = BTreeMap<String, String>;

/// The closed set of region classes.
///
/// The declaration order doubles as the processing priority: ZIP codes first,
/// then cities, then states.
///
/// # Examples
/// ```
/// use regionbounds_core::RegionKind;
///
/// let kind: RegionKind = "state".parse().expect("known kind");
/// assert_eq!(kind, RegionKind::State);
/// assert_eq!(kind.as_str(), "state");
/// assert!(RegionKind::Zip < RegionKind::City);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RegionKind {
    /// A five-digit ZIP code tabulation area.
    Zip,
    /// A city or census place, named `"<name>, <state>"`.
    City,
    /// A US state, named by its two-letter abbreviation.
    State,
}

impl RegionKind {
    /// Every kind in processing priority order.
    pub const ALL: [Self; 3] = [Self::Zip, Self::City, Self::State];

    /// Lowercase label stored in the artefacts.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::City => "city",
            Self::State => "state",
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a label does not name a [`RegionKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown region kind {0:?}")]
pub struct ParseRegionKindError(pub String);

impl FromStr for RegionKind {
    type Err = ParseRegionKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ParseRegionKindError(value.to_owned()))
    }
}

/// A named geographic area with its accumulated bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Stable identifier, never reused within a run.
    pub id: RegionId,
    /// Lowercase, trimmed lookup name.
    pub name: String,
    /// Region class.
    pub kind: RegionKind,
    /// Union of the bounds of every source record merged into this region.
    pub bounds: Rect<f64>,
}

/// A `(id, name, type)` triple used by client-side fuzzy search.
///
/// States carry a second entry with the full English name mapped to the same
/// id.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchIndexEntry {
    /// Identifier of the region the entry resolves to.
    pub id: RegionId,
    /// Searchable text.
    pub name: String,
    /// Class of the referenced region.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: RegionKind,
}

impl SearchIndexEntry {
    /// Construct an index entry.
    pub fn new(id: RegionId, name: impl Into<String>, kind: RegionKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
        }
    }
}

/// Simplified boundary of a state region.
///
/// Created once alongside the owning [`Region`] and never updated.
#[derive(Debug, Clone, PartialEq)]
pub struct StatePolygon {
    /// Identifier of the owning state region.
    pub region_id: RegionId,
    /// Simplified `Polygon` or `MultiPolygon`.
    pub geometry: Geometry<f64>,
}

/// Final output of an aggregation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionSet {
    /// Regions ordered by id.
    pub regions: Vec<Region>,
    /// Search index entries in insertion order.
    pub search_index: Vec<SearchIndexEntry>,
    /// One simplified polygon per state region.
    pub state_polygons: Vec<StatePolygon>,
}
