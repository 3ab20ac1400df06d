//! Core domain types for the regionbounds lookup database.
//!
//! This crate owns the region model and the pure aggregation logic:
//! bounding-box extraction, per-dataset naming rules, the state-name table,
//! boundary simplification and the [`RegionAggregator`] that folds source
//! records into regions. It performs no I/O.
#![forbid(unsafe_code)]

mod aggregate;
mod bounds;
mod naming;
mod region;
mod states;

pub use aggregate::{
    RecordOutcome, RegionAggregator, SIMPLIFY_TOLERANCE, SkipReason, geometry_kind,
    simplify_boundary,
};
pub use bounds::{extract_bounds, union_bounds};
pub use naming::NameRule;
pub use region::{
    Attributes, ParseRegionKindError, Region, RegionId, RegionKind, RegionSet, SearchIndexEntry,
    StatePolygon,
};
pub use states::{STATE_NAMES, state_name};
