//! Facade crate for the regions bounds database.
//!
//! This crate re-exports the core domain types: regions, search index
//! entries, state polygons, naming rules and the region aggregator.

#![forbid(unsafe_code)]

pub use regionbounds_core::{
    Attributes, NameRule, RecordOutcome, Region, RegionAggregator, RegionId, RegionKind,
    RegionSet, SIMPLIFY_TOLERANCE, SearchIndexEntry, SkipReason, StatePolygon, extract_bounds,
    state_name, union_bounds,
};
