//! Shared helpers used across archive fetching operations.

use super::BaseUrl;

/// Census cartographic boundary files, 1:500k, vintage 2020.
pub const DEFAULT_BASE_URL: &str = "https://www2.census.gov/geo/tiger/GENZ2020/shp";

/// Trim trailing slashes and fall back to the default census endpoint.
pub(crate) fn sanitise_base_url(url: impl Into<String>) -> BaseUrl {
    let raw = url.into();
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        BaseUrl::from(DEFAULT_BASE_URL)
    } else {
        BaseUrl::new(trimmed.to_owned())
    }
}
