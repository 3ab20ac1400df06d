//! The census datasets the pipeline reads, in processing order.

use regionbounds_core::{NameRule, RegionKind};

use crate::source::ArchiveName;

/// A remote archive, the shapefile it unpacks to and how its records are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDataset {
    /// Archive file name relative to the source base URL.
    pub archive: ArchiveName,
    /// Shapefile expected in the working directory after extraction.
    pub shapefile: String,
    /// Naming rule applied to every record.
    pub rule: NameRule,
}

impl SourceDataset {
    /// Construct a dataset description.
    pub fn new(archive: impl Into<String>, shapefile: impl Into<String>, rule: NameRule) -> Self {
        Self {
            archive: ArchiveName::new(archive),
            shapefile: shapefile.into(),
            rule,
        }
    }

    /// Region kind produced by this dataset.
    pub const fn kind(&self) -> RegionKind {
        self.rule.kind()
    }

    /// ZIP Code Tabulation Areas keyed by their five-digit code.
    pub fn zip_codes() -> Self {
        Self::new(
            "cb_2020_us_zcta520_500k.zip",
            "cb_2020_us_zcta520_500k.shp",
            NameRule::Zip {
                code_field: "ZCTA5CE20".into(),
            },
        )
    }

    /// Incorporated places named `"<name>, <state>"`.
    pub fn cities() -> Self {
        Self::new(
            "cb_2020_us_place_500k.zip",
            "cb_2020_us_place_500k.shp",
            NameRule::City {
                name_field: "NAME".into(),
                state_field: "STUSPS".into(),
            },
        )
    }

    /// States keyed by their postal abbreviation.
    pub fn states() -> Self {
        Self::new(
            "cb_2020_us_state_500k.zip",
            "cb_2020_us_state_500k.shp",
            NameRule::State {
                abbreviation_field: "STUSPS".into(),
            },
        )
    }
}

/// ZIP codes, cities and states, in that order.
///
/// # Examples
/// ```
/// use regionbounds_core::RegionKind;
/// use regionbounds_data::default_datasets;
///
/// let kinds: Vec<_> = default_datasets().iter().map(|d| d.kind()).collect();
/// assert_eq!(kinds, RegionKind::ALL);
/// ```
pub fn default_datasets() -> Vec<SourceDataset> {
    vec![
        SourceDataset::zip_codes(),
        SourceDataset::cities(),
        SourceDataset::states(),
    ]
}
