//! Per-dataset rules deriving a region's lookup name from record attributes.

use crate::{Attributes, RegionKind};

/// How a source record's attributes map to a region name.
///
/// Names are trimmed and lowercased. A rule yields `None` when a required
/// field is absent or blank, in which case the record is skipped.
///
/// # Examples
/// ```
/// use regionbounds_core::{Attributes, NameRule, RegionKind};
///
/// let rule = NameRule::City {
///     name_field: "NAME".into(),
///     state_field: "STUSPS".into(),
/// };
/// let attributes = Attributes::from([
///     ("NAME".to_owned(), "Beverly Hills".to_owned()),
///     ("STUSPS".to_owned(), "CA".to_owned()),
/// ]);
/// assert_eq!(rule.kind(), RegionKind::City);
/// assert_eq!(rule.derive_name(&attributes).as_deref(), Some("beverly hills, ca"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameRule {
    /// Raw ZIP code taken from a single field.
    Zip {
        /// Field holding the five-digit code.
        code_field: String,
    },
    /// Place name joined with its state abbreviation.
    City {
        /// Field holding the place name.
        name_field: String,
        /// Field holding the two-letter state abbreviation.
        state_field: String,
    },
    /// Two-letter state abbreviation.
    State {
        /// Field holding the abbreviation.
        abbreviation_field: String,
    },
}

impl NameRule {
    /// Region class produced by this rule.
    #[must_use]
    pub const fn kind(&self) -> RegionKind {
        match self {
            Self::Zip { .. } => RegionKind::Zip,
            Self::City { .. } => RegionKind::City,
            Self::State { .. } => RegionKind::State,
        }
    }

    /// Derive the normalised name for a record, if the record carries one.
    #[must_use]
    pub fn derive_name(&self, attributes: &Attributes) -> Option<String> {
        match self {
            Self::Zip { code_field } => field(attributes, code_field).map(str::to_lowercase),
            Self::City {
                name_field,
                state_field,
            } => {
                let name = field(attributes, name_field)?;
                let state = field(attributes, state_field)?;
                Some(format!("{name}, {state}").to_lowercase())
            }
            Self::State { abbreviation_field } => {
                field(attributes, abbreviation_field).map(str::to_lowercase)
            }
        }
    }
}

fn field<'a>(attributes: &'a Attributes, key: &str) -> Option<&'a str> {
    attributes
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}
