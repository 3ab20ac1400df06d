//! Two-letter US state abbreviations and their English names.

/// The fifty states keyed by USPS abbreviation.
pub const STATE_NAMES: [(&str, &str); 50] = [
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
];

/// Look up the full name for a state abbreviation, ignoring ASCII case.
///
/// Territories and the District of Columbia are not in the table.
///
/// # Examples
/// ```
/// use regionbounds_core::state_name;
///
/// assert_eq!(state_name("tx"), Some("Texas"));
/// assert_eq!(state_name("DC"), None);
/// ```
#[must_use]
pub fn state_name(abbreviation: &str) -> Option<&'static str> {
    STATE_NAMES
        .iter()
        .find(|(abbr, _)| abbr.eq_ignore_ascii_case(abbreviation))
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    fn abbreviations_are_unique() {
        let unique: HashSet<_> = STATE_NAMES.iter().map(|(abbr, _)| *abbr).collect();
        assert_eq!(unique.len(), STATE_NAMES.len());
    }

    #[rstest]
    #[case("CA", Some("California"))]
    #[case("ny", Some("New York"))]
    #[case("PR", None)]
    #[case("", None)]
    fn resolves_abbreviations(#[case] abbreviation: &str, #[case] expected: Option<&str>) {
        assert_eq!(state_name(abbreviation), expected);
    }
}
