//! Domain wrappers for archive endpoints, archive names and fetch results.
//! Provides small, typed newtypes with ergonomic trait impls and Rustdoc examples.

use std::{fmt, path::PathBuf};

use url::Url;

/// Base URL under which the source archives are published.
///
/// # Examples
/// ```
/// # use regionbounds_data::source::BaseUrl;
/// let url = BaseUrl::new("https://www2.census.gov/geo/tiger/GENZ2020/shp");
/// assert!(url.as_ref().ends_with("/shp"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Construct a new [`BaseUrl`] from an owned or borrowed string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Join an archive name onto the base URL.
    ///
    /// # Examples
    /// ```
    /// # use regionbounds_data::source::{ArchiveName, BaseUrl};
    /// let base = BaseUrl::from("https://example.org/shp");
    /// let url = base.archive_url(&ArchiveName::from("states.zip")).expect("valid URL");
    /// assert_eq!(url.as_ref(), "https://example.org/shp/states.zip");
    /// ```
    pub fn archive_url(&self, archive: &ArchiveName) -> Result<ArchiveUrl, url::ParseError> {
        Url::parse(&format!("{}/{}", self.0, archive.as_ref())).map(Into::into)
    }
}

impl From<&str> for BaseUrl {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// File name of a compressed source archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveName(String);

impl ArchiveName {
    /// Construct a new [`ArchiveName`] from an owned or borrowed string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl From<&str> for ArchiveName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for ArchiveName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArchiveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully qualified URL pointing to a source archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveUrl(String);

impl AsRef<str> for ArchiveUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArchiveUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Url> for ArchiveUrl {
    fn from(value: Url) -> Self {
        Self(value.into())
    }
}

/// How a required shapefile came to be present on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The shapefile was already in the working directory.
    AlreadyPresent {
        /// Location of the shapefile.
        path: PathBuf,
    },
    /// The archive was downloaded, extracted and removed.
    Downloaded {
        /// Location of the extracted shapefile.
        path: PathBuf,
        /// Archive size in bytes.
        bytes: u64,
    },
}

impl FetchOutcome {
    /// Location of the shapefile regardless of how it arrived.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::AlreadyPresent { path } | Self::Downloaded { path, .. } => path,
        }
    }
}
