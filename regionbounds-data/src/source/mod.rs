//! Facilities for making the source shapefiles available on disk.
//!
//! The working directory is a plain [`std::path::Path`] cache handled through
//! `std::fs`; only the artefact writer goes through `regionbounds-fs`.
#![forbid(unsafe_code)]

mod error;
mod extract;
mod ops;
mod source;
#[cfg(any(test, doc, feature = "test-support"))]
pub mod test_support;
mod types;
mod util;

pub use error::{SourceFetchError, TransportError};
pub use ops::ensure_source_file;
pub use source::{ArchiveSource, DEFAULT_USER_AGENT, HttpArchiveSource};
#[cfg(any(test, doc, feature = "test-support"))]
pub use test_support::{StubSource, block_on_for_tests};
pub use types::{ArchiveName, ArchiveUrl, BaseUrl, FetchOutcome};
pub use util::DEFAULT_BASE_URL;
