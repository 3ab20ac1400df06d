//! Unpacking downloaded zip archives into the working directory.

use std::{
    fs::{self, File},
    path::Path,
};

use log::debug;
use zip::{ZipArchive, result::ZipError};

use super::SourceFetchError;

/// Extract every entry of the zip archive at `archive` into `destination`.
///
/// Entry paths are sanitised by the `zip` crate, so entries cannot escape
/// `destination`.
pub(crate) fn extract_archive(archive: &Path, destination: &Path) -> Result<(), SourceFetchError> {
    let file = File::open(archive).map_err(|source| SourceFetchError::Extract {
        source: ZipError::from(source),
        path: archive.to_path_buf(),
    })?;
    let mut zip = ZipArchive::new(file).map_err(|source| SourceFetchError::Extract {
        source,
        path: archive.to_path_buf(),
    })?;
    debug!(
        "Extracting {} entries from {}",
        zip.len(),
        archive.display()
    );
    zip.extract(destination)
        .map_err(|source| SourceFetchError::Extract {
            source,
            path: archive.to_path_buf(),
        })
}

/// Delete an archive once its contents are on disk.
pub(crate) fn remove_archive(archive: &Path) -> Result<(), SourceFetchError> {
    fs::remove_file(archive).map_err(|source| SourceFetchError::RemoveArchive {
        source,
        path: archive.to_path_buf(),
    })
}
