use std::{
    fs::{self, File},
    io::Write,
    path::Path,
};

use log::info;

use super::extract::{extract_archive, remove_archive};
use super::source::ArchiveSource;
use super::{ArchiveName, FetchOutcome, SourceFetchError};

/// Ensure `shapefile` exists inside `work_dir`, downloading `archive` if not.
///
/// When the shapefile is missing the archive is fetched from the source's
/// base URL, written into `work_dir`, unpacked there and then deleted. A
/// failed download or extraction aborts without retrying; a partially written
/// archive is left in place and overwritten by the next attempt.
///
/// # Examples
/// ```
/// # use tempfile::tempdir;
/// # use regionbounds_data::source::{
/// #     ArchiveName, BaseUrl, FetchOutcome, SourceFetchError, StubSource, ensure_source_file,
/// # };
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let archive = StubSource::zip_archive(&[("states.shp", b"shape".as_slice())])?;
/// let source = StubSource::new(BaseUrl::from("https://example.org"), archive);
/// let work_dir = tempdir()?;
/// let outcome = tokio::runtime::Runtime::new()?.block_on(async {
///     ensure_source_file(
///         &source,
///         &ArchiveName::from("states.zip"),
///         "states.shp",
///         work_dir.path(),
///     )
///     .await
/// })?;
/// assert!(matches!(outcome, FetchOutcome::Downloaded { .. }));
/// assert!(work_dir.path().join("states.shp").is_file());
/// assert!(!work_dir.path().join("states.zip").exists());
/// # Ok(())
/// # }
/// ```
pub async fn ensure_source_file<S: ArchiveSource + ?Sized>(
    source: &S,
    archive: &ArchiveName,
    shapefile: &str,
    work_dir: &Path,
) -> Result<FetchOutcome, SourceFetchError> {
    let target = work_dir.join(shapefile);
    if target.is_file() {
        info!("Using cached {}", target.display());
        return Ok(FetchOutcome::AlreadyPresent { path: target });
    }

    fs::create_dir_all(work_dir).map_err(|source| SourceFetchError::CreateDir {
        source,
        path: work_dir.to_path_buf(),
    })?;
    let url = source
        .base_url()
        .archive_url(archive)
        .map_err(|source| SourceFetchError::InvalidUrl {
            archive: archive.to_string(),
            source,
        })?;
    let archive_path = work_dir.join(archive.as_ref());
    let bytes = download_to(source, url.as_ref(), &archive_path).await?;
    info!("Downloaded {url} ({bytes} bytes)");

    extract_archive(&archive_path, work_dir)?;
    if !target.is_file() {
        return Err(SourceFetchError::MissingAfterExtract {
            archive: archive_path,
            expected: target,
        });
    }
    remove_archive(&archive_path)?;
    info!(
        "Extracted {} and removed {}",
        target.display(),
        archive_path.display()
    );
    Ok(FetchOutcome::Downloaded {
        path: target,
        bytes,
    })
}

async fn download_to<S: ArchiveSource + ?Sized>(
    source: &S,
    url: &str,
    path: &Path,
) -> Result<u64, SourceFetchError> {
    let mut file = File::create(path).map_err(|source| SourceFetchError::WriteArchive {
        source,
        path: path.to_path_buf(),
    })?;
    let bytes = source
        .download_archive(url, &mut file)
        .await
        .map_err(|source| SourceFetchError::Download { source })?;
    file.flush()
        .map_err(|source| SourceFetchError::WriteArchive {
            source,
            path: path.to_path_buf(),
        })?;
    Ok(bytes)
}
