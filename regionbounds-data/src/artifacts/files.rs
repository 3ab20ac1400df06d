//! The JSON search index and gzip copies of finished artefacts.

use std::io::{self, BufWriter, Write};

use camino::Utf8Path;
use flate2::{Compression, write::GzEncoder};
use regionbounds_core::SearchIndexEntry;
use regionbounds_fs::{create_utf8_file, open_utf8_file};

use super::ArtifactWriteError;

/// Write `entries` to `path` as a JSON array of `{id, name, type}` objects.
pub fn write_search_index(
    path: &Utf8Path,
    entries: &[SearchIndexEntry],
) -> Result<(), ArtifactWriteError> {
    let write_error = |source| ArtifactWriteError::WriteIndex {
        path: path.to_path_buf(),
        source,
    };
    let file = create_utf8_file(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, entries).map_err(|source| {
        ArtifactWriteError::SerializeIndex {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.flush().map_err(write_error)
}

/// Write a gzip-compressed copy of `source` to `destination`.
///
/// Returns the compressed size in bytes.
pub fn gzip_copy(source: &Utf8Path, destination: &Utf8Path) -> Result<u64, ArtifactWriteError> {
    let compress_error = |err| ArtifactWriteError::Compress {
        path: destination.to_path_buf(),
        source: err,
    };
    let mut input = open_utf8_file(source).map_err(compress_error)?;
    let output = create_utf8_file(destination).map_err(compress_error)?;
    let mut encoder = GzEncoder::new(BufWriter::new(output), Compression::default());
    io::copy(&mut input, &mut encoder).map_err(compress_error)?;
    let mut writer = encoder.finish().map_err(compress_error)?;
    writer.flush().map_err(compress_error)?;
    let file = writer.into_inner().map_err(|err| compress_error(err.into_error()))?;
    file.metadata()
        .map(|meta| meta.len())
        .map_err(compress_error)
}
