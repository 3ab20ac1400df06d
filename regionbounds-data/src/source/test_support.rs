//! In-memory archive sources for tests and examples.
use std::{
    cell::RefCell,
    io::{Cursor, Write},
};

use async_trait::async_trait;
use zip::{ZipWriter, result::ZipError, write::SimpleFileOptions};

use super::{ArchiveSource, BaseUrl, TransportError};

/// Stub [`ArchiveSource`] implementation backed by in-memory bytes.
#[derive(Debug)]
pub struct StubSource {
    base_url: BaseUrl,
    archive: Vec<u8>,
    status: Option<u16>,
    requests: RefCell<Vec<String>>,
}

impl StubSource {
    /// Construct a stub that serves `archive` for every request.
    pub fn new(base_url: BaseUrl, archive: Vec<u8>) -> Self {
        Self {
            base_url,
            archive,
            status: None,
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Construct a stub that answers every request with an HTTP error status.
    pub fn failing(base_url: BaseUrl, status: u16) -> Self {
        Self {
            status: Some(status),
            ..Self::new(base_url, Vec::new())
        }
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    /// Build a zip archive holding the supplied `(name, contents)` entries.
    pub fn zip_archive(entries: &[(&str, &[u8])]) -> Result<Vec<u8>, ZipError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, contents) in entries {
            writer.start_file(*name, SimpleFileOptions::default())?;
            writer.write_all(contents)?;
        }
        Ok(writer.finish()?.into_inner())
    }
}

#[async_trait(?Send)]
impl ArchiveSource for StubSource {
    fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    async fn download_archive(
        &self,
        url: &str,
        sink: &mut dyn Write,
    ) -> Result<u64, TransportError> {
        self.requests.borrow_mut().push(url.to_owned());
        if let Some(status) = self.status {
            return Err(TransportError::Http {
                url: url.to_owned(),
                status,
                message: format!("stub responded with {status}"),
            });
        }
        sink.write_all(&self.archive)
            .map_err(|source| TransportError::Network {
                url: url.to_owned(),
                source,
            })?;
        Ok(u64::try_from(self.archive.len()).unwrap_or(u64::MAX))
    }
}

/// Drive a future to completion on a single-threaded Tokio runtime.
///
/// # Panics
/// Panics when the runtime cannot be constructed.
pub fn block_on_for_tests<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build Tokio runtime")
        .block_on(future)
}
