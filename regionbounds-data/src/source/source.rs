use std::{io, io::Write, time::Duration};

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::{Client, Response};

use super::util::sanitise_base_url;
use super::{BaseUrl, SourceFetchError, TransportError};

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = "regionbounds/0.1";

/// Abstraction over where compressed source archives are downloaded from.
#[async_trait(?Send)]
pub trait ArchiveSource {
    /// Base URL the archives are published under.
    fn base_url(&self) -> &BaseUrl;
    /// Stream the archive identified by `url` into `sink`, returning the byte count.
    async fn download_archive(
        &self,
        url: &str,
        sink: &mut dyn Write,
    ) -> Result<u64, TransportError>;
}

/// HTTP implementation of [`ArchiveSource`].
#[derive(Debug)]
pub struct HttpArchiveSource {
    client: Client,
    base_url: BaseUrl,
    user_agent: String,
}

impl HttpArchiveSource {
    /// Construct an HTTP-backed archive source.
    pub fn new(base_url: impl Into<String>) -> Result<Self, SourceFetchError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|source| SourceFetchError::Client { source })?;
        Ok(Self {
            client,
            base_url: sanitise_base_url(base_url),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        })
    }

    /// Override the default user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    async fn call(&self, url: &str) -> Result<Response, TransportError> {
        self.client
            .get(url)
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await
            .map_err(|err| convert_reqwest_error(err, url))?
            .error_for_status()
            .map_err(|err| convert_reqwest_error(err, url))
    }
}

#[async_trait(?Send)]
impl ArchiveSource for HttpArchiveSource {
    fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    async fn download_archive(
        &self,
        url: &str,
        sink: &mut dyn Write,
    ) -> Result<u64, TransportError> {
        let mut response = self.call(url).await?;
        let mut written = 0_u64;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|err| convert_reqwest_error(err, url))?
        {
            sink.write_all(&chunk)
                .map_err(|source| TransportError::Network {
                    url: url.to_owned(),
                    source,
                })?;
            written += u64::try_from(chunk.len()).unwrap_or(u64::MAX);
        }
        Ok(written)
    }
}

fn convert_reqwest_error(error: reqwest::Error, url: &str) -> TransportError {
    if let Some(status) = error.status() {
        return TransportError::Http {
            url: url.to_owned(),
            status: status.as_u16(),
            message: error.to_string(),
        };
    }

    let kind = if error.is_timeout() {
        io::ErrorKind::TimedOut
    } else {
        io::ErrorKind::Other
    };
    TransportError::Network {
        url: url.to_owned(),
        source: io::Error::new(kind, error),
    }
}
