//! Error types emitted by the regionbounds CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use regionbounds_data::BuildError;
use regionbounds_data::source::SourceFetchError;
use thiserror::Error;

/// Errors emitted by the regionbounds CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// The output directory exists but is not a directory.
    #[error("output directory {path:?} is not a directory")]
    OutputDirectoryNotDirectory { path: Utf8PathBuf },
    /// A path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectPath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The HTTP archive source could not be constructed.
    #[error("failed to prepare archive source for {base_url:?}: {source}")]
    ArchiveSource {
        base_url: String,
        #[source]
        source: Box<SourceFetchError>,
    },
    /// The async runtime could not be started.
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Fetching, reading or writing failed during the build.
    #[error("build failed: {0}")]
    Build(#[source] Box<BuildError>),
    /// A release asset is absent from the output directory.
    #[error("release asset {name} is missing at {path:?}")]
    MissingArtifact {
        name: &'static str,
        path: Utf8PathBuf,
    },
    /// Serializing the release plan failed.
    #[error("failed to serialize release plan: {0}")]
    SerializeReleasePlan(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

impl From<BuildError> for CliError {
    fn from(source: BuildError) -> Self {
        Self::Build(Box::new(source))
    }
}
