//! The `release-assets` subcommand.
//!
//! Publishing is handled by an external uploader. This command checks that the
//! four artefacts exist and prints the upload plan the uploader consumes.

use std::{fmt, io::Write};

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use regionbounds_data::ArtifactPaths;
use serde::{Deserialize, Serialize};

use crate::CliError;

pub(crate) const ARG_OUTPUT_DIR: &str = "output-dir";
pub(crate) const ARG_TAG: &str = "tag";
pub(crate) const ARG_TOKEN: &str = "token";
pub(crate) const ENV_OUTPUT_DIR: &str = "REGIONBOUNDS_CMDS_RELEASE_ASSETS_OUTPUT_DIR";
pub(crate) const ENV_TAG: &str = "REGIONBOUNDS_CMDS_RELEASE_ASSETS_TAG";
pub(crate) const ENV_TOKEN: &str = "REGIONBOUNDS_CMDS_RELEASE_ASSETS_TOKEN";

/// CLI arguments for the `release-assets` subcommand.
#[derive(Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "release-assets",
    long_about = "Verify that the build output directory holds the bounds \
                 database, search index and their gzip copies, then print \
                 the release plan as JSON.",
    about = "Describe the release upload for a version tag"
)]
#[ortho_config(prefix = "REGIONBOUNDS")]
pub(crate) struct ReleaseArgs {
    /// Directory holding the build artefacts.
    #[arg(long = ARG_OUTPUT_DIR, value_name = "path")]
    #[serde(default)]
    pub(crate) output_dir: Option<Utf8PathBuf>,
    /// Version tag identifying the release.
    #[arg(long = ARG_TAG, value_name = "tag")]
    #[serde(default)]
    pub(crate) tag: Option<String>,
    /// Credential used by the uploader.
    #[arg(long = ARG_TOKEN, value_name = "token")]
    #[serde(default)]
    pub(crate) token: Option<String>,
}

impl fmt::Debug for ReleaseArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReleaseArgs")
            .field("output_dir", &self.output_dir)
            .field("tag", &self.tag)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ReleaseArgs {
    fn into_config(self) -> Result<ReleaseConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ReleaseConfig::try_from(merged)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub(crate) struct ReleaseConfig {
    pub(crate) output_dir: Utf8PathBuf,
    pub(crate) tag: String,
    pub(crate) token: String,
}

impl fmt::Debug for ReleaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReleaseConfig")
            .field("output_dir", &self.output_dir)
            .field("tag", &self.tag)
            .field("token", &"<redacted>")
            .finish()
    }
}

fn required(
    value: Option<String>,
    field: &'static str,
    env: &'static str,
) -> Result<String, CliError> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or(CliError::MissingArgument { field, env })
}

impl TryFrom<ReleaseArgs> for ReleaseConfig {
    type Error = CliError;

    fn try_from(args: ReleaseArgs) -> Result<Self, Self::Error> {
        let output_dir = args.output_dir.ok_or(CliError::MissingArgument {
            field: ARG_OUTPUT_DIR,
            env: ENV_OUTPUT_DIR,
        })?;
        let tag = required(args.tag, ARG_TAG, ENV_TAG)?;
        let token = required(args.token, ARG_TOKEN, ENV_TOKEN)?;
        Ok(Self {
            output_dir,
            tag,
            token,
        })
    }
}

/// One named file to upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ReleaseAsset {
    pub(crate) name: &'static str,
    pub(crate) path: Utf8PathBuf,
}

/// Release tag and the assets to attach to it, in upload order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ReleasePlan {
    pub(crate) tag: String,
    pub(crate) assets: Vec<ReleaseAsset>,
}

impl ReleasePlan {
    pub(crate) fn to_json(&self) -> Result<String, CliError> {
        serde_json::to_string_pretty(self).map_err(CliError::SerializeReleasePlan)
    }

    pub(crate) fn print(&self) -> Result<(), CliError> {
        let json = self.to_json()?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{json}").map_err(CliError::WriteOutput)
    }
}

pub(crate) fn plan_release(config: &ReleaseConfig) -> Result<ReleasePlan, CliError> {
    let paths = ArtifactPaths::in_dir(&config.output_dir);
    let mut assets = Vec::with_capacity(4);
    for (name, path) in paths.release_assets() {
        let present = regionbounds_fs::file_is_file(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                CliError::MissingArtifact {
                    name,
                    path: path.to_path_buf(),
                }
            } else {
                CliError::InspectPath {
                    field: ARG_OUTPUT_DIR,
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        if !present {
            return Err(CliError::MissingArtifact {
                name,
                path: path.to_path_buf(),
            });
        }
        assets.push(ReleaseAsset {
            name,
            path: path.to_path_buf(),
        });
    }
    Ok(ReleasePlan {
        tag: config.tag.clone(),
        assets,
    })
}

pub(crate) fn run_release_assets(args: ReleaseArgs) -> Result<ReleasePlan, CliError> {
    let config = args.into_config()?;
    plan_release(&config)
}
