//! The `build` subcommand: fetch, aggregate and write the artefacts.

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use regionbounds_core::RegionKind;
use regionbounds_data::source::{
    ArchiveSource, DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpArchiveSource,
};
use regionbounds_data::{ArtifactPaths, SourceDataset, build_artifacts, default_datasets};
use serde::{Deserialize, Serialize};

use crate::CliError;

pub(crate) const ARG_WORK_DIR: &str = "work-dir";
pub(crate) const ARG_OUTPUT_DIR: &str = "output-dir";
pub(crate) const ENV_WORK_DIR: &str = "REGIONBOUNDS_CMDS_BUILD_WORK_DIR";
pub(crate) const ENV_OUTPUT_DIR: &str = "REGIONBOUNDS_CMDS_BUILD_OUTPUT_DIR";

/// CLI arguments for the `build` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "build",
    long_about = "Download any missing census shapefiles into the working \
                 directory, aggregate ZIP codes, cities and states, and write \
                 the bounds database, search index and their gzip copies.",
    about = "Build the bounds database and search index"
)]
#[ortho_config(prefix = "REGIONBOUNDS")]
pub(crate) struct BuildArgs {
    /// Directory where shapefiles are cached and extracted.
    #[arg(long = ARG_WORK_DIR, value_name = "path")]
    #[serde(default)]
    pub(crate) work_dir: Option<Utf8PathBuf>,
    /// Directory receiving the build artefacts.
    #[arg(long = ARG_OUTPUT_DIR, value_name = "path")]
    #[serde(default)]
    pub(crate) output_dir: Option<Utf8PathBuf>,
    /// Base URL the census archives are published under.
    #[arg(long, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    /// User agent sent with archive downloads.
    #[arg(long, value_name = "agent")]
    #[serde(default)]
    pub(crate) user_agent: Option<String>,
}

impl BuildArgs {
    fn into_config(self) -> Result<BuildConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        BuildConfig::try_from(merged)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BuildConfig {
    pub(crate) work_dir: Utf8PathBuf,
    pub(crate) output_dir: Utf8PathBuf,
    pub(crate) base_url: String,
    pub(crate) user_agent: String,
}

impl BuildConfig {
    pub(crate) fn validate(&self) -> Result<(), CliError> {
        let blocked = regionbounds_fs::exists_as_non_directory(&self.output_dir).map_err(|source| {
            CliError::InspectPath {
                field: ARG_OUTPUT_DIR,
                path: self.output_dir.clone(),
                source,
            }
        })?;
        if blocked {
            return Err(CliError::OutputDirectoryNotDirectory {
                path: self.output_dir.clone(),
            });
        }
        Ok(())
    }

    pub(crate) fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths::in_dir(&self.output_dir)
    }
}

impl TryFrom<BuildArgs> for BuildConfig {
    type Error = CliError;

    fn try_from(args: BuildArgs) -> Result<Self, Self::Error> {
        let work_dir = args.work_dir.ok_or(CliError::MissingArgument {
            field: ARG_WORK_DIR,
            env: ENV_WORK_DIR,
        })?;
        let output_dir = args.output_dir.ok_or(CliError::MissingArgument {
            field: ARG_OUTPUT_DIR,
            env: ENV_OUTPUT_DIR,
        })?;
        Ok(Self {
            work_dir,
            output_dir,
            base_url: args.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            user_agent: args
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned()),
        })
    }
}

/// Artefacts and counts produced by a successful build.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BuildOutcome {
    pub(crate) paths: ArtifactPaths,
    pub(crate) regions: usize,
    pub(crate) index_entries: usize,
    pub(crate) state_polygons: usize,
}

pub(crate) fn run_build(args: BuildArgs) -> Result<BuildOutcome, CliError> {
    let config = args.into_config()?;
    config.validate()?;
    let source = HttpArchiveSource::new(config.base_url.as_str())
        .map_err(|source| CliError::ArchiveSource {
            base_url: config.base_url.clone(),
            source: Box::new(source),
        })?
        .with_user_agent(config.user_agent.as_str());
    execute_build(&config, &source, &default_datasets())
}

pub(crate) fn execute_build<S: ArchiveSource + ?Sized>(
    config: &BuildConfig,
    source: &S,
    datasets: &[SourceDataset],
) -> Result<BuildOutcome, CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let paths = config.artifact_paths();
    let report = runtime.block_on(build_artifacts(
        source,
        datasets,
        config.work_dir.as_std_path(),
        &paths,
    ))?;

    let set = &report.region_set;
    for kind in RegionKind::ALL {
        let count = set.regions.iter().filter(|region| region.kind == kind).count();
        info!("{count} {kind} regions");
    }
    info!("Artefacts written to {}", paths.dir);
    Ok(BuildOutcome {
        regions: set.regions.len(),
        index_entries: set.search_index.len(),
        state_polygons: set.state_polygons.len(),
        paths,
    })
}
