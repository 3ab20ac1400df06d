//! Behaviour-driven step definitions driving the release-assets scenarios.

use super::helpers::{utf8_temp_dir, write_placeholder_artifacts};
use super::*;
use crate::release::{ARG_TOKEN, ReleaseArgs, ReleaseConfig, ReleasePlan, plan_release};
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::{cell::RefCell, fs};
use tempfile::TempDir;

const TOKEN: &str = "ghp-example-token";

struct ReleaseWorld {
    _dir: TempDir,
    output_dir: Utf8PathBuf,
    args: RefCell<ReleaseArgs>,
    result: RefCell<Option<Result<ReleasePlan, CliError>>>,
}

impl ReleaseWorld {
    fn new() -> Self {
        let (dir, root) = utf8_temp_dir();
        Self {
            _dir: dir,
            output_dir: root.join("dist"),
            args: RefCell::new(ReleaseArgs::default()),
            result: RefCell::new(None),
        }
    }

    fn with_plan<T>(&self, check: impl FnOnce(&ReleasePlan) -> T) -> T {
        let borrowed = self.result.borrow();
        match borrowed.as_ref().expect("planning was attempted") {
            Ok(plan) => check(plan),
            Err(err) => panic!("expected a release plan, got {err:?}"),
        }
    }

    fn with_error<T>(&self, check: impl FnOnce(&CliError) -> T) -> T {
        let borrowed = self.result.borrow();
        match borrowed.as_ref().expect("planning was attempted") {
            Ok(plan) => panic!("expected planning to fail, got {plan:?}"),
            Err(err) => check(err),
        }
    }
}

#[fixture]
fn world() -> ReleaseWorld {
    ReleaseWorld::new()
}

#[given("a build output directory holding all four artefacts")]
fn complete_build(#[from(world)] world: &ReleaseWorld) {
    write_placeholder_artifacts(&world.output_dir);
}

#[given("a build output directory missing the compressed index")]
fn incomplete_build(#[from(world)] world: &ReleaseWorld) {
    let paths = write_placeholder_artifacts(&world.output_dir);
    fs::remove_file(&paths.search_index_gz).expect("remove compressed index");
}

#[given("the release tag \"v2024.06.01\" with a token")]
fn tag_with_token(#[from(world)] world: &ReleaseWorld) {
    let mut args = world.args.borrow_mut();
    args.tag = Some("v2024.06.01".into());
    args.token = Some(TOKEN.into());
}

#[given("the release tag \"v2024.06.01\" without a token")]
fn tag_without_token(#[from(world)] world: &ReleaseWorld) {
    let mut args = world.args.borrow_mut();
    args.tag = Some("v2024.06.01".into());
    args.token = None;
}

#[when("I plan the release")]
fn plan(#[from(world)] world: &ReleaseWorld) {
    let mut args = world.args.borrow().clone();
    args.output_dir = Some(world.output_dir.clone());
    let outcome = ReleaseConfig::try_from(args).and_then(|config| plan_release(&config));
    world.result.replace(Some(outcome));
}

#[then("the plan lists the four artefacts in upload order")]
fn lists_assets(#[from(world)] world: &ReleaseWorld) {
    world.with_plan(|plan| {
        assert_eq!(plan.tag, "v2024.06.01");
        let names: Vec<_> = plan.assets.iter().map(|asset| asset.name).collect();
        assert_eq!(
            names,
            [
                "region_bounds.db",
                "search_index.json",
                "region_bounds.db.gz",
                "search_index.json.gz"
            ]
        );
        assert!(
            plan.assets
                .iter()
                .all(|asset| asset.path.starts_with(&world.output_dir))
        );
    });
}

#[then("the plan does not reveal the token")]
fn hides_token(#[from(world)] world: &ReleaseWorld) {
    world.with_plan(|plan| {
        let json = plan.to_json().expect("plan serializes");
        assert!(!json.contains(TOKEN));
    });
}

#[then("planning fails because the token is missing")]
fn missing_token(#[from(world)] world: &ReleaseWorld) {
    world.with_error(|err| match err {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_TOKEN),
        other => panic!("expected MissingArgument, got {other:?}"),
    });
}

#[then("planning fails naming \"search_index.json.gz\"")]
fn missing_asset(#[from(world)] world: &ReleaseWorld) {
    world.with_error(|err| match err {
        CliError::MissingArtifact { name, .. } => assert_eq!(*name, "search_index.json.gz"),
        other => panic!("expected MissingArtifact, got {other:?}"),
    });
}

#[scenario(path = "tests/features/release_assets.feature", index = 0)]
fn planning_a_complete_release(#[from(world)] world: ReleaseWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/release_assets.feature", index = 1)]
fn refusing_without_token(#[from(world)] world: ReleaseWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/release_assets.feature", index = 2)]
fn refusing_incomplete_build(#[from(world)] world: ReleaseWorld) {
    let _ = world;
}
