//! Shared integration-test harness for running the `recipebook` binary
//! against the fixture corpora.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Environment variables the binary reads; cleared so the host shell
/// cannot leak into a test.
const ENV_VARS: [&str; 6] = [
    "RECIPEBOOK_CONFIG",
    "RECIPEBOOK_CONTENT_DIR",
    "RECIPEBOOK_OUTPUT_DIR",
    "RECIPEBOOK_COLOR",
    "RECIPEBOOK_LOG_LEVEL",
    "RECIPEBOOK_MAX_FILE_SIZE",
];

/// Returns the path to a file or directory under `tests/fixtures/`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Configuration file of the valid fixture site.
pub fn site_config() -> PathBuf {
    fixture_path("site/recipebook.yaml")
}

/// Runs `recipebook` with `args` from `cwd` and waits for it to exit.
pub fn run_in(cwd: &Path, args: &[&str]) -> Output {
    run_with_env(cwd, args, &[])
}

/// Runs `recipebook` from `cwd` with only the given `RECIPEBOOK_*`
/// variables set.
#[allow(clippy::missing_panics_doc)]
pub fn run_with_env(cwd: &Path, args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_recipebook"));
    command.args(args).current_dir(cwd);
    for var in ENV_VARS {
        command.env_remove(var);
    }
    command.envs(env.iter().copied());
    command.output().expect("failed to run recipebook")
}

/// Runs `recipebook` with `args` from a scratch directory.
///
/// The scratch directory has no `recipebook.yaml`, so only explicit
/// `--config` and `--content-dir` arguments are picked up.
pub fn run(args: &[&str]) -> Output {
    let scratch = tempfile::tempdir().expect("failed to create scratch dir");
    run_in(scratch.path(), args)
}

/// Captured stdout as UTF-8.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Captured stderr as UTF-8.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Converts a path to `&str`, panicking on non-UTF-8 paths.
pub fn path_str(path: &Path) -> &str {
    path.to_str().expect("non-UTF-8 path")
}
