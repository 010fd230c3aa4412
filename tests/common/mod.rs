//! Shared integration-test harness: a scratch project directory with a
//! fake TypeDoc installed under `node_modules`, and helpers to run the
//! `ts-doc-gen` binary inside it.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Package-local TypeDoc location.
pub const PRIMARY_GENERATOR: &str = "node_modules/typedoc/bin/typedoc";

/// Hoisted workspace TypeDoc location.
pub const HOISTED_GENERATOR: &str = "node_modules/.bin/typedoc";

/// Records its arguments, then copies the fixture pages into `--out`.
const FIXTURE_GENERATOR: &str = r#"#!/bin/sh
out=""
prev=""
for arg in "$@"; do
  if [ "$prev" = "--out" ]; then out="$arg"; fi
  prev="$arg"
done
printf '%s\n' "$@" > generator-args.txt
mkdir -p "$out"
cp -R "$TS_DOC_GEN_TEST_FIXTURES"/. "$out"/
"#;

/// Fails the way TypeDoc does on a compiler crash.
const FAILING_GENERATOR: &str = r#"#!/bin/sh
echo "tsc exploded" >&2
exit 2
"#;

/// A scratch project directory that the binary runs in.
pub struct Project {
    dir: TempDir,
}

impl Project {
    /// Creates an empty project with a `src` directory.
    #[allow(clippy::missing_panics_doc)]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        fs::create_dir_all(dir.path().join("src")).expect("failed to create src");
        Self { dir }
    }

    /// Root of the project.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Directory holding the fake generator's pages.
    pub fn fixture_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/typedoc")
    }

    fn install(&self, rel: &str, script: &str) {
        let path = self.path().join(rel);
        fs::create_dir_all(path.parent().expect("script has a parent"))
            .expect("failed to create script dir");
        fs::write(&path, script).expect("failed to write script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("failed to chmod script");
    }

    /// Installs a generator that writes the fixture pages.
    pub fn install_generator(&self, rel: &str) {
        self.install(rel, FIXTURE_GENERATOR);
    }

    /// Installs a generator that always exits with status 2.
    pub fn install_failing_generator(&self, rel: &str) {
        self.install(rel, FAILING_GENERATOR);
    }

    /// Runs `ts-doc-gen` with `args` from the project root.
    #[allow(clippy::missing_panics_doc)]
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_ts-doc-gen"))
            .args(args)
            .args(["--color", "never"])
            .current_dir(self.path())
            .env("TS_DOC_GEN_TEST_FIXTURES", Self::fixture_dir())
            .env_remove("TS_DOC_GEN_GENERATOR")
            .env_remove("TS_DOC_GEN_LOG_LEVEL")
            .env_remove("TS_DOC_GEN_LOG_FORMAT")
            .output()
            .expect("failed to spawn ts-doc-gen")
    }

    /// Runs with the standard `--src src --out docs` arguments plus `extra`.
    pub fn run_default(&self, extra: &[&str]) -> Output {
        let mut args = vec!["--src", "src", "--out", "docs"];
        args.extend_from_slice(extra);
        self.run(&args)
    }

    /// Reads a file relative to the project root.
    #[allow(clippy::missing_panics_doc)]
    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path().join(rel))
            .unwrap_or_else(|e| panic!("failed to read {rel}: {e}"))
    }

    /// Whether a path relative to the project root exists.
    pub fn exists(&self, rel: &str) -> bool {
        self.path().join(rel).exists()
    }
}
