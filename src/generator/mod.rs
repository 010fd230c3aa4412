//! TypeDoc invocation with executable fallback.
//!
//! The generator is run once per configured executable, in order, until an
//! attempt exits successfully. The default list covers a package-local
//! install (`node_modules/typedoc/bin`) and a hoisted workspace install
//! (`node_modules/.bin`).

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tracing::{debug, error, info, warn};

use crate::error::{AttemptError, GeneratorError};

/// Executables tried when none are configured, in order.
pub const DEFAULT_EXECUTABLES: [&str; 2] = [
    "./node_modules/typedoc/bin/typedoc",
    "./node_modules/.bin/typedoc",
];

/// Fixed TypeDoc options. Private, protected, external and non-exported
/// symbols are excluded and the generator footer is hidden.
const FIXED_OPTIONS: &[&str] = &[
    "--theme",
    "markdown",
    "--platform",
    "gitbook",
    "--ignoreCompilerErrors",
    "--excludePrivate",
    "--excludeProtected",
    "--excludeExternals",
    "--excludeNotExported",
    "--target",
    "ES5",
    "--module",
    "commonjs",
    "--hideGenerator",
];

/// Builds the TypeDoc argument list.
///
/// `--tsconfig <path>` comes first when given, then the fixed options,
/// then `--out <output>` and finally the source directory.
#[must_use]
pub fn typedoc_args(source_dir: &Path, output: &Path, tsconfig: Option<&Path>) -> Vec<OsString> {
    let mut args = Vec::with_capacity(FIXED_OPTIONS.len() + 5);
    if let Some(tsconfig) = tsconfig {
        args.push(OsString::from("--tsconfig"));
        args.push(tsconfig.as_os_str().to_owned());
    }
    args.extend(FIXED_OPTIONS.iter().map(OsString::from));
    args.push(OsString::from("--out"));
    args.push(output.as_os_str().to_owned());
    args.push(source_dir.as_os_str().to_owned());
    args
}

/// A generator run: the same arguments against an ordered list of
/// executables.
#[derive(Debug, Clone)]
pub struct Invocation {
    executables: Vec<PathBuf>,
    args: Vec<OsString>,
}

impl Invocation {
    /// Creates an invocation over `executables` with `args`.
    #[must_use]
    pub const fn new(executables: Vec<PathBuf>, args: Vec<OsString>) -> Self {
        Self { executables, args }
    }

    /// Renders the shell-quoted command line for `program`, for logs.
    #[must_use]
    pub fn command_line(&self, program: &Path) -> String {
        let parts: Vec<String> = std::iter::once(program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(|part| part.to_string_lossy().into_owned())
            .collect();
        shlex::try_join(parts.iter().map(String::as_str)).unwrap_or_else(|_| parts.join(" "))
    }

    /// Runs the generator, falling back through the executable list.
    ///
    /// Returns the executable that succeeded.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::NoExecutables` if the list is empty, or
    /// `GeneratorError::Exhausted` carrying every failed attempt.
    pub async fn run(&self) -> Result<PathBuf, GeneratorError> {
        if self.executables.is_empty() {
            return Err(GeneratorError::NoExecutables);
        }

        let mut failures = Vec::with_capacity(self.executables.len());
        for program in &self.executables {
            info!(command = %self.command_line(program), "running generator");
            match self.attempt(program).await {
                Ok(()) => return Ok(program.clone()),
                Err(e) => {
                    warn!(error = %e, "generator attempt failed");
                    failures.push(e);
                }
            }
        }

        let err = GeneratorError::Exhausted(failures);
        error!(error = %err, "all generator attempts failed");
        Err(err)
    }

    async fn attempt(&self, program: &Path) -> Result<(), AttemptError> {
        let output = tokio::process::Command::new(program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| AttemptError::Spawn {
                program: program.to_path_buf(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!(program = %program.display(), stdout = %stdout.trim(), "generator output");
        }

        if !output.status.success() {
            return Err(AttemptError::NonZeroExit {
                program: program.to_path_buf(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}
