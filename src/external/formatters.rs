//! Formatter invocation
//!
//! Runs the configured formatter on one file at a time, editing it in place
//! and letting the tool pick up `.clang-format` from the file's directory
//! hierarchy.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, trace};

/// Formatter used when nothing else is configured
pub const DEFAULT_FORMATTER: &str = "clang-format";

/// Edit in place, style from the nearest `.clang-format` above the file
const IN_PLACE_ARG: &str = "-i";
const STYLE_ARG: &str = "--style=file";

#[derive(Debug, Error)]
pub enum FormatterError {
    #[error("formatter `{program}` was not found on PATH")]
    NotFound { program: String },

    #[error("failed to launch formatter `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("formatter `{program}` failed on {} ({status})", .path.display())]
    Failed {
        program: String,
        path: PathBuf,
        status: ExitStatus,
    },
}

/// Handle to an external formatter program.
///
/// The program is looked up on PATH once, on the first real invocation, and
/// the handle is shared by reference across worker threads.
#[derive(Debug)]
pub struct Formatter {
    program: String,
    resolved: OnceLock<Option<PathBuf>>,
}

impl Formatter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            resolved: OnceLock::new(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn resolve(&self) -> Result<&Path, FormatterError> {
        self.resolved
            .get_or_init(|| {
                let found = which::which(&self.program).ok();
                trace!(program = %self.program, resolved = ?found, "Resolved formatter");
                found
            })
            .as_deref()
            .ok_or_else(|| FormatterError::NotFound {
                program: self.program.clone(),
            })
    }

    /// Format `path` in place, or only describe it when `dry_run` is set.
    ///
    /// A dry run never touches the filesystem and never looks the program up.
    /// The tool's own stdout/stderr are inherited so its diagnostics reach the
    /// user unchanged.
    pub fn format_file(&self, path: &Path, dry_run: bool) -> Result<String, FormatterError> {
        if dry_run {
            return Ok(format!("Would format: {}", path.display()));
        }

        let program = self.resolve()?;
        debug!(file = %path.display(), "Running {}", self.program);

        let status = Command::new(program)
            .arg(IN_PLACE_ARG)
            .arg(path)
            .arg(STYLE_ARG)
            .status()
            .map_err(|source| FormatterError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(FormatterError::Failed {
                program: self.program.clone(),
                path: path.to_path_buf(),
                status,
            });
        }

        Ok(format!("Formatted: {}", path.display()))
    }
}
