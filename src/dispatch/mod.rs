//! Per-directory dispatch and the top-level run
//!
//! Each input directory becomes one [`WorkUnit`]. A unit is processed by a
//! single worker: discover files, then format them one after another in
//! discovery order. Units are spread over the worker pool and their results
//! are flattened back in input order.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::discovery::{self, Extensions};
use crate::external::Formatter;
use crate::parallel::ExecutionStrategy;

/// Fewer units than this are processed on the calling thread
const MIN_UNITS_FOR_PARALLEL: usize = 2;

/// One input directory plus the dry-run switch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkUnit {
    pub directory: PathBuf,
    pub dry_run: bool,
}

impl WorkUnit {
    pub fn new(directory: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            directory: directory.into(),
            dry_run,
        }
    }
}

/// Everything a worker needs to process a unit; shared read-only
#[derive(Debug)]
pub struct DirectoryProcessor {
    extensions: Extensions,
    follow_symlinks: bool,
    formatter: Formatter,
}

impl DirectoryProcessor {
    pub fn new(extensions: Extensions, follow_symlinks: bool, formatter: Formatter) -> Self {
        Self {
            extensions,
            follow_symlinks,
            formatter,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.extensions(),
            settings.follow_symlinks,
            Formatter::new(settings.formatter.clone()),
        )
    }

    /// Discover and format every matching file below the unit's directory.
    ///
    /// Stops at the first formatter failure; results gathered so far are
    /// dropped with it.
    pub fn process_directory(&self, unit: &WorkUnit) -> Result<Vec<String>> {
        let files = discovery::find_files(&unit.directory, &self.extensions, self.follow_symlinks);

        let mut results = Vec::with_capacity(files.len());
        for file in &files {
            let message = self
                .formatter
                .format_file(file, unit.dry_run)
                .with_context(|| format!("Failed to process directory {}", unit.directory.display()))?;
            results.push(message);
        }

        info!(
            directory = %unit.directory.display(),
            files = results.len(),
            dry_run = unit.dry_run,
            "Processed directory"
        );
        Ok(results)
    }
}

/// Keep only arguments that exist and are directories, in input order.
///
/// Everything else is dropped with a warning; dropping is never fatal.
pub fn filter_directories<P: AsRef<Path>>(paths: &[P]) -> Vec<PathBuf> {
    paths
        .iter()
        .map(|path| path.as_ref())
        .filter(|path| {
            let keep = path.is_dir();
            if !keep {
                warn!("Skipping {}: not a directory", path.display());
            }
            keep
        })
        .map(Path::to_path_buf)
        .collect()
}

/// Format (or list, in dry-run mode) every matching file under `directories`.
///
/// Returns all result lines, directory-major, in input order. Any failure
/// aborts the whole run and no results are returned.
pub fn run<P: AsRef<Path>>(directories: &[P], settings: &Settings) -> Result<Vec<String>> {
    let units: Vec<WorkUnit> = filter_directories(directories)
        .into_iter()
        .map(|directory| WorkUnit::new(directory, settings.dry_run))
        .collect();

    if units.is_empty() {
        debug!("No directories to process");
        return Ok(Vec::new());
    }

    let processor = DirectoryProcessor::from_settings(settings);
    let max_workers = ExecutionStrategy::calculate_optimal_workers(settings.jobs);
    let strategy = ExecutionStrategy::auto(units.len(), MIN_UNITS_FOR_PARALLEL, max_workers);
    debug!(
        ?strategy,
        units = units.len(),
        formatter = processor.formatter.program(),
        "Dispatching work units"
    );

    let per_directory = strategy.execute(
        units,
        |unit, worker_id| {
            debug!(worker_id, directory = %unit.directory.display(), "Processing directory");
            processor.process_directory(unit)
        },
        Some(|current: usize, total: usize, worker_id: usize| {
            debug!(worker_id, "Completed {}/{} directories", current, total);
        }),
    )?;

    Ok(per_directory.into_iter().flatten().collect())
}
