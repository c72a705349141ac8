//! Source file discovery
//!
//! Walks a directory tree and collects every regular file whose name ends
//! with one of the configured suffixes. Hidden entries and ignore files get
//! no special treatment: a `.gitignore` does not hide sources from the
//! formatter.

use ignore::{DirEntry, WalkBuilder};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Suffixes formatted when nothing else is configured
pub const DEFAULT_EXTENSIONS: [&str; 2] = [".cpp", ".hpp"];

/// Case-sensitive file name suffixes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extensions(Vec<String>);

impl Extensions {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            suffixes
                .into_iter()
                .map(|suffix| suffix.as_ref().to_string())
                .collect(),
        )
    }

    /// True when the file name ends with any suffix.
    ///
    /// This is a plain suffix test on the name, so `.cpp` itself matches and
    /// `main.CPP` does not.
    pub fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.as_encoded_bytes();
        self.0.iter().any(|suffix| name.ends_with(suffix.as_bytes()))
    }
}

impl Default for Extensions {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS)
    }
}

/// Recursively find files under `root` matching `extensions`.
///
/// Paths are returned in traversal order, prefixed with `root` exactly as
/// given. Unreadable entries are logged and skipped; an empty tree yields an
/// empty list.
pub fn find_files(root: &Path, extensions: &Extensions, follow_symlinks: bool) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(follow_symlinks)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) => {
                if is_source_file(&entry) && extensions.matches(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => {
                warn!("Walk error under {}: {}", root.display(), e);
            }
        }
    }

    debug!(
        root = %root.display(),
        matches = files.len(),
        "Discovered source files"
    );
    files
}

/// Regular files, and symlinks whose target is a regular file.
///
/// Directory symlinks are only descended into when the walker follows links,
/// in which case they are reported as directories and never reach here as
/// links.
fn is_source_file(entry: &DirEntry) -> bool {
    match entry.file_type() {
        Some(ft) if ft.is_file() => true,
        Some(ft) if ft.is_symlink() => entry.path().metadata().is_ok_and(|meta| meta.is_file()),
        _ => false,
    }
}
