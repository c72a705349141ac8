//! # cppfmt - clang-format over whole source trees
//!
//! cppfmt walks one or more directories, finds C++ sources by file name
//! suffix (`.cpp` and `.hpp` by default) and runs `clang-format -i
//! --style=file` on each of them. Directories are independent units of work
//! spread over a worker pool; files inside a directory are formatted one
//! after another.
//!
//! ## Quick Start
//!
//! ```bash
//! # See what would be formatted
//! cppfmt --dry-run src include
//!
//! # Format in place with four workers
//! cppfmt -j 4 src include tests
//! ```
//!
//! ## Configuration
//!
//! ```toml
//! # cppfmt.toml
//! extensions = [".cc", ".h"]
//! formatter = "clang-format-18"
//! jobs = 0
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use cppfmt::Settings;
//!
//! let settings = Settings { dry_run: true, ..Settings::default() };
//! for line in cppfmt::run(&["src", "include"], &settings)? {
//!     println!("{line}");
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod discovery;
pub mod dispatch;
pub mod external;
pub mod parallel;

pub use cli::Cli;
pub use config::{CppfmtConfig, Settings};
pub use dispatch::{WorkUnit, run};
