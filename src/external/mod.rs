//! External tool integration
//!
//! cppfmt never formats anything itself. Every file is handed to an external
//! formatter which resolves its own style configuration.

pub mod formatters;

pub use formatters::{DEFAULT_FORMATTER, Formatter, FormatterError};
