//! Output for cppfmt
//!
//! Result lines go to stdout unstyled so they can be piped. Fatal errors go
//! to stderr with the same symbol styling the rest of the CLI uses.

use anyhow::Result;
use console::style;
use std::io::{self, Write};

/// Print every result line to stdout
pub fn results(lines: &[String]) -> Result<()> {
    let stdout = io::stdout();
    write_results(stdout.lock(), lines)?;
    Ok(())
}

/// Write result lines, one per line, then flush
pub fn write_results<W: Write>(mut out: W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

/// Print a fatal error with its full cause chain
pub fn error(err: &anyhow::Error) {
    // Errors are always shown, even in quiet mode
    eprintln!(
        "{} {}",
        style("✖").for_stderr().red().bold(),
        style(format!("{err:#}")).for_stderr().red()
    );
}
