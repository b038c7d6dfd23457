mod infer;

pub use infer::structure_input as infer_structure_format;

use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::Path;

use anyhow::{Context, Result};

pub fn stderr_is_tty() -> bool {
    io::stderr().is_terminal()
}

/// Buffered writer for `path`, or for stdout when no path is given.
pub fn create_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    let Some(path) = path else {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}
