//! Collect pasted text from files or stdin.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;

use log::debug;

use crate::core::error::{Result, TeleCheckError};

/// Marker argument meaning "read from stdin".
pub const STDIN_MARKER: &str = "-";

/// Read and join all input sources.
///
/// Sources are appended in order with a `\n` between them, the same way a
/// second paste is appended below the first. An empty `sources` list reads
/// stdin, unless stdin is an interactive terminal.
pub fn read_input(sources: &[String]) -> Result<String> {
    if sources.is_empty() {
        if io::stdin().is_terminal() {
            return Err(TeleCheckError::EmptyInput(
                "no files given and stdin is a terminal".to_string(),
            ));
        }
        return read_stdin();
    }

    let mut combined = String::new();
    for source in sources {
        let text = if source == STDIN_MARKER {
            read_stdin()?
        } else {
            read_file(Path::new(source))?
        };
        append_paste(&mut combined, &text);
    }

    Ok(combined)
}

/// Read one input file as UTF-8 text.
pub fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(TeleCheckError::FileNotFound(path.display().to_string()));
    }
    let text = fs::read_to_string(path)?;
    debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(text)
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    debug!("Read {} bytes from stdin", text.len());
    Ok(text)
}

/// Append `text` to `buffer`, newline-separated when `buffer` is non-empty.
pub fn append_paste(buffer: &mut String, text: &str) {
    if !buffer.is_empty() {
        buffer.push('\n');
    }
    buffer.push_str(text);
}
