//! Shared utilities for argument processing.

use std::io::{Read, Write};
use std::path::Path;

/// Result type for command handlers.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Determine the log level based on command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides log_level argument.
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Read an input document.
///
/// Inputs:
/// - `path`: File path, or `-` for stdin.
///
/// Output:
/// - File content.
///
/// # Errors
/// - Returns `Err` when the file or stdin cannot be read.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read_to_string(path)?)
}

/// What: Write command output.
///
/// Inputs:
/// - `output`: Target file, or `None` for stdout.
/// - `content`: Text to write.
///
/// # Errors
/// - Returns `Err` when the file or stdout cannot be written.
pub fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)?;
            tracing::info!(path = %path.display(), bytes = content.len(), "output written");
        }
        None => {
            let mut out = std::io::stdout().lock();
            out.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                out.write_all(b"\n")?;
            }
            out.flush()?;
        }
    }
    Ok(())
}
