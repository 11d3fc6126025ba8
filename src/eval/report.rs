//! Score report formatting and append-only persistence

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::core::errors::{Result, TranslationError};

/// Default report file
pub const DEFAULT_REPORT_FILE: &str = "report.txt";

/// Scores and skip counts for one (model, language) evaluation run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Model identifier the run was translated with
    pub llm: String,
    /// Destination language
    pub language: String,
    /// BLEU score, 0-100
    pub bleu: f64,
    /// chrF score, 0-100
    pub chrf: f64,
    /// Sentences skipped during the run
    pub skipped: usize,
    /// Sentences attempted during the run
    pub attempted: usize,
}

impl RunSummary {
    /// Format the report line for this run.
    ///
    /// The canonical format carries no skip information; the suffix appears
    /// only when at least one sentence was skipped.
    pub fn format_line(&self) -> String {
        let mut line = format!(
            "{}: English to {}: BLEU Score: {:.2}, CHR Score: {:.2}",
            self.llm, self.language, self.bleu, self.chrf
        );
        if self.skipped > 0 {
            line.push_str(&format!(" (skipped {} of {})", self.skipped, self.attempted));
        }
        line
    }
}

/// Append a line to the report file, creating it if absent.
pub fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| TranslationError::FileError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    writeln!(file, "{line}").map_err(|e| TranslationError::FileError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    debug!("Appended report line to {}", path.display());
    Ok(())
}
