//! Report generation for scan results
//!
//! Output formatters for batches of scan results:
//!
//! - **JSON**: Machine-readable format for programmatic consumption
//! - **CSV**: Spreadsheet-compatible format for bulk triage
//!
//! # Usage
//!
//! ```ignore
//! use isitreal::report;
//!
//! // Automatically picks format based on extension
//! report::generate("report.json", &results)?;  // JSON
//! report::generate("report.csv", &results)?;   // CSV
//! ```

pub mod csv;
pub mod json;

use crate::scanner::{ScanResult, Verdict};
use std::io;
use std::path::Path;

/// Generate a report in the appropriate format based on file extension
pub fn generate<P: AsRef<Path>>(path: P, results: &[ScanResult]) -> io::Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut file = std::fs::File::create(path)?;

    match ext.as_str() {
        "json" => json::write(&mut file, results),
        _ => csv::write(&mut file, results),
    }
}

/// Summary statistics for a batch of results
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct Summary {
    pub total: usize,
    pub authentic: usize,
    pub modified: usize,
    pub generated: usize,
    pub error: usize,
}

impl Summary {
    pub fn from_results(results: &[ScanResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };

        for r in results {
            match r.verdict {
                Verdict::Authentic => summary.authentic += 1,
                Verdict::Modified => summary.modified += 1,
                Verdict::Generated => summary.generated += 1,
                Verdict::Error => summary.error += 1,
            }
        }

        summary
    }
}
