//! JSON report writer
//!
//! Serializes the full result records (including structured matches and
//! metadata), wrapped with a timestamp and summary block.

use crate::report::Summary;
use crate::scanner::ScanResult;
use chrono::Local;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct Report<'a> {
    generated_at: String,
    summary: Summary,
    results: &'a [ScanResult],
}

pub fn write<W: Write>(w: &mut W, results: &[ScanResult]) -> io::Result<()> {
    let report = Report {
        generated_at: Local::now().to_rfc3339(),
        summary: Summary::from_results(results),
        results,
    };

    serde_json::to_writer_pretty(&mut *w, &report)?;
    writeln!(w)?;
    Ok(())
}
