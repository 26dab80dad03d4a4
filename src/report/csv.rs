//! CSV report writer
//!
//! One row per scanned file. Flags are joined with "; " inside a single
//! quoted cell so the row count always matches the file count.

use crate::scanner::ScanResult;
use std::io::{self, Write};

const HEADER: &str =
    "file_path,file_name,media_type,verdict,color,file_size,flags,metadata,error";

pub fn write<W: Write>(w: &mut W, results: &[ScanResult]) -> io::Result<()> {
    writeln!(w, "{}", HEADER)?;

    for r in results {
        let metadata = r
            .metadata
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("; ");

        writeln!(
            w,
            "{},{},{},{},{},{},{},{},{}",
            escape(&r.file_path),
            escape(&r.file_name),
            r.media_type,
            escape(r.verdict.label()),
            r.verdict.color(),
            r.file_size,
            escape(&r.flags.join("; ")),
            escape(&metadata),
            escape(r.error.as_deref().unwrap_or("")),
        )?;
    }

    Ok(())
}

/// Quote a field if it contains a comma, quote, or newline.
fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
