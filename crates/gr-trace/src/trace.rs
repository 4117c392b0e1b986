//! JSON-lines sample traces and gesture logs.
//!
//! One JSON object per line. Blank lines and `#` comments are skipped so
//! traces can be annotated by hand.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use gr_core::{Gesture, PointerSample};

use crate::error::{Result, TraceError};

/// Parse one trace line. `Ok(None)` for blank and comment lines.
/// `line_no` is 1-based and only used for error reporting.
pub fn parse_sample_line(line: &str, line_no: usize) -> Result<Option<PointerSample>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|source| TraceError::Json {
            line: line_no,
            source,
        })
}

/// Read every sample from `reader`, stopping at the first malformed line.
pub fn read_trace(reader: impl BufRead) -> Result<Vec<PointerSample>> {
    let mut samples = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(sample) = parse_sample_line(&line, idx + 1)? {
            samples.push(sample);
        }
    }
    tracing::debug!("read {} samples", samples.len());
    Ok(samples)
}

pub fn read_trace_file(path: &Path) -> Result<Vec<PointerSample>> {
    let file = File::open(path).map_err(|e| {
        TraceError::InvalidData(format!("failed to open {}: {e}", path.display()))
    })?;
    read_trace(BufReader::new(file))
}

/// Write one gesture as a JSON line.
pub fn write_gesture(out: &mut impl Write, gesture: &Gesture) -> Result<()> {
    let json = serde_json::to_string(gesture)
        .map_err(|e| TraceError::InvalidData(format!("gesture serialization failed: {e}")))?;
    writeln!(out, "{json}")?;
    Ok(())
}
