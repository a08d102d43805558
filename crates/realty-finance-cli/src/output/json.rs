use serde_json::Value;
use std::io::{self, Write};
use tracing::error;

/// Pretty-print JSON to stdout, unrounded.
pub fn print_json(value: &Value) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = serde_json::to_writer_pretty(&mut out, value) {
        error!("JSON serialization error: {e}");
        return;
    }
    let _ = writeln!(out);
}
