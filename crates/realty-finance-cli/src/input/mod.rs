pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Load a JSON document from `--input`, else from piped stdin.
///
/// Returns `Ok(None)` when neither is available so callers can fall back
/// to individual flags.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return file::read_json(path).map(Some);
    }
    stdin::read_stdin_json()
}
