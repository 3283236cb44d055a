pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

use crate::error::Result;

/// Read a typed JSON payload from `--input <file>` or, failing that, piped
/// stdin. Returns `None` when neither is available.
pub fn read_payload<T: DeserializeOwned>(path: Option<&str>) -> Result<Option<T>> {
    if let Some(path) = path {
        return file::read_json(path).map(Some);
    }
    stdin::read_stdin()
}
