use crate::formatter::OutputFormat;
use log::info;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to write {path}: {source}")]
pub struct SaveError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Write `document` to `name` plus the extension of `format`; returns the written path
pub fn save(document: &str, name: &Path, format: OutputFormat) -> Result<PathBuf, SaveError> {
    let mut file_name = name.as_os_str().to_owned();
    file_name.push(".");
    file_name.push(format.extension());
    let path = PathBuf::from(file_name);

    std::fs::write(&path, document).map_err(|source| SaveError {
        path: path.clone(),
        source,
    })?;

    info!("Saved {} bytes to {}", document.len(), path.display());
    Ok(path)
}
