//! Event artifact persistence
//!
//! The artifact is written to a sibling temporary file and renamed into place,
//! so a failed run never leaves a truncated artifact behind.

use crate::records::EventRecord;
use crate::StoreError;
use std::fs;
use std::path::Path;

/// Write the event list as pretty-printed JSON
///
/// Parent directories are created as needed.
pub fn write_events(path: &Path, events: &[EventRecord]) -> Result<(), StoreError> {
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let contents = serde_json::to_string_pretty(events)?;

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, contents).map_err(write_err)?;
    fs::rename(&tmp_path, path).map_err(|source| {
        let _ = fs::remove_file(&tmp_path);
        StoreError::Write {
            path: path.to_path_buf(),
            source,
        }
    })?;

    tracing::info!("Wrote {} event(s) to {}", events.len(), path.display());
    Ok(())
}

/// Read a previously written artifact
pub fn read_events(path: &Path) -> Result<Vec<EventRecord>, StoreError> {
    let contents = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
