//! Claim Store Loader
//!
//! Reads claim batches produced by the extraction step. Inputs may be files or
//! directories; a directory contributes every `*.json` file it contains, in
//! file-name order. Batches are concatenated in argument order.
//!
//! A batch that cannot be read or parsed is skipped with a warning. The load
//! fails only when inputs were given, some could not be read, and none could.
//! A readable directory without batches yields an empty set.
//!
//! Records whose sentence is empty or whitespace carry nothing to compare;
//! they are dropped and counted in `LoadSummary::empty_sentences`.

use crate::records::BatchEntry;
use crate::{ClaimSet, StoreError};
use std::fs;
use std::path::{Path, PathBuf};

/// Statistics from one load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Batches read successfully
    pub files_read: usize,

    /// Batches skipped (unreadable or malformed)
    pub files_skipped: usize,

    /// Records dropped for having an empty sentence
    pub empty_sentences: usize,

    /// Claims whose date was present but unparseable
    pub unparsed_dates: usize,
}

/// Reads claim batches into a `ClaimSet`
///
/// # Examples
///
/// ```no_run
/// use veritas_store::ClaimLoader;
///
/// let (claims, summary) = ClaimLoader::new(vec!["data/claims".into()]).load()?;
/// println!("{} claims from {} files", claims.len(), summary.files_read);
/// # Ok::<(), veritas_store::StoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ClaimLoader {
    inputs: Vec<PathBuf>,
}

impl ClaimLoader {
    /// Create a loader over the given files and directories
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        Self { inputs }
    }

    /// Load every batch
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoInput` if there are no inputs, or if every
    /// batch that was found failed to read.
    pub fn load(&self) -> Result<(ClaimSet, LoadSummary), StoreError> {
        let mut claims = ClaimSet::new();
        let mut summary = LoadSummary::default();

        for path in self.batch_paths(&mut summary) {
            match read_batch(&path) {
                Ok(entries) => {
                    let before = claims.len();
                    append_entries(&mut claims, entries, &mut summary);
                    summary.files_read += 1;
                    tracing::debug!(
                        "Loaded {} claims from {}",
                        claims.len() - before,
                        path.display()
                    );
                }
                Err(e) => {
                    summary.files_skipped += 1;
                    tracing::warn!("Skipping batch: {}", e);
                }
            }
        }

        if self.inputs.is_empty() || (summary.files_read == 0 && summary.files_skipped > 0) {
            let listed: Vec<String> = self
                .inputs
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            return Err(StoreError::NoInput(listed.join(", ")));
        }

        summary.unparsed_dates = claims
            .iter()
            .filter(|c| matches!(c.date, veritas_domain::ClaimDate::Unparsed(_)))
            .count();

        tracing::info!(
            "Loaded {} claims from {} batch(es) ({} skipped, {} empty sentences, {} unparsed dates)",
            claims.len(),
            summary.files_read,
            summary.files_skipped,
            summary.empty_sentences,
            summary.unparsed_dates
        );

        Ok((claims, summary))
    }

    /// Expand inputs into batch file paths
    fn batch_paths(&self, summary: &mut LoadSummary) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        for input in &self.inputs {
            if input.is_dir() {
                match list_json_files(input) {
                    Ok(mut files) => {
                        files.sort();
                        paths.extend(files);
                    }
                    Err(e) => {
                        summary.files_skipped += 1;
                        tracing::warn!("Skipping directory: {}", e);
                    }
                }
            } else {
                paths.push(input.clone());
            }
        }
        paths
    }
}

fn list_json_files(dir: &Path) -> Result<Vec<PathBuf>, StoreError> {
    let read_err = |source| StoreError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    Ok(files)
}

fn read_batch(path: &Path) -> Result<Vec<BatchEntry>, StoreError> {
    let contents = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn append_entries(claims: &mut ClaimSet, entries: Vec<BatchEntry>, summary: &mut LoadSummary) {
    for entry in entries {
        match entry {
            BatchEntry::Article(article) => {
                let title = article.title.unwrap_or_default();
                let date = article.date.unwrap_or_default();
                for nested in article.claims {
                    if nested.sentence.trim().is_empty() {
                        summary.empty_sentences += 1;
                        continue;
                    }
                    claims.add(&article.source, &title, &nested.sentence, nested.entities, &date);
                }
            }
            BatchEntry::Claim(record) => {
                if record.sentence.trim().is_empty() {
                    summary.empty_sentences += 1;
                    continue;
                }
                claims.add(
                    &record.source,
                    record.title.as_deref().unwrap_or_default(),
                    &record.sentence,
                    record.entities,
                    record.date.as_deref().unwrap_or_default(),
                );
            }
        }
    }
}
