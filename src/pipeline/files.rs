//! Best-effort filesystem operations used between the external tool runs.
//!
//! None of these propagate errors. Directory operations return the error for
//! the caller to record; batch operations fan out one task per entry and
//! collect the outcome into a [`FileBatchReport`].

use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One entry that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of a fan-out over the entries of one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileBatchReport {
    /// Destination paths written.
    pub succeeded: Vec<PathBuf>,
    /// Entries left alone (directories, non-matching extensions).
    pub skipped: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
}

impl FileBatchReport {
    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn listing_failed(dir: &Path, error: impl ToString) -> Self {
        Self {
            failures: vec![FileFailure {
                path: dir.to_path_buf(),
                error: error.to_string(),
            }],
            ..Self::default()
        }
    }
}

enum EntryOutcome {
    Done(PathBuf),
    Skipped(PathBuf),
    Failed(FileFailure),
}

fn into_report(outcomes: Vec<EntryOutcome>) -> FileBatchReport {
    let mut report = FileBatchReport::default();
    for outcome in outcomes {
        match outcome {
            EntryOutcome::Done(path) => report.succeeded.push(path),
            EntryOutcome::Skipped(path) => report.skipped.push(path),
            EntryOutcome::Failed(failure) => report.failures.push(failure),
        }
    }
    report
}

/// Remove a directory tree. A missing directory counts as removed.
pub fn remove_directory(dir: &Path) -> io::Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    tracing::info!("Directory {} removed", dir.display());
    Ok(())
}

pub fn create_directory(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    tracing::info!("Directory {} created", dir.display());
    Ok(())
}

/// A child of a listed directory, or the error reading it.
enum Listed {
    Entry(walkdir::DirEntry),
    Unreadable(FileFailure),
}

/// List the immediate children of `dir`, sorted by file name.
///
/// Only a failure to read `dir` itself is returned as `Err`; a bad child is
/// kept in place so its siblings are still processed. Links are not
/// followed here.
fn list_entries(dir: &Path) -> Result<Vec<Listed>, walkdir::Error> {
    let mut listed = Vec::new();
    for item in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        match item {
            Ok(entry) => listed.push(Listed::Entry(entry)),
            Err(err) if err.depth() == 0 => return Err(err),
            Err(err) => {
                let path = err.path().unwrap_or(dir).to_path_buf();
                tracing::error!("Error reading {}: {}", path.display(), err);
                listed.push(Listed::Unreadable(FileFailure {
                    path,
                    error: err.to_string(),
                }));
            }
        }
    }
    Ok(listed)
}

/// Directories, and links resolving to one, are never copied or renamed.
fn is_directory(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
}

/// Copy every file directly under `source_dir` into `dest_dir`.
///
/// `dest_dir` is created if missing. Subdirectories are skipped. Links are
/// copied as their target content. Each copy runs independently; one failure,
/// such as a dangling link, does not stop the others.
pub fn copy_files(source_dir: &Path, dest_dir: &Path) -> FileBatchReport {
    let entries = match list_entries(source_dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::error!(
                "Error copying files from {} to {}: {}",
                source_dir.display(),
                dest_dir.display(),
                err
            );
            return FileBatchReport::listing_failed(source_dir, err);
        }
    };

    if let Err(err) = fs::create_dir_all(dest_dir) {
        tracing::error!("Error creating directory {}: {}", dest_dir.display(), err);
        return FileBatchReport::listing_failed(dest_dir, err);
    }

    let outcomes: Vec<EntryOutcome> = entries
        .into_par_iter()
        .map(|listed| {
            let entry = match listed {
                Listed::Entry(entry) => entry,
                Listed::Unreadable(failure) => return EntryOutcome::Failed(failure),
            };
            if is_directory(&entry) {
                return EntryOutcome::Skipped(entry.into_path());
            }

            let name = entry.file_name();
            let dest = dest_dir.join(name);
            match fs::copy(entry.path(), &dest) {
                Ok(_) => {
                    tracing::info!(
                        "Copied {} to {}",
                        name.to_string_lossy(),
                        dest_dir.display()
                    );
                    EntryOutcome::Done(dest)
                }
                Err(err) => {
                    tracing::error!(
                        "Error copying {} to {}: {}",
                        entry.path().display(),
                        dest.display(),
                        err
                    );
                    EntryOutcome::Failed(FileFailure {
                        path: entry.into_path(),
                        error: err.to_string(),
                    })
                }
            }
        })
        .collect();

    into_report(outcomes)
}

/// `foo.js` -> `foo.cjs`; anything else is left alone.
fn cjs_name(file_name: &str) -> Option<String> {
    let stem = file_name.strip_suffix(".js")?;
    if stem.is_empty() {
        return None;
    }
    Some(format!("{stem}.cjs"))
}

/// Rename every `.js` file directly under `dir` to `.cjs`.
///
/// The directory is listed once up front, so a renamed file is never seen
/// again. Other files are skipped silently.
pub fn rename_js_to_cjs(dir: &Path) -> FileBatchReport {
    let entries = match list_entries(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::error!("Error renaming files in {}: {}", dir.display(), err);
            return FileBatchReport::listing_failed(dir, err);
        }
    };

    let outcomes: Vec<EntryOutcome> = entries
        .into_par_iter()
        .map(|listed| {
            let entry = match listed {
                Listed::Entry(entry) => entry,
                Listed::Unreadable(failure) => return EntryOutcome::Failed(failure),
            };
            let target = entry
                .file_name()
                .to_str()
                .filter(|_| !is_directory(&entry))
                .and_then(cjs_name);
            let Some(target) = target else {
                return EntryOutcome::Skipped(entry.into_path());
            };

            let renamed = dir.join(&target);
            match fs::rename(entry.path(), &renamed) {
                Ok(()) => {
                    tracing::info!(
                        "Renamed {} to {}",
                        entry.file_name().to_string_lossy(),
                        target
                    );
                    EntryOutcome::Done(renamed)
                }
                Err(err) => {
                    tracing::error!("Error renaming {}: {}", entry.path().display(), err);
                    EntryOutcome::Failed(FileFailure {
                        path: entry.into_path(),
                        error: err.to_string(),
                    })
                }
            }
        })
        .collect();

    into_report(outcomes)
}
