//! Publish-time mutation of `package.json`.
//!
//! `backup` and `restore` bracket a publish; `modify` strips the fields that
//! only matter inside the repository. The backup is a verbatim copy and is
//! deleted as soon as it has been restored.

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::str::FromStr;

use crate::paths::ManifestPaths;

/// Top-level fields removed by [`modify`].
pub const STRIPPED_FIELDS: [&str; 4] = ["devDependencies", "scripts", "private", "jest"];

pub const USAGE: &str = "Unknown action. Use \"backup\", \"restore\", or \"modify\".";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestAction {
    Backup,
    Restore,
    Modify,
}

impl FromStr for ManifestAction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "backup" => Ok(Self::Backup),
            "restore" => Ok(Self::Restore),
            "modify" => Ok(Self::Modify),
            _ => bail!(USAGE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    BackedUp,
    /// A backup was already present and left untouched.
    BackupExists,
    Restored,
    NoBackup,
    Modified { removed: Vec<String> },
}

impl fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BackedUp => f.write_str("manifest backed up"),
            Self::BackupExists => f.write_str("backup already exists; left untouched"),
            Self::Restored => f.write_str("manifest restored from backup"),
            Self::NoBackup => f.write_str("no backup present; nothing to restore"),
            Self::Modified { removed } if removed.is_empty() => {
                f.write_str("manifest rewritten; no fields to remove")
            }
            Self::Modified { removed } => {
                write!(f, "manifest rewritten without: {}", removed.join(", "))
            }
        }
    }
}

pub fn run(action: ManifestAction, paths: &ManifestPaths) -> Result<ActionOutcome> {
    match action {
        ManifestAction::Backup => backup(paths),
        ManifestAction::Restore => restore(paths),
        ManifestAction::Modify => modify(paths),
    }
}

/// Copy the manifest to its backup path unless a backup already exists.
pub fn backup(paths: &ManifestPaths) -> Result<ActionOutcome> {
    if paths.backup.exists() {
        return Ok(ActionOutcome::BackupExists);
    }
    fs::copy(&paths.manifest, &paths.backup).with_context(|| {
        format!(
            "backing up '{}' to '{}'",
            paths.manifest.display(),
            paths.backup.display()
        )
    })?;
    Ok(ActionOutcome::BackedUp)
}

/// Copy the backup over the manifest, then delete the backup.
pub fn restore(paths: &ManifestPaths) -> Result<ActionOutcome> {
    if !paths.backup.exists() {
        return Ok(ActionOutcome::NoBackup);
    }
    fs::copy(&paths.backup, &paths.manifest).with_context(|| {
        format!(
            "restoring '{}' from '{}'",
            paths.manifest.display(),
            paths.backup.display()
        )
    })?;
    fs::remove_file(&paths.backup)
        .with_context(|| format!("removing backup '{}'", paths.backup.display()))?;
    Ok(ActionOutcome::Restored)
}

/// Remove [`STRIPPED_FIELDS`] and rewrite with two-space indentation.
pub fn modify(paths: &ManifestPaths) -> Result<ActionOutcome> {
    let raw = fs::read_to_string(&paths.manifest)
        .with_context(|| format!("reading manifest '{}'", paths.manifest.display()))?;
    let (stripped, removed) = strip_fields(&raw)
        .with_context(|| format!("parsing manifest '{}'", paths.manifest.display()))?;
    fs::write(&paths.manifest, stripped)
        .with_context(|| format!("writing manifest '{}'", paths.manifest.display()))?;
    Ok(ActionOutcome::Modified { removed })
}

/// Returns the re-serialized document and the names of the fields removed.
fn strip_fields(raw: &str) -> Result<(String, Vec<String>)> {
    let document: Value = serde_json::from_str(raw)?;
    let Value::Object(fields) = document else {
        bail!("manifest is not a JSON object");
    };

    let mut removed = Vec::new();
    let kept: Map<String, Value> = fields
        .into_iter()
        .filter(|(key, _)| {
            let strip = STRIPPED_FIELDS.contains(&key.as_str());
            if strip {
                removed.push(key.clone());
            }
            !strip
        })
        .collect();

    let normalized = integral_floats_as_ints(Value::Object(kept));
    let rendered = serde_json::to_string_pretty(&normalized)?;
    Ok((rendered, removed))
}

/// Write whole-number floats (`1.0`, `1e3`) as integers, the way JavaScript
/// serializes numbers. Values outside the `i64` range keep their float form.
fn integral_floats_as_ints(value: Value) -> Value {
    match value {
        Value::Number(number) => match number.as_f64() {
            Some(float)
                if number.is_f64()
                    && float.fract() == 0.0
                    && float >= i64::MIN as f64
                    && float < i64::MAX as f64 =>
            {
                Value::from(float as i64)
            }
            _ => Value::Number(number),
        },
        Value::Array(items) => {
            Value::Array(items.into_iter().map(integral_floats_as_ints).collect())
        }
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(key, field)| (key, integral_floats_as_ints(field)))
                .collect(),
        ),
        other => other,
    }
}
