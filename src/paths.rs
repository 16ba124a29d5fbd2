//! Package layout.
//!
//! Every location the tools touch is a fixed offset from the package root.
//! The root is resolved once at startup and the derived paths are handed to
//! each operation, so tests can point them at a temporary directory.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable that overrides package root discovery.
pub const ROOT_ENV: &str = "ICONS_BUILD_ROOT";

const MANIFEST_FILENAME: &str = "package.json";
const BACKUP_SUFFIX: &str = ".backup";

/// Resolve the package root.
///
/// `ICONS_BUILD_ROOT` wins when set. Otherwise the nearest ancestor of the
/// current directory holding a `package.json` is used.
pub fn locate_package_root() -> Result<PathBuf> {
    if let Some(root) = std::env::var_os(ROOT_ENV) {
        let root = PathBuf::from(root);
        if !root.is_dir() {
            bail!(
                "{} points at '{}', which is not a directory",
                ROOT_ENV,
                root.display()
            );
        }
        return Ok(root);
    }

    let cwd = std::env::current_dir().context("resolving current directory")?;
    find_package_root(&cwd)
}

pub(crate) fn find_package_root(start: &Path) -> Result<PathBuf> {
    for ancestor in start.ancestors() {
        if ancestor.join(MANIFEST_FILENAME).is_file() {
            return Ok(ancestor.to_path_buf());
        }
    }
    bail!(
        "unable to locate package root from '{}'; no ancestor contains {} (set {} to override)",
        start.display(),
        MANIFEST_FILENAME,
        ROOT_ENV
    )
}

/// Directories used by the build pipeline.
#[derive(Debug, Clone)]
pub struct BuildPaths {
    /// Package root; working directory for external tools.
    pub root: PathBuf,
    /// Distributable output tree.
    pub dist: PathBuf,
    /// Copies of the source icons inside the output tree.
    pub dist_icons: PathBuf,
    /// CommonJS output, renamed to `.cjs`.
    pub dist_cjs: PathBuf,
    /// Source SVG icons.
    pub icons: PathBuf,
    /// Handlebars templates for the font generator.
    pub templates: PathBuf,
    /// Scratch output of the declaration pass.
    pub temp_cjs: PathBuf,
}

impl BuildPaths {
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let dist = root.join("dist");
        Self {
            dist_icons: dist.join("icons"),
            dist_cjs: dist.join("cjs"),
            icons: root.join("lib/icons"),
            templates: root.join("lib/templates"),
            temp_cjs: root.join("temp/cjs"),
            dist,
            root,
        }
    }

    pub fn template(&self, kind: &str) -> PathBuf {
        self.templates.join(format!("{kind}.hbs"))
    }
}

/// Manifest and its transient backup.
#[derive(Debug, Clone)]
pub struct ManifestPaths {
    pub manifest: PathBuf,
    pub backup: PathBuf,
}

impl ManifestPaths {
    pub fn from_root(root: &Path) -> Self {
        Self::for_manifest(root.join(MANIFEST_FILENAME))
    }

    /// Backup lives next to the manifest as `<manifest>.backup`.
    pub fn for_manifest(manifest: PathBuf) -> Self {
        let mut backup = manifest.clone().into_os_string();
        backup.push(BACKUP_SUFFIX);
        Self {
            manifest,
            backup: PathBuf::from(backup),
        }
    }
}
