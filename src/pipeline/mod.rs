//! Build pipeline for the icon font package.
//!
//! Phases run strictly in order:
//!
//! ```text
//! Reset -> Prepare -> Generate -> CopyIcons -> CompileDeclarations
//!       -> CopyCjs -> RenameCjs -> CompileEsm -> CleanupTemp
//! ```
//!
//! Only the two compiler phases can stop the run. Directory and file
//! failures, and a failed font generation, are logged and recorded in the
//! [`BuildSummary`]; later phases run regardless.
//!
//! # Example
//!
//! ```rust,ignore
//! use icons_build::{BuildConfig, BuildPaths, BuildPipeline};
//!
//! let paths = BuildPaths::from_root("/path/to/package");
//! let config = BuildConfig::load(&paths.root)?;
//! let summary = BuildPipeline::new(&paths, &config).run()?;
//! println!("{} warnings", summary.warnings.len());
//! ```

pub mod compiler;
pub mod error;
pub mod files;
pub mod font;
mod tool;

use std::fmt;
use std::path::Path;

use crate::config::BuildConfig;
use crate::paths::BuildPaths;
use crate::preflight::{self, ToolRole};
use compiler::{run_type_compiler, CompilePass};
use error::BuildError;
use files::FileBatchReport;
use font::GenerationOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Reset,
    Prepare,
    Generate,
    CopyIcons,
    CompileDeclarations,
    CopyCjs,
    RenameCjs,
    CompileEsm,
    CleanupTemp,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Prepare => "prepare",
            Self::Generate => "generate",
            Self::CopyIcons => "copy-icons",
            Self::CompileDeclarations => "compile-declarations",
            Self::CopyCjs => "copy-cjs",
            Self::RenameCjs => "rename-cjs",
            Self::CompileEsm => "compile-esm",
            Self::CleanupTemp => "cleanup-temp",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A recoverable failure, kept so callers can see what went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseWarning {
    pub phase: Phase,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct BuildSummary {
    /// Phases that ran to completion, in order.
    pub completed: Vec<Phase>,
    /// `None` until the generate phase has run.
    pub generation: Option<GenerationOutcome>,
    pub icons: FileBatchReport,
    pub cjs_copy: FileBatchReport,
    pub cjs_rename: FileBatchReport,
    pub warnings: Vec<PhaseWarning>,
}

impl BuildSummary {
    /// Per-file failures across all batch phases.
    pub fn failed_files(&self) -> usize {
        self.icons.failed_count() + self.cjs_copy.failed_count() + self.cjs_rename.failed_count()
    }
}

pub struct BuildPipeline<'a> {
    paths: &'a BuildPaths,
    config: &'a BuildConfig,
    summary: BuildSummary,
}

impl<'a> BuildPipeline<'a> {
    pub fn new(paths: &'a BuildPaths, config: &'a BuildConfig) -> Self {
        Self {
            paths,
            config,
            summary: BuildSummary::default(),
        }
    }

    pub fn summary(&self) -> &BuildSummary {
        &self.summary
    }

    /// Run every phase. Returns at the first compiler failure.
    pub fn run(mut self) -> Result<BuildSummary, BuildError> {
        self.preflight();
        self.reset();
        self.prepare();
        self.generate();
        self.copy_icons();
        self.compile_declarations()?;
        self.copy_cjs();
        self.rename_cjs();
        self.compile_esm()?;
        self.cleanup_temp();
        Ok(self.summary)
    }

    fn warn(&mut self, phase: Phase, message: String) {
        tracing::warn!("[{}] {}", phase, message);
        self.summary.warnings.push(PhaseWarning { phase, message });
    }

    fn finish(&mut self, phase: Phase) {
        tracing::debug!("phase {} finished", phase);
        self.summary.completed.push(phase);
    }

    fn record_batch(&mut self, phase: Phase, report: &FileBatchReport) {
        if !report.is_clean() {
            let message = format!("{} file operation(s) failed", report.failed_count());
            self.warn(phase, message);
        }
    }

    fn remove_dir(&mut self, phase: Phase, dir: &Path) {
        if let Err(err) = files::remove_directory(dir) {
            tracing::error!("Error removing directory {}: {}", dir.display(), err);
            self.warn(phase, format!("removing '{}': {}", dir.display(), err));
        }
    }

    fn create_dir(&mut self, phase: Phase, dir: &Path) {
        if let Err(err) = files::create_directory(dir) {
            tracing::error!("Error creating directory {}: {}", dir.display(), err);
            self.warn(phase, format!("creating '{}': {}", dir.display(), err));
        }
    }

    /// Warn about tools that cannot be found; the build still proceeds.
    pub fn preflight(&mut self) {
        for missing in preflight::missing_tools(&self.config.tools) {
            let phase = match missing.role {
                ToolRole::FontGenerator => Phase::Generate,
                ToolRole::TypeCompiler => Phase::CompileDeclarations,
            };
            let message = format!("{} '{}' not found in PATH", missing.role, missing.program);
            self.warn(phase, message);
        }
    }

    pub fn reset(&mut self) {
        let paths = self.paths;
        self.remove_dir(Phase::Reset, &paths.dist);
        self.remove_dir(Phase::Reset, &paths.temp_cjs);
        self.finish(Phase::Reset);
    }

    pub fn prepare(&mut self) {
        let paths = self.paths;
        self.create_dir(Phase::Prepare, &paths.dist);
        self.create_dir(Phase::Prepare, &paths.dist_icons);
        self.create_dir(Phase::Prepare, &paths.temp_cjs);
        self.finish(Phase::Prepare);
    }

    // TODO: decide whether a failed generation should skip the copy and
    // compile phases, which assume generated assets exist in dist.
    /// Generation failure is recorded but does not stop the build.
    pub fn generate(&mut self) {
        let outcome = font::generate_fonts(self.paths, self.config);
        if let GenerationOutcome::Failed { reason } = &outcome {
            self.warn(Phase::Generate, reason.clone());
        }
        self.summary.generation = Some(outcome);
        self.finish(Phase::Generate);
    }

    pub fn copy_icons(&mut self) {
        let report = files::copy_files(&self.paths.icons, &self.paths.dist_icons);
        self.record_batch(Phase::CopyIcons, &report);
        self.summary.icons = report;
        self.finish(Phase::CopyIcons);
    }

    pub fn compile_declarations(&mut self) -> Result<(), BuildError> {
        run_type_compiler(&self.paths.root, &self.config.tools, CompilePass::Declarations)?;
        self.finish(Phase::CompileDeclarations);
        Ok(())
    }

    pub fn copy_cjs(&mut self) {
        let report = files::copy_files(&self.paths.temp_cjs, &self.paths.dist_cjs);
        self.record_batch(Phase::CopyCjs, &report);
        self.summary.cjs_copy = report;
        self.finish(Phase::CopyCjs);
    }

    pub fn rename_cjs(&mut self) {
        let report = files::rename_js_to_cjs(&self.paths.dist_cjs);
        self.record_batch(Phase::RenameCjs, &report);
        self.summary.cjs_rename = report;
        self.finish(Phase::RenameCjs);
    }

    pub fn compile_esm(&mut self) -> Result<(), BuildError> {
        run_type_compiler(&self.paths.root, &self.config.tools, CompilePass::Esm)?;
        self.finish(Phase::CompileEsm);
        Ok(())
    }

    pub fn cleanup_temp(&mut self) {
        let paths = self.paths;
        self.remove_dir(Phase::CleanupTemp, &paths.temp_cjs);
        self.finish(Phase::CleanupTemp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const ALL_PHASES: [Phase; 9] = [
        Phase::Reset,
        Phase::Prepare,
        Phase::Generate,
        Phase::CopyIcons,
        Phase::CompileDeclarations,
        Phase::CopyCjs,
        Phase::RenameCjs,
        Phase::CompileEsm,
        Phase::CleanupTemp,
    ];

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    /// Package root with two icons and stale output from an earlier run.
    fn temp_package() -> (TempDir, BuildPaths) {
        let temp = TempDir::new().unwrap();
        let paths = BuildPaths::from_root(temp.path());
        fs::create_dir_all(&paths.icons).unwrap();
        fs::write(paths.icons.join("icon1.svg"), "<svg id=\"one\"/>").unwrap();
        fs::write(paths.icons.join("icon2.svg"), "<svg id=\"two\"/>").unwrap();
        fs::create_dir_all(paths.dist.join("stale")).unwrap();
        fs::write(paths.dist.join("stale/old.css"), "old").unwrap();
        (temp, paths)
    }

    /// Compiler stand-in: the default pass emits CommonJS into temp/cjs,
    /// the ESM pass (called with `--project`) emits into dist/esm.
    fn fake_compiler() -> Vec<String> {
        argv(&[
            "sh",
            "-c",
            "if [ \"$0\" = --project ]; then mkdir -p dist/esm && echo esm > dist/esm/index.js; \
             else echo cjs > temp/cjs/index.js && echo decl > temp/cjs/index.d.ts; fi",
        ])
    }

    fn config(generator: &[&str], compiler: Vec<String>) -> BuildConfig {
        let mut config = BuildConfig::default();
        config.tools.font_generator = argv(generator);
        config.tools.type_compiler = compiler;
        config
    }

    #[test]
    fn test_reset_and_prepare_leave_empty_tree() {
        let (_temp, paths) = temp_package();
        let config = BuildConfig::default();
        let mut pipeline = BuildPipeline::new(&paths, &config);

        pipeline.reset();
        pipeline.prepare();

        assert!(paths.dist.is_dir());
        assert!(paths.dist_icons.is_dir());
        assert!(paths.temp_cjs.is_dir());
        let dist_entries: Vec<_> = fs::read_dir(&paths.dist).unwrap().collect();
        assert_eq!(dist_entries.len(), 1, "only the icons directory remains");
        assert_eq!(fs::read_dir(&paths.dist_icons).unwrap().count(), 0);
        assert!(pipeline.summary().warnings.is_empty());
    }

    #[test]
    fn test_full_run_produces_cjs_and_cleans_temp() {
        let (_temp, paths) = temp_package();
        let config = config(&["true"], fake_compiler());

        let summary = BuildPipeline::new(&paths, &config).run().unwrap();

        assert_eq!(summary.completed, ALL_PHASES);
        assert!(summary.generation.as_ref().unwrap().is_success());
        assert_eq!(summary.failed_files(), 0);
        assert_eq!(fs::read_to_string(paths.dist_cjs.join("index.cjs")).unwrap(), "cjs\n");
        assert!(paths.dist_cjs.join("index.d.ts").is_file());
        assert!(!paths.dist_cjs.join("index.js").exists());
        assert!(paths.dist.join("esm/index.js").is_file());
        assert!(!paths.dist.join("stale").exists());
        assert!(!paths.temp_cjs.exists());
    }

    #[test]
    fn test_icons_copied_even_when_generation_fails() {
        let (_temp, paths) = temp_package();
        let config = config(&["false"], fake_compiler());

        let summary = BuildPipeline::new(&paths, &config).run().unwrap();

        assert!(!summary.generation.as_ref().unwrap().is_success());
        assert!(summary
            .warnings
            .iter()
            .any(|w| w.phase == Phase::Generate));
        for icon in ["icon1.svg", "icon2.svg"] {
            assert_eq!(
                fs::read(paths.dist_icons.join(icon)).unwrap(),
                fs::read(paths.icons.join(icon)).unwrap()
            );
        }
        assert_eq!(summary.completed.last(), Some(&Phase::CleanupTemp));
    }

    #[test]
    fn test_declaration_failure_stops_before_cjs() {
        let (_temp, paths) = temp_package();
        let config = config(&["true"], argv(&["sh", "-c", "echo 'TS1005' >&2; exit 1"]));

        let err = BuildPipeline::new(&paths, &config).run().unwrap_err();

        assert_eq!(err.phase(), Phase::CompileDeclarations);
        assert!(err.to_string().contains("TS1005"));
        assert!(paths.temp_cjs.is_dir(), "temp dir is left behind");
        assert!(!paths.dist_cjs.exists());
        assert!(paths.dist_icons.join("icon1.svg").is_file());
    }

    #[test]
    fn test_esm_failure_skips_cleanup() {
        let (_temp, paths) = temp_package();
        let compiler = argv(&[
            "sh",
            "-c",
            "if [ \"$0\" = --project ]; then exit 2; else echo cjs > temp/cjs/index.js; fi",
        ]);
        let config = config(&["true"], compiler);
        let mut pipeline = BuildPipeline::new(&paths, &config);

        pipeline.reset();
        pipeline.prepare();
        pipeline.generate();
        pipeline.copy_icons();
        pipeline.compile_declarations().unwrap();
        pipeline.copy_cjs();
        pipeline.rename_cjs();
        let err = pipeline.compile_esm().unwrap_err();

        assert_eq!(err.phase(), Phase::CompileEsm);
        assert_eq!(pipeline.summary().completed.last(), Some(&Phase::RenameCjs));
        assert!(paths.dist_cjs.join("index.cjs").is_file());
        assert!(paths.temp_cjs.is_dir());
    }

    #[test]
    fn test_missing_icon_source_is_a_warning() {
        let (_temp, paths) = temp_package();
        fs::remove_dir_all(&paths.icons).unwrap();
        let config = config(&["true"], fake_compiler());

        let summary = BuildPipeline::new(&paths, &config).run().unwrap();

        assert_eq!(summary.icons.failed_count(), 1);
        assert!(summary
            .warnings
            .iter()
            .any(|w| w.phase == Phase::CopyIcons));
        assert_eq!(summary.completed, ALL_PHASES);
    }

    #[test]
    fn test_preflight_flags_missing_generator_under_generate() {
        let (_temp, paths) = temp_package();
        let config = config(&["nonexistent_fantasticon_xyz"], fake_compiler());
        let mut pipeline = BuildPipeline::new(&paths, &config);

        pipeline.preflight();

        assert_eq!(
            pipeline.summary().warnings,
            vec![PhaseWarning {
                phase: Phase::Generate,
                message: "font generator 'nonexistent_fantasticon_xyz' not found in PATH"
                    .to_string(),
            }]
        );
    }

    #[test]
    fn test_preflight_flags_missing_compiler() {
        let (_temp, paths) = temp_package();
        let config = config(&["true"], argv(&["nonexistent_tsc_xyz"]));
        let mut pipeline = BuildPipeline::new(&paths, &config);

        pipeline.preflight();

        assert_eq!(
            pipeline.summary().warnings,
            vec![PhaseWarning {
                phase: Phase::CompileDeclarations,
                message: "type compiler 'nonexistent_tsc_xyz' not found in PATH".to_string(),
            }]
        );
    }
}
