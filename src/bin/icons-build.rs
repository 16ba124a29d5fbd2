use anyhow::{bail, Context, Result};
use icons_build::paths::locate_package_root;
use icons_build::{BuildConfig, BuildPaths, BuildPipeline};

fn usage() -> &'static str {
    "Usage:\n  icons-build\n\nRuns from the package root (nearest ancestor with package.json, or $ICONS_BUILD_ROOT)."
}

fn main() -> Result<()> {
    icons_build::logging::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        bail!(usage());
    }

    let root = locate_package_root()?;
    let config = BuildConfig::load(&root)?;
    let paths = BuildPaths::from_root(&root);

    let summary = BuildPipeline::new(&paths, &config)
        .run()
        .with_context(|| format!("building icon package at '{}'", root.display()))?;

    if summary.warnings.is_empty() {
        tracing::info!("build finished");
    } else {
        tracing::warn!(
            "build finished with {} warning(s), {} failed file operation(s)",
            summary.warnings.len(),
            summary.failed_files()
        );
    }
    Ok(())
}
