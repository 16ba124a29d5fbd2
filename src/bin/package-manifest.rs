use anyhow::{bail, Result};
use icons_build::manifest::{self, USAGE};
use icons_build::paths::locate_package_root;
use icons_build::{ManifestAction, ManifestPaths};

fn main() -> Result<()> {
    icons_build::logging::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let action: ManifestAction = match args.as_slice() {
        [action] => action.parse()?,
        _ => bail!(USAGE),
    };

    let root = locate_package_root()?;
    let paths = ManifestPaths::from_root(&root);
    let outcome = manifest::run(action, &paths)?;
    tracing::info!("{}", outcome);
    Ok(())
}
