//! Build tooling for the nuitral-icons font package.
//!
//! Two entry points share this library:
//!
//! - **`icons-build`** - resets `dist/`, runs the icon font generator, copies
//!   the source icons, then compiles the TypeScript sources twice (CommonJS
//!   with declarations, then ESM), renaming the CommonJS output to `.cjs`.
//! - **`package-manifest`** - backs up, restores, or strips publish-irrelevant
//!   fields from `package.json`.
//!
//! # Architecture
//!
//! ```text
//! icons-build
//!     │
//!     ├── paths::BuildPaths      fixed layout under the package root
//!     ├── config::BuildConfig    defaults + optional icons-build.toml
//!     ├── preflight              tool lookup (warnings only)
//!     └── pipeline::BuildPipeline
//!             ├── files          best-effort dir/copy/rename fan-out
//!             ├── font           fantasticon invocation
//!             └── compiler       tsc passes (the only fatal steps)
//!
//! package-manifest
//!     ├── paths::ManifestPaths
//!     └── manifest               backup / restore / modify
//! ```
//!
//! Fatal errors are returned as values; only the binaries decide to exit.

pub mod config;
pub mod logging;
pub mod manifest;
pub mod paths;
pub mod pipeline;
pub mod preflight;

pub use config::BuildConfig;
pub use manifest::ManifestAction;
pub use paths::{BuildPaths, ManifestPaths};
pub use pipeline::error::BuildError;
pub use pipeline::{BuildPipeline, BuildSummary, Phase};
