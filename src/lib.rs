//! npm-start - Cloud Native Buildpack for npm start scripts
//!
//! Decides how an image built from a Node.js application starts. The
//! `prestart`, `start` and `poststart` scripts of the project's package.json
//! are chained into one command, written into a signal-forwarding `start.sh`,
//! and assigned as the default `web` launch process. With live reload enabled
//! the process runs under watchexec and the plain process stays available as
//! `no-reload`.
//!
//! # Project Structure
//!
//! - [`manifest`]: package.json decoding
//! - [`project_path`]: project subdirectory resolution
//! - [`launch`]: command composition, startup script, live reload
//! - [`build`] / [`detect`]: the two buildpack phases
//! - [`cnb`]: buildpack descriptor, launch.toml and build plan files
//! - [`cli`]: command line entrypoints and build output

pub mod build;
pub mod cli;
pub mod cnb;
pub mod config;
pub mod detect;
pub mod launch;
pub mod manifest;
pub mod project_path;
pub mod util;

pub use build::{Build, BuildContext, BuildError};
pub use config::{BuildpackConfig, ConfigError};
pub use detect::{detect, DetectError, DetectOutcome};
pub use launch::{BuildResult, LaunchMetadata, Process, ReloadMode, Reloader, StartCommand};
pub use manifest::{PackageJson, ScriptSet};
pub use project_path::{PathParser, ProjectPathParser};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
