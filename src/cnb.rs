//! Cloud Native Buildpacks file formats
//!
//! Reads the buildpack descriptor and writes the documents the lifecycle
//! consumes: `launch.toml` after build and the build plan after detect.

use crate::launch::{BuildPlan, LaunchMetadata};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const BUILDPACK_TOML: &str = "buildpack.toml";
pub const LAUNCH_TOML: &str = "launch.toml";

#[derive(Debug, Error)]
pub enum CnbError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to encode {document}")]
    Encode {
        document: &'static str,
        #[source]
        source: toml::ser::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Identity of the running buildpack, used for the log banner
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuildpackInfo {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub version: String,
}

impl Default for BuildpackInfo {
    fn default() -> Self {
        Self {
            id: crate::NAME.to_string(),
            name: crate::NAME.to_string(),
            version: crate::VERSION.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BuildpackDescriptor {
    buildpack: BuildpackInfo,
}

impl BuildpackInfo {
    /// Reads `[buildpack]` from `<dir>/buildpack.toml`.
    ///
    /// A missing descriptor falls back to the crate name and version.
    pub fn from_dir(dir: &Path) -> Result<Self, CnbError> {
        let path = dir.join(BUILDPACK_TOML);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No {} at {}, using defaults", BUILDPACK_TOML, dir.display());
                return Ok(Self::default());
            }
            Err(source) => return Err(CnbError::Read { path, source }),
        };

        let descriptor: BuildpackDescriptor =
            toml::from_str(&content).map_err(|source| CnbError::Decode {
                path: path.clone(),
                source,
            })?;

        Ok(descriptor.buildpack)
    }
}

/// Writes `<layers_dir>/launch.toml`
pub fn write_launch_toml(layers_dir: &Path, launch: &LaunchMetadata) -> Result<PathBuf, CnbError> {
    let content = toml::to_string(launch).map_err(|source| CnbError::Encode {
        document: LAUNCH_TOML,
        source,
    })?;

    let path = layers_dir.join(LAUNCH_TOML);
    write_document(&path, &content)?;
    Ok(path)
}

/// Writes the detect-phase build plan to `plan_path`
pub fn write_build_plan(plan_path: &Path, plan: &BuildPlan) -> Result<(), CnbError> {
    let content = toml::to_string(plan).map_err(|source| CnbError::Encode {
        document: "build plan",
        source,
    })?;

    write_document(plan_path, &content)
}

fn write_document(path: &Path, content: &str) -> Result<(), CnbError> {
    fs::write(path, content).map_err(|source| CnbError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote {}", path.display());
    Ok(())
}
