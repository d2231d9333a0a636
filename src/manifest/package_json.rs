//! package.json parsing
//!
//! Only the `scripts` section matters for launch process assignment. Every
//! field is optional in the manifest and decodes to an empty string when absent.
//! Decoding stops after the first JSON value in the file.

use serde::{Deserialize, Deserializer};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Longest manifest excerpt carried in a parse error
const MAX_EXCERPT_LEN: usize = 80;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("unable to open package.json at {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to read package.json at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to decode package.json at {} (near `{excerpt}`)", path.display())]
    Parse {
        path: PathBuf,
        excerpt: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ManifestError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ManifestError::NotFound { .. })
    }
}

fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// The start-related scripts of a package.json
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScriptSet {
    #[serde(
        rename = "prestart",
        default,
        deserialize_with = "deserialize_null_default"
    )]
    pub pre_start: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub start: String,
    #[serde(
        rename = "poststart",
        default,
        deserialize_with = "deserialize_null_default"
    )]
    pub post_start: String,
}

impl ScriptSet {
    pub fn has_start_command(&self) -> bool {
        !self.start.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PackageJson {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub scripts: ScriptSet,
}

impl PackageJson {
    /// Reads and decodes the manifest at `path`
    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ManifestError::NotFound {
                    path: path.to_path_buf(),
                    source,
                }
            } else {
                ManifestError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        Self::parse(path, &content)
    }

    /// Decodes the first JSON value; trailing content is not inspected
    fn parse(path: &Path, content: &str) -> Result<Self, ManifestError> {
        let mut deserializer = serde_json::Deserializer::from_str(content);
        Self::deserialize(&mut deserializer).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            excerpt: excerpt_at(content, source.line()),
            source,
        })
    }

    pub fn has_start_command(&self) -> bool {
        self.scripts.has_start_command()
    }
}

fn excerpt_at(content: &str, line: usize) -> String {
    let line = content
        .lines()
        .nth(line.saturating_sub(1))
        .unwrap_or_default()
        .trim();

    if line.chars().count() > MAX_EXCERPT_LEN {
        let truncated: String = line.chars().take(MAX_EXCERPT_LEN).collect();
        format!("{}...", truncated)
    } else {
        line.to_string()
    }
}
