//! Launch process and build result types
//!
//! These mirror the Cloud Native Buildpacks `launch.toml` and build plan
//! documents, so they serialize directly into the files the lifecycle reads.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Process type of the default launch process
pub const WEB_PROCESS_TYPE: &str = "web";

/// Process type of the non-reloading fallback when live reload is enabled
pub const NO_RELOAD_PROCESS_TYPE: &str = "no-reload";

/// A command the platform runs when the built image starts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    #[serde(rename = "type")]
    pub process_type: String,
    pub command: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default)]
    pub default: bool,
    /// Executed without an intermediate shell
    #[serde(default)]
    pub direct: bool,
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.process_type)?;
        if self.default {
            write!(f, " (default)")?;
        }
        write!(f, ": {}", self.command)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Builder for [`Process`]
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    process: Process,
}

impl ProcessBuilder {
    pub fn new(process_type: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            process: Process {
                process_type: process_type.into(),
                command: command.into(),
                ..Default::default()
            },
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.process.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.process.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn default(mut self, value: bool) -> Self {
        self.process.default = value;
        self
    }

    pub fn direct(mut self, value: bool) -> Self {
        self.process.direct = value;
        self
    }

    pub fn build(self) -> Process {
        self.process
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchMetadata {
    #[serde(default)]
    pub processes: Vec<Process>,
}

/// Entries this buildpack resolved during build; always empty here
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildpackPlan {
    #[serde(default)]
    pub entries: Vec<BuildPlanRequirement>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildResult {
    pub plan: BuildpackPlan,
    pub launch: LaunchMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildPlanRequirement {
    pub name: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, toml::Value>,
}

impl BuildPlanRequirement {
    /// A dependency that must be available when the image launches
    pub fn at_launch(name: impl Into<String>) -> Self {
        let mut metadata = BTreeMap::new();
        metadata.insert("launch".to_string(), toml::Value::Boolean(true));
        Self {
            name: name.into(),
            metadata,
        }
    }
}

/// Detect-phase build plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildPlan {
    #[serde(default)]
    pub requires: Vec<BuildPlanRequirement>,
}

impl BuildPlan {
    pub fn requirement_names(&self) -> Vec<&str> {
        self.requires.iter().map(|r| r.name.as_str()).collect()
    }
}
