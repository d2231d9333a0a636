//! Project manifest reading

pub mod package_json;

pub use package_json::{ManifestError, PackageJson, ScriptSet};

/// Manifest file name
pub const PACKAGE_JSON: &str = "package.json";

/// Lockfile written next to the manifest by npm
pub const PACKAGE_LOCK_JSON: &str = "package-lock.json";

/// Dependency directory populated by npm
pub const NODE_MODULES: &str = "node_modules";
