//! CLI integration tests
//!
//! Run the compiled binary the way the lifecycle does: from the application
//! working directory with the layers, platform and plan paths as arguments.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn npm_start_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_npm-start"))
}

struct Workspace {
    app: TempDir,
    layers: TempDir,
    platform: TempDir,
    buildpack: TempDir,
    scratch: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let workspace = Self {
            app: TempDir::new().expect("Failed to create app dir"),
            layers: TempDir::new().expect("Failed to create layers dir"),
            platform: TempDir::new().expect("Failed to create platform dir"),
            buildpack: TempDir::new().expect("Failed to create buildpack dir"),
            scratch: TempDir::new().expect("Failed to create scratch dir"),
        };

        fs::write(
            workspace.buildpack.path().join("buildpack.toml"),
            r#"api = "0.7"

[buildpack]
  id = "paketo-buildpacks/npm-start"
  name = "Paketo Buildpack for NPM Start"
  version = "1.2.3"
"#,
        )
        .expect("Failed to write buildpack.toml");

        fs::write(workspace.os_release(), "ID=alpine\n").expect("Failed to write os-release");

        workspace
    }

    fn write_manifest(&self, subdir: &str, content: &str) -> PathBuf {
        let dir = self.app.path().join(subdir);
        fs::create_dir_all(&dir).expect("Failed to create project dir");
        fs::write(dir.join("package.json"), content).expect("Failed to write package.json");
        dir
    }

    fn os_release(&self) -> PathBuf {
        self.scratch.path().join("os-release")
    }

    fn plan_path(&self) -> PathBuf {
        self.scratch.path().join("plan.toml")
    }

    fn command(&self, envs: &[(&str, &str)]) -> Command {
        let mut cmd = Command::new(npm_start_bin());
        cmd.current_dir(self.app.path())
            .env_remove("BP_NODE_PROJECT_PATH")
            .env_remove("BP_LIVE_RELOAD_ENABLED")
            .env_remove("BP_LOG_LEVEL")
            .env_remove("RUST_LOG")
            .env("CNB_BUILDPACK_DIR", self.buildpack.path());
        for (key, value) in envs {
            cmd.env(key, value);
        }
        cmd
    }

    fn detect(&self, envs: &[(&str, &str)]) -> Output {
        self.command(envs)
            .arg("detect")
            .arg(self.platform.path())
            .arg(self.plan_path())
            .output()
            .expect("Failed to execute npm-start detect")
    }

    fn build(&self, envs: &[(&str, &str)]) -> Output {
        self.command(envs)
            .arg("build")
            .arg(self.layers.path())
            .arg(self.platform.path())
            .arg(self.plan_path())
            .arg("--os-release")
            .arg(self.os_release())
            .output()
            .expect("Failed to execute npm-start build")
    }

    fn launch_toml(&self) -> toml::Value {
        let content = fs::read_to_string(self.layers.path().join("launch.toml"))
            .expect("Failed to read launch.toml");
        toml::from_str(&content).expect("launch.toml is not valid TOML")
    }
}

fn processes(launch: &toml::Value) -> Vec<toml::Value> {
    launch["processes"]
        .as_array()
        .expect("processes is not an array")
        .clone()
}

fn script_path(dir: &Path) -> String {
    dir.join("start.sh").to_string_lossy().into_owned()
}

#[test]
fn test_cli_help() {
    let output = Command::new(npm_start_bin())
        .arg("--help")
        .output()
        .expect("Failed to execute npm-start");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("detect"));
    assert!(stdout.contains("build"));
}

#[test]
fn test_detect_writes_build_plan() {
    let workspace = Workspace::new();
    workspace.write_manifest(".", r#"{"scripts": {"start": "node server.js"}}"#);

    let output = workspace.detect(&[]);

    assert_eq!(output.status.code(), Some(0));
    let plan: toml::Value =
        toml::from_str(&fs::read_to_string(workspace.plan_path()).unwrap()).unwrap();
    let names: Vec<&str> = plan["requires"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["node", "npm", "node_modules"]);
}

#[test]
fn test_detect_fails_without_start_script() {
    let workspace = Workspace::new();
    workspace.write_manifest(".", r#"{"scripts": {}}"#);

    let output = workspace.detect(&[]);

    assert_eq!(output.status.code(), Some(100));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("no start script in package.json"));
    assert!(!workspace.plan_path().exists());
}

#[test]
fn test_build_assigns_web_process() {
    let workspace = Workspace::new();
    workspace.write_manifest(".", r#"{"scripts": {"start": "some-start-command"}}"#);

    let output = workspace.build(&[]);

    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Paketo Buildpack for NPM Start 1.2.3"));
    assert!(stdout.contains("Assigning launch processes:"));

    let processes = processes(&workspace.launch_toml());
    assert_eq!(processes.len(), 1);
    let web = &processes[0];
    assert_eq!(web["type"].as_str(), Some("web"));
    assert_eq!(web["command"].as_str(), Some("sh"));
    assert_eq!(web["default"].as_bool(), Some(true));
    assert_eq!(web["direct"].as_bool(), Some(true));
    assert_eq!(
        web["args"][0].as_str(),
        Some(script_path(workspace.app.path()).as_str())
    );

    let script = fs::read_to_string(workspace.app.path().join("start.sh")).unwrap();
    assert!(script.contains("( some-start-command ) &"));
}

#[test]
fn test_build_with_project_path() {
    let workspace = Workspace::new();
    let project_dir = workspace.write_manifest(
        "some-project-dir",
        r#"{"scripts": {"prestart": "a", "start": "b", "poststart": "c"}}"#,
    );

    let output = workspace.build(&[("BP_NODE_PROJECT_PATH", "some-project-dir")]);

    assert!(output.status.success(), "{:?}", output);
    let script = fs::read_to_string(project_dir.join("start.sh")).unwrap();
    assert!(script.contains(&format!("cd {} && a && b && c", project_dir.display())));
}

#[test]
fn test_build_with_live_reload() {
    let workspace = Workspace::new();
    workspace.write_manifest(".", r#"{"scripts": {"start": "some-start-command"}}"#);

    let output = workspace.build(&[("BP_LIVE_RELOAD_ENABLED", "true")]);

    assert!(output.status.success(), "{:?}", output);
    let processes = processes(&workspace.launch_toml());
    assert_eq!(processes.len(), 2);

    assert_eq!(processes[0]["type"].as_str(), Some("web"));
    assert_eq!(processes[0]["command"].as_str(), Some("watchexec"));
    assert_eq!(processes[0]["default"].as_bool(), Some(true));

    assert_eq!(processes[1]["type"].as_str(), Some("no-reload"));
    assert_eq!(processes[1]["command"].as_str(), Some("sh"));
    assert_eq!(processes[1]["default"].as_bool(), Some(false));
}

#[test]
fn test_build_fails_on_malformed_manifest() {
    let workspace = Workspace::new();
    workspace.write_manifest(".", "%%%");

    let output = workspace.build(&[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("%%%"));
    assert!(!workspace.layers.path().join("launch.toml").exists());
}

#[test]
fn test_build_fails_on_invalid_reload_flag() {
    let workspace = Workspace::new();
    workspace.write_manifest(".", r#"{"scripts": {"start": "some-start-command"}}"#);

    let output = workspace.build(&[("BP_LIVE_RELOAD_ENABLED", "not-a-bool")]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not-a-bool"));
    assert!(!workspace.layers.path().join("launch.toml").exists());
}

#[test]
fn test_unknown_log_level_does_not_abort() {
    let workspace = Workspace::new();
    workspace.write_manifest(".", r#"{"scripts": {"start": "node server.js"}}"#);

    let detect = workspace.detect(&[("BP_LOG_LEVEL", "verbose")]);
    assert_eq!(detect.status.code(), Some(0), "{:?}", detect);
    assert!(String::from_utf8_lossy(&detect.stderr).contains("Invalid log level 'verbose'"));

    let build = workspace.build(&[("BP_LOG_LEVEL", "verbose")]);
    assert!(build.status.success(), "{:?}", build);
    assert!(workspace.layers.path().join("launch.toml").exists());
}

#[test]
fn test_json_log_format() {
    let workspace = Workspace::new();
    workspace.write_manifest(".", "%%%");

    let output = workspace
        .command(&[])
        .arg("--log-format")
        .arg("json")
        .arg("build")
        .arg(workspace.layers.path())
        .arg(workspace.platform.path())
        .arg(workspace.plan_path())
        .arg("--os-release")
        .arg(workspace.os_release())
        .output()
        .expect("Failed to execute npm-start build");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    let line = stderr
        .lines()
        .find(|line| line.contains("unable to decode package.json"))
        .expect("no error line in stderr");
    let event: serde_json::Value = serde_json::from_str(line).expect("log line is not JSON");
    assert_eq!(event["level"], "ERROR");
}
