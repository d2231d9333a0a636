use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Cloud Native Buildpack that assigns launch processes for npm start scripts
#[derive(Parser, Debug)]
#[command(
    name = "npm-start",
    about = "Cloud Native Buildpack that assigns launch processes for npm start scripts",
    version,
    long_about = "npm-start turns the prestart, start and poststart scripts of a package.json \
                  into the launch process of a Node.js application image. The lifecycle runs \
                  it from the application working directory through the bin/detect and \
                  bin/build entrypoints."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,

    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = LogFormat::Text,
        help = "Diagnostic log format"
    )]
    pub log_format: LogFormat,
}

/// Format of the diagnostics written to stderr
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Detect whether the application has an npm start script",
        long_about = "Passes when package.json declares a start script and writes the build \
                      plan requirements to PLAN. Exits with 100 when detection fails.\n\n\
                      Examples:\n  \
                      npm-start detect /platform /tmp/plan.toml"
    )]
    Detect(DetectArgs),

    #[command(
        about = "Assign the launch processes",
        long_about = "Writes start.sh into the project directory and the launch processes \
                      to LAYERS/launch.toml.\n\n\
                      Examples:\n  \
                      npm-start build /layers /platform /tmp/plan.toml"
    )]
    Build(BuildArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(value_name = "PLATFORM", help = "Platform directory")]
    pub platform_dir: PathBuf,

    #[arg(value_name = "PLAN", help = "Path the build plan is written to")]
    pub plan_path: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    #[arg(value_name = "LAYERS", help = "Layers directory launch.toml is written to")]
    pub layers_dir: PathBuf,

    #[arg(value_name = "PLATFORM", help = "Platform directory")]
    pub platform_dir: PathBuf,

    #[arg(value_name = "PLAN", help = "Buildpack plan for this buildpack")]
    pub plan_path: PathBuf,

    #[arg(
        long,
        value_name = "FILE",
        hide = true,
        help = "os-release file used to pick the shell compatibility policy"
    )]
    pub os_release: Option<PathBuf>,
}
