use npm_start::cli::commands::{CliArgs, Commands, LogFormat};
use npm_start::cli::handlers::{handle_build, handle_detect};
use npm_start::util::{init_logging, parse_level, LoggingConfig};
use npm_start::{BuildpackConfig, VERSION};

use clap::Parser;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    let config = BuildpackConfig::default();
    init_logging_from_args(&args, &config);

    debug!("npm-start v{} starting", VERSION);
    debug!("Arguments: {:?}", args);
    debug!("{}", config);

    let exit_code = match &args.command {
        Commands::Detect(detect_args) => handle_detect(detect_args, &config),
        Commands::Build(build_args) => handle_build(build_args, &config),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs, config: &BuildpackConfig) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        parse_level(&config.log_level)
    };

    init_logging(LoggingConfig {
        use_json: args.log_format == LogFormat::Json,
        ..LoggingConfig::with_level(level)
    });
}
