mod cli;
mod prompter;

use std::process::ExitCode;

use anyhow::{Context, Result};
use arcpkg_core::{Pipeline, PipelineConfig, format_summary};
use clap::Parser;
use cli::Args;
use prompter::CliPrompter;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Exit code for bad command-line usage
const USAGE_EXIT_CODE: u8 = 1;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { USAGE_EXIT_CODE } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    // Initialize logging (info unless RUST_LOG says otherwise)
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("arcpkg=info,arcpkg_core=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    info!("arcpkg {}", env!("CARGO_PKG_VERSION"));

    let prompter = CliPrompter::stdin(args.preview_start);
    let output = Pipeline::new(config)
        .run(&args.package, &prompter)
        .with_context(|| format!("Failed to process {}", args.package.display()))?;

    println!("{}", format_summary(&output));
    println!("{}", output.completion_message());
    Ok(())
}

/// Config file (if any) with command-line overrides applied
fn load_config(args: &Args) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let config = PipelineConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            info!("Loaded config from {:?}", path);
            config
        }
        None => PipelineConfig::default(),
    };

    if let Some(dir) = &args.output_dir {
        config.output_dir = Some(dir.clone());
    }
    if let Some(ffmpeg) = &args.ffmpeg {
        config.ffmpeg = ffmpeg.clone();
    }
    if args.keep_package {
        config.keep_package = true;
    }
    Ok(config)
}

/// Pick the exit code from the underlying pipeline error, if there is one
fn exit_code(e: &anyhow::Error) -> u8 {
    e.chain()
        .find_map(|cause| cause.downcast_ref::<arcpkg_core::Error>())
        .map(|core| core.kind().exit_code())
        .unwrap_or(arcpkg_core::ErrorKind::Io.exit_code())
}
