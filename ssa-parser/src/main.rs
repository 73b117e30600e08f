//! SSA Parser CLI entry point

use std::path::PathBuf;
use std::process;

use clap::Parser;
use clap::error::ErrorKind;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, warn};

use ssa_parser::cli::{Cli, Command, GenerateArgs, banner, missing_arguments_message, resolve_path};
use ssa_parser::config::{Config, LoadedConfig};
use ssa_parser::logging::{self, LOG_LEVEL_ENV, LogSettings};
use ssa_parser::parser::TfvarsParser;

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::MissingRequiredArgument => {
            println!("{}", missing_arguments_message());
            process::exit(1);
        }
        Err(e) => e.exit(),
    };

    match cli.command {
        Some(Command::Generate(args)) => cmd_generate(cli.config.as_ref(), &args),
        None => {
            println!("{}", banner());
            Ok(())
        }
    }
}

fn setup_logging(verbose: bool, config: &Config) -> Result<()> {
    let env_level = std::env::var(LOG_LEVEL_ENV).ok();
    let (settings, unknown) = LogSettings::resolve(verbose, env_level.as_deref(), &config.logging);
    if let Some(level) = unknown {
        eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", level);
    }
    logging::init(&settings)
}

fn cmd_generate(config_path: Option<&PathBuf>, args: &GenerateArgs) -> Result<()> {
    let LoadedConfig { config, skipped } = Config::load(config_path).context("Failed to load configuration")?;
    setup_logging(args.verbose, &config).context("Failed to setup logging")?;
    for reason in &skipped {
        eprintln!("Warning: {}", reason);
        warn!("{}", reason);
    }
    debug!(?args, "cmd_generate: called");

    println!("{}\n", "Starting TFVars generation...".bold());

    let input = resolve_path(&args.input);
    let template = resolve_path(&args.template);
    let output = resolve_path(&args.output);
    let strict = args.strict();

    println!("  Input JSON:  {}", input.display());
    println!("  Template:    {}", template.display());
    println!("  Output:      {}", output.display());
    println!("  Strict mode: {}\n", if strict { "enabled" } else { "disabled" });

    let parser = TfvarsParser::new(strict, &config.render);
    let result = parser.parse(&input, &template, &output);

    if !result.success {
        eprintln!(
            "{} Failed to generate TFVars file: {}",
            "✗".red(),
            result.error.unwrap_or_default()
        );
        process::exit(1);
    }

    println!("{} TFVars file generated successfully!", "✓".green());
    if let Some(path) = &result.output_file {
        println!("  Output file: {}", path.display().to_string().cyan());
    }
    for warning in &result.warnings {
        eprintln!("{} {}", "warning:".yellow(), warning);
    }

    Ok(())
}
