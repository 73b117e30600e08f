//! CLI command definitions and user-facing messages

use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};

const GENERATE_EXAMPLES: &str = "\
Examples:
  Generate TFVars file from Port.io SSA JSON input
    ssa-parser generate -i input.json -t template.tfvars -o output.tfvars

  Generate with verbose logging
    ssa-parser generate -i input.json -t template.tfvars -o output.tfvars --verbose

  Generate with non-strict validation
    ssa-parser generate -i input.json -t template.tfvars -o output.tfvars --no-strict";

/// SSA Inputs Parser
#[derive(Parser, Debug)]
#[command(name = "ssa-parser")]
#[command(
    author,
    version,
    about = "Parse Port.io Self-Service Action JSON and generate TFVars files",
    long_about = None
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse Port.io Self-Service Action JSON and generate a TFVars file from a template
    #[command(after_help = GENERATE_EXAMPLES)]
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the Port.io Self-Service Action JSON input file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to the TFVars template file
    #[arg(short, long)]
    pub template: PathBuf,

    /// Path to the output TFVars file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Enable strict validation mode (default)
    #[arg(long, overrides_with = "no_strict")]
    strict: bool,

    /// Disable strict validation mode
    #[arg(long, overrides_with = "strict")]
    no_strict: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl GenerateArgs {
    /// Strict mode is on unless `--no-strict` was the last one given
    pub fn strict(&self) -> bool {
        self.strict || !self.no_strict
    }
}

/// Resolve a path against the current directory without touching the filesystem
pub fn resolve_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Shown when `generate` is missing any of its required flags
pub fn missing_arguments_message() -> String {
    let mut msg = String::new();
    msg.push_str(&format!(
        "\n{} You forgot to provide some required information.\n\n",
        "✗".red()
    ));
    msg.push_str("The generate command requires three things:\n\n");
    msg.push_str(&format!("  {}  (-i)  Your Port.io SSA JSON input file\n", "--input".cyan()));
    msg.push_str(&format!("  {}  (-t)  Your TFVars template file\n", "--template".cyan()));
    msg.push_str(&format!("  {}  (-o)  Where to save the generated file\n\n", "--output".cyan()));
    msg.push_str("Quick example:\n\n");
    msg.push_str("  ssa-parser generate -i input.json -t template.tfvars -o output.tfvars\n\n");
    msg.push_str("Try the bundled demo:\n\n");
    msg.push_str("  ssa-parser generate \\\n");
    msg.push_str("    -i demos/simple-input.json \\\n");
    msg.push_str("    -t demos/simple-template.tfvars \\\n");
    msg.push_str("    -o my-output.tfvars\n\n");
    msg.push_str("For more information, run: ssa-parser generate --help\n");
    msg
}

/// Shown when no subcommand is given
pub fn banner() -> String {
    let mut msg = String::new();
    msg.push_str(&format!("{}\n", "SSA Inputs Parser".bold()));
    msg.push_str("=================\n\n");
    msg.push_str("Parse Port.io Self-Service Action JSON and generate\n");
    msg.push_str("Terraform variable files from templates.\n\n");
    msg.push_str("Usage:\n");
    msg.push_str("  ssa-parser generate -i <input.json> -t <template.tfvars> -o <output.tfvars>\n\n");
    msg.push_str("For more information, run:\n");
    msg.push_str("  ssa-parser generate --help\n");
    msg
}
