//! TFVars generation pipeline
//!
//! Reads an SSA payload, reads a template, renders, writes. Every stage
//! short-circuits on failure and nothing is written before the final stage.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::RenderConfig;
use crate::error::{InputError, ParseError};
use crate::render::TemplateRenderer;
use crate::schema::{self, SsaInput};

/// Outcome of a full generate run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Reserved; no stage produces warnings yet
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ParseResult {
    pub fn succeeded(output_file: PathBuf) -> Self {
        Self {
            success: true,
            output_file: Some(output_file),
            ..Default::default()
        }
    }

    pub fn failed(err: &ParseError) -> Self {
        Self {
            success: false,
            error: Some(err.to_string()),
            ..Default::default()
        }
    }
}

/// Turns SSA payloads into TFVars files
pub struct TfvarsParser {
    strict: bool,
    renderer: TemplateRenderer,
}

impl TfvarsParser {
    /// Create a parser
    ///
    /// `strict` is recorded and reported but does not change validation or
    /// rendering.
    pub fn new(strict: bool, render: &RenderConfig) -> Self {
        info!(strict, "TfvarsParser initialized");
        Self {
            strict,
            renderer: TemplateRenderer::new(render),
        }
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Read and validate the SSA JSON input file
    pub fn read_input(&self, path: &Path) -> Result<SsaInput, ParseError> {
        info!(input = %path.display(), "Reading input JSON file");
        let result = load_input(path);
        match &result {
            Ok(_) => info!(input = %path.display(), "Input JSON validated successfully"),
            Err(e) => error!(input = %path.display(), error = %e, "Failed to read or validate input JSON"),
        }
        result.map_err(|source| ParseError::InputRead {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read the template file as raw text
    pub fn read_template(&self, path: &Path) -> Result<String, ParseError> {
        info!(template = %path.display(), "Reading template file");
        fs::read_to_string(path).map_err(|source| {
            error!(template = %path.display(), error = %source, "Failed to read template file");
            ParseError::TemplateRead {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    /// Render the template against the input and its flattened view
    pub fn process_template(&self, template: &str, input: &SsaInput) -> Result<String, ParseError> {
        info!("Processing template with input data");
        self.renderer.render(template, input).map_err(|e| {
            error!(error = %e, "Failed to process template");
            ParseError::Render(e)
        })
    }

    /// Write the rendered text, creating parent directories and replacing any existing file
    pub fn write_output(&self, path: &Path, content: &str) -> Result<(), ParseError> {
        info!(output = %path.display(), "Writing output file");
        let wrap = |source: std::io::Error| {
            error!(output = %path.display(), error = %source, "Failed to write output file");
            ParseError::OutputWrite {
                path: path.to_path_buf(),
                source,
            }
        };

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            debug!(dir = %dir.display(), "TfvarsParser::write_output: ensuring directory");
            fs::create_dir_all(dir).map_err(wrap)?;
        }
        fs::write(path, content).map_err(wrap)?;

        info!(output = %path.display(), "Output file written successfully");
        Ok(())
    }

    /// Run the whole pipeline, reporting the outcome instead of returning an error
    pub fn parse(&self, input: &Path, template: &Path, output: &Path) -> ParseResult {
        info!(
            input = %input.display(),
            template = %template.display(),
            output = %output.display(),
            "Starting TFVars parsing process"
        );

        match self.run(input, template, output) {
            Ok(()) => {
                info!(output = %output.display(), "TFVars parsing completed successfully");
                ParseResult::succeeded(output.to_path_buf())
            }
            Err(e) => {
                error!(error = %e, "TFVars parsing failed");
                ParseResult::failed(&e)
            }
        }
    }

    fn run(&self, input: &Path, template: &Path, output: &Path) -> Result<(), ParseError> {
        let document = self.read_input(input)?;
        let template = self.read_template(template)?;
        let rendered = self.process_template(&template, &document)?;
        self.write_output(output, &rendered)
    }
}

fn load_input(path: &Path) -> Result<SsaInput, InputError> {
    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;
    Ok(schema::validate(value)?)
}
