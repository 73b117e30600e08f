//! SSA Parser - Port.io Self-Service Action payloads to TFVars files
//!
//! Reads a Self-Service Action JSON payload, validates its loose shape,
//! renders a Handlebars template against it and writes the result.
//!
//! # Render context
//!
//! Templates see the validated payload's top-level fields (`properties`,
//! `context`, `payload`) plus `flat`, a single-level map of every leaf keyed
//! by its dot-joined path. Flat keys contain dots, so address them as one
//! segment: `{{flat.[properties.config.count]}}` or
//! `{{lookup flat "properties.config.count"}}`, or iterate with `{{#each flat}}`.
//!
//! # Helpers
//!
//! - `{{#ifExists value}}..{{else}}..{{/ifExists}}` - body unless null or missing
//! - `{{lowercase value}}`, `{{uppercase value}}` - empty for falsy values, error for non-strings
//! - `{{eq a b}}` - type-sensitive equality, missing never equals null; usable as `{{#if (eq a b)}}`
//!
//! # Modules
//!
//! - [`schema`] - input document and validation
//! - [`flatten`] - dot-path flattening and render context construction
//! - [`render`] - Handlebars renderer owning the helper set
//! - [`parser`] - read, render and write pipeline
//! - [`config`] - configuration types and loading
//! - [`logging`] - subscriber setup for binaries
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod flatten;
pub mod logging;
pub mod parser;
pub mod render;
pub mod schema;

// Re-export commonly used types
pub use config::{Config, LoadedConfig, LoggingConfig, RenderConfig};
pub use error::{InputError, ParseError};
pub use flatten::{build_context, flatten};
pub use parser::{ParseResult, TfvarsParser};
pub use render::TemplateRenderer;
pub use schema::{SsaContext, SsaInput, ValidationError, Violation, validate};
