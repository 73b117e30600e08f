//! Template rendering
//!
//! Wraps a Handlebars registry that owns the custom helper set. Helpers are
//! registered once, when the renderer is built.

mod helpers;

use handlebars::{Handlebars, RenderError};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::RenderConfig;
use crate::flatten::build_context;
use crate::schema::SsaInput;

/// Renders Handlebars templates against SSA payloads
pub struct TemplateRenderer {
    hbs: Handlebars<'static>,
}

impl TemplateRenderer {
    pub fn new(config: &RenderConfig) -> Self {
        debug!(?config, "TemplateRenderer::new: called");
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(config.strict_mode);
        if !config.escape_html {
            hbs.register_escape_fn(handlebars::no_escape);
        }
        helpers::register(&mut hbs);
        Self { hbs }
    }

    /// Render a template against an input document and its flattened view
    pub fn render(&self, template: &str, input: &SsaInput) -> Result<String, RenderError> {
        let context = build_context(input);
        self.render_value(template, &context)
    }

    /// Render a template against an already built context
    pub fn render_value(&self, template: &str, context: &Value) -> Result<String, RenderError> {
        debug!(template_len = template.len(), "TemplateRenderer::render_value: called");
        let output = self.hbs.render_template(template, context)?;
        info!(output_len = output.len(), "Template rendered");
        Ok(output)
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}
