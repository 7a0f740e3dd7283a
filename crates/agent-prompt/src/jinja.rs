//! MiniJinja templates

use crate::{PromptError, PromptTemplate, Result};
use minijinja::Environment;
use std::collections::BTreeSet;

/// Jinja2 template (`{{ var }}`, filters, loops) rendered by MiniJinja
///
/// The source is parsed once in [`JinjaTemplate::new`]; a template that
/// constructs only fails later on bad variable data.
pub struct JinjaTemplate {
    name: String,
    source: String,
    variables: Vec<String>,
}

impl JinjaTemplate {
    /// Parse `source` into a named template
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let source = source.into();

        let env = Environment::new();
        let parsed = env
            .template_from_str(&source)
            .map_err(|e| PromptError::TemplateParseFailed {
                name: name.clone(),
                detail: e.to_string(),
            })?;
        let variables = parsed
            .undeclared_variables(false)
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Ok(Self {
            name,
            source,
            variables,
        })
    }
}

impl PromptTemplate for JinjaTemplate {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, vars: &serde_json::Value) -> Result<String> {
        let env = Environment::new();
        let value = minijinja::Value::from_serialize(vars);

        env.render_str(&self.source, value)
            .map_err(|e| PromptError::RenderError {
                name: self.name.clone(),
                detail: e.to_string(),
            })
    }

    fn variables(&self) -> Vec<String> {
        self.variables.clone()
    }
}

impl std::fmt::Debug for JinjaTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JinjaTemplate")
            .field("name", &self.name)
            .field("variables", &self.variables)
            .finish_non_exhaustive()
    }
}
