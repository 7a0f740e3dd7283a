//! Prompt errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PromptError>;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to parse template '{name}': {detail}")]
    TemplateParseFailed { name: String, detail: String },

    #[error("Failed to render template '{name}': {detail}")]
    RenderError { name: String, detail: String },

    #[error("Template '{0}' not registered")]
    TemplateNotRegistered(String),
}

