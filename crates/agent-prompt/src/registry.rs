//! Templates looked up by name

use crate::{PromptError, PromptTemplate, Result};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Named templates, shareable across threads
///
/// Registering a name twice replaces the earlier template.
///
/// ```
/// use agent_prompt::{JinjaTemplate, PromptRegistry};
/// use serde_json::json;
///
/// let registry = PromptRegistry::new();
/// registry.register(JinjaTemplate::new("query", "Research {{ symbol }}").unwrap());
///
/// let prompt = registry.render("query", &json!({ "symbol": "MSFT" })).unwrap();
/// assert_eq!(prompt, "Research MSFT");
/// ```
#[derive(Default)]
pub struct PromptRegistry {
    templates: RwLock<HashMap<String, Arc<dyn PromptTemplate>>>,
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: PromptTemplate + 'static>(&self, template: T) {
        if let Ok(mut templates) = self.templates.write() {
            templates.insert(template.name().to_string(), Arc::new(template));
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn PromptTemplate>> {
        self.templates.read().ok()?.get(name).cloned()
    }

    /// Render the template registered as `name`
    pub fn render(&self, name: &str, vars: &serde_json::Value) -> Result<String> {
        self.get(name)
            .ok_or_else(|| PromptError::TemplateNotRegistered(name.to_string()))?
            .render(vars)
    }

    /// Registered names, sorted
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .templates
            .read()
            .map(|t| t.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }
}

impl std::fmt::Debug for PromptRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptRegistry")
            .field("templates", &self.list())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JinjaTemplate;
    use serde_json::json;

    #[test]
    fn test_register_and_get() {
        let registry = PromptRegistry::new();
        assert!(registry.list().is_empty());
        registry.register(JinjaTemplate::new("research.query", "{{ query }}").unwrap());

        assert!(registry.get("research.query").is_some());
        assert!(registry.get("research.system").is_none());
    }

    #[test]
    fn test_render_not_registered() {
        let registry = PromptRegistry::new();
        let result = registry.render("missing", &json!({}));
        assert!(matches!(result, Err(PromptError::TemplateNotRegistered(ref n)) if n == "missing"));
    }

    #[test]
    fn test_list_is_sorted() {
        let registry = PromptRegistry::new();
        registry.register(JinjaTemplate::new("b", "B").unwrap());
        registry.register(JinjaTemplate::new("a", "A").unwrap());
        assert_eq!(registry.list(), vec!["a", "b"]);
    }

    #[test]
    fn test_replace_template() {
        let registry = PromptRegistry::new();
        registry.register(JinjaTemplate::new("persona", "Version 1").unwrap());
        registry.register(JinjaTemplate::new("persona", "Version 2").unwrap());

        assert_eq!(registry.render("persona", &json!({})).unwrap(), "Version 2");
        assert_eq!(registry.list().len(), 1);
    }
}
