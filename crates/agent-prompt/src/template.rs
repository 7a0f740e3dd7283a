//! The template seam

use crate::Result;

/// A named prompt rendered from JSON variables
///
/// Object safe, so registries can hold templates of different kinds.
pub trait PromptTemplate: Send + Sync {
    fn name(&self) -> &str;

    fn render(&self, vars: &serde_json::Value) -> Result<String>;

    /// Variables the template reads, sorted
    fn variables(&self) -> Vec<String> {
        Vec::new()
    }
}
