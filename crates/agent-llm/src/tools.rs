//! Tool descriptions advertised to the model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name, purpose and JSON-schema arguments of a callable tool
///
/// `name` must match the tool registered with the executor; calls to any other
/// name are answered with an error observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_definition_serializes_schema() {
        let schema = json!({
            "type": "object",
            "properties": {"symbol": {"type": "string"}},
            "required": ["symbol"]
        });
        let tool = ToolDefinition::new("get_stock_price", "Fetch price data", schema.clone());

        let value = serde_json::to_value(&tool).unwrap();
        assert_eq!(value["name"], "get_stock_price");
        assert_eq!(value["input_schema"], schema);
    }
}
