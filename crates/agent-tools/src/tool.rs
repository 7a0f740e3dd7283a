//! The tool seam

use agent_core::Result;
use async_trait::async_trait;
use serde_json::Value;

/// A function the model can call by name
///
/// Tools report data problems inside the returned payload (see
/// [`crate::error_payload`]) and keep `Err` for arguments that do not match
/// `input_schema`.
///
/// ```
/// use agent_core::Result;
/// use agent_tools::{Tool, required_str};
/// use async_trait::async_trait;
/// use serde_json::{Value, json};
///
/// struct Echo;
///
/// #[async_trait]
/// impl Tool for Echo {
///     async fn execute(&self, params: Value) -> Result<Value> {
///         let symbol = required_str(&params, self.name(), "symbol")?;
///         Ok(json!({ "symbol": symbol }))
///     }
///
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     fn description(&self) -> &str {
///         "Echo the ticker back"
///     }
///
///     fn input_schema(&self) -> Value {
///         json!({
///             "type": "object",
///             "properties": { "symbol": { "type": "string" } },
///             "required": ["symbol"]
///         })
///     }
/// }
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Unique within a registry
    fn name(&self) -> &str;

    /// Shown to the model to decide when to call the tool
    fn description(&self) -> &str;

    /// JSON Schema of `params`
    fn input_schema(&self) -> Value;
}
