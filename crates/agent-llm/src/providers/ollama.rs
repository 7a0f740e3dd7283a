//! Ollama provider implementation
//!
//! Talks to the native chat endpoint of a local Ollama service
//! (`POST {host}/api/chat`) with `stream: false` and function-style tools.
//!
//! # Example
//!
//! ```no_run
//! use agent_llm::{CompletionRequest, LLMProvider, Message};
//! use agent_llm::providers::{OllamaConfig, OllamaProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = OllamaProvider::with_config(OllamaConfig::new("http://localhost:11434"))?;
//!
//!     let request = CompletionRequest::builder("gpt-oss")
//!         .add_message(Message::user("Hello"))
//!         .temperature(0.0)
//!         .build();
//!
//!     let response = provider.complete(request).await?;
//!     println!("{}", response.message.text().unwrap_or_default());
//!     Ok(())
//! }
//! ```

use crate::{
    CompletionRequest, CompletionResponse, ContentBlock, LLMError, LLMProvider, Message,
    MessageContent, Result, Role, StopReason, TokenUsage, ToolDefinition,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default Ollama endpoint
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the Ollama provider
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Base URL of the Ollama service, without a trailing slash
    pub host: String,

    /// Request timeout in seconds (default: 60)
    pub timeout_secs: u64,
}

impl OllamaConfig {
    /// Create a config for the given host with default settings
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into().trim_end_matches('/').to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self::new(DEFAULT_OLLAMA_HOST)
    }
}

/// Ollama provider
pub struct OllamaProvider {
    client: Client,
    config: OllamaConfig,
}

impl OllamaProvider {
    /// Create a provider with custom configuration
    pub fn with_config(config: OllamaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a provider for `host` with default settings
    pub fn new(host: impl Into<String>) -> Result<Self> {
        Self::with_config(OllamaConfig::new(host))
    }

    /// Get the current configuration
    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    /// List the models pulled into the local service (`GET /api/tags`)
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.config.host))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(LLMError::RequestFailed(format!("HTTP {status}")));
        }

        let tags: TagsResponse = response.json().await.map_err(|e| {
            LLMError::UnexpectedResponse(format!("Failed to parse model list: {e}"))
        })?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// Report the service version (`GET /api/version`)
    pub async fn version(&self) -> Result<String> {
        let response = self
            .client
            .get(format!("{}/api/version", self.config.host))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(LLMError::RequestFailed(format!("HTTP {status}")));
        }

        let body: VersionResponse = response.json().await.map_err(|e| {
            LLMError::UnexpectedResponse(format!("Failed to parse version: {e}"))
        })?;
        Ok(body.version)
    }
}

#[async_trait]
impl LLMProvider for OllamaProvider {
    #[instrument(skip(self, request), fields(model = %request.model, host = %self.config.host))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        debug!("Sending chat request to Ollama");

        let model = request.model.clone();
        let chat_request = ChatRequest {
            model: request.model,
            messages: build_ollama_messages(request.system, request.messages),
            tools: request.tools.as_deref().map(convert_tools),
            stream: false,
            options: ChatOptions {
                temperature: request.temperature,
                top_p: request.top_p,
                num_predict: request.max_tokens,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.config.host))
            .json(&chat_request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            return Err(match status.as_u16() {
                404 => LLMError::ModelNotFound(model),
                400 => LLMError::InvalidRequest(error_text),
                _ => LLMError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            LLMError::UnexpectedResponse(format!("Failed to parse response: {e}"))
        })?;

        debug!(
            "Received response - done_reason: {:?}, tokens: {}/{}",
            chat_response.done_reason,
            chat_response.prompt_eval_count,
            chat_response.eval_count
        );

        let stop_reason = map_stop_reason(
            chat_response.done_reason.as_deref(),
            !chat_response.message.tool_calls.is_empty(),
        );

        Ok(CompletionResponse {
            message: parse_ollama_message(chat_response.message),
            stop_reason,
            usage: TokenUsage {
                input_tokens: chat_response.prompt_eval_count,
                output_tokens: chat_response.eval_count,
            },
        })
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<OllamaMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<OllamaTool>>,
    stream: bool,
    options: ChatOptions,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    num_predict: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct OllamaMessage {
    role: String,
    #[serde(default)]
    content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<OllamaToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OllamaToolCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    function: OllamaFunctionCall,
}

#[derive(Debug, Serialize, Deserialize)]
struct OllamaFunctionCall {
    name: String,
    #[serde(default)]
    arguments: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct OllamaTool {
    #[serde(rename = "type")]
    tool_type: &'static str,
    function: OllamaFunction,
}

#[derive(Debug, Serialize)]
struct OllamaFunction {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: OllamaMessage,
    #[serde(default)]
    done_reason: Option<String>,
    #[serde(default)]
    prompt_eval_count: usize,
    #[serde(default)]
    eval_count: usize,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

#[derive(Debug, Deserialize)]
struct VersionResponse {
    version: String,
}

// ============================================================================
// Conversion functions
// ============================================================================

/// Build Ollama messages from our generic format
///
/// The system prompt leads the array. Tool results become `tool` messages
/// named after the call they answer.
fn build_ollama_messages(system: Option<String>, messages: Vec<Message>) -> Vec<OllamaMessage> {
    let mut result = Vec::new();
    let mut call_names: HashMap<String, String> = HashMap::new();

    if let Some(sys) = system {
        result.push(text_message("system", sys));
    }

    for msg in messages {
        let role = match msg.role {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        };

        match msg.content {
            Some(MessageContent::Text(text)) => result.push(text_message(role, text)),
            Some(MessageContent::Blocks(blocks)) => {
                result.extend(convert_blocks(role, blocks, &mut call_names));
            }
            None => result.push(text_message(role, String::new())),
        }
    }

    result
}

fn text_message(role: &str, content: String) -> OllamaMessage {
    OllamaMessage {
        role: role.to_string(),
        content,
        tool_calls: Vec::new(),
        tool_name: None,
    }
}

fn convert_blocks(
    role: &str,
    blocks: Vec<ContentBlock>,
    call_names: &mut HashMap<String, String>,
) -> Vec<OllamaMessage> {
    let mut messages = Vec::new();
    let mut text_parts: Vec<String> = Vec::new();
    let mut tool_calls = Vec::new();

    for block in blocks {
        match block {
            ContentBlock::Text { text } => text_parts.push(text),
            ContentBlock::ToolUse { id, name, input } => {
                call_names.insert(id.clone(), name.clone());
                tool_calls.push(OllamaToolCall {
                    id: Some(id),
                    function: OllamaFunctionCall {
                        name,
                        arguments: input,
                    },
                });
            }
            ContentBlock::ToolResult {
                tool_use_id,
                content,
                ..
            } => messages.push(OllamaMessage {
                role: "tool".to_string(),
                content,
                tool_calls: Vec::new(),
                tool_name: call_names.get(&tool_use_id).cloned(),
            }),
        }
    }

    if !text_parts.is_empty() || !tool_calls.is_empty() {
        messages.insert(
            0,
            OllamaMessage {
                role: role.to_string(),
                content: text_parts.join("\n"),
                tool_calls,
                tool_name: None,
            },
        );
    }

    messages
}

fn convert_tools(tools: &[ToolDefinition]) -> Vec<OllamaTool> {
    tools
        .iter()
        .map(|tool| OllamaTool {
            tool_type: "function",
            function: OllamaFunction {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool.input_schema.clone(),
            },
        })
        .collect()
}

/// Convert a response message to our block format
///
/// Ollama does not always assign call ids, so missing ones are generated.
fn parse_ollama_message(msg: OllamaMessage) -> Message {
    let mut blocks = Vec::new();

    if !msg.content.is_empty() {
        blocks.push(ContentBlock::Text { text: msg.content });
    }

    for call in msg.tool_calls {
        let id = call
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| format!("call_{}", uuid::Uuid::new_v4().simple()));
        let input = match call.function.arguments {
            serde_json::Value::Null => serde_json::json!({}),
            // Some models send arguments as an encoded JSON string
            serde_json::Value::String(raw) => {
                serde_json::from_str(&raw).unwrap_or(serde_json::Value::String(raw))
            }
            other => other,
        };
        blocks.push(ContentBlock::ToolUse {
            id,
            name: call.function.name,
            input,
        });
    }

    if blocks.is_empty() {
        blocks.push(ContentBlock::Text {
            text: String::new(),
        });
    }

    Message {
        role: Role::Assistant,
        content: Some(MessageContent::Blocks(blocks)),
    }
}

fn map_stop_reason(done_reason: Option<&str>, has_tool_calls: bool) -> StopReason {
    if has_tool_calls {
        return StopReason::ToolUse;
    }
    match done_reason {
        Some("length") => StopReason::MaxTokens,
        _ => StopReason::EndTurn,
    }
}
