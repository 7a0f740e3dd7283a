//! Agent executor for running agent loops
//!
//! The AgentExecutor implements the core agent loop pattern:
//! 1. Call LLM with conversation history and available tools
//! 2. If tool use requested, execute tools, feed observations back and loop
//! 3. Otherwise return the final answer
//!
//! Tool problems never abort a run. An unknown tool name or a failing tool turns
//! into an `{"error": ...}` observation the model can react to.

use agent_core::Result;
use agent_llm::{CompletionRequest, ContentBlock, LLMProvider, Message, StopReason, ToolDefinition};
use agent_tools::{ToolRegistry, error_payload};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Output text of a run that used up its iteration budget
pub const ITERATION_LIMIT_MESSAGE: &str = "Agent stopped due to iteration limit.";

/// Configuration for agent execution
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Maximum number of model calls (prevents infinite loops)
    pub max_iterations: usize,

    /// Model to use
    pub model: String,

    /// System prompt
    pub system_prompt: Option<String>,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Temperature
    pub temperature: Option<f32>,

    /// Nucleus sampling cutoff
    pub top_p: Option<f32>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            model: "gpt-oss".to_string(),
            system_prompt: None,
            max_tokens: 4096,
            temperature: Some(0.0),
            top_p: None,
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The model produced a final answer
    Completed,
    /// The model hit its token limit; output holds the partial text
    Truncated,
    /// The iteration budget ran out
    IterationLimit,
}

/// Result of one agent invocation
#[derive(Debug, Clone)]
pub struct AgentRun {
    /// Final answer text, when the model produced one
    pub output: Option<String>,

    /// Full transcript, starting with the user query
    pub messages: Vec<Message>,

    /// Number of model calls made
    pub iterations: usize,

    /// How the loop ended
    pub outcome: RunOutcome,
}

/// Executes an agent loop: LLM → tool calls → execution → loop back
pub struct AgentExecutor {
    provider: Arc<dyn LLMProvider>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
}

impl AgentExecutor {
    /// Create a new agent executor
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tool_registry: Arc<ToolRegistry>,
        config: ExecutorConfig,
    ) -> Self {
        Self {
            provider,
            tool_registry,
            config,
        }
    }

    /// Start building an executor
    pub fn builder() -> AgentExecutorBuilder {
        AgentExecutorBuilder::new()
    }

    /// The executor's configuration
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Tools this executor advertises, in registration order
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_registry.names()
    }

    /// Execute the agent loop with a user query
    ///
    /// Only a failing model call returns `Err`; everything the tools do is
    /// folded into the transcript.
    pub async fn run(&self, user_message: impl Into<String>) -> Result<AgentRun> {
        let mut conversation = vec![Message::user(user_message)];
        let tools = self.build_tool_definitions();
        debug!(tool_count = tools.len(), "Available tools");

        for iteration in 1..=self.config.max_iterations {
            info!(
                iteration = iteration,
                max_iterations = self.config.max_iterations,
                "Agent iteration started"
            );

            let request = self.build_request(&conversation, &tools);
            let response = self
                .provider
                .complete(request)
                .await
                .map_err(|e| agent_core::Error::ProcessingFailed(e.to_string()))?;

            info!(
                stop_reason = ?response.stop_reason,
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                "LLM response received"
            );

            let message = response.message;
            let output = message.text().map(str::to_string);
            let wants_tools = message.has_tool_uses();
            let observations = if wants_tools {
                self.execute_tools(&message).await
            } else {
                Vec::new()
            };
            conversation.push(message);

            if wants_tools {
                info!(
                    result_count = observations.len(),
                    "Tool execution completed, continuing agent loop"
                );
                conversation.push(Message::tool_results(observations));
                continue;
            }

            let outcome = match response.stop_reason {
                StopReason::MaxTokens => {
                    warn!("Hit max tokens in LLM response");
                    RunOutcome::Truncated
                }
                _ => RunOutcome::Completed,
            };
            info!(iteration = iteration, ?outcome, "Agent finished");

            return Ok(AgentRun {
                output,
                messages: conversation,
                iterations: iteration,
                outcome,
            });
        }

        warn!(
            max_iterations = self.config.max_iterations,
            "Max iterations reached, stopping"
        );
        Ok(AgentRun {
            output: Some(ITERATION_LIMIT_MESSAGE.to_string()),
            messages: conversation,
            iterations: self.config.max_iterations,
            outcome: RunOutcome::IterationLimit,
        })
    }

    fn build_request(&self, conversation: &[Message], tools: &[ToolDefinition]) -> CompletionRequest {
        let mut builder = CompletionRequest::builder(&self.config.model)
            .messages(conversation.to_vec())
            .max_tokens(self.config.max_tokens);

        if let Some(system) = &self.config.system_prompt {
            builder = builder.system(system.clone());
        }
        if let Some(temperature) = self.config.temperature {
            builder = builder.temperature(temperature);
        }
        if let Some(top_p) = self.config.top_p {
            builder = builder.top_p(top_p);
        }
        // Only add tools if we have any
        if !tools.is_empty() {
            builder = builder.tools(tools.to_vec());
        }

        builder.build()
    }

    /// Build tool definitions from the registry
    fn build_tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tool_registry
            .list_tools()
            .iter()
            .map(|tool| ToolDefinition::new(tool.name(), tool.description(), tool.input_schema()))
            .collect()
    }

    /// Execute tool calls from an assistant message, one observation per call
    async fn execute_tools(&self, message: &Message) -> Vec<ContentBlock> {
        let mut results = Vec::new();

        for tool_use in message.tool_uses() {
            let ContentBlock::ToolUse { id, name, input } = tool_use else {
                continue;
            };

            let input_preview: String = input.to_string().chars().take(500).collect();
            info!(
                tool_name = %name,
                tool_id = %id,
                input_preview = %input_preview,
                "Executing tool"
            );

            let Some(tool) = self.tool_registry.get(name) else {
                warn!(tool_name = %name, "Model requested unknown tool");
                let payload = error_payload(format!("Unknown tool: {name}"));
                results.push(ContentBlock::tool_error(id.clone(), render(&payload)));
                continue;
            };

            let start_time = Instant::now();
            match tool.execute(input.clone()).await {
                Ok(result) => {
                    let result_str = render(&result);
                    info!(
                        tool_name = %name,
                        duration_ms = start_time.elapsed().as_millis() as u64,
                        result_length = result_str.len(),
                        "Tool execution succeeded"
                    );
                    results.push(ContentBlock::tool_result(id.clone(), result_str));
                }
                Err(e) => {
                    warn!(
                        tool_name = %name,
                        duration_ms = start_time.elapsed().as_millis() as u64,
                        error = %e,
                        "Tool execution failed"
                    );
                    results.push(ContentBlock::tool_error(id.clone(), render(&error_payload(e))));
                }
            }
        }

        results
    }
}

/// Tool observations are handed to the model as two-space indented JSON
fn render(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Builder for AgentExecutor
pub struct AgentExecutorBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
}

impl AgentExecutorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            provider: None,
            tool_registry: Arc::new(ToolRegistry::new()),
            config: ExecutorConfig::default(),
        }
    }

    /// Set the LLM provider
    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the tool registry
    pub fn tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = registry;
        self
    }

    /// Set the full configuration
    pub fn config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set maximum iterations
    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the system prompt
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    /// Set max tokens
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    /// Set temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    /// Set nucleus sampling cutoff
    pub fn top_p(mut self, top_p: Option<f32>) -> Self {
        self.config.top_p = top_p;
        self
    }

    /// Build the executor
    pub fn build(self) -> Result<AgentExecutor> {
        let provider = self.provider.ok_or_else(|| {
            agent_core::Error::InitializationFailed("Provider not set".to_string())
        })?;
        if self.config.max_iterations == 0 {
            return Err(agent_core::Error::InitializationFailed(
                "max_iterations must be at least 1".to_string(),
            ));
        }

        Ok(AgentExecutor::new(provider, self.tool_registry, self.config))
    }
}

impl Default for AgentExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use agent_llm::{
        CompletionResponse, LLMError, MessageContent, Role, TokenUsage,
    };
    use agent_tools::Tool;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Provider that replays scripted responses and records requests
    pub(crate) struct MockProvider {
        responses: Mutex<VecDeque<std::result::Result<CompletionResponse, LLMError>>>,
        pub(crate) requests: Mutex<Vec<CompletionRequest>>,
    }

    impl MockProvider {
        pub(crate) fn new(
            responses: Vec<std::result::Result<CompletionResponse, LLMError>>,
        ) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LLMProvider for MockProvider {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> agent_llm::Result<CompletionResponse> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(text_response("done")))
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    pub(crate) fn text_response(text: &str) -> CompletionResponse {
        CompletionResponse {
            message: Message::assistant(text),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        }
    }

    fn tool_call(id: &str, name: &str, input: Value) -> CompletionResponse {
        CompletionResponse {
            message: Message {
                role: Role::Assistant,
                content: Some(MessageContent::Blocks(vec![ContentBlock::ToolUse {
                    id: id.to_string(),
                    name: name.to_string(),
                    input,
                }])),
            },
            stop_reason: StopReason::ToolUse,
            usage: TokenUsage::default(),
        }
    }

    struct PriceTool;

    #[async_trait]
    impl Tool for PriceTool {
        async fn execute(&self, params: Value) -> Result<Value> {
            let symbol = agent_tools::required_str(&params, self.name(), "symbol")?;
            Ok(json!({ "symbol": symbol, "current_price": 187.5 }))
        }

        fn name(&self) -> &str {
            "get_stock_price"
        }

        fn description(&self) -> &str {
            "Get the current price"
        }

        fn input_schema(&self) -> Value {
            json!({"type": "object", "properties": {"symbol": {"type": "string"}}})
        }
    }

    fn executor(provider: Arc<MockProvider>, max_iterations: usize) -> AgentExecutor {
        AgentExecutor::builder()
            .provider(provider)
            .tool_registry(Arc::new(ToolRegistry::from_tools([
                Arc::new(PriceTool) as Arc<dyn Tool>
            ])))
            .system_prompt("You are a financial research assistant")
            .max_iterations(max_iterations)
            .build()
            .unwrap()
    }

    fn observation(message: &Message) -> (String, Option<bool>) {
        match &message.content {
            Some(MessageContent::Blocks(blocks)) => match &blocks[0] {
                ContentBlock::ToolResult {
                    content, is_error, ..
                } => (content.clone(), *is_error),
                other => panic!("not a tool result: {other:?}"),
            },
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_tool_round_trip_then_answer() {
        let provider = Arc::new(MockProvider::new(vec![
            Ok(tool_call("call_1", "get_stock_price", json!({"symbol": "AAPL"}))),
            Ok(text_response("AAPL trades at $187.50")),
        ]));
        let run = executor(provider.clone(), 10).run("Analyze AAPL").await.unwrap();

        assert_eq!(run.outcome, RunOutcome::Completed);
        assert_eq!(run.output.as_deref(), Some("AAPL trades at $187.50"));
        assert_eq!(run.iterations, 2);
        // user, assistant tool call, observation, final answer
        assert_eq!(run.messages.len(), 4);

        let (content, is_error) = observation(&run.messages[2]);
        assert_eq!(is_error, None);
        assert!(content.contains("\n  \"current_price\": 187.5"));

        let requests = provider.requests.lock().unwrap();
        assert_eq!(
            requests[0].system.as_deref(),
            Some("You are a financial research assistant")
        );
        assert_eq!(requests[0].tools.as_ref().map(Vec::len), Some(1));
        assert_eq!(requests[0].temperature, Some(0.0));
    }

    #[tokio::test]
    async fn test_unknown_tool_becomes_error_observation() {
        let provider = Arc::new(MockProvider::new(vec![
            Ok(tool_call("call_1", "get_weather", json!({}))),
            Ok(text_response("Sorry, I can only do stocks")),
        ]));
        let run = executor(provider, 10).run("weather?").await.unwrap();

        assert_eq!(run.outcome, RunOutcome::Completed);
        let (content, is_error) = observation(&run.messages[2]);
        assert_eq!(is_error, Some(true));
        let payload: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(payload["error"], "Unknown tool: get_weather");
    }

    #[tokio::test]
    async fn test_tool_failure_becomes_error_observation() {
        let provider = Arc::new(MockProvider::new(vec![
            Ok(tool_call("call_1", "get_stock_price", json!({}))),
            Ok(text_response("I need a ticker")),
        ]));
        let run = executor(provider, 10).run("price?").await.unwrap();

        let (content, is_error) = observation(&run.messages[2]);
        assert_eq!(is_error, Some(true));
        let payload: Value = serde_json::from_str(&content).unwrap();
        assert!(payload["error"].as_str().unwrap().contains("symbol"));
    }

    #[tokio::test]
    async fn test_parallel_calls_answered_in_one_turn() {
        let provider = Arc::new(MockProvider::new(vec![
            Ok(CompletionResponse {
                message: Message {
                    role: Role::Assistant,
                    content: Some(MessageContent::Blocks(vec![
                        ContentBlock::ToolUse {
                            id: "call_1".to_string(),
                            name: "get_stock_price".to_string(),
                            input: json!({"symbol": "AAPL"}),
                        },
                        ContentBlock::ToolUse {
                            id: "call_2".to_string(),
                            name: "get_weather".to_string(),
                            input: json!({}),
                        },
                    ])),
                },
                stop_reason: StopReason::ToolUse,
                usage: TokenUsage::default(),
            }),
            Ok(text_response("AAPL trades at $187.50")),
        ]));
        let run = executor(provider.clone(), 10).run("Analyze AAPL").await.unwrap();

        // user, assistant tool calls, one observation turn, final answer
        assert_eq!(run.messages.len(), 4);
        let Some(MessageContent::Blocks(blocks)) = &run.messages[2].content else {
            panic!("observation turn should hold blocks");
        };
        let ids: Vec<(&str, Option<bool>)> = blocks
            .iter()
            .map(|b| match b {
                ContentBlock::ToolResult {
                    tool_use_id,
                    is_error,
                    ..
                } => (tool_use_id.as_str(), *is_error),
                other => panic!("not a tool result: {other:?}"),
            })
            .collect();
        assert_eq!(ids, vec![("call_1", None), ("call_2", Some(true))]);

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests[1].messages.len(), 3);
    }

    #[tokio::test]
    async fn test_iteration_limit_stops_run() {
        let responses = (0..5)
            .map(|i| {
                Ok(tool_call(
                    &format!("call_{i}"),
                    "get_stock_price",
                    json!({"symbol": "AAPL"}),
                ))
            })
            .collect();
        let provider = Arc::new(MockProvider::new(responses));
        let run = executor(provider.clone(), 3).run("loop forever").await.unwrap();

        assert_eq!(run.outcome, RunOutcome::IterationLimit);
        assert_eq!(run.output.as_deref(), Some(ITERATION_LIMIT_MESSAGE));
        assert_eq!(run.iterations, 3);
        assert_eq!(provider.requests.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_max_tokens_returns_partial_text() {
        let provider = Arc::new(MockProvider::new(vec![Ok(CompletionResponse {
            message: Message::assistant("Partial report"),
            stop_reason: StopReason::MaxTokens,
            usage: TokenUsage::default(),
        })]));
        let run = executor(provider, 10).run("long").await.unwrap();

        assert_eq!(run.outcome, RunOutcome::Truncated);
        assert_eq!(run.output.as_deref(), Some("Partial report"));
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let provider = Arc::new(MockProvider::new(vec![Err(LLMError::ModelNotFound(
            "gpt-oss".to_string(),
        ))]));
        let err = executor(provider, 10).run("hi").await.unwrap_err();
        assert!(err.to_string().contains("Model not found"));
    }

    #[test]
    fn test_builder_requires_provider() {
        assert!(AgentExecutorBuilder::new().build().is_err());
    }

    #[test]
    fn test_builder_rejects_zero_iterations() {
        let provider = Arc::new(MockProvider::new(Vec::new()));
        let result = AgentExecutor::builder()
            .provider(provider)
            .max_iterations(0)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_default_config() {
        let config = ExecutorConfig::default();
        assert_eq!(config.max_iterations, 10);
        assert_eq!(config.model, "gpt-oss");
        assert_eq!(config.top_p, None);
    }
}
