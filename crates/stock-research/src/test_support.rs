//! Scripted model provider shared by the crate's tests

use agent_llm::{
    CompletionRequest, CompletionResponse, ContentBlock, LLMError, LLMProvider, Message,
    MessageContent, Role, StopReason, TokenUsage,
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays queued responses in order, then answers "done"
pub(crate) struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<CompletionResponse, LLMError>>>,
    failure: Option<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub(crate) fn new(responses: Vec<Result<CompletionResponse, LLMError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Plain text answers, one per call
    pub(crate) fn replying(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(text_response(t))).collect())
    }

    /// Every call fails with `message`
    pub(crate) fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(Vec::new())
        }
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> agent_llm::Result<CompletionResponse> {
        self.requests.lock().unwrap().push(request);
        if let Some(message) = &self.failure {
            return Err(LLMError::RequestFailed(message.clone()));
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(text_response("done")))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub(crate) fn text_response(text: &str) -> CompletionResponse {
    CompletionResponse {
        message: Message::assistant(text),
        stop_reason: StopReason::EndTurn,
        usage: TokenUsage::default(),
    }
}

pub(crate) fn tool_call(id: &str, name: &str, input: Value) -> CompletionResponse {
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
