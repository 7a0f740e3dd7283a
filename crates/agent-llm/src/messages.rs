//! Conversation transcript types
//!
//! An assistant turn may mix text with tool calls; the observations for all of
//! its calls go back together as one user turn of tool-result blocks. Providers
//! map this onto their own wire format.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    /// Only produced by providers that keep the persona inside the transcript
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },

    /// A call the model wants executed
    ToolUse {
        /// Correlates the call with its result
        id: String,
        name: String,
        input: serde_json::Value,
    },

    /// Observation for the call with `tool_use_id`
    ToolResult {
        tool_use_id: String,
        content: String,
        /// `Some(true)` when the call itself failed
        #[serde(skip_serializing_if = "Option::is_none")]
        is_error: Option<bool>,
    },
}

impl ContentBlock {
    /// Successful tool observation
    pub fn tool_result(tool_use_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::ToolResult {
            tool_use_id: tool_use_id.into(),
            content: content.into(),
            is_error: None,
        }
    }

    /// Observation for a call that could not run
    pub fn tool_error(tool_use_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::ToolResult {
            tool_use_id: tool_use_id.into(),
            content: content.into(),
            is_error: Some(true),
        }
    }
}

/// Plain text or a list of blocks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

/// One turn of the transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<MessageContent>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::text_turn(Role::User, text.into())
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::text_turn(Role::Assistant, text.into())
    }

    fn text_turn(role: Role, text: String) -> Self {
        Self {
            role,
            content: Some(MessageContent::Text(text)),
        }
    }

    /// The user turn answering an assistant turn's tool calls
    pub fn tool_results(results: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::User,
            content: Some(MessageContent::Blocks(results)),
        }
    }

    /// The plain text, or the first text block
    pub fn text(&self) -> Option<&str> {
        match self.content.as_ref()? {
            MessageContent::Text(s) => Some(s),
            MessageContent::Blocks(blocks) => blocks.iter().find_map(|b| match b {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            }),
        }
    }

    /// Tool calls in this turn, in the order the model issued them
    pub fn tool_uses(&self) -> Vec<&ContentBlock> {
        self.blocks()
            .iter()
            .filter(|b| matches!(b, ContentBlock::ToolUse { .. }))
            .collect()
    }

    pub fn has_tool_uses(&self) -> bool {
        self.blocks()
            .iter()
            .any(|b| matches!(b, ContentBlock::ToolUse { .. }))
    }

    pub fn is_tool_result(&self) -> bool {
        self.blocks()
            .iter()
            .any(|b| matches!(b, ContentBlock::ToolResult { .. }))
    }

    fn blocks(&self) -> &[ContentBlock] {
        match &self.content {
            Some(MessageContent::Blocks(blocks)) => blocks,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.text(), Some("Hello"));
        assert!(!msg.is_tool_result());
    }

    #[test]
    fn test_assistant_blocks_text_and_tool_use() {
        let msg = Message {
            role: Role::Assistant,
            content: Some(MessageContent::Blocks(vec![
                ContentBlock::Text {
                    text: "Looking up the price".to_string(),
                },
                ContentBlock::ToolUse {
                    id: "call_1".to_string(),
                    name: "get_stock_price".to_string(),
                    input: serde_json::json!({"symbol": "AAPL"}),
                },
            ])),
        };
        assert_eq!(msg.text(), Some("Looking up the price"));
        assert!(msg.has_tool_uses());
        assert_eq!(msg.tool_uses().len(), 1);
    }

    #[test]
    fn test_tool_results_share_one_turn() {
        let msg = Message::tool_results(vec![
            ContentBlock::tool_result("call_1", "{\"current_price\":187.5}"),
            ContentBlock::tool_error("call_2", "{\"error\":\"boom\"}"),
        ]);
        assert_eq!(msg.role, Role::User);
        assert!(msg.is_tool_result());
        assert!(!msg.has_tool_uses());
        match &msg.content {
            Some(MessageContent::Blocks(blocks)) => {
                assert_eq!(blocks.len(), 2);
                assert!(matches!(blocks[0], ContentBlock::ToolResult { is_error: None, .. }));
                assert!(matches!(
                    blocks[1],
                    ContentBlock::ToolResult {
                        is_error: Some(true),
                        ..
                    }
                ));
            }
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[test]
    fn test_message_serialization() {
        let msg = Message::user("Test");
        let json = serde_json::to_string(&msg).unwrap();
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.text(), Some("Test"));
    }
}
