//! Prompts assembled from data

/// Concatenates text fragments, bullets and conditional parts
///
/// ```
/// use agent_prompt::PromptBuilder;
///
/// let tools = ["get_stock_price", "get_technical_indicators"];
/// let prompt = PromptBuilder::new()
///     .text("You are a quantitative analyst.")
///     .when(!tools.is_empty(), "\nTools:\n")
///     .bullets(tools)
///     .build_trimmed();
///
/// assert!(prompt.ends_with("- get_technical_indicators"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    prompt: String,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, content: impl AsRef<str>) -> Self {
        self.prompt.push_str(content.as_ref());
        self
    }

    /// End the current paragraph
    pub fn blank_line(self) -> Self {
        self.text("\n\n")
    }

    /// Append `content` only when `condition` holds
    pub fn when(self, condition: bool, content: impl AsRef<str>) -> Self {
        if condition { self.text(content) } else { self }
    }

    /// One `- item` line per item
    pub fn bullets<I, S>(self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        items
            .into_iter()
            .fold(self, |builder, item| builder.text(format!("- {}\n", item.as_ref())))
    }

    pub fn build(self) -> String {
        self.prompt
    }

    /// The prompt without leading or trailing whitespace
    pub fn build_trimmed(self) -> String {
        self.prompt.trim().to_string()
    }
}
