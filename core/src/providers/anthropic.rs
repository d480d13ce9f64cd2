use crate::traits::{
    ChatMessage, ChatRequest, ChatResponse, ContentBlock, Provider, StopReason, ToolSpec, Usage,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "str::is_empty")]
    system: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolSpec]>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
    #[serde(default)]
    usage: WireUsage,
}

#[derive(Debug, Default, Deserialize)]
struct WireUsage {
    input_tokens: u64,
    output_tokens: u64,
}

pub struct AnthropicProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    base_url: String,
}

impl AnthropicProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .connect_timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            base_url: ANTHROPIC_API_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn parse_stop_reason(raw: Option<&str>) -> StopReason {
        match raw {
            Some("tool_use") => StopReason::ToolUse,
            Some("max_tokens") => StopReason::MaxTokens,
            Some("stop_sequence") => StopReason::StopSequence,
            _ => StopReason::EndTurn,
        }
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    async fn chat(&self, request: ChatRequest<'_>) -> anyhow::Result<ChatResponse> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: request.system,
            messages: request.messages,
            tools: request.tools,
        };

        let response = self
            .client
            .post(&self.base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Anthropic API error {}: {}",
                status,
                error_text
            ));
        }

        let parsed: MessagesResponse = response.json().await?;

        if parsed.content.is_empty() {
            return Err(anyhow::anyhow!("Empty response from API: no content"));
        }

        Ok(ChatResponse {
            content: parsed.content,
            stop_reason: Self::parse_stop_reason(parsed.stop_reason.as_deref()),
            usage: Usage::new(parsed.usage.input_tokens, parsed.usage.output_tokens),
        })
    }
}

impl std::fmt::Debug for AnthropicProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicProvider")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serialization() {
        let messages = vec![ChatMessage::user("Hello")];
        let tools = vec![ToolSpec {
            name: "fetch_linkedin_profile".into(),
            description: "Fetch profile data".into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "profile_url": { "type": "string" }
                },
                "required": ["profile_url"]
            }),
        }];

        let body = MessagesRequest {
            model: DEFAULT_MODEL,
            max_tokens: 1024,
            system: "You are helpful",
            messages: &messages,
            tools: Some(&tools),
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], DEFAULT_MODEL);
        assert_eq!(value["system"], "You are helpful");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"][0]["type"], "text");
        assert_eq!(value["tools"][0]["name"], "fetch_linkedin_profile");
        assert!(value["tools"][0]["input_schema"].is_object());
    }

    #[test]
    fn empty_system_omitted() {
        let messages = vec![ChatMessage::user("Hi")];
        let body = MessagesRequest {
            model: DEFAULT_MODEL,
            max_tokens: 16,
            system: "",
            messages: &messages,
            tools: None,
        };

        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("system").is_none());
        assert!(value.get("tools").is_none());
    }

    #[test]
    fn response_deserialization_with_tool_use() {
        let raw = json!({
            "content": [
                { "type": "text", "text": "Let me fetch that profile" },
                {
                    "type": "tool_use",
                    "id": "toolu_123",
                    "name": "fetch_linkedin_profile",
                    "input": { "profile_url": "https://linkedin.com/in/x" }
                }
            ],
            "stop_reason": "tool_use",
            "usage": { "input_tokens": 50, "output_tokens": 30 }
        });

        let parsed: MessagesResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.content.len(), 2);
        assert_eq!(parsed.usage.input_tokens, 50);

        let response = ChatResponse {
            content: parsed.content,
            stop_reason: AnthropicProvider::parse_stop_reason(parsed.stop_reason.as_deref()),
            usage: Usage::new(parsed.usage.input_tokens, parsed.usage.output_tokens),
        };
        assert_eq!(response.stop_reason, StopReason::ToolUse);
        assert!(response.has_tool_use());
        assert_eq!(response.text().unwrap(), "Let me fetch that profile");
    }

    #[test]
    fn unknown_stop_reason_is_natural_completion() {
        assert_eq!(
            AnthropicProvider::parse_stop_reason(Some("pause_turn")),
            StopReason::EndTurn
        );
        assert_eq!(
            AnthropicProvider::parse_stop_reason(None),
            StopReason::EndTurn
        );
        assert_eq!(
            AnthropicProvider::parse_stop_reason(Some("tool_use")),
            StopReason::ToolUse
        );
    }

    #[test]
    fn debug_hides_api_key() {
        let provider = AnthropicProvider::new("sk-ant-secret");
        let debug_str = format!("{:?}", provider);
        assert!(debug_str.contains("AnthropicProvider"));
        assert!(!debug_str.contains("sk-ant-secret"));
    }
}
