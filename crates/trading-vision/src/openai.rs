//! OpenAI-compatible chat-completions client for chart images.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};
use trading_core::error::AnalysisError;
use trading_core::traits::VisionAnalyzer;
use trading_core::types::ChartAnalysis;

use crate::parse::parse_analysis;
use crate::prompt::ANALYSIS_PROMPT;

/// Connection settings for the vision model.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub base_url: String,
    /// Request timeout, `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl OpenAiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";
    pub const DEFAULT_MODEL: &'static str = "gpt-4o-mini";

    /// Create config directly with an API key and default model settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: Self::DEFAULT_MODEL.to_string(),
            max_tokens: 1500,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Read the API key from the named environment variable.
    pub fn from_env(key_var: &str) -> Result<Self, AnalysisError> {
        let api_key = std::env::var(key_var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AnalysisError::Configuration(format!("{} not set", key_var)))?;
        Ok(Self::new(api_key))
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
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl ChatResponse {
    fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
    }
}

/// Vision analyzer backed by an OpenAI-compatible API.
pub struct OpenAiVisionAnalyzer {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiVisionAnalyzer {
    pub fn new(config: OpenAiConfig) -> Result<Self, AnalysisError> {
        if config.api_key.trim().is_empty() {
            return Err(AnalysisError::Configuration("API key is empty".into()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AnalysisError::Configuration(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn build_request<'a>(&'a self, image_b64: &str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: ANALYSIS_PROMPT,
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: format!("data:image/png;base64,{}", image_b64),
                        },
                    },
                ],
            }],
            max_tokens: self.config.max_tokens,
        }
    }
}

#[async_trait]
impl VisionAnalyzer for OpenAiVisionAnalyzer {
    async fn analyze_chart(&self, image_path: &Path) -> Result<ChartAnalysis, AnalysisError> {
        info!("Requesting vision analysis for {}", image_path.display());

        let image = tokio::fs::read(image_path).await?;
        let request = self.build_request(&STANDARD.encode(image));

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalysisError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AnalysisError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = resp
            .json()
            .await
            .map_err(|e| AnalysisError::Request(e.to_string()))?;
        let content = chat.into_content().ok_or(AnalysisError::EmptyResponse)?;
        debug!("Raw model reply: {}", content);

        let analysis = parse_analysis(&content).map_err(|e| {
            warn!("Unusable model reply for {}: {}", image_path.display(), e);
            e
        })?;

        for issue in &analysis.issues {
            warn!("Dropped analysis section for {}: {}", image_path.display(), issue);
        }
        info!(
            "Vision analysis for {}: sentiment {}",
            image_path.display(),
            analysis.sentiment().unwrap_or("unknown")
        );

        Ok(analysis)
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let analyzer = OpenAiVisionAnalyzer::new(OpenAiConfig::new("sk-test")).unwrap();
        let request = analyzer.build_request("AAAA");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["max_tokens"], 1500);
        assert_eq!(value["messages"][0]["role"], "user");

        let content = &value["messages"][0]["content"];
        assert_eq!(content[0]["type"], "text");
        assert_eq!(content[1]["type"], "image_url");
        assert_eq!(
            content[1]["image_url"]["url"],
            "data:image/png;base64,AAAA"
        );
    }

    #[test]
    fn test_response_content() {
        let resp: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": "{\"a\": 1}"}}]
        }))
        .unwrap();
        assert_eq!(resp.into_content().as_deref(), Some("{\"a\": 1}"));

        let empty: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(empty.into_content().is_none());

        let null: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"content": null}}]
        }))
        .unwrap();
        assert!(null.into_content().is_none());
    }

    #[test]
    fn test_config() {
        assert!(OpenAiVisionAnalyzer::new(OpenAiConfig::new("  ")).is_err());

        let err = OpenAiConfig::from_env("VISION_TRADER_TEST_UNSET_KEY").unwrap_err();
        assert!(matches!(err, AnalysisError::Configuration(_)));

        let config = OpenAiConfig::new("sk-test")
            .with_model("gpt-4o")
            .with_base_url("http://localhost:9000/v1/");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "http://localhost:9000/v1");
    }

    #[tokio::test]
    async fn test_missing_image() {
        let dir = tempfile::TempDir::new().unwrap();
        let analyzer = OpenAiVisionAnalyzer::new(OpenAiConfig::new("sk-test")).unwrap();

        let err = analyzer
            .analyze_chart(&dir.path().join("missing.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Image(_)));
    }
}
