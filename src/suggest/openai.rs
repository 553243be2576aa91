//! OpenAI-compatible suggestion client

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{MeaningSuggester, SuggestError};
use crate::config::SuggestConfig;

/// Client for an OpenAI-compatible chat completions endpoint
///
/// One short completion per suggested word; no retries. The timeout
/// keeps a slow endpoint from stalling an interactive add.
pub struct OpenAiSuggester {
    api_key: String,
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
}

impl OpenAiSuggester {
    /// Build a client from config, reading the API key from the
    /// configured environment variable
    pub fn from_config(config: &SuggestConfig) -> Result<Self, SuggestError> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| SuggestError::MissingApiKey(config.api_key_env.clone()))?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            client,
        })
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl MeaningSuggester for OpenAiSuggester {
    fn suggest(&self, word: &str) -> Result<String, SuggestError> {
        let prompt = format!(
            "영어 단어 '{}'의 가장 일반적인 한국어 뜻을 1~3개 알려줘. \
             슬래시(/)로 구분해서 답하고, 다른 설명은 붙이지 마.",
            word
        );
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(SuggestError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response.json()?;
        Ok(parsed
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_requires_api_key() {
        let config = SuggestConfig {
            api_key_env: "_VOCA_TEST_KEY_ABSENT".to_string(),
            ..SuggestConfig::default()
        };
        let result = OpenAiSuggester::from_config(&config);
        assert!(matches!(result, Err(SuggestError::MissingApiKey(_))));
    }

    #[test]
    fn test_from_config_trims_trailing_slash() {
        std::env::set_var("_VOCA_TEST_KEY_PRESENT", "sk-test");
        let config = SuggestConfig {
            base_url: "http://localhost:8080/".to_string(),
            api_key_env: "_VOCA_TEST_KEY_PRESENT".to_string(),
            ..SuggestConfig::default()
        };
        let suggester = OpenAiSuggester::from_config(&config).unwrap();
        assert_eq!(suggester.base_url, "http://localhost:8080");
        std::env::remove_var("_VOCA_TEST_KEY_PRESENT");
    }
}
