//! Reqwest-backed description enhancer for Azure OpenAI chat deployments.
//!
//! The adapter owns transport concerns only: building the prompt, the
//! request timeout, mapping HTTP failures and decoding the completion.
//! Falling back to the original text is the caller's job.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::domain::PetType;
use crate::domain::ports::{DescriptionEnhancerError, PetDescriptionEnhancer};
use crate::domain::value_object::truncate;

const SYSTEM_PROMPT: &str = "You are an expert pet assistant. Provide concise, engaging, and \
                             fact-based enhancements. Keep responses under 500 characters.";
const MAX_TOKENS: u32 = 150;
const MAX_DESCRIPTION_CHARS: usize = 500;
const API_KEY_HEADER: &str = "api-key";

/// Where and how to reach the chat deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiEnhancerConfig {
    pub endpoint: Url,
    pub deployment: String,
    pub api_key: String,
    pub api_version: String,
    pub timeout: Duration,
}

/// [`PetDescriptionEnhancer`] backed by an Azure OpenAI chat completion
/// deployment.
pub struct OpenAiDescriptionEnhancer {
    client: Client,
    url: Url,
    api_key: String,
}

impl OpenAiDescriptionEnhancer {
    /// Build the adapter and its HTTP client.
    ///
    /// # Errors
    /// Returns [`DescriptionEnhancerError::Transport`] when the completion URL
    /// cannot be formed or the client cannot be constructed.
    pub fn new(config: OpenAiEnhancerConfig) -> Result<Self, DescriptionEnhancerError> {
        let url = completion_url(&config.endpoint, &config.deployment, &config.api_version)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| DescriptionEnhancerError::transport(err.to_string()))?;
        Ok(Self {
            client,
            url,
            api_key: config.api_key,
        })
    }
}

fn completion_url(
    endpoint: &Url,
    deployment: &str,
    api_version: &str,
) -> Result<Url, DescriptionEnhancerError> {
    let mut url = endpoint.clone();
    url.path_segments_mut()
        .map_err(|()| {
            DescriptionEnhancerError::transport(format!("endpoint {endpoint} cannot be a base"))
        })?
        .pop_if_empty()
        .extend(["openai", "deployments", deployment, "chat", "completions"]);
    url.query_pairs_mut()
        .clear()
        .append_pair("api-version", api_version);
    Ok(url)
}

fn user_prompt(pet_type: PetType, breed: &str, description: &str) -> String {
    format!(
        "Enhance this description of a {breed} {}: {description}",
        pet_type.as_str().to_lowercase()
    )
}

#[async_trait]
impl PetDescriptionEnhancer for OpenAiDescriptionEnhancer {
    async fn enhance(
        &self,
        pet_type: PetType,
        breed: &str,
        description: &str,
    ) -> Result<String, DescriptionEnhancerError> {
        let prompt = user_prompt(pet_type, breed, description);
        let body = ChatCompletionRequest {
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
        };
        let response = self
            .client
            .post(self.url.clone())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status));
        }
        let enhanced = parse_completion(bytes.as_ref())?;
        debug!(chars = enhanced.chars().count(), "description enhanced");
        Ok(enhanced)
    }
}

fn parse_completion(body: &[u8]) -> Result<String, DescriptionEnhancerError> {
    let decoded: ChatCompletionResponse = serde_json::from_slice(body).map_err(|error| {
        DescriptionEnhancerError::decode(format!("invalid completion payload: {error}"))
    })?;
    let content = decoded.into_first_content().unwrap_or_default();
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(DescriptionEnhancerError::decode("completion held no text"));
    }
    Ok(truncate(trimmed, MAX_DESCRIPTION_CHARS, false))
}

fn map_transport_error(error: reqwest::Error) -> DescriptionEnhancerError {
    if error.is_timeout() {
        DescriptionEnhancerError::timeout(error.to_string())
    } else {
        DescriptionEnhancerError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode) -> DescriptionEnhancerError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            DescriptionEnhancerError::timeout(format!("status {}", status.as_u16()))
        }
        _ => DescriptionEnhancerError::status(status.as_u16()),
    }
}
