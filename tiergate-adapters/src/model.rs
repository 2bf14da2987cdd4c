//! Hosted model API client.
//!
//! Wraps an OpenAI-compatible API: chat completions (plain and vision)
//! and image generation. The caller decides which model identifier to
//! use; this client never consults entitlement.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use tiergate_core::{ChatMessage, ContentPart, ImageAttachment, ImageUrl, ModelId};
use tracing::{debug, instrument, warn};

use crate::error::ModelError;
use crate::http::HttpClient;

// ============================================================================
// Constants
// ============================================================================

/// Default API base URL.
const DEFAULT_API_BASE: &str = "https://api.openai.com";

/// Chat completions endpoint.
const CHAT_ENDPOINT: &str = "/v1/chat/completions";

/// Image generations endpoint.
const IMAGES_ENDPOINT: &str = "/v1/images/generations";

/// Generated image size.
const IMAGE_SIZE: &str = "1024x1024";

/// System prompt for image analysis requests.
const ANALYSIS_SYSTEM_PROMPT: &str =
    "You are an assistant that analyzes images precisely, including any text they contain.";

// ============================================================================
// Wire Types
// ============================================================================

/// Chat completions request body.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

/// Chat completions response body.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    /// Candidate completions; the first one is used.
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// One completion choice.
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    /// The generated message.
    pub message: ChatChoiceMessage,
}

/// Message inside a completion choice.
#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    /// Generated text content.
    #[serde(default)]
    pub content: Option<String>,
}

/// Image generation request body.
#[derive(Debug, Serialize)]
struct ImageGenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    n: u32,
}

/// Image generation response body.
#[derive(Debug, Deserialize)]
pub struct ImageGenerationResponse {
    /// Generated images; the first one is used.
    #[serde(default)]
    pub data: Vec<GeneratedImage>,
}

/// One generated image.
#[derive(Debug, Deserialize)]
pub struct GeneratedImage {
    /// URL of the hosted image.
    #[serde(default)]
    pub url: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

/// Client for the hosted language/vision model API.
#[derive(Debug, Clone)]
pub struct ModelClient {
    http: HttpClient,
    api_key: String,
    api_base: String,
}

impl ModelClient {
    /// Creates a client with the given API credential.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ModelError> {
        Ok(Self {
            http: HttpClient::new().map_err(ModelError::from)?,
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Overrides the API base URL (used against stub servers in tests).
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Sends a chat completion request and returns the first choice's text.
    #[instrument(skip(self, messages), fields(model = %model))]
    pub async fn chat(
        &self,
        model: &ModelId,
        messages: &[ChatMessage],
    ) -> Result<String, ModelError> {
        debug!(message_count = messages.len(), "Requesting chat completion");

        let url = format!("{}{}", self.api_base, CHAT_ENDPOINT);
        let request = ChatCompletionRequest {
            model: model.as_str(),
            messages,
        };

        let response = self.http.post_json(&url, &self.api_key, &request).await?;
        let body = response.text().await?;

        let parsed: ChatCompletionResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Failed to parse chat completion response");
            ModelError::InvalidResponse(format!("JSON error: {e}"))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ModelError::InvalidResponse("Response contained no choices".to_string()))
    }

    /// Analyzes an uploaded image with a vision model.
    ///
    /// The image is embedded in the request as a base64 data URL alongside
    /// the user's prompt.
    #[instrument(skip(self, image), fields(model = %model, bytes = image.data.len()))]
    pub async fn analyze_image(
        &self,
        model: &ModelId,
        prompt: &str,
        image: &ImageAttachment,
    ) -> Result<String, ModelError> {
        let data_url = format!(
            "data:{};base64,{}",
            image.media_type,
            BASE64.encode(&image.data)
        );

        let messages = vec![
            ChatMessage::system(ANALYSIS_SYSTEM_PROMPT),
            ChatMessage::user_parts(vec![
                ContentPart::Text {
                    text: prompt.to_string(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl { url: data_url },
                },
            ]),
        ];

        self.chat(model, &messages).await
    }

    /// Generates an image from a prompt and returns its hosted URL.
    #[instrument(skip(self, prompt), fields(model = %model))]
    pub async fn generate_image(
        &self,
        model: &ModelId,
        prompt: &str,
    ) -> Result<String, ModelError> {
        debug!("Requesting image generation");

        let url = format!("{}{}", self.api_base, IMAGES_ENDPOINT);
        let request = ImageGenerationRequest {
            model: model.as_str(),
            prompt,
            size: IMAGE_SIZE,
            n: 1,
        };

        let response = self.http.post_json(&url, &self.api_key, &request).await?;
        let body = response.text().await?;

        let parsed: ImageGenerationResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Failed to parse image generation response");
            ModelError::InvalidResponse(format!("JSON error: {e}"))
        })?;

        parsed
            .data
            .into_iter()
            .next()
            .and_then(|image| image.url)
            .ok_or_else(|| ModelError::InvalidResponse("Response contained no images".to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_completion_response() {
        let json = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "The answer is 42."}}
            ]
        }"#;

        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some("The answer is 42.")
        );
    }

    #[test]
    fn test_parse_empty_choices() {
        let response: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(response.choices.is_empty());
    }

    #[test]
    fn test_parse_image_generation_response() {
        let json = r#"{
            "created": 1700000000,
            "data": [{"url": "https://img.example.com/out.png"}]
        }"#;

        let response: ImageGenerationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.data[0].url.as_deref(),
            Some("https://img.example.com/out.png")
        );
    }

    #[test]
    fn test_chat_request_wire_shape() {
        let messages = vec![ChatMessage::user("hello")];
        let request = ChatCompletionRequest {
            model: "gpt-3.5-turbo",
            messages: &messages,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
    }
}
