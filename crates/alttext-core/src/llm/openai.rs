//! OpenAI provider.
//!
//! Sends the prompt with the base64 image inlined as message text and reads
//! the first entry of the `choices` list.

use crate::config::OpenAiConfig;
use crate::error::ProviderError;
use serde::{Deserialize, Serialize};

const NAME: &str = "OpenAI";

// --- Request types ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

// --- Response types ---

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    text: String,
}

fn build_request<'a>(config: &'a OpenAiConfig, image_base64: &str) -> ChatRequest<'a> {
    ChatRequest {
        model: &config.model,
        messages: vec![ChatMessage {
            role: "user",
            content: super::prompt::with_inline_image(image_base64),
        }],
        max_tokens: config.max_tokens,
    }
}

/// Extract the first choice's text from a response body.
fn parse_response(body: &[u8]) -> Result<String, ProviderError> {
    let chat_resp: ChatResponse =
        serde_json::from_slice(body).map_err(|source| ProviderError::MalformedResponse {
            provider: NAME,
            source,
        })?;

    chat_resp
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.text)
        .ok_or(ProviderError::NoContent("ChatGPT"))
}

pub(crate) async fn generate(
    client: &reqwest::Client,
    config: &OpenAiConfig,
    api_key: &str,
    image_base64: &str,
) -> Result<String, ProviderError> {
    let body = build_request(config, image_base64);

    tracing::debug!(endpoint = %config.endpoint, model = %config.model, "Sending request to OpenAI");
    let resp = client
        .post(&config.endpoint)
        .header("Authorization", format!("Bearer {api_key}"))
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await
        .map_err(|source| ProviderError::Transport {
            provider: NAME,
            source,
        })?;

    let status = resp.status();
    let bytes = resp.bytes().await.map_err(|source| ProviderError::Transport {
        provider: NAME,
        source,
    })?;
    let body_text = String::from_utf8_lossy(&bytes);
    tracing::debug!(
        status = status.as_u16(),
        body = %body_text,
        "Received response from OpenAI"
    );

    parse_response(&bytes)
}
