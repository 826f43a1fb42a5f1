//! Anthropic provider using the Messages API.
//!
//! Sends the prompt as a text block plus a base64 image block whose media
//! type is sniffed from the decoded bytes.

use crate::config::AnthropicConfig;
use crate::error::ProviderError;
use base64::Engine;
use serde::{Deserialize, Serialize};

const NAME: &str = "Anthropic";

// --- Request types ---

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Vec<ContentBlock<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum ContentBlock<'a> {
    #[serde(rename = "text")]
    Text { text: &'static str },
    #[serde(rename = "image")]
    Image { source: ImageSource<'a> },
}

#[derive(Serialize)]
struct ImageSource<'a> {
    #[serde(rename = "type")]
    source_type: &'static str,
    media_type: &'static str,
    data: &'a str,
}

// --- Response types ---

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    text: String,
}

/// Decode the image and build the request body.
///
/// Fails with `InvalidImageEncoding` before anything is sent.
fn build_request<'a>(
    config: &'a AnthropicConfig,
    image_base64: &'a str,
) -> Result<MessagesRequest<'a>, ProviderError> {
    let image = base64::engine::general_purpose::STANDARD.decode(image_base64)?;
    let media_type = super::media::sniff_media_type(&image);

    Ok(MessagesRequest {
        model: &config.model,
        messages: vec![Message {
            role: "user",
            content: vec![
                ContentBlock::Text {
                    text: super::prompt::ALT_TEXT_PROMPT,
                },
                ContentBlock::Image {
                    source: ImageSource {
                        source_type: "base64",
                        media_type,
                        data: image_base64,
                    },
                },
            ],
        }],
        max_tokens: config.max_tokens,
    })
}

/// Classify a response body.
///
/// A structured `{"error": {"message": ...}}` payload wins; otherwise the
/// first content block's text is returned as-is.
fn parse_response(body: &[u8]) -> Result<String, ProviderError> {
    if let Ok(ErrorResponse { error }) = serde_json::from_slice::<ErrorResponse>(body) {
        if !error.message.is_empty() {
            return Err(ProviderError::ApiError(error.message));
        }
    }

    let messages_resp: MessagesResponse =
        serde_json::from_slice(body).map_err(|source| ProviderError::MalformedResponse {
            provider: NAME,
            source,
        })?;

    messages_resp
        .content
        .into_iter()
        .next()
        .map(|block| block.text)
        .ok_or(ProviderError::NoContent("Claude"))
}

pub(crate) async fn generate(
    client: &reqwest::Client,
    config: &AnthropicConfig,
    api_key: &str,
    image_base64: &str,
) -> Result<String, ProviderError> {
    let body = build_request(config, image_base64)?;

    tracing::debug!(endpoint = %config.endpoint, model = %config.model, "Sending request to Anthropic");
    let resp = client
        .post(&config.endpoint)
        .header("x-api-key", api_key)
        .header("anthropic-version", &config.api_version)
        .header("content-type", "application/json")
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
        "Received response from Anthropic"
    );

    parse_response(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // 1x1 transparent PNG
    const PNG_BASE64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

    fn config_for(server: &MockServer) -> AnthropicConfig {
        AnthropicConfig {
            endpoint: format!("{}/v1/messages", server.uri()),
            ..AnthropicConfig::default()
        }
    }

    #[test]
    fn test_build_request_shape() {
        let config = AnthropicConfig::default();
        let request = build_request(&config, PNG_BASE64).unwrap();
        let value = serde_json::to_value(request).unwrap();

        assert_eq!(value["model"], "claude-3-opus-20240229");
        assert_eq!(value["max_tokens"], 300);
        assert_eq!(value["messages"][0]["role"], "user");

        let content = value["messages"][0]["content"].as_array().unwrap();
        assert_eq!(content.len(), 2);
        assert_eq!(content[0]["type"], "text");
        assert_eq!(content[0]["text"], super::super::prompt::ALT_TEXT_PROMPT);
        assert_eq!(
            content[1],
            json!({
                "type": "image",
                "source": {"type": "base64", "media_type": "image/png", "data": PNG_BASE64}
            })
        );
    }

    #[test]
    fn test_build_request_rejects_invalid_base64() {
        let config = AnthropicConfig::default();
        let err = build_request(&config, "not base64!!").err().unwrap();
        assert!(matches!(err, ProviderError::InvalidImageEncoding(_)));
    }

    #[test]
    fn test_parse_error_payload() {
        let body = br#"{"type":"error","error":{"type":"invalid_request_error","message":"x"}}"#;
        let err = parse_response(body).unwrap_err();
        assert!(matches!(err, ProviderError::ApiError(ref m) if m == "x"));
    }

    #[test]
    fn test_parse_text_mentioning_error_is_success() {
        let body = br#"{"content":[{"type":"text","text":"1. A sign reading \"error\"\n2. Sign\n3. Red"}]}"#;
        let text = parse_response(body).unwrap();
        assert_eq!(text, "1. A sign reading \"error\"\n2. Sign\n3. Red");
    }

    #[test]
    fn test_parse_returns_first_block_unchanged() {
        let body = br#"{"content":[{"type":"text","text":"d1\nd2\nd3"},{"type":"text","text":"other"}]}"#;
        assert_eq!(parse_response(body).unwrap(), "d1\nd2\nd3");
    }

    #[test]
    fn test_parse_empty_content_is_no_content() {
        let err = parse_response(br#"{"content":[]}"#).unwrap_err();
        assert!(matches!(err, ProviderError::NoContent(_)));

        // An error object without a message falls through to the success shape.
        let err = parse_response(br#"{"error":{}}"#).unwrap_err();
        assert!(matches!(err, ProviderError::NoContent(_)));
    }

    #[test]
    fn test_parse_invalid_json_is_malformed() {
        let err = parse_response(b"upstream connect error").unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_generate_sends_documented_request() {
        let server = MockServer::start().await;
        let config = config_for(&server);
        let expected = serde_json::to_value(build_request(&config, PNG_BASE64).unwrap()).unwrap();

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "sk-ant-test"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(header("content-type", "application/json"))
            .and(body_json(expected))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "d1\nd2\nd3"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = generate(&reqwest::Client::new(), &config, "sk-ant-test", PNG_BASE64)
            .await
            .unwrap();
        assert_eq!(text, "d1\nd2\nd3");
    }

    #[tokio::test]
    async fn test_generate_surfaces_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "type": "error",
                "error": {"type": "invalid_request_error", "message": "image exceeds 5 MB maximum"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = generate(
            &reqwest::Client::new(),
            &config_for(&server),
            "sk-ant-test",
            PNG_BASE64,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ProviderError::ApiError(ref m) if m == "image exceeds 5 MB maximum"));
    }

    #[tokio::test]
    async fn test_invalid_base64_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = generate(
            &reqwest::Client::new(),
            &config_for(&server),
            "sk-ant-test",
            "%%%",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidImageEncoding(_)));
    }
}
