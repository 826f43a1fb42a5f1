//! Request handlers for the home page, uploads and API key saving.

use super::render;
use super::AppState;
use alttext_core::Provider;
use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use base64::Engine;
use serde::Deserialize;

const READ_FAILED: &str = "Failed to read uploaded file. Please try again.";

fn parse_failed(max_upload_mb: u64) -> String {
    format!("Failed to parse upload. Please ensure the file is under {max_upload_mb}MB.")
}

/// `GET /`
pub async fn home(State(state): State<AppState>) -> Html<String> {
    tracing::debug!("Serving home page");
    let api_key_missing = !state.credentials.read().await.has(state.provider);
    Html(render::home_page(
        state.provider,
        api_key_missing,
        state.config.limits.max_upload_mb,
    ))
}

/// `POST /upload`
///
/// Expects a multipart form with an `image` file field. Every outcome is an
/// HTML fragment for the page's result area.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Html<String> {
    tracing::info!("Received upload request");

    let credentials = state.credentials.read().await.clone();
    if !credentials.has(state.provider) {
        return Html(render::upload_error("API key not configured"));
    }

    let max_upload_mb = state.config.limits.max_upload_mb;
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(e) => {
            tracing::warn!("Rejected upload: {e}");
            return Html(render::upload_error(&parse_failed(max_upload_mb)));
        }
    };

    let image = match read_image_field(&mut multipart).await {
        Ok(Some(image)) => image,
        Ok(None) => return Html(render::upload_error(READ_FAILED)),
        Err(e) => {
            tracing::warn!("Error parsing multipart form: {e}");
            return Html(render::upload_error(&parse_failed(max_upload_mb)));
        }
    };

    tracing::info!(
        "Uploaded file details - Filename: {}, Size: {} bytes",
        image.file_name.as_deref().unwrap_or("<none>"),
        image.bytes.len()
    );

    if image.bytes.len() > state.config.limits.max_upload_bytes() {
        return Html(render::upload_error(&format!(
            "Image size exceeds {max_upload_mb}MB limit. Please choose a smaller image."
        )));
    }

    let encoded = base64::engine::general_purpose::STANDARD.encode(&image.bytes);
    match state
        .generator
        .generate_with(&credentials, state.provider, &encoded)
        .await
    {
        Ok(result) => {
            tracing::debug!("Generated alt text: {}", result.raw_text);
            Html(render::success(&result))
        }
        Err(e) => {
            tracing::error!("Error generating alt text: {e}");
            Html(render::upload_error(e.user_message()))
        }
    }
}

struct UploadedImage {
    file_name: Option<String>,
    bytes: Vec<u8>,
}

/// Find the `image` field. `Ok(None)` when the form has no such field.
async fn read_image_field(
    multipart: &mut Multipart,
) -> Result<Option<UploadedImage>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await?;
        return Ok(Some(UploadedImage {
            file_name,
            bytes: bytes.to_vec(),
        }));
    }
    Ok(None)
}

#[derive(Debug, Deserialize)]
pub struct SaveApiKeyForm {
    #[serde(default, rename = "apiKey")]
    api_key: String,
    #[serde(default)]
    mode: String,
}

/// `POST /saveApiKey`
///
/// Persists the key to the env file and makes it usable immediately, then
/// redirects home.
pub async fn save_api_key(
    State(state): State<AppState>,
    form: Result<Form<SaveApiKeyForm>, FormRejection>,
) -> Response {
    let Ok(Form(form)) = form else {
        return Html(render::api_key_error("API key and mode are required")).into_response();
    };

    let api_key = form.api_key.trim();
    if api_key.is_empty() || form.mode.is_empty() {
        return Html(render::api_key_error("API key and mode are required")).into_response();
    }

    let Ok(provider) = form.mode.parse::<Provider>() else {
        return Html(render::api_key_error("Invalid mode")).into_response();
    };

    if let Err(e) = state.env_file.upsert(provider.env_var(), api_key) {
        tracing::error!("Error saving API key: {e}");
        return Html(render::api_key_error("Failed to save API key")).into_response();
    }

    state.credentials.write().await.set(provider, api_key);
    tracing::info!("{} API key saved", provider.label());

    Redirect::to("/").into_response()
}
