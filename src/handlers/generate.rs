use axum::{
    extract::{Multipart, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::dtos::GenerateResponse;
use crate::error::AppError;
use crate::services::providers::{ChatMessage, GenerativePart, ProviderResponse};
use crate::services::UploadSpool;
use crate::startup::AppState;

/// Largest upload the relay will accept.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// The kinds of media the relay forwards, one per endpoint.
#[derive(Debug, Clone, Copy)]
enum MediaKind {
    Image,
    Document,
    Audio,
}

impl MediaKind {
    /// Multipart field name carrying the file, matching the endpoint name.
    fn field(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Document => "document",
            Self::Audio => "audio",
        }
    }

    /// Prompt used when the caller does not supply one.
    fn default_prompt(self) -> &'static str {
        match self {
            Self::Image => "Describe the image",
            Self::Document => "Summarize the document",
            Self::Audio => "Transcribe the audio",
        }
    }
}

pub async fn generate_from_image(
    state: State<AppState>,
    multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    generate_from_media(state, MediaKind::Image, multipart).await
}

pub async fn generate_from_document(
    state: State<AppState>,
    multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    generate_from_media(state, MediaKind::Document, multipart).await
}

pub async fn generate_from_audio(
    state: State<AppState>,
    multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    generate_from_media(state, MediaKind::Audio, multipart).await
}

async fn generate_from_media(
    State(state): State<AppState>,
    kind: MediaKind,
    mut multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    let mut prompt: Option<String> = None;
    let mut upload: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some(name) if name == kind.field() => {
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| {
                        AppError::BadRequest(anyhow::anyhow!("Failed to read file bytes: {}", e))
                    })?
                    .to_vec();
                upload = Some((data, mime_type));
            }
            Some("prompt") => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(anyhow::anyhow!("Failed to read prompt field: {}", e))
                })?;
                if !text.trim().is_empty() {
                    prompt = Some(text);
                }
            }
            _ => {}
        }
    }

    let (data, mime_type) = upload.ok_or_else(|| {
        AppError::BadRequest(anyhow::anyhow!("Missing '{}' file field", kind.field()))
    })?;

    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "File too large (max 20MB)"
        )));
    }

    let prompt = prompt.unwrap_or_else(|| kind.default_prompt().to_string());

    metrics::counter!("relay_requests_total", "endpoint" => kind.field()).increment(1);

    tracing::info!(
        endpoint = kind.field(),
        mime_type = %mime_type,
        size = data.len(),
        "Forwarding upload to provider"
    );

    // The spool must be removed on every exit path after this point.
    let spool = UploadSpool::write(kind.field(), &data).await?;
    drop(data);

    let outcome = generate_with_spool(&state, &spool, prompt, mime_type, kind).await;
    spool.release().await;

    let response = outcome?;
    Ok(Json(GenerateResponse {
        response: response.text.unwrap_or_default(),
    }))
}

async fn generate_with_spool(
    state: &AppState,
    spool: &UploadSpool,
    prompt: String,
    mime_type: String,
    kind: MediaKind,
) -> Result<ProviderResponse, AppError> {
    let bytes = spool.read().await?;
    let part = GenerativePart {
        data: STANDARD.encode(bytes),
        mime_type,
    };
    let messages = vec![ChatMessage::user(prompt)];

    let response = state
        .text_provider
        .generate(&messages, Some(&part))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, endpoint = kind.field(), "Provider call failed");
            metrics::counter!("relay_provider_failures_total", "endpoint" => kind.field())
                .increment(1);
            AppError::Provider(e)
        })?;

    tracing::info!(
        endpoint = kind.field(),
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "Generated media response"
    );

    Ok(response)
}
