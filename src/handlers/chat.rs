use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};

use crate::dtos::{ChatRequest, GenerateResponse};
use crate::error::AppError;
use crate::services::providers::ChatMessage;
use crate::startup::AppState;

/// Minimum accepted prompt length.
const MIN_PROMPT_LEN: usize = 3;

pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = body.map_err(|_| {
        AppError::BadRequest(anyhow::anyhow!("Invalid request: prompt is required."))
    })?;

    let messages = build_messages(request)?;

    metrics::counter!("relay_requests_total", "endpoint" => "chat").increment(1);

    let response = state
        .text_provider
        .generate(&messages, None)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Provider call failed");
            metrics::counter!("relay_provider_failures_total", "endpoint" => "chat").increment(1);
            AppError::Provider(e)
        })?;

    tracing::info!(
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "Generated chat response"
    );

    Ok(Json(GenerateResponse {
        response: response.text.unwrap_or_default(),
    }))
}

/// Validate the request body and turn it into provider messages.
fn build_messages(request: ChatRequest) -> Result<Vec<ChatMessage>, AppError> {
    if let Some(prompt) = request.prompt {
        if prompt.trim().is_empty() {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Invalid request: prompt is required."
            )));
        }
        if prompt.chars().count() < MIN_PROMPT_LEN {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Prompt must be at least {} characters.",
                MIN_PROMPT_LEN
            )));
        }
        return Ok(vec![ChatMessage::user(prompt)]);
    }

    let messages = request.messages.ok_or_else(|| {
        AppError::BadRequest(anyhow::anyhow!(
            "Invalid request: prompt or messages is required."
        ))
    })?;

    if messages.is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Invalid request: messages must not be empty."
        )));
    }

    Ok(messages
        .into_iter()
        .map(|m| ChatMessage {
            role: m.role,
            content: m.content,
        })
        .collect())
}
