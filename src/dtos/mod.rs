use serde::{Deserialize, Serialize};

/// Body accepted by `POST /chat`: a bare prompt or a conversation.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub prompt: Option<String>,
    pub messages: Option<Vec<ChatMessageDto>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatMessageDto {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub response: String,
}
