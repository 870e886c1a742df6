//! Audio HTTP Handlers

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::application::GenerateAudio;
use crate::infrastructure::http::dto::GenerateAudioRequest;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 生成音频样例，成功时直接返回音频字节
pub async fn generate_audio(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateAudioRequest>,
) -> Result<Response, ApiError> {
    let voice_id = req.voice_id.trim().to_string();
    let command = GenerateAudio {
        voice_id: voice_id.clone(),
        text: req.text,
        settings: req.settings,
    };

    let audio = state.generate_audio_handler.handle(command).await?;
    let disposition = format!(
        "inline; filename=\"sample_{}.{}\"",
        voice_id,
        audio.file_extension()
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, audio.mimetype())
        .header(header::CONTENT_LENGTH, audio.data.len())
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(Body::from(audio.data))
        .map_err(|e| ApiError::Internal(format!("Failed to build audio response: {}", e)))
}
