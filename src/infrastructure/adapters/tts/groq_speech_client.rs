//! Groq Speech Client - playai-tts 回放模型
//!
//! POST {base_url}/audio/speech
//! Request: {"model": "playai-tts", "voice": "Fritz-PlayAI", "input", "response_format": "wav"}
//! Response: WAV，可能是 JSON 包裹的 base64、分块流或原始字节

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use futures_util::StreamExt;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{SpeechProviderPort, SpeechRequest, TtsError};
use crate::domain::voice::ProviderKind;

/// JSON 包裹时可能承载音频的字段，按顺序检查
const EMBEDDED_AUDIO_FIELDS: &[&str] = &["content", "audio", "data"];

/// Groq Speech 客户端配置
#[derive(Debug, Clone)]
pub struct GroqSpeechClientConfig {
    pub base_url: String,
    pub model: String,
    pub voice: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl GroqSpeechClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "playai-tts".to_string(),
            voice: "Fritz-PlayAI".to_string(),
            api_key: api_key.into(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Serialize)]
struct SpeechBody<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
    response_format: &'static str,
}

/// 服务端返回的响应形态
#[derive(Debug)]
pub enum SpeechPayload {
    /// JSON 对象，音频嵌在某个字段里（base64）
    Json(serde_json::Value),
    /// 分块传输的流
    Streamed(Vec<Vec<u8>>),
    /// 原始字节
    Raw(Vec<u8>),
}

/// 把各种响应形态统一成音频字节
///
/// 依次检查嵌入字段、流式分块、原始字节；结果为空视为失败
pub fn normalize(payload: SpeechPayload) -> Result<Vec<u8>, TtsError> {
    let audio = match payload {
        SpeechPayload::Json(value) => embedded_audio(&value)?,
        SpeechPayload::Streamed(chunks) => chunks.concat(),
        SpeechPayload::Raw(bytes) => bytes,
    };

    if audio.is_empty() {
        return Err(TtsError::EmptyAudio);
    }
    Ok(audio)
}

fn embedded_audio(value: &serde_json::Value) -> Result<Vec<u8>, TtsError> {
    let encoded = EMBEDDED_AUDIO_FIELDS
        .iter()
        .find_map(|field| value.get(*field).and_then(|v| v.as_str()))
        .ok_or_else(|| TtsError::InvalidResponse("No audio field in JSON response".to_string()))?;

    BASE64
        .decode(encoded)
        .map_err(|e| TtsError::InvalidResponse(format!("Invalid base64 audio: {}", e)))
}

/// Groq Speech Client
pub struct GroqSpeechClient {
    client: Client,
    config: GroqSpeechClientConfig,
}

impl GroqSpeechClient {
    pub fn new(config: GroqSpeechClientConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    async fn read_payload(response: reqwest::Response) -> Result<SpeechPayload, TtsError> {
        let headers = response.headers();
        let is_json = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("application/json"))
            .unwrap_or(false);
        let has_length = headers.contains_key(CONTENT_LENGTH);

        if is_json {
            let value = response
                .json()
                .await
                .map_err(|e| TtsError::InvalidResponse(format!("Failed to parse JSON: {}", e)))?;
            return Ok(SpeechPayload::Json(value));
        }

        if !has_length {
            let mut chunks = Vec::new();
            let mut stream = response.bytes_stream();
            while let Some(chunk) = stream.next().await {
                chunks.push(chunk?.to_vec());
            }
            return Ok(SpeechPayload::Streamed(chunks));
        }

        Ok(SpeechPayload::Raw(response.bytes().await?.to_vec()))
    }
}

#[async_trait]
impl SpeechProviderPort for GroqSpeechClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Groq
    }

    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, TtsError> {
        let body = SpeechBody {
            model: &self.config.model,
            voice: &self.config.voice,
            input: &request.text,
            response_format: "wav",
        };

        tracing::info!(
            model = %self.config.model,
            voice = %self.config.voice,
            "Generating playback-model audio"
        );

        let url = format!("{}/audio/speech", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "Groq speech API error");
            return Err(TtsError::ServiceError {
                status: status.as_u16(),
                body,
            });
        }

        let audio = normalize(Self::read_payload(response).await?)?;
        tracing::info!(audio_size = audio.len(), "Playback-model audio generated");
        Ok(audio)
    }
}
