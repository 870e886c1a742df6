//! OpenAI Speech Client
//!
//! POST {base_url}/audio/speech
//! Request: {"model", "voice", "input", "response_format": "mp3"}
//! Response: MP3 binary

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{SpeechProviderPort, SpeechRequest, TtsError};
use crate::domain::voice::ProviderKind;

const VOICE_MAP: &[(&str, &str)] = &[
    ("openai_nova", "nova"),
    ("openai_alloy", "alloy"),
    ("openai_echo", "echo"),
    ("openai_fable", "fable"),
    ("openai_onyx", "onyx"),
    ("openai_shimmer", "shimmer"),
];

const DEFAULT_VOICE: &str = "nova";

/// OpenAI Speech 客户端配置
#[derive(Debug, Clone)]
pub struct OpenAiSpeechClientConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl OpenAiSpeechClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "tts-1".to_string(),
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

fn native_voice(voice_id: &str) -> &'static str {
    VOICE_MAP
        .iter()
        .find(|(id, _)| *id == voice_id)
        .map(|(_, voice)| *voice)
        .unwrap_or(DEFAULT_VOICE)
}

/// OpenAI Speech Client
pub struct OpenAiSpeechClient {
    client: Client,
    config: OpenAiSpeechClientConfig,
}

impl OpenAiSpeechClient {
    pub fn new(config: OpenAiSpeechClientConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl SpeechProviderPort for OpenAiSpeechClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, TtsError> {
        let body = SpeechBody {
            model: &self.config.model,
            voice: native_voice(&request.voice_id),
            input: &request.text,
            response_format: "mp3",
        };

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
            tracing::error!(status = status.as_u16(), body = %body, "OpenAI speech API error");
            return Err(TtsError::ServiceError {
                status: status.as_u16(),
                body,
            });
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to read audio: {}", e)))?;

        Ok(audio.to_vec())
    }
}
