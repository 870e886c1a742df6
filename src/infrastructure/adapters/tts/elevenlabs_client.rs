//! ElevenLabs Client
//!
//! POST {base_url}/text-to-speech/{native_voice_id}
//! Headers: Accept: audio/mpeg, xi-api-key
//! Request: {"text", "model_id", "voice_settings": {...}}  (JSON)
//! Response: 200 + MP3 binary

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{SpeechProviderPort, SpeechRequest, TtsError};
use crate::domain::voice::{ProviderKind, VoiceSettings};

/// 目录 voice id → ElevenLabs 原生 voice id
const VOICE_MAP: &[(&str, &str)] = &[
    ("elevenlabs_rachel", "pNInz6obpgDQGcFmaJgB"),
    ("elevenlabs_josh", "TxGEqnHWrfWFTfGW9XjX"),
    ("elevenlabs_bella", "EXAVITQu4vr4xnSDxMaL"),
    ("elevenlabs_antoni", "ErXwobaYiN019PkySvjV"),
    ("elevenlabs_elli", "MF3mGyEYCl7XYWbV9V6O"),
    ("elevenlabs_domi", "AZnzlk1XvdvUeBnXmlld"),
];

/// 未映射时使用 Rachel
const DEFAULT_NATIVE_VOICE: &str = "pNInz6obpgDQGcFmaJgB";

/// ElevenLabs 客户端配置
#[derive(Debug, Clone)]
pub struct ElevenLabsClientConfig {
    pub base_url: String,
    pub model_id: String,
    pub api_key: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl ElevenLabsClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.elevenlabs.io/v1".to_string(),
            model_id: "eleven_monolingual_v1".to_string(),
            api_key: api_key.into(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Serialize)]
struct SpeechBody<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettingsBody,
}

#[derive(Debug, Serialize)]
struct VoiceSettingsBody {
    stability: f32,
    similarity_boost: f32,
    style: f32,
    use_speaker_boost: bool,
}

impl From<&VoiceSettings> for VoiceSettingsBody {
    fn from(settings: &VoiceSettings) -> Self {
        Self {
            stability: settings.stability(),
            similarity_boost: settings.similarity_boost(),
            style: settings.style(),
            use_speaker_boost: settings.use_speaker_boost(),
        }
    }
}

pub fn native_voice_id(voice_id: &str) -> &'static str {
    VOICE_MAP
        .iter()
        .find(|(id, _)| *id == voice_id)
        .map(|(_, native)| *native)
        .unwrap_or(DEFAULT_NATIVE_VOICE)
}

/// ElevenLabs Client
pub struct ElevenLabsClient {
    client: Client,
    config: ElevenLabsClientConfig,
}

impl ElevenLabsClient {
    pub fn new(config: ElevenLabsClientConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn speech_url(&self, native_voice_id: &str) -> String {
        format!(
            "{}/text-to-speech/{}",
            self.config.base_url.trim_end_matches('/'),
            native_voice_id
        )
    }
}

#[async_trait]
impl SpeechProviderPort for ElevenLabsClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::ElevenLabs
    }

    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, TtsError> {
        let native_voice = native_voice_id(&request.voice_id);
        let body = SpeechBody {
            text: &request.text,
            model_id: &self.config.model_id,
            voice_settings: VoiceSettingsBody::from(&request.settings),
        };

        tracing::debug!(
            voice_id = %request.voice_id,
            native_voice = native_voice,
            text_len = request.text.len(),
            "Sending ElevenLabs speech request"
        );

        let response = self
            .client
            .post(self.speech_url(native_voice))
            .header("Accept", "audio/mpeg")
            .header("xi-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "ElevenLabs API error");
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
