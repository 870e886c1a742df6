//! Azure Speech Client
//!
//! POST https://{region}.tts.speech.microsoft.com/cognitiveservices/v1
//! Headers: Ocp-Apim-Subscription-Key, X-Microsoft-OutputFormat
//! Request: SSML
//! Response: MP3 binary

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::application::ports::{SpeechProviderPort, SpeechRequest, TtsError};
use crate::domain::voice::ProviderKind;

const VOICE_MAP: &[(&str, &str)] = &[
    ("azure_jenny", "en-US-JennyNeural"),
    ("azure_guy", "en-US-GuyNeural"),
];

const DEFAULT_VOICE: &str = "en-US-JennyNeural";

/// Azure Speech 客户端配置
#[derive(Debug, Clone)]
pub struct AzureSpeechClientConfig {
    pub api_key: String,
    pub region: String,
    /// X-Microsoft-OutputFormat，需为 MP3 系列
    pub output_format: String,
    pub timeout_secs: u64,
}

impl AzureSpeechClientConfig {
    pub fn new(api_key: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            region: region.into(),
            output_format: "audio-24khz-48kbitrate-mono-mp3".to_string(),
            timeout_secs: 30,
        }
    }
}

fn native_voice(voice_id: &str) -> &'static str {
    VOICE_MAP
        .iter()
        .find(|(id, _)| *id == voice_id)
        .map(|(_, voice)| *voice)
        .unwrap_or(DEFAULT_VOICE)
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn build_ssml(voice: &str, text: &str) -> String {
    format!(
        "<speak version='1.0' xml:lang='en-US'><voice name='{}'>{}</voice></speak>",
        voice,
        escape_xml(text)
    )
}

/// Azure Speech Client
pub struct AzureSpeechClient {
    client: Client,
    config: AzureSpeechClientConfig,
}

impl AzureSpeechClient {
    pub fn new(config: AzureSpeechClientConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "https://{}.tts.speech.microsoft.com/cognitiveservices/v1",
            self.config.region
        )
    }
}

#[async_trait]
impl SpeechProviderPort for AzureSpeechClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Azure
    }

    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, TtsError> {
        let ssml = build_ssml(native_voice(&request.voice_id), &request.text);

        let response = self
            .client
            .post(self.endpoint())
            .header("Ocp-Apim-Subscription-Key", &self.config.api_key)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", &self.config.output_format)
            .header("User-Agent", "octave")
            .body(ssml)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "Azure speech API error");
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
