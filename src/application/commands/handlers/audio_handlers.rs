//! Audio Command Handlers

use std::sync::Arc;

use crate::application::commands::GenerateAudio;
use crate::application::error::ApplicationError;
use crate::application::services::{AudioDispatcher, SynthesizedAudio};

/// GenerateAudio Handler
pub struct GenerateAudioHandler {
    dispatcher: Arc<AudioDispatcher>,
}

impl GenerateAudioHandler {
    pub fn new(dispatcher: Arc<AudioDispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn handle(&self, command: GenerateAudio) -> Result<SynthesizedAudio, ApplicationError> {
        let command = command.validated()?;

        tracing::info!(
            voice_id = %command.voice_id,
            text_len = command.text.chars().count(),
            "Generating audio sample"
        );

        let audio = self
            .dispatcher
            .synthesize(&command.voice_id, &command.text, command.settings)
            .await?;

        tracing::info!(
            voice_id = %command.voice_id,
            branch = %audio.branch,
            mimetype = audio.mimetype(),
            audio_size = audio.data.len(),
            "Audio sample generated"
        );

        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::FallbackEnginePort;
    use crate::application::services::{ProviderBackends, SynthesisBranch};
    use crate::domain::voice::{AudioFormat, VoiceSettings};
    use crate::infrastructure::adapters::tts::FakeSpeechEngine;

    fn handler(engine: FakeSpeechEngine) -> GenerateAudioHandler {
        let chain: Vec<Arc<dyn FallbackEnginePort>> = vec![Arc::new(engine)];
        GenerateAudioHandler::new(Arc::new(AudioDispatcher::new(ProviderBackends::default(), chain)))
    }

    #[tokio::test]
    async fn test_generates_through_fallback() {
        let handler = handler(FakeSpeechEngine::new("local", AudioFormat::Wav, b"RIFF".to_vec()));
        let audio = handler
            .handle(GenerateAudio {
                voice_id: "elevenlabs_rachel".to_string(),
                text: "Hello there".to_string(),
                settings: VoiceSettings::default(),
            })
            .await
            .unwrap();
        assert_eq!(audio.branch, SynthesisBranch::Fallback("local"));
        assert_eq!(audio.file_extension(), "wav");
    }

    #[tokio::test]
    async fn test_exhaustion_is_external_service_error() {
        let handler = handler(FakeSpeechEngine::unavailable("local"));
        let result = handler
            .handle(GenerateAudio {
                voice_id: "openai_nova".to_string(),
                text: "Hello".to_string(),
                settings: VoiceSettings::default(),
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::ExternalServiceError(_))));
    }

    #[tokio::test]
    async fn test_missing_text_is_rejected_before_dispatch() {
        let engine = Arc::new(FakeSpeechEngine::new("local", AudioFormat::Mp3, b"mp3".to_vec()));
        let chain: Vec<Arc<dyn FallbackEnginePort>> = vec![engine.clone()];
        let handler = GenerateAudioHandler::new(Arc::new(AudioDispatcher::new(
            ProviderBackends::default(),
            chain,
        )));
        let result = handler
            .handle(GenerateAudio {
                voice_id: "openai_nova".to_string(),
                text: String::new(),
                settings: VoiceSettings::default(),
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
        assert_eq!(engine.calls(), 0);
    }
}
