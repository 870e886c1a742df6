//! Audio Dispatcher - 多服务商音频合成调度
//!
//! 线性尝试链，每个分支每次请求最多尝试一次:
//! 1. 由 voice id 解析服务商
//! 2. 服务商已配置凭证 → 调用其后端
//! 3. 未识别 / 无凭证 / 调用失败 / 返回空音频 → 依次尝试兜底引擎
//! 4. 全部失败 → `SynthesisError::Exhausted`
//!
//! 返回的音频格式完全由产出它的分支决定。

use std::sync::Arc;
use thiserror::Error;

use crate::application::ports::{FallbackEnginePort, SpeechProviderPort, SpeechRequest};
use crate::domain::voice::{AudioFormat, ProviderKind, VoiceSettings};

/// 合成失败（仅在整条链耗尽时出现）
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("All synthesis methods failed for voice {voice_id}")]
    Exhausted { voice_id: String },
}

/// 产出音频的分支
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisBranch {
    Provider(ProviderKind),
    Fallback(&'static str),
}

impl std::fmt::Display for SynthesisBranch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Provider(kind) => write!(f, "provider:{}", kind),
            Self::Fallback(engine) => write!(f, "fallback:{}", engine),
        }
    }
}

/// 合成结果，返回给调用方后核心不再持有
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    pub data: Vec<u8>,
    pub format: AudioFormat,
    pub branch: SynthesisBranch,
}

impl SynthesizedAudio {
    pub fn mimetype(&self) -> &'static str {
        self.format.mimetype()
    }

    pub fn file_extension(&self) -> &'static str {
        self.format.extension()
    }
}

/// 已配置凭证的服务商后端
///
/// 凭证缺失时对应字段为 `None`，该服务商永远不会被调用
#[derive(Default, Clone)]
pub struct ProviderBackends {
    pub elevenlabs: Option<Arc<dyn SpeechProviderPort>>,
    pub openai: Option<Arc<dyn SpeechProviderPort>>,
    pub azure: Option<Arc<dyn SpeechProviderPort>>,
    pub groq: Option<Arc<dyn SpeechProviderPort>>,
}

impl ProviderBackends {
    /// 按后端自报的服务商放入对应槽位
    ///
    /// PlayHt 只有目录没有合成后端，注册会被忽略并返回 false
    pub fn insert(&mut self, backend: Arc<dyn SpeechProviderPort>) -> bool {
        let kind = backend.kind();
        let slot = match kind {
            ProviderKind::ElevenLabs => &mut self.elevenlabs,
            ProviderKind::OpenAi => &mut self.openai,
            ProviderKind::Azure => &mut self.azure,
            ProviderKind::Groq => &mut self.groq,
            ProviderKind::PlayHt => {
                tracing::warn!(provider = %kind, "Provider has no synthesis backend, ignored");
                return false;
            }
        };
        if slot.replace(backend).is_some() {
            tracing::warn!(provider = %kind, "Provider backend replaced");
        }
        true
    }

    pub fn get(&self, kind: ProviderKind) -> Option<&Arc<dyn SpeechProviderPort>> {
        match kind {
            ProviderKind::ElevenLabs => self.elevenlabs.as_ref(),
            ProviderKind::OpenAi => self.openai.as_ref(),
            ProviderKind::Azure => self.azure.as_ref(),
            ProviderKind::Groq => self.groq.as_ref(),
            ProviderKind::PlayHt => None,
        }
    }

    pub fn configured(&self) -> Vec<ProviderKind> {
        ProviderKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind).is_some())
            .collect()
    }
}

/// 路由结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Provider(ProviderKind),
    LocalFallback,
}

/// Audio Dispatcher
pub struct AudioDispatcher {
    backends: ProviderBackends,
    fallback_chain: Vec<Arc<dyn FallbackEnginePort>>,
}

impl AudioDispatcher {
    pub fn new(backends: ProviderBackends, fallback_chain: Vec<Arc<dyn FallbackEnginePort>>) -> Self {
        tracing::info!(
            providers = ?backends.configured(),
            fallback_engines = ?fallback_chain.iter().map(|e| e.name()).collect::<Vec<_>>(),
            "Audio dispatcher initialized"
        );
        Self {
            backends,
            fallback_chain,
        }
    }

    pub fn configured_providers(&self) -> Vec<ProviderKind> {
        self.backends.configured()
    }

    /// 解析 voice id 的首选分支
    pub fn route(&self, voice_id: &str) -> Route {
        match ProviderKind::resolve_voice(voice_id) {
            Some(kind) if self.backends.get(kind).is_some() => Route::Provider(kind),
            _ => Route::LocalFallback,
        }
    }

    /// 合成音频
    pub async fn synthesize(
        &self,
        voice_id: &str,
        text: &str,
        settings: VoiceSettings,
    ) -> Result<SynthesizedAudio, SynthesisError> {
        let request = SpeechRequest {
            voice_id: voice_id.to_string(),
            text: text.to_string(),
            settings,
        };

        if let Route::Provider(kind) = self.route(voice_id) {
            if let Some(audio) = self.try_provider(kind, &request).await {
                return Ok(audio);
            }
        } else {
            tracing::info!(voice_id = %voice_id, "No credentialed provider for voice, using fallback chain");
        }

        for engine in &self.fallback_chain {
            if let Some(audio) = self.try_fallback(engine.as_ref(), &request).await {
                return Ok(audio);
            }
        }

        tracing::error!(voice_id = %voice_id, "Audio generation exhausted all synthesis methods");
        Err(SynthesisError::Exhausted {
            voice_id: voice_id.to_string(),
        })
    }

    async fn try_provider(&self, kind: ProviderKind, request: &SpeechRequest) -> Option<SynthesizedAudio> {
        let backend = self.backends.get(kind)?;
        debug_assert_eq!(backend.kind(), kind, "backend registered under the wrong provider slot");

        match backend.synthesize(request).await {
            Ok(data) if !data.is_empty() => {
                tracing::info!(
                    voice_id = %request.voice_id,
                    provider = %kind,
                    audio_size = data.len(),
                    "Provider audio generated"
                );
                Some(SynthesizedAudio {
                    data,
                    format: kind.native_format(),
                    branch: SynthesisBranch::Provider(kind),
                })
            }
            Ok(_) => {
                tracing::warn!(voice_id = %request.voice_id, provider = %kind, "Provider returned empty audio");
                None
            }
            Err(e) => {
                tracing::warn!(
                    voice_id = %request.voice_id,
                    provider = %kind,
                    error = %e,
                    "Provider synthesis failed, falling back"
                );
                None
            }
        }
    }

    async fn try_fallback(
        &self,
        engine: &dyn FallbackEnginePort,
        request: &SpeechRequest,
    ) -> Option<SynthesizedAudio> {
        if !engine.is_available().await {
            tracing::info!(engine = engine.name(), "Fallback engine unavailable");
            return None;
        }

        match engine.synthesize(request).await {
            Ok(data) if !data.is_empty() => {
                tracing::info!(
                    voice_id = %request.voice_id,
                    engine = engine.name(),
                    audio_size = data.len(),
                    "Fallback audio generated"
                );
                Some(SynthesizedAudio {
                    data,
                    format: engine.format(),
                    branch: SynthesisBranch::Fallback(engine.name()),
                })
            }
            Ok(_) => {
                tracing::warn!(engine = engine.name(), "Fallback engine returned empty audio");
                None
            }
            Err(e) => {
                tracing::warn!(engine = engine.name(), error = %e, "Fallback engine failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::TtsError;
    use crate::infrastructure::adapters::tts::FakeSpeechEngine;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 返回预设结果并计数的服务商
    struct StubProvider {
        kind: ProviderKind,
        audio: Option<Vec<u8>>,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn returning(kind: ProviderKind, audio: &[u8]) -> Arc<Self> {
            Arc::new(Self {
                kind,
                audio: Some(audio.to_vec()),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(kind: ProviderKind) -> Arc<Self> {
            Arc::new(Self {
                kind,
                audio: None,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SpeechProviderPort for StubProvider {
        fn kind(&self) -> ProviderKind {
            self.kind
        }

        async fn synthesize(&self, _request: &SpeechRequest) -> Result<Vec<u8>, TtsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.audio.clone().ok_or(TtsError::ServiceError {
                status: 401,
                body: "unauthorized".to_string(),
            })
        }
    }

    fn chain(engines: &[Arc<FakeSpeechEngine>]) -> Vec<Arc<dyn FallbackEnginePort>> {
        engines
            .iter()
            .map(|e| e.clone() as Arc<dyn FallbackEnginePort>)
            .collect()
    }

    #[tokio::test]
    async fn test_credentialed_provider_is_used() {
        let elevenlabs = StubProvider::returning(ProviderKind::ElevenLabs, b"ID3mp3");
        let local = Arc::new(FakeSpeechEngine::new("local", AudioFormat::Wav, b"RIFF".to_vec()));
        let dispatcher = AudioDispatcher::new(
            ProviderBackends {
                elevenlabs: Some(elevenlabs.clone()),
                ..Default::default()
            },
            chain(&[local.clone()]),
        );

        let audio = dispatcher
            .synthesize("elevenlabs_rachel", "Hello", VoiceSettings::default())
            .await
            .unwrap();
        assert_eq!(audio.data, b"ID3mp3");
        assert_eq!(audio.branch, SynthesisBranch::Provider(ProviderKind::ElevenLabs));
        assert_eq!(audio.mimetype(), "audio/mpeg");
        assert_eq!(audio.file_extension(), "mp3");
        assert_eq!(elevenlabs.calls(), 1);
        assert_eq!(local.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_credential_routes_to_local_fallback() {
        // 只配置了 OpenAI，ElevenLabs 无凭证
        let openai = StubProvider::returning(ProviderKind::OpenAi, b"mp3");
        let local = Arc::new(FakeSpeechEngine::new("local", AudioFormat::Wav, b"RIFFwav".to_vec()));
        let dispatcher = AudioDispatcher::new(
            ProviderBackends {
                openai: Some(openai.clone()),
                ..Default::default()
            },
            chain(&[local.clone()]),
        );

        assert_eq!(dispatcher.route("elevenlabs_rachel"), Route::LocalFallback);
        let audio = dispatcher
            .synthesize("elevenlabs_rachel", "Hello", VoiceSettings::default())
            .await
            .unwrap();
        assert_eq!(audio.branch, SynthesisBranch::Fallback("local"));
        assert_eq!(audio.format, AudioFormat::Wav);
        assert_eq!(openai.calls(), 0);
        assert_eq!(local.calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_prefix_routes_to_local_fallback() {
        let local = Arc::new(FakeSpeechEngine::new("local", AudioFormat::Mp3, b"mp3".to_vec()));
        let dispatcher = AudioDispatcher::new(ProviderBackends::default(), chain(&[local.clone()]));

        assert_eq!(dispatcher.route("acme_voice"), Route::LocalFallback);
        assert_eq!(dispatcher.route("playht_sarah"), Route::LocalFallback);
        let audio = dispatcher
            .synthesize("acme_voice", "Hello", VoiceSettings::default())
            .await
            .unwrap();
        assert_eq!(audio.branch, SynthesisBranch::Fallback("local"));
    }

    #[tokio::test]
    async fn test_provider_failure_falls_through_chain_in_order() {
        let elevenlabs = StubProvider::failing(ProviderKind::ElevenLabs);
        let first = Arc::new(FakeSpeechEngine::unavailable("first"));
        let second = Arc::new(FakeSpeechEngine::new("second", AudioFormat::Wav, b"RIFF".to_vec()));
        let dispatcher = AudioDispatcher::new(
            ProviderBackends {
                elevenlabs: Some(elevenlabs.clone()),
                ..Default::default()
            },
            chain(&[first.clone(), second.clone()]),
        );

        let audio = dispatcher
            .synthesize("elevenlabs_josh", "Hello", VoiceSettings::default())
            .await
            .unwrap();
        assert_eq!(elevenlabs.calls(), 1);
        assert_eq!(first.calls(), 0);
        assert_eq!(second.calls(), 1);
        assert_eq!(audio.branch, SynthesisBranch::Fallback("second"));
    }

    #[tokio::test]
    async fn test_playback_empty_audio_is_total_failure_without_fallbacks() {
        let groq = StubProvider::returning(ProviderKind::Groq, b"");
        let dispatcher = AudioDispatcher::new(
            ProviderBackends {
                groq: Some(groq.clone()),
                ..Default::default()
            },
            chain(&[Arc::new(FakeSpeechEngine::unavailable("local"))]),
        );

        assert_eq!(dispatcher.route("Fritz-PlayAI"), Route::Provider(ProviderKind::Groq));
        let result = dispatcher
            .synthesize("Fritz-PlayAI", "Hello", VoiceSettings::default())
            .await;
        assert!(matches!(result, Err(SynthesisError::Exhausted { .. })));
        assert_eq!(groq.calls(), 1);
    }

    #[tokio::test]
    async fn test_playback_audio_is_wav() {
        let groq = StubProvider::returning(ProviderKind::Groq, b"RIFFdata");
        let dispatcher = AudioDispatcher::new(
            ProviderBackends {
                groq: Some(groq),
                ..Default::default()
            },
            Vec::new(),
        );
        let audio = dispatcher
            .synthesize("Fritz-PlayAI", "Hello", VoiceSettings::default())
            .await
            .unwrap();
        assert_eq!(audio.mimetype(), "audio/wav");
        assert_eq!(audio.file_extension(), "wav");
    }

    #[tokio::test]
    async fn test_empty_fallback_audio_is_not_success() {
        let silent = Arc::new(FakeSpeechEngine::new("silent", AudioFormat::Mp3, Vec::new()));
        let dispatcher = AudioDispatcher::new(ProviderBackends::default(), chain(&[silent.clone()]));
        let result = dispatcher
            .synthesize("elevenlabs_rachel", "Hello", VoiceSettings::default())
            .await;
        assert!(result.is_err());
        assert_eq!(silent.calls(), 1);
    }

    #[test]
    fn test_backends_configured_order() {
        let backends = ProviderBackends {
            groq: Some(StubProvider::returning(ProviderKind::Groq, b"x")),
            elevenlabs: Some(StubProvider::returning(ProviderKind::ElevenLabs, b"x")),
            ..Default::default()
        };
        assert_eq!(
            backends.configured(),
            vec![ProviderKind::ElevenLabs, ProviderKind::Groq]
        );
        assert!(backends.get(ProviderKind::PlayHt).is_none());
    }

    #[test]
    fn test_insert_places_backend_by_its_kind() {
        let mut backends = ProviderBackends::default();
        assert!(backends.insert(StubProvider::returning(ProviderKind::Azure, b"x")));
        assert!(backends.insert(StubProvider::returning(ProviderKind::Groq, b"x")));
        assert!(!backends.insert(StubProvider::returning(ProviderKind::PlayHt, b"x")));

        assert_eq!(backends.configured(), vec![ProviderKind::Azure, ProviderKind::Groq]);
        assert_eq!(backends.get(ProviderKind::Azure).unwrap().kind(), ProviderKind::Azure);
        assert!(backends.elevenlabs.is_none());
        assert!(backends.get(ProviderKind::PlayHt).is_none());
    }

    #[tokio::test]
    async fn test_inserted_backend_is_routed() {
        let azure = StubProvider::returning(ProviderKind::Azure, b"azure-mp3");
        let mut backends = ProviderBackends::default();
        backends.insert(azure.clone());
        let dispatcher = AudioDispatcher::new(backends, Vec::new());

        assert_eq!(dispatcher.route("azure_jenny"), Route::Provider(ProviderKind::Azure));
        let audio = dispatcher
            .synthesize("azure_jenny", "Hello", VoiceSettings::default())
            .await
            .unwrap();
        assert_eq!(audio.data, b"azure-mp3");
        assert_eq!(azure.calls(), 1);
    }

    #[test]
    fn test_catalog_gated_on_built_backends() {
        use crate::application::services::VoiceCatalog;

        // Groq 构建成功；ElevenLabs 有凭证但客户端构建失败，不会注册
        let mut backends = ProviderBackends::default();
        backends.insert(StubProvider::returning(ProviderKind::Groq, b"x"));
        let catalog = VoiceCatalog::new(backends.configured());
        let dispatcher = AudioDispatcher::new(backends, Vec::new());

        let ids: Vec<_> = catalog.list_providers().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["groq"]);
        assert_eq!(dispatcher.route("elevenlabs_rachel"), Route::LocalFallback);
        assert!(catalog
            .recommend("professional", "general", "conversational")
            .iter()
            .all(|v| dispatcher.route(v.id) == Route::Provider(v.provider)));
    }
}
