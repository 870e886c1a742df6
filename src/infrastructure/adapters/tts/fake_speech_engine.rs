//! Fake Speech Engine - 用于测试的兜底引擎
//!
//! 始终返回固定的音频字节，不实际调用任何服务

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{FallbackEnginePort, SpeechRequest, TtsError};
use crate::domain::voice::AudioFormat;

/// Fake Speech Engine
pub struct FakeSpeechEngine {
    name: &'static str,
    format: AudioFormat,
    audio: Vec<u8>,
    available: bool,
    calls: AtomicUsize,
}

impl FakeSpeechEngine {
    /// 可用引擎，每次合成返回 `audio`
    pub fn new(name: &'static str, format: AudioFormat, audio: Vec<u8>) -> Self {
        Self {
            name,
            format,
            audio,
            available: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// 不可用引擎，永远不会被调用合成
    pub fn unavailable(name: &'static str) -> Self {
        Self {
            available: false,
            ..Self::new(name, AudioFormat::Mp3, Vec::new())
        }
    }

    /// 已被调用合成的次数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FallbackEnginePort for FakeSpeechEngine {
    fn name(&self) -> &'static str {
        self.name
    }

    fn format(&self) -> AudioFormat {
        self.format
    }

    async fn is_available(&self) -> bool {
        self.available
    }

    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, TtsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(
            engine = self.name,
            voice_id = %request.voice_id,
            text_len = request.text.len(),
            "FakeSpeechEngine: returning fixed audio"
        );
        Ok(self.audio.clone())
    }
}
