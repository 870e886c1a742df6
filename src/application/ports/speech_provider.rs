//! Speech Ports - TTS 合成抽象
//!
//! - `SpeechProviderPort`: 需要凭证的云端服务商
//! - `FallbackEnginePort`: 免费 / 本地兜底引擎

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::voice::{AudioFormat, ProviderKind, VoiceSettings};

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: HTTP {status}: {body}")]
    ServiceError { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Empty audio returned")]
    EmptyAudio,

    #[error("Engine unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for TtsError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TtsError::Timeout
        } else if e.is_connect() {
            TtsError::NetworkError(format!("Cannot connect to TTS service: {}", e))
        } else {
            TtsError::NetworkError(e.to_string())
        }
    }
}

/// 合成请求
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    /// 目录中的抽象 voice id（由各后端映射到原生 id）
    pub voice_id: String,
    /// 要合成的文本
    pub text: String,
    /// 合成参数
    pub settings: VoiceSettings,
}

/// 云端服务商后端
#[async_trait]
pub trait SpeechProviderPort: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// 单次合成，不重试
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, TtsError>;
}

/// 兜底合成引擎
#[async_trait]
pub trait FallbackEnginePort: Send + Sync {
    /// 引擎名称（用于日志）
    fn name(&self) -> &'static str;

    /// 该引擎产出的音频格式
    fn format(&self) -> AudioFormat;

    /// 引擎当前是否可用（已启用 / 可执行文件存在）
    async fn is_available(&self) -> bool;

    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, TtsError>;
}
