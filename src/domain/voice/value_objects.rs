//! Voice Context - Value Objects

use serde::{Deserialize, Serialize, Serializer};

/// 合成参数默认值（ElevenLabs voice_settings）
pub const DEFAULT_STABILITY: f32 = 0.5;
pub const DEFAULT_SIMILARITY_BOOST: f32 = 0.75;
pub const DEFAULT_STYLE: f32 = 0.0;
pub const DEFAULT_USE_SPEAKER_BOOST: bool = true;

/// 回放模型服务商的固定音色 id（不带前缀的特例）
const PLAYBACK_VOICE_IDS: &[&str] = &["Fritz-PlayAI"];

/// TTS 服务商
///
/// voice id 约定为 `{provider}_{name}`，路由在此一次性解析
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    ElevenLabs,
    OpenAi,
    Azure,
    /// 回放模型（playai-tts），与语言模型共用凭证
    Groq,
    /// 仅目录，无合成后端
    PlayHt,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 5] = [
        Self::ElevenLabs,
        Self::OpenAi,
        Self::Azure,
        Self::Groq,
        Self::PlayHt,
    ];

    /// voice id 前缀 / 路径参数中的标识
    pub fn id(&self) -> &'static str {
        match self {
            Self::ElevenLabs => "elevenlabs",
            Self::OpenAi => "openai",
            Self::Azure => "azure",
            Self::Groq => "groq",
            Self::PlayHt => "playht",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ElevenLabs => "ElevenLabs",
            Self::OpenAi => "OpenAI",
            Self::Azure => "Azure",
            Self::Groq => "Groq",
            Self::PlayHt => "Play.ht",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// 从 voice id 解析服务商
    ///
    /// 先匹配特例字面量，再取第一个 `_` 之前的前缀
    pub fn resolve_voice(voice_id: &str) -> Option<Self> {
        if PLAYBACK_VOICE_IDS.contains(&voice_id) {
            return Some(Self::Groq);
        }
        let prefix = voice_id.split('_').next().unwrap_or(voice_id);
        Self::from_id(prefix)
    }

    /// 该服务商返回的音频格式
    pub fn native_format(&self) -> AudioFormat {
        match self {
            Self::Groq => AudioFormat::Wav,
            Self::ElevenLabs | Self::OpenAi | Self::Azure | Self::PlayHt => AudioFormat::Mp3,
        }
    }

    pub fn info(&self) -> ProviderInfo {
        let (features, cost_per_1k_chars): (&'static [&'static str], f64) = match self {
            Self::ElevenLabs => (&["high_quality", "voice_cloning", "custom_settings"], 0.030),
            Self::OpenAi => (&["natural_voices", "low_latency"], 0.015),
            Self::Azure => (&["neural_voices", "ssml"], 0.020),
            Self::Groq => (&["fast_inference", "playai_model"], 0.0),
            Self::PlayHt => (&["natural_voices"], 0.025),
        };
        ProviderInfo {
            id: self.id(),
            name: self.display_name(),
            features,
            cost_per_1k_chars,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// 服务商描述信息
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub features: &'static [&'static str],
    pub cost_per_1k_chars: f64,
}

/// 音色描述
///
/// 不变量:
/// - id 全局唯一，且以服务商标识为前缀（或为服务商特例 id）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceDescriptor {
    pub id: &'static str,
    #[serde(serialize_with = "serialize_display_name")]
    pub provider: ProviderKind,
    pub name: &'static str,
    pub cost: &'static str,
    pub description: &'static str,
    pub gender: &'static str,
    pub accent: &'static str,
    pub duration: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<&'static str>,
}

fn serialize_display_name<S: Serializer>(kind: &ProviderKind, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(kind.display_name())
}

/// 音频格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Wav,
}

impl AudioFormat {
    pub fn mimetype(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
        }
    }
}

/// 单次合成参数，缺省项取文档化的默认值
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct VoiceSettings {
    pub stability: Option<f32>,
    pub similarity_boost: Option<f32>,
    pub style: Option<f32>,
    pub use_speaker_boost: Option<bool>,
    /// 本地引擎语速（words per minute）
    pub rate: Option<u32>,
}

impl VoiceSettings {
    pub fn stability(&self) -> f32 {
        self.stability.unwrap_or(DEFAULT_STABILITY)
    }

    pub fn similarity_boost(&self) -> f32 {
        self.similarity_boost.unwrap_or(DEFAULT_SIMILARITY_BOOST)
    }

    pub fn style(&self) -> f32 {
        self.style.unwrap_or(DEFAULT_STYLE)
    }

    pub fn use_speaker_boost(&self) -> bool {
        self.use_speaker_boost.unwrap_or(DEFAULT_USE_SPEAKER_BOOST)
    }
}
