//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 服务商标识与路由约定（voice id 前缀）
//! - 静态音色目录
//! - 音频格式与合成参数

mod catalog;
mod value_objects;

pub use catalog::{all_voices, find_voice, voices_for};
pub use value_objects::{
    AudioFormat, ProviderInfo, ProviderKind, VoiceDescriptor, VoiceSettings,
    DEFAULT_SIMILARITY_BOOST, DEFAULT_STABILITY, DEFAULT_STYLE, DEFAULT_USE_SPEAKER_BOOST,
};
