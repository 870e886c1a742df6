//! 应用层 - 核心服务
//!
//! - script_generator: 语言模型脚本生成 / 语气分析（带降级）
//! - voice_catalog: 凭证门控的音色目录
//! - audio_dispatcher: 多服务商合成与兜底链

mod audio_dispatcher;
mod script_generator;
mod voice_catalog;

pub use audio_dispatcher::{
    AudioDispatcher, ProviderBackends, Route, SynthesisBranch, SynthesisError, SynthesizedAudio,
};
pub use script_generator::{
    parse_analysis, LlmAvailability, ModelUsed, ScriptGenerator, ScriptGeneratorConfig, ScriptResult,
};
pub use voice_catalog::VoiceCatalog;
