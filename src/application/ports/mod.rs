//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod llm_client;
mod speech_provider;

pub use llm_client::{CompletionRequest, LlmClientPort, LlmError};
pub use speech_provider::{
    FallbackEnginePort, SpeechProviderPort, SpeechRequest, TtsError,
};
