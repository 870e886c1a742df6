//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（LlmClient、SpeechProvider、FallbackEngine）
//! - services: 核心服务（ScriptGenerator、VoiceCatalog、AudioDispatcher）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;
pub mod services;

// Re-exports
pub use commands::{
    // Script commands
    AnalyzeProject,
    OptimizePrompt,
    RegenerateScript,
    // Audio commands
    GenerateAudio,
    // Handlers
    handlers::{
        AnalyzeProjectHandler, AnalyzeProjectResponse, GenerateAudioHandler, OptimizePromptHandler,
        OptimizePromptResponse, RegenerateScriptHandler, RegenerateScriptResponse,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // LLM client
    CompletionRequest,
    LlmClientPort,
    LlmError,
    // Speech
    FallbackEnginePort,
    SpeechProviderPort,
    SpeechRequest,
    TtsError,
};

pub use queries::{
    CredentialPresence,
    GetIntegrationSnippets,
    GetLlmStatus,
    GetVoiceDetails,
    ListProviderVoices,
    ListProviders,
    RecommendVoices,
    // Handlers
    handlers::{
        GetIntegrationSnippetsHandler, GetLlmStatusHandler, GetVoiceDetailsHandler, IntegrationResponse,
        IntegrationSnippets, ListProviderVoicesHandler, ListProvidersHandler, LlmStatusResponse,
        RecommendVoicesHandler,
    },
};

pub use services::{
    AudioDispatcher, LlmAvailability, ModelUsed, ProviderBackends, ScriptGenerator, ScriptGeneratorConfig,
    ScriptResult, SynthesisBranch, SynthesisError, SynthesizedAudio, VoiceCatalog,
};
