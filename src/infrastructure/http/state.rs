//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Services
    AudioDispatcher, CredentialPresence, ScriptGenerator, VoiceCatalog,
    // Command handlers
    AnalyzeProjectHandler, GenerateAudioHandler, OptimizePromptHandler, RegenerateScriptHandler,
    // Query handlers
    GetIntegrationSnippetsHandler, GetLlmStatusHandler, GetVoiceDetailsHandler,
    ListProviderVoicesHandler, ListProvidersHandler, RecommendVoicesHandler,
};

/// 语言模型凭证名称
pub const LLM_CREDENTIAL: &str = "GROQ_API_KEY";

/// 应用状态
///
/// 构造后只读，请求之间不共享可变状态
pub struct AppState {
    // ========== Status ==========
    pub llm_configured: bool,
    pub tts_configured: bool,

    // ========== Command Handlers ==========
    pub analyze_handler: AnalyzeProjectHandler,
    pub regenerate_handler: RegenerateScriptHandler,
    pub optimize_handler: OptimizePromptHandler,
    pub generate_audio_handler: GenerateAudioHandler,

    // ========== Query Handlers ==========
    pub recommend_voices_handler: RecommendVoicesHandler,
    pub list_providers_handler: ListProvidersHandler,
    pub list_provider_voices_handler: ListProviderVoicesHandler,
    pub voice_details_handler: GetVoiceDetailsHandler,
    pub integration_handler: GetIntegrationSnippetsHandler,
    pub llm_status_handler: GetLlmStatusHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        generator: Arc<ScriptGenerator>,
        catalog: Arc<VoiceCatalog>,
        dispatcher: Arc<AudioDispatcher>,
        credentials: Vec<CredentialPresence>,
    ) -> Self {
        Self {
            llm_configured: generator.is_available(),
            tts_configured: !dispatcher.configured_providers().is_empty(),

            // Command handlers
            analyze_handler: AnalyzeProjectHandler::new(generator.clone()),
            regenerate_handler: RegenerateScriptHandler::new(generator.clone()),
            optimize_handler: OptimizePromptHandler::new(generator.clone()),
            generate_audio_handler: GenerateAudioHandler::new(dispatcher),

            // Query handlers
            recommend_voices_handler: RecommendVoicesHandler::new(catalog.clone()),
            list_providers_handler: ListProvidersHandler::new(catalog.clone()),
            list_provider_voices_handler: ListProviderVoicesHandler::new(catalog.clone()),
            voice_details_handler: GetVoiceDetailsHandler::new(catalog.clone()),
            integration_handler: GetIntegrationSnippetsHandler::new(catalog),
            llm_status_handler: GetLlmStatusHandler::new(generator, credentials, LLM_CREDENTIAL),
        }
    }
}
