//! Voice Queries

/// 按语气 / 受众 / 风格推荐音色
#[derive(Debug, Clone)]
pub struct RecommendVoices {
    pub tone: String,
    pub audience: String,
    pub style: String,
}

impl Default for RecommendVoices {
    fn default() -> Self {
        Self {
            tone: "professional".to_string(),
            audience: "general".to_string(),
            style: "conversational".to_string(),
        }
    }
}

/// 列出已配置凭证的服务商
#[derive(Debug, Clone)]
pub struct ListProviders;

/// 列出某服务商的音色
#[derive(Debug, Clone)]
pub struct ListProviderVoices {
    pub provider: String,
}

/// 获取音色详情
#[derive(Debug, Clone)]
pub struct GetVoiceDetails {
    pub voice_id: String,
}

/// 获取音色的接入代码片段
#[derive(Debug, Clone)]
pub struct GetIntegrationSnippets {
    pub voice_id: String,
}
