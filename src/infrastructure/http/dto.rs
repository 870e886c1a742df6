//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{
    AnalyzeProjectResponse, CredentialPresence, IntegrationResponse, IntegrationSnippets,
    LlmStatusResponse, ModelUsed, OptimizePromptResponse, RegenerateScriptResponse,
};
use crate::domain::profile::{Domain, MetaPrompt, ToneAnalysis};
use crate::domain::voice::{ProviderInfo, VoiceDescriptor, VoiceSettings};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Health DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub llm_configured: bool,
    pub tts_configured: bool,
    pub timestamp: String,
}

// ============================================================================
// Script DTOs
// ============================================================================

/// 缺省字段按空值处理，由命令校验给出 400
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub use_case: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub generated_script: String,
    pub analysis: ToneAnalysis,
    pub meta_prompt: MetaPrompt,
    pub model_used: ModelUsed,
    pub domain: Domain,
}

impl From<AnalyzeProjectResponse> for AnalyzeResponse {
    fn from(r: AnalyzeProjectResponse) -> Self {
        Self {
            generated_script: r.script,
            analysis: r.analysis,
            meta_prompt: r.meta_prompt,
            model_used: r.model_used,
            domain: r.domain,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RegenerateRequest {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct RegenerateResponse {
    pub generated_script: String,
    pub meta_prompt: MetaPrompt,
    pub model_used: ModelUsed,
}

impl From<RegenerateScriptResponse> for RegenerateResponse {
    fn from(r: RegenerateScriptResponse) -> Self {
        Self {
            generated_script: r.script,
            meta_prompt: r.meta_prompt,
            model_used: r.model_used,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OptimizeRequest {
    #[serde(default)]
    pub meta_prompt: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub original_prompt: String,
    pub optimized_prompt: String,
    pub model_used: ModelUsed,
}

impl From<OptimizePromptResponse> for OptimizeResponse {
    fn from(r: OptimizePromptResponse) -> Self {
        Self {
            original_prompt: r.original_prompt,
            optimized_prompt: r.optimized_prompt,
            model_used: r.model_used,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CredentialStatus {
    pub name: &'static str,
    pub present: bool,
    pub length: usize,
}

impl From<&CredentialPresence> for CredentialStatus {
    fn from(c: &CredentialPresence) -> Self {
        Self {
            name: c.name,
            present: c.present(),
            length: c.length,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LlmDebugResponse {
    pub credentials: Vec<CredentialStatus>,
    pub llm_client_initialized: bool,
    pub model: Option<String>,
    pub unavailable_reason: Option<String>,
    pub llm_key_length: usize,
}

impl From<LlmStatusResponse> for LlmDebugResponse {
    fn from(r: LlmStatusResponse) -> Self {
        Self {
            credentials: r.credentials.iter().map(CredentialStatus::from).collect(),
            llm_client_initialized: r.llm_client_initialized,
            model: r.model,
            unavailable_reason: r.unavailable_reason,
            llm_key_length: r.llm_key_length,
        }
    }
}

// ============================================================================
// Voice DTOs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct RecommendVoicesRequest {
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VoiceListResponse {
    pub voices: Vec<&'static VoiceDescriptor>,
    pub total_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ProvidersResponse {
    pub providers: Vec<ProviderInfo>,
}

#[derive(Debug, Serialize)]
pub struct ProviderVoicesResponse {
    pub provider: String,
    pub voices: &'static [VoiceDescriptor],
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct IntegrationSnippetsResponse {
    pub voice: &'static VoiceDescriptor,
    pub integration_snippets: IntegrationSnippets,
}

impl From<IntegrationResponse> for IntegrationSnippetsResponse {
    fn from(r: IntegrationResponse) -> Self {
        Self {
            voice: r.voice,
            integration_snippets: r.snippets,
        }
    }
}

// ============================================================================
// Audio DTOs
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct GenerateAudioRequest {
    #[serde(default)]
    pub voice_id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub settings: VoiceSettings,
}
