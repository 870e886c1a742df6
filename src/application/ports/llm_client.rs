//! LLM Client Port - 语言模型抽象
//!
//! 定义文本补全的抽象接口，具体实现在 infrastructure/adapters/llm

use async_trait::async_trait;
use thiserror::Error;

/// 语言模型错误
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 单轮补全请求
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// 系统指令
    pub system: String,
    /// 用户指令
    pub user: String,
    /// 输出 token 上限
    pub max_tokens: u32,
    /// 采样温度
    pub temperature: f32,
}

/// LLM Client Port
///
/// 一次调用对应一次外部请求，不做重试
#[async_trait]
pub trait LlmClientPort: Send + Sync {
    /// 返回第一个候选的文本（已去除首尾空白）
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;

    /// 模型名称（用于日志和状态上报）
    fn model(&self) -> &str;
}
