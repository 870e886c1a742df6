//! Script Commands - 脚本生成相关命令

use crate::application::error::ApplicationError;

/// 项目描述最短长度（字符数，去除首尾空白后）
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// 分析项目并生成脚本
///
/// `user_tone` / `use_case` 均为空时即普通分析
#[derive(Debug, Clone, Default)]
pub struct AnalyzeProject {
    pub description: String,
    pub user_tone: Option<String>,
    pub use_case: Option<String>,
}

/// 以变体模式重新生成脚本
#[derive(Debug, Clone)]
pub struct RegenerateScript {
    pub description: String,
}

/// 优化 Meta Prompt
#[derive(Debug, Clone)]
pub struct OptimizePrompt {
    pub meta_prompt: String,
    pub description: Option<String>,
}

/// 校验并规整项目描述
pub fn validate_description(description: &str) -> Result<String, ApplicationError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(ApplicationError::validation("Project description is required"));
    }
    if trimmed.chars().count() < MIN_DESCRIPTION_CHARS {
        return Err(ApplicationError::validation("Description too short"));
    }
    Ok(trimmed.to_string())
}
