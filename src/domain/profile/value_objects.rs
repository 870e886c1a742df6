//! Profile Context - Value Objects

use serde::{Deserialize, Serialize};

/// 项目所属领域
///
/// 封闭集合，无法识别时落到 `General`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Healthcare,
    Education,
    Business,
    Technology,
    CustomerService,
    #[default]
    General,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthcare => "healthcare",
            Self::Education => "education",
            Self::Business => "business",
            Self::Technology => "technology",
            Self::CustomerService => "customer_service",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 语气画像
///
/// 不变量:
/// - domain 总是已解析
/// - tone / style / audience 均不为空
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    domain: Domain,
    tone: String,
    style: String,
    audience: String,
}

impl Profile {
    /// 创建画像，任一字段为空则拒绝
    pub fn new(
        domain: Domain,
        tone: impl Into<String>,
        style: impl Into<String>,
        audience: impl Into<String>,
    ) -> Result<Self, &'static str> {
        let (tone, style, audience) = (tone.into(), style.into(), audience.into());
        if tone.trim().is_empty() {
            return Err("tone cannot be empty");
        }
        if style.trim().is_empty() {
            return Err("style cannot be empty");
        }
        if audience.trim().is_empty() {
            return Err("audience cannot be empty");
        }
        Ok(Self {
            domain,
            tone,
            style,
            audience,
        })
    }

    /// Profiler 内部构造，调用方保证字段非空
    pub(super) fn from_parts(domain: Domain, tone: String, style: String, audience: String) -> Self {
        Self {
            domain,
            tone,
            style,
            audience,
        }
    }

    // Getters
    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn tone(&self) -> &str {
        &self.tone
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }
}

/// Meta Prompt - 传给语言模型的语气指令
///
/// 不可变；重新生成会产生新实例
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MetaPrompt(String);

impl MetaPrompt {
    pub(super) fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for MetaPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for MetaPrompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// 语言模型给出的语气 / 受众 / 风格分类
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToneAnalysis {
    pub tone: String,
    pub target_audience: String,
    pub style: String,
    /// 用户指定的使用场景（仅在带偏好分析时出现）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_case: Option<String>,
}

impl ToneAnalysis {
    pub fn new(
        tone: impl Into<String>,
        target_audience: impl Into<String>,
        style: impl Into<String>,
    ) -> Self {
        Self {
            tone: tone.into(),
            target_audience: target_audience.into(),
            style: style.into(),
            use_case: None,
        }
    }

    /// 模型不可用或输出无法解析时的默认值
    pub fn fallback() -> Self {
        Self::new("professional", "general", "conversational")
    }

    /// 用用户偏好覆盖分析结果
    pub fn with_preferences(mut self, user_tone: Option<&str>, use_case: Option<&str>) -> Self {
        if let Some(tone) = user_tone {
            self.tone = tone.to_string();
        }
        if let Some(use_case) = use_case {
            self.use_case = Some(use_case.to_string());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_rejects_empty_fields() {
        assert!(Profile::new(Domain::General, "", "natural", "general audience").is_err());
        assert!(Profile::new(Domain::General, "warm", "  ", "general audience").is_err());
        assert!(Profile::new(Domain::General, "warm", "natural", "").is_err());
        assert!(Profile::new(Domain::General, "warm", "natural", "general audience").is_ok());
    }

    #[test]
    fn test_domain_serializes_snake_case() {
        let json = serde_json::to_string(&Domain::CustomerService).unwrap();
        assert_eq!(json, "\"customer_service\"");
        assert_eq!(Domain::default(), Domain::General);
    }

    #[test]
    fn test_analysis_preferences_override() {
        let analysis = ToneAnalysis::fallback().with_preferences(Some("Energetic"), Some("demo"));
        assert_eq!(analysis.tone, "Energetic");
        assert_eq!(analysis.target_audience, "general");
        assert_eq!(analysis.use_case.as_deref(), Some("demo"));

        let untouched = ToneAnalysis::fallback().with_preferences(None, None);
        assert_eq!(untouched, ToneAnalysis::fallback());
    }
}
