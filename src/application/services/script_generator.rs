//! Script Generator - 语言模型脚本生成与语气分析
//!
//! 主路径调用一次语言模型；客户端未初始化、调用失败或输出无法解析时，
//! 在本地合成降级结果。降级同样视为成功，不向调用方暴露错误。

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::ports::{CompletionRequest, LlmClientPort, LlmError};
use crate::domain::profile::ToneAnalysis;

const SCRIPT_SYSTEM_PROMPT: &str = "You are an expert at creating realistic AI voice agent \
dialogue samples. Generate natural, authentic conversation snippets that sound exactly like \
what an AI agent would say during real interactions.";

const ANALYSIS_SYSTEM_PROMPT: &str = "You are an expert in voice and communication analysis. \
Always respond with valid JSON only.";

const FALLBACK_SCRIPT_SUFFIX: &str = "This script has been optimized for professional tone and \
general use case. The delivery should be natural and engaging, with appropriate pacing and \
emphasis to match your project's requirements.";

/// 语言模型客户端的初始化结果
///
/// 初始化失败是一个可分支的值，而不是隐藏的全局标志
pub enum LlmAvailability {
    Ready(Arc<dyn LlmClientPort>),
    Unavailable(String),
}

impl LlmAvailability {
    pub fn from_result<C>(result: Result<C, LlmError>) -> Self
    where
        C: LlmClientPort + 'static,
    {
        match result {
            Ok(client) => Self::Ready(Arc::new(client)),
            Err(e) => Self::Unavailable(e.to_string()),
        }
    }
}

/// 脚本来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelUsed {
    Primary,
    Fallback,
}

impl ModelUsed {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Fallback => "fallback",
        }
    }
}

/// 脚本生成结果，每次请求新建，不持久化
#[derive(Debug, Clone, Serialize)]
pub struct ScriptResult {
    pub script: String,
    pub model_used: ModelUsed,
    pub success: bool,
}

/// 采样参数
#[derive(Debug, Clone)]
pub struct ScriptGeneratorConfig {
    pub script_max_tokens: u32,
    pub script_temperature: f32,
    pub analysis_max_tokens: u32,
    pub analysis_temperature: f32,
}

impl Default for ScriptGeneratorConfig {
    fn default() -> Self {
        Self {
            script_max_tokens: 200,
            script_temperature: 0.7,
            analysis_max_tokens: 150,
            analysis_temperature: 0.3,
        }
    }
}

/// 模型返回的结构化分析，字段必须完全匹配
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AnalysisReply {
    tone: String,
    target_audience: String,
    style: String,
}

/// Script Generator
pub struct ScriptGenerator {
    llm: LlmAvailability,
    config: ScriptGeneratorConfig,
}

impl ScriptGenerator {
    pub fn new(llm: LlmAvailability, config: ScriptGeneratorConfig) -> Self {
        if let LlmAvailability::Unavailable(reason) = &llm {
            tracing::warn!(reason = %reason, "LLM client unavailable, scripts will use fallback");
        }
        Self { llm, config }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.llm, LlmAvailability::Ready(_))
    }

    pub fn model(&self) -> Option<&str> {
        match &self.llm {
            LlmAvailability::Ready(client) => Some(client.model()),
            LlmAvailability::Unavailable(_) => None,
        }
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.llm {
            LlmAvailability::Ready(_) => None,
            LlmAvailability::Unavailable(reason) => Some(reason),
        }
    }

    /// 生成语音脚本
    pub async fn generate(&self, description: &str, meta_prompt: &str) -> ScriptResult {
        let client = match &self.llm {
            LlmAvailability::Ready(client) => client,
            LlmAvailability::Unavailable(_) => {
                tracing::warn!("LLM client not available, using fallback script");
                return fallback_script(description);
            }
        };

        let request = CompletionRequest {
            system: SCRIPT_SYSTEM_PROMPT.to_string(),
            user: script_instruction(description, meta_prompt),
            max_tokens: self.config.script_max_tokens,
            temperature: self.config.script_temperature,
        };

        match client.complete(request).await {
            Ok(text) if !text.trim().is_empty() => {
                tracing::info!(model = %client.model(), "Script generated");
                ScriptResult {
                    script: text.trim().to_string(),
                    model_used: ModelUsed::Primary,
                    success: true,
                }
            }
            Ok(_) => {
                tracing::warn!(model = %client.model(), "LLM returned empty script, using fallback");
                fallback_script(description)
            }
            Err(e) => {
                tracing::error!(model = %client.model(), error = %e, "Script generation failed");
                fallback_script(description)
            }
        }
    }

    /// 分析项目描述的语气 / 受众 / 风格
    pub async fn analyze(&self, description: &str) -> ToneAnalysis {
        let client = match &self.llm {
            LlmAvailability::Ready(client) => client,
            LlmAvailability::Unavailable(_) => {
                tracing::warn!("LLM client not available, using fallback analysis");
                return ToneAnalysis::fallback();
            }
        };

        let request = CompletionRequest {
            system: ANALYSIS_SYSTEM_PROMPT.to_string(),
            user: analysis_instruction(description),
            max_tokens: self.config.analysis_max_tokens,
            temperature: self.config.analysis_temperature,
        };

        match client.complete(request).await {
            Ok(text) => match parse_analysis(&text) {
                Some(analysis) => {
                    tracing::info!(model = %client.model(), "Project analysis completed");
                    analysis
                }
                None => {
                    tracing::warn!(
                        model = %client.model(),
                        reply_len = text.len(),
                        "Failed to parse analysis reply, using fallback"
                    );
                    ToneAnalysis::fallback()
                }
            },
            Err(e) => {
                tracing::error!(model = %client.model(), error = %e, "Project analysis failed");
                ToneAnalysis::fallback()
            }
        }
    }
}

/// 严格解析模型输出的分析 JSON
///
/// 必须是恰好包含 tone / target_audience / style 三个非空字符串字段的对象，
/// 任何偏差返回 `None`
pub fn parse_analysis(text: &str) -> Option<ToneAnalysis> {
    let reply: AnalysisReply = serde_json::from_str(text.trim()).ok()?;
    let fields = [&reply.tone, &reply.target_audience, &reply.style];
    if fields.iter().any(|f| f.trim().is_empty()) {
        return None;
    }
    Some(ToneAnalysis::new(
        reply.tone.trim(),
        reply.target_audience.trim(),
        reply.style.trim(),
    ))
}

fn fallback_script(description: &str) -> ScriptResult {
    ScriptResult {
        script: format!("{}\n\n{}", description, FALLBACK_SCRIPT_SUFFIX),
        model_used: ModelUsed::Fallback,
        success: true,
    }
}

fn script_instruction(description: &str, meta_prompt: &str) -> String {
    format!(
        "AI Voice Agent Description: {description}\n\
         Voice Requirements: {meta_prompt}\n\n\
         Generate a realistic conversation sample that this AI voice agent would say during a \
         typical interaction. The script should:\n\
         1. Be 2-4 sentences long (perfect for voice evaluation)\n\
         2. Sound like actual dialogue the AI agent would speak to users\n\
         3. Match the tone and style indicated in the voice requirements\n\
         4. Include natural conversational elements (greetings, transitions, or responses)\n\
         5. Be representative of how the agent would actually communicate in its role\n\
         6. Be suitable for text-to-speech conversion\n\n\
         Return only the conversation sample text that the AI agent would speak, nothing else."
    )
}

fn analysis_instruction(description: &str) -> String {
    format!(
        "Analyze this project description and return a JSON object with the following structure:\n\
         {{\n\
         \x20   \"tone\": \"professional|friendly|calm|energetic|authoritative\",\n\
         \x20   \"target_audience\": \"general|business|healthcare|education|technology\",\n\
         \x20   \"style\": \"conversational|formal|casual|technical\"\n\
         }}\n\n\
         Project: {description}\n\n\
         Return only valid JSON, no other text."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// 按脚本返回预设结果的 LLM
    struct ScriptedLlm {
        reply: Mutex<Option<Result<String, LlmError>>>,
        calls: AtomicUsize,
        last_request: Mutex<Option<CompletionRequest>>,
    }

    impl ScriptedLlm {
        fn replying(reply: Result<String, LlmError>) -> Arc<Self> {
            Arc::new(Self {
                reply: Mutex::new(Some(reply)),
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl LlmClientPort for ScriptedLlm {
        async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request);
            self.reply
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(LlmError::ServiceError("exhausted".to_string())))
        }

        fn model(&self) -> &str {
            "scripted"
        }
    }

    fn generator_with(llm: Arc<ScriptedLlm>) -> ScriptGenerator {
        ScriptGenerator::new(LlmAvailability::Ready(llm), ScriptGeneratorConfig::default())
    }

    fn unavailable_generator() -> ScriptGenerator {
        ScriptGenerator::new(
            LlmAvailability::Unavailable("GROQ_API_KEY not set".to_string()),
            ScriptGeneratorConfig::default(),
        )
    }

    const DESCRIPTION: &str = "A medical appointment scheduling assistant for patients";

    #[tokio::test]
    async fn test_primary_script_is_trimmed() {
        let llm = ScriptedLlm::replying(Ok("  Hello, how can I help you today?  \n".to_string()));
        let generator = generator_with(llm.clone());

        let result = generator.generate(DESCRIPTION, "calm, gentle tone").await;
        assert_eq!(result.script, "Hello, how can I help you today?");
        assert_eq!(result.model_used, ModelUsed::Primary);
        assert!(result.success);
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);

        let request = llm.last_request.lock().unwrap().clone().unwrap();
        assert!(request.user.contains(DESCRIPTION));
        assert!(request.user.contains("calm, gentle tone"));
        assert_eq!(request.max_tokens, 200);
    }

    #[tokio::test]
    async fn test_unavailable_client_uses_fallback() {
        let generator = unavailable_generator();
        let result = generator.generate(DESCRIPTION, "calm").await;
        assert!(result.success);
        assert_eq!(result.model_used, ModelUsed::Fallback);
        assert!(result.script.contains(DESCRIPTION));
        assert!(result.script.ends_with(FALLBACK_SCRIPT_SUFFIX));
    }

    #[tokio::test]
    async fn test_failing_client_uses_fallback_after_single_attempt() {
        let llm = ScriptedLlm::replying(Err(LlmError::Timeout));
        let generator = generator_with(llm.clone());

        let result = generator.generate(DESCRIPTION, "calm").await;
        assert!(result.success);
        assert_eq!(result.model_used, ModelUsed::Fallback);
        assert!(result.script.contains(DESCRIPTION));
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_reply_uses_fallback() {
        let generator = generator_with(ScriptedLlm::replying(Ok("   ".to_string())));
        let result = generator.generate(DESCRIPTION, "calm").await;
        assert_eq!(result.model_used, ModelUsed::Fallback);
    }

    #[tokio::test]
    async fn test_analysis_parses_strict_json() {
        let reply = r#"{"tone": "calm", "target_audience": "healthcare", "style": "formal"}"#;
        let generator = generator_with(ScriptedLlm::replying(Ok(reply.to_string())));

        let analysis = generator.analyze(DESCRIPTION).await;
        assert_eq!(analysis, ToneAnalysis::new("calm", "healthcare", "formal"));
    }

    #[tokio::test]
    async fn test_analysis_invalid_json_falls_back() {
        // Python 风格字典不是 JSON，必须拒绝而不是求值
        let reply = "{'tone': 'calm', 'target_audience': 'general', 'style': 'formal'}";
        let generator = generator_with(ScriptedLlm::replying(Ok(reply.to_string())));

        let analysis = generator.analyze(DESCRIPTION).await;
        assert_eq!(analysis.tone, "professional");
        assert_eq!(analysis.target_audience, "general");
        assert_eq!(analysis.style, "conversational");
    }

    #[tokio::test]
    async fn test_analysis_call_failure_falls_back() {
        let generator = generator_with(ScriptedLlm::replying(Err(LlmError::NetworkError(
            "connection reset".to_string(),
        ))));
        assert_eq!(generator.analyze(DESCRIPTION).await, ToneAnalysis::fallback());
        assert_eq!(unavailable_generator().analyze(DESCRIPTION).await, ToneAnalysis::fallback());
    }

    #[test]
    fn test_parse_analysis_rejects_schema_deviation() {
        assert!(parse_analysis("not json").is_none());
        assert!(parse_analysis(r#"{"tone": "calm", "style": "formal"}"#).is_none());
        assert!(parse_analysis(
            r#"{"tone": "calm", "target_audience": "general", "style": "formal", "extra": 1}"#
        )
        .is_none());
        assert!(parse_analysis(r#"{"tone": "", "target_audience": "general", "style": "formal"}"#)
            .is_none());
        assert!(parse_analysis(r#"{"tone": 3, "target_audience": "general", "style": "formal"}"#)
            .is_none());
        assert!(parse_analysis(r#"["calm", "general", "formal"]"#).is_none());
    }

    #[test]
    fn test_parse_analysis_accepts_surrounding_whitespace() {
        let parsed = parse_analysis(
            "\n  {\"tone\": \"friendly\", \"target_audience\": \"education\", \"style\": \"casual\"}\n",
        )
        .unwrap();
        assert_eq!(parsed.tone, "friendly");
        assert!(parsed.use_case.is_none());
    }

    #[test]
    fn test_model_used_serialization() {
        assert_eq!(serde_json::to_string(&ModelUsed::Primary).unwrap(), "\"primary\"");
        assert_eq!(ModelUsed::Fallback.as_str(), "fallback");
    }
}
