//! Script Command Handlers

use std::sync::Arc;

use crate::application::commands::{validate_description, AnalyzeProject, OptimizePrompt, RegenerateScript};
use crate::application::error::ApplicationError;
use crate::application::services::{ModelUsed, ScriptGenerator};
use crate::domain::profile::{self, Domain, MetaPrompt, ProfileRequest, ToneAnalysis};

/// 画像并组装 Meta Prompt
///
/// 随机源只在这个同步块内存活，不跨越 await
fn build_meta_prompt(request: &ProfileRequest) -> (Domain, MetaPrompt) {
    let mut rng = rand::thread_rng();
    let profile = profile::profile(request, &mut rng);
    (profile.domain(), profile::compose(&profile))
}

// ============================================================================
// AnalyzeProject
// ============================================================================

/// 分析响应
#[derive(Debug, Clone)]
pub struct AnalyzeProjectResponse {
    pub script: String,
    pub model_used: ModelUsed,
    pub analysis: ToneAnalysis,
    pub meta_prompt: MetaPrompt,
    pub domain: Domain,
}

/// AnalyzeProject Handler
pub struct AnalyzeProjectHandler {
    generator: Arc<ScriptGenerator>,
}

impl AnalyzeProjectHandler {
    pub fn new(generator: Arc<ScriptGenerator>) -> Self {
        Self { generator }
    }

    pub async fn handle(&self, command: AnalyzeProject) -> Result<AnalyzeProjectResponse, ApplicationError> {
        let description = validate_description(&command.description)?;
        let user_tone = command.user_tone.filter(|t| !t.trim().is_empty());
        let use_case = command.use_case.filter(|u| !u.trim().is_empty());

        let request = ProfileRequest::new(description.clone())
            .with_tone(user_tone.clone())
            .with_use_case(use_case.clone());
        let (domain, meta_prompt) = build_meta_prompt(&request);

        let script = self.generator.generate(&description, meta_prompt.as_str()).await;
        let analysis = self
            .generator
            .analyze(&description)
            .await
            .with_preferences(user_tone.as_deref(), use_case.as_deref());

        tracing::info!(
            domain = %domain,
            model_used = script.model_used.as_str(),
            meta_prompt = %meta_prompt,
            "Project analyzed"
        );

        Ok(AnalyzeProjectResponse {
            script: script.script,
            model_used: script.model_used,
            analysis,
            meta_prompt,
            domain,
        })
    }
}

// ============================================================================
// RegenerateScript
// ============================================================================

/// 重新生成响应
#[derive(Debug, Clone)]
pub struct RegenerateScriptResponse {
    pub script: String,
    pub model_used: ModelUsed,
    pub meta_prompt: MetaPrompt,
}

/// RegenerateScript Handler
pub struct RegenerateScriptHandler {
    generator: Arc<ScriptGenerator>,
}

impl RegenerateScriptHandler {
    pub fn new(generator: Arc<ScriptGenerator>) -> Self {
        Self { generator }
    }

    pub async fn handle(&self, command: RegenerateScript) -> Result<RegenerateScriptResponse, ApplicationError> {
        let description = validate_description(&command.description)?;

        let request = ProfileRequest::new(description.clone()).with_variation(true);
        let (_, meta_prompt) = build_meta_prompt(&request);

        let script = self.generator.generate(&description, meta_prompt.as_str()).await;

        tracing::info!(
            model_used = script.model_used.as_str(),
            meta_prompt = %meta_prompt,
            "Script regenerated"
        );

        Ok(RegenerateScriptResponse {
            script: script.script,
            model_used: script.model_used,
            meta_prompt,
        })
    }
}

// ============================================================================
// OptimizePrompt
// ============================================================================

/// 优化响应
#[derive(Debug, Clone)]
pub struct OptimizePromptResponse {
    pub original_prompt: String,
    pub optimized_prompt: String,
    pub model_used: ModelUsed,
}

/// OptimizePrompt Handler
pub struct OptimizePromptHandler {
    generator: Arc<ScriptGenerator>,
}

impl OptimizePromptHandler {
    pub fn new(generator: Arc<ScriptGenerator>) -> Self {
        Self { generator }
    }

    pub async fn handle(&self, command: OptimizePrompt) -> Result<OptimizePromptResponse, ApplicationError> {
        if command.meta_prompt.trim().is_empty() {
            return Err(ApplicationError::validation("Meta prompt is required"));
        }
        let description = command.description.unwrap_or_default();
        let instruction = optimization_instruction(&command.meta_prompt, &description);

        let result = self.generator.generate(&description, &instruction).await;

        Ok(OptimizePromptResponse {
            original_prompt: command.meta_prompt,
            optimized_prompt: result.script,
            model_used: result.model_used,
        })
    }
}

fn optimization_instruction(meta_prompt: &str, description: &str) -> String {
    format!(
        "Current voice prompt: {meta_prompt}\n\
         Project context: {description}\n\n\
         Optimize this voice prompt for better emotion, pacing, and naturalness. \
         Make it more specific and effective for text-to-speech generation.\n\
         Focus on:\n\
         1. Natural pauses and rhythm\n\
         2. Appropriate emotion level\n\
         3. Clear pacing instructions\n\
         4. Voice characteristics that match the content\n\n\
         Return only the optimized prompt, nothing else."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::{LlmAvailability, ScriptGeneratorConfig};

    fn offline_generator() -> Arc<ScriptGenerator> {
        Arc::new(ScriptGenerator::new(
            LlmAvailability::Unavailable("Missing credential: GROQ_API_KEY".to_string()),
            ScriptGeneratorConfig::default(),
        ))
    }

    #[tokio::test]
    async fn test_analyze_healthcare_description() {
        let handler = AnalyzeProjectHandler::new(offline_generator());
        let response = handler
            .handle(AnalyzeProject {
                description: "A medical appointment scheduling assistant for patients".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(response.domain, Domain::Healthcare);
        assert!(response
            .meta_prompt
            .as_str()
            .ends_with("with professional medical clarity"));
        let tone = response.meta_prompt.as_str().split(',').next().unwrap();
        assert!(["calm", "reassuring", "professional", "caring"].contains(&tone));
        assert_eq!(response.model_used, ModelUsed::Fallback);
        assert!(response
            .script
            .contains("A medical appointment scheduling assistant for patients"));
        assert_eq!(response.analysis, ToneAnalysis::fallback());
    }

    #[tokio::test]
    async fn test_analyze_with_preferences_overrides_analysis() {
        let handler = AnalyzeProjectHandler::new(offline_generator());
        let response = handler
            .handle(AnalyzeProject {
                description: "An onboarding guide for new employees".to_string(),
                user_tone: Some("Friendly".to_string()),
                use_case: Some("training".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(response.analysis.tone, "Friendly");
        assert_eq!(response.analysis.use_case.as_deref(), Some("training"));
        assert!(response.meta_prompt.as_str().starts_with("friendly, "));
    }

    #[tokio::test]
    async fn test_analyze_rejects_short_description() {
        let handler = AnalyzeProjectHandler::new(offline_generator());
        let result = handler
            .handle(AnalyzeProject {
                description: "  tiny  ".to_string(),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_regenerate_uses_variation_tables() {
        let handler = RegenerateScriptHandler::new(offline_generator());
        let response = handler
            .handle(RegenerateScript {
                description: "A podcast intro for a cooking show".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.model_used, ModelUsed::Fallback);
        assert!(response.meta_prompt.as_str().contains(" tone for "));
    }

    #[tokio::test]
    async fn test_optimize_requires_meta_prompt() {
        let handler = OptimizePromptHandler::new(offline_generator());
        let result = handler
            .handle(OptimizePrompt {
                meta_prompt: " ".to_string(),
                description: None,
            })
            .await;
        assert!(result.is_err());

        let response = handler
            .handle(OptimizePrompt {
                meta_prompt: "warm, clear tone for general audience".to_string(),
                description: Some("A museum audio guide".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(response.original_prompt, "warm, clear tone for general audience");
        assert_eq!(response.model_used, ModelUsed::Fallback);
        assert!(response.optimized_prompt.contains("A museum audio guide"));
    }
}
