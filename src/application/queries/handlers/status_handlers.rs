//! Status Query Handlers

use std::sync::Arc;

use crate::application::queries::{CredentialPresence, GetLlmStatus};
use crate::application::services::ScriptGenerator;

/// 语言模型状态报告
#[derive(Debug, Clone)]
pub struct LlmStatusResponse {
    pub credentials: Vec<CredentialPresence>,
    pub llm_client_initialized: bool,
    pub model: Option<String>,
    pub unavailable_reason: Option<String>,
    /// 语言模型凭证长度，用于排查截断 / 空白问题
    pub llm_key_length: usize,
}

/// GetLlmStatus Handler
pub struct GetLlmStatusHandler {
    generator: Arc<ScriptGenerator>,
    credentials: Vec<CredentialPresence>,
    llm_credential: &'static str,
}

impl GetLlmStatusHandler {
    /// `llm_credential` 为语言模型所用凭证在 `credentials` 中的名称
    pub fn new(
        generator: Arc<ScriptGenerator>,
        credentials: Vec<CredentialPresence>,
        llm_credential: &'static str,
    ) -> Self {
        Self {
            generator,
            credentials,
            llm_credential,
        }
    }

    pub fn handle(&self, _query: GetLlmStatus) -> LlmStatusResponse {
        let llm_key_length = self
            .credentials
            .iter()
            .find(|c| c.name == self.llm_credential)
            .map(|c| c.length)
            .unwrap_or(0);

        LlmStatusResponse {
            credentials: self.credentials.clone(),
            llm_client_initialized: self.generator.is_available(),
            model: self.generator.model().map(str::to_string),
            unavailable_reason: self.generator.unavailable_reason().map(str::to_string),
            llm_key_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::{LlmAvailability, ScriptGeneratorConfig};

    #[test]
    fn test_status_reports_lengths_not_values() {
        let generator = Arc::new(ScriptGenerator::new(
            LlmAvailability::Unavailable("Missing credential: GROQ_API_KEY".to_string()),
            ScriptGeneratorConfig::default(),
        ));
        let credentials = vec![
            CredentialPresence::new("GROQ_API_KEY", None),
            CredentialPresence::new("OPENAI_API_KEY", Some("sk-test-123")),
        ];
        let handler = GetLlmStatusHandler::new(generator, credentials, "GROQ_API_KEY");
        let status = handler.handle(GetLlmStatus);

        assert!(!status.llm_client_initialized);
        assert_eq!(status.model, None);
        assert_eq!(status.llm_key_length, 0);
        assert!(!status.credentials[0].present());
        assert!(status.credentials[1].present());
        assert_eq!(status.credentials[1].length, 11);
        assert!(status.unavailable_reason.unwrap().contains("GROQ_API_KEY"));
    }
}
