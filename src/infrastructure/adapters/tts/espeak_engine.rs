//! eSpeak Engine - 本地兜底引擎
//!
//! 调用 espeak-ng，文本经 stdin 传入，WAV 从 stdout 读出

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::application::ports::{FallbackEnginePort, SpeechRequest, TtsError};
use crate::domain::voice::AudioFormat;

/// voice id 中出现这些子串时使用女声
const FEMALE_HINTS: &[&str] = &["female", "nova", "rachel", "bella", "jenny", "sarah"];

const FEMALE_VARIANT: &str = "en+f3";
const MALE_VARIANT: &str = "en+m3";

/// eSpeak 引擎配置
#[derive(Debug, Clone)]
pub struct EspeakEngineConfig {
    /// 可执行文件名或路径
    pub binary: String,
    /// 默认语速（words per minute）
    pub rate: u32,
    pub timeout_secs: u64,
}

impl Default for EspeakEngineConfig {
    fn default() -> Self {
        Self {
            binary: "espeak-ng".to_string(),
            rate: 150,
            timeout_secs: 30,
        }
    }
}

/// 根据 voice id 选择男 / 女声变体
pub fn voice_variant(voice_id: &str) -> &'static str {
    let lower = voice_id.to_lowercase();
    if FEMALE_HINTS.iter().any(|hint| lower.contains(hint)) {
        FEMALE_VARIANT
    } else {
        MALE_VARIANT
    }
}

/// eSpeak Engine
pub struct EspeakEngine {
    config: EspeakEngineConfig,
}

impl EspeakEngine {
    pub fn new(config: EspeakEngineConfig) -> Self {
        Self { config }
    }

    fn resolve_binary(&self) -> Option<PathBuf> {
        which::which(&self.config.binary).ok()
    }
}

#[async_trait]
impl FallbackEnginePort for EspeakEngine {
    fn name(&self) -> &'static str {
        "espeak"
    }

    fn format(&self) -> AudioFormat {
        AudioFormat::Wav
    }

    async fn is_available(&self) -> bool {
        self.resolve_binary().is_some()
    }

    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, TtsError> {
        let binary = self
            .resolve_binary()
            .ok_or_else(|| TtsError::Unavailable(format!("{} not found on PATH", self.config.binary)))?;
        let rate = request.settings.rate.unwrap_or(self.config.rate);

        let mut child = Command::new(binary)
            .arg("--stdout")
            .arg("--stdin")
            .arg("-v")
            .arg(voice_variant(&request.voice_id))
            .arg("-s")
            .arg(rate.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| TtsError::Unavailable(format!("Failed to spawn espeak: {}", e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| TtsError::Unavailable("Failed to open espeak stdin".to_string()))?;
        let text = request.text.clone();
        let write_task = tokio::spawn(async move { stdin.write_all(text.as_bytes()).await });

        let timeout = Duration::from_secs(self.config.timeout_secs);
        let output = tokio::time::timeout(timeout, child.wait_with_output())
            .await
            .map_err(|_| TtsError::Timeout)?
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to wait for espeak: {}", e)))?;

        match write_task.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(TtsError::InvalidResponse(format!(
                    "Failed to write to espeak stdin: {}",
                    e
                )))
            }
            Err(e) => return Err(TtsError::InvalidResponse(format!("Stdin task failed: {}", e))),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TtsError::InvalidResponse(format!("espeak failed: {}", stderr)));
        }

        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_variant_heuristics() {
        assert_eq!(voice_variant("elevenlabs_rachel"), FEMALE_VARIANT);
        assert_eq!(voice_variant("openai_nova"), FEMALE_VARIANT);
        assert_eq!(voice_variant("azure_jenny"), FEMALE_VARIANT);
        assert_eq!(voice_variant("some_Female_voice"), FEMALE_VARIANT);
        assert_eq!(voice_variant("elevenlabs_josh"), MALE_VARIANT);
        assert_eq!(voice_variant("Fritz-PlayAI"), MALE_VARIANT);
    }

    #[tokio::test]
    async fn test_missing_binary_is_unavailable() {
        let engine = EspeakEngine::new(EspeakEngineConfig {
            binary: "definitely-not-an-espeak-binary".to_string(),
            ..Default::default()
        });
        assert!(!engine.is_available().await);
        assert_eq!(engine.format(), AudioFormat::Wav);

        let request = SpeechRequest {
            voice_id: "openai_nova".to_string(),
            text: "Hello".to_string(),
            settings: Default::default(),
        };
        assert!(matches!(
            engine.synthesize(&request).await,
            Err(TtsError::Unavailable(_))
        ));
    }
}
