//! Google Translate Engine - 免费在线兜底引擎
//!
//! GET {url}?ie=UTF-8&q={chunk}&tl={language}&client=tw-ob
//! 每次请求最多 100 个字符，按块请求后拼接 MP3

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::application::ports::{FallbackEnginePort, SpeechRequest, TtsError};
use crate::domain::voice::AudioFormat;

/// 单次请求的字符上限
pub const MAX_CHUNK_CHARS: usize = 100;

/// Google Translate 引擎配置
#[derive(Debug, Clone)]
pub struct GoogleTranslateEngineConfig {
    pub enabled: bool,
    pub url: String,
    pub language: String,
    pub timeout_secs: u64,
}

impl Default for GoogleTranslateEngineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "https://translate.google.com/translate_tts".to_string(),
            language: "en".to_string(),
            timeout_secs: 15,
        }
    }
}

/// 按空白把文本切成不超过 `max_chars` 字符的块
///
/// 单个词超长时按字符硬切
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Google Translate Engine
pub struct GoogleTranslateEngine {
    client: Client,
    config: GoogleTranslateEngineConfig,
}

impl GoogleTranslateEngine {
    pub fn new(config: GoogleTranslateEngineConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    async fn fetch_chunk(&self, chunk: &str, idx: usize, total: usize) -> Result<Vec<u8>, TtsError> {
        let total = total.to_string();
        let idx = idx.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = self
            .client
            .get(&self.config.url)
            .query(&[
                ("ie", "UTF-8"),
                ("q", chunk),
                ("tl", self.config.language.as_str()),
                ("client", "tw-ob"),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TtsError::ServiceError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl FallbackEnginePort for GoogleTranslateEngine {
    fn name(&self) -> &'static str {
        "google_translate"
    }

    fn format(&self) -> AudioFormat {
        AudioFormat::Mp3
    }

    async fn is_available(&self) -> bool {
        self.config.enabled
    }

    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, TtsError> {
        let chunks = chunk_text(&request.text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(TtsError::EmptyAudio);
        }

        let total = chunks.len();
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            audio.extend(self.fetch_chunk(chunk, idx, total).await?);
        }

        tracing::debug!(chunks = total, audio_size = audio.len(), "Google Translate audio fetched");
        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_chunk() {
        assert_eq!(chunk_text("Hello there", 100), vec!["Hello there"]);
        assert!(chunk_text("   ", 100).is_empty());
    }

    #[test]
    fn test_chunks_respect_limit_and_word_boundaries() {
        let text = "word ".repeat(60);
        let chunks = chunk_text(&text, MAX_CHUNK_CHARS);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= MAX_CHUNK_CHARS);
            assert!(!chunk.starts_with(' ') && !chunk.ends_with(' '));
        }
        assert_eq!(chunks.join(" "), text.trim());
    }

    #[test]
    fn test_overlong_word_is_split() {
        let word = "x".repeat(250);
        let chunks = chunk_text(&format!("hi {} bye", word), 100);
        assert_eq!(
            chunks,
            vec![
                "hi".to_string(),
                "x".repeat(100),
                "x".repeat(100),
                "x".repeat(50),
                "bye".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_disabled_engine_is_unavailable() {
        let engine = GoogleTranslateEngine::new(GoogleTranslateEngineConfig {
            enabled: false,
            ..Default::default()
        })
        .unwrap();
        assert!(!engine.is_available().await);
        assert_eq!(engine.format(), AudioFormat::Mp3);
    }
}
