//! TTS Adapter - 语音合成后端实现
//!
//! 云端服务商（需要凭证）:
//! - ElevenLabs / OpenAI / Azure / Groq playai-tts
//!
//! 兜底引擎:
//! - Google Translate（在线，免费）
//! - espeak-ng（本地）

mod azure_speech_client;
mod elevenlabs_client;
mod espeak_engine;
mod fake_speech_engine;
mod google_translate_engine;
mod groq_speech_client;
mod openai_speech_client;

pub use azure_speech_client::{AzureSpeechClient, AzureSpeechClientConfig};
pub use elevenlabs_client::{native_voice_id, ElevenLabsClient, ElevenLabsClientConfig};
pub use espeak_engine::{voice_variant, EspeakEngine, EspeakEngineConfig};
pub use fake_speech_engine::FakeSpeechEngine;
pub use google_translate_engine::{chunk_text, GoogleTranslateEngine, GoogleTranslateEngineConfig};
pub use groq_speech_client::{normalize, GroqSpeechClient, GroqSpeechClientConfig, SpeechPayload};
pub use openai_speech_client::{OpenAiSpeechClient, OpenAiSpeechClientConfig};
