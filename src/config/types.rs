//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::application::CredentialPresence;
use crate::domain::voice::ProviderKind;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 语言模型配置
    #[serde(default)]
    pub llm: LlmConfig,

    /// TTS 服务商配置
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// 凭证（均可缺省，缺省即禁用对应服务商）
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// 兜底引擎配置
    #[serde(default)]
    pub fallback: FallbackConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 语言模型配置
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    #[serde(default = "default_llm_model")]
    pub model: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_script_max_tokens")]
    pub script_max_tokens: u32,

    #[serde(default = "default_script_temperature")]
    pub script_temperature: f32,

    #[serde(default = "default_analysis_max_tokens")]
    pub analysis_max_tokens: u32,

    #[serde(default = "default_analysis_temperature")]
    pub analysis_temperature: f32,
}

fn default_llm_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_llm_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_script_max_tokens() -> u32 {
    200
}

fn default_script_temperature() -> f32 {
    0.7
}

fn default_analysis_max_tokens() -> u32 {
    150
}

fn default_analysis_temperature() -> f32 {
    0.3
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            timeout_secs: default_timeout(),
            script_max_tokens: default_script_max_tokens(),
            script_temperature: default_script_temperature(),
            analysis_max_tokens: default_analysis_max_tokens(),
            analysis_temperature: default_analysis_temperature(),
        }
    }
}

/// TTS 服务商配置
#[derive(Debug, Clone, Deserialize)]
pub struct ProvidersConfig {
    /// 单次合成请求超时（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub elevenlabs: ElevenLabsConfig,

    #[serde(default)]
    pub openai: OpenAiConfig,

    #[serde(default)]
    pub groq_tts: GroqTtsConfig,

    #[serde(default)]
    pub azure: AzureConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            elevenlabs: ElevenLabsConfig::default(),
            openai: OpenAiConfig::default(),
            groq_tts: GroqTtsConfig::default(),
            azure: AzureConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElevenLabsConfig {
    #[serde(default = "default_elevenlabs_base_url")]
    pub base_url: String,
    #[serde(default = "default_elevenlabs_model_id")]
    pub model_id: String,
}

fn default_elevenlabs_base_url() -> String {
    "https://api.elevenlabs.io/v1".to_string()
}

fn default_elevenlabs_model_id() -> String {
    "eleven_monolingual_v1".to_string()
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            base_url: default_elevenlabs_base_url(),
            model_id: default_elevenlabs_model_id(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
    #[serde(default = "default_openai_model")]
    pub model: String,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "tts-1".to_string()
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: default_openai_base_url(),
            model: default_openai_model(),
        }
    }
}

/// 回放模型（playai-tts）配置，凭证与语言模型共用
#[derive(Debug, Clone, Deserialize)]
pub struct GroqTtsConfig {
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    #[serde(default = "default_groq_tts_model")]
    pub model: String,
    #[serde(default = "default_groq_tts_voice")]
    pub voice: String,
}

fn default_groq_tts_model() -> String {
    "playai-tts".to_string()
}

fn default_groq_tts_voice() -> String {
    "Fritz-PlayAI".to_string()
}

impl Default for GroqTtsConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_groq_tts_model(),
            voice: default_groq_tts_voice(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AzureConfig {
    #[serde(default = "default_azure_output_format")]
    pub output_format: String,
}

fn default_azure_output_format() -> String {
    "audio-24khz-48kbitrate-mono-mp3".to_string()
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            output_format: default_azure_output_format(),
        }
    }
}

/// 凭证
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub groq_api_key: Option<String>,
    #[serde(default)]
    pub elevenlabs_api_key: Option<String>,
    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default)]
    pub azure_speech_key: Option<String>,
    #[serde(default)]
    pub azure_speech_region: Option<String>,
}

/// 约定俗成的凭证环境变量名
pub const GROQ_API_KEY: &str = "GROQ_API_KEY";
pub const ELEVENLABS_API_KEY: &str = "ELEVENLABS_API_KEY";
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const AZURE_SPEECH_KEY: &str = "AZURE_SPEECH_KEY";
pub const AZURE_SPEECH_REGION: &str = "AZURE_SPEECH_REGION";

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl CredentialsConfig {
    pub fn groq(&self) -> Option<&str> {
        non_empty(&self.groq_api_key)
    }

    pub fn elevenlabs(&self) -> Option<&str> {
        non_empty(&self.elevenlabs_api_key)
    }

    pub fn openai(&self) -> Option<&str> {
        non_empty(&self.openai_api_key)
    }

    /// Azure 需要 key 和 region 同时存在
    pub fn azure(&self) -> Option<(&str, &str)> {
        Some((
            non_empty(&self.azure_speech_key)?,
            non_empty(&self.azure_speech_region)?,
        ))
    }

    /// 用约定的环境变量覆盖（非空时）
    pub fn overlay<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let slots = [
            (GROQ_API_KEY, &mut self.groq_api_key),
            (ELEVENLABS_API_KEY, &mut self.elevenlabs_api_key),
            (OPENAI_API_KEY, &mut self.openai_api_key),
            (AZURE_SPEECH_KEY, &mut self.azure_speech_key),
            (AZURE_SPEECH_REGION, &mut self.azure_speech_region),
        ];
        for (name, slot) in slots {
            if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
                *slot = Some(value);
            }
        }
    }

    /// 已配置凭证的服务商
    pub fn enabled_providers(&self) -> Vec<ProviderKind> {
        let mut enabled = Vec::new();
        if self.elevenlabs().is_some() {
            enabled.push(ProviderKind::ElevenLabs);
        }
        if self.openai().is_some() {
            enabled.push(ProviderKind::OpenAi);
        }
        if self.azure().is_some() {
            enabled.push(ProviderKind::Azure);
        }
        if self.groq().is_some() {
            enabled.push(ProviderKind::Groq);
        }
        enabled
    }

    /// 凭证存在性报告（不含值）
    pub fn presence(&self) -> Vec<CredentialPresence> {
        vec![
            CredentialPresence::new(GROQ_API_KEY, self.groq()),
            CredentialPresence::new(ELEVENLABS_API_KEY, self.elevenlabs()),
            CredentialPresence::new(OPENAI_API_KEY, self.openai()),
            CredentialPresence::new(AZURE_SPEECH_KEY, non_empty(&self.azure_speech_key)),
            CredentialPresence::new(AZURE_SPEECH_REGION, non_empty(&self.azure_speech_region)),
        ]
    }
}

/// 兜底引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct FallbackConfig {
    /// 是否启用 Google Translate 在线引擎
    #[serde(default = "default_google_translate_enabled")]
    pub google_translate_enabled: bool,

    #[serde(default = "default_google_translate_url")]
    pub google_translate_url: String,

    /// 合成语言
    #[serde(default = "default_language")]
    pub language: String,

    /// espeak-ng 可执行文件
    #[serde(default = "default_espeak_binary")]
    pub espeak_binary: String,

    /// 本地引擎默认语速（words per minute）
    #[serde(default = "default_speech_rate")]
    pub speech_rate: u32,

    #[serde(default = "default_fallback_timeout")]
    pub timeout_secs: u64,
}

fn default_google_translate_enabled() -> bool {
    true
}

fn default_google_translate_url() -> String {
    "https://translate.google.com/translate_tts".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_espeak_binary() -> String {
    "espeak-ng".to_string()
}

fn default_speech_rate() -> u32 {
    150
}

fn default_fallback_timeout() -> u64 {
    15
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            google_translate_enabled: default_google_translate_enabled(),
            google_translate_url: default_google_translate_url(),
            language: default_language(),
            espeak_binary: default_espeak_binary(),
            speech_rate: default_speech_rate(),
            timeout_secs: default_fallback_timeout(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
