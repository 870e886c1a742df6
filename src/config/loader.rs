//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 约定的凭证环境变量（`GROQ_API_KEY` 等）
//! 2. 环境变量（前缀 `OCTAVE_`）
//! 3. 配置文件（config.toml）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// # 环境变量示例
/// - `OCTAVE_SERVER__PORT=8080`
/// - `OCTAVE_LLM__MODEL=llama-3.1-8b-instant`
/// - `OCTAVE_FALLBACK__GOOGLE_TRANSLATE_ENABLED=false`
/// - `GROQ_API_KEY=gsk_...`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级），其余字段由 serde default 补齐
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default("llm.base_url", "https://api.groq.com/openai/v1")?
        .set_default("llm.model", "llama-3.1-8b-instant")?
        .set_default("llm.timeout_secs", 30)?
        .set_default("providers.timeout_secs", 30)?
        .set_default("fallback.google_translate_enabled", true)?
        .set_default("fallback.speech_rate", 150)?
        .set_default("fallback.timeout_secs", 15)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量，例如 OCTAVE_LLM__MODEL；变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix("OCTAVE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let mut app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    // 4. 约定的凭证变量（最高优先级）
    app_config
        .credentials
        .overlay(|name| std::env::var(name).ok());

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.llm.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "LLM base URL cannot be empty".to_string(),
        ));
    }

    if config.llm.model.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "LLM model cannot be empty".to_string(),
        ));
    }

    let timeouts = [
        ("llm.timeout_secs", config.llm.timeout_secs),
        ("providers.timeout_secs", config.providers.timeout_secs),
        ("fallback.timeout_secs", config.fallback.timeout_secs),
    ];
    if let Some((name, _)) = timeouts.iter().find(|(_, secs)| *secs == 0) {
        return Err(ConfigError::ValidationError(format!(
            "{} cannot be 0",
            name
        )));
    }

    if config.fallback.speech_rate == 0 {
        return Err(ConfigError::ValidationError(
            "Fallback speech rate must be positive".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志），凭证只报告是否存在
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("LLM: {} ({})", config.llm.model, config.llm.base_url);
    tracing::info!("LLM Timeout: {}s", config.llm.timeout_secs);
    tracing::info!("Provider Timeout: {}s", config.providers.timeout_secs);
    for credential in config.credentials.presence() {
        tracing::info!(
            "{}: {}",
            credential.name,
            if credential.present() { "set" } else { "not set" }
        );
    }
    tracing::info!(
        "Credentialed Providers: {:?}",
        config.credentials.enabled_providers()
    );
    tracing::info!(
        "Google Translate Fallback: {}",
        config.fallback.google_translate_enabled
    );
    tracing::info!("espeak Binary: {}", config.fallback.espeak_binary);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8088

[llm]
model = "llama-3.3-70b-versatile"
script_max_tokens = 256

[fallback]
google_translate_enabled = false
"#
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
        assert_eq!(config.llm.script_max_tokens, 256);
        assert_eq!(config.llm.analysis_max_tokens, 150);
        assert!(!config.fallback.google_translate_enabled);
        assert_eq!(config.providers.elevenlabs.model_id, "eleven_monolingual_v1");
    }

    #[test]
    fn test_missing_required_file_fails() {
        let result = load_config_from_path(Some(Path::new("/nonexistent/octave.toml")));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_model() {
        let mut config = AppConfig::default();
        config.llm.model = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_timeout() {
        let mut config = AppConfig::default();
        config.fallback.timeout_secs = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("fallback.timeout_secs"));
    }

    #[test]
    fn test_validation_error_for_zero_rate() {
        let mut config = AppConfig::default();
        config.fallback.speech_rate = 0;
        assert!(validate_config(&config).is_err());
    }
}
