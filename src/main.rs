//! Octave - AI 语音脚本与音色试听后端
//!
//! 启动流程：加载配置 → 初始化日志 → 构建语言模型 / TTS 适配器 → 启动 HTTP 服务

use std::sync::Arc;

use octave::application::{
    AudioDispatcher, FallbackEnginePort, LlmAvailability, ProviderBackends, ScriptGenerator,
    ScriptGeneratorConfig, SpeechProviderPort, TtsError, VoiceCatalog,
};
use octave::config::{load_config, print_config, AppConfig};
use octave::infrastructure::adapters::{
    AzureSpeechClient, AzureSpeechClientConfig, ElevenLabsClient, ElevenLabsClientConfig,
    EspeakEngine, EspeakEngineConfig, GoogleTranslateEngine, GoogleTranslateEngineConfig,
    GroqClient, GroqClientConfig, GroqSpeechClient, GroqSpeechClientConfig, OpenAiSpeechClient,
    OpenAiSpeechClientConfig,
};
use octave::infrastructure::http::{AppState, HttpServer, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：凭证变量 > 环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},octave={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    tracing::info!("Octave - AI voice script backend");
    print_config(&config);

    // 语言模型客户端，初始化失败不阻止启动
    let llm = LlmAvailability::from_result(GroqClient::new(GroqClientConfig {
        base_url: config.llm.base_url.clone(),
        model: config.llm.model.clone(),
        api_key: config.credentials.groq().map(str::to_string),
        timeout_secs: config.llm.timeout_secs,
    }));
    let generator = Arc::new(ScriptGenerator::new(
        llm,
        ScriptGeneratorConfig {
            script_max_tokens: config.llm.script_max_tokens,
            script_temperature: config.llm.script_temperature,
            analysis_max_tokens: config.llm.analysis_max_tokens,
            analysis_temperature: config.llm.analysis_temperature,
        },
    ));

    // TTS 服务商与兜底链
    let backends = build_backends(&config);
    // 目录按实际构建成功的后端门控
    let catalog = Arc::new(VoiceCatalog::new(backends.configured()));
    let fallbacks = build_fallbacks(&config);
    let dispatcher = Arc::new(AudioDispatcher::new(backends, fallbacks));

    let state = AppState::new(generator, catalog, dispatcher, config.credentials.presence());

    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 按凭证构建服务商客户端，构建失败的服务商记录日志后跳过
fn build_backends(config: &AppConfig) -> ProviderBackends {
    let credentials = &config.credentials;
    let providers = &config.providers;
    let mut backends = ProviderBackends::default();

    if let Some(key) = credentials.elevenlabs() {
        let client_config = ElevenLabsClientConfig {
            base_url: providers.elevenlabs.base_url.clone(),
            model_id: providers.elevenlabs.model_id.clone(),
            timeout_secs: providers.timeout_secs,
            ..ElevenLabsClientConfig::new(key)
        };
        register(&mut backends, "elevenlabs", ElevenLabsClient::new(client_config));
    }

    if let Some(key) = credentials.openai() {
        let client_config = OpenAiSpeechClientConfig {
            base_url: providers.openai.base_url.clone(),
            model: providers.openai.model.clone(),
            timeout_secs: providers.timeout_secs,
            ..OpenAiSpeechClientConfig::new(key)
        };
        register(&mut backends, "openai", OpenAiSpeechClient::new(client_config));
    }

    if let Some((key, region)) = credentials.azure() {
        let client_config = AzureSpeechClientConfig {
            output_format: providers.azure.output_format.clone(),
            timeout_secs: providers.timeout_secs,
            ..AzureSpeechClientConfig::new(key, region)
        };
        register(&mut backends, "azure", AzureSpeechClient::new(client_config));
    }

    if let Some(key) = credentials.groq() {
        let client_config = GroqSpeechClientConfig {
            base_url: providers.groq_tts.base_url.clone(),
            model: providers.groq_tts.model.clone(),
            voice: providers.groq_tts.voice.clone(),
            timeout_secs: providers.timeout_secs,
            ..GroqSpeechClientConfig::new(key)
        };
        register(&mut backends, "groq", GroqSpeechClient::new(client_config));
    }

    backends
}

fn register<C>(backends: &mut ProviderBackends, name: &str, result: Result<C, TtsError>)
where
    C: SpeechProviderPort + 'static,
{
    match result {
        Ok(client) => {
            if backends.insert(Arc::new(client)) {
                tracing::info!("TTS provider {} initialized", name);
            }
        }
        Err(e) => tracing::error!("Failed to initialize TTS provider {}: {}", name, e),
    }
}

/// 兜底链：在线 Google Translate 在前，本地 espeak 在后
fn build_fallbacks(config: &AppConfig) -> Vec<Arc<dyn FallbackEnginePort>> {
    let fallback = &config.fallback;
    let mut engines: Vec<Arc<dyn FallbackEnginePort>> = Vec::new();

    match GoogleTranslateEngine::new(GoogleTranslateEngineConfig {
        enabled: fallback.google_translate_enabled,
        url: fallback.google_translate_url.clone(),
        language: fallback.language.clone(),
        timeout_secs: fallback.timeout_secs,
    }) {
        Ok(engine) => engines.push(Arc::new(engine)),
        Err(e) => tracing::error!("Failed to initialize Google Translate fallback: {}", e),
    }

    engines.push(Arc::new(EspeakEngine::new(EspeakEngineConfig {
        binary: fallback.espeak_binary.clone(),
        rate: fallback.speech_rate,
        timeout_secs: fallback.timeout_secs,
    })));

    engines
}
