//! HTTP Routes
//!
//! API Endpoints:
//! - /                             GET   健康检查
//! - /api/health                   GET   健康检查
//! - /api/analyze                  POST  分析项目并生成脚本
//! - /api/analyze-with-preferences POST  带用户偏好的分析
//! - /api/regenerate-script        POST  变体模式重新生成脚本
//! - /api/optimize-prompt          POST  优化 Meta Prompt
//! - /api/debug-llm                GET   语言模型与凭证状态
//! - /api/voices                   POST  音色推荐
//! - /api/voices/providers         GET   已配置的服务商
//! - /api/voices/:provider         GET   某服务商的音色
//! - /api/voice/:voice_id          GET   音色详情
//! - /api/integration/:voice_id    GET   接入代码片段
//! - /api/generate-audio           POST  生成音频样例（返回音频字节）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::health))
        .nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/analyze", post(handlers::analyze))
        .route("/analyze-with-preferences", post(handlers::analyze_with_preferences))
        .route("/regenerate-script", post(handlers::regenerate_script))
        .route("/optimize-prompt", post(handlers::optimize_prompt))
        .route("/debug-llm", get(handlers::debug_llm))
        .route("/voices", post(handlers::recommend_voices))
        .route("/voices/providers", get(handlers::list_providers))
        .route("/voices/:provider", get(handlers::list_provider_voices))
        .route("/voice/:voice_id", get(handlers::get_voice_details))
        .route("/integration/:voice_id", get(handlers::get_integration_snippets))
        .route("/generate-audio", post(handlers::generate_audio))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use crate::application::{
        AudioDispatcher, CredentialPresence, FallbackEnginePort, LlmAvailability, ProviderBackends,
        ScriptGenerator, ScriptGeneratorConfig, VoiceCatalog,
    };
    use crate::domain::voice::{AudioFormat, ProviderKind};
    use crate::infrastructure::adapters::tts::FakeSpeechEngine;

    fn test_router(engine: Arc<FakeSpeechEngine>) -> Router {
        let generator = Arc::new(ScriptGenerator::new(
            LlmAvailability::Unavailable("Missing credential: GROQ_API_KEY".to_string()),
            ScriptGeneratorConfig::default(),
        ));
        let catalog = Arc::new(VoiceCatalog::new([ProviderKind::ElevenLabs]));
        let chain: Vec<Arc<dyn FallbackEnginePort>> = vec![engine as Arc<dyn FallbackEnginePort>];
        let dispatcher = Arc::new(AudioDispatcher::new(ProviderBackends::default(), chain));
        let credentials = vec![CredentialPresence::new("GROQ_API_KEY", None)];
        let state = AppState::new(generator, catalog, dispatcher, credentials);
        create_routes().with_state(Arc::new(state))
    }

    fn default_router() -> Router {
        test_router(Arc::new(FakeSpeechEngine::new(
            "local",
            AudioFormat::Wav,
            b"RIFFwav".to_vec(),
        )))
    }

    async fn get_json(router: Router, uri: &str) -> Value {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn post_json(router: Router, uri: &str, payload: Value) -> axum::response::Response {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();
        router.oneshot(request).await.unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        for uri in ["/", "/api/health"] {
            let json = get_json(default_router(), uri).await;
            assert_eq!(json["status"], "healthy");
            assert_eq!(json["llm_configured"], false);
            assert_eq!(json["tts_configured"], false);
            assert!(json["timestamp"].is_string());
        }
    }

    #[tokio::test]
    async fn test_analyze_rejects_short_description() {
        let response = post_json(default_router(), "/api/analyze", json!({ "description": "short" })).await;
        let json = body_json(response).await;
        assert_eq!(json["errno"], 400);
    }

    #[tokio::test]
    async fn test_analyze_healthcare_project() {
        let response = post_json(
            default_router(),
            "/api/analyze",
            json!({ "description": "A medical appointment scheduling assistant for patients" }),
        )
        .await;
        let json = body_json(response).await;
        assert_eq!(json["errno"], 0);
        assert_eq!(json["data"]["domain"], "healthcare");
        assert_eq!(json["data"]["model_used"], "fallback");
        assert!(json["data"]["meta_prompt"]
            .as_str()
            .unwrap()
            .ends_with("with professional medical clarity"));
        assert_eq!(json["data"]["analysis"]["tone"], "professional");
    }

    #[tokio::test]
    async fn test_debug_llm_reports_missing_key() {
        let json = get_json(default_router(), "/api/debug-llm").await;
        assert_eq!(json["data"]["llm_client_initialized"], false);
        assert_eq!(json["data"]["llm_key_length"], 0);
        assert_eq!(json["data"]["credentials"][0]["present"], false);
    }

    #[tokio::test]
    async fn test_voice_catalog_routes() {
        let providers = get_json(default_router(), "/api/voices/providers").await;
        assert_eq!(providers["data"]["providers"].as_array().unwrap().len(), 1);
        assert_eq!(providers["data"]["providers"][0]["name"], "ElevenLabs");

        let playht = get_json(default_router(), "/api/voices/playht").await;
        assert_eq!(playht["data"]["count"], 2);

        let recommended = body_json(post_json(default_router(), "/api/voices", json!({})).await).await;
        assert_eq!(recommended["data"]["total_count"], 4);

        let details = get_json(default_router(), "/api/voice/openai_nova").await;
        assert_eq!(details["data"]["provider"], "OpenAI");

        let missing = get_json(default_router(), "/api/voice/acme_voice").await;
        assert_eq!(missing["errno"], 404);

        let snippets = get_json(default_router(), "/api/integration/elevenlabs_josh").await;
        assert!(snippets["data"]["integration_snippets"]["curl"]
            .as_str()
            .unwrap()
            .contains("elevenlabs_josh"));
    }

    #[tokio::test]
    async fn test_generate_audio_returns_bytes() {
        let response = post_json(
            default_router(),
            "/api/generate-audio",
            json!({ "voice_id": "elevenlabs_rachel", "text": "Hello" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/wav");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "inline; filename=\"sample_elevenlabs_rachel.wav\""
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"RIFFwav");
    }

    #[tokio::test]
    async fn test_generate_audio_errors() {
        let missing = post_json(default_router(), "/api/generate-audio", json!({ "voice_id": "openai_nova" })).await;
        assert_eq!(body_json(missing).await["errno"], 400);

        let exhausted = post_json(
            test_router(Arc::new(FakeSpeechEngine::unavailable("local"))),
            "/api/generate-audio",
            json!({ "voice_id": "openai_nova", "text": "Hello" }),
        )
        .await;
        assert_eq!(body_json(exhausted).await["errno"], 503);
    }

    #[tokio::test]
    async fn test_generate_audio_rejects_unsafe_voice_id_before_synthesis() {
        let engine = Arc::new(FakeSpeechEngine::new("local", AudioFormat::Wav, b"RIFFwav".to_vec()));

        for voice_id in ["acme\u{0001}voice", "elevenlabs_rachel\"; filename=\"x.exe"] {
            let response = post_json(
                test_router(engine.clone()),
                "/api/generate-audio",
                json!({ "voice_id": voice_id, "text": "Hello" }),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK);
            assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());
            let json = body_json(response).await;
            assert_eq!(json["errno"], 400, "voice id {:?}", voice_id);
        }

        assert_eq!(engine.calls(), 0);
    }
}
