//! Voice HTTP Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::{
    GetIntegrationSnippets, GetVoiceDetails, ListProviderVoices, ListProviders, RecommendVoices,
};
use crate::domain::voice::VoiceDescriptor;
use crate::infrastructure::http::dto::{
    ApiResponse, IntegrationSnippetsResponse, ProviderVoicesResponse, ProvidersResponse,
    RecommendVoicesRequest, VoiceListResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 音色推荐
pub async fn recommend_voices(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RecommendVoicesRequest>,
) -> Json<ApiResponse<VoiceListResponse>> {
    let defaults = RecommendVoices::default();
    let query = RecommendVoices {
        tone: req.tone.unwrap_or(defaults.tone),
        audience: req.target_audience.unwrap_or(defaults.audience),
        style: req.style.unwrap_or(defaults.style),
    };

    let voices = state.recommend_voices_handler.handle(query);
    Json(ApiResponse::success(VoiceListResponse {
        total_count: voices.len(),
        voices,
    }))
}

/// 已配置凭证的服务商
pub async fn list_providers(State(state): State<Arc<AppState>>) -> Json<ApiResponse<ProvidersResponse>> {
    let providers = state.list_providers_handler.handle(ListProviders);
    Json(ApiResponse::success(ProvidersResponse { providers }))
}

/// 某服务商的全部音色
pub async fn list_provider_voices(
    State(state): State<Arc<AppState>>,
    Path(provider): Path<String>,
) -> Json<ApiResponse<ProviderVoicesResponse>> {
    let voices = state.list_provider_voices_handler.handle(ListProviderVoices {
        provider: provider.clone(),
    });
    Json(ApiResponse::success(ProviderVoicesResponse {
        provider,
        count: voices.len(),
        voices,
    }))
}

/// 音色详情
pub async fn get_voice_details(
    State(state): State<Arc<AppState>>,
    Path(voice_id): Path<String>,
) -> Result<Json<ApiResponse<&'static VoiceDescriptor>>, ApiError> {
    let voice = state.voice_details_handler.handle(GetVoiceDetails { voice_id })?;
    Ok(Json(ApiResponse::success(voice)))
}

/// 接入代码片段
pub async fn get_integration_snippets(
    State(state): State<Arc<AppState>>,
    Path(voice_id): Path<String>,
) -> Result<Json<ApiResponse<IntegrationSnippetsResponse>>, ApiError> {
    let response = state
        .integration_handler
        .handle(GetIntegrationSnippets { voice_id })?;
    Ok(Json(ApiResponse::success(response.into())))
}
