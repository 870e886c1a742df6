//! Script HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{AnalyzeProject, GetLlmStatus, OptimizePrompt, RegenerateScript};
use crate::infrastructure::http::dto::{
    AnalyzeRequest, AnalyzeResponse, ApiResponse, LlmDebugResponse, OptimizeRequest, OptimizeResponse,
    RegenerateRequest, RegenerateResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 分析项目（不带偏好）
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<ApiResponse<AnalyzeResponse>>, ApiError> {
    let command = AnalyzeProject {
        description: req.description,
        user_tone: None,
        use_case: None,
    };
    let response = state.analyze_handler.handle(command).await?;
    Ok(Json(ApiResponse::success(response.into())))
}

/// 分析项目（用户指定语气 / 使用场景）
pub async fn analyze_with_preferences(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<ApiResponse<AnalyzeResponse>>, ApiError> {
    let command = AnalyzeProject {
        description: req.description,
        user_tone: req.tone,
        use_case: req.use_case,
    };
    let response = state.analyze_handler.handle(command).await?;
    Ok(Json(ApiResponse::success(response.into())))
}

/// 变体模式重新生成脚本
pub async fn regenerate_script(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegenerateRequest>,
) -> Result<Json<ApiResponse<RegenerateResponse>>, ApiError> {
    let response = state
        .regenerate_handler
        .handle(RegenerateScript {
            description: req.description,
        })
        .await?;
    Ok(Json(ApiResponse::success(response.into())))
}

/// 优化 Meta Prompt
pub async fn optimize_prompt(
    State(state): State<Arc<AppState>>,
    Json(req): Json<OptimizeRequest>,
) -> Result<Json<ApiResponse<OptimizeResponse>>, ApiError> {
    let response = state
        .optimize_handler
        .handle(OptimizePrompt {
            meta_prompt: req.meta_prompt,
            description: req.description,
        })
        .await?;
    Ok(Json(ApiResponse::success(response.into())))
}

/// 语言模型状态
pub async fn debug_llm(State(state): State<Arc<AppState>>) -> Json<ApiResponse<LlmDebugResponse>> {
    let status = state.llm_status_handler.handle(GetLlmStatus);
    Json(ApiResponse::success(status.into()))
}
