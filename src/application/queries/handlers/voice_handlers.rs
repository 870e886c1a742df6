//! Voice Query Handlers
//!
//! 目录数据是静态只读的，处理器均为同步调用

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::queries::{
    GetIntegrationSnippets, GetVoiceDetails, ListProviderVoices, ListProviders, RecommendVoices,
};
use crate::application::services::VoiceCatalog;
use crate::domain::voice::{ProviderInfo, VoiceDescriptor};

use super::IntegrationSnippets;

/// RecommendVoices Handler
pub struct RecommendVoicesHandler {
    catalog: Arc<VoiceCatalog>,
}

impl RecommendVoicesHandler {
    pub fn new(catalog: Arc<VoiceCatalog>) -> Self {
        Self { catalog }
    }

    pub fn handle(&self, query: RecommendVoices) -> Vec<&'static VoiceDescriptor> {
        self.catalog.recommend(&query.tone, &query.audience, &query.style)
    }
}

/// ListProviders Handler
pub struct ListProvidersHandler {
    catalog: Arc<VoiceCatalog>,
}

impl ListProvidersHandler {
    pub fn new(catalog: Arc<VoiceCatalog>) -> Self {
        Self { catalog }
    }

    pub fn handle(&self, _query: ListProviders) -> Vec<ProviderInfo> {
        self.catalog.list_providers()
    }
}

/// ListProviderVoices Handler
pub struct ListProviderVoicesHandler {
    catalog: Arc<VoiceCatalog>,
}

impl ListProviderVoicesHandler {
    pub fn new(catalog: Arc<VoiceCatalog>) -> Self {
        Self { catalog }
    }

    /// 未知服务商返回空列表
    pub fn handle(&self, query: ListProviderVoices) -> &'static [VoiceDescriptor] {
        self.catalog.list_by_provider(&query.provider.to_lowercase())
    }
}

/// GetVoiceDetails Handler
pub struct GetVoiceDetailsHandler {
    catalog: Arc<VoiceCatalog>,
}

impl GetVoiceDetailsHandler {
    pub fn new(catalog: Arc<VoiceCatalog>) -> Self {
        Self { catalog }
    }

    pub fn handle(&self, query: GetVoiceDetails) -> Result<&'static VoiceDescriptor, ApplicationError> {
        self.catalog
            .get_details(&query.voice_id)
            .ok_or_else(|| ApplicationError::not_found("Voice", query.voice_id))
    }
}

/// 接入片段响应
#[derive(Debug, Clone)]
pub struct IntegrationResponse {
    pub voice: &'static VoiceDescriptor,
    pub snippets: IntegrationSnippets,
}

/// GetIntegrationSnippets Handler
pub struct GetIntegrationSnippetsHandler {
    catalog: Arc<VoiceCatalog>,
}

impl GetIntegrationSnippetsHandler {
    pub fn new(catalog: Arc<VoiceCatalog>) -> Self {
        Self { catalog }
    }

    pub fn handle(&self, query: GetIntegrationSnippets) -> Result<IntegrationResponse, ApplicationError> {
        let voice = self
            .catalog
            .get_details(&query.voice_id)
            .ok_or_else(|| ApplicationError::not_found("Voice", query.voice_id))?;

        Ok(IntegrationResponse {
            voice,
            snippets: IntegrationSnippets::for_voice(voice),
        })
    }
}
