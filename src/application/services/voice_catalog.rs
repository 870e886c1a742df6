//! Voice Catalog - 音色目录服务
//!
//! 在静态目录之上叠加凭证门控：未配置凭证的服务商不出现在
//! 服务商列表和推荐结果中。

use std::collections::HashSet;

use crate::domain::voice::{self, ProviderInfo, ProviderKind, VoiceDescriptor};

/// Voice Catalog
#[derive(Debug, Clone, Default)]
pub struct VoiceCatalog {
    enabled: HashSet<ProviderKind>,
}

impl VoiceCatalog {
    /// 以已配置凭证的服务商集合创建目录
    pub fn new(enabled: impl IntoIterator<Item = ProviderKind>) -> Self {
        Self {
            enabled: enabled.into_iter().collect(),
        }
    }

    pub fn is_enabled(&self, kind: ProviderKind) -> bool {
        self.enabled.contains(&kind)
    }

    /// 已启用的服务商，按固定顺序
    pub fn enabled_providers(&self) -> Vec<ProviderKind> {
        ProviderKind::ALL
            .into_iter()
            .filter(|kind| self.is_enabled(*kind))
            .collect()
    }

    pub fn list_providers(&self) -> Vec<ProviderInfo> {
        self.enabled_providers()
            .into_iter()
            .map(|kind| kind.info())
            .collect()
    }

    /// 某服务商的全部音色，不受凭证影响；未知服务商返回空
    pub fn list_by_provider(&self, provider: &str) -> &'static [VoiceDescriptor] {
        ProviderKind::from_id(provider)
            .map(voice::voices_for)
            .unwrap_or(&[])
    }

    pub fn get_details(&self, voice_id: &str) -> Option<&'static VoiceDescriptor> {
        voice::find_voice(voice_id)
    }

    /// 推荐音色
    ///
    /// 当前策略只按凭证门控：返回所有已配置服务商的全部音色，
    /// tone / audience / style 不参与筛选
    pub fn recommend(&self, tone: &str, audience: &str, style: &str) -> Vec<&'static VoiceDescriptor> {
        let voices: Vec<_> = self
            .enabled_providers()
            .into_iter()
            .flat_map(|kind| voice::voices_for(kind).iter())
            .collect();

        if voices.is_empty() {
            tracing::warn!("No TTS providers with valid API keys found");
        } else {
            tracing::debug!(
                tone = %tone,
                audience = %audience,
                style = %style,
                count = voices.len(),
                "Voice recommendations resolved"
            );
        }

        voices
    }
}
