//! Audio Commands - 音频生成命令

use crate::application::error::ApplicationError;
use crate::domain::voice::VoiceSettings;

/// 样例音频文本上限（字符数）
pub const MAX_SAMPLE_CHARS: usize = 200;

/// 生成音频命令
#[derive(Debug, Clone)]
pub struct GenerateAudio {
    pub voice_id: String,
    pub text: String,
    pub settings: VoiceSettings,
}

impl GenerateAudio {
    /// 校验必填项与 voice id 字符集，并截断文本
    ///
    /// voice id 会进入响应头的文件名，必须在合成之前拒绝非法字符
    pub fn validated(self) -> Result<Self, ApplicationError> {
        let voice_id = self.voice_id.trim().to_string();
        if voice_id.is_empty() || self.text.trim().is_empty() {
            return Err(ApplicationError::validation("Voice ID and text are required"));
        }
        if !is_valid_voice_id(&voice_id) {
            return Err(ApplicationError::validation(
                "Voice ID may only contain letters, digits, '_', '-' and '.'",
            ));
        }
        Ok(Self {
            voice_id,
            text: truncate_chars(&self.text, MAX_SAMPLE_CHARS),
            settings: self.settings,
        })
    }
}

/// voice id 字符集：`[A-Za-z0-9_.-]`
pub fn is_valid_voice_id(voice_id: &str) -> bool {
    voice_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// 按字符截断，不会切断多字节字符
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
