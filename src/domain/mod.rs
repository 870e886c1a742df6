//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Profile Context: 项目描述 → 语气画像 → Meta Prompt
//! - Voice Context: 音色目录、服务商与音频格式

pub mod profile;
pub mod voice;
