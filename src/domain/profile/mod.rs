//! Profile Context - 语气画像限界上下文
//!
//! 职责:
//! - 领域检测（关键词优先级）
//! - 语气 / 风格 / 受众推断
//! - Meta Prompt 组装

mod composer;
mod profiler;
mod value_objects;

pub use composer::compose;
pub use profiler::{detect_domain, profile, ProfileRequest};
pub use value_objects::{Domain, MetaPrompt, Profile, ToneAnalysis};
