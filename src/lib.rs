//! Octave - AI 语音脚本与音色试听后端
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Profile Context: 语气画像与元提示词
//! - Voice Context: 服务商与音色目录
//!
//! 应用层 (application/):
//! - Ports: 端口定义（LlmClient, SpeechProvider, FallbackEngine）
//! - Services: ScriptGenerator, VoiceCatalog, AudioDispatcher
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Adapters: 语言模型客户端, TTS 服务商客户端, 兜底引擎

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
