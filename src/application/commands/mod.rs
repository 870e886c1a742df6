//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：脚本生成与音频合成

mod audio_commands;
mod script_commands;

pub mod handlers;

pub use audio_commands::*;
pub use script_commands::*;
