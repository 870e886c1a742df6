//! LLM Adapter - 语言模型客户端实现

mod groq_client;

pub use groq_client::{GroqClient, GroqClientConfig};
