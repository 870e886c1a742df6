//! HTTP Layer - RESTful API
//!
//! 所有 JSON 接口统一返回 `{errno, error, data}` 信封，
//! 音频接口成功时直接返回二进制

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
