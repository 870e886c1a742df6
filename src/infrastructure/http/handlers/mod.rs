//! HTTP Handlers

mod audio;
mod health;
mod script;
mod voice;

pub use audio::*;
pub use health::*;
pub use script::*;
pub use voice::*;
