#[path = "resilient/config.rs"]
mod config;

#[path = "resilient/wrapper.rs"]
mod wrapper;

#[path = "resilient/chat.rs"]
mod chat;

pub use config::ResilienceConfig;
pub use wrapper::ResilientChat;
