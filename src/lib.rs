//! `Meteobot` - Telegram chat bot for current weather lookups
//!
//! This library provides the conversation flow, the Open-Meteo client for
//! geocoding and current weather, and a minimal Telegram Bot API client.

pub mod bot;
pub mod config;
pub mod conversation;
pub mod error;
pub mod models;
pub mod telegram;
pub mod weather;

// Re-export core types for public API
pub use bot::Bot;
pub use config::{BotConfig, LoggingConfig, TelegramConfig, WeatherConfig};
pub use conversation::{ChatState, ConversationController, Incoming, Reply, Sender};
pub use error::MeteoBotError;
pub use models::{Condition, Location, WeatherReport};
pub use telegram::TelegramClient;
pub use weather::{WeatherApiClient, WeatherService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, MeteoBotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
