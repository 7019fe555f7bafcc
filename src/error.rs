//! Error types and handling for the `Meteobot` application

use thiserror::Error;

/// Main error type for the `Meteobot` application
#[derive(Error, Debug)]
pub enum MeteoBotError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Weather or geocoding API communication errors
    #[error("Weather API error: {message}")]
    Weather { message: String },

    /// Telegram Bot API communication errors
    #[error("Telegram API error: {message}")]
    Telegram { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl MeteoBotError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new weather API error
    pub fn weather<S: Into<String>>(message: S) -> Self {
        Self::Weather {
            message: message.into(),
        }
    }

    /// Create a new Telegram API error
    pub fn telegram<S: Into<String>>(message: S) -> Self {
        Self::Telegram {
            message: message.into(),
        }
    }

    /// Get a user-friendly message suitable for a chat reply
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            MeteoBotError::Config { .. } => {
                "The bot is misconfigured. Please contact the operator.".to_string()
            }
            MeteoBotError::Weather { .. } => {
                "Sorry, the weather service is unavailable right now. Please try again later."
                    .to_string()
            }
            MeteoBotError::Telegram { .. } => {
                "Sorry, something went wrong delivering the message. Please try again.".to_string()
            }
            MeteoBotError::Io { .. } => {
                "Sorry, an internal error occurred. Please try again later.".to_string()
            }
        }
    }
}
