//! Conversation controller for the weather dialogue
//!
//! Two states per chat: `Idle` and `AwaitingCity`. Command dispatch is an
//! explicit match over the parsed command name; the upstream weather calls
//! sit behind the [`WeatherService`] trait so the flow is testable with a
//! scripted backend.

use crate::weather::WeatherService;
use std::collections::HashMap;
use tracing::{info, warn};

const GREETING_FALLBACK: &str =
    "Hi! Please write /weather to select a city and get current weather there";
const HELP_TEXT: &str = "Send /weather to select a city and get current weather there";
const CITY_PROMPT: &str = "Which city would you like to check the weather in?";
const RETRY_PROMPT: &str = "Sorry, I can't find this city. Please try again";
const CANCELLED: &str = "Weather command cancelled :(";
const DONT_UNDERSTAND: &str = "Sorry, I didn't understand that command.";

/// Dialogue state of a single chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatState {
    /// No dialogue in progress
    #[default]
    Idle,
    /// The bot asked for a city name and is waiting for the answer
    AwaitingCity,
}

/// The sender of an inbound message
#[derive(Debug, Clone)]
pub struct Sender {
    pub id: i64,
    pub name: String,
}

/// An inbound chat message, decoupled from the transport types
#[derive(Debug, Clone)]
pub struct Incoming {
    pub chat_id: i64,
    pub sender: Option<Sender>,
    pub text: String,
}

/// An outbound reply produced by the controller
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub html: bool,
}

impl Reply {
    fn plain<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            html: false,
        }
    }

    fn html<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            html: true,
        }
    }
}

enum Input<'a> {
    Command(&'a str),
    Text(&'a str),
}

/// Parse a message into a command name or free text. Commands may carry a
/// `@botname` suffix, which is stripped.
fn parse_input(text: &str) -> Input<'_> {
    let trimmed = text.trim();
    match trimmed.strip_prefix('/') {
        Some(rest) => {
            let command = rest.split_whitespace().next().unwrap_or("");
            let command = command.split('@').next().unwrap_or("");
            Input::Command(command)
        }
        None => Input::Text(trimmed),
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn greeting(sender: Option<&Sender>) -> String {
    match sender {
        Some(sender) => format!(
            "Hi <a href=\"tg://user?id={}\">{}</a>! Please write /weather to select a city and get current weather there",
            sender.id,
            escape_html(&sender.name)
        ),
        None => GREETING_FALLBACK.to_string(),
    }
}

/// Drives the weather dialogue for all chats
pub struct ConversationController<S> {
    service: S,
    states: HashMap<i64, ChatState>,
}

impl<S: WeatherService> ConversationController<S> {
    /// Create a controller over the given upstream service
    pub fn new(service: S) -> Self {
        Self {
            service,
            states: HashMap::new(),
        }
    }

    /// Current state of a chat
    #[must_use]
    pub fn state(&self, chat_id: i64) -> ChatState {
        self.states.get(&chat_id).copied().unwrap_or_default()
    }

    /// Handle one inbound message and produce the replies to send
    pub async fn handle(&mut self, message: Incoming) -> Vec<Reply> {
        let state = self.state(message.chat_id);

        match parse_input(&message.text) {
            Input::Command("start") => vec![Reply::html(greeting(message.sender.as_ref()))],
            Input::Command("help") => vec![Reply::plain(HELP_TEXT)],
            Input::Command("weather") => {
                self.states.insert(message.chat_id, ChatState::AwaitingCity);
                vec![Reply::plain(CITY_PROMPT)]
            }
            Input::Command("cancel") if state == ChatState::AwaitingCity => {
                self.states.insert(message.chat_id, ChatState::Idle);
                vec![Reply::plain(CANCELLED)]
            }
            Input::Command(_) => vec![Reply::plain(DONT_UNDERSTAND)],
            Input::Text(city) if state == ChatState::AwaitingCity => {
                self.lookup(message.chat_id, city).await
            }
            // Free text outside the dialogue is ignored
            Input::Text(_) => Vec::new(),
        }
    }

    /// Resolve the city and fetch its weather. On success the chat returns
    /// to `Idle`; on any failure it stays in `AwaitingCity` so the user can
    /// answer again.
    async fn lookup(&mut self, chat_id: i64, city: &str) -> Vec<Reply> {
        let location = match self.service.resolve_city(city).await {
            Ok(Some(location)) => location,
            Ok(None) => return vec![Reply::plain(RETRY_PROMPT)],
            Err(e) => {
                warn!("Geocoding '{city}' failed: {e}");
                return vec![Reply::plain(e.user_message())];
            }
        };

        match self.service.current_weather(&location).await {
            Ok(report) => {
                self.states.insert(chat_id, ChatState::Idle);
                info!(
                    "Sending weather report for {}, {}",
                    location.name, location.country
                );
                vec![Reply::plain(report.summary())]
            }
            Err(e) => {
                warn!(
                    "Weather fetch for {}, {} failed: {e}",
                    location.name, location.country
                );
                vec![Reply::plain(e.user_message())]
            }
        }
    }
}
