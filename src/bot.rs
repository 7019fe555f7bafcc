//! Long-poll runner wiring Telegram updates to the conversation controller

use crate::conversation::{ConversationController, Incoming, Sender};
use crate::telegram::{TelegramClient, Update};
use crate::weather::WeatherService;
use crate::Result;
use std::time::Duration;
use tracing::{error, info, warn};

/// Pause after a failed poll before trying again
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// The running bot: one poll loop, sequential update handling
pub struct Bot<S> {
    telegram: TelegramClient,
    controller: ConversationController<S>,
    offset: i64,
}

impl<S: WeatherService> Bot<S> {
    /// Wire a Telegram client to a weather backend
    pub fn new(telegram: TelegramClient, service: S) -> Self {
        Self {
            telegram,
            controller: ConversationController::new(service),
            offset: 0,
        }
    }

    /// Poll for updates until Ctrl-C
    pub async fn run(mut self) -> Result<()> {
        info!("Bot started, polling for updates");

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            let polled = tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown signal received, stopping");
                    return Ok(());
                }
                polled = self.telegram.get_updates(self.offset) => polled,
            };

            match polled {
                Ok(updates) => self.dispatch(updates).await,
                Err(e) => {
                    // A failed poll must not kill the process
                    warn!("Polling for updates failed: {e}");
                    tokio::time::sleep(POLL_RETRY_DELAY).await;
                }
            }
        }
    }

    async fn dispatch(&mut self, updates: Vec<Update>) {
        for update in updates {
            self.offset = self.offset.max(update.update_id + 1);

            let Some(message) = update.message else {
                continue;
            };
            let chat_id = message.chat.id;
            let Some(text) = message.text else {
                continue;
            };

            let incoming = Incoming {
                chat_id,
                sender: message.from.map(|user| Sender {
                    id: user.id,
                    name: user.first_name,
                }),
                text,
            };

            for reply in self.controller.handle(incoming).await {
                let sent = if reply.html {
                    self.telegram.send_html(chat_id, &reply.text).await
                } else {
                    self.telegram.send_message(chat_id, &reply.text).await
                };
                if let Err(e) = sent {
                    error!("Failed to send reply to chat {chat_id}: {e}");
                }
            }
        }
    }
}
