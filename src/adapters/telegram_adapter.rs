//! Telegram notification adapter.
//!
//! Sends the execution message through the Bot API. When no token/chat_id
//! pair is configured the adapter is a silent no-op, so a bot without
//! notification credentials still runs.

use crate::domain::error::DipbotError;
use crate::ports::config_port::ConfigPort;
use crate::ports::notify_port::NotifyPort;

struct Credentials {
    token: String,
    chat_id: String,
}

pub struct TelegramAdapter {
    client: reqwest::blocking::Client,
    credentials: Option<Credentials>,
}

impl TelegramAdapter {
    pub fn from_config(config: &dyn ConfigPort) -> Self {
        let token = config
            .get_string("telegram", "token")
            .filter(|s| !s.trim().is_empty());
        let chat_id = config
            .get_string("telegram", "chat_id")
            .filter(|s| !s.trim().is_empty());

        let credentials = match (token, chat_id) {
            (Some(token), Some(chat_id)) => Some(Credentials { token, chat_id }),
            _ => None,
        };

        Self {
            client: reqwest::blocking::Client::new(),
            credentials,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }
}

impl NotifyPort for TelegramAdapter {
    fn send_notification(&self, message: &str) -> Result<(), DipbotError> {
        let Some(credentials) = &self.credentials else {
            return Ok(());
        };

        let url = format!(
            "https://api.telegram.org/bot{}/sendMessage",
            credentials.token
        );
        self.client
            .post(&url)
            .form(&[("chat_id", credentials.chat_id.as_str()), ("text", message)])
            .send()
            .map_err(|e| DipbotError::Sink {
                sink: "notify".to_string(),
                reason: e.to_string(),
            })?
            .error_for_status()
            .map_err(|e| DipbotError::Sink {
                sink: "notify".to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }
}
