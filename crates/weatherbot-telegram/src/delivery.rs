//! Telegram delivery for scheduled weather updates.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ChatId as TelegramChatId;
use weatherbot_models::ChatId;
use weatherbot_notify::{DeliveryError, NotificationSink};

/// Sends pipeline messages through the Bot API.
#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Bot,
}

impl TelegramNotifier {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl NotificationSink for TelegramNotifier {
    async fn deliver(&self, chat_id: ChatId, message: &str) -> Result<(), DeliveryError> {
        self.bot
            .send_message(TelegramChatId(chat_id.get()), message)
            .await
            .map(|_| ())
            .map_err(|e| DeliveryError::new(chat_id, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_BOT_TOKEN: &str = "test_bot_token_12345";

    fn notifier(server: &mockito::ServerGuard) -> TelegramNotifier {
        let url = url::Url::parse(&server.url()).unwrap();
        TelegramNotifier::new(Bot::new(TEST_BOT_TOKEN).set_api_url(url))
    }

    #[tokio::test]
    async fn test_deliver_sends_message() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", format!("/bot{}/SendMessage", TEST_BOT_TOKEN).as_str())
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"chat_id": 42, "text": "hello"}"#.to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                "ok": true,
                "result": {
                    "message_id": 1,
                    "date": 1706529600,
                    "chat": {"id": 42, "type": "private"},
                    "from": {"id": 123456789, "is_bot": true, "first_name": "WeatherBot"},
                    "text": "hello"
                }
            }"#,
            )
            .create_async()
            .await;

        notifier(&server).deliver(ChatId(42), "hello").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_deliver_maps_api_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", format!("/bot{}/SendMessage", TEST_BOT_TOKEN).as_str())
            .with_status(403)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"ok": false, "error_code": 403, "description": "Forbidden: bot was blocked by the user"}"#,
            )
            .create_async()
            .await;

        let err = notifier(&server)
            .deliver(ChatId(42), "hello")
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert_eq!(err.chat_id, ChatId(42));
        assert!(err.reason.contains("bot was blocked by the user"), "{}", err.reason);
    }
}
