//! HTTP Bot API client.
//!
//! Method URLs embed the token, so transport errors are stripped of their
//! URL before they are returned or logged.

use crate::domain::{ApiEnvelope, BotError, SendMessage, Update, User};
use crate::ports::BotApi;
use async_trait::async_trait;
use miniapp_auth::BotSecret;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::time::Duration;

/// Slack on top of the long-poll timeout before the client gives up
const REQUEST_TIMEOUT_MARGIN: Duration = Duration::from_secs(10);

/// Update kinds the bot asks for
const ALLOWED_UPDATES: &[&str] = &["message"];

/// Bot API client over `reqwest`.
pub struct TelegramBotApi {
    client: Client,
    base_url: String,
    token: BotSecret,
}

impl TelegramBotApi {
    /// Create a client; `poll_timeout` bounds the `getUpdates` long poll.
    pub fn new(
        base_url: impl Into<String>,
        token: BotSecret,
        poll_timeout: Duration,
    ) -> Result<Self, BotError> {
        let client = Client::builder()
            .timeout(poll_timeout + REQUEST_TIMEOUT_MARGIN)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| BotError::Transport(e.without_url().to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.base_url,
            String::from_utf8_lossy(self.token.as_bytes()),
            method
        )
    }

    /// POST a JSON body to a Bot API method and unwrap the envelope.
    async fn call<P, R>(&self, method: &str, params: &P) -> Result<R, BotError>
    where
        P: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.method_url(method))
            .json(params)
            .send()
            .await
            .map_err(|e| BotError::Transport(e.without_url().to_string()))?;

        let envelope: ApiEnvelope<R> = response
            .json()
            .await
            .map_err(|e| BotError::Decode(e.without_url().to_string()))?;

        unwrap_envelope(envelope)
    }
}

fn unwrap_envelope<R>(envelope: ApiEnvelope<R>) -> Result<R, BotError> {
    if !envelope.ok {
        return Err(BotError::Api {
            code: envelope.error_code.unwrap_or_default(),
            description: envelope
                .description
                .unwrap_or_else(|| "unknown error".to_string()),
        });
    }
    envelope
        .result
        .ok_or_else(|| BotError::Decode("missing result".to_string()))
}

#[async_trait]
impl BotApi for TelegramBotApi {
    async fn get_me(&self) -> Result<User, BotError> {
        self.call("getMe", &json!({})).await
    }

    async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout: Duration,
    ) -> Result<Vec<Update>, BotError> {
        let params = json!({
            "offset": offset,
            "timeout": timeout.as_secs(),
            "allowed_updates": ALLOWED_UPDATES,
        });
        self.call("getUpdates", &params).await
    }

    async fn send_message(&self, message: &SendMessage) -> Result<(), BotError> {
        // Result is the sent Message; only success matters here
        let _: serde_json::Value = self.call("sendMessage", message).await?;
        Ok(())
    }
}
