//! Long-polling loop.
//!
//! One task: learn the bot's own username, then fetch a batch, handle its
//! updates in order, advance the offset, repeat until shutdown. Failed calls
//! are logged and retried after a fixed pause.

use crate::config::BotConfig;
use crate::domain::{Action, BotError, Router, Update, User};
use crate::ports::BotApi;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Bot polling service
pub struct BotService<A: BotApi> {
    api: A,
    router: Router,
    poll_timeout: Duration,
    error_pause: Duration,
    offset: Option<i64>,
}

impl<A: BotApi> BotService<A> {
    pub fn new(api: A, config: &BotConfig) -> Self {
        Self {
            api,
            router: Router::new(config.webapp_url.clone()),
            poll_timeout: config.poll_timeout,
            error_pause: config.error_pause,
            offset: None,
        }
    }

    /// Offset the next `getUpdates` call will send
    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Ask the Bot API who we are and remember the username for routing.
    pub async fn identify(&mut self) -> Result<User, BotError> {
        let me = self.api.get_me().await?;
        if let Some(username) = &me.username {
            self.router.set_username(username.clone());
        }
        Ok(me)
    }

    /// Answer a single update.
    ///
    /// A failed reply is logged and swallowed so one bad chat cannot stall
    /// the batch.
    pub async fn handle_update(&self, update: &Update) {
        let Some(action) = self.router.route(update) else {
            debug!(update_id = update.update_id, "Update ignored");
            return;
        };

        if let Action::WebAppData { data, .. } = &action {
            info!(update_id = update.update_id, data = %data, "Received web app data");
        }

        let reply = action.reply();
        if let Err(e) = self.api.send_message(reply).await {
            error!(
                update_id = update.update_id,
                chat_id = reply.chat_id,
                error = %e,
                "Failed to send reply"
            );
        }
    }

    /// Fetch and handle one batch; returns how many updates it held.
    pub async fn poll_once(&mut self) -> Result<usize, BotError> {
        let updates = self.api.get_updates(self.offset, self.poll_timeout).await?;

        for update in &updates {
            self.handle_update(update).await;
            let next = update.update_id + 1;
            if self.offset.map_or(true, |current| next > current) {
                self.offset = Some(next);
            }
        }

        Ok(updates.len())
    }

    /// Poll until `shutdown` resolves.
    ///
    /// Polling starts only once the bot knows its own username.
    pub async fn run<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!(webapp_url = %self.router.webapp_url(), "Starting Telegram Mini App Bot...");
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Bot stopped");
                    return;
                }
                result = self.identify() => match result {
                    Ok(me) => {
                        info!(bot_id = me.id, username = ?me.username, "Bot identified");
                        break;
                    }
                    Err(e) => {
                        warn!(error = %e, pause_secs = self.error_pause.as_secs(), "getMe failed");
                    }
                },
            }
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Bot stopped");
                    return;
                }
                _ = tokio::time::sleep(self.error_pause) => {}
            }
        }

        self.poll_until(shutdown.as_mut()).await;
        info!("Bot stopped");
    }

    async fn poll_until<F>(&mut self, mut shutdown: Pin<&mut F>)
    where
        F: Future<Output = ()>,
    {
        loop {
            tokio::select! {
                _ = shutdown.as_mut() => return,
                result = self.poll_once() => match result {
                    Ok(0) => {}
                    Ok(count) => debug!(count, offset = ?self.offset, "Handled updates"),
                    Err(e) => {
                        warn!(error = %e, pause_secs = self.error_pause.as_secs(), "Polling failed");
                        tokio::select! {
                            _ = shutdown.as_mut() => return,
                            _ = tokio::time::sleep(self.error_pause) => {}
                        }
                    }
                },
            }
        }
    }
}
