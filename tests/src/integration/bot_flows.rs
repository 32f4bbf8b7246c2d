//! # Bot Flows Against a Fake Bot API
//!
//! Serves `getUpdates`/`sendMessage` from an in-process axum app and runs
//! the real `TelegramBotApi` client and `BotService` against it.

#[cfg(test)]
mod tests {
    use axum::extract::State;
    use axum::routing::post;
    use axum::{Json, Router};
    use miniapp_auth::BotSecret;
    use miniapp_bot::{BotApi, BotConfig, BotError, BotService, TelegramBotApi};
    use serde_json::{json, Value};
    use std::collections::VecDeque;
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::net::TcpListener;

    const TOKEN: &str = "TESTTOKEN";
    const WEBAPP_URL: &str = "https://app.example.com";

    #[derive(Default)]
    struct FakeBotApi {
        batches: Mutex<VecDeque<Value>>,
        offsets: Mutex<Vec<Value>>,
        sent: Mutex<Vec<Value>>,
    }

    async fn get_updates(
        State(fake): State<Arc<FakeBotApi>>,
        Json(params): Json<Value>,
    ) -> Json<Value> {
        fake.offsets.lock().unwrap().push(params["offset"].clone());
        let batch = fake.batches.lock().unwrap().pop_front();
        Json(json!({ "ok": true, "result": batch.unwrap_or_else(|| json!([])) }))
    }

    async fn send_message(
        State(fake): State<Arc<FakeBotApi>>,
        Json(params): Json<Value>,
    ) -> Json<Value> {
        fake.sent.lock().unwrap().push(params.clone());
        Json(json!({
            "ok": true,
            "result": { "message_id": 1, "chat": { "id": params["chat_id"] }, "date": 0 }
        }))
    }

    async fn get_me() -> Json<Value> {
        Json(json!({
            "ok": true,
            "result": { "id": 1, "is_bot": true, "first_name": "Mini App", "username": "MiniAppBot" }
        }))
    }

    async fn start_fake(fake: Arc<FakeBotApi>) -> SocketAddr {
        let app = Router::new()
            .route(&format!("/bot{TOKEN}/getMe"), post(get_me))
            .route(&format!("/bot{TOKEN}/getUpdates"), post(get_updates))
            .route(&format!("/bot{TOKEN}/sendMessage"), post(send_message))
            .with_state(fake);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn message(update_id: i64, body: Value) -> Value {
        let mut message = json!({
            "message_id": update_id,
            "date": 1700000000,
            "chat": { "id": 42, "type": "private" },
            "from": { "id": 7, "is_bot": false, "first_name": "Ada", "username": "ada" },
        });
        if let (Some(target), Some(extra)) = (message.as_object_mut(), body.as_object()) {
            target.extend(extra.clone());
        }
        json!({ "update_id": update_id, "message": message })
    }

    fn config(addr: SocketAddr) -> BotConfig {
        BotConfig {
            token: BotSecret::new(TOKEN),
            webapp_url: WEBAPP_URL.to_string(),
            api_base_url: format!("http://{addr}"),
            poll_timeout: Duration::from_secs(0),
            error_pause: Duration::from_millis(10),
        }
    }

    #[tokio::test]
    async fn test_bot_answers_a_batch() {
        let fake = Arc::new(FakeBotApi::default());
        fake.batches.lock().unwrap().push_back(json!([
            message(100, json!({ "text": "/start" })),
            message(101, json!({ "text": "hello" })),
            message(102, json!({ "text": "/unknown" })),
            message(103, json!({ "web_app_data": { "data": "{\"clicked\":true}", "button_text": "Send" } })),
            message(104, json!({ "text": "/start@SomeOtherBot" })),
        ]));
        let addr = start_fake(Arc::clone(&fake)).await;

        let config = config(addr);
        let api = TelegramBotApi::new(&config.api_base_url, config.token.clone(), config.poll_timeout)
            .unwrap();
        let mut service = BotService::new(api, &config);

        let me = service.identify().await.unwrap();
        assert_eq!(me.username.as_deref(), Some("MiniAppBot"));

        assert_eq!(service.poll_once().await.unwrap(), 5);
        assert_eq!(service.poll_once().await.unwrap(), 0);

        let offsets = fake.offsets.lock().unwrap().clone();
        assert_eq!(offsets, vec![Value::Null, json!(105)]);

        let sent = fake.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 3);
        assert_eq!(
            sent[0]["reply_markup"]["inline_keyboard"][0][0]["web_app"]["url"],
            WEBAPP_URL
        );
        assert_eq!(sent[1]["text"], "hello");
        assert!(sent[2]["text"]
            .as_str()
            .unwrap()
            .starts_with("✅ Data received from Mini App!"));
    }

    #[tokio::test]
    async fn test_api_error_surfaces() {
        let app = Router::new().route(
            &format!("/bot{TOKEN}/getUpdates"),
            post(|| async {
                Json(json!({ "ok": false, "error_code": 409, "description": "Conflict" }))
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let api = TelegramBotApi::new(
            format!("http://{addr}"),
            BotSecret::new(TOKEN),
            Duration::from_secs(0),
        )
        .unwrap();

        let err = api.get_updates(None, Duration::from_secs(0)).await.unwrap_err();
        assert_eq!(
            err,
            BotError::Api {
                code: 409,
                description: "Conflict".into()
            }
        );
    }

    #[tokio::test]
    async fn test_transport_error_hides_token() {
        // Nothing listens on the reserved discard port of localhost
        let api = TelegramBotApi::new(
            "http://127.0.0.1:9",
            BotSecret::new(TOKEN),
            Duration::from_secs(0),
        )
        .unwrap();

        let err = api.get_updates(None, Duration::from_secs(0)).await.unwrap_err();
        assert!(matches!(err, BotError::Transport(_)));
        assert!(!err.to_string().contains(TOKEN));
    }
}
