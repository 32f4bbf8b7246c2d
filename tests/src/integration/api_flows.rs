//! # API Flows Over a Real Socket
//!
//! Starts `MiniAppService` on an ephemeral port and drives it with an HTTP
//! client, the way the mini app front end does.

#[cfg(test)]
mod tests {
    use crate::fixtures::{secret, signed, to_json, to_query, TEST_SECRET};
    use miniapp_api::{ApiConfig, MiniAppService};
    use miniapp_auth::BotSecret;
    use serde_json::{json, Value};
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;
    use tokio::task::JoinHandle;

    struct RunningApi {
        addr: SocketAddr,
        shutdown: Option<oneshot::Sender<()>>,
        handle: JoinHandle<()>,
    }

    impl RunningApi {
        async fn start(config: ApiConfig) -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let (tx, rx) = oneshot::channel::<()>();

            let service = MiniAppService::new(config).unwrap();
            let handle = tokio::spawn(async move {
                service
                    .serve_on(listener, async {
                        let _ = rx.await;
                    })
                    .await
                    .unwrap();
            });

            Self {
                addr,
                shutdown: Some(tx),
                handle,
            }
        }

        fn url(&self, path: &str) -> String {
            format!("http://{}{}", self.addr, path)
        }

        async fn post(&self, path: &str, body: Value) -> (u16, Value) {
            let response = reqwest::Client::new()
                .post(self.url(path))
                .json(&body)
                .send()
                .await
                .unwrap();
            let status = response.status().as_u16();
            (status, response.json().await.unwrap_or(Value::Null))
        }

        async fn get(&self, path: &str) -> (u16, Value) {
            let response = reqwest::get(self.url(path)).await.unwrap();
            let status = response.status().as_u16();
            (status, response.json().await.unwrap_or(Value::Null))
        }

        async fn stop(mut self) {
            if let Some(tx) = self.shutdown.take() {
                let _ = tx.send(());
            }
            self.handle.await.unwrap();
        }
    }

    fn configured() -> ApiConfig {
        ApiConfig {
            bot_token: BotSecret::new(TEST_SECRET),
            ..ApiConfig::default()
        }
    }

    #[tokio::test]
    async fn test_init_flow_accepts_object_and_query_forms() {
        let api = RunningApi::start(configured()).await;
        let data = signed(r#"{"id":1,"first_name":"Ada"}"#, &secret());

        let (status, body) = api
            .post("/api/init", json!({ "initData": to_json(&data) }))
            .await;
        assert_eq!(status, 200);
        assert_eq!(body["data"]["user"], json!({ "id": 1, "first_name": "Ada" }));

        let (status, body) = api
            .post("/api/init", json!({ "initData": to_query(&data) }))
            .await;
        assert_eq!(status, 200);
        assert_eq!(body["success"], true);

        api.stop().await;
    }

    #[tokio::test]
    async fn test_init_flow_rejections() {
        let api = RunningApi::start(configured()).await;

        // Signed with another bot's token
        let foreign = signed(r#"{"id":1}"#, &BotSecret::new("OTHERSECRET"));
        let (status, body) = api
            .post("/api/init", json!({ "initData": to_json(&foreign) }))
            .await;
        assert_eq!(status, 401);
        assert_eq!(body["code"], "AUTH_INVALID");

        // Valid signature over an undecodable user
        let broken = signed("{\"id\":", &secret());
        let (status, body) = api
            .post("/api/init", json!({ "initData": to_json(&broken) }))
            .await;
        assert_eq!(status, 500);
        assert_eq!(body["code"], "DECODE_ERROR");

        // No hash at all
        let (status, _) = api
            .post("/api/init", json!({ "initData": { "query_id": "AAA" } }))
            .await;
        assert_eq!(status, 401);

        let (_, metrics) = api.get("/metrics").await;
        assert_eq!(metrics["init"]["rejected"], 2);
        assert_eq!(metrics["init"]["decode_errors"], 1);

        api.stop().await;
    }

    #[tokio::test]
    async fn test_unconfigured_token_rejects_valid_payloads() {
        let api = RunningApi::start(ApiConfig::default()).await;
        let data = signed(r#"{"id":1}"#, &secret());

        let (status, _) = api
            .post("/api/init", json!({ "initData": to_json(&data) }))
            .await;
        assert_eq!(status, 401);

        api.stop().await;
    }

    #[tokio::test]
    async fn test_auxiliary_endpoints() {
        let api = RunningApi::start(configured()).await;

        let (status, body) = api
            .post("/api/send-message", json!({ "chat_id": 123, "message": "Hello" }))
            .await;
        assert_eq!(status, 200);
        assert_eq!(body["data"]["chat_id"], 123);

        let (status, body) = api.get("/api/user-data?user_id=7&username=ada").await;
        assert_eq!(status, 200);
        assert_eq!(body["user"]["username"], "ada");
        assert_eq!(body["user"]["last_name"], Value::Null);

        let (status, body) = api.get("/health").await;
        assert_eq!(status, 200);
        assert_eq!(body["service"], "Telegram Mini App API");

        let (_, body) = api.get("/api/info").await;
        assert!(body["endpoints"].as_array().unwrap().len() >= 6);

        api.stop().await;
    }

    #[tokio::test]
    async fn test_static_assets_served() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log('mini app');").unwrap();

        let mut config = configured();
        config.features.static_dir = Some(dir.path().to_path_buf());
        let api = RunningApi::start(config).await;

        let response = reqwest::get(api.url("/static/app.js")).await.unwrap();
        assert_eq!(response.status().as_u16(), 200);
        assert!(response.text().await.unwrap().contains("mini app"));

        let response = reqwest::get(api.url("/static/missing.js")).await.unwrap();
        assert_eq!(response.status().as_u16(), 404);

        api.stop().await;
    }
}
