//! Signed init-data payloads.

use miniapp_auth::{sign_init_data, BotSecret, InitData};
use serde_json::{Map, Value};

/// Bot token every fixture is signed with
pub const TEST_SECRET: &str = "TESTSECRET";

pub const TEST_AUTH_DATE: &str = "1700000000";

pub fn secret() -> BotSecret {
    BotSecret::new(TEST_SECRET)
}

/// Unsigned payload carrying `user`
pub fn payload(user: &str) -> InitData {
    InitData::new()
        .with("query_id", "AAA")
        .with("user", user)
        .with("auth_date", TEST_AUTH_DATE)
}

/// `payload(user)` plus the hash a platform holding `secret` would attach
pub fn signed(user: &str, secret: &BotSecret) -> InitData {
    let data = payload(user);
    match sign_init_data(&data, secret) {
        Ok(hash) => data.with("hash", hash),
        // Only an empty secret fails; leave the payload unsigned
        Err(_) => data,
    }
}

/// Payload with `extra` additional fields, for size-scaling benches
pub fn signed_with_fields(extra: usize, secret: &BotSecret) -> InitData {
    let mut data = payload(r#"{"id":1,"first_name":"Ada"}"#);
    for i in 0..extra {
        data.insert(format!("field_{i:02}"), format!("value-{i}"));
    }
    let hash = sign_init_data(&data, secret).unwrap_or_default();
    data.with("hash", hash)
}

/// JSON object form, as `{"initData": {...}}` carries it
pub fn to_json(data: &InitData) -> Value {
    let map: Map<String, Value> = data
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect();
    Value::Object(map)
}

/// URL-encoded form, as `Telegram.WebApp.initData` carries it
pub fn to_query(data: &InitData) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in data.iter() {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}
