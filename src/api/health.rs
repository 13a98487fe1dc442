use axum::response::Json;
use serde_json::{Value, json};

use crate::config::APP_NAME;

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": APP_NAME,
        "version": env!("CARGO_PKG_VERSION")
    }))
}
