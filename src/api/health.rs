use axum::{extract::State, response::Json};
use serde_json::{Value, json};

use crate::api::AppState;

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let token = match state.credentials.snapshot().await {
        Some(current) => json!({
            "present": true,
            "grant": current.grant,
            "expired": current.token.is_expired(),
        }),
        None => json!({ "present": false }),
    };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "token": token,
    }))
}
