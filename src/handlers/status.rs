use axum::Json;
use serde_json::{json, Value};

pub async fn index() -> Json<Value> {
    Json(json!({ "message": "Bienvenue" }))
}

pub async fn status() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}
