use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Reports liveness plus the judge model and JD directory this instance scores with.
/// Does not call the judge.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "matchmaker-api",
        "judge_model": state.config.judge_model,
        "jd_dir": state.config.jd_dir.display().to_string(),
    }))
}
