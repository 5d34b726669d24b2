use axum::extract::State;
use axum::Json;

use crate::state::AppState;

/// GET /api/roster: staff names selectable for a primary slot.
pub async fn get_roster(State(app): State<AppState>) -> Json<Vec<String>> {
    Json(app.config.roster.clone())
}

/// GET /api/config: venue, store backend and roster. Accounts are omitted.
pub async fn get_config(State(app): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "venue": app.config.venue,
        "store": app.config.store,
        "roster": app.config.roster,
    }))
}
