use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::{Extension, Json};
use hall_core::auth::Session;
use hall_core::rotation::Hour;
use hall_core::schedule::{parse_date, Schedule};
use hall_core::store;
use hall_core::HallError;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/schedules: every stored schedule, oldest date first.
pub async fn list_schedules(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.store.clone();
    let result = tokio::task::spawn_blocking(move || {
        let schedules = store.list()?;
        let list: Vec<serde_json::Value> = schedules
            .iter()
            .map(|s| {
                let assigned = s.primary_column().iter().filter(|p| !p.is_empty()).count();
                serde_json::json!({
                    "id": s.id,
                    "date": s.date,
                    "status": s.status,
                    "assigned_hours": assigned,
                    "updated_at": s.updated_at,
                })
            })
            .collect();
        Ok::<_, HallError>(serde_json::json!(list))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// GET /api/schedules/:date: stored schedule, or an unsaved empty draft.
pub async fn get_schedule(
    State(app): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Schedule>, AppError> {
    let Path(date) = path?;
    let date = parse_date(&date)?;
    let store = app.store.clone();
    let result = tokio::task::spawn_blocking(move || store::load_or_empty(store.as_ref(), date))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
pub struct SetSlotBody {
    pub name: String,
    #[serde(default)]
    pub force: bool,
}

/// PUT /api/schedules/:date/slots/:hour: set an hour's primary, rederive, save.
pub async fn set_slot(
    State(app): State<AppState>,
    Extension(session): Extension<Session>,
    path: Result<Path<(String, u32)>, PathRejection>,
    body: Result<Json<SetSlotBody>, JsonRejection>,
) -> Result<Json<Schedule>, AppError> {
    session.require_admin("edit schedules")?;
    let Path((date, hour)) = path?;
    let Json(body) = body?;
    let date = parse_date(&date)?;
    let hour = Hour::new(hour)?;
    if !body.force {
        app.config.check_staff(&body.name)?;
    }

    let _edit = app.edit_lock.lock().await;
    let store = app.store.clone();
    let result = tokio::task::spawn_blocking(move || {
        let current = store::load_or_empty(store.as_ref(), date)?;
        let updated = current.set_primary(hour, body.name)?;
        store::save(store.as_ref(), &updated)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// POST /api/schedules/:date/clear: reset every hour to empty and save.
pub async fn clear_schedule(
    State(app): State<AppState>,
    Extension(session): Extension<Session>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Schedule>, AppError> {
    session.require_admin("clear schedules")?;
    let Path(date) = path?;
    let date = parse_date(&date)?;

    let _edit = app.edit_lock.lock().await;
    let store = app.store.clone();
    let result = tokio::task::spawn_blocking(move || {
        let current = store::load_or_empty(store.as_ref(), date)?;
        store::save(store.as_ref(), &current.clear())
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// DELETE /api/schedules/:date: remove the stored schedule.
pub async fn delete_schedule(
    State(app): State<AppState>,
    Extension(session): Extension<Session>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    session.require_admin("delete schedules")?;
    let Path(date) = path?;
    let date_str = date.clone();
    let date = parse_date(&date)?;

    let _edit = app.edit_lock.lock().await;
    let store = app.store.clone();
    let removed = tokio::task::spawn_blocking(move || store.delete(date))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    if !removed {
        return Err(HallError::ScheduleNotFound(date_str).into());
    }
    Ok(Json(serde_json::json!({ "date": date_str, "deleted": true })))
}

/// GET /api/schedules/:date/assignments/:name: hours and roles for one staff member.
pub async fn get_assignments(
    State(app): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Path((date, name)) = path?;
    let day = parse_date(&date)?;
    let store = app.store.clone();
    let result = tokio::task::spawn_blocking(move || {
        let schedule = store::load_or_empty(store.as_ref(), day)?;
        let assignments = schedule.assignments_for(&name);
        Ok::<_, HallError>(serde_json::json!({
            "date": date,
            "name": name,
            "assignments": assignments,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
