use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hall_core::error::HallError;

// ---------------------------------------------------------------------------
// AppError: unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    pub fn status(&self) -> StatusCode {
        // Extractor rejections keep the status axum chose for them
        if let Some(r) = self.0.downcast_ref::<JsonRejection>() {
            return r.status();
        }
        if let Some(r) = self.0.downcast_ref::<PathRejection>() {
            return r.status();
        }
        let Some(e) = self.0.downcast_ref::<HallError>() else {
            return StatusCode::INTERNAL_SERVER_ERROR;
        };
        match e {
            HallError::NotInitialized => StatusCode::SERVICE_UNAVAILABLE,
            HallError::ScheduleNotFound(_) => StatusCode::NOT_FOUND,
            HallError::InvalidSlotCount { .. }
            | HallError::InvalidHour(_)
            | HallError::InvalidDate(_)
            | HallError::UnknownStaff(_) => StatusCode::BAD_REQUEST,
            HallError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            HallError::InvalidCredentials | HallError::NotLoggedIn => StatusCode::UNAUTHORIZED,
            HallError::Forbidden(_) => StatusCode::FORBIDDEN,
            HallError::Store(_) | HallError::Io(_) | HallError::Yaml(_) | HallError::Json(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_not_found_maps_to_404() {
        let err = AppError::from(HallError::ScheduleNotFound("2024-06-01".into()));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_hour_maps_to_400() {
        let err = AppError::from(HallError::InvalidHour(24));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn forbidden_maps_to_403() {
        let err = AppError::from(HallError::Forbidden("host".into()));
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn credentials_map_to_401() {
        let err = AppError::from(HallError::InvalidCredentials);
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn validation_maps_to_422() {
        let err = AppError::from(HallError::Validation("date is missing".into()));
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn foreign_error_maps_to_500() {
        let err = AppError(anyhow::anyhow!("boom"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
