use thiserror::Error;

#[derive(Debug, Error)]
pub enum HallError {
    #[error("not initialized: run 'hall init'")]
    NotInitialized,

    #[error("invalid slot sequence: expected {expected} entries, got {actual}")]
    InvalidSlotCount { expected: usize, actual: usize },

    #[error("invalid hour {0}: must be between 0 and 23")]
    InvalidHour(u32),

    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("schedule is invalid: {0}")]
    Validation(String),

    #[error("schedule not found for {0}")]
    ScheduleNotFound(String),

    #[error("unknown staff member '{0}': not in the roster")]
    UnknownStaff(String),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("not logged in: run 'hall login'")]
    NotLoggedIn,

    #[error("permission denied: {0}")]
    Forbidden(String),

    #[error("store error: {0}")]
    Store(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HallError>;
