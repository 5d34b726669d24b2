use hall_core::auth::Session;
use hall_core::config::Config;
use hall_core::store::{self, ScheduleStore};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Shared application state passed to all route handlers.
///
/// The store is opened once: the embedded database backend holds an exclusive
/// lock on its file for the life of the process.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    pub config: Arc<Config>,
    pub store: Arc<dyn ScheduleStore>,
    /// Active sessions keyed by bearer token.
    pub sessions: Arc<RwLock<HashMap<String, Session>>>,
    /// Held across every load-modify-save so concurrent edits of one date
    /// never save over each other.
    pub edit_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn open(root: PathBuf) -> hall_core::Result<Self> {
        let config = Config::load(&root)?;
        for w in config.validate() {
            tracing::warn!(level = ?w.level, "config: {}", w.message);
        }
        let store = store::open(&root, &config)?;
        Ok(Self::with_store(root, config, Arc::from(store)))
    }

    pub fn with_store(root: PathBuf, config: Config, store: Arc<dyn ScheduleStore>) -> Self {
        Self {
            root,
            config: Arc::new(config),
            store,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            edit_lock: Arc::new(Mutex::new(())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn open_requires_config() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            AppState::open(dir.path().to_path_buf()),
            Err(hall_core::HallError::NotInitialized)
        ));
    }

    #[test]
    fn open_stores_root_and_config() {
        let dir = TempDir::new().unwrap();
        Config::new("test-hall").save(dir.path()).unwrap();
        let state = AppState::open(dir.path().to_path_buf()).unwrap();
        assert_eq!(state.root, dir.path());
        assert_eq!(state.config.venue, "test-hall");
    }
}
