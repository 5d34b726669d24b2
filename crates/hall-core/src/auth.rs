//! Account login and the session context handed to every operation that
//! needs to know who is acting.

use crate::config::Config;
use crate::error::{HallError, Result};
use crate::paths;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// AccountRole
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    /// Hall administrator: edits and publishes schedules.
    Admin,
    /// Host: reads schedules and their own assignments.
    Host,
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AccountRole::Admin => "admin",
            AccountRole::Host => "host",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// User / Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub role: AccountRole,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.user.role == AccountRole::Admin
    }

    pub fn require_admin(&self, action: &str) -> Result<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(HallError::Forbidden(format!(
                "'{}' is a {} account and cannot {action}",
                self.user.username, self.user.role
            )))
        }
    }

    // ---------------------------------------------------------------------------
    // Persistence (CLI only; the server keeps sessions in memory)
    // ---------------------------------------------------------------------------

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::session_path(root);
        if !path.exists() {
            return Err(HallError::NotLoggedIn);
        }
        let data = std::fs::read_to_string(&path)?;
        let session: Session = serde_yaml::from_str(&data)?;
        Ok(session)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&paths::session_path(root), data.as_bytes())
    }

    /// Remove the stored session. Returns false if nobody was logged in.
    pub fn clear(root: &Path) -> Result<bool> {
        crate::io::remove_if_exists(&paths::session_path(root))
    }
}

/// Check `username`/`password` against the configured accounts.
pub fn authenticate(config: &Config, username: &str, password: &str) -> Result<Session> {
    let found = config
        .accounts
        .iter()
        .enumerate()
        .find(|(_, a)| a.username == username && a.password == password);

    let Some((index, account)) = found else {
        tracing::warn!(username, "rejected login");
        return Err(HallError::InvalidCredentials);
    };

    tracing::info!(username, role = %account.role, "login");
    Ok(Session {
        user: User {
            id: (index + 1).to_string(),
            username: account.username.clone(),
            role: account.role,
            display_name: account.display_name.clone(),
            staff: account.staff.clone(),
        },
        token: Uuid::new_v4().to_string(),
        issued_at: Utc::now(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_accounts_authenticate() {
        let cfg = Config::default();
        let admin = authenticate(&cfg, "1", "111").unwrap();
        assert_eq!(admin.user.role, AccountRole::Admin);
        assert_eq!(admin.user.id, "1");
        assert!(admin.is_admin());

        let host = authenticate(&cfg, "2", "111").unwrap();
        assert_eq!(host.user.role, AccountRole::Host);
        assert_eq!(host.user.display_name, "主持人");
        assert_ne!(admin.token, host.token);
        assert_eq!(host.user.staff, None);
    }

    #[test]
    fn session_carries_staff_link() {
        let mut cfg = Config::default();
        cfg.accounts[1].staff = Some("李四".to_string());
        let host = authenticate(&cfg, "2", "111").unwrap();
        assert_eq!(host.user.staff.as_deref(), Some("李四"));
    }

    #[test]
    fn wrong_password_is_rejected() {
        let cfg = Config::default();
        for (user, pass) in [("1", "112"), ("3", "111"), ("", "")] {
            assert!(matches!(
                authenticate(&cfg, user, pass),
                Err(HallError::InvalidCredentials)
            ));
        }
    }

    #[test]
    fn host_cannot_edit() {
        let host = authenticate(&Config::default(), "2", "111").unwrap();
        let err = host.require_admin("edit schedules").unwrap_err();
        assert!(matches!(err, HallError::Forbidden(_)));
        assert!(err.to_string().contains("host account"));
    }

    #[test]
    fn session_file_lifecycle() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(Session::load(dir.path()), Err(HallError::NotLoggedIn)));

        let session = authenticate(&Config::default(), "1", "111").unwrap();
        session.save(dir.path()).unwrap();
        assert_eq!(Session::load(dir.path()).unwrap(), session);

        assert!(Session::clear(dir.path()).unwrap());
        assert!(!Session::clear(dir.path()).unwrap());
    }
}
