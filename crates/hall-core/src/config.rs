use crate::auth::AccountRole;
use crate::error::{HallError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// StoreBackend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// One YAML manifest per date under `.hall/schedules/`.
    #[default]
    Yaml,
    /// Embedded redb database at `.hall/hall.redb`.
    Redb,
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub password: String,
    pub role: AccountRole,
    pub display_name: String,
    /// Roster name this account works under, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff: Option<String>,
}

fn default_accounts() -> Vec<Account> {
    vec![
        Account {
            username: "1".to_string(),
            password: "111".to_string(),
            role: AccountRole::Admin,
            display_name: "系统管理员".to_string(),
            staff: None,
        },
        Account {
            username: "2".to_string(),
            password: "111".to_string(),
            role: AccountRole::Host,
            display_name: "主持人".to_string(),
            staff: None,
        },
    ]
}

fn default_roster() -> Vec<String> {
    ["小明", "小红", "阿翠", "张三", "李四"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_venue() -> String {
    "hall".to_string()
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_venue")]
    pub venue: String,
    #[serde(default = "default_roster")]
    pub roster: Vec<String>,
    #[serde(default = "default_accounts")]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub store: StoreBackend,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(default_venue())
    }
}

impl Config {
    pub fn new(venue: impl Into<String>) -> Self {
        Self {
            venue: venue.into(),
            roster: default_roster(),
            accounts: default_accounts(),
            store: StoreBackend::default(),
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(HallError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn on_roster(&self, name: &str) -> bool {
        self.roster.iter().any(|n| n == name)
    }

    /// Reject names that are not on the roster. Empty is always allowed: it
    /// unassigns the hour.
    pub fn check_staff(&self, name: &str) -> Result<()> {
        if name.is_empty() || self.on_roster(name) {
            Ok(())
        } else {
            Err(HallError::UnknownStaff(name.to_string()))
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.roster.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "roster is empty: no staff can be assigned".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for name in &self.roster {
            if name.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: "roster contains a blank name".to_string(),
                });
            } else if !seen.insert(name.as_str()) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("roster lists '{name}' more than once"),
                });
            }
        }

        let mut usernames = HashSet::new();
        for account in &self.accounts {
            if !usernames.insert(account.username.as_str()) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("duplicate account username '{}'", account.username),
                });
            }
            if let Some(staff) = account.staff.as_deref().filter(|s| !self.on_roster(s)) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "account '{}' is linked to '{staff}', who is not on the roster",
                        account.username
                    ),
                });
            }
        }

        if !self.accounts.iter().any(|a| a.role == AccountRole::Admin) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "no admin account: schedules cannot be edited".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
