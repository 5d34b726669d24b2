use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Primary,
    Lead,
    Support,
}

impl Role {
    pub fn all() -> &'static [Role] {
        &[Role::Primary, Role::Lead, Role::Support]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Primary => "primary",
            Role::Lead => "lead",
            Role::Support => "support",
        }
    }

    /// Label used on the venue's printed schedules.
    pub fn local_label(self) -> &'static str {
        match self {
            Role::Primary => "备档",
            Role::Lead => "主档",
            Role::Support => "陪档",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Slot
// ---------------------------------------------------------------------------

/// One hour of the schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub primary: String,
    #[serde(default)]
    pub lead: String,
    #[serde(default)]
    pub support: String,
}

impl Slot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, role: Role) -> &str {
        match role {
            Role::Primary => &self.primary,
            Role::Lead => &self.lead,
            Role::Support => &self.support,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.lead.is_empty() && self.support.is_empty()
    }
}

pub fn empty_slot() -> Slot {
    Slot::empty()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
