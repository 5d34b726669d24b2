use crate::error::{HallError, Result};
use crate::rotation::{derive_rotation, Hour, HOURS_PER_DAY};
use crate::slot::{Role, Slot};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ScheduleStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    #[default]
    Draft,
    Published,
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScheduleStatus::Draft => "draft",
            ScheduleStatus::Published => "published",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

/// One (hour, role) pairing for a staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub hour: Hour,
    pub role: Role,
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub status: ScheduleStatus,
    pub slots: Vec<Slot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Schedule {
    /// A fresh, unsaved schedule for `date` with 24 empty slots.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            id: None,
            date: Some(date),
            status: ScheduleStatus::Draft,
            slots: vec![Slot::empty(); HOURS_PER_DAY],
            created_at: None,
            updated_at: None,
        }
    }

    pub fn primary_column(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.primary.as_str()).collect()
    }

    pub fn slot(&self, hour: Hour) -> Option<&Slot> {
        self.slots.get(hour.index())
    }

    // ---------------------------------------------------------------------------
    // Mutations (each returns a new value)
    // ---------------------------------------------------------------------------

    /// Set the primary for `hour` and rederive every lead/support.
    pub fn set_primary(&self, hour: Hour, name: impl Into<String>) -> Result<Self> {
        let mut next = self.clone();
        let slot = next
            .slots
            .get_mut(hour.index())
            .ok_or(HallError::InvalidSlotCount {
                expected: HOURS_PER_DAY,
                actual: self.slots.len(),
            })?;
        slot.primary = name.into();
        next.rederive()?;
        Ok(next)
    }

    /// Reset all 24 slots to empty. Identity, date and status are kept.
    pub fn clear(&self) -> Self {
        Self {
            slots: vec![Slot::empty(); HOURS_PER_DAY],
            ..self.clone()
        }
    }

    /// Recompute lead/support from the stored primary column, discarding
    /// whatever derived values were there.
    pub fn rederived(mut self) -> Result<Self> {
        self.rederive()?;
        Ok(self)
    }

    fn rederive(&mut self) -> Result<()> {
        let derived = derive_rotation(&self.primary_column())?;
        for (slot, d) in self.slots.iter_mut().zip(derived) {
            slot.lead = d.lead;
            slot.support = d.support;
        }
        Ok(())
    }

    pub fn with_status(self, status: ScheduleStatus) -> Self {
        Self { status, ..self }
    }

    // ---------------------------------------------------------------------------
    // Validation
    // ---------------------------------------------------------------------------

    pub fn validate(&self) -> Result<()> {
        if self.slots.len() != HOURS_PER_DAY {
            return Err(HallError::Validation(format!(
                "expected {HOURS_PER_DAY} slots, found {}",
                self.slots.len()
            )));
        }
        if self.date.is_none() {
            return Err(HallError::Validation("date is missing".to_string()));
        }
        Ok(())
    }

    // ---------------------------------------------------------------------------
    // Views
    // ---------------------------------------------------------------------------

    /// Every hour and role at which `name` appears, in hour order.
    pub fn assignments_for(&self, name: &str) -> Vec<Assignment> {
        if name.is_empty() {
            return Vec::new();
        }
        Hour::all()
            .filter_map(|hour| self.slot(hour).map(|slot| (hour, slot)))
            .flat_map(|(hour, slot)| {
                Role::all()
                    .iter()
                    .filter(move |role| slot.get(**role) == name)
                    .map(move |role| Assignment { hour, role: *role })
            })
            .collect()
    }

    /// Twelve display rows pairing hour `h` with hour `h + 12`.
    pub fn rows() -> Vec<(Hour, Hour)> {
        let half = HOURS_PER_DAY / 2;
        Hour::all()
            .take(half)
            .zip(Hour::all().skip(half))
            .collect()
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| HallError::InvalidDate(s.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn hour(h: u32) -> Hour {
        Hour::new(h).unwrap()
    }

    #[test]
    fn empty_schedule_is_valid_draft() {
        let s = Schedule::empty(day());
        assert_eq!(s.slots.len(), 24);
        assert_eq!(s.status, ScheduleStatus::Draft);
        assert!(s.id.is_none());
        assert!(s.slots.iter().all(Slot::is_empty));
        s.validate().unwrap();
    }

    #[test]
    fn set_primary_rederives_neighbours() {
        let s = Schedule::empty(day())
            .set_primary(hour(10), "小明")
            .unwrap();
        assert_eq!(s.slots[10].primary, "小明");
        assert_eq!(s.slots[11].lead, "小明");
        assert_eq!(s.slots[12].support, "小明");
        let touched: Vec<usize> = s
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.is_empty())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(touched, vec![10, 11, 12]);
    }

    #[test]
    fn set_primary_does_not_mutate_input() {
        let original = Schedule::empty(day());
        let _ = original.set_primary(hour(3), "小红").unwrap();
        assert!(original.slots.iter().all(Slot::is_empty));
    }

    #[test]
    fn set_primary_at_late_hours_wraps_to_morning() {
        let s = Schedule::empty(day())
            .set_primary(hour(23), "Z")
            .unwrap()
            .set_primary(hour(22), "Y")
            .unwrap();
        assert_eq!(s.slots[0].lead, "Z");
        assert_eq!(s.slots[0].support, "Y");
        assert_eq!(s.slots[1].support, "Z");
        assert_eq!(s.slots[23].lead, "Y");
    }

    #[test]
    fn noop_set_primary_leaves_derived_roles_unchanged() {
        let s = Schedule::empty(day())
            .set_primary(hour(5), "阿翠")
            .unwrap()
            .set_primary(hour(6), "张三")
            .unwrap();
        let again = s.set_primary(hour(5), "阿翠").unwrap();
        assert_eq!(s.slots, again.slots);
    }

    #[test]
    fn replacing_primary_updates_dependents() {
        let s = Schedule::empty(day())
            .set_primary(hour(8), "小明")
            .unwrap()
            .set_primary(hour(8), "李四")
            .unwrap();
        assert_eq!(s.slots[9].lead, "李四");
        assert_eq!(s.slots[10].support, "李四");
    }

    #[test]
    fn clear_is_idempotent_and_keeps_identity() {
        let mut s = Schedule::empty(day())
            .set_primary(hour(1), "小明")
            .unwrap()
            .with_status(ScheduleStatus::Published);
        s.id = Some("abc".to_string());

        let once = s.clear();
        let twice = once.clear();
        assert_eq!(once, twice);
        assert!(once.slots.iter().all(Slot::is_empty));
        assert_eq!(once.id.as_deref(), Some("abc"));
        assert_eq!(once.date, Some(day()));
        assert_eq!(once.status, ScheduleStatus::Published);
    }

    #[test]
    fn clear_restores_slot_count() {
        let mut s = Schedule::empty(day());
        s.slots.truncate(5);
        assert_eq!(s.clear().slots.len(), 24);
    }

    #[test]
    fn validate_rejects_wrong_slot_count() {
        let mut s = Schedule::empty(day());
        s.slots.push(Slot::empty());
        assert!(matches!(s.validate(), Err(HallError::Validation(_))));
    }

    #[test]
    fn validate_rejects_missing_date() {
        let mut s = Schedule::empty(day());
        s.date = None;
        let err = s.validate().unwrap_err();
        assert!(err.to_string().contains("date is missing"));
    }

    #[test]
    fn set_primary_on_short_schedule_is_invalid_input() {
        let mut s = Schedule::empty(day());
        s.slots.truncate(23);
        let err = s.set_primary(hour(2), "小明").unwrap_err();
        assert!(matches!(
            err,
            HallError::InvalidSlotCount { expected: 24, actual: 23 }
        ));
    }

    #[test]
    fn rederived_discards_tampered_roles() {
        let mut s = Schedule::empty(day()).set_primary(hour(4), "小红").unwrap();
        s.slots[9].lead = "forged".to_string();
        s.slots[5].lead = String::new();
        let fixed = s.rederived().unwrap();
        assert_eq!(fixed.slots[9].lead, "");
        assert_eq!(fixed.slots[5].lead, "小红");
    }

    #[test]
    fn assignments_cover_all_three_roles() {
        let s = Schedule::empty(day())
            .set_primary(hour(14), "张三")
            .unwrap();
        let got = s.assignments_for("张三");
        assert_eq!(
            got,
            vec![
                Assignment { hour: hour(14), role: Role::Primary },
                Assignment { hour: hour(15), role: Role::Lead },
                Assignment { hour: hour(16), role: Role::Support },
            ]
        );
        assert!(s.assignments_for("").is_empty());
        assert!(s.assignments_for("nobody").is_empty());
    }

    #[test]
    fn rows_pair_morning_and_evening() {
        let rows = Schedule::rows();
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0], (hour(0), hour(12)));
        assert_eq!(rows[11], (hour(11), hour(23)));
    }

    #[test]
    fn parse_date_accepts_iso_only() {
        assert_eq!(parse_date("2024-05-01").unwrap(), day());
        assert!(matches!(parse_date("05/01/2024"), Err(HallError::InvalidDate(_))));
    }

    #[test]
    fn yaml_roundtrip_keeps_status_and_slots() {
        let s = Schedule::empty(day())
            .set_primary(hour(0), "A")
            .unwrap()
            .with_status(ScheduleStatus::Published);
        let yaml = serde_yaml::to_string(&s).unwrap();
        assert!(yaml.contains("status: published"));
        let parsed: Schedule = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, s);
    }
}
