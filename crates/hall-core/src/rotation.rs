//! Lead/support derivation for the 24-hour rotation.
//!
//! Each hour's lead is whoever held primary one hour earlier, and its support
//! is whoever held primary two hours earlier. The day is treated as cyclic:
//! hours 0 and 1 read back into hours 22 and 23 of the same buffer.

use crate::error::{HallError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const HOURS_PER_DAY: usize = 24;

// ---------------------------------------------------------------------------
// Hour
// ---------------------------------------------------------------------------

/// A local clock hour in `0..=23`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Hour(u8);

impl Hour {
    pub fn new(hour: u32) -> Result<Self> {
        if (hour as usize) < HOURS_PER_DAY {
            Ok(Self(hour as u8))
        } else {
            Err(HallError::InvalidHour(hour))
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn all() -> impl Iterator<Item = Hour> {
        (0..HOURS_PER_DAY as u8).map(Hour)
    }

    /// The hour before this one, wrapping 0 to 23.
    pub fn prev1(self) -> Hour {
        Hour(prev1(self.index()) as u8)
    }

    /// Two hours before this one, wrapping 0 to 22 and 1 to 23.
    pub fn prev2(self) -> Hour {
        Hour(prev2(self.index()) as u8)
    }
}

impl TryFrom<u32> for Hour {
    type Error = HallError;

    fn try_from(value: u32) -> Result<Self> {
        Hour::new(value)
    }
}

impl From<Hour> for u32 {
    fn from(hour: Hour) -> u32 {
        hour.0 as u32
    }
}

impl fmt::Display for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

// ---------------------------------------------------------------------------
// Lookback
// ---------------------------------------------------------------------------

fn prev1(i: usize) -> usize {
    if i == 0 {
        HOURS_PER_DAY - 1
    } else {
        i - 1
    }
}

fn prev2(i: usize) -> usize {
    match i {
        0 => HOURS_PER_DAY - 2,
        1 => HOURS_PER_DAY - 1,
        _ => i - 2,
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Derived roles for one hour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Derived {
    pub lead: String,
    pub support: String,
}

/// Compute lead and support for all 24 hours from the primary column.
/// The whole day is recomputed on every call.
pub fn derive_rotation<S: AsRef<str>>(primary: &[S]) -> Result<Vec<Derived>> {
    if primary.len() != HOURS_PER_DAY {
        return Err(HallError::InvalidSlotCount {
            expected: HOURS_PER_DAY,
            actual: primary.len(),
        });
    }

    let at = |hour: Hour| primary[hour.index()].as_ref().to_string();
    Ok(Hour::all()
        .map(|hour| Derived {
            lead: at(hour.prev1()),
            support: at(hour.prev2()),
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn column(entries: &[(usize, &str)]) -> Vec<String> {
        let mut primary = vec![String::new(); HOURS_PER_DAY];
        for (i, name) in entries {
            primary[*i] = name.to_string();
        }
        primary
    }

    fn named_column() -> Vec<String> {
        (0..HOURS_PER_DAY).map(|i| format!("p{i}")).collect()
    }

    #[test]
    fn lead_is_previous_hour_with_wraparound() {
        let primary = named_column();
        let derived = derive_rotation(&primary).unwrap();
        for i in 0..HOURS_PER_DAY {
            assert_eq!(
                derived[i].lead,
                primary[(i + HOURS_PER_DAY - 1) % HOURS_PER_DAY],
                "lead at hour {i}"
            );
        }
    }

    #[test]
    fn support_is_two_hours_back_with_wraparound() {
        let primary = named_column();
        let derived = derive_rotation(&primary).unwrap();
        assert_eq!(derived[0].support, primary[22]);
        assert_eq!(derived[1].support, primary[23]);
        for i in 2..HOURS_PER_DAY {
            assert_eq!(derived[i].support, primary[i - 2], "support at hour {i}");
        }
    }

    #[test]
    fn derivation_is_deterministic() {
        let primary = column(&[(3, "小明"), (4, "小红"), (23, "阿翠")]);
        assert_eq!(
            derive_rotation(&primary).unwrap(),
            derive_rotation(&primary).unwrap()
        );
    }

    #[test]
    fn single_primary_at_midnight() {
        let derived = derive_rotation(&column(&[(0, "A")])).unwrap();
        for (i, d) in derived.iter().enumerate() {
            let lead = if i == 1 { "A" } else { "" };
            let support = if i == 2 { "A" } else { "" };
            assert_eq!(d.lead, lead, "lead at hour {i}");
            assert_eq!(d.support, support, "support at hour {i}");
        }
    }

    #[test]
    fn last_hour_wraps_into_first_two() {
        let derived = derive_rotation(&column(&[(23, "Z")])).unwrap();
        for (i, d) in derived.iter().enumerate() {
            let lead = if i == 0 { "Z" } else { "" };
            let support = if i == 1 { "Z" } else { "" };
            assert_eq!(d.lead, lead, "lead at hour {i}");
            assert_eq!(d.support, support, "support at hour {i}");
        }
    }

    #[test]
    fn hour_22_feeds_support_at_midnight_and_lead_at_23() {
        let derived = derive_rotation(&column(&[(22, "Y")])).unwrap();
        for (i, d) in derived.iter().enumerate() {
            let lead = if i == 23 { "Y" } else { "" };
            let support = if i == 0 { "Y" } else { "" };
            assert_eq!(d.lead, lead, "lead at hour {i}");
            assert_eq!(d.support, support, "support at hour {i}");
        }
    }

    #[test]
    fn empty_column_derives_empty_strings() {
        let derived = derive_rotation(&column(&[])).unwrap();
        assert_eq!(derived.len(), HOURS_PER_DAY);
        assert!(derived.iter().all(|d| d.lead.is_empty() && d.support.is_empty()));
    }

    #[test]
    fn wrong_length_is_invalid_input() {
        for len in [0, 23, 25] {
            let primary = vec![String::new(); len];
            let err = derive_rotation(&primary).unwrap_err();
            assert!(
                matches!(err, HallError::InvalidSlotCount { expected: 24, actual } if actual == len),
                "len {len}: {err}"
            );
        }
    }

    #[test]
    fn hour_bounds() {
        assert!(Hour::new(0).is_ok());
        assert!(Hour::new(23).is_ok());
        assert!(matches!(Hour::new(24), Err(HallError::InvalidHour(24))));
        assert_eq!(Hour::all().count(), HOURS_PER_DAY);
    }

    #[test]
    fn hour_lookback_matches_rule() {
        let h0 = Hour::new(0).unwrap();
        let h1 = Hour::new(1).unwrap();
        let h7 = Hour::new(7).unwrap();
        assert_eq!(h0.prev1().index(), 23);
        assert_eq!(h0.prev2().index(), 22);
        assert_eq!(h1.prev1().index(), 0);
        assert_eq!(h1.prev2().index(), 23);
        assert_eq!(h7.prev1().index(), 6);
        assert_eq!(h7.prev2().index(), 5);
    }

    #[test]
    fn hour_displays_as_clock_time() {
        assert_eq!(Hour::new(9).unwrap().to_string(), "09:00");
        assert_eq!(Hour::new(23).unwrap().to_string(), "23:00");
    }
}
