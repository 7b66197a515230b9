//! Missionaries and cannibals.
//!
//! Counts are kept for the left (start) bank; the right bank holds the
//! remainder of each total. A bank is safe when it has no missionaries or at
//! least as many missionaries as cannibals.

use std::fmt;

/// Largest supported head count per group.
pub const MAX_PER_GROUP: u32 = 50;

/// Boat loads tried in successor order: `(missionaries, cannibals)`.
pub const BOAT_LOADS: [BoatLoad; 5] = [
    BoatLoad::new(1, 0),
    BoatLoad::new(2, 0),
    BoatLoad::new(0, 1),
    BoatLoad::new(0, 2),
    BoatLoad::new(1, 1),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RiverConfigError {
    NoPeople,
    TooLarge { missionaries: u32, cannibals: u32 },
    /// The start bank is already unsafe.
    UnsafeStart { missionaries: u32, cannibals: u32 },
}

impl fmt::Display for RiverConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPeople => f.write_str("at least one person must cross"),
            Self::TooLarge {
                missionaries,
                cannibals,
            } => write!(
                f,
                "{missionaries} missionaries / {cannibals} cannibals exceeds {MAX_PER_GROUP} per group"
            ),
            Self::UnsafeStart {
                missionaries,
                cannibals,
            } => write!(
                f,
                "start bank is unsafe: {cannibals} cannibals outnumber {missionaries} missionaries"
            ),
        }
    }
}

impl std::error::Error for RiverConfigError {}

/// Group totals. Defaults to the classic three and three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RiverConfig {
    pub missionaries: u32,
    pub cannibals: u32,
}

impl Default for RiverConfig {
    fn default() -> Self {
        Self {
            missionaries: 3,
            cannibals: 3,
        }
    }
}

impl RiverConfig {
    /// # Errors
    ///
    /// Returns a [`RiverConfigError`] for an empty, oversized, or unsafe start.
    pub fn validate(&self) -> Result<(), RiverConfigError> {
        let (m, c) = (self.missionaries, self.cannibals);
        if m == 0 && c == 0 {
            return Err(RiverConfigError::NoPeople);
        }
        if m > MAX_PER_GROUP || c > MAX_PER_GROUP {
            return Err(RiverConfigError::TooLarge {
                missionaries: m,
                cannibals: c,
            });
        }
        if !self.start().is_safe(self) {
            return Err(RiverConfigError::UnsafeStart {
                missionaries: m,
                cannibals: c,
            });
        }
        Ok(())
    }

    /// Everyone on the left bank with the boat.
    #[must_use]
    pub fn start(&self) -> RiverState {
        RiverState {
            missionaries: self.missionaries,
            cannibals: self.cannibals,
            boat: Bank::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bank {
    Left,
    Right,
}

impl Bank {
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }
}

/// People carried in one crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoatLoad {
    pub missionaries: u32,
    pub cannibals: u32,
}

impl BoatLoad {
    #[must_use]
    pub const fn new(missionaries: u32, cannibals: u32) -> Self {
        Self {
            missionaries,
            cannibals,
        }
    }

    /// One or two people.
    #[must_use]
    pub const fn fits_boat(self) -> bool {
        matches!(self.missionaries + self.cannibals, 1 | 2)
    }
}

impl fmt::Display for BoatLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}M {}C", self.missionaries, self.cannibals)
    }
}

/// Left-bank counts plus boat position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RiverState {
    pub missionaries: u32,
    pub cannibals: u32,
    pub boat: Bank,
}

impl RiverState {
    /// Canonical key `m-c-b`, with the boat as `0` (left) or `1` (right).
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}-{}-{}", self.missionaries, self.cannibals, self.boat.index())
    }

    /// People still on the start bank.
    #[must_use]
    pub fn heuristic(&self) -> u64 {
        u64::from(self.missionaries) + u64::from(self.cannibals)
    }

    #[must_use]
    pub fn is_goal(&self) -> bool {
        self.missionaries == 0 && self.cannibals == 0 && self.boat == Bank::Right
    }

    /// Counts within totals and both banks safe.
    #[must_use]
    pub fn is_safe(&self, config: &RiverConfig) -> bool {
        if self.missionaries > config.missionaries || self.cannibals > config.cannibals {
            return false;
        }
        let right_m = config.missionaries - self.missionaries;
        let right_c = config.cannibals - self.cannibals;
        bank_safe(self.missionaries, self.cannibals) && bank_safe(right_m, right_c)
    }

    /// Move `load` across with the boat. `None` when the boat's bank does
    /// not have the people; the result may still be unsafe.
    #[must_use]
    pub fn cross(&self, load: BoatLoad, config: &RiverConfig) -> Option<RiverState> {
        let (missionaries, cannibals) = match self.boat {
            Bank::Left => (
                self.missionaries.checked_sub(load.missionaries)?,
                self.cannibals.checked_sub(load.cannibals)?,
            ),
            Bank::Right => {
                let m = self.missionaries + load.missionaries;
                let c = self.cannibals + load.cannibals;
                if m > config.missionaries || c > config.cannibals {
                    return None;
                }
                (m, c)
            }
        };
        Some(RiverState {
            missionaries,
            cannibals,
            boat: self.boat.opposite(),
        })
    }

    /// Safe successors in [`BOAT_LOADS`] order.
    #[must_use]
    pub fn successors(&self, config: &RiverConfig) -> Vec<(BoatLoad, RiverState)> {
        BOAT_LOADS
            .iter()
            .filter_map(|&load| {
                self.cross(load, config)
                    .filter(|s| s.is_safe(config))
                    .map(|s| (load, s))
            })
            .collect()
    }

    /// Action text for carrying `load` from this state's boat bank.
    #[must_use]
    pub fn describe_crossing(&self, load: BoatLoad) -> String {
        match self.boat {
            Bank::Left => format!(
                "{} missionary(ies) and {} cannibal(s) -> right",
                load.missionaries, load.cannibals
            ),
            Bank::Right => format!(
                "{} missionary(ies) and {} cannibal(s) <- left",
                load.missionaries, load.cannibals
            ),
        }
    }
}

impl fmt::Display for RiverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}M, {}C, {})",
            self.missionaries,
            self.cannibals,
            self.boat.as_str()
        )
    }
}

fn bank_safe(missionaries: u32, cannibals: u32) -> bool {
    missionaries == 0 || cannibals <= missionaries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_state_successors() {
        let cfg = RiverConfig::default();
        let succ = cfg.start().successors(&cfg);
        let keys: Vec<String> = succ.iter().map(|(_, s)| s.key()).collect();
        // 1M leaves 2M/3C on the left; 2M leaves 1M/3C. Both unsafe.
        assert_eq!(keys, vec!["3-2-1", "3-1-1", "2-2-1"]);
    }

    #[test]
    fn cross_refuses_missing_people() {
        let cfg = RiverConfig::default();
        let s = RiverState {
            missionaries: 0,
            cannibals: 1,
            boat: Bank::Left,
        };
        assert_eq!(s.cross(BoatLoad::new(1, 0), &cfg), None);
        let back = RiverState {
            missionaries: 3,
            cannibals: 3,
            boat: Bank::Right,
        };
        assert_eq!(back.cross(BoatLoad::new(0, 1), &cfg), None);
    }

    #[test]
    fn safety_checks_both_banks() {
        let cfg = RiverConfig::default();
        let unsafe_right = RiverState {
            missionaries: 2,
            cannibals: 3,
            boat: Bank::Right,
        };
        assert!(!unsafe_right.is_safe(&cfg));
        let all_left_cannibals = RiverState {
            missionaries: 0,
            cannibals: 3,
            boat: Bank::Left,
        };
        assert!(all_left_cannibals.is_safe(&cfg));
    }

    #[test]
    fn config_validation() {
        assert!(RiverConfig::default().validate().is_ok());
        assert_eq!(
            RiverConfig {
                missionaries: 0,
                cannibals: 0
            }
            .validate(),
            Err(RiverConfigError::NoPeople)
        );
        assert!(matches!(
            RiverConfig {
                missionaries: 2,
                cannibals: 3
            }
            .validate(),
            Err(RiverConfigError::UnsafeStart { .. })
        ));
        assert!(RiverConfig {
            missionaries: 0,
            cannibals: 2
        }
        .validate()
        .is_ok());
    }

    #[test]
    fn key_and_heuristic() {
        let s = RiverConfig::default().start();
        assert_eq!(s.key(), "3-3-0");
        assert_eq!(s.heuristic(), 6);
        assert!(!s.is_goal());
        assert_eq!(s.to_string(), "(3M, 3C, Left)");
    }

    #[test]
    fn boat_loads_fit() {
        assert!(BOAT_LOADS.iter().all(|l| l.fits_boat()));
        assert!(!BoatLoad::new(2, 1).fits_boat());
        assert!(!BoatLoad::new(0, 0).fits_boat());
    }
}
