//! # config.rs – Centralized Parameter Store
//!
//! This module holds all static program parameters used throughout the simulator,
//! together with the small runtime configuration structs built from them at startup.
//! Keeping configuration in one place makes tuning, experimentation, and testing easier.

use std::sync::Mutex;
use std::time::Duration;
use once_cell::sync::Lazy;

use crate::error::SimError;

//
// ──────────────────────────────────────────────────────────────
//   1. BUILDING PARAMETERS
// ──────────────────────────────────────────────────────────────
//

/// Default number of floors when nothing is given on the command line
pub const DEFAULT_NUM_FLOORS: u8 = 5;

/// Default number of elevators when nothing is given on the command line
pub const DEFAULT_NUM_ELEVATORS: u8 = 2;

/// The floor every unit is parked at when it is created
pub const GROUND_FLOOR: u8 = 1;

//
// ──────────────────────────────────────────────────────────────
//   2. TIMING & INTERVALS
// ──────────────────────────────────────────────────────────────
//

/// Time one floor-step takes
pub const DEFAULT_FLOOR_STEP: Duration = Duration::from_secs(1);

/// Time the doors stay open on a stop
pub const DEFAULT_DOOR_CYCLE: Duration = Duration::from_secs(5);

/// Shortest gap between two generated button presses
pub const WORKLOAD_MIN_GAP: Duration = Duration::from_secs(2);

/// Longest gap between two generated button presses
pub const WORKLOAD_MAX_GAP: Duration = Duration::from_secs(3);

/// How often the status table is printed
pub const STATUS_PRINT_PERIOD: Duration = Duration::from_secs(5);

//
// ──────────────────────────────────────────────────────────────
//   3. LOGGING CONFIGURATION
// ──────────────────────────────────────────────────────────────
//

/// Enable/disable printing of the status table
pub static PRINT_WV_ON: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(true));

/// Enable/disable printing of errors
pub static PRINT_ERR_ON: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(true));

/// Enable/disable printing of warnings
pub static PRINT_WARN_ON: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(true));

/// Enable/disable printing of success messages
pub static PRINT_OK_ON: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(true));

/// Enable/disable printing of general info
pub static PRINT_INFO_ON: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(true));

/// Enable/disable elevator event prints and other miscellaneous output
pub static PRINT_ELSE_ON: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(true));

/// Print elevator events as JSON lines instead of coloured text
pub static PRINT_JSON_ON: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(false));

/// Reads one of the print toggles above. A poisoned toggle counts as enabled.
pub fn flag(toggle: &Lazy<Mutex<bool>>) -> bool {
    match toggle.lock() {
        Ok(on) => *on,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

/// Sets one of the print toggles above.
pub fn set_flag(toggle: &Lazy<Mutex<bool>>, value: bool) {
    match toggle.lock() {
        Ok(mut on) => *on = value,
        Err(poisoned) => *poisoned.into_inner() = value,
    }
}

//
// ──────────────────────────────────────────────────────────────
//   4. RUNTIME CONFIGURATION
// ──────────────────────────────────────────────────────────────
//

/// Immutable size of the simulated building, given once before any unit is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildingConfig {
    /// Floors are numbered `1..=num_floors`
    pub num_floors: u8,
    /// Number of elevator units in the bank
    pub num_elevators: u8,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            num_floors: DEFAULT_NUM_FLOORS,
            num_elevators: DEFAULT_NUM_ELEVATORS,
        }
    }
}

impl BuildingConfig {
    /// Creates and validates a building configuration.
    pub fn new(num_floors: u8, num_elevators: u8) -> Result<Self, SimError> {
        let config = Self { num_floors, num_elevators };
        config.validate()?;
        Ok(config)
    }

    /// Fails with [SimError::Configuration] if either count is zero.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.num_floors < 1 {
            return Err(SimError::Configuration { what: "floor count", value: self.num_floors as i64 });
        }
        if self.num_elevators < 1 {
            return Err(SimError::Configuration { what: "elevator count", value: self.num_elevators as i64 });
        }
        Ok(())
    }
}

/// Simulation delays used by the motion loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Time spent travelling between two neighbouring floors
    pub floor_step: Duration,
    /// Time spent with the doors open on a stop
    pub door_cycle: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            floor_step: DEFAULT_FLOOR_STEP,
            door_cycle: DEFAULT_DOOR_CYCLE,
        }
    }
}

impl Timing {
    /// No delays at all. Used by tests.
    pub fn instant() -> Self {
        Self {
            floor_step: Duration::ZERO,
            door_cycle: Duration::ZERO,
        }
    }
}

/// Settings for the random call generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadConfig {
    /// Shortest gap between two presses from one generator
    pub min_gap: Duration,
    /// Longest gap between two presses from one generator
    pub max_gap: Duration,
    /// Seed for reproducible runs. `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            min_gap: WORKLOAD_MIN_GAP,
            max_gap: WORKLOAD_MAX_GAP,
            seed: None,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_floors_is_rejected() {
        let err = BuildingConfig::new(0, 2).unwrap_err();
        assert!(matches!(err, SimError::Configuration { what: "floor count", value: 0 }));
    }

    #[test]
    fn zero_elevators_is_rejected() {
        let err = BuildingConfig::new(3, 0).unwrap_err();
        assert!(matches!(err, SimError::Configuration { what: "elevator count", .. }));
    }

    #[test]
    fn single_floor_single_elevator_is_valid() {
        let config = BuildingConfig::new(1, 1).unwrap();
        assert_eq!(config.num_floors, 1);
        assert_eq!(config.num_elevators, 1);
    }

    #[test]
    fn instant_timing_has_no_delays() {
        let timing = Timing::instant();
        assert_eq!(timing.floor_step, Duration::ZERO);
        assert_eq!(timing.door_cycle, Duration::ZERO);
    }
}
