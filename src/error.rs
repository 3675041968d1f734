//! Errors returned at the boundary of the simulator.
//!
//! All of these are rejected synchronously. Nothing in the core is retried,
//! and a rejected call leaves every unit and the dispatcher untouched.

use thiserror::Error;

use crate::world_view::UnitId;

/// Error types for the dispatch and motion core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// Floor or elevator count below 1 at startup
    #[error("invalid {what}: {value} (must be at least 1)")]
    Configuration {
        /// Which setting was wrong
        what: &'static str,
        /// The value that was given
        value: i64,
    },

    /// A button press referenced a floor outside `1..=num_floors`
    #[error("floor {floor} is outside the building (1..={num_floors})")]
    InvalidFloor {
        /// The floor that was pressed
        floor: u8,
        /// Highest floor in the building
        num_floors: u8,
    },

    /// A floor call must point either up or down
    #[error("a floor call needs a direction (Up or Down)")]
    InvalidDirection,

    /// No unit is registered under this id
    #[error("no elevator with id {0}")]
    UnknownUnit(UnitId),

    /// A floor call arrived before any unit was registered
    #[error("no elevators registered with the dispatcher")]
    NoUnits,
}

/// Checks that `floor` lies in `1..=num_floors`.
pub fn check_floor(floor: u8, num_floors: u8) -> Result<(), SimError> {
    if floor < 1 || floor > num_floors {
        return Err(SimError::InvalidFloor { floor, num_floors });
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floors_outside_the_building_are_rejected() {
        assert_eq!(check_floor(0, 4), Err(SimError::InvalidFloor { floor: 0, num_floors: 4 }));
        assert_eq!(check_floor(5, 4), Err(SimError::InvalidFloor { floor: 5, num_floors: 4 }));
        assert!(check_floor(1, 4).is_ok());
        assert!(check_floor(4, 4).is_ok());
    }

    #[test]
    fn messages_name_the_offending_value() {
        let msg = SimError::InvalidFloor { floor: 9, num_floors: 3 }.to_string();
        assert!(msg.contains('9'));
        assert!(msg.contains("1..=3"));
    }
}
