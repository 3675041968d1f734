//! Elevator request evaluation and direction decision logic.
//!
//! This module provides helper functions for determining the next action of an elevator,
//! based on its current direction, position and pending requests.
//!
//! It is used by the motion loop in [super::ElevatorUnit] and is stateless: every function
//! reads a snapshot of the elevator's state (`ElevatorContainer`) and returns either a
//! boolean, a stop reason, or a `DirnBehaviourPair`.
//!
//! # Overview
//! - Checking for cab or hall requests above, below or at the current floor.
//! - Determining whether (and why) to stop at the current floor.
//! - Clearing the requests served by a stop.
//! - Choosing direction and behaviour once the current floor has been handled.
//!
//! # Example
//! ```rust
//! use elevatorsim::elevator_logic::request::{choose_direction, stop_reason, ElevatorBehaviour};
//! use elevatorsim::world_view::{Dirn, ElevatorContainer};
//!
//! let mut elevator = ElevatorContainer::new(0, 5);
//! elevator.current_floor = 2;
//! elevator.dirn = Dirn::Up;
//! elevator.moving = true;
//! elevator.down_requests.insert(1);
//!
//! assert_eq!(stop_reason(&elevator), None);
//! let next = choose_direction(&elevator);
//! assert_eq!(next.dirn, Dirn::Down);
//! assert_eq!(next.behaviour, ElevatorBehaviour::Moving);
//! ```

use std::collections::BTreeSet;
use std::ops::Bound::{Excluded, Unbounded};

use crate::world_view::{CallButton, CallType, Dirn, ElevatorContainer};

#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What the unit does after the current floor has been handled
pub enum ElevatorBehaviour {
    /// Nothing left anywhere: come to rest
    Idle,
    /// Take a floor-step (or reverse first) in the paired direction
    Moving,
    /// Requests remain at this very floor: stay and serve them
    DoorOpen,
}

/// Represents a combination of a direction and an elevator behaviour state.
///
/// Return type of [choose_direction].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirnBehaviourPair {
    /// direction of the elevator
    pub dirn: Dirn,

    /// the behavior of the elevator
    pub behaviour: ElevatorBehaviour,
}

fn any_above(set: &BTreeSet<u8>, floor: u8) -> bool {
    set.range((Excluded(floor), Unbounded)).next().is_some()
}

fn any_below(set: &BTreeSet<u8>, floor: u8) -> bool {
    set.range(..floor).next().is_some()
}

/// Checks if there are any hall or cab requests above the elevator's current floor.
pub fn above(elevator: &ElevatorContainer) -> bool {
    let floor = elevator.current_floor;
    any_above(&elevator.cab_requests, floor)
        || any_above(&elevator.up_requests, floor)
        || any_above(&elevator.down_requests, floor)
}

/// Checks if there are any hall or cab requests below the elevator's current floor.
pub fn below(elevator: &ElevatorContainer) -> bool {
    let floor = elevator.current_floor;
    any_below(&elevator.cab_requests, floor)
        || any_below(&elevator.up_requests, floor)
        || any_below(&elevator.down_requests, floor)
}

/// Checks for any pending request at the elevator's current floor.
pub fn here(elevator: &ElevatorContainer) -> bool {
    let floor = elevator.current_floor;
    elevator.cab_requests.contains(&floor)
        || elevator.up_requests.contains(&floor)
        || elevator.down_requests.contains(&floor)
}

/// Requests ahead in `dirn` (above for Up, below for Down). Always false for Idle.
pub fn ahead(elevator: &ElevatorContainer, dirn: Dirn) -> bool {
    match dirn {
        Dirn::Up => above(elevator),
        Dirn::Down => below(elevator),
        Dirn::Idle => false,
    }
}

/// Picks the hall call to serve at the current floor for a unit at rest.
///
/// When both arrows are pending, the one matching `last_dirn` goes first.
fn hall_call_at_rest(elevator: &ElevatorContainer) -> Option<CallType> {
    let floor = elevator.current_floor;
    let up = elevator.up_requests.contains(&floor);
    let down = elevator.down_requests.contains(&floor);

    match (up, down) {
        (true, true) if elevator.last_dirn == Dirn::Down => Some(CallType::HallDown),
        (true, _) => Some(CallType::HallUp),
        (false, true) => Some(CallType::HallDown),
        (false, false) => None,
    }
}

/// Determines whether the elevator should stop at the current floor, and for what.
///
/// Conditions in priority order:
/// 1. A cab request for this floor.
/// 2. An Up hall call here while going Up.
/// 3. A Down hall call here while going Down.
/// 4. With no cab requests anywhere: the opposite hall call here, but only
///    if no hall call in the current direction is pending anywhere.
///
/// At rest (`dirn` Idle) any hall call at this floor is served.
///
/// # Returns
/// The button that triggers the stop, or `None` to keep going.
pub fn stop_reason(elevator: &ElevatorContainer) -> Option<CallType> {
    let floor = elevator.current_floor;

    if elevator.cab_requests.contains(&floor) {
        return Some(CallType::Cab);
    }

    match elevator.dirn {
        Dirn::Up if elevator.up_requests.contains(&floor) => return Some(CallType::HallUp),
        Dirn::Down if elevator.down_requests.contains(&floor) => return Some(CallType::HallDown),
        Dirn::Idle => return hall_call_at_rest(elevator),
        _ => {}
    }

    if !elevator.cab_requests.is_empty() {
        return None;
    }

    match elevator.dirn {
        Dirn::Up if elevator.up_requests.is_empty() && elevator.down_requests.contains(&floor) => {
            Some(CallType::HallDown)
        }
        Dirn::Down if elevator.down_requests.is_empty() && elevator.up_requests.contains(&floor) => {
            Some(CallType::HallUp)
        }
        _ => None,
    }
}

/// Clears the requests served by a stop at the current floor.
///
/// The triggering request is always cleared. A cab stop also clears the hall
/// call at this floor pointing the way the unit travels, since those passengers
/// board on the same door cycle.
///
/// # Returns
/// The buttons that were cleared, triggering one first.
pub fn clear_at_current_floor(elevator: &mut ElevatorContainer, reason: CallType) -> Vec<CallButton> {
    let floor = elevator.current_floor;
    let mut cleared = Vec::new();

    let removed = match reason {
        CallType::Cab => elevator.cab_requests.remove(&floor),
        CallType::HallUp => elevator.up_requests.remove(&floor),
        CallType::HallDown => elevator.down_requests.remove(&floor),
    };
    if removed {
        cleared.push(CallButton { floor, call: reason });
    }

    if reason == CallType::Cab {
        let dirn = elevator.dirn;
        if let Some(hall) = elevator.hall_requests_mut(dirn) {
            if hall.remove(&floor) {
                if let Some(button) = CallButton::hall(floor, dirn) {
                    cleared.push(button);
                }
            }
        }
    }
    cleared
}

/// Main decision logic run after every floor has been handled.
///
/// - Requests ahead in the current direction: keep going.
/// - Otherwise requests behind: reverse.
/// - Otherwise requests left at this floor: stay here, keeping the direction, and serve them.
/// - Otherwise: stop.
///
/// A unit at rest heads for whichever side has requests, above first.
pub fn choose_direction(elevator: &ElevatorContainer) -> DirnBehaviourPair {
    match elevator.dirn {
        Dirn::Up | Dirn::Down => {
            let dirn = elevator.dirn;
            if ahead(elevator, dirn) {
                DirnBehaviourPair { dirn, behaviour: ElevatorBehaviour::Moving }
            } else if ahead(elevator, dirn.opposite()) {
                DirnBehaviourPair { dirn: dirn.opposite(), behaviour: ElevatorBehaviour::Moving }
            } else if here(elevator) {
                DirnBehaviourPair { dirn, behaviour: ElevatorBehaviour::DoorOpen }
            } else {
                DirnBehaviourPair { dirn: Dirn::Idle, behaviour: ElevatorBehaviour::Idle }
            }
        }
        Dirn::Idle => {
            if here(elevator) {
                DirnBehaviourPair { dirn: Dirn::Idle, behaviour: ElevatorBehaviour::DoorOpen }
            } else if above(elevator) {
                DirnBehaviourPair { dirn: Dirn::Up, behaviour: ElevatorBehaviour::Moving }
            } else if below(elevator) {
                DirnBehaviourPair { dirn: Dirn::Down, behaviour: ElevatorBehaviour::Moving }
            } else {
                DirnBehaviourPair { dirn: Dirn::Idle, behaviour: ElevatorBehaviour::Idle }
            }
        }
    }
}
