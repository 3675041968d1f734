//! Shared data model of the simulator.
//!
//! Holds the types passed between the elevator units, the dispatcher and the
//! reporting side: directions, call buttons, the per-unit state container, the
//! dispatcher's tracked view of a unit, and the outbound event notifications.

use serde::{Serialize, Deserialize};
use std::collections::BTreeSet;

use crate::config;

/// Stable identifier of an elevator unit. Assigned in registration order, never reused.
pub type UnitId = u8;

#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Direction an elevator is travelling or a floor call points in.
pub enum Dirn {
    Down = -1,
    Idle = 0,
    Up = 1,
}

impl Dirn {
    /// Direction from `from` towards `to`. [Dirn::Idle] when they are equal.
    pub fn toward(from: u8, to: u8) -> Dirn {
        if to > from {
            Dirn::Up
        } else if to < from {
            Dirn::Down
        } else {
            Dirn::Idle
        }
    }

    /// The reverse direction. Idle stays Idle.
    pub fn opposite(self) -> Dirn {
        match self {
            Dirn::Up => Dirn::Down,
            Dirn::Down => Dirn::Up,
            Dirn::Idle => Dirn::Idle,
        }
    }

    /// Floor delta of one motion step in this direction.
    pub fn step(self) -> i16 {
        self as i16
    }
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Which button a call came from.
pub enum CallType {
    HallUp,
    HallDown,
    Cab,
}

/// A pressed button: a floor and where it was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallButton {
    /// Floor the button refers to
    pub floor: u8,
    /// Hall up/down or cab
    pub call: CallType,
}

impl CallButton {
    /// A hall call for `floor` pointing in `dirn`. `None` for [Dirn::Idle].
    pub fn hall(floor: u8, dirn: Dirn) -> Option<CallButton> {
        match dirn {
            Dirn::Up => Some(CallButton { floor, call: CallType::HallUp }),
            Dirn::Down => Some(CallButton { floor, call: CallType::HallDown }),
            Dirn::Idle => None,
        }
    }

    /// A cab call for `floor`.
    pub fn cab(floor: u8) -> CallButton {
        CallButton { floor, call: CallType::Cab }
    }
}


/// Represents the state of one elevator unit: position, direction and pending requests.
///
/// Owned by its [crate::elevator_logic::ElevatorUnit] behind a lock; everyone else only sees copies.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ElevatorContainer {
    /// Unique identifier for the elevator.
    pub elevator_id: UnitId,

    /// The number of floors the elevator can access
    pub num_floors: u8,

    /// The floor the cabin is at. Changes by exactly one per motion step.
    pub current_floor: u8,

    /// [Dirn] of travel. Idle whenever `moving` is false.
    ///
    /// A press for the floor a resting unit is parked at sets `moving` but leaves
    /// the direction Idle until that door cycle is done; otherwise a moving unit
    /// is always Up or Down.
    /// Default: [Dirn::Idle]
    pub dirn: Dirn,

    /// Last non-idle direction the unit travelled in. Breaks ties between
    /// Up and Down calls at the floor a freshly idle unit is parked at.
    /// Default: [Dirn::Up]
    pub last_dirn: Dirn,

    /// Whether the motion loop is running
    pub moving: bool,

    /// Floors pressed inside the cabin, not yet served
    pub cab_requests: BTreeSet<u8>,

    /// Up hall calls assigned to this unit, not yet served
    pub up_requests: BTreeSet<u8>,

    /// Down hall calls assigned to this unit, not yet served
    pub down_requests: BTreeSet<u8>,
}

impl ElevatorContainer {
    /// A fresh unit parked at the ground floor with nothing to do.
    pub fn new(elevator_id: UnitId, num_floors: u8) -> Self {
        Self {
            elevator_id,
            num_floors,
            current_floor: config::GROUND_FLOOR,
            dirn: Dirn::Idle,
            last_dirn: Dirn::Up,
            moving: false,
            cab_requests: BTreeSet::new(),
            up_requests: BTreeSet::new(),
            down_requests: BTreeSet::new(),
        }
    }

    /// True if nothing is pending anywhere
    pub fn has_no_requests(&self) -> bool {
        self.cab_requests.is_empty() && self.up_requests.is_empty() && self.down_requests.is_empty()
    }

    /// Mutable access to the hall request set matching a call direction
    pub fn hall_requests_mut(&mut self, dirn: Dirn) -> Option<&mut BTreeSet<u8>> {
        match dirn {
            Dirn::Up => Some(&mut self.up_requests),
            Dirn::Down => Some(&mut self.down_requests),
            Dirn::Idle => None,
        }
    }
}


/// The dispatcher's record of one unit: the only fields it scores with.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitView {
    /// Which unit this is
    pub id: UnitId,
    /// Last published floor
    pub floor: u8,
    /// Last published direction
    pub dirn: Dirn,
}

impl UnitView {
    /// The view of a newly registered unit: ground floor, idle.
    pub fn new(id: UnitId) -> Self {
        Self { id, floor: config::GROUND_FLOOR, dirn: Dirn::Idle }
    }
}


/// Notifications emitted for the reporting side. Purely observational.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "event")]
pub enum ElevatorEvent {
    /// A unit was created and registered
    UnitCreated {
        /// The new unit
        unit: UnitId,
        /// Floor it starts at
        floor: u8,
    },
    /// A button was registered on a unit
    ButtonPressed {
        /// Unit that got the request
        unit: UnitId,
        /// The button
        button: CallButton,
    },
    /// The dispatcher routed a hall call
    CallDispatched {
        /// Chosen unit
        unit: UnitId,
        /// Call floor
        floor: u8,
        /// Call direction
        dirn: Dirn,
        /// Estimated floor-steps for the chosen unit
        cost: u32,
    },
    /// A unit left the rest state
    MotionStarted {
        /// The unit
        unit: UnitId,
        /// Floor it starts from
        floor: u8,
        /// Initial direction
        dirn: Dirn,
    },
    /// A unit reached a floor after one step
    FloorArrived {
        /// The unit
        unit: UnitId,
        /// Floor reached
        floor: u8,
        /// Direction of travel
        dirn: Dirn,
    },
    /// Doors opened to serve a stop
    DoorsOpened {
        /// The unit
        unit: UnitId,
        /// Floor served
        floor: u8,
        /// Direction at the time of the stop
        dirn: Dirn,
        /// The request the stop was made for
        button: CallButton,
    },
    /// Doors closed after a stop
    DoorsClosed {
        /// The unit
        unit: UnitId,
        /// Floor served
        floor: u8,
    },
    /// A unit ran out of requests and came to rest
    MotionStopped {
        /// The unit
        unit: UnitId,
        /// Floor it rests at
        floor: u8,
    },
}

impl ElevatorEvent {
    /// Unit the event is about
    pub fn unit(&self) -> UnitId {
        match *self {
            ElevatorEvent::UnitCreated { unit, .. }
            | ElevatorEvent::ButtonPressed { unit, .. }
            | ElevatorEvent::CallDispatched { unit, .. }
            | ElevatorEvent::MotionStarted { unit, .. }
            | ElevatorEvent::FloorArrived { unit, .. }
            | ElevatorEvent::DoorsOpened { unit, .. }
            | ElevatorEvent::DoorsClosed { unit, .. }
            | ElevatorEvent::MotionStopped { unit, .. } => unit,
        }
    }
}

/// Sending half of the event channel handed to units and the dispatcher.
pub type EventTx = tokio::sync::mpsc::UnboundedSender<ElevatorEvent>;

/// Receiving half of the event channel, consumed by the reporter.
pub type EventRx = tokio::sync::mpsc::UnboundedReceiver<ElevatorEvent>;

/// Sends an event if anyone is listening. A missing listener is not an error.
pub fn emit(events: &Option<EventTx>, event: ElevatorEvent) {
    if let Some(tx) = events {
        let _ = tx.send(event);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_toward_a_floor() {
        assert_eq!(Dirn::toward(1, 3), Dirn::Up);
        assert_eq!(Dirn::toward(4, 2), Dirn::Down);
        assert_eq!(Dirn::toward(2, 2), Dirn::Idle);
    }

    #[test]
    fn step_matches_direction_value() {
        assert_eq!(Dirn::Up.step(), 1);
        assert_eq!(Dirn::Down.step(), -1);
        assert_eq!(Dirn::Idle.step(), 0);
        assert_eq!(Dirn::Up.opposite(), Dirn::Down);
    }

    #[test]
    fn idle_is_not_a_hall_call() {
        assert_eq!(CallButton::hall(3, Dirn::Idle), None);
        assert_eq!(CallButton::hall(3, Dirn::Down).map(|b| b.call), Some(CallType::HallDown));
    }

    #[test]
    fn new_container_is_parked_at_ground_floor() {
        let elev = ElevatorContainer::new(2, 6);
        assert_eq!(elev.current_floor, 1);
        assert_eq!(elev.dirn, Dirn::Idle);
        assert!(!elev.moving);
        assert!(elev.has_no_requests());
    }

    #[test]
    fn events_serialize_with_a_tag() {
        let json = serde_json::to_string(&ElevatorEvent::DoorsClosed { unit: 1, floor: 3 }).unwrap();
        assert_eq!(json, r#"{"event":"DoorsClosed","unit":1,"floor":3}"#);
    }
}
