//! # Dispatcher
//!
//! Assigns every hall call to exactly one elevator unit.
//!
//! The dispatcher keeps a [TrackedView]: one small record (floor, direction) per unit,
//! written by the unit's own motion task and read when scoring a call. Each record sits
//! behind its own lock, so a cost pass never sees a half-written slot. The dispatcher
//! only reads positions; it never commands motion. Once a call is assigned it is
//! handed to the chosen unit as a local floor-button press and is that unit's
//! responsibility until served.

pub mod cost;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::elevator_logic::ElevatorUnit;
use crate::error::{check_floor, SimError};
use crate::world_view::{emit, Dirn, ElevatorEvent, EventTx, UnitId, UnitView};

type Slot = Arc<Mutex<UnitView>>;

/// Table of tracked unit positions and directions, one locked slot per unit.
///
/// Cloning shares the same table.
#[derive(Clone, Default)]
pub struct TrackedView {
    slots: Arc<RwLock<Vec<Slot>>>,
}

impl TrackedView {
    /// Allocates a slot for a new unit at the ground floor, idle.
    ///
    /// ## Returns
    /// The new unit's id: the slot index, so ids follow registration order.
    pub async fn register(&self) -> UnitId {
        let mut slots = self.slots.write().await;
        let id = slots.len() as UnitId;
        slots.push(Arc::new(Mutex::new(UnitView::new(id))));
        id
    }

    async fn slot(&self, id: UnitId) -> Result<Slot, SimError> {
        self.slots
            .read()
            .await
            .get(id as usize)
            .cloned()
            .ok_or(SimError::UnknownUnit(id))
    }

    /// Overwrites the tracked floor of unit `id`.
    pub async fn update_position(&self, id: UnitId, floor: u8) -> Result<(), SimError> {
        let slot = self.slot(id).await?;
        slot.lock().await.floor = floor;
        Ok(())
    }

    /// Overwrites the tracked direction of unit `id`.
    pub async fn update_direction(&self, id: UnitId, dirn: Dirn) -> Result<(), SimError> {
        let slot = self.slot(id).await?;
        slot.lock().await.dirn = dirn;
        Ok(())
    }

    /// Copy of one unit's record.
    pub async fn get(&self, id: UnitId) -> Result<UnitView, SimError> {
        let slot = self.slot(id).await?;
        let view = *slot.lock().await;
        Ok(view)
    }

    /// Copy of every record, in id order. Each slot is read under its own lock.
    pub async fn snapshot(&self) -> Vec<UnitView> {
        let slots: Vec<Slot> = self.slots.read().await.clone();
        let mut views = Vec::with_capacity(slots.len());
        for slot in slots {
            views.push(*slot.lock().await);
        }
        views
    }

    /// Number of registered units.
    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }

    /// True if no unit has registered yet.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}


/// Maps hall calls to units using the nearest-cost heuristic in [cost].
pub struct Dispatcher {
    num_floors: u8,
    view: TrackedView,
    units: RwLock<HashMap<UnitId, ElevatorUnit>>,
    events: Option<EventTx>,
}

impl Dispatcher {
    /// Creates a dispatcher for a building with `num_floors` floors and no units yet.
    pub fn new(num_floors: u8, events: Option<EventTx>) -> Self {
        Self {
            num_floors,
            view: TrackedView::default(),
            units: RwLock::new(HashMap::new()),
            events,
        }
    }

    /// Number of floors in the building
    pub fn num_floors(&self) -> u8 {
        self.num_floors
    }

    /// Handle to the tracked table, for units to publish into.
    pub fn view(&self) -> TrackedView {
        self.view.clone()
    }

    /// Allocates a tracked slot (ground floor, idle) and returns the new unit id.
    ///
    /// The slot is only tracked. Calls are dispatched to units created with
    /// [Dispatcher::spawn_unit], so a bare slot never wins a call.
    pub async fn register_unit(&self) -> UnitId {
        self.view.register().await
    }

    /// Creates a unit, registers it, and keeps its handle so calls can be forwarded to it.
    pub async fn spawn_unit(&self, timing: crate::config::Timing) -> ElevatorUnit {
        let unit = ElevatorUnit::spawn(self.view(), self.num_floors, timing, self.events.clone()).await;
        self.units.write().await.insert(unit.id(), unit.clone());
        unit
    }

    /// Overwrites the tracked floor of a unit.
    pub async fn update_position(&self, id: UnitId, floor: u8) -> Result<(), SimError> {
        self.view.update_position(id, floor).await
    }

    /// Overwrites the tracked direction of a unit.
    pub async fn update_direction(&self, id: UnitId, dirn: Dirn) -> Result<(), SimError> {
        self.view.update_direction(id, dirn).await
    }

    /// Assigns a hall call to the cheapest unit and forwards it as a floor-button press.
    ///
    /// Ties go to the lowest unit id.
    ///
    /// ## Returns
    /// The chosen unit's id.
    pub async fn dispatch_floor_call(&self, floor: u8, dirn: Dirn) -> Result<UnitId, SimError> {
        check_floor(floor, self.num_floors)?;
        if dirn == Dirn::Idle {
            return Err(SimError::InvalidDirection);
        }

        let mut views = self.view.snapshot().await;

        // Slots without a running unit behind them can't take a call.
        // The handle is cloned out so the map lock is not held during the press
        let (id, cost, unit) = {
            let units = self.units.read().await;
            views.retain(|view| units.contains_key(&view.id));
            let (id, cost) = cost::select_unit(&views, floor, dirn, self.num_floors).ok_or(SimError::NoUnits)?;
            let unit = units.get(&id).cloned().ok_or(SimError::UnknownUnit(id))?;
            (id, cost, unit)
        };

        emit(&self.events, ElevatorEvent::CallDispatched { unit: id, floor, dirn, cost });
        unit.press_floor_button(floor, dirn).await?;
        Ok(id)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Timing;

    #[tokio::test]
    async fn registration_hands_out_sequential_ids() {
        let view = TrackedView::default();
        assert!(view.is_empty().await);
        assert_eq!(view.register().await, 0);
        assert_eq!(view.register().await, 1);
        assert_eq!(view.get(1).await, Ok(UnitView { id: 1, floor: 1, dirn: Dirn::Idle }));
    }

    #[tokio::test]
    async fn updates_overwrite_tracked_record() {
        let dispatcher = Dispatcher::new(6, None);
        let id = dispatcher.register_unit().await;
        dispatcher.update_position(id, 4).await.unwrap();
        dispatcher.update_direction(id, Dirn::Down).await.unwrap();
        assert_eq!(dispatcher.view().snapshot().await, vec![UnitView { id, floor: 4, dirn: Dirn::Down }]);
    }

    #[tokio::test]
    async fn unknown_unit_is_rejected() {
        let dispatcher = Dispatcher::new(3, None);
        assert_eq!(dispatcher.update_position(7, 2).await, Err(SimError::UnknownUnit(7)));
    }

    #[tokio::test]
    async fn dispatch_without_units_fails() {
        let dispatcher = Dispatcher::new(3, None);
        assert_eq!(dispatcher.dispatch_floor_call(2, Dirn::Up).await, Err(SimError::NoUnits));
    }

    #[tokio::test]
    async fn dispatch_validates_the_call() {
        let dispatcher = Dispatcher::new(3, None);
        dispatcher.spawn_unit(Timing::instant()).await;
        assert_eq!(
            dispatcher.dispatch_floor_call(4, Dirn::Down).await,
            Err(SimError::InvalidFloor { floor: 4, num_floors: 3 })
        );
        assert_eq!(dispatcher.dispatch_floor_call(2, Dirn::Idle).await, Err(SimError::InvalidDirection));
    }

    #[tokio::test(start_paused = true)]
    async fn bare_slot_is_never_chosen() {
        let dispatcher = Dispatcher::new(4, None);
        let bare = dispatcher.register_unit().await;
        let unit = dispatcher.spawn_unit(Timing::default()).await;
        assert_eq!((bare, unit.id()), (0, 1));

        // The bare slot is idle at floor 1 and would win on cost alone
        assert_eq!(dispatcher.dispatch_floor_call(1, Dirn::Up).await, Ok(1));
        unit.wait_idle().await;
    }

    #[tokio::test]
    async fn only_bare_slots_means_no_units() {
        let dispatcher = Dispatcher::new(4, None);
        dispatcher.register_unit().await;
        assert_eq!(dispatcher.dispatch_floor_call(2, Dirn::Down).await, Err(SimError::NoUnits));
    }

    #[tokio::test(start_paused = true)]
    async fn equal_idle_units_go_to_lowest_id() {
        let dispatcher = Dispatcher::new(5, None);
        let first = dispatcher.spawn_unit(Timing::default()).await;
        let second = dispatcher.spawn_unit(Timing::default()).await;

        let chosen = dispatcher.dispatch_floor_call(3, Dirn::Up).await.unwrap();
        assert_eq!(chosen, first.id());

        let snap = first.snapshot().await;
        assert!(snap.up_requests.contains(&3));
        assert!(second.snapshot().await.has_no_requests());
        first.wait_idle().await;
    }
}
