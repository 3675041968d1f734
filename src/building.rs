//! The simulated building: one dispatcher and a bank of elevator units.
//!
//! This is the inbound surface of the simulator. Cab presses go straight to the
//! addressed unit, floor presses go through the [Dispatcher].

use crate::config::{BuildingConfig, Timing};
use crate::elevator_logic::ElevatorUnit;
use crate::error::SimError;
use crate::manager::Dispatcher;
use crate::print;
use crate::world_view::{Dirn, ElevatorContainer, EventTx, UnitId, UnitView};

/// A building with its dispatcher and running elevator units.
pub struct Building {
    config: BuildingConfig,
    dispatcher: Dispatcher,
    units: Vec<ElevatorUnit>,
}

impl Building {
    /// Validates `config`, then creates the dispatcher and starts `num_elevators` units.
    ///
    /// Unit ids are `0..num_elevators` in creation order.
    /// Must be called from within a tokio runtime.
    pub async fn new(config: BuildingConfig, timing: Timing, events: Option<EventTx>) -> Result<Self, SimError> {
        config.validate()?;

        let dispatcher = Dispatcher::new(config.num_floors, events);
        let mut units = Vec::with_capacity(config.num_elevators as usize);
        for _ in 0..config.num_elevators {
            units.push(dispatcher.spawn_unit(timing).await);
        }
        print::ok(format!(
            "Building ready: {} floors, {} elevators",
            config.num_floors, config.num_elevators
        ));

        Ok(Self { config, dispatcher, units })
    }

    /// The building's configuration
    pub fn config(&self) -> BuildingConfig {
        self.config
    }

    /// The dispatcher
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Handle to unit `id`, if it exists
    pub fn unit(&self, id: UnitId) -> Option<&ElevatorUnit> {
        self.units.get(id as usize)
    }

    /// All unit handles, in id order
    pub fn units(&self) -> &[ElevatorUnit] {
        &self.units
    }

    /// `CabinPress(unit, floor)`: a destination pressed inside unit `id`.
    pub async fn cabin_press(&self, id: UnitId, floor: u8) -> Result<(), SimError> {
        let unit = self.unit(id).ok_or(SimError::UnknownUnit(id))?;
        unit.press_cab_button(floor).await
    }

    /// `FloorPress(floor, dirn)`: a hall call, routed by the dispatcher.
    ///
    /// ## Returns
    /// The id of the unit that got the call.
    pub async fn floor_press(&self, floor: u8, dirn: Dirn) -> Result<UnitId, SimError> {
        self.dispatcher.dispatch_floor_call(floor, dirn).await
    }

    /// Copy of unit `id`'s full state
    pub async fn snapshot(&self, id: UnitId) -> Result<ElevatorContainer, SimError> {
        let unit = self.unit(id).ok_or(SimError::UnknownUnit(id))?;
        Ok(unit.snapshot().await)
    }

    /// The dispatcher's tracked view of every unit
    pub async fn views(&self) -> Vec<UnitView> {
        self.dispatcher.view().snapshot().await
    }

    /// Resolves once every unit is at rest with nothing pending.
    pub async fn wait_idle(&self) {
        futures::future::join_all(self.units.iter().map(|unit| unit.wait_idle())).await;
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalid_config_fails_construction() {
        let result = Building::new(BuildingConfig { num_floors: 0, num_elevators: 2 }, Timing::instant(), None).await;
        assert!(matches!(result, Err(SimError::Configuration { .. })));

        let result = Building::new(BuildingConfig { num_floors: 4, num_elevators: 0 }, Timing::instant(), None).await;
        assert!(matches!(result, Err(SimError::Configuration { .. })));
    }

    #[tokio::test]
    async fn units_start_idle_at_ground_floor() {
        let building = Building::new(BuildingConfig::new(4, 3).unwrap(), Timing::instant(), None).await.unwrap();
        let views = building.views().await;
        assert_eq!(views.len(), 3);
        for (i, view) in views.iter().enumerate() {
            assert_eq!(view.id as usize, i);
            assert_eq!(view.floor, 1);
            assert_eq!(view.dirn, Dirn::Idle);
        }
    }

    #[tokio::test]
    async fn cabin_press_on_unknown_unit_is_rejected() {
        let building = Building::new(BuildingConfig::new(4, 1).unwrap(), Timing::instant(), None).await.unwrap();
        assert_eq!(building.cabin_press(3, 2).await, Err(SimError::UnknownUnit(3)));
    }
}
