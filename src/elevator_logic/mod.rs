//! # Elevator Unit
//!
//! One [ElevatorUnit] per elevator in the bank. A unit owns its [ElevatorContainer]
//! behind a lock and runs a long-lived motion task that sleeps until a button press
//! starts it, then scans floor by floor until nothing is pending.
//!
//! ## Locking
//! The container is only touched while holding the unit's lock, both by the motion
//! task and by button presses arriving from other tasks. The lock is never held across
//! a floor-step or door-cycle sleep, so presses land while the unit is travelling.
//! Every position or direction change is published to the dispatcher's tracked view
//! while the lock is held, so the view is never more than one step behind.

pub mod request;

use std::sync::Arc;

use tokio::sync::{watch, Mutex, Notify};
use tokio::time::sleep;

use crate::config::Timing;
use crate::error::{check_floor, SimError};
use crate::manager::TrackedView;
use crate::print;
use crate::world_view::{emit, CallButton, CallType, Dirn, ElevatorContainer, ElevatorEvent, EventTx, UnitId};

use request::ElevatorBehaviour;

/// Handle to one elevator unit. Cheap to clone; all clones drive the same unit.
#[derive(Clone)]
pub struct ElevatorUnit {
    id: UnitId,
    num_floors: u8,
    timing: Timing,
    state: Arc<Mutex<ElevatorContainer>>,
    wake: Arc<Notify>,
    at_rest: Arc<watch::Sender<bool>>,
    view: TrackedView,
    events: Option<EventTx>,
}

/// What the motion loop does after the direction decision
enum Next {
    Reevaluate,
    Step(Dirn),
    Rest,
}

impl ElevatorUnit {
    /// Creates a unit, registers it in `view` and starts its motion task.
    ///
    /// The unit starts at the ground floor, idle, with no requests.
    /// Must be called from within a tokio runtime.
    pub async fn spawn(view: TrackedView, num_floors: u8, timing: Timing, events: Option<EventTx>) -> ElevatorUnit {
        let id = view.register().await;
        let container = ElevatorContainer::new(id, num_floors);
        let floor = container.current_floor;
        let (at_rest, _) = watch::channel(true);

        let unit = ElevatorUnit {
            id,
            num_floors,
            timing,
            state: Arc::new(Mutex::new(container)),
            wake: Arc::new(Notify::new()),
            at_rest: Arc::new(at_rest),
            view,
            events,
        };

        {
            let unit = unit.clone();
            tokio::spawn(async move {
                unit.run().await;
            });
        }

        emit(&unit.events, ElevatorEvent::UnitCreated { unit: id, floor });
        unit
    }

    /// The unit's id
    pub fn id(&self) -> UnitId {
        self.id
    }

    /// A copy of the unit's current state
    pub async fn snapshot(&self) -> ElevatorContainer {
        self.state.lock().await.clone()
    }

    /// Resolves once the unit is at rest with nothing pending.
    pub async fn wait_idle(&self) {
        let mut rx = self.at_rest.subscribe();
        let _ = rx.wait_for(|at_rest| *at_rest).await;
    }

    /// Registers a cab button press for `floor`.
    ///
    /// Pressing a floor that is already pending has no further effect.
    pub async fn press_cab_button(&self, floor: u8) -> Result<(), SimError> {
        check_floor(floor, self.num_floors)?;
        self.register(CallButton::cab(floor)).await;
        Ok(())
    }

    /// Registers a hall call assigned to this unit.
    pub async fn press_floor_button(&self, floor: u8, dirn: Dirn) -> Result<(), SimError> {
        check_floor(floor, self.num_floors)?;
        let button = CallButton::hall(floor, dirn).ok_or(SimError::InvalidDirection)?;
        self.register(button).await;
        Ok(())
    }

    async fn register(&self, button: CallButton) {
        let mut elev = self.state.lock().await;

        match button.call {
            CallType::Cab => elev.cab_requests.insert(button.floor),
            CallType::HallUp => elev.up_requests.insert(button.floor),
            CallType::HallDown => elev.down_requests.insert(button.floor),
        };
        emit(&self.events, ElevatorEvent::ButtonPressed { unit: self.id, button });

        if elev.dirn == Dirn::Idle {
            let dirn = Dirn::toward(elev.current_floor, button.floor);
            if dirn != Dirn::Idle {
                self.set_dirn(&mut elev, dirn).await;
            }
        }

        if !elev.moving {
            elev.moving = true;
            self.at_rest.send_replace(false);
            emit(&self.events, ElevatorEvent::MotionStarted { unit: self.id, floor: elev.current_floor, dirn: elev.dirn });
            self.wake.notify_one();
        }
    }

    async fn set_dirn(&self, elev: &mut ElevatorContainer, dirn: Dirn) {
        elev.dirn = dirn;
        if dirn != Dirn::Idle {
            elev.last_dirn = dirn;
        }
        if let Err(e) = self.view.update_direction(self.id, dirn).await {
            print::err(format!("Elevator {}: failed to publish direction: {}", self.id, e));
        }
    }

    async fn run(self) {
        loop {
            self.wake.notified().await;
            self.drive().await;
        }
    }

    /// The motion loop. Returns when the unit comes to rest.
    async fn drive(&self) {
        loop {
            // Serve the current floor
            let served = {
                let mut elev = self.state.lock().await;
                if !elev.moving {
                    return;
                }
                match request::stop_reason(&elev) {
                    Some(reason) => {
                        let floor = elev.current_floor;
                        request::clear_at_current_floor(&mut elev, reason);
                        emit(&self.events, ElevatorEvent::DoorsOpened {
                            unit: self.id,
                            floor,
                            dirn: elev.dirn,
                            button: CallButton { floor, call: reason },
                        });
                        Some(floor)
                    }
                    None => None,
                }
            };

            if let Some(floor) = served {
                sleep(self.timing.door_cycle).await;
                emit(&self.events, ElevatorEvent::DoorsClosed { unit: self.id, floor });
                continue;
            }

            // Decide where to go
            let next = {
                let mut elev = self.state.lock().await;
                let pair = request::choose_direction(&elev);

                match pair.behaviour {
                    ElevatorBehaviour::Idle => {
                        self.set_dirn(&mut elev, Dirn::Idle).await;
                        elev.moving = false;
                        self.at_rest.send_replace(true);
                        emit(&self.events, ElevatorEvent::MotionStopped { unit: self.id, floor: elev.current_floor });
                        Next::Rest
                    }
                    // Requests left here: the stop check serves them under the kept direction
                    ElevatorBehaviour::DoorOpen => Next::Reevaluate,
                    ElevatorBehaviour::Moving if pair.dirn != elev.dirn => {
                        self.set_dirn(&mut elev, pair.dirn).await;
                        Next::Reevaluate
                    }
                    ElevatorBehaviour::Moving => Next::Step(pair.dirn),
                }
            };

            match next {
                Next::Rest => return,
                Next::Reevaluate => continue,
                Next::Step(dirn) => {
                    sleep(self.timing.floor_step).await;

                    let mut elev = self.state.lock().await;
                    elev.current_floor = (elev.current_floor as i16 + dirn.step()) as u8;
                    if let Err(e) = self.view.update_position(self.id, elev.current_floor).await {
                        print::err(format!("Elevator {}: failed to publish position: {}", self.id, e));
                    }
                    emit(&self.events, ElevatorEvent::FloorArrived { unit: self.id, floor: elev.current_floor, dirn });
                }
            }
        }
    }
}
