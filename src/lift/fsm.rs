/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::{LiftConfig, TimingConfig};
use crate::lift::clock::Clock;
use crate::shared::{Direction, DoorState, HallCall, LiftError, LiftEvent, LiftResult, LiftStatus};

/**
 * Single lift car serving an inclusive range of floors.
 *
 * The `Lift` accepts in-car requests and hall calls, simulates door and
 * motion sequences through a `Clock`, and resolves pending requests when the
 * doors open at a floor. Progress is reported as `LiftEvent`s on an optional
 * crossbeam channel; the lift itself never writes to the console.
 *
 * Door and motion sequences (`open_doors`, `close_doors`, `move_to_floor`)
 * block the caller and are serialized by the motion lock, so two sequences
 * never overlap even when called from different threads. Request intake and
 * status queries only take the short state lock and can run while a sequence
 * is in progress.
 *
 * # Fields
 * - `min_floor`:           Lowest floor served.
 * - `max_floor`:           Highest floor served.
 * - `door_time`:           Time the doors take to open or close.
 * - `floor_travel_time`:   Time to travel a single floor.
 * - `clock`:               Delay source for door and motion sequences.
 * - `event_tx`:            Receives a notification for every observable step.
 * - `state`:               Mutable car state.
 * - `motion`:              Held for the whole duration of a door or motion sequence.
 */
pub struct Lift {
    min_floor: i32,
    max_floor: i32,
    door_time: Duration,
    floor_travel_time: Duration,
    clock: Arc<dyn Clock>,
    event_tx: Option<cbc::Sender<LiftEvent>>,
    state: Mutex<LiftState>,
    motion: Mutex<()>,
}

struct LiftState {
    current_floor: i32,
    door_state: DoorState,
    direction: Direction,
    internal_requests: BTreeSet<i32>,
    external_calls: Vec<HallCall>,
}

impl Lift {
    pub fn new(
        config: &LiftConfig,
        timing: &TimingConfig,
        clock: Arc<dyn Clock>,
    ) -> LiftResult<Lift> {
        config.validate()?;
        timing.validate()?;

        Ok(Lift {
            min_floor: config.min_floor,
            max_floor: config.max_floor,
            door_time: timing.door_time(),
            floor_travel_time: timing.floor_travel_time(),
            clock,
            event_tx: None,
            state: Mutex::new(LiftState {
                current_floor: config.start_floor,
                door_state: DoorState::Closed,
                direction: Direction::Idle,
                internal_requests: BTreeSet::new(),
                external_calls: Vec::new(),
            }),
            motion: Mutex::new(()),
        })
    }

    /// Routes every notification of this lift to `event_tx`.
    pub fn with_events(mut self, event_tx: cbc::Sender<LiftEvent>) -> Lift {
        self.event_tx = Some(event_tx);
        self
    }

    /***************************************/
    /*              Queries                */
    /***************************************/
    pub fn min_floor(&self) -> i32 {
        self.min_floor
    }

    pub fn max_floor(&self) -> i32 {
        self.max_floor
    }

    pub fn current_floor(&self) -> i32 {
        self.lock_state().current_floor
    }

    pub fn door_state(&self) -> DoorState {
        self.lock_state().door_state
    }

    pub fn direction(&self) -> Direction {
        self.lock_state().direction
    }

    pub fn status(&self) -> LiftStatus {
        let state = self.lock_state();
        LiftStatus {
            floor: state.current_floor,
            doors: state.door_state,
            direction: state.direction,
            internal_requests: state.internal_requests.iter().copied().collect(),
            external_calls: state.external_calls.clone(),
        }
    }

    /***************************************/
    /*          Request intake             */
    /***************************************/

    /// Records a request made from inside the car.
    pub fn press_button(&self, floor: i32) -> LiftResult<()> {
        self.check_floor(floor)?;

        let mut state = self.lock_state();
        if floor == state.current_floor {
            return Err(LiftError::AlreadyAtFloor(floor));
        }
        if state.internal_requests.insert(floor) {
            self.notify(LiftEvent::ButtonPressed(floor));
        } else {
            debug!("In-car request for floor {} already queued", floor);
        }
        Ok(())
    }

    /// Records a hall call from `floor` wanting to travel `direction`.
    pub fn call_lift(&self, floor: i32, direction: Direction) -> LiftResult<()> {
        self.check_floor(floor)?;
        if direction == Direction::Idle {
            return Err(LiftError::InvalidDirection);
        }

        let call = HallCall { floor, direction };
        let mut state = self.lock_state();
        if state.external_calls.contains(&call) {
            debug!("Hall call {} already queued", call);
            return Ok(());
        }
        state.external_calls.push(call);
        self.notify(LiftEvent::LiftCalled(call));
        Ok(())
    }

    /***************************************/
    /*        Door and motion control      */
    /***************************************/
    pub fn open_doors(&self) -> LiftResult<()> {
        let _motion = self.lock_motion();
        self.run_open_doors();
        Ok(())
    }

    pub fn close_doors(&self) -> LiftResult<()> {
        let _motion = self.lock_motion();
        self.run_close_doors();
        Ok(())
    }

    /**
     * Drives the car to `target_floor` without intermediate stops.
     *
     * Open doors are closed first. The car then advances one floor per
     * `floor_travel_time`, becomes idle at the target and opens its doors,
     * which resolves the requests waiting at that floor.
     */
    pub fn move_to_floor(&self, target_floor: i32) -> LiftResult<()> {
        self.check_floor(target_floor)?;
        let _motion = self.lock_motion();

        let start_floor = self.current_floor();
        if target_floor == start_floor {
            return Err(LiftError::AlreadyAtFloor(target_floor));
        }

        if self.door_state() == DoorState::Open {
            self.run_close_doors();
        }

        let direction = if target_floor > start_floor {
            Direction::Up
        } else {
            Direction::Down
        };
        self.lock_state().direction = direction;
        info!(
            "Moving {} from floor {} to {}",
            direction, start_floor, target_floor
        );
        self.notify(LiftEvent::Departing {
            from: start_floor,
            to: target_floor,
            direction,
        });

        let floors_to_travel = target_floor.abs_diff(start_floor);
        for _ in 0..floors_to_travel {
            self.clock.sleep(self.floor_travel_time);

            let mut state = self.lock_state();
            state.current_floor += direction.step();
            if state.current_floor != target_floor {
                self.notify(LiftEvent::PassingFloor(state.current_floor));
            }
        }

        {
            let mut state = self.lock_state();
            state.direction = Direction::Idle;
            info!("Arrived at floor {}", state.current_floor);
            self.notify(LiftEvent::Arrived(state.current_floor));
        }

        self.run_open_doors();
        Ok(())
    }

    /***************************************/
    /*          Private helpers            */
    /***************************************/

    // Callers must hold the motion lock.
    fn run_open_doors(&self) {
        if self.door_state() == DoorState::Open {
            self.notify(LiftEvent::DoorsAlreadyOpen);
            return;
        }

        self.notify(LiftEvent::DoorsOpening);
        self.clock.sleep(self.door_time);

        let mut state = self.lock_state();
        state.door_state = DoorState::Open;
        self.notify(LiftEvent::DoorsOpened(state.current_floor));
        self.complete_requests(&mut state);
    }

    // Callers must hold the motion lock.
    fn run_close_doors(&self) {
        if self.door_state() == DoorState::Closed {
            self.notify(LiftEvent::DoorsAlreadyClosed);
            return;
        }

        self.notify(LiftEvent::DoorsClosing);
        self.clock.sleep(self.door_time);

        self.lock_state().door_state = DoorState::Closed;
        self.notify(LiftEvent::DoorsClosed);
    }

    fn complete_requests(&self, state: &mut LiftState) {
        let floor = state.current_floor;

        if state.internal_requests.remove(&floor) {
            self.notify(LiftEvent::InternalRequestFulfilled(floor));
        }

        // An idle car accepts hall calls in either direction.
        let direction = state.direction;
        let mut fulfilled = Vec::new();
        state.external_calls.retain(|call| {
            let serves =
                call.floor == floor && (direction == Direction::Idle || direction == call.direction);
            if serves {
                fulfilled.push(*call);
            }
            !serves
        });
        for call in fulfilled {
            self.notify(LiftEvent::HallCallFulfilled(call));
        }
    }

    fn check_floor(&self, floor: i32) -> LiftResult<()> {
        if floor < self.min_floor || floor > self.max_floor {
            return Err(LiftError::OutOfRangeFloor {
                floor,
                min: self.min_floor,
                max: self.max_floor,
            });
        }
        Ok(())
    }

    fn notify(&self, event: LiftEvent) {
        debug!("{:?}", event);
        if let Some(event_tx) = &self.event_tx {
            let _ = event_tx.send(event);
        }
    }

    // Every state mutation finishes before the guard drops, so a poisoned lock
    // still holds a consistent state.
    fn lock_state(&self) -> MutexGuard<'_, LiftState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_motion(&self) -> MutexGuard<'_, ()> {
        self.motion.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
