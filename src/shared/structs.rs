/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Idle,
}

impl Direction {
    /// Signed floor step for a travel direction, zero when idle.
    pub fn step(&self) -> i32 {
        match *self {
            Direction::Up => 1,
            Direction::Down => -1,
            Direction::Idle => 0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Direction::Up => write!(f, "UP"),
            Direction::Down => write!(f, "DOWN"),
            Direction::Idle => write!(f, "IDLE"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum DoorState {
    Open,
    Closed,
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DoorState::Open => write!(f, "OPEN"),
            DoorState::Closed => write!(f, "CLOSED"),
        }
    }
}

/// A request made from outside the car, tagged with the wanted travel direction.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HallCall {
    pub floor: i32,
    pub direction: Direction,
}

impl fmt::Display for HallCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.floor, self.direction)
    }
}

/**
 * Read-only snapshot of the car.
 *
 * # Fields
 * - `floor`:               Floor the car is at.
 * - `doors`:               Door state at the time of the snapshot.
 * - `direction`:           Travel direction, `Idle` while stationary.
 * - `internal_requests`:   Pending in-car requests, ascending.
 * - `external_calls`:      Pending hall calls in arrival order.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LiftStatus {
    pub floor: i32,
    pub doors: DoorState,
    pub direction: Direction,
    #[serde(rename = "internalRequests")]
    pub internal_requests: Vec<i32>,
    #[serde(rename = "externalCalls")]
    pub external_calls: Vec<HallCall>,
}

/// Notifications emitted by the lift while it works.
#[derive(Debug, Clone, PartialEq)]
pub enum LiftEvent {
    ButtonPressed(i32),
    LiftCalled(HallCall),
    DoorsAlreadyOpen,
    DoorsOpening,
    DoorsOpened(i32),
    DoorsAlreadyClosed,
    DoorsClosing,
    DoorsClosed,
    Departing {
        from: i32,
        to: i32,
        direction: Direction,
    },
    PassingFloor(i32),
    Arrived(i32),
    InternalRequestFulfilled(i32),
    HallCallFulfilled(HallCall),
}

impl fmt::Display for LiftEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiftEvent::ButtonPressed(floor) => write!(f, "Button pressed for floor {}", floor),
            LiftEvent::LiftCalled(call) => write!(
                f,
                "Lift called to floor {}, going {}",
                call.floor, call.direction
            ),
            LiftEvent::DoorsAlreadyOpen => write!(f, "Doors already open"),
            LiftEvent::DoorsOpening => write!(f, "Doors opening..."),
            LiftEvent::DoorsOpened(floor) => write!(f, "Doors OPEN at floor {}", floor),
            LiftEvent::DoorsAlreadyClosed => write!(f, "Doors already closed"),
            LiftEvent::DoorsClosing => write!(f, "Doors closing..."),
            LiftEvent::DoorsClosed => write!(f, "Doors CLOSED"),
            LiftEvent::Departing {
                from,
                to,
                direction,
            } => write!(f, "Moving {} from floor {} to {}...", direction, from, to),
            LiftEvent::PassingFloor(floor) => write!(f, "Passing floor {}...", floor),
            LiftEvent::Arrived(floor) => write!(f, "Arrived at floor {}", floor),
            LiftEvent::InternalRequestFulfilled(floor) => {
                write!(f, "✓ Fulfilled internal request for floor {}", floor)
            }
            LiftEvent::HallCallFulfilled(call) => write!(
                f,
                "✓ Fulfilled external call at floor {}, direction {}",
                call.floor, call.direction
            ),
        }
    }
}
