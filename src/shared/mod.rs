pub mod error;
pub mod macros;
pub mod structs;

pub use error::LiftError;
pub use error::LiftResult;
pub use structs::Direction;
pub use structs::DoorState;
pub use structs::HallCall;
pub use structs::LiftEvent;
pub use structs::LiftStatus;
