pub mod clock;
pub mod fsm;

pub use clock::Clock;
pub use clock::RealClock;
pub use clock::VirtualClock;
pub use fsm::Lift;
