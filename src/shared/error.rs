/***************************************/
/*        3rd party libraries          */
/***************************************/
use thiserror::Error;

/// Everything a lift operation or the start-up path can report.
///
/// None of these are fatal to the simulation; `main` only exits on the
/// configuration variants.
#[derive(Debug, Error)]
pub enum LiftError {
    #[error("Floor {floor} does not exist! (valid range {min}-{max})")]
    OutOfRangeFloor { floor: i32, min: i32, max: i32 },

    #[error("Already at floor {0}")]
    AlreadyAtFloor(i32),

    #[error("Cannot call with IDLE direction")]
    InvalidDirection,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LiftError {
    /// Informational conditions the operator should see as a notice, not a failure.
    pub fn is_informational(&self) -> bool {
        matches!(self, LiftError::AlreadyAtFloor(_))
    }
}

pub type LiftResult<T> = Result<T, LiftError>;
