/***************************************/
/*        3rd party libraries          */
/***************************************/
use thiserror::Error;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::Direction;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveToFloor(i32),
    PressButton(i32),
    CallLift(i32, Direction),
    OpenDoors,
    CloseDoors,
    Status,
    Exit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid number")]
    InvalidNumber,

    #[error("Invalid direction")]
    InvalidDirection,

    #[error("Invalid choice")]
    InvalidChoice,
}

/// Menu entries, in the order they are shown.
pub const MENU: [&str; 7] = [
    "1. Move to floor",
    "2. Press button inside",
    "3. Call from floor",
    "4. Open doors",
    "5. Close doors",
    "6. Status",
    "7. Exit",
];

/***************************************/
/*             Public API              */
/***************************************/
pub fn parse_floor(input: &str) -> Result<i32, CommandError> {
    input
        .trim()
        .parse::<i32>()
        .map_err(|_| CommandError::InvalidNumber)
}

/// Hall call directions, case-insensitive. `IDLE` is not a direction anyone can call with.
pub fn parse_direction(input: &str) -> Result<Direction, CommandError> {
    match input.trim().to_uppercase().as_str() {
        "UP" => Ok(Direction::Up),
        "DOWN" => Ok(Direction::Down),
        _ => Err(CommandError::InvalidDirection),
    }
}

/**
 * Parses a one-line command such as `move 4`, `press 2`, `call 3 down`,
 * `open`, `close`, `status` or `exit`.
 *
 * Numeric menu choices are handled by the shell because they prompt for
 * their arguments.
 */
pub fn parse_inline(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let keyword = words
        .next()
        .ok_or(CommandError::InvalidChoice)?
        .to_lowercase();
    let args: Vec<&str> = words.collect();

    let command = match (keyword.as_str(), args.as_slice()) {
        ("move" | "goto", [floor]) => Command::MoveToFloor(parse_floor(floor)?),
        ("press", [floor]) => Command::PressButton(parse_floor(floor)?),
        ("call", [floor, direction]) => {
            Command::CallLift(parse_floor(floor)?, parse_direction(direction)?)
        }
        ("open", []) => Command::OpenDoors,
        ("close", []) => Command::CloseDoors,
        ("status", []) => Command::Status,
        ("exit" | "quit", []) => Command::Exit,
        _ => return Err(CommandError::InvalidChoice),
    };
    Ok(command)
}
