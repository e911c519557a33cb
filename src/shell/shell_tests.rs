/*
 * Unit tests for the shell module
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 * The shell is driven with in-memory input and output on a VirtualClock lift.
 *
 * Tests:
 * - command parsing
 * - status rendering
 * - menu and inline sessions
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod shell_tests {
    use crate::config::{LiftConfig, StatusFormat, TimingConfig};
    use crate::lift::{Lift, VirtualClock};
    use crate::shared::Direction::{Down, Idle, Up};
    use crate::shared::DoorState::Open;
    use crate::shared::{HallCall, LiftEvent, LiftStatus};
    use crate::shell::command::{parse_direction, parse_floor, parse_inline, CommandError};
    use crate::shell::render::status_text;
    use crate::shell::{Command, Shell};
    use crossbeam_channel::unbounded;
    use std::sync::Arc;

    fn setup_lift(start_floor: i32) -> (Arc<Lift>, crossbeam_channel::Receiver<LiftEvent>) {
        let config = LiftConfig {
            min_floor: 0,
            max_floor: 10,
            start_floor,
        };
        let (event_tx, event_rx) = unbounded::<LiftEvent>();
        let lift = Lift::new(&config, &TimingConfig::default(), Arc::new(VirtualClock::new()))
            .unwrap()
            .with_events(event_tx);
        (Arc::new(lift), event_rx)
    }

    fn run_session(input: &str, format: StatusFormat) -> (String, Arc<Lift>) {
        let (lift, event_rx) = setup_lift(0);
        let mut output: Vec<u8> = Vec::new();

        let mut shell = Shell::new(lift.clone(), event_rx, input.as_bytes(), &mut output, format);
        shell.run().unwrap();
        drop(shell);

        (String::from_utf8(output).unwrap(), lift)
    }

    fn position(output: &str, needle: &str) -> usize {
        output
            .find(needle)
            .unwrap_or_else(|| panic!("{:?} not found in output:\n{}", needle, output))
    }

    /***************************************/
    /*              Parsing                */
    /***************************************/
    #[test]
    fn test_parse_floor() {
        assert_eq!(parse_floor(" 7 "), Ok(7));
        assert_eq!(parse_floor("-2"), Ok(-2));
        assert_eq!(parse_floor("seven"), Err(CommandError::InvalidNumber));
        assert_eq!(parse_floor(""), Err(CommandError::InvalidNumber));
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!(parse_direction("up"), Ok(Up));
        assert_eq!(parse_direction("DOWN"), Ok(Down));
        assert_eq!(parse_direction("Down "), Ok(Down));
        assert_eq!(parse_direction("idle"), Err(CommandError::InvalidDirection));
        assert_eq!(parse_direction("left"), Err(CommandError::InvalidDirection));
    }

    #[test]
    fn test_parse_inline() {
        assert_eq!(parse_inline("move 4"), Ok(Command::MoveToFloor(4)));
        assert_eq!(parse_inline("GOTO 1"), Ok(Command::MoveToFloor(1)));
        assert_eq!(parse_inline("press 9"), Ok(Command::PressButton(9)));
        assert_eq!(parse_inline("call 3 up"), Ok(Command::CallLift(3, Up)));
        assert_eq!(parse_inline("open"), Ok(Command::OpenDoors));
        assert_eq!(parse_inline("close"), Ok(Command::CloseDoors));
        assert_eq!(parse_inline("status"), Ok(Command::Status));
        assert_eq!(parse_inline("quit"), Ok(Command::Exit));

        assert_eq!(parse_inline("move x"), Err(CommandError::InvalidNumber));
        assert_eq!(parse_inline("call 3 idle"), Err(CommandError::InvalidDirection));
        assert_eq!(parse_inline("call 3"), Err(CommandError::InvalidChoice));
        assert_eq!(parse_inline("open 3"), Err(CommandError::InvalidChoice));
        assert_eq!(parse_inline(""), Err(CommandError::InvalidChoice));
        assert_eq!(parse_inline("9"), Err(CommandError::InvalidChoice));
    }

    /***************************************/
    /*             Rendering               */
    /***************************************/
    #[test]
    fn test_status_text() {
        let idle = LiftStatus {
            floor: 0,
            doors: crate::shared::DoorState::Closed,
            direction: Idle,
            internal_requests: vec![],
            external_calls: vec![],
        };
        let busy = LiftStatus {
            floor: 4,
            doors: Open,
            direction: Idle,
            internal_requests: vec![2, 7],
            external_calls: vec![
                HallCall { floor: 5, direction: Up },
                HallCall { floor: 1, direction: Down },
            ],
        };

        let idle_text = status_text(&idle);
        let busy_text = status_text(&busy);

        assert!(idle_text.contains("--- STATUS ---"));
        assert!(idle_text.contains("Doors: CLOSED"));
        assert!(idle_text.contains("Internal: None"));
        assert!(idle_text.contains("External: None"));
        assert!(busy_text.contains("Floor: 4"));
        assert!(busy_text.contains("Doors: OPEN"));
        assert!(busy_text.contains("Internal: 2, 7"));
        assert!(busy_text.contains("External: 5(UP), 1(DOWN)"));
    }

    /***************************************/
    /*              Sessions               */
    /***************************************/
    #[test]
    fn test_menu_session_press_and_move() {
        // Arrange
        let input = "2\n3\n1\n3\n6\n7\n";

        // Act
        let (output, lift) = run_session(input, StatusFormat::Text);

        // Assert
        assert!(output.starts_with("\n=== LIFT SIMULATOR ===\nFloors: 0-10, Starting at floor 0\n"));
        let pressed = position(&output, "Button pressed for floor 3");
        let moving = position(&output, "Moving UP from floor 0 to 3...");
        let passing = position(&output, "Passing floor 2...");
        let arrived = position(&output, "Arrived at floor 3");
        let opened = position(&output, "Doors OPEN at floor 3");
        let fulfilled = position(&output, "✓ Fulfilled internal request for floor 3");
        let status = position(&output, "--- STATUS ---");
        let goodbye = position(&output, "Goodbye!");
        assert!(pressed < moving);
        assert!(moving < passing && passing < arrived);
        assert!(arrived < opened && opened < fulfilled);
        assert!(fulfilled < status && status < goodbye);
        assert!(output.contains("Floor: 3"));
        assert!(output.contains("Internal: None"));
        assert!(!output.contains("Passing floor 3"));
        assert_eq!(lift.current_floor(), 3);
        assert_eq!(lift.door_state(), Open);
    }

    #[test]
    fn test_menu_session_invalid_input() {
        let input = "1\nabc\n3\n2\nsideways\n42\n";

        let (output, lift) = run_session(input, StatusFormat::Text);

        assert!(output.contains("Invalid number"));
        assert!(output.contains("Invalid direction"));
        assert!(output.contains("Invalid choice"));
        assert!(output.trim_end().ends_with("Goodbye!"));
        assert!(lift.status().external_calls.is_empty());
        assert_eq!(lift.current_floor(), 0);
    }

    #[test]
    fn test_menu_session_call_from_floor() {
        let input = "3\n2\ndown\n1\n2\n";

        let (output, lift) = run_session(input, StatusFormat::Text);

        assert!(output.contains("Lift called to floor 2, going DOWN"));
        assert!(output.contains("✓ Fulfilled external call at floor 2, direction DOWN"));
        assert!(lift.status().external_calls.is_empty());
    }

    #[test]
    fn test_session_reports_lift_errors() {
        let input = "move 12\npress 0\nmove 0\ncall -1 up\n";

        let (output, lift) = run_session(input, StatusFormat::Text);

        assert!(output.contains("Floor 12 does not exist! (valid range 0-10)"));
        assert!(output.contains("Floor -1 does not exist!"));
        assert_eq!(output.matches("Already at floor 0").count(), 2);
        assert_eq!(lift.status().internal_requests, Vec::<i32>::new());
    }

    #[test]
    fn test_session_door_commands() {
        let input = "4\n4\n5\nclose\n";

        let (output, lift) = run_session(input, StatusFormat::Text);

        let opening = position(&output, "Doors opening...");
        let already_open = position(&output, "Doors already open");
        let closing = position(&output, "Doors closing...");
        let already_closed = position(&output, "Doors already closed");
        assert!(opening < already_open && already_open < closing && closing < already_closed);
        assert_eq!(lift.door_state(), crate::shared::DoorState::Closed);
    }

    #[test]
    fn test_session_auto_close_before_move() {
        let input = "open\nmove 2\n";

        let (output, _lift) = run_session(input, StatusFormat::Text);

        let closed = position(&output, "Doors CLOSED");
        let moving = position(&output, "Moving UP from floor 0 to 2...");
        assert!(closed < moving);
        assert!(output.contains("Doors OPEN at floor 2"));
    }

    #[test]
    fn test_session_json_status() {
        let input = "press 4\ncall 6 up\nstatus\n";

        let (output, _lift) = run_session(input, StatusFormat::Json);

        let start = position(&output, "{");
        let end = output.rfind('}').unwrap();
        let status: LiftStatus = serde_json::from_str(&output[start..=end]).unwrap();
        assert_eq!(status.floor, 0);
        assert_eq!(status.internal_requests, vec![4]);
        assert_eq!(status.external_calls, vec![HallCall { floor: 6, direction: Up }]);
        assert!(output.contains("\"doors\": \"CLOSED\""));
    }

    #[test]
    fn test_session_without_lift_events() {
        // Purpose: A closed event channel must not stall the shell
        let lift = Arc::new(
            Lift::new(&LiftConfig::default(), &TimingConfig::default(), Arc::new(VirtualClock::new())).unwrap(),
        );
        let (event_tx, event_rx) = unbounded::<LiftEvent>();
        drop(event_tx);
        let mut output: Vec<u8> = Vec::new();

        let mut shell = Shell::new(lift.clone(), event_rx, "move 5\n".as_bytes(), &mut output, StatusFormat::Text);
        shell.run().unwrap();
        drop(shell);

        assert_eq!(lift.current_floor(), 5);
        assert!(String::from_utf8(output).unwrap().contains("Goodbye!"));
    }
}
