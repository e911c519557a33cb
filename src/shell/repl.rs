/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::StatusFormat;
use crate::lift::Lift;
use crate::shared::{LiftEvent, LiftResult};
use crate::shell::command::{self, Command, CommandError, MENU};
use crate::shell::render;

/**
 * Operator console for a single lift.
 *
 * Reads menu choices (or inline commands) from `input`, runs them on the
 * lift, and writes the lift's notifications and status to `output`.
 *
 * Blocking lift operations run on a scoped worker thread while the shell
 * renders the events coming in on `event_rx`, so progress shows up as it
 * happens. Every event of an operation is written before the next prompt.
 *
 * # Fields
 * - `lift`:            The lift being operated.
 * - `event_rx`:        Receives the lift's notifications.
 * - `input`:           Operator input, one answer per line.
 * - `output`:          Prompts, notifications and status.
 * - `status_format`:   How the status command renders.
 */
pub struct Shell<R: BufRead, W: Write> {
    lift: Arc<Lift>,
    event_rx: cbc::Receiver<LiftEvent>,
    input: R,
    output: W,
    status_format: StatusFormat,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(
        lift: Arc<Lift>,
        event_rx: cbc::Receiver<LiftEvent>,
        input: R,
        output: W,
        status_format: StatusFormat,
    ) -> Shell<R, W> {
        Shell {
            lift,
            event_rx,
            input,
            output,
            status_format,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n=== LIFT SIMULATOR ===")?;
        writeln!(
            self.output,
            "Floors: {}-{}, Starting at floor {}\n",
            self.lift.min_floor(),
            self.lift.max_floor(),
            self.lift.current_floor()
        )?;

        loop {
            for entry in MENU.iter() {
                writeln!(self.output, "{}", entry)?;
            }

            let command = match self.next_command()? {
                Some(Ok(command)) => command,
                Some(Err(e)) => {
                    writeln!(self.output, "{}", e)?;
                    continue;
                }
                None => Command::Exit,
            };

            if !self.execute(command)? {
                return Ok(());
            }
        }
    }

    /// Runs one command. Returns `false` once the operator asked to leave.
    pub fn execute(&mut self, command: Command) -> io::Result<bool> {
        debug!("Executing {:?}", command);
        match command {
            Command::Status => {
                render::write_status(&mut self.output, &self.lift.status(), self.status_format)?;
            }
            Command::Exit => {
                info!("Operator left the simulator");
                writeln!(self.output, "Goodbye!")?;
                return Ok(false);
            }
            _ => {
                if let Some(Err(e)) = self.run_lift_operation(command)? {
                    if e.is_informational() {
                        debug!("{:?} ignored: {}", command, e);
                    } else {
                        info!("{:?} rejected: {}", command, e);
                    }
                    render::write_error(&mut self.output, &e)?;
                }
            }
        }
        self.output.flush()?;
        Ok(true)
    }

    // `None` means the input ended.
    fn next_command(&mut self) -> io::Result<Option<Result<Command, CommandError>>> {
        let choice = match self.ask("\nChoice: ")? {
            Some(choice) => choice,
            None => return Ok(None),
        };
        writeln!(self.output)?;

        let command = match choice.as_str() {
            "1" => match self.ask("Which floor? ")? {
                Some(floor) => command::parse_floor(&floor).map(Command::MoveToFloor),
                None => return Ok(None),
            },
            "2" => match self.ask("Which floor? ")? {
                Some(floor) => command::parse_floor(&floor).map(Command::PressButton),
                None => return Ok(None),
            },
            "3" => {
                let floor = match self.ask("From which floor? ")? {
                    Some(floor) => floor,
                    None => return Ok(None),
                };
                match command::parse_floor(&floor) {
                    Ok(floor) => match self.ask("Direction (UP/DOWN)? ")? {
                        Some(direction) => command::parse_direction(&direction)
                            .map(|direction| Command::CallLift(floor, direction)),
                        None => return Ok(None),
                    },
                    Err(e) => Err(e),
                }
            }
            "4" => Ok(Command::OpenDoors),
            "5" => Ok(Command::CloseDoors),
            "6" => Ok(Command::Status),
            "7" => Ok(Command::Exit),
            line => command::parse_inline(line),
        };
        Ok(Some(command))
    }

    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Ok(None);
        }
        Ok(Some(answer.trim().to_string()))
    }

    /**
     * Runs a lift operation on a worker thread and renders its events live.
     *
     * Returns `None` only if the worker died without reporting a result.
     */
    fn run_lift_operation(&mut self, command: Command) -> io::Result<Option<LiftResult<()>>> {
        let lift = &*self.lift;
        let output = &mut self.output;
        let mut event_rx = self.event_rx.clone();

        thread::scope(|scope| {
            let (done_tx, done_rx) = cbc::bounded::<LiftResult<()>>(1);
            scope.spawn(move || {
                let _ = done_tx.send(apply(lift, command));
            });

            let result = loop {
                let progress = cbc::select! {
                    recv(event_rx) -> event => match event {
                        Ok(event) => Progress::Event(event),
                        Err(_) => Progress::EventsClosed,
                    },
                    recv(done_rx) -> result => Progress::Done(result.ok()),
                };

                match progress {
                    Progress::Event(event) => render::write_event(output, &event)?,
                    Progress::EventsClosed => event_rx = cbc::never(),
                    Progress::Done(result) => break result,
                }
                output.flush()?;
            };

            for event in event_rx.try_iter() {
                render::write_event(output, &event)?;
            }
            Ok(result)
        })
    }
}

enum Progress {
    Event(LiftEvent),
    EventsClosed,
    Done(Option<LiftResult<()>>),
}

fn apply(lift: &Lift, command: Command) -> LiftResult<()> {
    match command {
        Command::MoveToFloor(floor) => lift.move_to_floor(floor),
        Command::PressButton(floor) => lift.press_button(floor),
        Command::CallLift(floor, direction) => lift.call_lift(floor, direction),
        Command::OpenDoors => lift.open_doors(),
        Command::CloseDoors => lift.close_doors(),
        Command::Status | Command::Exit => Ok(()),
    }
}
