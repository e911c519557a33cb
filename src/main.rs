/* 3rd party libraries */
use clap::Parser;
use crossbeam_channel as cbc;
use log::info;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

/* Custom libraries */
use config::{Config, StatusFormat};
use lift::{Clock, Lift, RealClock, VirtualClock};
use shared::LiftEvent;
use shell::Shell;

/* Modules */
mod config;
mod lift;
mod shared;
mod shell;

/// Interactive simulator for a single lift car.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Configuration file (defaults to ./config.toml when present)
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Lowest floor served
    #[clap(long, allow_hyphen_values = true)]
    min_floor: Option<i32>,

    /// Highest floor served
    #[clap(long, allow_hyphen_values = true)]
    max_floor: Option<i32>,

    /// Floor the car starts at
    #[clap(long, allow_hyphen_values = true)]
    start_floor: Option<i32>,

    /// Simulate door and travel time without waiting for it
    #[clap(long)]
    instant: bool,

    /// Render status as JSON
    #[clap(long)]
    json: bool,

    /// Default log filter, overridden by RUST_LOG
    #[clap(long)]
    log_level: Option<String>,
}

/* Main */
fn main() -> io::Result<()> {
    let args = Args::parse();

    // Load the configuration and apply command line overrides
    let mut config = unwrap_or_exit!(Config::load(args.config.as_deref()));
    if let Some(min_floor) = args.min_floor {
        config.lift.min_floor = min_floor;
    }
    if let Some(max_floor) = args.max_floor {
        config.lift.max_floor = max_floor;
    }
    if let Some(start_floor) = args.start_floor {
        config.lift.start_floor = start_floor;
    }
    if args.json {
        config.shell.status_format = StatusFormat::Json;
    }
    if let Some(log_level) = args.log_level {
        config.shell.log_level = log_level;
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.shell.log_level.as_str()),
    )
    .init();
    unwrap_or_exit!(config.validate());

    info!(
        "Starting lift: floors {}-{}, start floor {}, {} ms doors, {} ms per floor",
        config.lift.min_floor,
        config.lift.max_floor,
        config.lift.start_floor,
        config.timing.door_time_ms,
        config.timing.floor_travel_time_ms
    );

    // Initialize the lift and its event channel
    let (event_tx, event_rx) = cbc::unbounded::<LiftEvent>();
    let virtual_clock = args.instant.then(|| Arc::new(VirtualClock::new()));
    let clock: Arc<dyn Clock> = match &virtual_clock {
        Some(virtual_clock) => virtual_clock.clone(),
        None => Arc::new(RealClock),
    };
    let lift = unwrap_or_exit!(Lift::new(&config.lift, &config.timing, clock));
    let lift = Arc::new(lift.with_events(event_tx));

    // Run the operator shell until exit or end of input
    let stdin = io::stdin();
    let mut shell = Shell::new(
        lift,
        event_rx,
        stdin.lock(),
        io::stdout(),
        config.shell.status_format,
    );
    let result = shell.run();

    if let Some(virtual_clock) = virtual_clock {
        info!("Simulated time: {:?}", virtual_clock.elapsed());
    }
    result
}
