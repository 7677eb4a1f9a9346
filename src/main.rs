use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use elevator_sim::io::reporting;
use elevator_sim::model::person::Floor;
use elevator_sim::simulation::renderer::ConsoleRenderer;
use elevator_sim::strategy::arrivals::{FileArrivals, RandomArrivals};
use elevator_sim::strategy::moving::{PushyPassenger, RandomAlgorithm, ShortSighted};
use elevator_sim::strategy::traits::{ArrivalGenerator, MovingAlgorithm};
use elevator_sim::{Simulation, SimulationConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    Random,
    Pushy,
    ShortSighted,
}

#[derive(Parser, Debug)]
#[command(name = "elevator-sim")]
#[command(about = "Simulate elevators moving people between floors", long_about = None)]
struct Args {
    /// Number of floors in the building
    #[arg(short, long, default_value = "6")]
    floors: Floor,

    /// Number of elevators
    #[arg(short, long, default_value = "6")]
    elevators: usize,

    /// Passengers each elevator can hold
    #[arg(short, long, default_value = "3")]
    capacity: usize,

    /// Rounds to simulate
    #[arg(short, long, default_value = "15")]
    rounds: usize,

    /// Seed for the random source
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// How elevators decide where to go
    #[arg(short, long, value_enum, default_value = "pushy")]
    algorithm: Algorithm,

    /// Replay arrivals from a CSV arrival table instead of generating them
    #[arg(long)]
    arrivals_file: Option<PathBuf>,

    /// Random people arriving each round (ignored with --arrivals-file)
    #[arg(short, long)]
    people_per_round: Option<usize>,

    /// Log every boarding, arrival and move
    #[arg(long)]
    visualize: bool,

    /// Milliseconds to pause between rounds when visualizing
    #[arg(long, default_value = "0")]
    pace_ms: u64,

    /// Write per-round history to this CSV file
    #[arg(long)]
    history: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose {
        "elevator_sim=debug"
    } else {
        "elevator_sim=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.parse()?))
        .init();

    // 1. SETUP CONFIGURATION
    let config = SimulationConfig {
        num_floors: args.floors,
        num_elevators: args.elevators,
        elevator_capacity: args.capacity,
        visualize: args.visualize,
        seed: args.seed,
    };

    // 2. CHOOSE THE POLICIES
    let arrival_generator: Box<dyn ArrivalGenerator> = match &args.arrivals_file {
        Some(path) => {
            if args.people_per_round.is_some() {
                warn!("--people-per-round is ignored when --arrivals-file is given");
            }
            info!(path = %path.display(), "loading arrival table");
            Box::new(FileArrivals::from_path(args.floors, path)?)
        }
        None => Box::new(RandomArrivals::new(args.floors, args.people_per_round)?),
    };

    let moving_algorithm: Box<dyn MovingAlgorithm> = match args.algorithm {
        Algorithm::Random => Box::new(RandomAlgorithm::new()),
        Algorithm::Pushy => Box::new(PushyPassenger::new()),
        Algorithm::ShortSighted => Box::new(ShortSighted::new()),
    };

    // 3. INITIALIZE & RUN
    let renderer = ConsoleRenderer::new(config.visualize, Duration::from_millis(args.pace_ms));
    let mut sim = Simulation::new(config, arrival_generator, moving_algorithm)?
        .with_renderer(Box::new(renderer));

    let stats = sim.run(args.rounds)?;

    // 4. EXPORT RESULTS
    if let Some(path) = &args.history {
        reporting::write_round_log(path, &sim.history)?;
    }

    info!(
        num_iterations = stats.num_iterations,
        total_people = stats.total_people,
        people_completed = stats.people_completed,
        max_time = stats.max_time,
        min_time = stats.min_time,
        avg_time = stats.avg_time,
        "statistics"
    );
    Ok(())
}
