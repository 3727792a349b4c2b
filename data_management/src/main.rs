use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use data_management::{JsonFileStore, STORE_PATH, import_workouts, list_line};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_tracker_lib::{
    controller::AppController,
    coords::Coords,
    form::WorkoutForm,
    map_view::NoMap,
    store::{WorkoutRecord, WorkoutStore},
    workout::{WorkoutId, WorkoutType},
};

#[derive(Parser)]
#[command(name = "WorkoutCLI")]
#[command(about = "A CLI to inspect and edit stored workouts", long_about = None)]
struct Cli {
    /// Local storage dump to operate on
    #[arg(long, default_value = STORE_PATH)]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all workouts, oldest first
    List,
    /// Record a run at the given position
    AddRunning {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lng: f64,
        /// Kilometres
        distance: String,
        /// Minutes
        duration: String,
        /// Steps per minute
        cadence: String,
    },
    /// Record a ride at the given position
    AddCycling {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lng: f64,
        /// Kilometres
        distance: String,
        /// Minutes
        duration: String,
        /// Metres
        #[arg(allow_negative_numbers = true)]
        elevation_gain: String,
    },
    /// Count an interaction with a workout
    Click { id: String },
    /// Replace the stored list with a JSON array exported from the browser
    Import { file: PathBuf },
    /// Print the stored list as JSON
    Export,
    /// Delete every workout. BE CAREFUL
    Reset,
}

type Controller = AppController<NoMap, JsonFileStore>;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info,workout_tracker_lib=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let store = WorkoutStore::new(JsonFileStore::open(&cli.store));

    match cli.command {
        Commands::List => {
            let controller = Controller::new(store);
            for workout in controller.workouts() {
                println!("{}", list_line(workout));
            }
        }
        Commands::AddRunning { lat, lng, distance, duration, cadence } => {
            let form = WorkoutForm {
                workout_type: WorkoutType::Running,
                distance,
                duration,
                cadence,
                elevation_gain: String::new(),
            };
            add(store, Coords::new(lat, lng), &form)?;
        }
        Commands::AddCycling { lat, lng, distance, duration, elevation_gain } => {
            let form = WorkoutForm {
                workout_type: WorkoutType::Cycling,
                distance,
                duration,
                cadence: String::new(),
                elevation_gain,
            };
            add(store, Coords::new(lat, lng), &form)?;
        }
        Commands::Click { id } => {
            let mut controller = Controller::new(store);
            let Some(workout) = controller.focus_workout(&WorkoutId::from(id.as_str())) else {
                bail!("No workout with id {id}");
            };
            let line = list_line(workout);
            controller.save().context("Failed to save workouts")?;
            println!("{line}");
        }
        Commands::Import { file } => {
            let json = std::fs::read_to_string(&file).with_context(|| format!("Failed to read {}", file.display()))?;
            let mut store = store;
            let summary = import_workouts(&mut store, &json)?;
            println!("Imported {} of {} workouts", summary.kept, summary.read);
        }
        Commands::Export => {
            let records: Vec<WorkoutRecord> = store.load().iter().map(WorkoutRecord::from).collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commands::Reset => {
            Controller::new(store).reset().context("Failed to clear stored workouts")?;
        }
    }

    Ok(())
}

fn add(store: WorkoutStore<JsonFileStore>, coords: Coords, form: &WorkoutForm) -> anyhow::Result<()> {
    let mut controller = Controller::new(store);
    controller.select_location(coords);

    let workout = controller.submit(form).map_err(|err| anyhow::anyhow!("{err} ({})", err.user_message()))?;
    let line = list_line(workout);
    controller.save().context("Failed to save workouts")?;
    println!("{line}");
    Ok(())
}
