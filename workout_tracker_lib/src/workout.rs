use chrono::{DateTime, Datelike, FixedOffset};
use uuid::Uuid;

use crate::{coords::Coords, error::ValidationError, form::WorkoutInput};

pub const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September", "October", "November", "December",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for WorkoutId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for WorkoutId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl std::fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WorkoutType {
    #[default]
    Running,
    Cycling,
}

impl WorkoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Running => "running",
            WorkoutType::Cycling => "cycling",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::Cycling => "Cycling",
        }
    }
}

impl std::str::FromStr for WorkoutType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(WorkoutType::Running),
            "cycling" => Ok(WorkoutType::Cycling),
            other => Err(ValidationError::UnknownWorkoutType(other.to_owned())),
        }
    }
}

/// Variant specific data together with its derived metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activity {
    /// `pace` is in min/km.
    Running { cadence: f64, pace: f64 },
    /// `speed` is in km/h.
    Cycling { elevation_gain: f64, speed: f64 },
}

impl Activity {
    pub fn running(distance: f64, duration: f64, cadence: f64) -> Self {
        Activity::Running {
            cadence,
            pace: duration / distance,
        }
    }

    pub fn cycling(distance: f64, duration: f64, elevation_gain: f64) -> Self {
        Activity::Cycling {
            elevation_gain,
            speed: distance / (duration / 60.0),
        }
    }

    pub fn workout_type(&self) -> WorkoutType {
        match self {
            Activity::Running { .. } => WorkoutType::Running,
            Activity::Cycling { .. } => WorkoutType::Cycling,
        }
    }
}

/// A recorded workout. Everything except the interaction counter is fixed
/// once the workout is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: WorkoutId,
    date: DateTime<FixedOffset>,
    coords: Coords,
    distance: f64,
    duration: f64,
    click_count: u32,
    activity: Activity,
    description: String,
}

impl Workout {
    /// Callers must have checked that `distance` and `duration` are positive.
    pub fn running(coords: Coords, distance: f64, duration: f64, cadence: f64, date: DateTime<FixedOffset>) -> Self {
        Self::build(WorkoutId::generate(), date, coords, distance, duration, 0, Activity::running(distance, duration, cadence))
    }

    /// Callers must have checked that `distance` and `duration` are positive.
    pub fn cycling(coords: Coords, distance: f64, duration: f64, elevation_gain: f64, date: DateTime<FixedOffset>) -> Self {
        Self::build(WorkoutId::generate(), date, coords, distance, duration, 0, Activity::cycling(distance, duration, elevation_gain))
    }

    pub fn from_input(input: &WorkoutInput, coords: Coords, date: DateTime<FixedOffset>) -> Self {
        match *input {
            WorkoutInput::Running { distance, duration, cadence } => Self::running(coords, distance, duration, cadence, date),
            WorkoutInput::Cycling { distance, duration, elevation_gain } => Self::cycling(coords, distance, duration, elevation_gain, date),
        }
    }

    /// Rebuilds a workout from persisted base fields. The derived metric and
    /// the description are computed again rather than trusted.
    pub(crate) fn rehydrate(
        id: WorkoutId,
        date: DateTime<FixedOffset>,
        coords: Coords,
        click_count: u32,
        input: &WorkoutInput,
    ) -> Self {
        let (distance, duration) = input.distance_duration();
        let activity = match *input {
            WorkoutInput::Running { cadence, .. } => Activity::running(distance, duration, cadence),
            WorkoutInput::Cycling { elevation_gain, .. } => Activity::cycling(distance, duration, elevation_gain),
        };
        Self::build(id, date, coords, distance, duration, click_count, activity)
    }

    fn build(
        id: WorkoutId,
        date: DateTime<FixedOffset>,
        coords: Coords,
        distance: f64,
        duration: f64,
        click_count: u32,
        activity: Activity,
    ) -> Self {
        let description = describe(activity.workout_type(), &date);
        Self {
            id,
            date,
            coords,
            distance,
            duration,
            click_count,
            activity,
            description,
        }
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn date(&self) -> DateTime<FixedOffset> {
        self.date
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    /// Kilometres.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Minutes.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn click_count(&self) -> u32 {
        self.click_count
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn workout_type(&self) -> WorkoutType {
        self.activity.workout_type()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn reassign_id(&mut self, id: WorkoutId) {
        self.id = id;
    }

    pub fn record_interaction(&mut self) {
        self.click_count = self.click_count.saturating_add(1);
    }
}

/// "Running on April 14"
pub fn describe(workout_type: WorkoutType, date: &DateTime<FixedOffset>) -> String {
    format!("{} on {} {}", workout_type.label(), MONTHS[date.month0() as usize], date.day())
}
