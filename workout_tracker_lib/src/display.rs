//! Text shown for a workout in the list and in its map popup.

use crate::workout::{Activity, Workout, WorkoutType};

/// One `icon value unit` row of a list entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl Detail {
    fn new(icon: &'static str, value: String, unit: &'static str) -> Self {
        Self { icon, value, unit }
    }
}

pub fn icon(workout_type: WorkoutType) -> &'static str {
    match workout_type {
        WorkoutType::Running => "🏃‍♂️",
        WorkoutType::Cycling => "🚴‍♂️",
    }
}

pub fn popup_content(workout: &Workout) -> String {
    format!("{} {}", icon(workout.workout_type()), workout.description())
}

pub fn list_class(workout: &Workout) -> String {
    format!("workout workout--{}", workout.workout_type().as_str())
}

/// Distance and duration, then the variant metric and variant field.
pub fn details(workout: &Workout) -> Vec<Detail> {
    let mut rows = vec![
        Detail::new(icon(workout.workout_type()), workout.distance().to_string(), "km"),
        Detail::new("⏱", workout.duration().to_string(), "min"),
    ];

    match *workout.activity() {
        Activity::Running { cadence, pace } => {
            rows.push(Detail::new("⚡️", format!("{pace:.1}"), "min/km"));
            rows.push(Detail::new("🦶🏼", format!("{cadence:.0}"), "spm"));
        }
        Activity::Cycling { elevation_gain, speed } => {
            rows.push(Detail::new("⚡️", format!("{speed:.1}"), "km/h"));
            rows.push(Detail::new("⛰", elevation_gain.to_string(), "m"));
        }
    }

    rows
}
