//! Raw form input and the validation rules applied before a workout is built.

use crate::{
    error::{Field, ValidationError},
    workout::WorkoutType,
};

/// Form contents as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutForm {
    pub workout_type: WorkoutType,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation_gain: String,
}

/// Numbers that passed validation, ready to build a workout from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutInput {
    Running { distance: f64, duration: f64, cadence: f64 },
    Cycling { distance: f64, duration: f64, elevation_gain: f64 },
}

impl WorkoutInput {
    /// Checks a running workout. All values must be finite and positive.
    pub fn running(distance: f64, duration: f64, cadence: f64) -> Result<Self, ValidationError> {
        let distance = finite(Field::Distance, distance)?;
        let duration = finite(Field::Duration, duration)?;
        let cadence = finite(Field::Cadence, cadence)?;
        positive(Field::Distance, distance)?;
        positive(Field::Duration, duration)?;
        positive(Field::Cadence, cadence)?;
        Ok(WorkoutInput::Running { distance, duration, cadence })
    }

    /// Checks a cycling workout. Zero elevation gain is fine, negative is not.
    pub fn cycling(distance: f64, duration: f64, elevation_gain: f64) -> Result<Self, ValidationError> {
        let distance = finite(Field::Distance, distance)?;
        let duration = finite(Field::Duration, duration)?;
        let elevation_gain = finite(Field::ElevationGain, elevation_gain)?;
        positive(Field::Distance, distance)?;
        positive(Field::Duration, duration)?;
        if elevation_gain < 0.0 {
            return Err(ValidationError::NegativeElevation);
        }
        Ok(WorkoutInput::Cycling { distance, duration, elevation_gain })
    }

    pub fn distance_duration(&self) -> (f64, f64) {
        match *self {
            WorkoutInput::Running { distance, duration, .. } | WorkoutInput::Cycling { distance, duration, .. } => {
                (distance, duration)
            }
        }
    }
}

impl WorkoutForm {
    /// Only the fields belonging to the selected type are looked at.
    pub fn validate(&self) -> Result<WorkoutInput, ValidationError> {
        let distance = parse(Field::Distance, &self.distance)?;
        let duration = parse(Field::Duration, &self.duration)?;

        match self.workout_type {
            WorkoutType::Running => {
                let cadence = parse(Field::Cadence, &self.cadence)?;
                WorkoutInput::running(distance, duration, cadence)
            }
            WorkoutType::Cycling => {
                let elevation_gain = parse(Field::ElevationGain, &self.elevation_gain)?;
                WorkoutInput::cycling(distance, duration, elevation_gain)
            }
        }
    }

    /// Empties every input field but keeps the selected type.
    pub fn clear(&mut self) {
        self.distance.clear();
        self.duration.clear();
        self.cadence.clear();
        self.elevation_gain.clear();
    }
}

fn parse(field: Field, raw: &str) -> Result<f64, ValidationError> {
    let value = raw.trim().parse::<f64>().map_err(|_| ValidationError::NotANumber(field))?;
    finite(field, value)
}

fn finite(field: Field, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotANumber(field))
    }
}

fn positive(field: Field, value: f64) -> Result<(), ValidationError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive(field))
    }
}
