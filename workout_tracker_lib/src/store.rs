//! Persistence of the workout list in a key-value store.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::{
    config::STORAGE_KEY,
    coords::Coords,
    error::{StoreResult, ValidationError},
    form::WorkoutInput,
    workout::{Activity, Workout, WorkoutId},
};

/// String key-value storage, e.g. the browser's local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// On-disk shape of a single workout.
///
/// `click` and `desription` are accepted so lists written by the older
/// JavaScript version of the app still load.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    pub coords: Coords,
    pub distance: f64,
    pub duration: f64,
    pub date: DateTime<FixedOffset>,
    pub id: String,
    #[serde(default, alias = "click")]
    pub click_count: u32,
    #[serde(flatten)]
    pub activity: ActivityRecord,
    #[serde(default, alias = "desription")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActivityRecord {
    Running {
        cadence: f64,
        #[serde(default)]
        pace: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    Cycling {
        elevation_gain: f64,
        #[serde(default)]
        speed: Option<f64>,
    },
}

impl From<&Workout> for WorkoutRecord {
    fn from(workout: &Workout) -> Self {
        let activity = match *workout.activity() {
            Activity::Running { cadence, pace } => ActivityRecord::Running { cadence, pace: Some(pace) },
            Activity::Cycling { elevation_gain, speed } => ActivityRecord::Cycling { elevation_gain, speed: Some(speed) },
        };

        Self {
            coords: workout.coords(),
            distance: workout.distance(),
            duration: workout.duration(),
            date: workout.date(),
            id: workout.id().to_string(),
            click_count: workout.click_count(),
            activity,
            description: Some(workout.description().to_owned()),
        }
    }
}

/// Stored derived values are ignored; the variant is rebuilt from its base
/// fields under the same rules the form enforces.
impl TryFrom<WorkoutRecord> for Workout {
    type Error = ValidationError;

    fn try_from(record: WorkoutRecord) -> Result<Self, Self::Error> {
        if !record.coords.is_finite() {
            return Err(ValidationError::InvalidCoordinates);
        }

        let input = match record.activity {
            ActivityRecord::Running { cadence, .. } => WorkoutInput::running(record.distance, record.duration, cadence)?,
            ActivityRecord::Cycling { elevation_gain, .. } => {
                WorkoutInput::cycling(record.distance, record.duration, elevation_gain)?
            }
        };

        let id = if record.id.is_empty() {
            WorkoutId::generate()
        } else {
            WorkoutId::from(record.id)
        };

        Ok(Workout::rehydrate(id, record.date, record.coords, record.click_count, &input))
    }
}

pub fn encode_workouts(workouts: &[Workout]) -> serde_json::Result<String> {
    let records: Vec<WorkoutRecord> = workouts.iter().map(WorkoutRecord::from).collect();
    serde_json::to_string(&records)
}

/// Parses a stored list. Fails only when the payload is not a JSON array;
/// individual records that are malformed or break a workout invariant are
/// skipped. A record repeating an earlier id gets a fresh one.
pub fn decode_workouts(json: &str) -> serde_json::Result<Vec<Workout>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let mut seen = HashSet::new();
    let mut workouts = Vec::with_capacity(values.len());

    for (index, value) in values.into_iter().enumerate() {
        let record = match serde_json::from_value::<WorkoutRecord>(value) {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(index, error = %err, "Skipping malformed workout record");
                continue;
            }
        };

        let mut workout = match Workout::try_from(record) {
            Ok(workout) => workout,
            Err(err) => {
                tracing::warn!(index, error = %err, "Skipping invalid workout record");
                continue;
            }
        };

        while !seen.insert(workout.id().clone()) {
            let id = WorkoutId::generate();
            tracing::warn!(index, old_id = %workout.id(), new_id = %id, "Workout id already used, assigning a new one");
            workout.reassign_id(id);
        }

        workouts.push(workout);
    }

    Ok(workouts)
}

/// Reads and writes the whole workout list under a single key.
pub struct WorkoutStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> WorkoutStore<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            key: STORAGE_KEY.to_owned(),
        }
    }

    /// Overwrites the stored list.
    pub fn save(&mut self, workouts: &[Workout]) -> StoreResult<()> {
        let json = encode_workouts(workouts)?;
        self.backend.set(&self.key, &json)?;
        tracing::debug!(count = workouts.len(), key = %self.key, "Saved workouts");
        Ok(())
    }

    /// Anything that cannot be read is treated as an empty list.
    pub fn load(&self) -> Vec<Workout> {
        let json = match self.backend.get(&self.key) {
            Ok(Some(json)) => json,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "Could not read stored workouts");
                return Vec::new();
            }
        };

        match decode_workouts(&json) {
            Ok(workouts) => {
                tracing::info!(count = workouts.len(), "Loaded workouts");
                workouts
            }
            Err(err) => {
                tracing::warn!(error = %err, "Stored workouts are not a valid list, starting empty");
                Vec::new()
            }
        }
    }

    pub fn clear(&mut self) -> StoreResult<()> {
        self.backend.remove(&self.key)
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn date() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600).unwrap().with_ymd_and_hms(2024, 3, 9, 18, 0, 0).unwrap()
    }

    fn sample() -> Vec<Workout> {
        vec![
            Workout::running(Coords::new(56.17, 10.19), 5.2, 24.0, 178.0, date()),
            Workout::cycling(Coords::new(56.2, 10.1), 20.0, 95.0, 0.0, date()),
        ]
    }

    #[test]
    fn record_has_flat_layout() {
        let workouts = sample();
        let value = serde_json::to_value(WorkoutRecord::from(&workouts[1])).unwrap();
        assert_eq!(value["type"], "cycling");
        assert_eq!(value["coords"], serde_json::json!([56.2, 10.1]));
        assert_eq!(value["elevationGain"], 0.0);
        assert_eq!(value["clickCount"], 0);
        assert_eq!(value["description"], "Cycling on March 9");
        assert!(value["speed"].is_number());
    }

    #[test]
    fn save_then_load_keeps_order_and_values() {
        let workouts = sample();
        let mut store = WorkoutStore::new(MemoryStore::new());
        store.save(&workouts).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, workouts);
    }

    #[test]
    fn missing_key_loads_empty() {
        let store = WorkoutStore::new(MemoryStore::new());
        assert!(store.load().is_empty());
    }

    #[test]
    fn garbage_loads_empty() {
        let mut backend = MemoryStore::new();
        backend.set(STORAGE_KEY, "{not json").unwrap();
        assert!(WorkoutStore::new(backend).load().is_empty());

        let mut backend = MemoryStore::new();
        backend.set(STORAGE_KEY, "{\"coords\": [1, 2]}").unwrap();
        assert!(WorkoutStore::new(backend).load().is_empty());
    }

    #[test]
    fn invalid_records_are_skipped() {
        let json = r#"[
            {"coords":[1.0,2.0],"distance":0,"duration":10,"date":"2024-03-09T18:00:00+01:00","id":"a","type":"running","cadence":170},
            {"coords":[1.0,2.0],"distance":5,"duration":10,"date":"2024-03-09T18:00:00+01:00","id":"b","type":"swimming"},
            {"coords":[1.0,2.0],"distance":5,"duration":10,"date":"2024-03-09T18:00:00+01:00","id":"c","type":"cycling","elevationGain":-1},
            {"coords":[1.0,2.0],"distance":5,"duration":10,"date":"2024-03-09T18:00:00+01:00","id":"d","type":"running","cadence":170}
        ]"#;
        let workouts = decode_workouts(json).unwrap();
        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts[0].id().as_str(), "d");
        assert_eq!(workouts[0].distance(), 5.0);
    }

    #[test]
    fn repeated_ids_are_replaced_not_dropped() {
        // The JavaScript app derived ids from the time zone name, so every
        // workout it stored shares one id.
        let json = r#"[
            {"date":"2024-06-01T08:15:30.123Z","id":"mer Time)","click":0,"coords":[56.16,10.2],
             "duration":24,"distance":5.2,"type":"running","cadence":178,"pace":0.21,"desription":"Running on June 1"},
            {"date":"2024-06-02T17:40:00.000Z","id":"mer Time)","click":0,"coords":[56.2,10.1],
             "duration":95,"distance":20,"type":"cycling","elevationGain":0,"speed":12.63,"desription":"Cycling on June 2"}
        ]"#;
        let workouts = decode_workouts(json).unwrap();
        assert_eq!(workouts.len(), 2);
        assert_eq!(workouts[0].id().as_str(), "mer Time)");
        assert_ne!(workouts[1].id(), workouts[0].id());
        assert_eq!(workouts[1].description(), "Cycling on June 2");

        let reloaded = decode_workouts(&encode_workouts(&workouts).unwrap()).unwrap();
        assert_eq!(reloaded, workouts);
    }

    #[test]
    fn full_precision_coordinates_survive_save_and_load() {
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 11) as f64 / (1u64 << 53) as f64
        };
        let workouts: Vec<Workout> = (0..500)
            .map(|_| {
                let coords = Coords::new(next() * 180.0 - 90.0, next() * 360.0 - 180.0);
                Workout::cycling(coords, 1.0 + next() * 50.0, 1.0 + next() * 300.0, next() * 900.0, date())
            })
            .collect();

        let mut store = WorkoutStore::new(MemoryStore::new());
        store.save(&workouts).unwrap();
        assert_eq!(store.load(), workouts);
    }

    #[test]
    fn derived_values_are_recomputed_on_load() {
        let json = r#"[{"coords":[1.0,2.0],"distance":5,"duration":25,"date":"2024-03-09T18:00:00+01:00",
            "id":"x","clickCount":2,"type":"running","cadence":170,"pace":999,"description":"nonsense"}]"#;
        let workouts = decode_workouts(json).unwrap();
        assert_eq!(*workouts[0].activity(), Activity::Running { cadence: 170.0, pace: 5.0 });
        assert_eq!(workouts[0].description(), "Running on March 9");
        assert_eq!(workouts[0].click_count(), 2);
    }

    #[test]
    fn legacy_records_load() {
        let json = r#"[{"date":"2024-06-01T08:15:30.123Z","id":"0:00 (CEST)","click":0,
            "coords":[56.16,10.2],"duration":95,"distance":20,"type":"cycling",
            "elevationGain":120,"speed":12.63,"desription":"Cycling on June 1"}]"#;
        let workouts = decode_workouts(json).unwrap();
        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts[0].id().as_str(), "0:00 (CEST)");
        assert_eq!(workouts[0].description(), "Cycling on June 1");
        assert_eq!(workouts[0].coords(), Coords::new(56.16, 10.2));
    }

    #[test]
    fn clear_removes_the_key() {
        let mut store = WorkoutStore::new(MemoryStore::new());
        store.save(&sample()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.backend().get(STORAGE_KEY).unwrap(), None);
    }
}
