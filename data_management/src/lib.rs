use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::PathBuf,
};

use const_format::concatcp;
use anyhow::Context;
use workout_tracker_lib::{
    display,
    error::{StoreError, StoreResult},
    store::{KeyValueStore, WorkoutStore, decode_workouts},
    workout::{Activity, Workout},
};

pub const DATA_DIR: &str = "data/";
pub const STORE_PATH: &str = concatcp!(DATA_DIR, "local_storage.json");

/// Key-value store kept as a single JSON object on disk, laid out like a
/// dump of the browser's local storage.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_entries(&self) -> StoreResult<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(self.backend_error(err)),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.backend_error(err))?;
        }

        // Written to a sibling file first, then renamed over the target
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(entries)?).map_err(|err| self.backend_error(err))?;
        fs::rename(&tmp, &self.path).map_err(|err| self.backend_error(err))
    }

    fn backend_error(&self, err: std::io::Error) -> StoreError {
        StoreError::Backend(format!("{}: {err}", self.path.display()))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_owned(), value.to_owned());
        self.write_entries(&entries)
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub read: usize,
    pub kept: usize,
}

/// Replaces the stored list with the workouts in `json`, a JSON array as
/// found in the browser's `localStorage.workouts`.
pub fn import_workouts<S: KeyValueStore>(store: &mut WorkoutStore<S>, json: &str) -> anyhow::Result<ImportSummary> {
    let read = serde_json::from_str::<Vec<serde_json::Value>>(json)
        .context("Import file is not a JSON array")?
        .len();
    let workouts = decode_workouts(json).context("Import file is not a JSON array")?;
    store.save(&workouts).context("Failed to save imported workouts")?;

    Ok(ImportSummary {
        read,
        kept: workouts.len(),
    })
}

/// One tab separated line per workout for `list`.
pub fn list_line(workout: &Workout) -> String {
    let metric = match *workout.activity() {
        Activity::Running { pace, cadence } => format!("{pace:.1} min/km, {cadence:.0} spm"),
        Activity::Cycling { speed, elevation_gain } => format!("{speed:.1} km/h, {elevation_gain} m"),
    };

    format!(
        "{}\t{}\t{}\t{} {}\t{} km\t{} min\t{}\t{} clicks",
        workout.id(),
        workout.workout_type().as_str(),
        workout.date().format("%d/%m/%Y %H:%M"),
        display::icon(workout.workout_type()),
        workout.description(),
        workout.distance(),
        workout.duration(),
        metric,
        workout.click_count(),
    )
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use workout_tracker_lib::{config::STORAGE_KEY, coords::Coords};

    use super::*;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("nothing.json"));
        assert_eq!(store.get(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn set_creates_parent_dirs_and_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path().join("nested/store.json"));
        store.set("theme", "dark").unwrap();
        store.set(STORAGE_KEY, "[]").unwrap();

        let reopened = JsonFileStore::open(dir.path().join("nested/store.json"));
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(reopened.get(STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn remove_only_drops_one_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path().join("store.json"));
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.remove("a").unwrap();
        store.remove("never-set").unwrap();

        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn workouts_survive_a_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let date = FixedOffset::east_opt(3600).unwrap().with_ymd_and_hms(2024, 8, 2, 6, 45, 0).unwrap();
        let workouts = vec![Workout::running(Coords::new(55.6, 12.5), 10.0, 50.0, 172.0, date)];

        let mut store = WorkoutStore::new(JsonFileStore::open(dir.path().join("store.json")));
        store.save(&workouts).unwrap();

        let store = WorkoutStore::new(JsonFileStore::open(dir.path().join("store.json")));
        assert_eq!(store.load(), workouts);
    }

    #[test]
    fn corrupt_file_is_a_backend_or_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();
        assert!(JsonFileStore::open(&path).get(STORAGE_KEY).is_err());
    }

    #[test]
    fn import_reports_read_and_kept_records() {
        let dir = tempfile::tempdir().unwrap();
        let json = r#"[
            {"date":"2024-06-01T08:15:30.123Z","id":"mer Time)","click":3,"coords":[56.16,10.2],
             "duration":24,"distance":5.2,"type":"running","cadence":178,"desription":"Running on June 1"},
            {"date":"2024-06-02T17:40:00.000Z","id":"mer Time)","click":0,"coords":[56.2,10.1],
             "duration":95,"distance":20,"type":"cycling","elevationGain":0,"desription":"Cycling on June 2"},
            {"date":"2024-06-03T07:00:00.000Z","id":"mer Time)","click":0,"coords":[56.2,10.1],
             "duration":0,"distance":4,"type":"running","cadence":170}
        ]"#;

        let mut store = WorkoutStore::new(JsonFileStore::open(dir.path().join("store.json")));
        let summary = import_workouts(&mut store, json).unwrap();
        assert_eq!(summary, ImportSummary { read: 3, kept: 2 });

        let loaded = WorkoutStore::new(JsonFileStore::open(dir.path().join("store.json"))).load();
        assert_eq!(loaded.len(), 2);
        assert_ne!(loaded[0].id(), loaded[1].id());
        assert_eq!(loaded[0].click_count(), 3);
    }

    #[test]
    fn import_rejects_non_array_and_leaves_store_alone() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = WorkoutStore::new(JsonFileStore::open(dir.path().join("store.json")));
        assert!(import_workouts(&mut store, "{\"workouts\": []}").is_err());
        assert!(!dir.path().join("store.json").exists());
    }

    #[test]
    fn list_line_shows_metric() {
        let date = FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2024, 8, 2, 6, 45, 0).unwrap();
        let workout = Workout::cycling(Coords::new(55.6, 12.5), 20.0, 95.0, 40.0, date);
        let line = list_line(&workout);
        assert!(line.contains("\tcycling\t02/08/2024 06:45\t"));
        assert!(line.contains("Cycling on August 2"));
        assert!(line.contains("12.6 km/h, 40 m"));
        assert!(line.ends_with("0 clicks"));
    }
}
