//! Shared fakes for the controller tests.

#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, TimeZone};
use workout_tracker_lib::{
    coords::Coords,
    form::WorkoutForm,
    map_view::{MapView, PopupStyle, ViewAnimation},
    workout::WorkoutType,
};

/// Map that remembers every call made to it.
#[derive(Debug, Default)]
pub struct RecordingMap {
    next_marker: usize,
    pub markers: Vec<(usize, Coords)>,
    pub popups: Vec<(usize, PopupStyle, String)>,
    pub views: Vec<(Coords, f64, ViewAnimation)>,
    pub removed: Vec<usize>,
}

impl RecordingMap {
    pub fn live_markers(&self) -> usize {
        self.markers.len() - self.removed.len()
    }
}

impl MapView for RecordingMap {
    type Marker = usize;

    fn add_marker(&mut self, coords: Coords) -> usize {
        let marker = self.next_marker;
        self.next_marker += 1;
        self.markers.push((marker, coords));
        marker
    }

    fn bind_popup(&mut self, marker: &usize, style: &PopupStyle, content: &str) {
        self.popups.push((*marker, style.clone(), content.to_owned()));
    }

    fn set_view(&mut self, coords: Coords, zoom: f64, animation: ViewAnimation) {
        self.views.push((coords, zoom, animation));
    }

    fn remove_marker(&mut self, marker: usize) {
        self.removed.push(marker);
    }
}

pub fn fixed_now() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 4, 14, 9, 30, 0)
        .unwrap()
}

pub fn running(distance: &str, duration: &str, cadence: &str) -> WorkoutForm {
    WorkoutForm {
        workout_type: WorkoutType::Running,
        distance: distance.into(),
        duration: duration.into(),
        cadence: cadence.into(),
        elevation_gain: String::new(),
    }
}

pub fn cycling(distance: &str, duration: &str, elevation_gain: &str) -> WorkoutForm {
    WorkoutForm {
        workout_type: WorkoutType::Cycling,
        distance: distance.into(),
        duration: duration.into(),
        cadence: String::new(),
        elevation_gain: elevation_gain.into(),
    }
}
