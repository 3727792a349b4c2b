use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Local};

use crate::{
    config::MAP_ZOOM,
    coords::Coords,
    display,
    error::{StoreResult, SubmitError, ValidationError},
    form::WorkoutForm,
    map_view::{MapView, PopupStyle, ViewAnimation},
    store::{KeyValueStore, WorkoutStore},
    workout::{Workout, WorkoutId},
};

pub type Clock = fn() -> DateTime<FixedOffset>;

fn local_now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// Owns the workout list for one session and keeps the map and the store in
/// step with it.
pub struct AppController<M: MapView, S> {
    workouts: Vec<Workout>,
    store: WorkoutStore<S>,
    map: Option<M>,
    markers: HashMap<WorkoutId, M::Marker>,
    selected_location: Option<Coords>,
    zoom: f64,
    clock: Clock,
}

impl<M: MapView, S: KeyValueStore> AppController<M, S> {
    /// Starts from whatever the store holds.
    pub fn new(store: WorkoutStore<S>) -> Self {
        let workouts = store.load();
        Self {
            workouts,
            store,
            map: None,
            markers: HashMap::new(),
            selected_location: None,
            zoom: MAP_ZOOM,
            clock: local_now,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Hands over the map once it exists and draws every known workout on it.
    pub fn attach_map(&mut self, map: M) {
        self.map = Some(map);
        for index in 0..self.workouts.len() {
            self.render_marker(index);
        }
        tracing::info!(markers = self.markers.len(), "Map attached");
    }

    pub fn select_location(&mut self, coords: Coords) {
        self.selected_location = Some(coords);
    }

    pub fn selected_location(&self) -> Option<Coords> {
        self.selected_location
    }

    /// Builds a workout from the form at the last selected location. Nothing
    /// changes if the form does not validate.
    pub fn submit(&mut self, form: &WorkoutForm) -> Result<&Workout, SubmitError> {
        let coords = self.selected_location.ok_or(SubmitError::NoLocationSelected)?;
        if !coords.is_finite() {
            return Err(ValidationError::InvalidCoordinates.into());
        }
        let input = form.validate()?;

        let workout = Workout::from_input(&input, coords, (self.clock)());
        tracing::info!(id = %workout.id(), kind = workout.workout_type().as_str(), "New workout");

        self.workouts.push(workout);
        let index = self.workouts.len() - 1;
        self.render_marker(index);
        self.selected_location = None;
        self.persist();

        Ok(&self.workouts[index])
    }

    /// Pans the map to a workout and counts the interaction. Unknown ids are ignored.
    pub fn focus_workout(&mut self, id: &WorkoutId) -> Option<&Workout> {
        let index = self.workouts.iter().position(|w| w.id() == id)?;

        let coords = self.workouts[index].coords();
        if let Some(map) = self.map.as_mut() {
            map.set_view(coords, self.zoom, ViewAnimation::default());
        }

        self.workouts[index].record_interaction();
        self.persist();

        Some(&self.workouts[index])
    }

    /// Writes the current list to the store. `submit` and `focus_workout`
    /// already save on a best effort basis; this is for callers that must
    /// know whether the write went through.
    pub fn save(&mut self) -> StoreResult<()> {
        self.store.save(&self.workouts)
    }

    /// Forgets every workout, in memory and in the store, and removes the
    /// markers. The in-memory state is cleared even if the store is not.
    pub fn reset(&mut self) -> StoreResult<()> {
        let cleared = self.store.clear();
        if let Err(err) = &cleared {
            tracing::error!(error = %err, "Failed to clear stored workouts");
        }

        if let Some(map) = self.map.as_mut() {
            for (_, marker) in self.markers.drain() {
                map.remove_marker(marker);
            }
        }
        self.markers.clear();
        self.workouts.clear();
        self.selected_location = None;
        tracing::info!("Workouts reset");
        cleared
    }

    /// In insertion order.
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn workout(&self, id: &WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    pub fn map(&self) -> Option<&M> {
        self.map.as_ref()
    }

    pub fn store(&self) -> &WorkoutStore<S> {
        &self.store
    }

    fn render_marker(&mut self, index: usize) {
        let Some(map) = self.map.as_mut() else {
            return;
        };

        let workout = &self.workouts[index];
        let marker = map.add_marker(workout.coords());
        map.bind_popup(&marker, &PopupStyle::for_workout(workout), &display::popup_content(workout));
        self.markers.insert(workout.id().clone(), marker);
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save(&self.workouts) {
            tracing::error!(error = %err, "Failed to save workouts");
        }
    }
}
