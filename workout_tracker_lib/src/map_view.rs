use crate::{
    config::{PAN_DURATION_SECS, POPUP_MAX_WIDTH, POPUP_MIN_WIDTH},
    coords::Coords,
    workout::Workout,
};

/// The map widget as seen by the controller.
pub trait MapView {
    type Marker;

    fn add_marker(&mut self, coords: Coords) -> Self::Marker;
    fn bind_popup(&mut self, marker: &Self::Marker, style: &PopupStyle, content: &str);
    fn set_view(&mut self, coords: Coords, zoom: f64, animation: ViewAnimation);
    fn remove_marker(&mut self, marker: Self::Marker);
}

/// Stand-in for callers that never attach a map, such as the CLI.
#[derive(Debug)]
pub enum NoMap {}

impl MapView for NoMap {
    type Marker = ();

    fn add_marker(&mut self, _coords: Coords) {
        match *self {}
    }

    fn bind_popup(&mut self, _marker: &(), _style: &PopupStyle, _content: &str) {
        match *self {}
    }

    fn set_view(&mut self, _coords: Coords, _zoom: f64, _animation: ViewAnimation) {
        match *self {}
    }

    fn remove_marker(&mut self, _marker: ()) {
        match *self {}
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupStyle {
    pub auto_close: bool,
    pub close_on_click: bool,
    pub max_width: f64,
    pub min_width: f64,
    pub class_name: String,
}

impl PopupStyle {
    /// Popups stay open until closed explicitly, styled per workout type.
    pub fn for_workout(workout: &Workout) -> Self {
        Self {
            auto_close: false,
            close_on_click: false,
            max_width: POPUP_MAX_WIDTH,
            min_width: POPUP_MIN_WIDTH,
            class_name: format!("{}-popup", workout.workout_type().as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewAnimation {
    pub animate: bool,
    pub pan_duration_secs: f64,
}

impl Default for ViewAnimation {
    fn default() -> Self {
        Self {
            animate: true,
            pan_duration_secs: PAN_DURATION_SECS,
        }
    }
}
