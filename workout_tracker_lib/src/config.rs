//! Fixed application settings shared by the frontend and the CLI.

/// Key the workout list is persisted under.
pub const STORAGE_KEY: &str = "workouts";

pub const MAP_ZOOM: f64 = 13.0;
pub const MAP_CONTAINER_ID: &str = "map";

pub const TILE_URL: &str = "https://tile.openstreetmap.fr/hot/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

pub const POPUP_MAX_WIDTH: f64 = 250.0;
pub const POPUP_MIN_WIDTH: f64 = 100.0;

/// Seconds the map takes to pan to a workout picked from the list.
pub const PAN_DURATION_SECS: f64 = 1.0;

/// Milliseconds the form stays out of the layout after a submit, so it
/// disappears without playing its slide transition.
pub const FORM_SETTLE_MS: u32 = 1000;

pub const INVALID_INPUT_MESSAGE: &str = "Inputs have to be positive numbers!";
pub const NO_LOCATION_MESSAGE: &str = "Click on the map to pick a location first";
pub const GEOLOCATION_FAILED_MESSAGE: &str = "Could not get your position";
