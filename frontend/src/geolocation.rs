use gloo_console::error;
use gloo_utils::window;
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::Position as GeolocationPosition;
use workout_tracker_lib::coords::Coords;
use yew::Callback;

/// Asks the browser for the current position once. Exactly one of the two
/// callbacks fires.
pub fn request_position(on_found: Callback<Coords>, on_failed: Callback<()>) {
    let geolocation = match window().navigator().geolocation() {
        Ok(geolocation) => geolocation,
        Err(err) => {
            error!("Geolocation unavailable", err);
            on_failed.emit(());
            return;
        }
    };

    let success = Closure::once_into_js(move |position: GeolocationPosition| {
        let coords = position.coords();
        on_found.emit(Coords::new(coords.latitude(), coords.longitude()));
    });

    let failed = on_failed.clone();
    let failure = Closure::once_into_js(move |err: JsValue| {
        error!("Geolocation failed", err);
        failed.emit(());
    });

    if let Err(err) = geolocation.get_current_position_with_error_callback(success.unchecked_ref(), Some(failure.unchecked_ref())) {
        error!("Geolocation request rejected", err);
        on_failed.emit(());
    }
}
