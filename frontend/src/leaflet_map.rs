use leaflet::{LatLng, Map, MapOptions, Marker, Popup, PopupOptions, TileLayer, TileLayerOptions};
use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{
    HtmlElement,
    js_sys::{Object, Reflect},
};
use workout_tracker_lib::{
    config::{TILE_ATTRIBUTION, TILE_URL},
    coords::Coords,
    map_view::{MapView, PopupStyle, ViewAnimation},
};
use yew::Callback;

// Leaflet calls the leaflet crate does not expose in the form needed here.
#[wasm_bindgen]
extern "C" {
    type LeafletMouseEvent;

    #[wasm_bindgen(method, getter)]
    fn latlng(this: &LeafletMouseEvent) -> LatLng;

    type MapExt;

    #[wasm_bindgen(method)]
    fn on(this: &MapExt, kind: &str, handler: &JsValue);

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view_with_options(this: &MapExt, center: &LatLng, zoom: f64, options: &JsValue);

    type LayerExt;

    #[wasm_bindgen(method, js_name = openPopup)]
    fn open_popup(this: &LayerExt);
}

/// Leaflet map living in `container`, reporting clicks through `on_click`.
pub struct LeafletMap {
    map: Map,
    _on_click: Closure<dyn FnMut(LeafletMouseEvent)>,
}

impl LeafletMap {
    pub fn new(container: &HtmlElement, center: Coords, zoom: f64, on_click: Callback<Coords>) -> Self {
        let map = Map::new_with_element(container, &MapOptions::default());
        map.set_view(&lat_lng(center), zoom);
        add_tile_layer(&map);

        let on_click = Closure::<dyn FnMut(LeafletMouseEvent)>::new(move |event: LeafletMouseEvent| {
            let pos = event.latlng();
            on_click.emit(Coords::new(pos.lat(), pos.lng()));
        });
        map.unchecked_ref::<MapExt>().on("click", on_click.as_ref());

        Self {
            map,
            _on_click: on_click,
        }
    }
}

impl MapView for LeafletMap {
    type Marker = Marker;

    fn add_marker(&mut self, coords: Coords) -> Marker {
        let marker = Marker::new(&lat_lng(coords));
        marker.add_to(&self.map);
        marker
    }

    fn bind_popup(&mut self, marker: &Marker, style: &PopupStyle, content: &str) {
        let opts = PopupOptions::default();
        opts.set_auto_close(style.auto_close);
        opts.set_close_on_click(style.close_on_click);
        opts.set_max_width(style.max_width);
        opts.set_min_width(style.min_width);
        opts.set_class_name(style.class_name.clone());

        let popup = Popup::new(&opts, None);
        popup.set_content(&content.into());

        marker.bind_popup(&popup);
        marker.unchecked_ref::<LayerExt>().open_popup();
    }

    fn set_view(&mut self, coords: Coords, zoom: f64, animation: ViewAnimation) {
        let pan = Object::new();
        let _ = Reflect::set(&pan, &"duration".into(), &animation.pan_duration_secs.into());

        let options = Object::new();
        let _ = Reflect::set(&options, &"animate".into(), &animation.animate.into());
        let _ = Reflect::set(&options, &"pan".into(), &pan);

        self.map
            .unchecked_ref::<MapExt>()
            .set_view_with_options(&lat_lng(coords), zoom, &options);
    }

    fn remove_marker(&mut self, marker: Marker) {
        marker.remove();
    }
}

fn lat_lng(coords: Coords) -> LatLng {
    LatLng::new(coords.latitude(), coords.longitude())
}

fn add_tile_layer(map: &Map) {
    let opts = TileLayerOptions::new();
    opts.set_attribution(TILE_ATTRIBUTION.into());
    TileLayer::new_options(TILE_URL, &opts).add_to(map);
}
