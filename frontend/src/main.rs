use crate::{
    components::{workout_form::WorkoutForm, workout_list::WorkoutList},
    leaflet_map::LeafletMap,
    local_storage::LocalStorage,
};
use gloo_console::{error, info};
use gloo_timers::callback::Timeout;
use gloo_utils::{document, window};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement, Node};
use workout_tracker_lib::{
    config::{FORM_SETTLE_MS, GEOLOCATION_FAILED_MESSAGE, MAP_CONTAINER_ID, MAP_ZOOM},
    controller::AppController,
    coords::Coords,
    form::WorkoutForm as FormData,
    store::WorkoutStore,
    workout::WorkoutId,
};
use yew::prelude::*;

mod components;
mod geolocation;
mod leaflet_map;
mod local_storage;

enum Msg {
    PositionFound(Coords),
    PositionFailed,
    MapClicked(Coords),
    FormChanged(FormData),
    Submit,
    FormSettled,
    FocusWorkout(WorkoutId),
    Reset,
}

struct App {
    controller: AppController<LeafletMap, LocalStorage>,
    container: HtmlElement,
    form: FormData,
    form_visible: bool,
    form_settling: bool,
    focus_distance: bool,
    distance_ref: NodeRef,
    settle_timer: Option<Timeout>,
}

impl App {
    fn render_map(&self) -> Html {
        let node: &Node = &self.container.clone().into();
        Html::VRef(node.clone())
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let container: HtmlElement = document()
            .create_element("div")
            .expect("document can create elements")
            .unchecked_into();
        container.set_id(MAP_CONTAINER_ID);

        let controller = AppController::new(WorkoutStore::new(LocalStorage));
        info!(format!("Loaded {} workouts", controller.workouts().len()));

        Self {
            controller,
            container,
            form: FormData::default(),
            form_visible: false,
            form_settling: false,
            focus_distance: false,
            distance_ref: NodeRef::default(),
            settle_timer: None,
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            let link = ctx.link();
            geolocation::request_position(link.callback(Msg::PositionFound), link.callback(|()| Msg::PositionFailed));
        }

        if self.focus_distance {
            self.focus_distance = false;
            if let Some(input) = self.distance_ref.cast::<HtmlInputElement>() {
                let _ = input.focus();
            }
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::PositionFound(coords) => {
                info!(format!("Position: {:?}", coords));
                let map = LeafletMap::new(&self.container, coords, MAP_ZOOM, ctx.link().callback(Msg::MapClicked));
                self.controller.attach_map(map);
                false
            }
            Msg::PositionFailed => {
                alert(GEOLOCATION_FAILED_MESSAGE);
                false
            }
            Msg::MapClicked(coords) => {
                self.controller.select_location(coords);
                self.form_visible = true;
                self.focus_distance = true;
                true
            }
            Msg::FormChanged(form) => {
                self.form = form;
                true
            }
            Msg::Submit => match self.controller.submit(&self.form) {
                Ok(workout) => {
                    info!(format!("Added workout {}", workout.id()));
                    self.form.clear();
                    self.form_visible = false;
                    self.form_settling = true;
                    let link = ctx.link().clone();
                    self.settle_timer = Some(Timeout::new(FORM_SETTLE_MS, move || link.send_message(Msg::FormSettled)));
                    true
                }
                Err(err) => {
                    error!(format!("Rejected workout: {err}"));
                    alert(err.user_message());
                    false
                }
            },
            Msg::FormSettled => {
                self.form_settling = false;
                self.settle_timer = None;
                true
            }
            Msg::FocusWorkout(id) => {
                self.controller.focus_workout(&id);
                true
            }
            Msg::Reset => {
                if let Err(err) = self.controller.reset() {
                    error!(format!("Could not clear stored workouts: {err}"));
                }
                if let Err(err) = window().location().reload() {
                    error!("Reload failed", err);
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        html! {
            <>
                <div class="sidebar">
                    <ul class="workouts">
                        <WorkoutForm
                            form={self.form.clone()}
                            visible={self.form_visible}
                            settling={self.form_settling}
                            distance_ref={self.distance_ref.clone()}
                            on_change={link.callback(Msg::FormChanged)}
                            on_submit={link.callback(|()| Msg::Submit)}
                        />
                        <WorkoutList
                            workouts={self.controller.workouts().to_vec()}
                            on_select={link.callback(Msg::FocusWorkout)}
                        />
                    </ul>
                    <button class="btn--reset" onclick={link.callback(|_| Msg::Reset)}>{"Reset"}</button>
                </div>
                {self.render_map()}
            </>
        }
    }
}

fn alert(message: &str) {
    if let Err(err) = window().alert_with_message(message) {
        error!("Alert failed", err);
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
