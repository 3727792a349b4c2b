use gloo_console::error;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use workout_tracker_lib::{form::WorkoutForm as FormData, workout::WorkoutType};
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub form: FormData,
    pub visible: bool,
    /// Taken out of the layout right after a submit so it vanishes without sliding.
    pub settling: bool,
    pub distance_ref: NodeRef,
    pub on_change: Callback<FormData>,
    pub on_submit: Callback<()>,
}

#[function_component]
pub fn WorkoutForm(props: &Props) -> Html {
    let field_input = |apply: fn(&mut FormData, String)| {
        let form = props.form.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut form = form.clone();
            apply(&mut form, input.value());
            on_change.emit(form);
        })
    };

    let on_type_change = {
        let form = props.form.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            match select.value().parse::<WorkoutType>() {
                Ok(workout_type) => on_change.emit(FormData { workout_type, ..form.clone() }),
                Err(err) => error!(err.to_string()),
            }
        })
    };

    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let form = &props.form;
    let running = form.workout_type == WorkoutType::Running;

    html! {
        <form
            class={classes!("form", (!props.visible).then_some("hidden"))}
            style={if props.settling { "display: none" } else { "" }}
            {onsubmit}
        >
            <div class="form__row">
                <label class="form__label">{"Type"}</label>
                <select class="form__input form__input--type" onchange={on_type_change}>
                    <option value="running" selected={running}>{"Running"}</option>
                    <option value="cycling" selected={!running}>{"Cycling"}</option>
                </select>
            </div>
            <div class="form__row">
                <label class="form__label">{"Distance"}</label>
                <input
                    class="form__input form__input--distance"
                    placeholder="km"
                    ref={props.distance_ref.clone()}
                    value={form.distance.clone()}
                    oninput={field_input(|f, v| f.distance = v)}
                />
            </div>
            <div class="form__row">
                <label class="form__label">{"Duration"}</label>
                <input
                    class="form__input form__input--duration"
                    placeholder="min"
                    value={form.duration.clone()}
                    oninput={field_input(|f, v| f.duration = v)}
                />
            </div>
            <div class={classes!("form__row", (!running).then_some("form__row--hidden"))}>
                <label class="form__label">{"Cadence"}</label>
                <input
                    class="form__input form__input--cadence"
                    placeholder="step/min"
                    value={form.cadence.clone()}
                    oninput={field_input(|f, v| f.cadence = v)}
                />
            </div>
            <div class={classes!("form__row", running.then_some("form__row--hidden"))}>
                <label class="form__label">{"Elev Gain"}</label>
                <input
                    class="form__input form__input--elevation"
                    placeholder="meters"
                    value={form.elevation_gain.clone()}
                    oninput={field_input(|f, v| f.elevation_gain = v)}
                />
            </div>
            <button class="form__btn">{"OK"}</button>
        </form>
    }
}
