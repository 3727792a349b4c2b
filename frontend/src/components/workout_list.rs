use workout_tracker_lib::{
    display,
    workout::{Workout, WorkoutId},
};
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub workouts: Vec<Workout>,
    pub on_select: Callback<WorkoutId>,
}

/// Newest workout first.
#[function_component]
pub fn WorkoutList(props: &Props) -> Html {
    html! {
        <>
            { for props.workouts.iter().rev().map(|workout| html! {
                <WorkoutEntry workout={workout.clone()} on_select={props.on_select.clone()} />
            }) }
        </>
    }
}

#[derive(PartialEq, Properties, Clone)]
struct EntryProps {
    workout: Workout,
    on_select: Callback<WorkoutId>,
}

#[function_component]
fn WorkoutEntry(props: &EntryProps) -> Html {
    let workout = &props.workout;

    let onclick = {
        let id = workout.id().clone();
        let on_select = props.on_select.clone();
        Callback::from(move |_| on_select.emit(id.clone()))
    };

    html! {
        <li class={display::list_class(workout)} data-id={workout.id().to_string()} {onclick}>
            <h2 class="workout__title">{workout.description()}</h2>
            { for display::details(workout).into_iter().map(|detail| html! {
                <div class="workout__details">
                    <span class="workout__icon">{detail.icon}</span>
                    <span class="workout__value">{detail.value}</span>
                    <span class="workout__unit">{detail.unit}</span>
                </div>
            }) }
        </li>
    }
}
