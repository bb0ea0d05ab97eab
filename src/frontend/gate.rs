use blik_studio::{
    gate::{FirstVisitGate, GateState, LoaderTimings},
    motion::MotionPreference,
};
use gloo::timers::callback::Timeout;
use std::time::Duration;
use yew::prelude::*;

use super::session_persistence;

fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

#[derive(Properties, PartialEq)]
pub(super) struct InitialLoadGateProps {
    pub motion: MotionPreference,
    pub wordmark: AttrValue,
    #[prop_or_default]
    pub children: Html,
}

/// Withholds its children until the first-visit loader has run, or
/// immediately when it already ran in this session.
#[function_component(InitialLoadGate)]
pub(super) fn initial_load_gate(props: &InitialLoadGateProps) -> Html {
    let gate = use_mut_ref(|| FirstVisitGate::new(session_persistence()));
    let state = use_state(|| GateState::Unresolved);

    {
        let gate = gate.clone();
        let state = state.clone();
        let motion = props.motion;
        use_effect_with((), move |_| {
            let resolved = gate.borrow_mut().mount();
            state.set(resolved);

            let mut timers = Vec::new();
            if resolved == GateState::ShowingLoader {
                let timings = LoaderTimings::for_preference(motion);

                let reveal_gate = gate.clone();
                timers.push(Timeout::new(millis(timings.reveal), move || {
                    reveal_gate.borrow_mut().reveal_finished();
                }));

                timers.push(Timeout::new(millis(timings.reveal + timings.settle), move || {
                    let next = gate.borrow_mut().settled();
                    state.set(next);
                }));
            }

            move || drop(timers)
        });
    }

    match *state {
        GateState::Unresolved => html! { <div class="gate-pending" aria-busy="true" /> },
        GateState::ShowingLoader => html! {
            <Loader motion={props.motion} wordmark={props.wordmark.clone()} />
        },
        GateState::Ready => props.children.clone(),
    }
}

#[derive(Properties, PartialEq)]
struct LoaderProps {
    motion: MotionPreference,
    wordmark: AttrValue,
}

#[function_component(Loader)]
fn loader(props: &LoaderProps) -> Html {
    let timings = LoaderTimings::for_preference(props.motion);
    let style = format!("--loader-duration: {}ms;", timings.reveal.as_millis());

    html! {
        <div class="loader" role="status" style={style}>
            <div class="loader-inner">
                <h1 class="loader-wordmark">{props.wordmark.clone()}</h1>
                <div class="loader-progress" aria-hidden="true" />
            </div>
        </div>
    }
}
