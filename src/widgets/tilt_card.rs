use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{HtmlElement, PointerEvent};
use yew::prelude::*;

use super::{attached, report_failure, report_mounted, settings};
use crate::config::TiltConfig;
use crate::frame_loop::{FrameControl, FrameLoop};
use crate::tilt::{tilt_frame, ReturnToCenter, TiltFrame};

const WIDGET: &str = "tilt_card";
const SETTINGS_ID: &str = "tilt-settings";

#[derive(Properties, PartialEq)]
pub struct TiltCardProps {
    #[prop_or_default]
    pub children: Html,
}

#[derive(Default)]
struct TiltState {
    last: Option<TiltFrame>,
    returning: Option<FrameLoop>,
}

fn apply(wrapper: &HtmlElement, frame: &TiltFrame) {
    let style = wrapper.style();
    for (name, value) in frame.css_variables() {
        let _ = style.set_property(name, &value);
    }
}

#[function_component(TiltCard)]
pub fn tilt_card(props: &TiltCardProps) -> Html {
    let config = use_memo((), |_| TiltConfig::from_attributes(settings(SETTINGS_ID)));
    let wrapper_ref = use_node_ref();
    let card_ref = use_node_ref();
    let active = use_state_eq(|| false);
    let state = use_mut_ref(TiltState::default);

    {
        let wrapper_ref = wrapper_ref.clone();
        let card_ref = card_ref.clone();
        let state = state.clone();
        let config = config.clone();
        use_effect_with((), move |_| {
            let mounted = attached(&wrapper_ref, "tilt wrapper").and_then(|wrapper| {
                let card = attached(&card_ref, "tilt card")?;
                let width = f64::from(wrapper.client_width());
                let frame = tilt_frame(
                    width - config.initial_inset_x,
                    config.initial_y,
                    f64::from(card.client_width()),
                    f64::from(card.client_height()),
                );
                apply(&wrapper, &frame);
                state.borrow_mut().last = Some(frame);
                Ok(())
            });
            match &mounted {
                Ok(()) => report_mounted(WIDGET),
                Err(error) => report_failure(WIDGET, error),
            }

            move || {
                state.borrow_mut().returning.take();
            }
        });
    }

    let onpointerenter = {
        let active = active.clone();
        let state = state.clone();
        Callback::from(move |_: PointerEvent| {
            state.borrow_mut().returning.take();
            active.set(true);
        })
    };

    let onpointermove = {
        let wrapper_ref = wrapper_ref.clone();
        let card_ref = card_ref.clone();
        let state = state.clone();
        Callback::from(move |event: PointerEvent| {
            let (Some(wrapper), Some(card)) = (
                wrapper_ref.cast::<HtmlElement>(),
                card_ref.cast::<HtmlElement>(),
            ) else {
                return;
            };
            let rect = card.get_bounding_client_rect();
            let frame = tilt_frame(
                f64::from(event.client_x()) - rect.left(),
                f64::from(event.client_y()) - rect.top(),
                f64::from(card.client_width()),
                f64::from(card.client_height()),
            );
            apply(&wrapper, &frame);
            state.borrow_mut().last = Some(frame);
        })
    };

    let onpointerleave = {
        let active = active.clone();
        let wrapper_ref = wrapper_ref.clone();
        let state = state.clone();
        let duration = config.return_duration_ms;
        Callback::from(move |_: PointerEvent| {
            active.set(false);
            let Some(wrapper) = wrapper_ref.cast::<HtmlElement>() else {
                return;
            };

            let from = state.borrow().last.unwrap_or_else(TiltFrame::centered);
            let mut easing = ReturnToCenter::new(&from, duration);
            let frame_state: Rc<RefCell<TiltState>> = state.clone();
            let frames = FrameLoop::start(move |timestamp| {
                let (frame, finished) = easing.sample(timestamp);
                apply(&wrapper, &frame);
                frame_state.borrow_mut().last = Some(frame);
                if finished {
                    FrameControl::Stop
                } else {
                    FrameControl::Continue
                }
            });
            state.borrow_mut().returning = Some(frames);
        })
    };

    html! {
        <div
            ref={wrapper_ref}
            class={classes!("pc-card-wrapper", (*active).then_some("active"))}
            onpointerenter={onpointerenter}
            onpointermove={onpointermove}
            onpointerleave={onpointerleave}
        >
            <section ref={card_ref} class={classes!("pc-card", (*active).then_some("active"))}>
                {props.children.clone()}
            </section>
        </div>
    }
}
