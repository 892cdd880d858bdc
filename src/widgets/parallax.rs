use gloo_events::EventListener;
use web_sys::{window, HtmlElement};
use yew::prelude::*;

use super::{prefers_reduced_motion, report_failure, set_style};
use crate::error::MountError;
use crate::motion::parallax_offset;

const WIDGET: &str = "parallax";
const SHAPE_COUNT: usize = 3;

#[function_component(ParallaxShapes)]
pub fn parallax_shapes() -> Html {
    let shape_refs = use_memo((), |_| (0..SHAPE_COUNT).map(|_| NodeRef::default()).collect::<Vec<_>>());

    use_effect_with(shape_refs.clone(), move |shape_refs| {
        let shapes: Option<Vec<HtmlElement>> = shape_refs.iter().map(NodeRef::cast::<HtmlElement>).collect();
        let listening = match (prefers_reduced_motion(), shapes, window()) {
            (true, _, _) => None,
            (false, Some(shapes), Some(win)) => {
                let scroller = win.clone();
                Some(EventListener::new(&win, "scroll", move |_| {
                    let scrolled = scroller.scroll_y().unwrap_or(0.0);
                    for (index, shape) in shapes.iter().enumerate() {
                        let offset = parallax_offset(scrolled, index);
                        set_style(shape, "transform", &format!("translateY({offset:.1}px)"));
                    }
                }))
            }
            (false, None, _) => {
                report_failure(WIDGET, &MountError::MissingNode("hero shape"));
                None
            }
            (false, Some(_), None) => None,
        };
        move || drop(listening)
    });

    let shapes = shape_refs.iter().enumerate().map(|(index, node_ref)| {
        html! {
            <div key={index.to_string()} ref={node_ref.clone()} class={classes!("shape", format!("shape--{}", index + 1))} />
        }
    });

    html! {
        <div class="hero-shapes" aria-hidden="true">{ for shapes }</div>
    }
}
