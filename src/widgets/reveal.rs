use web_sys::Element;
use yew::prelude::*;

use super::{observe_once, prefers_reduced_motion, report_failure};
use crate::error::MountError;
use crate::motion::stagger_ms;

const WIDGET: &str = "reveal";
const REVEAL_STAGGER_MS: u32 = 200;
const REVEAL_THRESHOLD: f64 = 0.1;

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    pub index: usize,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let node_ref = use_node_ref();
    let revealed = use_state_eq(prefers_reduced_motion);

    {
        let node_ref = node_ref.clone();
        let revealed = revealed.clone();
        use_effect_with((), move |_| {
            let watching = if *revealed {
                None
            } else {
                let watched = node_ref
                    .cast::<Element>()
                    .ok_or(MountError::MissingNode("reveal wrapper"))
                    .and_then(|element| {
                        let revealed = revealed.clone();
                        observe_once(&element, REVEAL_THRESHOLD, move || revealed.set(true))
                    });
                match watched {
                    Ok(watching) => watching,
                    Err(error) => {
                        report_failure(WIDGET, &error);
                        revealed.set(true);
                        None
                    }
                }
            };
            move || drop(watching)
        });
    }

    html! {
        <div
            ref={node_ref}
            class={classes!("reveal", (*revealed).then_some("revealed"))}
            style={format!("transition-delay: {}ms;", stagger_ms(props.index, REVEAL_STAGGER_MS))}
        >
            { props.children.clone() }
        </div>
    }
}
