use web_sys::Element;
use yew::prelude::*;

use super::{observe_once, prefers_reduced_motion, report_failure};
use crate::charts::{peak_shares, percent_label};
use crate::content::ActivityChart;
use crate::error::MountError;

const WIDGET: &str = "mini_chart";
const GROW_THRESHOLD: f64 = 0.5;

#[derive(Properties, PartialEq)]
pub struct MiniChartProps {
    pub data: ActivityChart,
    pub label: AttrValue,
}

/// Peak share per activity as plain bars that grow once half the chart is visible.
#[function_component(MiniChart)]
pub fn mini_chart(props: &MiniChartProps) -> Html {
    let container_ref = use_node_ref();
    let grown = use_state_eq(prefers_reduced_motion);

    {
        let container_ref = container_ref.clone();
        let grown = grown.clone();
        use_effect_with((), move |_| {
            let watching = if *grown {
                None
            } else {
                let watched = container_ref
                    .cast::<Element>()
                    .ok_or(MountError::MissingNode("mini chart"))
                    .and_then(|element| {
                        let grown = grown.clone();
                        observe_once(&element, GROW_THRESHOLD, move || grown.set(true))
                    });
                watched.unwrap_or_else(|error| {
                    report_failure(WIDGET, &error);
                    grown.set(true);
                    None
                })
            };
            move || drop(watching)
        });
    }

    let bars = peak_shares(&props.data).into_iter().map(|share| {
        html! {
            <li key={share.label.clone()} class="mini-chart__item">
                <div class="mini-chart__track">
                    <div
                        class="chart-bar"
                        style={format!("height: {}%; background: {};", share.percent, share.color)}
                        title={percent_label(share.percent)}
                    />
                </div>
                <span class="mini-chart__label">{share.label.clone()}</span>
            </li>
        }
    });

    html! {
        <figure ref={container_ref} class={classes!("mini-chart", (*grown).then_some("grown"))}>
            <ul class="mini-chart__bars" role="list" aria-label={props.label.clone()}>{ for bars }</ul>
            <figcaption class="muted">{props.label.clone()}</figcaption>
        </figure>
    }
}
