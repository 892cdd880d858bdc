use gloo_timers::callback::Interval;
use serde_json::json;
use web_sys::AnimationEvent;
use yew::prelude::*;

use super::{prefers_reduced_motion, report_mounted, seeded_rng, settings};
use crate::config::SnowfallConfig;
use crate::snowfall::SnowPool;
use crate::telemetry::{log_event, LogLevel};

const WIDGET: &str = "snowfall";
const SETTINGS_ID: &str = "snowfall-settings";

#[function_component(Snowfall)]
pub fn snowfall() -> Html {
    let pool = use_mut_ref(|| SnowPool::new(SnowfallConfig::from_attributes(settings(SETTINGS_ID))));
    let rng = use_mut_ref(seeded_rng);
    let redraw = use_force_update();

    {
        let pool = pool.clone();
        let redraw = redraw.clone();
        use_effect_with((), move |_| {
            let spawner = if prefers_reduced_motion() {
                log_event(LogLevel::Info, "widget_disabled", json!({ "widget": WIDGET, "reason": "reduced_motion" }));
                None
            } else {
                let interval_ms = pool.borrow().spawn_interval_ms();
                pool.borrow_mut().replenish(&mut *rng.borrow_mut());
                redraw.force_update();
                report_mounted(WIDGET);

                Some(Interval::new(interval_ms, move || {
                    let added = pool.borrow_mut().replenish(&mut *rng.borrow_mut());
                    if added > 0 {
                        redraw.force_update();
                    }
                }))
            };

            move || drop(spawner)
        });
    }

    let flakes = pool.borrow().flakes().iter().map(|flake| {
        let onanimationend = {
            let pool = pool.clone();
            let id = flake.id;
            Callback::from(move |_: AnimationEvent| {
                pool.borrow_mut().melt(id);
            })
        };
        html! {
            <div
                key={flake.id.to_string()}
                class={flake.size.class()}
                style={flake.style()}
                onanimationend={onanimationend}
            />
        }
    }).collect::<Html>();

    html! {
        <div class="snowfall" aria-hidden="true">
            {flakes}
        </div>
    }
}
