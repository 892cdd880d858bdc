use web_sys::{HtmlElement, MouseEvent};
use yew::prelude::*;

use super::{prefers_reduced_motion, report_failure, report_mounted, set_style, settings};
use crate::config::OrbitConfig;
use crate::content::TechIcon;
use crate::error::MountError;
use crate::frame_loop::{FrameControl, FrameLoop};
use crate::motion::RateIntegrator;
use crate::placement::{place_ring, OrbitGeometry, FULL_TURN_DEGREES};

const WIDGET: &str = "orbit";
const SETTINGS_ID: &str = "orbit-settings";

#[derive(Properties, PartialEq)]
pub struct OrbitProps {
    pub icons: Vec<TechIcon>,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(Orbit)]
pub fn orbit(props: &OrbitProps) -> Html {
    let config = use_memo((), |_| OrbitConfig::from_attributes(settings(SETTINGS_ID)));
    let reduced_motion = use_memo((), |_| prefers_reduced_motion());
    let icon_refs = use_memo(props.icons.len(), |count| {
        (0..*count).map(|_| NodeRef::default()).collect::<Vec<_>>()
    });
    let motion = use_mut_ref(|| RateIntegrator::new(config.base_speed, config.smooth_tau, FULL_TURN_DEGREES));

    {
        let config = config.clone();
        let motion = motion.clone();
        let reduced_motion = *reduced_motion;
        use_effect_with(icon_refs.clone(), move |icon_refs| {
            let icons: Option<Vec<HtmlElement>> = icon_refs.iter().map(NodeRef::cast::<HtmlElement>).collect();
            let mounted = icons.ok_or(MountError::MissingNode("orbit icon")).map(|icons| {
                let geometry = OrbitGeometry::centered(config.radius, config.min_opacity, config.max_opacity);
                if reduced_motion {
                    let mut motion = motion.borrow_mut();
                    *motion = RateIntegrator::new(0.0, config.smooth_tau, FULL_TURN_DEGREES);
                }
                report_mounted(WIDGET);

                FrameLoop::start(move |timestamp| {
                    let theta = motion.borrow_mut().advance(timestamp);
                    for (icon, placement) in icons.iter().zip(place_ring(theta, icons.len(), &geometry)) {
                        set_style(icon, "left", &format!("{:.4}%", placement.x));
                        set_style(icon, "top", &format!("{:.4}%", placement.y));
                        set_style(icon, "opacity", &format!("{:.4}", placement.opacity));
                        let _ = icon.set_attribute("data-visibility", placement.visibility.as_str());
                    }

                    if reduced_motion {
                        FrameControl::Stop
                    } else {
                        FrameControl::Continue
                    }
                })
            });
            if let Err(error) = &mounted {
                report_failure(WIDGET, error);
            }

            move || drop(mounted)
        });
    }

    let onmouseenter = {
        let motion = motion.clone();
        let hover_speed = config.hover_speed;
        let reduced_motion = *reduced_motion;
        Callback::from(move |_: MouseEvent| {
            if !reduced_motion {
                motion.borrow_mut().set_target_rate(hover_speed);
            }
        })
    };

    let onmouseleave = {
        let motion = motion.clone();
        let base_speed = config.base_speed;
        let reduced_motion = *reduced_motion;
        Callback::from(move |_: MouseEvent| {
            if !reduced_motion {
                motion.borrow_mut().set_target_rate(base_speed);
            }
        })
    };

    let count = props.icons.len().max(1) as f64;
    let icons = props.icons.iter().zip(icon_refs.iter()).enumerate().map(|(index, (icon, node_ref))| {
        html! {
            <div
                class="orbit-icon"
                key={icon.title.clone()}
                ref={node_ref.clone()}
                title={icon.title.clone()}
                data-index={index.to_string()}
                data-start-angle={(FULL_TURN_DEGREES / count * index as f64).to_string()}
            >
                <img src={icon.icon_url.clone()} alt={icon.title.clone()} loading="lazy" draggable="false" />
            </div>
        }
    });

    html! {
        <div class="orbit" onmouseenter={onmouseenter} onmouseleave={onmouseleave}>
            <div class="orbit__center">{props.children.clone()}</div>
            { for icons }
        </div>
    }
}
