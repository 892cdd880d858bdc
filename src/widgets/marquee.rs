use gloo_events::EventListener;
use web_sys::{window, Event, HtmlElement, MouseEvent};
use yew::prelude::*;

use super::{attached, prefers_reduced_motion, report_failure, report_mounted, set_style, settings};
use crate::config::MarqueeConfig;
use crate::content::Logo;
use crate::frame_loop::{FrameControl, FrameLoop};
use crate::motion::RateIntegrator;
use crate::placement::{marquee_copy_count, MIN_MARQUEE_COPIES};

const WIDGET: &str = "marquee";
const SETTINGS_ID: &str = "marquee-settings";

#[derive(Properties, PartialEq)]
pub struct LogoLoopProps {
    pub logos: Vec<Logo>,
    #[prop_or(AttrValue::Static("Technology logos"))]
    pub aria_label: AttrValue,
}

#[function_component(LogoLoop)]
pub fn logo_loop(props: &LogoLoopProps) -> Html {
    let config = use_memo((), |_| MarqueeConfig::from_attributes(settings(SETTINGS_ID)));
    let reduced_motion = use_memo((), |_| prefers_reduced_motion());
    let container_ref = use_node_ref();
    let track_ref = use_node_ref();
    let sequence_ref = use_node_ref();
    let copies = use_state_eq(|| MIN_MARQUEE_COPIES);
    let motion = use_mut_ref(|| RateIntegrator::new(0.0, config.smooth_tau, 0.0));

    let cruise = if *reduced_motion {
        0.0
    } else {
        config.cruise_velocity()
    };

    let measure = {
        let container_ref = container_ref.clone();
        let sequence_ref = sequence_ref.clone();
        let copies = copies.clone();
        let motion = motion.clone();
        Callback::from(move |_: ()| {
            let (Some(container), Some(sequence)) = (
                container_ref.cast::<HtmlElement>(),
                sequence_ref.cast::<HtmlElement>(),
            ) else {
                return;
            };
            let sequence_width = sequence.get_bounding_client_rect().width();
            let container_width = f64::from(container.client_width());

            motion.borrow_mut().set_period(sequence_width);
            copies.set(marquee_copy_count(container_width, sequence_width));
        })
    };

    {
        let track_ref = track_ref.clone();
        let measure = measure.clone();
        let motion = motion.clone();
        use_effect_with((), move |_| {
            let mounted = attached(&track_ref, "marquee track").map(|track| {
                measure.emit(());
                motion.borrow_mut().set_target_rate(cruise);
                report_mounted(WIDGET);

                let resize = window().map(|win| {
                    let measure = measure.clone();
                    EventListener::new(&win, "resize", move |_| measure.emit(()))
                });
                let frames = FrameLoop::start(move |timestamp| {
                    let offset = motion.borrow_mut().advance(timestamp);
                    set_style(&track, "transform", &format!("translate3d({:.3}px, 0, 0)", -offset));
                    FrameControl::Continue
                });
                (frames, resize)
            });
            if let Err(error) = &mounted {
                report_failure(WIDGET, error);
            }

            move || drop(mounted)
        });
    }

    let onmouseenter = {
        let motion = motion.clone();
        let pause = config.pause_on_hover;
        Callback::from(move |_: MouseEvent| {
            if pause {
                motion.borrow_mut().set_target_rate(0.0);
            }
        })
    };

    let onmouseleave = {
        let motion = motion.clone();
        Callback::from(move |_: MouseEvent| motion.borrow_mut().set_target_rate(cruise))
    };

    let on_logo_load = {
        let measure = measure.clone();
        Callback::from(move |_: Event| measure.emit(()))
    };

    let mut style = format!(
        "--logoloop-gap: {}px; --logoloop-logo-height: {}px;",
        config.gap, config.logo_height
    );
    if let Some(color) = config.fade_out_color.as_deref() {
        style.push_str(&format!(" --logoloop-fade-color: {color};"));
    }

    let lists = (0..*copies).map(|copy| {
        let node_ref = if copy == 0 {
            sequence_ref.clone()
        } else {
            NodeRef::default()
        };
        let items = props.logos.iter().enumerate().map(|(index, logo)| {
            let image = html! {
                <img
                    src={logo.src.clone()}
                    alt={logo.alt.clone()}
                    title={logo.title.clone()}
                    loading="lazy"
                    draggable="false"
                    onload={on_logo_load.clone()}
                />
            };
            let content = match logo.href.as_deref() {
                Some(href) => html! {
                    <a
                        class="logoloop__link"
                        href={href.to_string()}
                        aria-label={logo.link_label()}
                        target="_blank"
                        rel="noreferrer noopener"
                    >
                        {image}
                    </a>
                },
                None => image,
            };
            html! { <li class="logoloop__item" key={format!("{copy}-{index}")} role="listitem">{content}</li> }
        });

        html! {
            <ul class="logoloop__list" key={copy.to_string()} ref={node_ref} role="list" aria-hidden={(copy > 0).to_string()}>
                { for items }
            </ul>
        }
    });

    html! {
        <div
            ref={container_ref}
            class={classes!(
                "logoloop",
                config.fade_out.then_some("logoloop--fade"),
                config.scale_on_hover.then_some("logoloop--scale-hover"),
            )}
            style={style}
            role="region"
            aria-label={props.aria_label.clone()}
            onmouseenter={onmouseenter}
            onmouseleave={onmouseleave}
        >
            <div class="logoloop__track" ref={track_ref}>
                { for lists }
            </div>
        </div>
    }
}
