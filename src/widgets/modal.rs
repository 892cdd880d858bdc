use gloo_events::EventListener;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, KeyboardEvent, MouseEvent};
use yew::prelude::*;

use super::document;
use crate::content::SiteContent;
use crate::panels::{closes_on_key, describe, Panel};

#[derive(Properties, PartialEq)]
pub struct DetailModalProps {
    pub panel: Panel,
    pub content: Rc<SiteContent>,
    pub on_close: Callback<()>,
}

#[function_component(DetailModal)]
pub fn detail_modal(props: &DetailModalProps) -> Html {
    let body = describe(&props.panel, &props.content);
    let overlay_ref = use_node_ref();

    let on_overlay_click = {
        let on_close = props.on_close.clone();
        let overlay_ref = overlay_ref.clone();
        Callback::from(move |event: MouseEvent| {
            let clicked_overlay = match (event.target(), overlay_ref.get()) {
                (Some(target), Some(overlay)) => {
                    let target: &wasm_bindgen::JsValue = target.as_ref();
                    let overlay: &wasm_bindgen::JsValue = overlay.as_ref();
                    target == overlay
                }
                _ => false,
            };
            if clicked_overlay {
                on_close.emit(());
            }
        })
    };

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    {
        let overlay_ref = overlay_ref.clone();
        let on_close = props.on_close.clone();
        use_effect_with((), move |_| {
            if let Some(overlay) = overlay_ref.cast::<HtmlElement>() {
                let _ = overlay.focus();
            }
            // Listens on the document so Escape works wherever focus sits.
            let keydown = document().map(|doc| {
                EventListener::new(&doc, "keydown", move |event| {
                    let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    if closes_on_key(&event.key()) {
                        event.prevent_default();
                        on_close.emit(());
                    }
                })
            });
            move || drop(keydown)
        });
    }

    let shares = body.shares.iter().map(|share| {
        html! {
            <div class="activity-item" key={share.label.clone()}>
                <div class="activity-color" style={format!("background: {};", share.color)} />
                <div class="activity-info">
                    <div class="activity-name">{share.label.clone()}</div>
                    <div class="activity-percentage">{crate::charts::percent_label(share.percent)}</div>
                </div>
            </div>
        }
    });

    let stats = body.stats.iter().map(|stat| {
        html! {
            <div class="stat-item" key={stat.label.clone()}>
                <div class="stat-value">{stat.value.clone()}</div>
                <div class="stat-label">{stat.label.clone()}</div>
            </div>
        }
    });

    let sections = body.sections.iter().map(|section| {
        html! {
            <div class="detail-section" key={section.heading.clone()}>
                <h4>{section.heading.clone()}</h4>
                <p>{section.body.clone()}</p>
            </div>
        }
    });

    html! {
        <div
            ref={overlay_ref}
            class={classes!("modal-overlay", format!("modal-overlay--{}", props.panel.kind()))}
            role="dialog"
            aria-modal="true"
            aria-label={body.title.clone()}
            tabindex="-1"
            onclick={on_overlay_click}
        >
            <div class="modal-content">
                <div class="modal-header">
                    <h3>{body.title.clone()}</h3>
                    if let Some(badge) = body.badge.as_ref() {
                        <span class="modal-badge">{badge.clone()}</span>
                    }
                    <button class="close-btn" type="button" aria-label="Close" onclick={on_close_click}>{"×"}</button>
                </div>
                <div class="modal-body">
                    if !body.stats.is_empty() {
                        <div class="travel-stats">{ for stats }</div>
                    }
                    if !body.shares.is_empty() {
                        <div class="activities-breakdown">{ for shares }</div>
                    }
                    { for sections }
                </div>
            </div>
        </div>
    }
}
