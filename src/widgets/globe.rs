use gloo_events::EventListener;
use js_sys::{Function, Reflect};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, HtmlCanvasElement, PointerEvent};
use yew::prelude::*;

use super::{call_method, document, global, js_object, settings, LibraryPoll};
use crate::config::GlobeConfig;
use crate::content::TravelStop;
use crate::error::MountError;
use crate::projection::{globe_backing_size, globe_options, GlobeOrientation};

const WIDGET: &str = "globe";
const SETTINGS_ID: &str = "globe-settings";

const MAX_PIXEL_RATIO: f64 = 2.0;

struct LiveGlobe {
    globe: JsValue,
    _on_render: Closure<dyn FnMut(JsValue)>,
    _resize: Option<EventListener>,
}

impl Drop for LiveGlobe {
    fn drop(&mut self) {
        let _ = call_method(&self.globe, "destroy", &[]);
    }
}

fn webgl_available() -> bool {
    let Some(scratch) = document()
        .and_then(|d| d.create_element("canvas").ok())
        .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok())
    else {
        return false;
    };
    ["webgl", "experimental-webgl"]
        .iter()
        .any(|kind| matches!(scratch.get_context(kind), Ok(Some(_))))
}

fn mount(
    canvas: &HtmlCanvasElement,
    config: &GlobeConfig,
    stops: &[TravelStop],
    orientation: Rc<RefCell<GlobeOrientation>>,
) -> Result<LiveGlobe, MountError> {
    let create_globe: Function = global("createGlobe")?
        .dyn_into()
        .map_err(|_| MountError::MissingLibrary("createGlobe"))?;
    if !webgl_available() {
        return Err(MountError::Unsupported("WebGL"));
    }

    let pixel_ratio = window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0).min(MAX_PIXEL_RATIO);
    let css_width = Rc::new(Cell::new(f64::from(canvas.offset_width())));
    let options = globe_options(css_width.get(), pixel_ratio, config.size, stops);
    let options = js_object(&serde_json::to_value(&options).map_err(|error| MountError::Script(error.to_string()))?)?;

    let resize = window().map(|win| {
        let canvas = canvas.clone();
        let css_width = css_width.clone();
        EventListener::new(&win, "resize", move |_| css_width.set(f64::from(canvas.offset_width())))
    });

    let fallback = config.size;
    let on_render = Closure::<dyn FnMut(JsValue)>::new(move |state: JsValue| {
        let (phi, theta) = orientation.borrow_mut().on_render();
        let edge = JsValue::from_f64(globe_backing_size(css_width.get(), pixel_ratio, fallback));
        let _ = Reflect::set(&state, &JsValue::from_str("phi"), &JsValue::from_f64(phi));
        let _ = Reflect::set(&state, &JsValue::from_str("theta"), &JsValue::from_f64(theta));
        let _ = Reflect::set(&state, &JsValue::from_str("width"), &edge);
        let _ = Reflect::set(&state, &JsValue::from_str("height"), &edge);
    });
    Reflect::set(&options, &JsValue::from_str("onRender"), on_render.as_ref())?;

    let globe = create_globe.call2(&JsValue::NULL, canvas, &options)?;
    Ok(LiveGlobe {
        globe,
        _on_render: on_render,
        _resize: resize,
    })
}

#[derive(Properties, PartialEq)]
pub struct GlobeProps {
    pub stops: Vec<TravelStop>,
}

#[function_component(Globe)]
pub fn globe(props: &GlobeProps) -> Html {
    let config = use_memo((), |_| GlobeConfig::from_attributes(settings(SETTINGS_ID)));
    let canvas_ref = use_node_ref();
    let failed = use_state_eq(|| false);
    let dragging = use_state_eq(|| false);
    let poll = use_memo((), |_| LibraryPoll::default());
    let live = use_mut_ref(|| None::<LiveGlobe>);
    let orientation = use_mut_ref(|| GlobeOrientation::new(config.spin_per_frame, config.drag_factor));

    {
        let canvas_ref = canvas_ref.clone();
        let failed = failed.clone();
        let orientation = orientation.clone();
        let config = config.clone();
        use_effect_with(props.stops.clone(), move |stops| {
            live.borrow_mut().take();
            let stops = stops.clone();
            let slot = live.clone();

            poll.run(
                WIDGET,
                config.retry_ms,
                move || {
                    let canvas = canvas_ref
                        .cast::<HtmlCanvasElement>()
                        .ok_or(MountError::MissingNode("globe canvas"))?;
                    mount(&canvas, &config, &stops, orientation.clone())
                },
                move |globe| {
                    *slot.borrow_mut() = Some(globe);
                },
                move |error| {
                    if !matches!(error, MountError::MissingNode(_)) {
                        failed.set(true);
                    }
                },
            );

            move || {
                poll.cancel();
                live.borrow_mut().take();
            }
        });
    }

    if *failed {
        return html! {
            <div class="globe-fallback" role="img" aria-label="Globe unavailable">
                <div class="globe-fallback__title">{"Travel globe"}</div>
                <div class="globe-fallback__detail">
                    {format!("{} destinations", props.stops.len())}
                </div>
            </div>
        };
    }

    let onpointerdown = {
        let orientation = orientation.clone();
        let dragging = dragging.clone();
        Callback::from(move |event: PointerEvent| {
            orientation.borrow_mut().pointer_down(f64::from(event.client_x()));
            dragging.set(true);
        })
    };

    let onpointermove = {
        let orientation = orientation.clone();
        Callback::from(move |event: PointerEvent| {
            orientation.borrow_mut().pointer_move(f64::from(event.client_x()));
        })
    };

    let release = {
        let orientation = orientation.clone();
        let dragging = dragging.clone();
        Callback::from(move |_: PointerEvent| {
            orientation.borrow_mut().pointer_up();
            dragging.set(false);
        })
    };

    html! {
        <div class="globe">
            <canvas
                ref={canvas_ref}
                class={classes!("globe__canvas", (*dragging).then_some("dragging"))}
                style={format!("max-width: {0}px; max-height: {0}px;", config.size)}
                onpointerdown={onpointerdown}
                onpointermove={onpointermove}
                onpointerup={release.clone()}
                onpointerout={release.clone()}
                onpointercancel={release}
            />
        </div>
    }
}
