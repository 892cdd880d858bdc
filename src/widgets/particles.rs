use gloo_events::EventListener;
use serde_json::json;
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use super::{prefers_reduced_motion, report_failure, report_mounted, seeded_rng};
use crate::error::MountError;
use crate::frame_loop::{FrameControl, FrameLoop};
use crate::particles::{ParticleField, PARTICLE_COUNT, PARTICLE_LAYER_OPACITY};
use crate::telemetry::{log_event, LogLevel};

const WIDGET: &str = "particles";

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, MountError> {
    canvas
        .get_context("2d")?
        .and_then(|context| context.dyn_into::<CanvasRenderingContext2d>().ok())
        .ok_or(MountError::Unsupported("canvas 2d"))
}

// The canvas covers its parent; sizes come from the parent's layout box.
fn fit_to_parent(canvas: &HtmlCanvasElement) -> (f64, f64) {
    let (width, height) = canvas
        .parent_element()
        .map(|parent| (parent.client_width(), parent.client_height()))
        .unwrap_or((0, 0));
    let width = u32::try_from(width).unwrap_or(0);
    let height = u32::try_from(height).unwrap_or(0);
    canvas.set_width(width);
    canvas.set_height(height);
    (f64::from(width), f64::from(height))
}

fn set_fill_style(context: &CanvasRenderingContext2d, value: &str) {
    let _ = js_sys::Reflect::set(context.as_ref(), &JsValue::from_str("fillStyle"), &JsValue::from_str(value));
}

fn draw(context: &CanvasRenderingContext2d, field: &ParticleField) {
    context.clear_rect(0.0, 0.0, field.width(), field.height());
    for particle in field.particles() {
        context.begin_path();
        if context.arc(particle.x, particle.y, particle.size, 0.0, TAU).is_err() {
            continue;
        }
        set_fill_style(context, &particle.fill_style());
        context.fill();
    }
}

#[function_component(ParticleLayer)]
pub fn particle_layer() -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with((), move |_| {
            let mounted = if prefers_reduced_motion() {
                log_event(LogLevel::Info, "widget_disabled", json!({ "widget": WIDGET, "reason": "reduced_motion" }));
                None
            } else {
                let started = canvas_ref
                    .cast::<HtmlCanvasElement>()
                    .ok_or(MountError::MissingNode("particle canvas"))
                    .and_then(|canvas| {
                        let context = context_2d(&canvas)?;
                        let (width, height) = fit_to_parent(&canvas);
                        let field = Rc::new(RefCell::new(ParticleField::new(
                            PARTICLE_COUNT,
                            width,
                            height,
                            &mut seeded_rng(),
                        )));
                        report_mounted(WIDGET);

                        let resize = window().map(|win| {
                            let field = field.clone();
                            EventListener::new(&win, "resize", move |_| {
                                let (width, height) = fit_to_parent(&canvas);
                                field.borrow_mut().resize(width, height);
                            })
                        });
                        let frames = FrameLoop::start(move |_| {
                            let mut field = field.borrow_mut();
                            field.step();
                            draw(&context, &field);
                            FrameControl::Continue
                        });
                        Ok((frames, resize))
                    });
                if let Err(error) = &started {
                    report_failure(WIDGET, error);
                }
                started.ok()
            };

            move || drop(mounted)
        });
    }

    html! {
        <canvas
            ref={canvas_ref}
            class="travel-map__particles"
            style={format!("opacity: {PARTICLE_LAYER_OPACITY};")}
            aria-hidden="true"
        />
    }
}
