use js_sys::{Array, Function, Object, Reflect, JSON};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use super::{global, settings, LibraryPoll};
use crate::charts::{age_activity_chart, percent_label, time_distribution_chart, ChartConfig};
use crate::config::library_retry_ms;
use crate::content::ActivityChart;
use crate::error::MountError;

const SETTINGS_ID: &str = "chart-settings";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    TimeDistribution,
    AgeActivity,
}

impl ChartKind {
    fn widget(self) -> &'static str {
        match self {
            Self::TimeDistribution => "time_chart",
            Self::AgeActivity => "age_chart",
        }
    }

    fn build(self, data: &ActivityChart) -> ChartConfig {
        match self {
            Self::TimeDistribution => time_distribution_chart(data),
            Self::AgeActivity => age_activity_chart(data),
        }
    }
}

struct LiveChart {
    instance: JsValue,
    _tick_label: Closure<dyn Fn(JsValue) -> JsValue>,
    _tooltip_label: Closure<dyn Fn(JsValue) -> JsValue>,
    _on_click: Closure<dyn Fn(JsValue, JsValue)>,
}

impl Drop for LiveChart {
    fn drop(&mut self) {
        let Ok(destroy) = Reflect::get(&self.instance, &JsValue::from_str("destroy")) else {
            return;
        };
        if let Some(destroy) = destroy.dyn_ref::<Function>() {
            let _ = destroy.call0(&self.instance);
        }
    }
}

fn set_path(root: &JsValue, path: &[&str], value: &JsValue) -> Result<(), MountError> {
    let Some((last, parents)) = path.split_last() else {
        return Ok(());
    };

    let mut target = root.clone();
    for key in parents {
        let key = JsValue::from_str(key);
        let mut next = Reflect::get(&target, &key)?;
        if next.is_undefined() || next.is_null() {
            next = Object::new().into();
            Reflect::set(&target, &key, &next)?;
        }
        target = next;
    }
    Reflect::set(&target, &JsValue::from_str(last), value)?;
    Ok(())
}

fn string_at(value: &JsValue, path: &[&str]) -> Option<String> {
    path.iter()
        .try_fold(value.clone(), |current, key| Reflect::get(&current, &JsValue::from_str(key)).ok())
        .and_then(|found| found.as_string())
}

fn mount(canvas: &HtmlCanvasElement, config: &ChartConfig, on_select: Callback<usize>) -> Result<LiveChart, MountError> {
    let constructor: Function = global("Chart")?
        .dyn_into()
        .map_err(|_| MountError::MissingLibrary("Chart"))?;
    let raw = serde_json::to_string(config).map_err(|error| MountError::Script(error.to_string()))?;
    let options = JSON::parse(&raw)?;

    let tick_label = Closure::<dyn Fn(JsValue) -> JsValue>::new(|value: JsValue| {
        JsValue::from_str(&percent_label(value.as_f64().unwrap_or_default()))
    });
    let tooltip_label = Closure::<dyn Fn(JsValue) -> JsValue>::new(|context: JsValue| {
        let label = string_at(&context, &["dataset", "label"]).unwrap_or_default();
        let value = Reflect::get(&context, &JsValue::from_str("raw"))
            .ok()
            .and_then(|raw| raw.as_f64())
            .unwrap_or_default();
        JsValue::from_str(&format!("{label}: {}", percent_label(value)))
    });
    let on_click = Closure::<dyn Fn(JsValue, JsValue)>::new(move |_event: JsValue, elements: JsValue| {
        let index = Reflect::get_u32(&elements, 0)
            .and_then(|element| Reflect::get(&element, &JsValue::from_str("index")))
            .ok()
            .and_then(|index| index.as_f64());
        if let Some(index) = index {
            on_select.emit(index as usize);
        }
    });

    let value_axis = config.value_axis().key();
    set_path(&options, &["options", "scales", value_axis, "ticks", "callback"], tick_label.as_ref())?;
    set_path(&options, &["options", "plugins", "tooltip", "callbacks", "label"], tooltip_label.as_ref())?;
    set_path(&options, &["options", "onClick"], on_click.as_ref())?;

    let instance = Reflect::construct(&constructor, &Array::of2(canvas.as_ref(), &options))?;
    Ok(LiveChart {
        instance,
        _tick_label: tick_label,
        _tooltip_label: tooltip_label,
        _on_click: on_click,
    })
}

#[derive(Properties, PartialEq)]
pub struct ChartViewProps {
    pub kind: ChartKind,
    pub data: ActivityChart,
    pub label: AttrValue,
    #[prop_or_default]
    pub on_select: Callback<usize>,
}

#[function_component(ChartView)]
pub fn chart_view(props: &ChartViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let poll = use_memo((), |_| LibraryPoll::default());
    let live = use_mut_ref(|| None::<LiveChart>);

    {
        let canvas_ref = canvas_ref.clone();
        let on_select = props.on_select.clone();
        use_effect_with((props.kind, props.data.clone()), move |(kind, data)| {
            let kind = *kind;
            let config = kind.build(data);
            let retry_ms = library_retry_ms(settings(SETTINGS_ID)("data-retry-ms").as_deref());
            let slot = live.clone();

            poll.run(
                kind.widget(),
                retry_ms,
                move || {
                    let canvas = canvas_ref
                        .cast::<HtmlCanvasElement>()
                        .ok_or(MountError::MissingNode("chart canvas"))?;
                    mount(&canvas, &config, on_select.clone())
                },
                move |chart| {
                    *slot.borrow_mut() = Some(chart);
                },
                |_| {},
            );

            move || {
                poll.cancel();
                live.borrow_mut().take();
            }
        });
    }

    html! {
        <div class="chart-container">
            <canvas ref={canvas_ref} role="img" aria-label={props.label.clone()} />
        </div>
    }
}
