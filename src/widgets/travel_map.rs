use js_sys::Reflect;
use serde_json::json;
use wasm_bindgen::JsValue;
use web_sys::HtmlElement;
use yew::prelude::*;

use super::particles::ParticleLayer;
use super::{attached, call_method, global, js_object, settings, LibraryPoll};
use crate::config::library_retry_ms;
use crate::content::TravelLog;
use crate::error::MountError;
use crate::motion::stagger_ms;
use crate::projection::residence_routes;

const WIDGET: &str = "travel_map";
const SETTINGS_ID: &str = "travel-map-settings";
const DARK_TILES: &str = "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png";
const TILE_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>";
const ROUTE_COLOR: &str = "#60a5fa";
const ROUTE_STAGGER_MS: u32 = 300;

struct LiveMap {
    map: JsValue,
}

impl Drop for LiveMap {
    fn drop(&mut self) {
        let _ = call_method(&self.map, "remove", &[]);
    }
}

fn marker(leaflet: &JsValue, lat: f64, lng: f64, icon: &JsValue, title: &str) -> Result<JsValue, MountError> {
    let position = js_object(&json!([lat, lng]))?;
    let options = js_object(&json!({ "title": title }))?;
    Reflect::set(&options, &JsValue::from_str("icon"), icon)?;
    call_method(leaflet, "marker", &[&position, &options])
}

fn div_icon(leaflet: &JsValue, class_name: &str, html: &str, size: u32) -> Result<JsValue, MountError> {
    let options = js_object(&json!({
        "className": class_name,
        "html": html,
        "iconSize": [size, size],
        "iconAnchor": [size / 2, size / 2],
    }))?;
    call_method(leaflet, "divIcon", &[&options])
}

fn add_with_popup(map: &JsValue, marker: &JsValue, popup_html: &str, popup_class: &str) -> Result<(), MountError> {
    call_method(marker, "addTo", &[map])?;
    let popup_options = js_object(&json!({
        "className": popup_class,
        "maxWidth": 300,
        "closeButton": false,
    }))?;
    call_method(marker, "bindPopup", &[&JsValue::from_str(popup_html), &popup_options])?;
    Ok(())
}

// Offsets each route's dash animation so the lines do not march in lockstep.
fn stagger_route(line: &JsValue, index: usize) -> Result<(), MountError> {
    let path = call_method(line, "getElement", &[])?;
    if path.is_undefined() || path.is_null() {
        return Ok(());
    }
    let style = Reflect::get(&path, &JsValue::from_str("style"))?;
    let delay = format!("{}ms", stagger_ms(index, ROUTE_STAGGER_MS));
    call_method(&style, "setProperty", &[&JsValue::from_str("animation-delay"), &JsValue::from_str(&delay)])?;
    Ok(())
}

fn mount(container: &HtmlElement, log: &TravelLog) -> Result<LiveMap, MountError> {
    let leaflet = global("L")?;
    let map_options = js_object(&json!({
        "center": [20, 100],
        "zoom": 4,
        "zoomControl": false,
        "attributionControl": true,
        "scrollWheelZoom": false,
    }))?;
    let host = JsValue::from(container.clone());
    let live = LiveMap {
        map: call_method(&leaflet, "map", &[&host, &map_options])?,
    };

    let tile_options = js_object(&json!({
        "attribution": TILE_ATTRIBUTION,
        "subdomains": "abcd",
        "maxZoom": 19,
    }))?;
    let tiles = call_method(&leaflet, "tileLayer", &[&JsValue::from_str(DARK_TILES), &tile_options])?;
    call_method(&tiles, "addTo", &[&live.map])?;

    let control = Reflect::get(&leaflet, &JsValue::from_str("control"))?;
    let zoom = call_method(&control, "zoom", &[&js_object(&json!({ "position": "bottomright" }))?])?;
    call_method(&zoom, "addTo", &[&live.map])?;

    for stop in &log.stops {
        let icon = div_icon(&leaflet, "tech-travel-marker", &stop.marker_html(), 40)?;
        let title = format!("{} ({})", stop.name, stop.age_label());
        let pin = marker(&leaflet, stop.point.lat, stop.point.lng, &icon, &title)?;
        add_with_popup(&live.map, &pin, &stop.popup_html(), "tech-travel-popup")?;
    }

    let home = &log.residence;
    let home_icon = div_icon(
        &leaflet,
        "residence-marker",
        r#"<div class="residence-container"><div class="residence-pulse"></div><div class="residence-glow"></div><div class="residence-core"></div><div class="residence-label">Home</div></div>"#,
        50,
    )?;
    let home_pin = marker(&leaflet, home.point.lat, home.point.lng, &home_icon, &home.name)?;
    add_with_popup(&live.map, &home_pin, &home.popup_html(), "residence-popup")?;

    let route_options = js_object(&json!({
        "color": ROUTE_COLOR,
        "weight": 2,
        "opacity": 0.8,
        "dashArray": "20 10",
        "className": "residence-route",
    }))?;
    for (index, route) in residence_routes(&home.point, &log.stops).into_iter().enumerate() {
        let line = call_method(&leaflet, "polyline", &[&js_object(&json!(route))?, &route_options])?;
        call_method(&line, "addTo", &[&live.map])?;
        stagger_route(&line, index)?;
    }

    Ok(live)
}

#[derive(Properties, PartialEq)]
pub struct TravelMapProps {
    pub log: TravelLog,
}

#[function_component(TravelMap)]
pub fn travel_map(props: &TravelMapProps) -> Html {
    let container_ref = use_node_ref();
    let failed = use_state_eq(|| false);
    let poll = use_memo((), |_| LibraryPoll::default());
    let live = use_mut_ref(|| None::<LiveMap>);

    {
        let container_ref = container_ref.clone();
        let failed = failed.clone();
        use_effect_with(props.log.clone(), move |log| {
            live.borrow_mut().take();
            let log = log.clone();
            let retry_ms = library_retry_ms(settings(SETTINGS_ID)("data-retry-ms").as_deref());
            let slot = live.clone();

            poll.run(
                WIDGET,
                retry_ms,
                move || {
                    let container = attached(&container_ref, "travel map container")?;
                    mount(&container, &log)
                },
                move |map| {
                    *slot.borrow_mut() = Some(map);
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
            <div class="map-fallback" role="img" aria-label="Travel map unavailable">
                <div class="map-fallback__title">{"Travel map"}</div>
                <div class="map-fallback__detail">{"The map library could not be started."}</div>
            </div>
        };
    }

    html! {
        <div class="travel-map-shell">
            <div ref={container_ref} class="travel-map" role="region" aria-label="Interactive travel map" />
            <ParticleLayer />
        </div>
    }
}
