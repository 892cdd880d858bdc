use yew::prelude::*;

use crate::content::TravelStop;
use crate::projection::{project_world, travel_arc_path, travel_legs, WORLD_MAP_HEIGHT, WORLD_MAP_WIDTH};

const LEG_STAGGER_SECONDS: f64 = 0.5;
const POINT_COLOR: &str = "#0EA5E9";

#[derive(Properties, PartialEq)]
pub struct WorldMapProps {
    pub stops: Vec<TravelStop>,
    #[prop_or_default]
    pub on_select: Callback<String>,
}

#[function_component(WorldMap)]
pub fn world_map(props: &WorldMapProps) -> Html {
    let arcs = travel_legs(&props.stops).into_iter().enumerate().map(|(index, leg)| {
        let path = travel_arc_path(project_world(&leg.from.point), project_world(&leg.to.point));
        html! {
            <path
                key={format!("{}-{}", leg.from.name, leg.to.name)}
                class="travel-path"
                d={path}
                fill="none"
                stroke="url(#path-gradient)"
                stroke-width="1"
                stroke-linecap="round"
                stroke-linejoin="round"
                stroke-dasharray="1000"
                stroke-dashoffset="1000"
                style={format!("animation-delay: {}s;", LEG_STAGGER_SECONDS * index as f64)}
            />
        }
    });

    let points = props.stops.iter().enumerate().map(|(index, stop)| {
        let (x, y) = project_world(&stop.point);
        let (cx, cy) = (format!("{x:.2}"), format!("{y:.2}"));
        let onclick = {
            let on_select = props.on_select.clone();
            let name = stop.name.clone();
            Callback::from(move |_: MouseEvent| on_select.emit(name.clone()))
        };

        html! {
            <g key={stop.name.clone()} class="travel-stop">
                <circle
                    class="travel-point"
                    cx={cx.clone()}
                    cy={cy.clone()}
                    r="2"
                    fill={POINT_COLOR}
                    style={format!("--delay: {index};")}
                    onclick={onclick}
                >
                    <title>{format!("{} ({})", stop.name, stop.age_label())}</title>
                </circle>
                <circle cx={cx} cy={cy} r="2" fill={POINT_COLOR} opacity="0.5" pointer-events="none">
                    <animate attributeName="r" from="2" to="8" dur="1.5s" begin="0s" repeatCount="indefinite" />
                    <animate attributeName="opacity" from="0.5" to="0" dur="1.5s" begin="0s" repeatCount="indefinite" />
                </circle>
            </g>
        }
    });

    html! {
        <svg
            class="world-map"
            viewBox={format!("0 0 {WORLD_MAP_WIDTH} {WORLD_MAP_HEIGHT}")}
            preserveAspectRatio="xMidYMid meet"
            role="img"
            aria-label="Travel route map"
        >
            <defs>
                <linearGradient id="path-gradient" x1="0%" y1="0%" x2="100%" y2="0%">
                    <stop offset="0%" stop-color="white" stop-opacity="0" />
                    <stop offset="5%" stop-color={POINT_COLOR} stop-opacity="1" />
                    <stop offset="95%" stop-color={POINT_COLOR} stop-opacity="1" />
                    <stop offset="100%" stop-color="white" stop-opacity="0" />
                </linearGradient>
            </defs>
            <rect class="world-map__backdrop" width={WORLD_MAP_WIDTH.to_string()} height={WORLD_MAP_HEIGHT.to_string()} />
            <g class="travel-paths">{ for arcs }</g>
            <g class="travel-points">{ for points }</g>
        </svg>
    }
}
