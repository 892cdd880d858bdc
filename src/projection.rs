use serde::Serialize;

use crate::content::{GeoPoint, TravelStop};

pub const WORLD_MAP_WIDTH: f64 = 800.0;
pub const WORLD_MAP_HEIGHT: f64 = 400.0;
const ARC_LIFT: f64 = 50.0;
const GLOBE_MARKER_SIZE: f64 = 0.05;

/// Equirectangular projection onto a `width` x `height` plane with north up.
pub fn project_equirectangular(lat: f64, lng: f64, width: f64, height: f64) -> (f64, f64) {
    let x = (lng + 180.0) * (width / 360.0);
    let y = (90.0 - lat) * (height / 180.0);
    (x, y)
}

pub fn project_world(point: &GeoPoint) -> (f64, f64) {
    project_equirectangular(point.lat, point.lng, WORLD_MAP_WIDTH, WORLD_MAP_HEIGHT)
}

pub fn travel_arc_path(start: (f64, f64), end: (f64, f64)) -> String {
    let mid_x = (start.0 + end.0) / 2.0;
    let mid_y = start.1.min(end.1) - ARC_LIFT;
    format!(
        "M {:.2} {:.2} Q {:.2} {:.2} {:.2} {:.2}",
        start.0, start.1, mid_x, mid_y, end.0, end.1
    )
}

#[derive(Clone, Debug, PartialEq)]
pub struct TravelLeg<'a> {
    pub from: &'a TravelStop,
    pub to: &'a TravelStop,
}

pub fn travel_legs(stops: &[TravelStop]) -> Vec<TravelLeg<'_>> {
    stops
        .windows(2)
        .map(|pair| TravelLeg {
            from: &pair[0],
            to: &pair[1],
        })
        .collect()
}

pub fn residence_routes(home: &GeoPoint, stops: &[TravelStop]) -> Vec<[[f64; 2]; 2]> {
    stops
        .iter()
        .map(|stop| [[home.lat, home.lng], [stop.point.lat, stop.point.lng]])
        .collect()
}

/// `[lat, lng, size]` triples for the globe renderer, one per distinct place.
pub fn globe_markers(stops: &[TravelStop]) -> Vec<[f64; 3]> {
    let mut markers: Vec<[f64; 3]> = Vec::with_capacity(stops.len());
    for stop in stops {
        let marker = [stop.point.lat, stop.point.lng, GLOBE_MARKER_SIZE];
        if !markers.contains(&marker) {
            markers.push(marker);
        }
    }
    markers
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GlobeMarker {
    pub location: [f64; 2],
    pub size: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobeOptions {
    pub device_pixel_ratio: f64,
    pub width: f64,
    pub height: f64,
    pub phi: f64,
    pub theta: f64,
    pub dark: f64,
    pub diffuse: f64,
    pub map_samples: u32,
    pub map_brightness: f64,
    pub base_color: [f64; 3],
    pub marker_color: [f64; 3],
    pub glow_color: [f64; 3],
    pub markers: Vec<GlobeMarker>,
}

fn normalized_pixel_ratio(device_pixel_ratio: f64) -> f64 {
    if device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    }
}

/// Drawing-buffer edge for a canvas laid out `css_width` pixels wide.
/// A canvas with no layout yet (hidden, detached) uses `fallback` instead.
pub fn globe_backing_size(css_width: f64, device_pixel_ratio: f64, fallback: f64) -> f64 {
    let width = if css_width > 0.0 { css_width } else { fallback };
    width * normalized_pixel_ratio(device_pixel_ratio)
}

pub fn globe_options(css_width: f64, device_pixel_ratio: f64, fallback: f64, stops: &[TravelStop]) -> GlobeOptions {
    let device_pixel_ratio = normalized_pixel_ratio(device_pixel_ratio);
    let edge = globe_backing_size(css_width, device_pixel_ratio, fallback);
    GlobeOptions {
        device_pixel_ratio,
        width: edge,
        height: edge,
        phi: 0.0,
        theta: 0.0,
        dark: 1.0,
        diffuse: 1.2,
        map_samples: 16_000,
        map_brightness: 6.0,
        base_color: [0.3, 0.3, 0.3],
        marker_color: [0.1, 0.8, 1.0],
        glow_color: [1.0, 1.0, 1.0],
        markers: globe_markers(stops)
            .into_iter()
            .map(|[lat, lng, size]| GlobeMarker {
                location: [lat, lng],
                size,
            })
            .collect(),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GlobeOrientation {
    phi: f64,
    theta: f64,
    spin_per_frame: f64,
    drag_factor: f64,
    drag_anchor: Option<f64>,
}

impl GlobeOrientation {
    pub fn new(spin_per_frame: f64, drag_factor: f64) -> Self {
        Self {
            phi: 0.0,
            theta: 0.0,
            spin_per_frame,
            drag_factor,
            drag_anchor: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    pub fn pointer_down(&mut self, client_x: f64) {
        self.drag_anchor = Some(client_x);
    }

    pub fn pointer_move(&mut self, client_x: f64) {
        let Some(anchor) = self.drag_anchor else {
            return;
        };
        self.phi += (client_x - anchor) * self.drag_factor;
        self.drag_anchor = Some(client_x);
    }

    pub fn pointer_up(&mut self) {
        self.drag_anchor = None;
    }

    pub fn on_render(&mut self) -> (f64, f64) {
        if !self.is_dragging() {
            self.phi += self.spin_per_frame;
        }
        (self.phi, self.theta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(name: &str, lat: f64, lng: f64) -> TravelStop {
        TravelStop {
            name: name.to_string(),
            age: 10,
            year: 2017,
            point: GeoPoint { lat, lng },
            description: String::new(),
            highlights: String::new(),
        }
    }

    #[test]
    fn projection_maps_corners_and_origin() {
        assert_eq!(project_equirectangular(90.0, -180.0, 800.0, 400.0), (0.0, 0.0));
        assert_eq!(project_equirectangular(-90.0, 180.0, 800.0, 400.0), (800.0, 400.0));
        assert_eq!(project_equirectangular(0.0, 0.0, 800.0, 400.0), (400.0, 200.0));
    }

    #[test]
    fn arc_control_point_rises_above_higher_end() {
        let path = travel_arc_path((100.0, 200.0), (300.0, 150.0));
        assert_eq!(path, "M 100.00 200.00 Q 200.00 100.00 300.00 150.00");
    }

    #[test]
    fn legs_join_consecutive_stops() {
        let stops = vec![stop("A", 0.0, 0.0), stop("B", 1.0, 1.0), stop("C", 2.0, 2.0)];
        let legs = travel_legs(&stops);

        assert_eq!(legs.len(), 2);
        assert_eq!(legs[1].from.name, "B");
        assert_eq!(legs[1].to.name, "C");
        assert!(travel_legs(&stops[..1]).is_empty());
    }

    #[test]
    fn globe_markers_skip_repeat_visits() {
        let stops = vec![stop("A", 1.0, 2.0), stop("B", 3.0, 4.0), stop("A again", 1.0, 2.0)];

        assert_eq!(globe_markers(&stops), vec![[1.0, 2.0, 0.05], [3.0, 4.0, 0.05]]);
    }

    #[test]
    fn residence_routes_start_at_home() {
        let home = GeoPoint { lat: 30.0, lng: 104.0 };
        let routes = residence_routes(&home, &[stop("A", 1.0, 2.0)]);

        assert_eq!(routes, vec![[[30.0, 104.0], [1.0, 2.0]]]);
    }

    #[test]
    fn globe_options_scale_canvas_and_nest_markers() {
        let options = globe_options(600.0, 2.0, 600.0, &[stop("A", 1.0, 2.0)]);
        let value = serde_json::to_value(&options).expect("serializable");

        assert_eq!(value["width"], 1200.0);
        assert_eq!(value["mapSamples"], 16_000);
        assert_eq!(value["markers"][0]["location"][1], 2.0);
        assert_eq!(value["markers"][0]["size"], 0.05);
        assert_eq!(globe_options(600.0, 0.0, 600.0, &[]).device_pixel_ratio, 1.0);
    }

    #[test]
    fn globe_backing_size_follows_layout_width() {
        assert_eq!(globe_backing_size(320.0, 2.0, 600.0), 640.0);
        assert_eq!(globe_backing_size(0.0, 2.0, 600.0), 1_200.0);
        assert_eq!(globe_backing_size(320.0, 0.0, 600.0), 320.0);

        let narrow = globe_options(280.0, 1.5, 600.0, &[]);
        assert_eq!(narrow.width, 420.0);
        assert_eq!(narrow.height, 420.0);
    }

    #[test]
    fn globe_spins_until_dragged() {
        let mut globe = GlobeOrientation::new(0.005, 0.01);
        globe.on_render();
        let (phi, theta) = globe.on_render();
        assert!((phi - 0.01).abs() < 1e-12);
        assert_eq!(theta, 0.0);

        globe.pointer_down(100.0);
        globe.pointer_move(150.0);
        globe.pointer_move(140.0);
        let (dragged, _) = globe.on_render();
        assert!((dragged - (0.01 + 0.4)).abs() < 1e-12);

        globe.pointer_up();
        globe.pointer_move(500.0);
        let (released, _) = globe.on_render();
        assert!((released - (0.415)).abs() < 1e-12);
    }
}
