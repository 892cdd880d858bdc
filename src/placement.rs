use crate::motion::wrap_position;

pub const FULL_TURN_DEGREES: f64 = 360.0;
pub const MIN_MARQUEE_COPIES: usize = 2;
pub const MARQUEE_COPY_HEADROOM: usize = 1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitGeometry {
    pub center: (f64, f64),
    pub radius: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
}

impl OrbitGeometry {
    pub fn centered(radius: f64, min_opacity: f64, max_opacity: f64) -> Self {
        Self {
            center: (50.0, 50.0),
            radius,
            min_opacity,
            max_opacity,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    FadeOut,
    FadeIn,
    Visible,
}

impl Visibility {
    pub fn from_opacity(opacity: f64) -> Self {
        if opacity < 0.5 {
            Self::FadeOut
        } else if opacity < 0.8 {
            Self::FadeIn
        } else {
            Self::Visible
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FadeOut => "fade-out",
            Self::FadeIn => "fade-in",
            Self::Visible => "visible",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitPlacement {
    pub angle: f64,
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
    pub visibility: Visibility,
}

pub fn orbit_angle(theta: f64, index: usize, count: usize) -> Option<f64> {
    if count == 0 {
        return None;
    }
    let spacing = FULL_TURN_DEGREES / count as f64;
    Some(wrap_position(theta + index as f64 * spacing, FULL_TURN_DEGREES))
}

pub fn fade_opacity(angle: f64, min_opacity: f64, max_opacity: f64) -> f64 {
    let fade = ((angle / FULL_TURN_DEGREES * std::f64::consts::TAU).sin() + 1.0) / 2.0;
    min_opacity + (max_opacity - min_opacity) * fade
}

pub fn place_on_orbit(theta: f64, index: usize, count: usize, geometry: &OrbitGeometry) -> Option<OrbitPlacement> {
    let angle = orbit_angle(theta, index, count)?;
    let radians = angle.to_radians();
    let opacity = fade_opacity(angle, geometry.min_opacity, geometry.max_opacity);

    Some(OrbitPlacement {
        angle,
        x: geometry.center.0 + geometry.radius * radians.cos(),
        y: geometry.center.1 + geometry.radius * radians.sin(),
        opacity,
        visibility: Visibility::from_opacity(opacity),
    })
}

pub fn place_ring(theta: f64, count: usize, geometry: &OrbitGeometry) -> Vec<OrbitPlacement> {
    (0..count)
        .filter_map(|index| place_on_orbit(theta, index, count, geometry))
        .collect()
}

/// Number of sequence copies needed so the track covers the container plus one spare copy.
pub fn marquee_copy_count(container_width: f64, sequence_width: f64) -> usize {
    if sequence_width <= 0.0 || !sequence_width.is_finite() || !container_width.is_finite() {
        return MIN_MARQUEE_COPIES;
    }

    let covering = (container_width.max(0.0) / sequence_width).ceil() as usize;
    (covering + MARQUEE_COPY_HEADROOM).max(MIN_MARQUEE_COPIES)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn ring() -> OrbitGeometry {
        OrbitGeometry::centered(51.5, 0.3, 1.0)
    }

    #[test]
    fn first_item_at_ninety_degrees_sits_below_center() {
        let placement = place_on_orbit(90.0, 0, 10, &ring()).expect("non-empty ring");

        assert!((placement.x - 50.0).abs() < EPSILON);
        assert!((placement.y - 101.5).abs() < EPSILON);
        assert!((placement.opacity - 1.0).abs() < EPSILON);
        assert_eq!(placement.visibility, Visibility::Visible);
    }

    #[test]
    fn items_are_evenly_spaced() {
        let placements = place_ring(0.0, 4, &ring());
        let angles: Vec<f64> = placements.iter().map(|placement| placement.angle).collect();

        assert_eq!(angles, vec![0.0, 90.0, 180.0, 270.0]);
        assert!((placements[3].opacity - 0.3).abs() < EPSILON);
        assert_eq!(placements[3].visibility, Visibility::FadeOut);
    }

    #[test]
    fn placement_is_periodic_in_full_turns() {
        let geometry = ring();
        for theta in [0.0, 17.25, 123.5, 359.9] {
            for turns in [-3i32, -1, 1, 2, 5] {
                let shifted = theta + FULL_TURN_DEGREES * f64::from(turns);
                for index in 0..10 {
                    let base = place_on_orbit(theta, index, 10, &geometry).expect("placement");
                    let moved = place_on_orbit(shifted, index, 10, &geometry).expect("placement");

                    assert!((base.x - moved.x).abs() < 1e-6);
                    assert!((base.y - moved.y).abs() < 1e-6);
                    assert!((base.opacity - moved.opacity).abs() < 1e-6);
                }
            }
        }
    }

    #[test]
    fn empty_ring_places_nothing() {
        assert_eq!(orbit_angle(45.0, 0, 0), None);
        assert!(place_ring(45.0, 0, &ring()).is_empty());
    }

    #[test]
    fn visibility_buckets_follow_opacity() {
        assert_eq!(Visibility::from_opacity(0.49), Visibility::FadeOut);
        assert_eq!(Visibility::from_opacity(0.5), Visibility::FadeIn);
        assert_eq!(Visibility::from_opacity(0.8), Visibility::Visible);
        assert_eq!(Visibility::FadeIn.as_str(), "fade-in");
    }

    #[test]
    fn marquee_keeps_at_least_two_copies() {
        assert_eq!(marquee_copy_count(0.0, 400.0), 2);
        assert_eq!(marquee_copy_count(300.0, 400.0), 2);
        assert_eq!(marquee_copy_count(1_000.0, 0.0), 2);
    }

    #[test]
    fn marquee_covers_container_plus_one_copy() {
        let copies = marquee_copy_count(1_250.0, 400.0);

        assert_eq!(copies, 5);
        assert!(copies as f64 * 400.0 >= 1_250.0 + 400.0);
        assert_eq!(marquee_copy_count(1_200.0, 400.0), 4);
    }
}
