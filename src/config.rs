use crate::motion::SMOOTH_TAU_SECONDS;

const DEFAULT_SCRAMBLE_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()";

const SMOOTH_TAU_BOUNDS: (f64, f64) = (0.0, 10.0);
const MARQUEE_SPEED_BOUNDS: (f64, f64) = (-2_000.0, 2_000.0);
const MARQUEE_GAP_BOUNDS: (f64, f64) = (0.0, 256.0);
const MARQUEE_LOGO_HEIGHT_BOUNDS: (f64, f64) = (8.0, 256.0);
const ORBIT_RADIUS_BOUNDS: (f64, f64) = (0.0, 100.0);
const ORBIT_SPEED_BOUNDS: (f64, f64) = (-720.0, 720.0);
const OPACITY_BOUNDS: (f64, f64) = (0.0, 1.0);
const SNOW_QUANTITY_BOUNDS: (u32, u32) = (0, 1_000);
const SNOW_SPEED_BOUNDS: (f64, f64) = (0.05, 10.0);
const SNOW_RADIUS_BOUNDS: (f64, f64) = (0.1, 50.0);
const SNOW_SPAWN_INTERVAL_MS_BOUNDS: (u32, u32) = (16, 10_000);
const SCRAMBLE_SPEED_MS_BOUNDS: (u32, u32) = (10, 2_000);
const SCRAMBLE_ITERATIONS_BOUNDS: (u32, u32) = (0, 200);
const TILT_RETURN_MS_BOUNDS: (f64, f64) = (0.0, 5_000.0);
const GLOBE_SPIN_BOUNDS: (f64, f64) = (-0.5, 0.5);
const GLOBE_DRAG_BOUNDS: (f64, f64) = (0.0, 1.0);
const LIBRARY_RETRY_MS_BOUNDS: (u32, u32) = (50, 60_000);

pub fn parse_f64_with_bounds(raw: Option<&str>, default: f64, bounds: (f64, f64)) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

pub fn parse_u32_with_bounds(raw: Option<&str>, default: u32, bounds: (u32, u32)) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

pub fn parse_bool(raw: Option<&str>, default: bool) -> bool {
    match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
        Some("true" | "1" | "yes" | "on" | "") => true,
        Some("false" | "0" | "no" | "off") => false,
        _ => default,
    }
}

pub fn parse_non_empty_string(raw: Option<&str>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    fn parse(raw: Option<&str>, default: Direction) -> Direction {
        match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
            Some("left") => Self::Left,
            Some("right") => Self::Right,
            _ => default,
        }
    }

    pub fn sign(self) -> f64 {
        match self {
            Self::Left => 1.0,
            Self::Right => -1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarqueeConfig {
    pub speed: f64,
    pub direction: Direction,
    pub gap: f64,
    pub logo_height: f64,
    pub pause_on_hover: bool,
    pub fade_out: bool,
    pub scale_on_hover: bool,
    pub fade_out_color: Option<String>,
    pub smooth_tau: f64,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            speed: 120.0,
            direction: Direction::Left,
            gap: 32.0,
            logo_height: 28.0,
            pause_on_hover: true,
            fade_out: true,
            scale_on_hover: true,
            fade_out_color: None,
            smooth_tau: SMOOTH_TAU_SECONDS,
        }
    }
}

impl MarqueeConfig {
    pub fn from_attributes(read: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            speed: parse_f64_with_bounds(read("data-speed").as_deref(), defaults.speed, MARQUEE_SPEED_BOUNDS),
            direction: Direction::parse(read("data-direction").as_deref(), defaults.direction),
            gap: parse_f64_with_bounds(read("data-gap").as_deref(), defaults.gap, MARQUEE_GAP_BOUNDS),
            logo_height: parse_f64_with_bounds(
                read("data-logo-height").as_deref(),
                defaults.logo_height,
                MARQUEE_LOGO_HEIGHT_BOUNDS,
            ),
            pause_on_hover: parse_bool(read("data-pause-on-hover").as_deref(), defaults.pause_on_hover),
            fade_out: parse_bool(read("data-fade-out").as_deref(), defaults.fade_out),
            scale_on_hover: parse_bool(read("data-scale-on-hover").as_deref(), defaults.scale_on_hover),
            fade_out_color: parse_non_empty_string(read("data-fade-out-color").as_deref()),
            smooth_tau: parse_f64_with_bounds(read("data-smooth-tau").as_deref(), defaults.smooth_tau, SMOOTH_TAU_BOUNDS),
        }
    }

    // px/s, positive scrolls content to the left
    pub fn cruise_velocity(&self) -> f64 {
        let speed_sign = if self.speed < 0.0 { -1.0 } else { 1.0 };
        self.speed.abs() * self.direction.sign() * speed_sign
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrbitConfig {
    pub radius: f64,
    pub base_speed: f64,
    pub hover_speed: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    pub smooth_tau: f64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            radius: 51.5,
            base_speed: 12.0,
            hover_speed: 3.0,
            min_opacity: 0.3,
            max_opacity: 1.0,
            smooth_tau: SMOOTH_TAU_SECONDS,
        }
    }
}

impl OrbitConfig {
    pub fn from_attributes(read: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let min_opacity = parse_f64_with_bounds(read("data-min-opacity").as_deref(), defaults.min_opacity, OPACITY_BOUNDS);
        let max_opacity = parse_f64_with_bounds(read("data-max-opacity").as_deref(), defaults.max_opacity, OPACITY_BOUNDS);
        let (min_opacity, max_opacity) = if min_opacity <= max_opacity {
            (min_opacity, max_opacity)
        } else {
            (defaults.min_opacity, defaults.max_opacity)
        };

        Self {
            radius: parse_f64_with_bounds(read("data-radius").as_deref(), defaults.radius, ORBIT_RADIUS_BOUNDS),
            base_speed: parse_f64_with_bounds(read("data-speed").as_deref(), defaults.base_speed, ORBIT_SPEED_BOUNDS),
            hover_speed: parse_f64_with_bounds(read("data-hover-speed").as_deref(), defaults.hover_speed, ORBIT_SPEED_BOUNDS),
            min_opacity,
            max_opacity,
            smooth_tau: parse_f64_with_bounds(read("data-smooth-tau").as_deref(), defaults.smooth_tau, SMOOTH_TAU_BOUNDS),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SnowfallConfig {
    pub quantity: u32,
    pub speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub spawn_interval_ms: u32,
}

impl Default for SnowfallConfig {
    fn default() -> Self {
        Self {
            quantity: 300,
            speed: 0.5,
            min_radius: 0.2,
            max_radius: 5.0,
            spawn_interval_ms: 100,
        }
    }
}

impl SnowfallConfig {
    pub fn from_attributes(read: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let min_radius = parse_f64_with_bounds(read("data-min-radius").as_deref(), defaults.min_radius, SNOW_RADIUS_BOUNDS);
        let max_radius = parse_f64_with_bounds(read("data-max-radius").as_deref(), defaults.max_radius, SNOW_RADIUS_BOUNDS);
        let (min_radius, max_radius) = if min_radius <= max_radius {
            (min_radius, max_radius)
        } else {
            (max_radius, min_radius)
        };

        Self {
            quantity: parse_u32_with_bounds(read("data-quantity").as_deref(), defaults.quantity, SNOW_QUANTITY_BOUNDS),
            speed: parse_f64_with_bounds(read("data-speed").as_deref(), defaults.speed, SNOW_SPEED_BOUNDS),
            min_radius,
            max_radius,
            spawn_interval_ms: parse_u32_with_bounds(
                read("data-spawn-interval-ms").as_deref(),
                defaults.spawn_interval_ms,
                SNOW_SPAWN_INTERVAL_MS_BOUNDS,
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrambleConfig {
    pub speed_ms: u32,
    pub max_iterations: u32,
    pub alphabet: String,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            speed_ms: 50,
            max_iterations: 10,
            alphabet: DEFAULT_SCRAMBLE_ALPHABET.to_string(),
        }
    }
}

impl ScrambleConfig {
    pub fn headline() -> Self {
        Self {
            speed_ms: 80,
            max_iterations: 15,
            ..Self::default()
        }
    }

    pub fn role() -> Self {
        Self {
            speed_ms: 60,
            max_iterations: 12,
            ..Self::default()
        }
    }

    pub fn from_attributes(read: impl Fn(&str) -> Option<String>, defaults: Self) -> Self {
        Self {
            speed_ms: parse_u32_with_bounds(read("data-speed-ms").as_deref(), defaults.speed_ms, SCRAMBLE_SPEED_MS_BOUNDS),
            max_iterations: parse_u32_with_bounds(
                read("data-max-iterations").as_deref(),
                defaults.max_iterations,
                SCRAMBLE_ITERATIONS_BOUNDS,
            ),
            alphabet: parse_non_empty_string(read("data-alphabet").as_deref()).unwrap_or(defaults.alphabet),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TiltConfig {
    pub return_duration_ms: f64,
    pub initial_inset_x: f64,
    pub initial_y: f64,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            return_duration_ms: 600.0,
            initial_inset_x: 70.0,
            initial_y: 60.0,
        }
    }
}

impl TiltConfig {
    pub fn from_attributes(read: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            return_duration_ms: parse_f64_with_bounds(
                read("data-return-ms").as_deref(),
                defaults.return_duration_ms,
                TILT_RETURN_MS_BOUNDS,
            ),
            ..defaults
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GlobeConfig {
    pub spin_per_frame: f64,
    pub drag_factor: f64,
    pub size: f64,
    pub retry_ms: u32,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            spin_per_frame: 0.005,
            drag_factor: 0.01,
            size: 600.0,
            retry_ms: 1_000,
        }
    }
}

impl GlobeConfig {
    pub fn from_attributes(read: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            spin_per_frame: parse_f64_with_bounds(read("data-spin").as_deref(), defaults.spin_per_frame, GLOBE_SPIN_BOUNDS),
            drag_factor: parse_f64_with_bounds(read("data-drag").as_deref(), defaults.drag_factor, GLOBE_DRAG_BOUNDS),
            size: defaults.size,
            retry_ms: parse_u32_with_bounds(read("data-retry-ms").as_deref(), defaults.retry_ms, LIBRARY_RETRY_MS_BOUNDS),
        }
    }
}

pub fn library_retry_ms(raw: Option<&str>) -> u32 {
    parse_u32_with_bounds(raw, 1_000, LIBRARY_RETRY_MS_BOUNDS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn attributes(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn out_of_bounds_values_fall_back_to_default() {
        assert_eq!(parse_f64_with_bounds(Some("5000"), 120.0, MARQUEE_SPEED_BOUNDS), 120.0);
        assert_eq!(parse_f64_with_bounds(Some(" 80.5 "), 120.0, MARQUEE_SPEED_BOUNDS), 80.5);
        assert_eq!(parse_f64_with_bounds(Some("NaN"), 1.0, (0.0, 2.0)), 1.0);
        assert_eq!(parse_u32_with_bounds(Some("-3"), 7, (0, 10)), 7);
        assert_eq!(parse_u32_with_bounds(None, 7, (0, 10)), 7);
    }

    #[test]
    fn bare_boolean_attribute_means_true() {
        assert!(parse_bool(Some(""), false));
        assert!(!parse_bool(Some("off"), true));
        assert!(parse_bool(Some("maybe"), true));
    }

    #[test]
    fn marquee_direction_and_negative_speed_combine() {
        let left = MarqueeConfig::default();
        assert_eq!(left.cruise_velocity(), 120.0);

        let right = MarqueeConfig::from_attributes(attributes(&[("data-direction", "right")]));
        assert_eq!(right.cruise_velocity(), -120.0);

        let right_negative = MarqueeConfig::from_attributes(attributes(&[
            ("data-direction", "Right"),
            ("data-speed", "-60"),
        ]));
        assert_eq!(right_negative.cruise_velocity(), 60.0);
    }

    #[test]
    fn inverted_opacity_range_is_rejected() {
        let config = OrbitConfig::from_attributes(attributes(&[
            ("data-min-opacity", "0.9"),
            ("data-max-opacity", "0.2"),
        ]));

        assert_eq!(config.min_opacity, 0.3);
        assert_eq!(config.max_opacity, 1.0);
    }

    #[test]
    fn snowfall_radius_bounds_are_ordered() {
        let config = SnowfallConfig::from_attributes(attributes(&[
            ("data-min-radius", "4"),
            ("data-max-radius", "1"),
            ("data-quantity", "25"),
        ]));

        assert_eq!(config.min_radius, 1.0);
        assert_eq!(config.max_radius, 4.0);
        assert_eq!(config.quantity, 25);
        assert_eq!(config.spawn_interval_ms, 100);
    }

    #[test]
    fn scramble_presets_keep_overrides_optional() {
        let headline = ScrambleConfig::from_attributes(attributes(&[]), ScrambleConfig::headline());
        assert_eq!(headline.speed_ms, 80);
        assert_eq!(headline.max_iterations, 15);

        let custom = ScrambleConfig::from_attributes(
            attributes(&[("data-alphabet", "01"), ("data-max-iterations", "3")]),
            ScrambleConfig::role(),
        );
        assert_eq!(custom.alphabet, "01");
        assert_eq!(custom.max_iterations, 3);
        assert_eq!(custom.speed_ms, 60);
    }

    #[test]
    fn library_retry_defaults_to_one_second() {
        assert_eq!(library_retry_ms(None), 1_000);
        assert_eq!(library_retry_ms(Some("10")), 1_000);
        assert_eq!(library_retry_ms(Some("250")), 250);
    }
}
