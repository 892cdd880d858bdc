use crate::motion::{ease_in_out_cubic, remap, round_to};

const ROTATE_X_DIVISOR: f64 = 5.0;
const ROTATE_Y_DIVISOR: f64 = 4.0;
const BACKGROUND_RANGE: (f64, f64) = (35.0, 65.0);
const PERCENT_RANGE: (f64, f64) = (0.0, 100.0);
const CENTER_PERCENT: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltFrame {
    pub percent_x: f64,
    pub percent_y: f64,
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub background_x: f64,
    pub background_y: f64,
    pub pointer_from_center: f64,
    pub pointer_from_top: f64,
    pub pointer_from_left: f64,
}

impl TiltFrame {
    pub fn from_percent(percent_x: f64, percent_y: f64) -> Self {
        let percent_x = percent_x.clamp(PERCENT_RANGE.0, PERCENT_RANGE.1);
        let percent_y = percent_y.clamp(PERCENT_RANGE.0, PERCENT_RANGE.1);
        let center_x = percent_x - CENTER_PERCENT;
        let center_y = percent_y - CENTER_PERCENT;

        Self {
            percent_x,
            percent_y,
            rotate_x: round_to(-(center_x / ROTATE_X_DIVISOR), 3),
            rotate_y: round_to(center_y / ROTATE_Y_DIVISOR, 3),
            background_x: round_to(remap(percent_x, PERCENT_RANGE, BACKGROUND_RANGE), 3),
            background_y: round_to(remap(percent_y, PERCENT_RANGE, BACKGROUND_RANGE), 3),
            pointer_from_center: (center_y.hypot(center_x) / CENTER_PERCENT).min(1.0),
            pointer_from_top: percent_y / 100.0,
            pointer_from_left: percent_x / 100.0,
        }
    }

    pub fn centered() -> Self {
        Self::from_percent(CENTER_PERCENT, CENTER_PERCENT)
    }

    pub fn css_variables(&self) -> [(&'static str, String); 9] {
        [
            ("--pointer-x", format!("{}%", self.percent_x)),
            ("--pointer-y", format!("{}%", self.percent_y)),
            ("--background-x", format!("{}%", self.background_x)),
            ("--background-y", format!("{}%", self.background_y)),
            ("--pointer-from-center", self.pointer_from_center.to_string()),
            ("--pointer-from-top", self.pointer_from_top.to_string()),
            ("--pointer-from-left", self.pointer_from_left.to_string()),
            ("--rotate-x", format!("{}deg", self.rotate_x)),
            ("--rotate-y", format!("{}deg", self.rotate_y)),
        ]
    }
}

pub fn pointer_percent(x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
    fn axis(offset: f64, extent: f64) -> f64 {
        if extent <= 0.0 || !extent.is_finite() || !offset.is_finite() {
            return CENTER_PERCENT;
        }
        (offset / extent * 100.0).clamp(PERCENT_RANGE.0, PERCENT_RANGE.1)
    }

    (axis(x, width), axis(y, height))
}

pub fn tilt_frame(x: f64, y: f64, width: f64, height: f64) -> TiltFrame {
    let (percent_x, percent_y) = pointer_percent(x, y, width, height);
    TiltFrame::from_percent(percent_x, percent_y)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReturnToCenter {
    started_at_ms: Option<f64>,
    duration_ms: f64,
    from: (f64, f64),
}

impl ReturnToCenter {
    pub fn new(from: &TiltFrame, duration_ms: f64) -> Self {
        Self {
            started_at_ms: None,
            duration_ms,
            from: (from.percent_x, from.percent_y),
        }
    }

    // The first sample anchors the clock.
    pub fn sample(&mut self, now_ms: f64) -> (TiltFrame, bool) {
        let started = *self.started_at_ms.get_or_insert(now_ms);
        let progress = if self.duration_ms <= 0.0 {
            1.0
        } else {
            ((now_ms - started) / self.duration_ms).clamp(0.0, 1.0)
        };
        let eased = ease_in_out_cubic(progress);

        let x = remap(eased, (0.0, 1.0), (self.from.0, CENTER_PERCENT));
        let y = remap(eased, (0.0, 1.0), (self.from.1, CENTER_PERCENT));
        (TiltFrame::from_percent(round_to(x, 3), round_to(y, 3)), progress >= 1.0)
    }
}
