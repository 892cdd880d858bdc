use std::cmp::Ordering;
use std::sync::atomic::{AtomicU8, Ordering as AtomicOrdering};

const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

static MIN_LOG_LEVEL: AtomicU8 = AtomicU8::new(DEFAULT_LOG_LEVEL.rank());

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl LogLevel {
    const fn rank(self) -> u8 {
        match self {
            Self::Debug => 0,
            Self::Info => 1,
            Self::Warn => 2,
            Self::Error => 3,
        }
    }

    fn from_rank(rank: u8) -> Self {
        match rank {
            0 => Self::Debug,
            1 => Self::Info,
            2 => Self::Warn,
            _ => Self::Error,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn parse(value: Option<&str>, default: LogLevel) -> LogLevel {
        match value
            .map(str::trim)
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str()
        {
            "debug" => Self::Debug,
            "info" => Self::Info,
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            _ => default,
        }
    }
}

pub fn set_min_level(level: LogLevel) {
    MIN_LOG_LEVEL.store(level.rank(), AtomicOrdering::Relaxed);
}

pub fn min_level() -> LogLevel {
    LogLevel::from_rank(MIN_LOG_LEVEL.load(AtomicOrdering::Relaxed))
}

pub fn log_event(level: LogLevel, event: &str, fields: serde_json::Value) {
    if level < min_level() {
        return;
    }

    emit(level, &event_payload(now_unix_millis(), level, event, fields));
}

fn event_payload(ts: u64, level: LogLevel, event: &str, fields: serde_json::Value) -> serde_json::Value {
    let mut payload = serde_json::Map::new();
    payload.insert("ts".to_string(), serde_json::Value::Number(serde_json::Number::from(ts)));
    payload.insert("level".to_string(), serde_json::Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    serde_json::Value::Object(payload)
}

#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn emit(level: LogLevel, payload: &serde_json::Value) {
    let line = wasm_bindgen::JsValue::from_str(&payload.to_string());
    match level {
        LogLevel::Debug => web_sys::console::debug_1(&line),
        LogLevel::Info => web_sys::console::log_1(&line),
        LogLevel::Warn => web_sys::console::warn_1(&line),
        LogLevel::Error => web_sys::console::error_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: LogLevel, payload: &serde_json::Value) {
    eprintln!("{payload}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn unknown_level_falls_back_to_default() {
        assert_eq!(LogLevel::parse(Some(" DEBUG "), LogLevel::Info), LogLevel::Debug);
        assert_eq!(LogLevel::parse(Some("warning"), LogLevel::Info), LogLevel::Warn);
        assert_eq!(LogLevel::parse(Some("verbose"), LogLevel::Info), LogLevel::Info);
        assert_eq!(LogLevel::parse(None, LogLevel::Error), LogLevel::Error);
    }

    #[test]
    fn payload_merges_fields_after_envelope() {
        let payload = event_payload(
            42,
            LogLevel::Warn,
            "widget_mount_skipped",
            json!({ "widget": "orbit", "reason": "missing_node" }),
        );

        assert_eq!(payload["ts"], 42);
        assert_eq!(payload["level"], "warn");
        assert_eq!(payload["event"], "widget_mount_skipped");
        assert_eq!(payload["widget"], "orbit");
        assert_eq!(payload["reason"], "missing_node");
    }

    #[test]
    fn non_object_fields_are_ignored() {
        let payload = event_payload(1, LogLevel::Info, "app_started", json!("stray"));

        assert_eq!(payload.as_object().map(|fields| fields.len()), Some(3));
    }
}
