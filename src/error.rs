use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MountError {
    MissingNode(&'static str),
    MissingLibrary(&'static str),
    Unsupported(&'static str),
    Script(String),
}

impl MountError {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingNode(_) => "missing_node",
            Self::MissingLibrary(_) => "missing_library",
            Self::Unsupported(_) => "unsupported",
            Self::Script(_) => "script_error",
        }
    }

    /// Whether the failure may clear up on its own, e.g. a script tag that has not finished loading.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::MissingLibrary(_))
    }
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingNode(node) => write!(f, "required element `{node}` is not attached"),
            Self::MissingLibrary(global) => write!(f, "global `{global}` is not loaded"),
            Self::Unsupported(feature) => write!(f, "browser does not support {feature}"),
            Self::Script(message) => write!(f, "script call failed: {message}"),
        }
    }
}

impl std::error::Error for MountError {}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for MountError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &wasm_bindgen::JsValue::from_str("message"))
                    .ok()
                    .and_then(|message| message.as_string())
            })
            .unwrap_or_else(|| "unknown exception".to_string());
        Self::Script(message)
    }
}
