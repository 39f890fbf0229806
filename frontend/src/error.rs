use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error, PartialEq)]
pub enum LandingError {
    #[error("missing {what} (selector `{selector}`)")]
    MissingElement { what: &'static str, selector: String },

    #[error("element is not a registered FAQ question")]
    UnknownFaqItem,

    #[error("FAQ index {index} out of range ({len} items)")]
    FaqIndexOutOfRange { index: usize, len: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for LandingError {
    fn from(value: JsValue) -> Self {
        match value.as_string() {
            Some(message) => LandingError::Js(message),
            None => LandingError::Js(format!("{:?}", value)),
        }
    }
}

impl From<serde_json::Error> for LandingError {
    fn from(err: serde_json::Error) -> Self {
        LandingError::InvalidConfig(err.to_string())
    }
}
