use log::{warn, Level};
use serde::Deserialize;
use web_sys::Document;

use crate::error::LandingError;

/// Id of the optional `<script type="application/json">` block carrying overrides.
pub const CONFIG_ELEMENT_ID: &str = "landing-config";

/// Id of the element the Yew app mounts into. Without it the page runs in static mode.
pub const APP_ROOT_ID: &str = "app";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LandingConfig {
    pub reveal: RevealConfig,
    pub faq: FaqConfig,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    pub marker_class: String,
    pub active_class: String,
    pub root_margin: String,
    /// Fraction of the element that must be visible before it is revealed.
    pub threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            marker_class: "reveal".to_string(),
            active_class: "active".to_string(),
            root_margin: "0px".to_string(),
            threshold: 0.1,
        }
    }
}

/// Selectors locate FAQ items in static page markup only. The rendered app
/// always emits the default structure; only the glyph classes apply to it.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FaqConfig {
    pub question_selector: String,
    pub answer_selector: String,
    /// Looked up inside the question control, not the whole item.
    pub icon_selector: String,
    pub closed_glyph_class: String,
    pub open_glyph_class: String,
}

impl Default for FaqConfig {
    fn default() -> Self {
        Self {
            question_selector: ".faq-q".to_string(),
            answer_selector: ".faq-a".to_string(),
            icon_selector: "span i".to_string(),
            closed_glyph_class: "fa-plus".to_string(),
            open_glyph_class: "fa-minus".to_string(),
        }
    }
}

impl LandingConfig {
    pub fn from_json(raw: &str) -> Result<Self, LandingError> {
        let config: LandingConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads overrides from the page, falling back to defaults on any problem.
    pub fn load(document: &Document) -> Self {
        let raw = match document.get_element_by_id(CONFIG_ELEMENT_ID) {
            Some(element) => element.text_content().unwrap_or_default(),
            None => return Self::default(),
        };

        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), LandingError> {
        let threshold = self.reveal.threshold;
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(LandingError::InvalidConfig(format!(
                "reveal.threshold must be within [0, 1], got {}",
                threshold
            )));
        }

        let classes = [
            ("reveal.marker_class", &self.reveal.marker_class),
            ("reveal.active_class", &self.reveal.active_class),
            ("faq.closed_glyph_class", &self.faq.closed_glyph_class),
            ("faq.open_glyph_class", &self.faq.open_glyph_class),
        ];
        for (field, class) in classes {
            if class.is_empty() || class.chars().any(char::is_whitespace) {
                return Err(LandingError::InvalidConfig(format!(
                    "{} must be a single class name, got {:?}",
                    field, class
                )));
            }
        }

        if self.faq.closed_glyph_class == self.faq.open_glyph_class {
            return Err(LandingError::InvalidConfig(
                "faq glyph classes must differ".to_string(),
            ));
        }

        Ok(())
    }
}
