//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on
//! `Config` fields, and by `Config::default()`.

use std::collections::BTreeMap;

use glyphword_fonts::DEFAULT_FEATURES;

pub fn features() -> BTreeMap<String, bool> {
    DEFAULT_FEATURES
        .iter()
        .map(|&(tag, enabled)| (tag.to_string(), enabled))
        .collect()
}

pub fn fill() -> String {
    "black".to_string()
}

pub fn bool_true() -> bool {
    true
}
