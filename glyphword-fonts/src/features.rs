//! OpenType feature configuration for shaping calls.

use std::collections::BTreeMap;

use rustybuzz::Feature;
use rustybuzz::ttf_parser::Tag;

/// Features enabled for every shaping call unless configured otherwise:
/// kerning, localized forms, standard ligatures and contextual alternates.
pub const DEFAULT_FEATURES: [(&str, bool); 4] =
    [("kern", true), ("locl", true), ("liga", true), ("calt", true)];

/// Mapping from 4-character OpenType feature tag to enabled flag.
///
/// Tags not present in the set are left to the shaping engine's defaults.
/// Iteration order is sorted by tag so the derived feature list is stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSet {
    states: BTreeMap<String, bool>,
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_FEATURES.iter().map(|&(tag, on)| (tag, on)))
    }
}

impl FeatureSet {
    /// A set with no explicit feature states.
    pub fn empty() -> Self {
        Self {
            states: BTreeMap::new(),
        }
    }

    /// Build a set from `(tag, enabled)` pairs. Invalid tags are skipped.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, bool)>) -> Self {
        let mut set = Self::empty();
        for (tag, enabled) in pairs {
            set.set(tag, enabled);
        }
        set
    }

    /// Parse feature strings on top of the default set.
    ///
    /// Each string is a 4-char OpenType tag, optionally prefixed with `-` to
    /// disable (a leading `+` is accepted and ignored). Examples: `"dlig"`,
    /// `"-liga"`.
    pub fn parse<S: AsRef<str>>(strings: &[S]) -> Self {
        let mut set = Self::default();
        set.apply(strings);
        set
    }

    /// Apply feature strings (same syntax as [`FeatureSet::parse`]) on top
    /// of the current states.
    pub fn apply<S: AsRef<str>>(&mut self, strings: &[S]) {
        for s in strings {
            let s = s.as_ref();
            let (tag, enabled) = match s.strip_prefix('-') {
                Some(rest) => (rest, false),
                None => (s.strip_prefix('+').unwrap_or(s), true),
            };
            self.set(tag, enabled);
        }
    }

    /// Whether `tag` is a syntactically valid feature tag.
    pub fn is_valid_tag(tag: &str) -> bool {
        tag.len() == 4 && tag.bytes().all(|b| b.is_ascii_graphic() || b == b' ')
    }

    /// Set a feature state. Returns `false` (and leaves the set unchanged)
    /// when the tag is not a valid 4-character tag.
    pub fn set(&mut self, tag: &str, enabled: bool) -> bool {
        if !Self::is_valid_tag(tag) {
            log::warn!("Ignoring invalid feature tag: {:?}", tag);
            return false;
        }
        self.states.insert(tag.to_string(), enabled);
        true
    }

    /// Flip a feature and return its new state.
    ///
    /// A tag with no explicit state is treated as disabled, so toggling it
    /// enables it. Invalid tags return `None`.
    pub fn toggle(&mut self, tag: &str) -> Option<bool> {
        let next = !self.is_enabled(tag);
        self.set(tag, next).then_some(next)
    }

    /// Remove an explicit state, handing the tag back to engine defaults.
    pub fn unset(&mut self, tag: &str) -> Option<bool> {
        self.states.remove(tag)
    }

    /// Explicit state of `tag`, `false` when unset.
    pub fn is_enabled(&self, tag: &str) -> bool {
        self.states.get(tag).copied().unwrap_or(false)
    }

    /// Explicit state of `tag`, `None` when unset.
    pub fn get(&self, tag: &str) -> Option<bool> {
        self.states.get(tag).copied()
    }

    /// Iterate `(tag, enabled)` in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.states.iter().map(|(tag, &on)| (tag.as_str(), on))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Features for the shaping engine, each covering the whole run with
    /// value 1 (on) or 0 (off).
    pub fn to_rustybuzz(&self) -> Vec<Feature> {
        self.iter()
            .map(|(tag, on)| Feature::new(Tag::from_bytes_lossy(tag.as_bytes()), on as u32, ..))
            .collect()
    }
}

impl<'a> FromIterator<(&'a str, bool)> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = (&'a str, bool)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
