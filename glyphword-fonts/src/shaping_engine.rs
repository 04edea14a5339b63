//! Shaping engine capability and its rustybuzz binding.
//!
//! The OpenType shaping algorithm itself is not implemented here. Anything
//! that can turn a text run plus script/language/direction/features into
//! positioned glyph ids satisfies [`ShapingEngine`]; [`RustybuzzEngine`] is
//! the HarfBuzz port used by default.

use std::str::FromStr;

use rustybuzz::ttf_parser::Tag;
use rustybuzz::{BufferClusterLevel, Language, Script, UnicodeBuffer};

use crate::error::ShapingError;
use crate::features::FeatureSet;
use crate::font_resource::FontResource;

/// Writing direction of a single run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl Direction {
    pub fn from_rtl(right_to_left: bool) -> Self {
        if right_to_left {
            Direction::RightToLeft
        } else {
            Direction::LeftToRight
        }
    }

    fn to_rustybuzz(self) -> rustybuzz::Direction {
        match self {
            Direction::LeftToRight => rustybuzz::Direction::LeftToRight,
            Direction::RightToLeft => rustybuzz::Direction::RightToLeft,
        }
    }
}

/// Validated segment properties for one shaping call.
///
/// Script and language are OpenType tags, as found in a font's `GSUB`/`GPOS`
/// script and language-system lists. They are resolved to the engine's
/// script and language once, here, so a bad tag fails before shaping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ShapeRequest {
    script: Option<String>,
    language: Option<String>,
    resolved_script: Option<Script>,
    resolved_language: Option<Language>,
    direction: Direction,
}

impl ShapeRequest {
    /// Validate the tags and build a request.
    ///
    /// * `script` - OpenType script tag (e.g. `"latn"`, `"arab"`, `"dev2"`,
    ///   `"nko "`); trailing spaces may be omitted. `"DFLT"` means guess.
    /// * `language` - OpenType language-system tag (e.g. `"TRK"`, `"ENG"`,
    ///   `"ZHS"`). `"dflt"` means no language.
    pub fn new(
        script: Option<&str>,
        language: Option<&str>,
        direction: Direction,
    ) -> Result<Self, ShapingError> {
        let (script, resolved_script) = match script {
            Some(tag) => {
                let normalized = normalize_ot_tag(tag, false)
                    .ok_or_else(|| ShapingError::InvalidScript(tag.to_string()))?;
                let resolved = script_from_ot_tag(&normalized)
                    .ok_or_else(|| ShapingError::InvalidScript(tag.to_string()))?;
                (Some(normalized), resolved)
            }
            None => (None, None),
        };
        let (language, resolved_language) = match language {
            Some(tag) => {
                let normalized = normalize_ot_tag(tag, true)
                    .ok_or_else(|| ShapingError::InvalidLanguage(tag.to_string()))?;
                let resolved = language_from_ot_tag(&normalized)
                    .ok_or_else(|| ShapingError::InvalidLanguage(tag.to_string()))?;
                (Some(normalized), resolved)
            }
            None => (None, None),
        };
        Ok(Self {
            script,
            language,
            resolved_script,
            resolved_language,
            direction,
        })
    }

    /// Normalized OpenType script tag, trailing spaces trimmed.
    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    /// Normalized OpenType language-system tag, trailing spaces trimmed.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Engine script, `None` when it should be guessed from the text.
    pub fn resolved_script(&self) -> Option<Script> {
        self.resolved_script
    }

    /// Engine language, `None` for the default language system.
    pub fn resolved_language(&self) -> Option<&Language> {
        self.resolved_language.as_ref()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// Check the shape of an OpenType tag and normalize its case.
///
/// Script tags are lowercase, language-system tags uppercase. The tag is
/// 2 to 4 characters once trailing spaces are dropped: letters, with an
/// optional `2`/`3` version digit at the end of a script tag.
fn normalize_ot_tag(tag: &str, uppercase: bool) -> Option<String> {
    if tag.len() > 4 {
        return None;
    }
    let trimmed = tag.trim_end_matches(' ');
    if !(2..=4).contains(&trimmed.len()) || !trimmed.is_ascii() {
        return None;
    }
    let bytes = trimmed.as_bytes();
    let (letters, version) = match bytes.split_last() {
        Some((&last, rest)) if !uppercase && bytes.len() == 4 && (last == b'2' || last == b'3') => {
            (rest, true)
        }
        _ => (bytes, false),
    };
    if !letters.iter().all(u8::is_ascii_alphabetic) || (version && letters.len() != 3) {
        return None;
    }
    Some(if uppercase {
        trimmed.to_ascii_uppercase()
    } else {
        trimmed.to_ascii_lowercase()
    })
}

/// Second-generation Indic script tags and the scripts they shape.
const VERSIONED_SCRIPTS: [(&str, &[u8; 4]); 10] = [
    ("bng", b"Beng"),
    ("dev", b"Deva"),
    ("gjr", b"Gujr"),
    ("gur", b"Guru"),
    ("knd", b"Knda"),
    ("mlm", b"Mlym"),
    ("ory", b"Orya"),
    ("tml", b"Taml"),
    ("tel", b"Telu"),
    ("mym", b"Mymr"),
];

/// Map a normalized OpenType script tag to the engine's script.
///
/// `Some(None)` is `DFLT`; `None` is a versioned tag with no known script.
fn script_from_ot_tag(tag: &str) -> Option<Option<Script>> {
    if tag == "dflt" {
        return Some(None);
    }
    let bytes = tag.as_bytes();
    if bytes.len() == 4 && (bytes[3] == b'2' || bytes[3] == b'3') {
        let base = &tag[..3];
        let (_, iso) = VERSIONED_SCRIPTS.iter().find(|(ot, _)| *ot == base)?;
        return Some(Script::from_iso15924_tag(Tag::from_bytes(iso)));
    }

    // Short tags are padded by repeating the last letter: "nko" -> "Nkoo",
    // "yi" -> "Yiii".
    let mut iso = [0u8; 4];
    for (i, slot) in iso.iter_mut().enumerate() {
        *slot = bytes[i.min(bytes.len() - 1)];
    }
    iso[0] = iso[0].to_ascii_uppercase();
    Some(Script::from_iso15924_tag(Tag::from_bytes(&iso)))
}

/// OpenType language-system tags and the BCP 47 tags they stand for.
const LANGUAGE_SYSTEMS: [(&str, &str); 96] = [
    ("AFK", "af"),
    ("AMH", "am"),
    ("ARA", "ar"),
    ("ASM", "as"),
    ("AZE", "az"),
    ("BEL", "be"),
    ("BEN", "bn"),
    ("BGR", "bg"),
    ("BOS", "bs"),
    ("BRE", "br"),
    ("BRM", "my"),
    ("BSH", "ba"),
    ("CAT", "ca"),
    ("CHU", "cv"),
    ("COS", "co"),
    ("CSY", "cs"),
    ("CYM", "cy"),
    ("DAN", "da"),
    ("DEU", "de"),
    ("DIV", "dv"),
    ("DZN", "dz"),
    ("ELL", "el"),
    ("ENG", "en"),
    ("ESP", "es"),
    ("ETI", "et"),
    ("EUQ", "eu"),
    ("FAR", "fa"),
    ("FIN", "fi"),
    ("FOS", "fo"),
    ("FRA", "fr"),
    ("FRI", "fy"),
    ("GAE", "gd"),
    ("GAL", "gl"),
    ("GRN", "kl"),
    ("GUJ", "gu"),
    ("HAU", "ha"),
    ("HIN", "hi"),
    ("HRV", "hr"),
    ("HUN", "hu"),
    ("HYE", "hy"),
    ("IBO", "ig"),
    ("IND", "id"),
    ("IRI", "ga"),
    ("ISL", "is"),
    ("ITA", "it"),
    ("IWR", "he"),
    ("JAN", "ja"),
    ("KAN", "kn"),
    ("KAT", "ka"),
    ("KAZ", "kk"),
    ("KHM", "km"),
    ("KIR", "ky"),
    ("KOR", "ko"),
    ("KSH", "ks"),
    ("KUR", "ku"),
    ("LAO", "lo"),
    ("LAT", "la"),
    ("LTH", "lt"),
    ("LTZ", "lb"),
    ("LVI", "lv"),
    ("MAL", "ml"),
    ("MAR", "mr"),
    ("MKD", "mk"),
    ("MLY", "ms"),
    ("MNG", "mn"),
    ("MTS", "mt"),
    ("NEP", "ne"),
    ("NLD", "nl"),
    ("NOR", "nb"),
    ("NYN", "nn"),
    ("ORI", "or"),
    ("PAN", "pa"),
    ("PAS", "ps"),
    ("PLK", "pl"),
    ("PTG", "pt"),
    ("ROM", "ro"),
    ("RUS", "ru"),
    ("SIN", "si"),
    ("SKY", "sk"),
    ("SLV", "sl"),
    ("SND", "sd"),
    ("SQI", "sq"),
    ("SRB", "sr"),
    ("SVE", "sv"),
    ("SWK", "sw"),
    ("TAM", "ta"),
    ("TAT", "tt"),
    ("TEL", "te"),
    ("TGK", "tg"),
    ("THA", "th"),
    ("TRK", "tr"),
    ("UKR", "uk"),
    ("URD", "ur"),
    ("VIT", "vi"),
    ("ZHS", "zh-Hans"),
    ("ZHT", "zh-Hant"),
];

/// Map a normalized language-system tag to the engine's language.
///
/// `Some(None)` is `dflt`; `None` is a tag missing from the table.
fn language_from_ot_tag(tag: &str) -> Option<Option<Language>> {
    if tag == "DFLT" {
        return Some(None);
    }
    let (_, bcp47) = LANGUAGE_SYSTEMS.iter().find(|(ot, _)| *ot == tag)?;
    Language::from_str(bcp47).ok().map(Some)
}

/// One positioned glyph as reported by a shaping engine, in font units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineGlyph {
    /// Glyph index in the font (not a codepoint).
    pub glyph_id: u32,
    /// Byte offset of the cluster this glyph belongs to.
    pub cluster: u32,
    pub x_offset: i32,
    pub y_offset: i32,
    pub x_advance: i32,
    pub y_advance: i32,
}

/// Capability: map a text run to positioned glyphs in visual order.
pub trait ShapingEngine {
    fn shape(
        &self,
        font: &FontResource,
        text: &str,
        request: &ShapeRequest,
        features: &FeatureSet,
    ) -> Result<Vec<EngineGlyph>, ShapingError>;
}

/// HarfBuzz-compatible shaping via `rustybuzz`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustybuzzEngine;

impl ShapingEngine for RustybuzzEngine {
    fn shape(
        &self,
        font: &FontResource,
        text: &str,
        request: &ShapeRequest,
        features: &FeatureSet,
    ) -> Result<Vec<EngineGlyph>, ShapingError> {
        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.guess_segment_properties();
        buffer.set_cluster_level(BufferClusterLevel::MonotoneCharacters);

        if let Some(script) = request.resolved_script() {
            buffer.set_script(script);
        }
        if let Some(language) = request.resolved_language() {
            buffer.set_language(language.clone());
        }
        buffer.set_direction(request.direction().to_rustybuzz());

        let glyph_buffer = rustybuzz::shape(font.shaping_face(), &features.to_rustybuzz(), buffer);

        Ok(glyph_buffer
            .glyph_infos()
            .iter()
            .zip(glyph_buffer.glyph_positions())
            .map(|(info, pos)| EngineGlyph {
                glyph_id: info.glyph_id,
                cluster: info.cluster,
                x_offset: pos.x_offset,
                y_offset: pos.y_offset,
                x_advance: pos.x_advance,
                y_advance: pos.y_advance,
            })
            .collect())
    }
}
