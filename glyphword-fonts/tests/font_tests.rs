//! Integration tests for glyphword-fonts crate.

use glyphword_fonts::{
    EngineGlyph, FeatureSet, FontCache, FontLoadError, FontResource, GlyphNotFoundError,
    ShapeError, ShapeRequest, Shaper, ShapingEngine, ShapingError, total_x_advance,
};

/// Embedded DejaVu Sans Mono for testing (unitsPerEm 2048, advance 1233).
const MONO: &[u8] = include_bytes!("../fonts/DejaVuSansMono.ttf");
/// Embedded DejaVu Sans, which carries an `f_i` ligature under `liga`.
const SANS: &[u8] = include_bytes!("../fonts/DejaVuSans.ttf");

const MONO_ADVANCE: i32 = 1233;

fn mono() -> FontResource {
    FontResource::from_bytes(MONO.to_vec(), 0).expect("mono font should parse")
}

fn sans() -> FontResource {
    FontResource::from_bytes(SANS.to_vec(), 0).expect("sans font should parse")
}

fn fixture_path(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fonts")
        .join(name)
}

/// Rename a table in the font's table directory so lookups miss it.
fn rename_table(data: &[u8], from: &[u8; 4], to: &[u8; 4]) -> Vec<u8> {
    let mut data = data.to_vec();
    let num_tables = u16::from_be_bytes([data[4], data[5]]) as usize;
    for i in 0..num_tables {
        let record = 12 + 16 * i;
        if &data[record..record + 4] == from {
            data[record..record + 4].copy_from_slice(to);
            return data;
        }
    }
    panic!("table {:?} not found", std::str::from_utf8(from));
}

// ---------------------------------------------------------------------------
// FontResource
// ---------------------------------------------------------------------------

#[test]
fn test_load_from_path() {
    let font = FontResource::load(fixture_path("DejaVuSansMono.ttf")).unwrap();
    assert_eq!(font.metrics().units_per_em, 2048);
    assert!(font.source().unwrap().ends_with("DejaVuSansMono.ttf"));
    assert_eq!(font.face_index(), 0);
    assert_eq!(font.data().len(), MONO.len());
}

#[test]
fn test_load_missing_file() {
    let err = FontResource::load(fixture_path("does-not-exist.otf")).unwrap_err();
    assert!(matches!(err, FontLoadError::Read { .. }));
    assert!(err.to_string().contains("does-not-exist.otf"));
}

#[test]
fn test_load_empty_bytes() {
    let err = FontResource::from_bytes(Vec::new(), 0).unwrap_err();
    assert!(matches!(err, FontLoadError::Parse { .. }));
}

#[test]
fn test_missing_os2_table() {
    let data = rename_table(MONO, b"OS/2", b"OS/3");
    let err = FontResource::from_bytes(data, 0).unwrap_err();
    assert!(matches!(err, FontLoadError::MissingTable { table: "OS/2" }));
}

#[test]
fn test_missing_head_table() {
    let data = rename_table(MONO, b"head", b"heae");
    let err = FontResource::from_bytes(data, 0).unwrap_err();
    assert!(matches!(err, FontLoadError::MissingTable { table: "head" }));
}

#[test]
fn test_space_outline_draws_nothing() {
    struct Count(usize);
    impl glyphword_fonts::OutlineBuilder for Count {
        fn move_to(&mut self, _: f32, _: f32) {
            self.0 += 1;
        }
        fn line_to(&mut self, _: f32, _: f32) {
            self.0 += 1;
        }
        fn quad_to(&mut self, _: f32, _: f32, _: f32, _: f32) {
            self.0 += 1;
        }
        fn curve_to(&mut self, _: f32, _: f32, _: f32, _: f32, _: f32, _: f32) {
            self.0 += 1;
        }
        fn close(&mut self) {
            self.0 += 1;
        }
    }

    let font = mono();
    let space = font.outline(font.glyph_for_char(' ').unwrap() as u32).unwrap();
    let mut count = Count(0);
    assert!(!space.draw(&mut count));
    assert_eq!(count.0, 0);

    let a = font.outline(font.glyph_for_char('a').unwrap() as u32).unwrap();
    assert!(a.draw(&mut count));
    assert!(count.0 > 0);
    assert_eq!(a.advance(), Some(MONO_ADVANCE as u16));
}

// ---------------------------------------------------------------------------
// FontCache
// ---------------------------------------------------------------------------

#[test]
fn test_cache_loads_once() {
    let cache = FontCache::new();
    assert!(cache.is_empty());
    let first = cache.get_or_load(fixture_path("DejaVuSansMono.ttf")).unwrap();
    let second = cache.get_or_load(fixture_path("DejaVuSansMono.ttf")).unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);

    cache.get_or_load(fixture_path("DejaVuSans.ttf")).unwrap();
    assert_eq!(cache.len(), 2);

    cache.clear();
    assert!(cache.is_empty());
    // Outstanding handles survive a clear.
    assert_eq!(first.metrics().units_per_em, 2048);
}

#[test]
fn test_cache_does_not_store_failures() {
    let cache = FontCache::new();
    assert!(cache.get_or_load(fixture_path("missing.ttf")).is_err());
    assert_eq!(cache.len(), 0);
}

// ---------------------------------------------------------------------------
// Shaper
// ---------------------------------------------------------------------------

#[test]
fn test_shape_cat_monospace() {
    let font = mono();
    let shaper = Shaper::new(&font);
    let records = shaper.process("cat", None, None, false).unwrap();
    assert_eq!(records.len(), 3);
    for record in &records {
        assert_eq!(record.x_advance, MONO_ADVANCE);
        assert_eq!(record.y_advance, 0);
        assert_ne!(record.outline.glyph_id(), 0, "ASCII should not map to .notdef");
    }
    assert_eq!(total_x_advance(&records), 3 * MONO_ADVANCE as i64);
    let names: Vec<_> = records.iter().map(|r| r.outline.name().unwrap()).collect();
    assert_eq!(names, vec!["c", "a", "t"]);
}

#[test]
fn test_monospace_total_advance() {
    let font = mono();
    let shaper = Shaper::new(&font);
    for word in ["a", "glyph", "glyphword", "zzzzzzzzzzzzzzzz"] {
        let records = shaper.process(word, None, None, false).unwrap();
        assert_eq!(
            total_x_advance(&records),
            word.chars().count() as i64 * MONO_ADVANCE as i64,
            "{word}"
        );
    }
}

#[test]
fn test_empty_text() {
    let font = mono();
    let shaper = Shaper::new(&font);
    assert!(shaper.process("", None, None, false).unwrap().is_empty());
    assert!(shaper.process("", None, None, true).unwrap().is_empty());
}

#[test]
fn test_ligature_reduces_glyph_count() {
    let font = sans();
    let mut shaper = Shaper::new(&font);
    let with_liga = shaper.process("fi", None, None, false).unwrap();

    shaper.set_feature("liga", false);
    let without_liga = shaper.process("fi", None, None, false).unwrap();

    assert!(
        with_liga.len() < without_liga.len(),
        "liga on: {}, off: {}",
        with_liga.len(),
        without_liga.len()
    );
    assert_eq!(without_liga.len(), 2);
}

#[test]
fn test_toggle_feature_affects_only_later_calls() {
    let font = sans();
    let mut shaper = Shaper::new(&font);
    let before = shaper.process("fi", None, None, false).unwrap();
    assert_eq!(shaper.toggle_feature("liga"), Some(false));
    assert_eq!(before.len(), 1);
    assert_eq!(shaper.process("fi", None, None, false).unwrap().len(), 2);
}

#[test]
fn test_reset_matches_fresh_shaper() {
    let font = sans();
    let mut shaper = Shaper::new(&font);
    shaper.set_feature("liga", false);
    shaper.set_feature("kern", false);
    shaper.reset_features();
    assert_eq!(shaper.features(), &FeatureSet::default());

    let fresh = Shaper::new(&font);
    for word in ["fi", "AVATAR", "office"] {
        assert_eq!(
            shaper.process(word, None, None, false).unwrap(),
            fresh.process(word, None, None, false).unwrap(),
            "{word}"
        );
    }
}

#[test]
fn test_process_is_deterministic() {
    let font = sans();
    let shaper = Shaper::new(&font);
    let first = shaper.process("Wavy", Some("latn"), Some("ENG"), false).unwrap();
    let second = shaper.process("Wavy", Some("latn"), Some("ENG"), false).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_right_to_left_visual_order() {
    let font = mono();
    let shaper = Shaper::new(&font);
    let records = shaper.process("cat", None, None, true).unwrap();
    let clusters: Vec<_> = records.iter().map(|r| r.cluster).collect();
    assert_eq!(clusters, vec![2, 1, 0]);
}

#[test]
fn test_combining_mark_has_zero_advance() {
    let font = sans();
    let shaper = Shaper::new(&font);
    // No precomposed q-acute exists, so the mark stays a separate glyph.
    let records = shaper.process("q\u{0301}", None, None, false).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].outline.name(), Some("q"));
    assert_eq!(records[1].x_advance, 0);
    // Monotone-character clustering keeps the mark in its own cluster.
    assert_eq!(records[0].cluster, 0);
    assert_eq!(records[1].cluster, 1);
}

#[test]
fn test_mark_attachment_offsets_the_mark() {
    let font = sans();
    let shaper = Shaper::new(&font);
    let records = shaper.process("Q\u{0301}", None, None, false).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].outline.name(), Some("Q"));
    let mark = records[1];
    assert_eq!(mark.x_advance, 0);
    assert!(mark.x_placement != 0 || mark.y_placement != 0, "{mark:?}");
}

#[test]
fn test_opentype_script_and_language_tags() {
    let font = sans();
    let shaper = Shaper::new(&font);
    let guessed = shaper.process("office", None, None, false).unwrap();
    for (script, lang) in [("latn", "ENG"), ("DFLT", "dflt")] {
        assert_eq!(
            shaper.process("office", Some(script), Some(lang), false).unwrap(),
            guessed,
            "{script}/{lang}"
        );
    }
    assert!(shaper.process("office", Some("latn"), Some("TRK"), false).is_ok());
    assert!(shaper.process("office", Some("dev2"), None, false).is_ok());
}

#[test]
fn test_reset_restores_construction_features() {
    let font = sans();
    let configured = FeatureSet::parse(&["-liga"]);
    let mut shaper = Shaper::with_features(&font, configured.clone());
    shaper.set_feature("liga", true);
    assert_eq!(shaper.process("fi", None, None, false).unwrap().len(), 1);
    shaper.reset_features();
    assert_eq!(shaper.features(), &configured);
    assert_eq!(shaper.process("fi", None, None, false).unwrap().len(), 2);
}

#[test]
fn test_invalid_tags_rejected_before_engine() {
    let font = mono();
    let shaper = Shaper::new(&font);
    assert_eq!(
        shaper.process("cat", Some("Latin"), None, false),
        Err(ShapeError::Shaping(ShapingError::InvalidScript(
            "Latin".to_string()
        )))
    );
    assert!(matches!(
        shaper.process("cat", None, Some("e n"), false),
        Err(ShapeError::Shaping(ShapingError::InvalidLanguage(_)))
    ));
}

// ---------------------------------------------------------------------------
// Engine contract
// ---------------------------------------------------------------------------

/// Engine returning a fixed glyph list, counting one cluster per glyph.
struct ScriptedEngine {
    glyphs: Vec<EngineGlyph>,
}

impl ScriptedEngine {
    fn with_ids(ids: &[u32]) -> Self {
        let glyphs = ids
            .iter()
            .enumerate()
            .map(|(i, &glyph_id)| EngineGlyph {
                glyph_id,
                cluster: i as u32,
                x_offset: 0,
                y_offset: 0,
                x_advance: 600,
                y_advance: 0,
            })
            .collect();
        Self { glyphs }
    }
}

impl ShapingEngine for ScriptedEngine {
    fn shape(
        &self,
        _font: &FontResource,
        _text: &str,
        _request: &ShapeRequest,
        _features: &FeatureSet,
    ) -> Result<Vec<EngineGlyph>, ShapingError> {
        Ok(self.glyphs.clone())
    }
}

struct RejectingEngine;

impl ShapingEngine for RejectingEngine {
    fn shape(
        &self,
        _font: &FontResource,
        _text: &str,
        _request: &ShapeRequest,
        _features: &FeatureSet,
    ) -> Result<Vec<EngineGlyph>, ShapingError> {
        Err(ShapingError::Rejected("unsupported direction".to_string()))
    }
}

#[test]
fn test_record_count_matches_engine_clusters() {
    let font = mono();
    let engine = ScriptedEngine::with_ids(&[68, 68, 69, 70, 71]);
    let expected = engine.glyphs.clone();
    let shaper = Shaper::with_engine(&font, FeatureSet::default(), engine);
    let records = shaper.process("whatever", None, None, false).unwrap();
    assert_eq!(records.len(), expected.len());
    for (record, glyph) in records.iter().zip(&expected) {
        assert_eq!(record.outline.glyph_id() as u32, glyph.glyph_id);
        assert_eq!(record.cluster, glyph.cluster);
        assert_eq!(record.x_advance, 600);
    }
}

#[test]
fn test_unknown_glyph_from_engine_is_surfaced() {
    let font = mono();
    let bogus = font.glyph_count() as u32 + 10;
    let shaper = Shaper::with_engine(
        &font,
        FeatureSet::default(),
        ScriptedEngine::with_ids(&[68, bogus]),
    );
    assert_eq!(
        shaper.process("ab", None, None, false),
        Err(ShapeError::GlyphNotFound(GlyphNotFoundError::Id {
            id: bogus,
            glyph_count: font.glyph_count(),
        }))
    );
}

#[test]
fn test_engine_rejection_is_surfaced() {
    let font = mono();
    let shaper = Shaper::with_engine(&font, FeatureSet::default(), RejectingEngine);
    assert!(matches!(
        shaper.process("cat", None, None, true),
        Err(ShapeError::Shaping(ShapingError::Rejected(_)))
    ));
    // Empty text never reaches the engine.
    assert!(shaper.process("", None, None, true).unwrap().is_empty());
}
