//! Resolve installed font family names to font files.

use std::path::PathBuf;

use fontdb::{Database, Family, Query, Source};

/// A font file located on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontLocation {
    pub path: PathBuf,
    /// Face index within the file (non-zero only for collections).
    pub face_index: u32,
}

/// Look up a regular-weight face of `family` among the system fonts.
pub fn find_family(family: &str) -> Option<FontLocation> {
    let mut font_db = Database::new();
    font_db.load_system_fonts();
    log::debug!("Loaded {} system fonts", font_db.len());
    find_family_in(&font_db, family)
}

/// Look up `family` in an already populated database.
///
/// Only file-backed faces qualify, since the result is a path.
pub fn find_family_in(font_db: &Database, family: &str) -> Option<FontLocation> {
    let families = [Family::Name(family)];
    let query = Query {
        families: &families,
        ..Query::default()
    };
    let id = font_db.query(&query)?;
    let (source, face_index) = font_db.face_source(id)?;
    let location = match source {
        Source::File(path) | Source::SharedFile(path, _) => FontLocation { path, face_index },
        Source::Binary(_) => {
            log::warn!("Font family '{}' is only available as in-memory data", family);
            return None;
        }
    };
    log::info!("Resolved font family '{}' to {:?}", family, location.path);
    Some(location)
}
