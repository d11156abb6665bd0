//! FontMetrics trait for abstracting glyph measurement.
//!
//! Layout only needs two numbers from a font: how tall its capitals are per point of
//! font size, and how wide a run of text is. Everything else about font files stays
//! behind this trait.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for font metric lookups.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FontError {
    #[error("Unknown font: {0}")]
    UnknownFont(String),

    #[error("Failed to parse font '{name}': {message}")]
    InvalidFontData { name: String, message: String },

    #[error("Font '{0}' has no measurable capital glyphs")]
    NoCapitals(String),

    #[error("Font store unavailable: {0}")]
    Unavailable(String),
}

/// Shared metrics provider handle.
pub type SharedFontMetrics = Arc<dyn FontMetrics>;

/// A source of font measurements.
///
/// # Implementations
///
/// - `BuiltinFontMetrics`: the PDF standard Helvetica family, no font files needed
/// - `InMemoryFontMetrics`: TrueType faces registered from bytes, falling back to the
///   builtin family
pub trait FontMetrics: Send + Sync + Debug {
    /// Height of a capital letter for a 1pt font size.
    fn cap_height_per_point(&self, font: &str) -> Result<f32, FontError>;

    /// Advance width of `text` set at `size` points.
    fn string_width(&self, text: &str, font: &str, size: f32) -> Result<f32, FontError>;

    /// Check if a font is known to this provider.
    fn has_font(&self, font: &str) -> bool {
        self.cap_height_per_point(font).is_ok()
    }

    /// Returns a human-readable name for this provider (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Measurements of one face, normalized to a 1pt font size.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceMetrics {
    pub cap_height: f32,
    pub widths: HashMap<char, f32>,
    pub default_width: f32,
}

impl FaceMetrics {
    pub fn new(cap_height: f32, default_width: f32) -> Self {
        Self {
            cap_height,
            widths: HashMap::new(),
            default_width,
        }
    }

    pub fn with_width(mut self, ch: char, width: f32) -> Self {
        self.widths.insert(ch, width);
        self
    }

    pub fn string_width(&self, text: &str, size: f32) -> f32 {
        text.chars()
            .map(|c| self.widths.get(&c).copied().unwrap_or(self.default_width))
            .sum::<f32>()
            * size
    }

    /// Measure a TrueType/OpenType face.
    ///
    /// Cap height is the median top of the capitals A-Z (Q excluded for its tail) minus
    /// the median bottom, divided by units per em.
    pub fn from_truetype(name: &str, data: &[u8]) -> Result<Self, FontError> {
        let face = ttf_parser::Face::parse(data, 0).map_err(|e| FontError::InvalidFontData {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        let units_per_em = f32::from(face.units_per_em());

        let mut tops = Vec::new();
        let mut bottoms = Vec::new();
        for ch in ('A'..='Z').filter(|c| *c != 'Q') {
            let bbox = face
                .glyph_index(ch)
                .and_then(|gid| face.glyph_bounding_box(gid));
            if let Some(bbox) = bbox {
                tops.push(f32::from(bbox.y_max));
                bottoms.push(f32::from(bbox.y_min));
            }
        }
        let (Some(top), Some(bottom)) = (median(&mut tops), median(&mut bottoms)) else {
            return Err(FontError::NoCapitals(name.to_string()));
        };

        let mut widths = HashMap::new();
        for code in 32u8..=255 {
            let ch = char::from(code);
            let advance = face
                .glyph_index(ch)
                .and_then(|gid| face.glyph_hor_advance(gid));
            if let Some(advance) = advance {
                widths.insert(ch, f32::from(advance) / units_per_em);
            }
        }
        let default_width = if widths.is_empty() {
            0.5
        } else {
            widths.values().sum::<f32>() / widths.len() as f32
        };

        Ok(Self {
            cap_height: (top - bottom) / units_per_em,
            widths,
            default_width,
        })
    }
}

fn median(values: &mut [f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f32::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}

// Advance widths for codes 32..=126, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a'..'m'
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n'..'z'
    389, 280, 389, 584, // '{'..'~'
];

const HELVETICA_CAP_HEIGHT: f32 = 0.718;

fn builtin_face(widths: &[u16; 95]) -> FaceMetrics {
    let mut face = FaceMetrics::new(HELVETICA_CAP_HEIGHT, 0.556);
    for (ch, w) in (' '..='~').zip(widths.iter()) {
        face.widths.insert(ch, f32::from(*w) / 1000.0);
    }
    face
}

/// Metrics for the standard PDF Helvetica family.
///
/// Recognizes `Helvetica` and `Helvetica-Bold`. Characters outside printable ASCII
/// measure at the width of a digit.
#[derive(Debug, Clone)]
pub struct BuiltinFontMetrics {
    regular: FaceMetrics,
    bold: FaceMetrics,
}

impl BuiltinFontMetrics {
    pub fn new() -> Self {
        Self {
            regular: builtin_face(&HELVETICA_WIDTHS),
            bold: builtin_face(&HELVETICA_BOLD_WIDTHS),
        }
    }

    fn face(&self, font: &str) -> Result<&FaceMetrics, FontError> {
        match font {
            "Helvetica" => Ok(&self.regular),
            "Helvetica-Bold" => Ok(&self.bold),
            other => Err(FontError::UnknownFont(other.to_string())),
        }
    }
}

impl Default for BuiltinFontMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl FontMetrics for BuiltinFontMetrics {
    fn cap_height_per_point(&self, font: &str) -> Result<f32, FontError> {
        Ok(self.face(font)?.cap_height)
    }

    fn string_width(&self, text: &str, font: &str, size: f32) -> Result<f32, FontError> {
        Ok(self.face(font)?.string_width(text, size))
    }

    fn name(&self) -> &'static str {
        "BuiltinFontMetrics"
    }
}

/// An in-memory metrics store.
///
/// Faces are registered up front, usually from TrueType bytes. Lookups for names
/// that were never registered fall through to the builtin Helvetica family.
#[derive(Debug, Default)]
pub struct InMemoryFontMetrics {
    faces: RwLock<HashMap<String, Arc<FaceMetrics>>>,
    builtin: BuiltinFontMetrics,
}

impl InMemoryFontMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register precomputed metrics under `name`.
    ///
    /// # Errors
    ///
    /// Returns `FontError::Unavailable` if the internal lock is poisoned.
    pub fn add_face(&self, name: impl Into<String>, face: FaceMetrics) -> Result<(), FontError> {
        let name = name.into();
        let mut faces = self
            .faces
            .write()
            .map_err(|_| FontError::Unavailable("font store lock poisoned".to_string()))?;
        log::debug!(
            "Registered font '{}' (cap height {:.4}/pt)",
            name,
            face.cap_height
        );
        faces.insert(name, Arc::new(face));
        Ok(())
    }

    /// Measure and register a TrueType face.
    pub fn add_truetype(&self, name: impl Into<String>, data: &[u8]) -> Result<(), FontError> {
        let name = name.into();
        let face = FaceMetrics::from_truetype(&name, data)?;
        self.add_face(name, face)
    }

    /// Number of registered faces, not counting the builtin family.
    ///
    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.faces.read().map(|f| f.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, font: &str) -> Result<Option<Arc<FaceMetrics>>, FontError> {
        let faces = self
            .faces
            .read()
            .map_err(|_| FontError::Unavailable("font store lock poisoned".to_string()))?;
        Ok(faces.get(font).cloned())
    }
}

impl FontMetrics for InMemoryFontMetrics {
    fn cap_height_per_point(&self, font: &str) -> Result<f32, FontError> {
        match self.lookup(font)? {
            Some(face) => Ok(face.cap_height),
            None => self.builtin.cap_height_per_point(font),
        }
    }

    fn string_width(&self, text: &str, font: &str, size: f32) -> Result<f32, FontError> {
        match self.lookup(font)? {
            Some(face) => Ok(face.string_width(text, size)),
            None => self.builtin.string_width(text, font, size),
        }
    }

    fn name(&self) -> &'static str {
        "InMemoryFontMetrics"
    }
}
