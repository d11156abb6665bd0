use ballotpress_types::{Color, INCH, MM, PageSize};
use serde::{Deserialize, Serialize};

use crate::LayoutError;

/// Geometry and typography for ballot layout.
///
/// Settings are immutable for the duration of a render and passed by reference to
/// every height and draw call. All lengths are in points. Every field has a default,
/// so a settings file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutSettings {
    pub header_font: String,
    pub header_font_size: f32,
    pub header_leading: f32,

    pub title_font: String,
    pub title_font_size: f32,
    pub title_leading: f32,
    #[serde(rename = "titleBGColor")]
    pub title_background: Color,

    pub subtitle_font: String,
    pub subtitle_font_size: f32,
    pub subtitle_leading: f32,
    #[serde(rename = "subtitleBGColor")]
    pub subtitle_background: Color,

    pub candidate_font: String,
    pub candidate_font_size: f32,
    pub candidate_leading: f32,

    #[serde(rename = "candsubFontName")]
    pub subtext_font: String,
    #[serde(rename = "candsubFontSize")]
    pub subtext_font_size: f32,
    #[serde(rename = "candsubLeading")]
    pub subtext_leading: f32,

    pub write_in_height: f32,
    pub bubble_left_pad: f32,
    pub bubble_right_pad: f32,
    pub bubble_width: f32,
    pub bubble_max_height: f32,

    /// Gap below contest titles, under each selection and at the bottom of a contest.
    pub row_padding: f32,

    pub column_count: usize,
    pub column_margin: f32,
    /// Inset of the content area from every paper edge.
    pub page_margin: f32,
    pub page_size: PageSize,

    #[serde(rename = "debugPageOutline")]
    pub show_debug_outline: bool,
    #[serde(rename = "nowstrEnabled")]
    pub show_generated_timestamp: bool,
    #[serde(rename = "nowstrFontName")]
    pub timestamp_font: String,
    #[serde(rename = "nowstrFontSize")]
    pub timestamp_font_size: f32,
}

/// Light red used for the content-limit outline.
pub const DEBUG_OUTLINE_COLOR: Color = Color::rgb(255, 153, 153);

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            header_font: "Helvetica-Bold".to_string(),
            header_font_size: 14.0,
            header_leading: 15.2,
            title_font: "Helvetica-Bold".to_string(),
            title_font_size: 12.0,
            title_leading: 12.0 * 1.4,
            title_background: Color::gray(217),
            subtitle_font: "Helvetica-Bold".to_string(),
            subtitle_font_size: 12.0,
            subtitle_leading: 12.0 * 1.4,
            subtitle_background: Color::rgb(230, 255, 255),
            candidate_font: "Helvetica-Bold".to_string(),
            candidate_font_size: 12.0,
            candidate_leading: 13.0,
            subtext_font: "Helvetica".to_string(),
            subtext_font_size: 12.0,
            subtext_leading: 13.0,
            write_in_height: 0.3 * INCH,
            bubble_left_pad: 0.1 * INCH,
            bubble_right_pad: 0.1 * INCH,
            bubble_width: 8.0 * MM,
            bubble_max_height: 3.0 * MM,
            row_padding: 0.1 * INCH,
            column_count: 2,
            column_margin: 0.1 * INCH,
            page_margin: 0.5 * INCH,
            page_size: PageSize::Letter,
            show_debug_outline: true,
            show_generated_timestamp: true,
            timestamp_font: "Helvetica".to_string(),
            timestamp_font_size: 10.0,
        }
    }
}

impl LayoutSettings {
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        let settings: Self = serde_json::from_str(json)
            .map_err(|e| LayoutError::InvalidSettings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// `(width, height)` of the paper in points.
    pub fn page_dimensions(&self) -> (f32, f32) {
        self.page_size.dimensions_pt()
    }

    /// Width of one content column for the given paper width.
    pub fn column_width(&self, page_width: f32) -> f32 {
        let content = page_width - 2.0 * self.page_margin;
        let columns = self.column_count.max(1) as f32;
        (content - self.column_margin * (columns - 1.0)) / columns
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        let invalid = |msg: String| Err(LayoutError::InvalidSettings(msg));
        if self.column_count == 0 {
            return invalid("columnCount must be at least 1".to_string());
        }
        let (width, height) = self.page_dimensions();
        if !(width > 0.0 && height > 0.0) {
            return invalid(format!("page size {}x{} is not positive", width, height));
        }
        if self.page_margin < 0.0 || self.column_margin < 0.0 {
            return invalid("margins must not be negative".to_string());
        }
        if height - 2.0 * self.page_margin <= 0.0 {
            return invalid(format!(
                "pageMargin {} leaves no content height on a {}pt page",
                self.page_margin, height
            ));
        }
        if self.column_width(width) <= 0.0 {
            return invalid(format!(
                "{} columns with columnMargin {} leave no column width",
                self.column_count, self.column_margin
            ));
        }
        let sizes = [
            ("headerFontSize", self.header_font_size),
            ("titleFontSize", self.title_font_size),
            ("subtitleFontSize", self.subtitle_font_size),
            ("candidateFontSize", self.candidate_font_size),
            ("candsubFontSize", self.subtext_font_size),
            ("nowstrFontSize", self.timestamp_font_size),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, size)| *size <= 0.0) {
            return invalid(format!("{} must be positive", name));
        }
        Ok(())
    }
}
