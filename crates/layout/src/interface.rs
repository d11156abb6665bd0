use ballotpress_traits::FontMetrics;

use crate::LayoutError;
use crate::config::LayoutSettings;

/// Read-only context for height and draw calls.
#[derive(Clone, Copy)]
pub struct LayoutEnvironment<'a> {
    pub settings: &'a LayoutSettings,
    pub metrics: &'a dyn FontMetrics,
}

impl<'a> LayoutEnvironment<'a> {
    pub fn new(settings: &'a LayoutSettings, metrics: &'a dyn FontMetrics) -> Self {
        Self { settings, metrics }
    }

    /// Capital letter height of `font` set at `size` points.
    pub fn cap_height(&self, font: &str, size: f32) -> Result<f32, LayoutError> {
        Ok(self.metrics.cap_height_per_point(font)? * size)
    }

    pub fn string_width(&self, text: &str, font: &str, size: f32) -> Result<f32, LayoutError> {
        Ok(self.metrics.string_width(text, font, size)?)
    }

    /// Checks that every font named by the settings is known to the metrics provider.
    pub fn check_fonts(&self) -> Result<(), LayoutError> {
        let s = self.settings;
        for font in [
            &s.header_font,
            &s.title_font,
            &s.subtitle_font,
            &s.candidate_font,
            &s.subtext_font,
            &s.timestamp_font,
        ] {
            self.metrics.cap_height_per_point(font)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for LayoutEnvironment<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutEnvironment")
            .field("settings", self.settings)
            .field("metrics", &self.metrics.name())
            .finish()
    }
}
