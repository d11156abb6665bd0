use std::collections::BTreeMap;

use ballotpress_types::{ObjectId, Rect};
use serde::Serialize;
use serde_json::Value;

use crate::config::LayoutSettings;

/// Selection id to bubble rectangle for one contest.
pub type SelectionBubbles = BTreeMap<ObjectId, Rect>;

/// Contest id to its selections' bubbles for one ballot style.
pub type BubbleMap = BTreeMap<ObjectId, SelectionBubbles>;

/// Bubble locations of every ballot style plus the settings they were drawn with.
///
/// Styles that have not been rendered are `None`. Maps are ordered so the JSON form is
/// byte-stable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleReport {
    pub draw_settings: Value,
    pub bubbles: Vec<Option<BubbleMap>>,
}

impl BubbleReport {
    pub fn new(
        settings: &LayoutSettings,
        bubbles: Vec<Option<BubbleMap>>,
    ) -> Result<Self, serde_json::Error> {
        let mut draw_settings = serde_json::to_value(settings)?;
        if let Value::Object(map) = &mut draw_settings {
            let (width, height) = settings.page_dimensions();
            map.insert("pagesize".to_string(), serde_json::json!([width, height]));
        }
        Ok(Self {
            draw_settings,
            bubbles,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Bubble of one selection in one style.
    pub fn bubble(&self, style: usize, contest: &str, selection: &str) -> Option<Rect> {
        self.bubbles
            .get(style)?
            .as_ref()?
            .get(contest)?
            .get(selection)
            .copied()
    }
}
