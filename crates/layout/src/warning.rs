use serde::Serialize;
use std::fmt;

/// Non-fatal layout findings collected during a render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LayoutWarning {
    /// An item taller than an empty column. It is drawn from the column top and
    /// runs past the content bottom.
    #[serde(rename_all = "camelCase")]
    Overflow {
        item: String,
        page: usize,
        column: usize,
        height: f32,
        available: f32,
    },
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutWarning::Overflow {
                item,
                page,
                column,
                height,
                available,
            } => write!(
                f,
                "'{}' needs {:.2}pt but column {} of page {} holds {:.2}pt",
                item, height, column, page, available
            ),
        }
    }
}
