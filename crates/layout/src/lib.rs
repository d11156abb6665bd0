use ballotpress_model::DocumentError;
use ballotpress_render_core::RenderError;
use ballotpress_traits::FontError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("Font error: {0}")]
    Font(#[from] FontError),
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    #[error("No drawable registered for type '{0}'")]
    UnsupportedType(String),
    #[error("Expected {expected} for '{id}', got {actual}.")]
    KindMismatch {
        id: String,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("Invalid layout settings: {0}")]
    InvalidSettings(String),
    #[error("Pagination pass counted {pass1} pages but the print pass produced {pass2}.")]
    PassMismatch { pass1: usize, pass2: usize },
}

pub mod algorithms;
pub mod ballot_style;
pub mod bubbles;
pub mod config;
pub mod contest;
pub mod header;
pub mod interface;
pub mod node_kind;
pub mod registry;
pub mod selection;
pub mod warning;

pub use self::ballot_style::{BallotContent, BallotStyle, StyleLayout};
pub use self::bubbles::{BubbleMap, BubbleReport, SelectionBubbles};
pub use self::config::LayoutSettings;
pub use self::contest::{Contest, ContestBody, OrderedContest};
pub use self::header::{HeaderBlock, HeaderKind};
pub use self::interface::LayoutEnvironment;
pub use self::node_kind::DrawableKind;
pub use self::registry::{Constructor, Drawable, Registry, Resolver};
pub use self::selection::{CandidateSelectionView, MeasureSelectionView, Selection};
pub use self::warning::LayoutWarning;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod ballot_style_test;
