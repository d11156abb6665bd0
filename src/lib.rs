//! Ballot layout and printing for NIST SP 1500-100 election reports.
//!
//! An [`ElectionPrinter`] resolves one election's ballot styles into drawables,
//! paginates each style in a measuring pass, then draws it onto a PDF surface
//! while recording the bubble of every selection.
//!
//! ```no_run
//! use ballotpress::PrinterBuilder;
//!
//! # fn main() -> Result<(), ballotpress::PrinterError> {
//! let report = serde_json::from_str(&std::fs::read_to_string("election.json")?)?;
//! let mut printer = PrinterBuilder::new().build(&report)?;
//! let mut pdf = Vec::new();
//! printer.render(&mut pdf)?;
//! println!("{}", printer.bubble_report()?.to_json()?);
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
mod printer;

pub use builder::{PrinterBuilder, election_count};
pub use error::{ErrorKind, PrinterError};
pub use printer::ElectionPrinter;

pub use ballotpress_layout::{
    BallotContent, BallotStyle, BubbleMap, BubbleReport, Contest, LayoutEnvironment, LayoutError,
    LayoutSettings, LayoutWarning, OrderedContest, Resolver, Selection, SelectionBubbles,
    StyleLayout,
};
pub use ballotpress_model::DocumentError;
pub use ballotpress_render_core::{DrawingSurface, Recording, RecordingSurface};
pub use ballotpress_traits::{BuiltinFontMetrics, FontMetrics, InMemoryFontMetrics, SharedFontMetrics};
pub use ballotpress_types::{ObjectId, PageSize, Rect};
