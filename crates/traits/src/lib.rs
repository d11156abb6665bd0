pub mod font;

pub use font::{
    BuiltinFontMetrics, FaceMetrics, FontError, FontMetrics, InMemoryFontMetrics, SharedFontMetrics,
};
