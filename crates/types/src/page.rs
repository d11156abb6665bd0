use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::str::FromStr;

use crate::{INCH, MM};

/// Paper size of a printed ballot.
///
/// Deserializes from a name (`"letter"`, `"legal"`, `"a4"`, any case) or a
/// `[width, height]` pair in points. Named sizes serialize as their name, custom
/// ones as the pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    #[default]
    Letter,
    Legal,
    A4,
    Custom { width: f32, height: f32 },
}

impl PageSize {
    /// `(width, height)` in points.
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match *self {
            PageSize::Letter => (8.5 * INCH, 11.0 * INCH),
            PageSize::Legal => (8.5 * INCH, 14.0 * INCH),
            PageSize::A4 => (210.0 * MM, 297.0 * MM),
            PageSize::Custom { width, height } => (width, height),
        }
    }

    fn name(&self) -> Option<&'static str> {
        match self {
            PageSize::Letter => Some("Letter"),
            PageSize::Legal => Some("Legal"),
            PageSize::A4 => Some("A4"),
            PageSize::Custom { .. } => None,
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "letter" => Ok(PageSize::Letter),
            "legal" => Ok(PageSize::Legal),
            "a4" => Ok(PageSize::A4),
            _ => Err(format!("unknown page size '{}'", s)),
        }
    }
}

impl Serialize for PageSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.name() {
            Some(name) => serializer.serialize_str(name),
            None => self.dimensions_pt().serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PageSizeDef {
            Name(String),
            Points(f32, f32),
        }

        match PageSizeDef::deserialize(deserializer)? {
            PageSizeDef::Name(s) => s.parse().map_err(de::Error::custom),
            PageSizeDef::Points(width, height) => Ok(PageSize::Custom { width, height }),
        }
    }
}
