//! Newtype wrapper for the `@id` strings that cross-reference election objects.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// The `@id` of an election object (contest, selection, party, ...).
///
/// Cheap to clone; ids are shared between the raw index, the drawable cache
/// and the bubble maps.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(Arc<str>);

impl ObjectId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ObjectId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl From<&String> for ObjectId {
    fn from(s: &String) -> Self {
        Self(s.as_str().into())
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ObjectId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
