//! Lazily built, memoized drawables for one election report.

use std::collections::HashMap;
use std::sync::Arc;

use ballotpress_model::{DocumentError, ElectionIndex, type_tag};
use ballotpress_types::ObjectId;
use log::debug;
use serde_json::Value;

use crate::LayoutError;
use crate::contest::{Contest, OrderedContest};
use crate::header::HeaderBlock;
use crate::node_kind::DrawableKind;
use crate::selection::Selection;

/// Builds the drawable for one raw record. May resolve further references.
pub type Constructor = fn(&mut Resolver, &Value) -> Result<Drawable, LayoutError>;

/// A typed, immutable view of an election object that can be measured and drawn.
///
/// Cloning shares the underlying instance.
#[derive(Debug, Clone)]
pub enum Drawable {
    Selection(Arc<Selection>),
    Contest(Arc<Contest>),
    OrderedContest(Arc<OrderedContest>),
    Header(Arc<HeaderBlock>),
}

impl Drawable {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Drawable::Selection(_) => "selection",
            Drawable::Contest(_) => "contest",
            Drawable::OrderedContest(_) => "ordered contest",
            Drawable::Header(_) => "header",
        }
    }

    pub fn into_selection(self, id: &str) -> Result<Arc<Selection>, LayoutError> {
        match self {
            Drawable::Selection(s) => Ok(s),
            other => Err(mismatch(id, "selection", &other)),
        }
    }

    pub fn into_contest(self, id: &str) -> Result<Arc<Contest>, LayoutError> {
        match self {
            Drawable::Contest(c) => Ok(c),
            other => Err(mismatch(id, "contest", &other)),
        }
    }

    pub fn into_header(self, id: &str) -> Result<Arc<HeaderBlock>, LayoutError> {
        match self {
            Drawable::Header(h) => Ok(h),
            other => Err(mismatch(id, "header", &other)),
        }
    }
}

fn mismatch(id: &str, expected: &'static str, actual: &Drawable) -> LayoutError {
    LayoutError::KindMismatch {
        id: id.to_string(),
        expected,
        actual: actual.kind_name(),
    }
}

/// Type tag to constructor table.
#[derive(Debug, Clone)]
pub struct Registry {
    constructors: HashMap<&'static str, Constructor>,
}

impl Registry {
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Every built-in drawable kind.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for kind in DrawableKind::ALL {
            registry.register(kind.as_str(), kind.constructor());
        }
        registry
    }

    pub fn register(&mut self, tag: &'static str, constructor: Constructor) {
        self.constructors.insert(tag, constructor);
    }

    pub fn get(&self, tag: &str) -> Option<Constructor> {
        self.constructors.get(tag).copied()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Resolves ids to drawables, building each identified object at most once.
///
/// One resolver serves one report; two references to the same `@id` yield the same
/// `Arc`.
#[derive(Debug)]
pub struct Resolver {
    index: ElectionIndex,
    registry: Registry,
    cache: HashMap<ObjectId, Drawable>,
}

impl Resolver {
    pub fn new(index: ElectionIndex) -> Self {
        Self::with_registry(index, Registry::standard())
    }

    pub fn with_registry(index: ElectionIndex, registry: Registry) -> Self {
        Self {
            index,
            registry,
            cache: HashMap::new(),
        }
    }

    pub fn index(&self) -> &ElectionIndex {
        &self.index
    }

    pub fn resolve_raw(&self, id: &str) -> Result<&Value, LayoutError> {
        Ok(self.index.resolve_raw(id)?)
    }

    /// Number of memoized drawables.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    pub fn resolve_typed(&mut self, id: &str) -> Result<Drawable, LayoutError> {
        if let Some(hit) = self.cache.get(id) {
            return Ok(hit.clone());
        }
        let raw = self.index.resolve_raw(id)?.clone();
        self.make_drawable(&raw)
    }

    /// Builds the drawable for an inline or indexed record. Records with an `@id`
    /// are memoized.
    pub fn make_drawable(&mut self, raw: &Value) -> Result<Drawable, LayoutError> {
        let id = raw.get("@id").and_then(Value::as_str).map(ObjectId::from);
        if let Some(hit) = id.as_ref().and_then(|id| self.cache.get(id)) {
            return Ok(hit.clone());
        }
        let tag = type_tag(raw).ok_or_else(|| DocumentError::Malformed {
            context: id
                .as_ref()
                .map(|id| format!("object '{}'", id))
                .unwrap_or_else(|| "record".to_string()),
            message: "missing '@type'".to_string(),
        })?;
        let constructor = self
            .registry
            .get(tag)
            .ok_or_else(|| LayoutError::UnsupportedType(tag.to_string()))?;

        let drawable = constructor(self, raw)?;
        if let Some(id) = id {
            debug!("Built {} '{}'", drawable.kind_name(), id);
            self.cache.insert(id, drawable.clone());
        }
        Ok(drawable)
    }
}
