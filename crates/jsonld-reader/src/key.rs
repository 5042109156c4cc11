//! Short-key resolution against expanded node-objects.
//!
//! Expanded documents key every property by a fully-qualified IRI such as
//! `https://www.w3.org/ns/activitystreams#mediaType`. A short key matches the
//! first property (in declaration order) whose segment after the last `#`
//! equals it; failing that, the first whose segment after the last `/` does.
//!
//! The relational keys `id`, `type` and `value` (or `@id`, `@type`, `@value`)
//! are tried first against their keyword slot and against any property whose
//! `#` segment is the bare token. Results for `type` are compacted to a type
//! name (see [`compact_type`]).

use std::borrow::Cow;
use std::fmt;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::value::{ID, TYPE, VALUE, as_object, compact_type, local_part, peel};

/// One navigation step: a short key or a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'k> {
    /// Short property key.
    Key(&'k str),
    /// Position within a sequence. Negative positions never match.
    Index(i128),
    /// No key or index was supplied.
    Missing,
}

impl<'k> From<&'k str> for Selector<'k> {
    fn from(key: &'k str) -> Self {
        Selector::Key(key)
    }
}

impl<'k> From<&'k String> for Selector<'k> {
    fn from(key: &'k String) -> Self {
        Selector::Key(key)
    }
}

impl From<usize> for Selector<'_> {
    fn from(index: usize) -> Self {
        // usize is at most 64 bits wide on every supported target
        Selector::Index(index as i128)
    }
}

impl From<u64> for Selector<'_> {
    fn from(index: u64) -> Self {
        Selector::Index(index.into())
    }
}

impl From<u32> for Selector<'_> {
    fn from(index: u32) -> Self {
        Selector::Index(index.into())
    }
}

impl From<i32> for Selector<'_> {
    fn from(index: i32) -> Self {
        Selector::Index(index.into())
    }
}

impl From<i64> for Selector<'_> {
    fn from(index: i64) -> Self {
        Selector::Index(index.into())
    }
}

impl<'k, S: Into<Selector<'k>>> From<Option<S>> for Selector<'k> {
    fn from(selector: Option<S>) -> Self {
        selector.map_or(Selector::Missing, Into::into)
    }
}

impl fmt::Display for Selector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Key(key) => write!(f, "{key}"),
            Selector::Index(index) => write!(f, "{index}"),
            Selector::Missing => write!(f, "<missing>"),
        }
    }
}

/// The relational keys that bypass plain suffix matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reserved {
    Id,
    Type,
    Value,
}

impl Reserved {
    /// Recognize a short key by either of its spellings.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "id" | "@id" => Some(Reserved::Id),
            "type" | "@type" => Some(Reserved::Type),
            "value" | "@value" => Some(Reserved::Value),
            _ => None,
        }
    }

    /// The canonical keyword, e.g. `@type`.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Reserved::Id => ID,
            Reserved::Type => TYPE,
            Reserved::Value => VALUE,
        }
    }

    /// The bare token, e.g. `type`.
    #[must_use]
    pub fn token(self) -> &'static str {
        &self.keyword()[1..]
    }
}

/// The last edge taken from a fragment to a resolved child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge<'v> {
    /// The full property key that matched.
    Key(&'v str),
    Index(usize),
}

/// A resolved child and where it sits beneath the fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Found<'v> {
    /// A child stored in the tree: `depth` singleton sequences down, then
    /// across `edge`.
    Child {
        value: &'v Value,
        depth: usize,
        edge: Edge<'v>,
    },
    /// A compacted `type` value, which the tree does not contain.
    Compacted(Value),
}

impl<'v> Found<'v> {
    #[must_use]
    pub fn into_cow(self) -> Cow<'v, Value> {
        match self {
            Found::Child { value, .. } => Cow::Borrowed(value),
            Found::Compacted(value) => Cow::Owned(value),
        }
    }
}

/// Resolve one selector against a fragment.
///
/// The child is borrowed from `fragment`, except for compacted `type`
/// values, which are owned.
///
/// # Errors
///
/// - `Error::MissingSelector` for `Selector::Missing` or an empty key
/// - `Error::NotAnArray` / `Error::IndexNotFound` for index steps
/// - `Error::NotAnObject` / `Error::KeyNotFound` for key steps
pub fn resolve<'v>(fragment: &'v Value, selector: Selector<'_>) -> Result<Cow<'v, Value>> {
    locate(fragment, selector).map(Found::into_cow)
}

/// Like [`resolve`], also reporting the path to the child.
///
/// # Errors
///
/// Same as [`resolve`].
pub fn locate<'v>(fragment: &'v Value, selector: Selector<'_>) -> Result<Found<'v>> {
    match selector {
        Selector::Missing | Selector::Key("") => Err(Error::MissingSelector),
        Selector::Index(index) => get_index(fragment, index),
        Selector::Key(key) => get_key(fragment, key),
    }
}

fn get_index(fragment: &Value, index: i128) -> Result<Found<'_>> {
    let Value::Array(items) = fragment else {
        return Err(Error::NotAnArray);
    };
    usize::try_from(index)
        .ok()
        .and_then(|i| Some((i, items.get(i)?)))
        .map(|(i, value)| Found::Child {
            value,
            depth: 0,
            edge: Edge::Index(i),
        })
        .ok_or(Error::IndexNotFound(index))
}

fn get_key<'v>(fragment: &'v Value, key: &str) -> Result<Found<'v>> {
    let (element, depth) = peel(fragment);
    let node = as_object(element)?;
    let reserved = Reserved::from_key(key);

    let (property, value) = reserved
        .and_then(|r| get_reserved(node, r))
        .or_else(|| get_local(node, key))
        .ok_or_else(|| Error::KeyNotFound(key.to_owned()))?;

    if reserved == Some(Reserved::Type) {
        Ok(Found::Compacted(compact_type(value)))
    } else {
        Ok(Found::Child {
            value,
            depth,
            edge: Edge::Key(property),
        })
    }
}

/// Keyword slot first, then any property whose `#` segment is the bare token.
fn get_reserved(node: &Map<String, Value>, reserved: Reserved) -> Option<(&str, &Value)> {
    node.get_key_value(reserved.keyword())
        .or_else(|| {
            node.iter()
                .find(|(k, _)| local_part(k, '#') == reserved.token())
        })
        .map(|(k, v)| (k.as_str(), v))
}

/// First property matching on its `#` segment, else on its `/` segment.
fn get_local<'v>(node: &'v Map<String, Value>, key: &str) -> Option<(&'v str, &'v Value)> {
    ['#', '/'].into_iter().find_map(|separator| {
        node.iter()
            .find(|(k, _)| local_part(k, separator) == key)
            .map(|(k, v)| (k.as_str(), v))
    })
}
