//! Chainable, failure-safe navigation over an expanded document.
//!
//! A [`Reader`] is either present, holding a fragment of the tree, or absent,
//! holding the error of the step that failed. Navigation never panics and
//! never returns early: once a step fails, every further [`Reader::read`]
//! returns the same absent reader, so a whole chain can be written first and
//! checked once at the end.
//!
//! ```
//! use jsonld_reader::Reader;
//! use serde_json::json;
//!
//! let expanded = json!([{
//!     "@type": ["https://www.w3.org/ns/activitystreams#Note"],
//!     "https://www.w3.org/ns/activitystreams#image": [{
//!         "https://www.w3.org/ns/activitystreams#mediaType": [{ "@value": "image/png" }]
//!     }]
//! }]);
//! let root = Reader::new(&expanded);
//!
//! assert_eq!(root.read("type").try_string().unwrap(), "Note");
//! assert_eq!(root.read("image").read("mediaType").string_or(""), "image/png");
//! assert_eq!(root.read("icon").read("mediaType").string_or(""), "");
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::key::{self, Edge, Found, Selector};
use crate::value;

/// Stand-in for a pointer that does not resolve. Pointers are only ever built
/// by descending their own root, so it is never observed.
static NULL: Value = Value::Null;

/// Where the fragment of a present [`Reader`] lives.
#[derive(Debug, Clone)]
pub enum Fragment<'a> {
    /// Inside a tree the caller keeps.
    Borrowed(&'a Value),
    /// Inside a shared tree, at a JSON pointer from its root.
    Shared { root: Arc<Value>, pointer: String },
}

impl<'a> Fragment<'a> {
    /// Wrap a whole tree for sharing.
    #[must_use]
    pub fn shared(root: Arc<Value>) -> Fragment<'static> {
        Fragment::Shared {
            root,
            pointer: String::new(),
        }
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        match self {
            Fragment::Borrowed(fragment) => fragment,
            Fragment::Shared { root, pointer } => root.pointer(pointer).unwrap_or(&NULL),
        }
    }

    fn child(&self, selector: Selector<'_>) -> Result<Fragment<'a>> {
        match self {
            Fragment::Borrowed(fragment) => {
                let fragment: &'a Value = *fragment;
                key::locate(fragment, selector).map(|found| match found {
                    Found::Child { value, .. } => Fragment::Borrowed(value),
                    Found::Compacted(value) => Fragment::shared(Arc::new(value)),
                })
            }
            Fragment::Shared { root, pointer } => {
                key::locate(self.value(), selector).map(|found| match found {
                    Found::Child { depth, edge, .. } => Fragment::Shared {
                        root: Arc::clone(root),
                        pointer: descend(pointer, depth, edge),
                    },
                    Found::Compacted(value) => Fragment::shared(Arc::new(value)),
                })
            }
        }
    }

    fn elements(&self) -> Vec<Fragment<'a>> {
        match self {
            Fragment::Borrowed(fragment) => {
                let fragment: &'a Value = *fragment;
                match fragment {
                    Value::Array(items) => items.iter().map(Fragment::Borrowed).collect(),
                    _ => vec![self.clone()],
                }
            }
            Fragment::Shared { root, pointer } => match self.value() {
                Value::Array(items) => (0..items.len())
                    .map(|i| Fragment::Shared {
                        root: Arc::clone(root),
                        pointer: descend(pointer, 0, Edge::Index(i)),
                    })
                    .collect(),
                _ => vec![self.clone()],
            },
        }
    }
}

/// Extend a JSON pointer through `depth` singleton sequences and one edge.
fn descend(pointer: &str, depth: usize, edge: Edge<'_>) -> String {
    let mut next = String::from(pointer);
    for _ in 0..depth {
        next.push_str("/0");
    }
    next.push('/');
    match edge {
        Edge::Key(key) => next.push_str(&key.replace('~', "~0").replace('/', "~1")),
        Edge::Index(index) => next.push_str(&index.to_string()),
    }
    next
}

impl PartialEq for Fragment<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

/// A handle on one fragment of an expanded document, or on the reason there
/// is none.
///
/// Readers over a borrowed tree ([`Reader::new`]) hold plain references.
/// Readers over an owned tree ([`Reader::from_value`]) share it behind an
/// [`Arc`] and address their fragment by JSON pointer, so neither
/// navigation nor cloning copies the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Reader<'a> {
    /// A fragment is present.
    Present(Fragment<'a>),
    /// Nothing is present; holds the error of the failed step.
    Absent(Error),
}

impl<'a> Reader<'a> {
    /// Create a reader borrowing `root`.
    #[inline]
    #[must_use]
    pub fn new(root: &'a Value) -> Self {
        Reader::Present(Fragment::Borrowed(root))
    }

    /// Create a reader owning `root`.
    #[inline]
    #[must_use]
    pub fn from_value(root: Value) -> Reader<'static> {
        Reader::shared(Arc::new(root))
    }

    /// Create a reader over a tree shared with other owners.
    #[inline]
    #[must_use]
    pub fn shared(root: Arc<Value>) -> Reader<'static> {
        Reader::Present(Fragment::shared(root))
    }

    /// Create an absent reader carrying `error`.
    #[inline]
    #[must_use]
    pub fn absent(error: Error) -> Self {
        Reader::Absent(error)
    }

    /// The raw current fragment, or `None` if absent.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match self {
            Reader::Present(fragment) => Some(fragment.value()),
            Reader::Absent(_) => None,
        }
    }

    /// Element count of a sequence fragment, 1 for any other fragment, and 0
    /// when absent.
    #[must_use]
    pub fn length(&self) -> usize {
        self.value().map_or(0, value::length)
    }

    #[inline]
    #[must_use]
    pub fn is_present(&self) -> bool {
        matches!(self, Reader::Present(_))
    }

    #[inline]
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Reader::Absent(_))
    }

    /// The stored diagnostic of an absent reader.
    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        match self {
            Reader::Present(_) => None,
            Reader::Absent(error) => Some(error),
        }
    }

    /// Step into the child named by a short key or a position.
    ///
    /// Failures are not returned; they become the diagnostic of the absent
    /// reader. Reading from an absent reader returns it unchanged.
    #[must_use]
    pub fn read<'k>(&self, selector: impl Into<Selector<'k>>) -> Reader<'a> {
        let selector = selector.into();
        let resolved = match self {
            Reader::Absent(_) => return self.clone(),
            Reader::Present(fragment) => fragment.child(selector),
        };

        match resolved {
            Ok(child) => Reader::Present(child),
            Err(error) => {
                tracing::trace!(%selector, %error, "read failed");
                Reader::Absent(error)
            }
        }
    }

    /// Apply [`Reader::read`] for each selector in turn.
    #[must_use]
    pub fn read_path<'k, I, S>(&self, path: I) -> Reader<'a>
    where
        I: IntoIterator<Item = S>,
        S: Into<Selector<'k>>,
    {
        path.into_iter()
            .fold(self.clone(), |reader, step| reader.read(step))
    }

    /// One reader per element of a sequence fragment.
    ///
    /// A non-sequence fragment yields this reader once, and an absent reader
    /// yields nothing, so the count always equals [`Reader::length`].
    #[must_use]
    pub fn iter(&self) -> std::vec::IntoIter<Reader<'a>> {
        let readers: Vec<Reader<'a>> = match self {
            Reader::Absent(_) => Vec::new(),
            Reader::Present(fragment) => fragment
                .elements()
                .into_iter()
                .map(Reader::Present)
                .collect(),
        };
        readers.into_iter()
    }

    /// The unwrapped terminal value, or `None` if absent.
    ///
    /// Literal wrappers yield their `@value` and references their `@id`; see
    /// [`value::unwrap`].
    #[must_use]
    pub fn get(&self) -> Option<&Value> {
        match self {
            Reader::Present(fragment) => Some(value::unwrap(fragment.value())),
            Reader::Absent(_) => None,
        }
    }

    /// The unwrapped terminal value.
    ///
    /// # Errors
    ///
    /// Returns the stored diagnostic if absent.
    pub fn try_get(&self) -> Result<&Value> {
        match self {
            Reader::Present(fragment) => Ok(value::unwrap(fragment.value())),
            Reader::Absent(error) => Err(error.clone()),
        }
    }

    /// The unwrapped terminal value.
    ///
    /// # Errors
    ///
    /// Returns `error` if absent.
    pub fn get_or_err<E>(&self, error: E) -> std::result::Result<&Value, E> {
        self.get().ok_or(error)
    }

    /// The unwrapped terminal value, or `default` if absent.
    #[must_use]
    pub fn get_or<'s>(&'s self, default: &'s Value) -> &'s Value {
        self.get().unwrap_or(default)
    }

    /// The terminal value as a string; numbers and booleans are stringified.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotAString` if absent or if the value is null, a
    /// sequence or an object.
    pub fn try_string(&self) -> Result<String> {
        self.get()
            .ok_or(Error::NotAString)
            .and_then(value::coerce_string)
    }

    /// Like [`Reader::try_string`], failing with `error` instead.
    ///
    /// # Errors
    ///
    /// Returns `error` if the value is not a string.
    pub fn string_or_err<E>(&self, error: E) -> std::result::Result<String, E> {
        self.try_string().map_err(|_| error)
    }

    /// Like [`Reader::try_string`], falling back to `default`.
    #[must_use]
    pub fn string_or(&self, default: impl Into<String>) -> String {
        self.try_string().unwrap_or_else(|_| default.into())
    }

    /// The terminal value as a number; strings are parsed.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotANumber` if absent or if the value is neither
    /// numeric nor a string that parses to a number.
    pub fn try_number(&self) -> Result<f64> {
        self.get()
            .ok_or(Error::NotANumber)
            .and_then(value::coerce_number)
    }

    /// Like [`Reader::try_number`], failing with `error` instead.
    ///
    /// # Errors
    ///
    /// Returns `error` if the value is not a number.
    pub fn number_or_err<E>(&self, error: E) -> std::result::Result<f64, E> {
        self.try_number().map_err(|_| error)
    }

    /// Like [`Reader::try_number`], falling back to `default`.
    #[must_use]
    pub fn number_or(&self, default: f64) -> f64 {
        self.try_number().unwrap_or(default)
    }

    /// The terminal value as a boolean.
    ///
    /// Accepts booleans, the strings `"true"`, `"false"`, `"1"`, `"0"` and the
    /// numbers `1` and `0`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotABoolean` if absent or for any other value.
    pub fn try_boolean(&self) -> Result<bool> {
        self.get()
            .ok_or(Error::NotABoolean)
            .and_then(value::coerce_boolean)
    }

    /// Like [`Reader::try_boolean`], failing with `error` instead.
    ///
    /// # Errors
    ///
    /// Returns `error` if the value is not a boolean.
    pub fn boolean_or_err<E>(&self, error: E) -> std::result::Result<bool, E> {
        self.try_boolean().map_err(|_| error)
    }

    /// Like [`Reader::try_boolean`], falling back to `default`.
    #[must_use]
    pub fn boolean_or(&self, default: bool) -> bool {
        self.try_boolean().unwrap_or(default)
    }
}

impl<'a> From<&'a Value> for Reader<'a> {
    fn from(root: &'a Value) -> Self {
        Reader::new(root)
    }
}

impl From<Value> for Reader<'static> {
    fn from(root: Value) -> Self {
        Reader::from_value(root)
    }
}

impl fmt::Display for Reader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reader::Present(fragment) => write!(f, "{}", fragment.value()),
            Reader::Absent(error) => write!(f, "absent: {error}"),
        }
    }
}
