//! Read expanded JSON-LD documents by short keys.
//!
//! Expansion makes differently-compacted documents structurally uniform:
//! every property is keyed by its full IRI and every value sits in a
//! one-element array. [`Reader`] walks that shape with short keys such as
//! `mediaType`, looks through the singleton arrays, and extracts typed values
//! without panicking along the way.

pub mod error;
pub mod expand;
pub mod key;
pub mod reader;
pub mod value;

pub use error::{Error, Result};
pub use expand::{
    DocumentLoader, ExpansionOptions, Expander, LoaderError, Passthrough, ProcessingMode,
    RemoteDocument, parse,
};
pub use key::{Edge, Found, Reserved, Selector};
pub use reader::{Fragment, Reader};
