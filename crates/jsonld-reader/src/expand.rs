//! Expansion seam and the async entry point.
//!
//! Turning a compacted JSON-LD document into expanded form is the job of an
//! external JSON-LD processor. This crate only defines the shape of that
//! collaborator ([`Expander`]), the options it is handed
//! ([`ExpansionOptions`]), and [`parse`], which awaits it once and wraps the
//! result in a root [`Reader`].
//!
//! # Example
//!
//! ```
//! use jsonld_reader::{ExpansionOptions, Passthrough, parse};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let stored = json!({
//!     "@id": "https://example.com/users/juunini",
//!     "https://www.w3.org/ns/activitystreams#preferredUsername": [{ "@value": "juunini" }]
//! });
//! let root = parse(&Passthrough, &stored, &ExpansionOptions::default()).await.unwrap();
//! assert_eq!(root.length(), 1);
//! assert_eq!(root.read("preferredUsername").string_or(""), "juunini");
//! # }
//! ```

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::reader::Reader;
use crate::value;

/// Error type returned by a [`DocumentLoader`].
pub type LoaderError = Box<dyn std::error::Error + Send + Sync>;

/// Produces the expanded form of a document.
///
/// Implementations are expected to return a sequence of node-objects at the
/// top level. Their errors reach the caller of [`parse`] unchanged.
#[async_trait]
pub trait Expander: Send + Sync {
    type Error: Send;

    async fn expand(
        &self,
        document: &Value,
        options: &ExpansionOptions,
    ) -> Result<Value, Self::Error>;
}

/// Fetches remote contexts on behalf of an [`Expander`].
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    async fn load(&self, url: &str) -> Result<RemoteDocument, LoaderError>;
}

/// A document retrieved by a [`DocumentLoader`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDocument {
    /// Final URL of the document, after redirects.
    pub document_url: String,
    /// URL of a context linked through an HTTP `Link` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_url: Option<String>,
    pub document: Value,
}

/// JSON-LD processing mode requested from the expander.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessingMode {
    #[serde(rename = "json-ld-1.0")]
    JsonLd10,
    #[default]
    #[serde(rename = "json-ld-1.1")]
    JsonLd11,
}

/// Options handed through to the [`Expander`] untouched.
///
/// All fields except the loader can be read from configuration:
///
/// ```
/// use jsonld_reader::{ExpansionOptions, ProcessingMode};
///
/// let options: ExpansionOptions = serde_json::from_str(
///     r#"{ "base": "https://example.com/", "processingMode": "json-ld-1.0" }"#,
/// ).unwrap();
/// assert_eq!(options.base.as_deref(), Some("https://example.com/"));
/// assert_eq!(options.processing_mode, ProcessingMode::JsonLd10);
/// assert!(options.document_loader.is_none());
/// ```
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpansionOptions {
    /// Base IRI used to resolve relative IRIs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Context applied before the document's own `@context`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand_context: Option<Value>,
    pub processing_mode: ProcessingMode,
    /// Resolver for remote contexts.
    #[serde(skip)]
    pub document_loader: Option<Arc<dyn DocumentLoader>>,
}

impl ExpansionOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    #[must_use]
    pub fn with_expand_context(mut self, context: Value) -> Self {
        self.expand_context = Some(context);
        self
    }

    #[must_use]
    pub fn with_processing_mode(mut self, mode: ProcessingMode) -> Self {
        self.processing_mode = mode;
        self
    }

    #[must_use]
    pub fn with_document_loader(mut self, loader: Arc<dyn DocumentLoader>) -> Self {
        self.document_loader = Some(loader);
        self
    }
}

impl fmt::Debug for ExpansionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpansionOptions")
            .field("base", &self.base)
            .field("expand_context", &self.expand_context)
            .field("processing_mode", &self.processing_mode)
            .field("document_loader", &self.document_loader.is_some())
            .finish()
    }
}

/// Expander for documents that are already in expanded form.
///
/// A lone node-object is wrapped in a one-element sequence; anything else is
/// returned as-is. No context processing happens.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

#[async_trait]
impl Expander for Passthrough {
    type Error = Infallible;

    async fn expand(
        &self,
        document: &Value,
        _options: &ExpansionOptions,
    ) -> Result<Value, Infallible> {
        Ok(match document {
            Value::Object(_) => Value::Array(vec![document.clone()]),
            other => other.clone(),
        })
    }
}

/// Expand `document` and return a reader over the result.
///
/// # Errors
///
/// Returns the expander's error unchanged.
pub async fn parse<E>(
    expander: &E,
    document: &Value,
    options: &ExpansionOptions,
) -> Result<Reader<'static>, E::Error>
where
    E: Expander + ?Sized,
{
    let expanded = expander.expand(document, options).await?;
    tracing::debug!(length = value::length(&expanded), "expanded document");
    Ok(Reader::from_value(expanded))
}
