//! Pure helpers over fragments of an expanded document.
//!
//! An expanded document wraps every value position in a one-element array, so
//! most helpers here first look through singleton sequences. [`as_object`] is
//! the single place that decides whether a fragment can be treated as a
//! node-object; the key resolver and the terminal [`unwrap`] both go through
//! it.
//!
//! # Terminal Unwrap
//!
//! | Fragment                       | Unwrapped to          |
//! |--------------------------------|-----------------------|
//! | string / number / bool / null  | itself                |
//! | `[x]`                          | unwrap of `x`         |
//! | `{"@value": v, ...}`           | `v`                   |
//! | `{"@id": iri, ...}`            | `iri`                 |
//! | any other object or sequence   | itself                |
//!
//! ```
//! use jsonld_reader::value::unwrap;
//! use serde_json::json;
//!
//! let literal = json!([{ "@value": "image/png" }]);
//! assert_eq!(unwrap(&literal), &json!("image/png"));
//!
//! let reference = json!([{ "@id": "https://example.com/users/1" }]);
//! assert_eq!(unwrap(&reference), &json!("https://example.com/users/1"));
//! ```

use serde_json::{Map, Number, Value};

use crate::error::{Error, Result};

/// Canonical identifier keyword.
pub const ID: &str = "@id";
/// Canonical type keyword.
pub const TYPE: &str = "@type";
/// Canonical literal-value keyword.
pub const VALUE: &str = "@value";

/// Look through singleton sequences, returning the innermost sole element.
///
/// Sequences of any other length, and non-sequences, are returned as-is.
#[inline]
#[must_use]
pub fn singleton(fragment: &Value) -> &Value {
    peel(fragment).0
}

/// Like [`singleton`], also counting the sequences looked through.
#[must_use]
pub fn peel(fragment: &Value) -> (&Value, usize) {
    let mut current = fragment;
    let mut depth = 0;
    loop {
        match current {
            Value::Array(items) if items.len() == 1 => {
                current = &items[0];
                depth += 1;
            }
            _ => return (current, depth),
        }
    }
}

/// View a fragment as a node-object, looking through singleton sequences.
///
/// # Errors
///
/// Returns `Error::NotAnObject` for scalars, empty sequences and sequences
/// with more than one element.
pub fn as_object(fragment: &Value) -> Result<&Map<String, Value>> {
    match singleton(fragment) {
        Value::Object(node) => Ok(node),
        _ => Err(Error::NotAnObject),
    }
}

/// Effective length of a fragment: the element count of a sequence, else 1.
#[inline]
#[must_use]
pub fn length(fragment: &Value) -> usize {
    match fragment {
        Value::Array(items) => items.len(),
        _ => 1,
    }
}

/// Reduce a fragment to its terminal value.
///
/// Literal wrappers yield their `@value`, references yield their `@id`, and
/// everything else is returned unchanged.
#[must_use]
pub fn unwrap(fragment: &Value) -> &Value {
    let element = singleton(fragment);
    match as_object(element) {
        Ok(node) => node.get(VALUE).or_else(|| node.get(ID)).unwrap_or(element),
        Err(_) => element,
    }
}

/// Segment of `key` after the last `separator`, or the whole key if absent.
#[inline]
#[must_use]
pub fn local_part(key: &str, separator: char) -> &str {
    key.rsplit_once(separator).map_or(key, |(_, tail)| tail)
}

/// Compact a fully-qualified IRI to its trailing name.
///
/// An IRI with exactly one `#` yields the part after it. Otherwise the part
/// after the last `/` is used, and a bare token is returned unchanged.
///
/// ```
/// use jsonld_reader::value::compact_iri;
///
/// assert_eq!(compact_iri("https://example.org/ns#Person"), "Person");
/// assert_eq!(compact_iri("https://example.org/Person"), "Person");
/// assert_eq!(compact_iri("Person"), "Person");
/// ```
#[must_use]
pub fn compact_iri(iri: &str) -> &str {
    if iri.matches('#').count() == 1 {
        local_part(iri, '#')
    } else {
        local_part(iri, '/')
    }
}

/// Reduce a type value to a compact type name.
///
/// Sequences recurse into their first element, literal wrappers yield their
/// embedded `@value`, and strings are compacted with [`compact_iri`]. Empty
/// sequences, other objects and other scalars are returned unchanged.
#[must_use]
pub fn compact_type(value: &Value) -> Value {
    match value {
        Value::Array(items) => items.first().map_or_else(|| value.clone(), compact_type),
        Value::Object(node) => node.get(VALUE).cloned().unwrap_or_else(|| value.clone()),
        Value::String(iri) => Value::String(compact_iri(iri).to_owned()),
        other => other.clone(),
    }
}

/// Render a primitive as a string.
///
/// Integers render exactly. Floats with no fractional part render as
/// integers below `1e21` (`1.0` becomes `"1"`), and in exponent form above.
///
/// # Errors
///
/// Returns `Error::NotAString` for null, sequences and objects.
pub fn coerce_string(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(render_number(n)),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(Error::NotAString),
    }
}

#[allow(clippy::float_cmp)]
fn render_number(n: &Number) -> String {
    match n.as_f64() {
        // Adding zero turns -0 into 0
        Some(x) if n.is_f64() && x.fract() == 0.0 && x.abs() < 1e21 => format!("{:.0}", x + 0.0),
        _ => n.to_string(),
    }
}

/// Read a number, parsing strings as `f64`.
///
/// Surrounding whitespace is ignored. The only spelling of infinity accepted
/// is `Infinity`, optionally signed.
///
/// # Errors
///
/// Returns `Error::NotANumber` if the value is not numeric and its string
/// form does not parse, or parses to NaN.
pub fn coerce_number(value: &Value) -> Result<f64> {
    match value {
        Value::Number(n) => n.as_f64().ok_or(Error::NotANumber),
        Value::String(s) => parse_number(s.trim()).ok_or(Error::NotANumber),
        _ => Err(Error::NotANumber),
    }
}

fn parse_number(s: &str) -> Option<f64> {
    let unsigned = s.trim_start_matches(['+', '-']);
    if unsigned.starts_with(['i', 'I']) && unsigned != "Infinity" {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// Read a boolean from a bool, the tokens `"true"`/`"false"`/`"1"`/`"0"`,
/// or the numbers `1`/`0`.
///
/// # Errors
///
/// Returns `Error::NotABoolean` for anything else.
#[allow(clippy::float_cmp)]
pub fn coerce_boolean(value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(Error::NotABoolean),
        },
        Value::Number(n) => match n.as_f64() {
            Some(x) if x == 1.0 => Ok(true),
            Some(x) if x == 0.0 => Ok(false),
            _ => Err(Error::NotABoolean),
        },
        _ => Err(Error::NotABoolean),
    }
}
