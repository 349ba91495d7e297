//! The generic JSON tree the expansion and to-RDF passes operate over.
//!
//! This is deliberately not `serde_json::Value`: the core never parses JSON
//! itself (that's `decode`'s job, at the outer boundary), and keeping an
//! owned, crate-local tree means the algorithm code doesn't carry a `serde`
//! dependency through its signatures.

use indexmap::IndexMap;
use std::fmt;

use crate::keyword::Keyword;

/// A JSON value, as consumed by [`crate::expansion`] and [`crate::rdf`].
///
/// `Object` preserves insertion order (backed by [`IndexMap`]), but callers
/// that need the lexicographic iteration the JSON-LD algorithms require
/// should go through [`sorted_entries`] rather than iterating the map
/// directly.
#[derive(Clone, Debug, PartialEq)]
pub enum Json {
	Null,
	Bool(bool),
	Integer(i64),
	Double(f64),
	String(String),
	Array(Vec<Json>),
	Object(IndexMap<String, Json>),
}

impl Json {
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_array(&self) -> Option<&[Json]> {
		match self {
			Self::Array(a) => Some(a),
			_ => None,
		}
	}

	pub fn as_object(&self) -> Option<&IndexMap<String, Json>> {
		match self {
			Self::Object(o) => Some(o),
			_ => None,
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	pub fn is_object(&self) -> bool {
		matches!(self, Self::Object(_))
	}

	pub fn is_array(&self) -> bool {
		matches!(self, Self::Array(_))
	}

	/// `true` for strings, numbers and booleans: the values that can occur
	/// bare (outside a value object) in a JSON-LD document.
	pub fn is_scalar(&self) -> bool {
		matches!(self, Self::Bool(_) | Self::Integer(_) | Self::Double(_) | Self::String(_))
	}

	/// Wraps a bare value into a singleton array, unless it already is one.
	pub fn into_array(self) -> Vec<Json> {
		match self {
			Self::Array(a) => a,
			Self::Null => Vec::new(),
			other => vec![other],
		}
	}

	/// The inverse of [`Json::from_serde`], used at the CLI/decode boundary
	/// to print a result with `serde_json`'s pretty-printer.
	pub fn to_serde(&self) -> serde_json::Value {
		match self {
			Self::Null => serde_json::Value::Null,
			Self::Bool(b) => serde_json::Value::Bool(*b),
			Self::Integer(i) => serde_json::Value::Number((*i).into()),
			Self::Double(d) => serde_json::Number::from_f64(*d)
				.map(serde_json::Value::Number)
				.unwrap_or(serde_json::Value::Null),
			Self::String(s) => serde_json::Value::String(s.clone()),
			Self::Array(a) => serde_json::Value::Array(a.iter().map(Json::to_serde).collect()),
			Self::Object(o) => {
				serde_json::Value::Object(o.iter().map(|(k, v)| (k.clone(), v.to_serde())).collect())
			}
		}
	}

	pub fn from_serde(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => Self::Null,
			serde_json::Value::Bool(b) => Self::Bool(b),
			serde_json::Value::Number(n) => {
				if let Some(i) = n.as_i64() {
					Self::Integer(i)
				} else {
					Self::Double(n.as_f64().unwrap_or(f64::NAN))
				}
			}
			serde_json::Value::String(s) => Self::String(s),
			serde_json::Value::Array(a) => Self::Array(a.into_iter().map(Self::from_serde).collect()),
			serde_json::Value::Object(o) => {
				Self::Object(o.into_iter().map(|(k, v)| (k, Self::from_serde(v))).collect())
			}
		}
	}
}

impl fmt::Display for Json {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => write!(f, "null"),
			Self::Bool(b) => write!(f, "{b}"),
			Self::Integer(i) => write!(f, "{i}"),
			Self::Double(d) => write!(f, "{d}"),
			Self::String(s) => write!(f, "{s:?}"),
			Self::Array(_) | Self::Object(_) => write!(f, "{self:?}"),
		}
	}
}

impl From<String> for Json {
	fn from(s: String) -> Self {
		Self::String(s)
	}
}

impl From<&str> for Json {
	fn from(s: &str) -> Self {
		Self::String(s.to_owned())
	}
}

/// Iterates `object`'s entries in lexicographic order of keys.
///
/// The expansion algorithm (step 6, "For each key and value in element,
/// ordered lexicographically by key") and the to-RDF materialization pass
/// (graph/subject/property iteration, §4.3) both require this; hash-order
/// iteration over the backing map would make blank-node numbering and
/// fixture output non-deterministic.
pub fn sorted_entries(object: &IndexMap<String, Json>) -> Vec<(&str, &Json)> {
	let mut entries: Vec<_> = object.iter().map(|(k, v)| (k.as_str(), v)).collect();
	entries.sort_by(|(a, _), (b, _)| a.cmp(b));
	entries
}

pub fn sorted_keys<V>(map: &IndexMap<String, V>) -> Vec<&str> {
	let mut keys: Vec<_> = map.keys().map(String::as_str).collect();
	keys.sort_unstable();
	keys
}

/// `true` if `s` looks like a blank node identifier (`_:...`).
pub fn is_blank_node_id(s: &str) -> bool {
	s.starts_with("_:")
}

/// `true` if `s` is one of the fixed JSON-LD keywords, or a "keyword-like"
/// reserved token (`@` followed only by ASCII letters).
pub fn is_keyword(s: &str) -> bool {
	Keyword::try_from(s).is_ok() || is_keyword_like(s)
}

/// `@` followed by one or more ASCII letters: reserved for future keywords
/// even when not one of the keywords this crate recognizes.
pub fn is_keyword_like(s: &str) -> bool {
	let mut chars = s.chars();
	if chars.next() != Some('@') {
		return false;
	}
	let rest: &str = chars.as_str();
	!rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphabetic())
}

/// `true` if `s` cannot be resolved to an absolute IRI and is not a blank
/// node identifier: i.e. it is a relative IRI reference.
pub fn is_relative_iri(s: &str) -> bool {
	if is_blank_node_id(s) {
		return false;
	}
	iref::Iri::new(s).is_err()
}

/// `true` if `s` parses as an absolute IRI.
pub fn is_absolute_iri(s: &str) -> bool {
	!is_blank_node_id(s) && iref::Iri::new(s).is_ok()
}

/// `true` if `value` is a list object (a mapping with an `@list` entry).
pub fn is_list_object(value: &Json) -> bool {
	matches!(value, Json::Object(o) if o.contains_key("@list"))
}

/// `true` if `value` is a value object (a mapping with an `@value` entry).
pub fn is_value_object(value: &Json) -> bool {
	matches!(value, Json::Object(o) if o.contains_key("@value"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keyword_like_detection() {
		assert!(is_keyword_like("@foo"));
		assert!(!is_keyword_like("@"));
		assert!(!is_keyword_like("@1"));
		assert!(!is_keyword_like("foo"));
	}

	#[test]
	fn blank_node_detection() {
		assert!(is_blank_node_id("_:b0"));
		assert!(!is_blank_node_id("http://example/b0"));
	}

	#[test]
	fn relative_iri_detection() {
		assert!(is_relative_iri("relative/path"));
		assert!(!is_relative_iri("http://example.com/"));
		assert!(!is_relative_iri("_:b0"));
	}
}
