//! The error taxonomy (spec.md §7), plus the ambient context-processing and
//! I/O errors a runnable `decode` entry point needs.
//!
//! Every variant carries the offending fragment, as a pretty-printed
//! snippet, for diagnostic rendering -- matching the teacher's habit
//! (`json-ld-expansion::Error`, `json-ld-context-processing::Error`) of
//! attaching context to each error rather than leaving the caller to guess
//! which sub-expression failed.

use crate::json::Json;

/// Errors raised by [`crate::expansion`], [`crate::context`] and
/// [`crate::rdf`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("list of lists")]
	ListOfLists,

	#[error("invalid reverse property map: {0}")]
	InvalidReversePropertyMap(Json),

	#[error("colliding keywords: {0}")]
	CollidingKeywords(String),

	#[error("invalid @id value: {0}")]
	InvalidIdValue(Json),

	#[error("invalid @type value: {0}")]
	InvalidTypeValue(Json),

	#[error("invalid value object value: {0}")]
	InvalidValueObjectValue(Json),

	#[error("invalid language-tagged string: {0}")]
	InvalidLanguageTaggedString(Json),

	#[error("invalid @index value: {0}")]
	InvalidIndexValue(Json),

	#[error("invalid @reverse value: {0}")]
	InvalidReverseValue(Json),

	#[error("invalid reverse property value: {0}")]
	InvalidReversePropertyValue(Json),

	#[error("invalid language map value: {0}")]
	InvalidLanguageMapValue(Json),

	#[error("invalid value object: {0}")]
	InvalidValueObject(Json),

	#[error("invalid language-tagged value: {0}")]
	InvalidLanguageTaggedValue(Json),

	#[error("invalid typed value: {0}")]
	InvalidTypedValue(Json),

	#[error("invalid set or list object: {0}")]
	InvalidSetOrListObject(Json),

	// -- ambient: context construction/update (the concrete "external
	// collaborator" this crate supplies; see SPEC_FULL.md §3.2) --
	#[error("invalid @context value: {0}")]
	InvalidContextValue(Json),

	#[error("invalid base IRI: {0}")]
	InvalidBaseIri(String),

	#[error("invalid vocab mapping: {0}")]
	InvalidVocabMapping(String),

	#[error("invalid term definition for {0:?}: {1}")]
	InvalidTermDefinition(String, Json),

	#[error("cyclic IRI mapping for term {0:?}")]
	CyclicContext(String),

	#[error("loading a remote @context is not supported")]
	RemoteContextUnsupported,

	// -- ambient: decode boundary --
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON syntax error: {0}")]
	Json(#[from] serde_json::Error),
}
