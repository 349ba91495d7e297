//! Options accepted by [`crate::expansion::expand`], [`crate::rdf::to_rdf`]
//! and [`crate::decode`] (spec.md §6, "Options").

use crate::json::Json;

/// Options threaded through a single `expand`/`to_rdf`/`decode` call.
///
/// Unknown options passed through the CLI or a library caller are simply
/// ignored, per spec.md §6.
#[derive(Clone, Debug)]
pub struct Options {
	/// Base IRI used to resolve relative IRI references.
	pub base: Option<String>,

	/// When `false` (the default), triples whose predicate is a blank-node
	/// id are silently dropped during RDF materialization.
	pub produce_generalized_rdf: bool,

	/// Forwarded to `Context::new`; distinct from `base` in the teacher's
	/// API (`document_base` seeds the context, `base` can additionally be
	/// overridden per-call), kept here for parity even though this crate
	/// treats them identically.
	pub document_base: Option<String>,

	/// An inline `@context` value applied before the document's own, as if
	/// it were prepended to it. Remote (string) `@context` values are
	/// rejected by `Context::update` regardless of this option.
	pub expand_context: Option<Json>,

	/// When `true` (the default), iteration over JSON object entries is
	/// forced into lexicographic order everywhere the algorithms require
	/// determinism. The teacher's `json-ld-expansion::Options::ordered`
	/// exists for the same reason, with the same default; spec.md §5
	/// makes ordering a hard requirement, so setting this to `false` is
	/// accepted for API parity but has no effect -- see DESIGN.md.
	pub ordered: bool,
}

impl Default for Options {
	fn default() -> Self {
		Self {
			base: None,
			produce_generalized_rdf: false,
			document_base: None,
			expand_context: None,
			ordered: true,
		}
	}
}

impl Options {
	pub fn with_base(base: impl Into<String>) -> Self {
		Self {
			base: Some(base.into()),
			..Self::default()
		}
	}
}
