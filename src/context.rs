//! A minimal, JSON-LD-1.0-scoped active context: construction, update and
//! IRI expansion.
//!
//! spec.md calls active-context construction/update and the IRI-expansion
//! helper "external collaborators, contract only" -- this crate is the
//! outermost layer that needs to actually run end to end, so it supplies a
//! concrete (if deliberately narrow) implementation of that contract rather
//! than leaving `decode` with nothing to call. Scoped/protected contexts,
//! `@import`, `@propagate`, `@nest`, `@direction` and `@json` type mapping
//! are 1.1 features and are not implemented (spec.md Non-goals).

use indexmap::IndexMap;

use crate::container::Container;
use crate::error::Error;
use crate::json::{is_keyword_like, sorted_entries, Json};
use crate::keyword::Keyword;
use crate::options::Options;

/// `None` means "unset" (falls back to the context default); `Explicit(None)`
/// is the `@language: null` / `false` sentinel meaning "explicitly no
/// language for this term", distinct from "unset".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LanguageMapping {
	Unset,
	None,
	Some(String),
}

/// A single term's definition within an active context (spec.md §3).
#[derive(Clone, Debug)]
pub struct TermDefinition {
	pub iri_mapping: String,
	pub type_mapping: Option<String>,
	pub language_mapping: LanguageMapping,
	pub container_mapping: Option<Container>,
	pub reverse_property: bool,
}

/// An immutable active context (spec.md §3).
///
/// `Context::update` never mutates `self`; it returns a new context, so a
/// caller's copy of an active context is never invalidated by a nested
/// `@context` update -- matching spec.md §5's "the active context is treated
/// as immutable".
#[derive(Clone, Debug, Default)]
pub struct Context {
	term_defs: IndexMap<String, TermDefinition>,
	pub default_language: Option<String>,
	pub base_iri: Option<String>,
	pub vocabulary_mapping: Option<String>,
}

/// Extracts the compact-IRI prefix from a term definition's `@id`/`@reverse`
/// (or bare string) value, if it has one -- the same split `expand_iri`
/// uses, pulled out here so dependency resolution can check whether that
/// prefix is itself a term defined in the same `@context` object.
fn compact_iri_prefix(value: &Json) -> Option<&str> {
	let candidate = match value {
		Json::String(s) => s.as_str(),
		Json::Object(def) => match (def.get("@id"), def.get("@reverse")) {
			(Some(Json::String(s)), _) => s.as_str(),
			(_, Some(Json::String(s))) => s.as_str(),
			_ => return None,
		},
		_ => return None,
	};
	let idx = candidate.find(':')?;
	let (prefix, suffix) = (&candidate[..idx], &candidate[idx + 1..]);
	if prefix == "_" || suffix.starts_with("//") {
		return None;
	}
	Some(prefix)
}

impl Context {
	/// Builds the initial active context for a `decode`/`to_rdf` call.
	pub fn new(options: &Options) -> Result<Self, Error> {
		let mut context = Self {
			base_iri: options.base.clone().or_else(|| options.document_base.clone()),
			..Self::default()
		};
		if let Some(expand_context) = &options.expand_context {
			context = context.update(expand_context)?;
		}
		Ok(context)
	}

	pub fn term_definition(&self, term: &str) -> Option<&TermDefinition> {
		self.term_defs.get(term)
	}

	/// Applies a `@context` value on top of `self`, returning the resulting
	/// context. Implements the subset of the Context Processing algorithm
	/// this crate supports: context nulling, array-of-contexts folding,
	/// `@base`/`@vocab`/`@language`, and simple (non-scoped) term
	/// definitions, either `"term": "iri-or-compact-iri"` or
	/// `"term": {"@id", "@type", "@container", "@reverse", "@language"}`.
	pub fn update(&self, context_value: &Json) -> Result<Self, Error> {
		match context_value {
			Json::Null => Ok(Self {
				base_iri: self.base_iri.clone(),
				..Self::default()
			}),
			Json::Array(contexts) => {
				let mut result = self.clone();
				for c in contexts {
					result = result.update(c)?;
				}
				Ok(result)
			}
			Json::String(_) => Err(Error::RemoteContextUnsupported),
			Json::Object(map) => self.update_from_object(map),
			other => Err(Error::InvalidContextValue(other.clone())),
		}
	}

	fn update_from_object(&self, map: &IndexMap<String, Json>) -> Result<Self, Error> {
		let mut result = self.clone();

		if let Some(base) = map.get("@base") {
			result.base_iri = match base {
				Json::Null => None,
				Json::String(s) => Some(self.resolve_against_base(s)),
				other => return Err(Error::InvalidBaseIri(other.to_string())),
			};
		}

		if let Some(vocab) = map.get("@vocab") {
			result.vocabulary_mapping = match vocab {
				Json::Null => None,
				Json::String(s) => Some(s.clone()),
				other => return Err(Error::InvalidVocabMapping(other.to_string())),
			};
		}

		if let Some(language) = map.get("@language") {
			result.default_language = match language {
				Json::Null => None,
				Json::String(s) => Some(Self::normalize_language_tag(s)),
				other => return Err(Error::InvalidContextValue(other.clone())),
			};
		}

		let mut defined: IndexMap<String, bool> = IndexMap::new();
		for (term, _) in sorted_entries(map) {
			if matches!(term, "@base" | "@vocab" | "@language" | "@context") || is_keyword_like(term) {
				continue;
			}
			result.create_term_definition(term, map, &mut defined)?;
		}

		Ok(result)
	}

	/// Defines `term`, following §6.2's recursive "Create Term Definition"
	/// shape: a term whose `@id`/`@reverse` is a compact IRI prefixed by
	/// another term from the same `@context` object is resolved only after
	/// that other term is, tracked via `defined` (absent: not started,
	/// `false`: in progress, `true`: done) -- a term re-entered while still
	/// in progress is a cyclic IRI mapping.
	fn create_term_definition(
		&mut self,
		term: &str,
		local_context: &IndexMap<String, Json>,
		defined: &mut IndexMap<String, bool>,
	) -> Result<(), Error> {
		match defined.get(term) {
			Some(true) => return Ok(()),
			Some(false) => return Err(Error::CyclicContext(term.to_owned())),
			None => {}
		}
		defined.insert(term.to_owned(), false);

		let Some(value) = local_context.get(term) else {
			defined.insert(term.to_owned(), true);
			return Ok(());
		};

		if let Some(prefix) = compact_iri_prefix(value) {
			if prefix != term && local_context.contains_key(prefix) {
				self.create_term_definition(prefix, local_context, defined)?;
			}
		}

		self.define_term(term, value)?;
		defined.insert(term.to_owned(), true);
		Ok(())
	}

	fn define_term(&mut self, term: &str, value: &Json) -> Result<(), Error> {
		match value {
			Json::Null => {
				self.term_defs.shift_remove(term);
			}
			Json::String(iri) => {
				let iri_mapping = self.expand_term_iri(iri)?;
				self.term_defs.insert(
					term.to_owned(),
					TermDefinition {
						iri_mapping,
						type_mapping: None,
						language_mapping: LanguageMapping::Unset,
						container_mapping: None,
						reverse_property: false,
					},
				);
			}
			Json::Object(def) => {
				let (iri_mapping, reverse_property) = if let Some(Json::String(rev)) = def.get("@reverse") {
					(self.expand_term_iri(rev)?, true)
				} else if let Some(Json::String(id)) = def.get("@id") {
					(self.expand_term_iri(id)?, false)
				} else {
					(self.expand_term_iri(term)?, false)
				};

				let type_mapping = match def.get("@type") {
					None | Some(Json::Null) => None,
					Some(Json::String(t)) if t == "@id" || t == "@vocab" => Some(t.clone()),
					Some(Json::String(t)) => Some(
						self.expand_iri(t, false, true)
							.ok_or_else(|| Error::InvalidTermDefinition(term.to_owned(), value.clone()))?,
					),
					Some(other) => return Err(Error::InvalidTermDefinition(term.to_owned(), other.clone())),
				};

				let language_mapping = match def.get("@language") {
					None => LanguageMapping::Unset,
					Some(Json::Null) => LanguageMapping::None,
					Some(Json::Bool(false)) => LanguageMapping::None,
					Some(Json::String(l)) => LanguageMapping::Some(Self::normalize_language_tag(l)),
					Some(other) => return Err(Error::InvalidTermDefinition(term.to_owned(), other.clone())),
				};

				let container_mapping = match def.get("@container") {
					None | Some(Json::Null) => None,
					Some(Json::String(c)) => Some(
						Container::try_from(c.as_str())
							.map_err(|_| Error::InvalidTermDefinition(term.to_owned(), value.clone()))?,
					),
					Some(other) => return Err(Error::InvalidTermDefinition(term.to_owned(), other.clone())),
				};

				self.term_defs.insert(
					term.to_owned(),
					TermDefinition {
						iri_mapping,
						type_mapping,
						language_mapping,
						container_mapping,
						reverse_property,
					},
				);
			}
			other => return Err(Error::InvalidTermDefinition(term.to_owned(), other.clone())),
		}
		Ok(())
	}

	/// IRI-expands the `@id`/`@reverse` value of a term definition: vocab
	/// relative, not document relative (§6.4 "Create Term Definition",
	/// IRI-expand with `vocab: true`).
	fn expand_term_iri(&self, value: &str) -> Result<String, Error> {
		self.expand_iri(value, false, true)
			.ok_or_else(|| Error::InvalidTermDefinition(value.to_owned(), Json::String(value.to_owned())))
	}

	/// Lowercases `tag` per spec.md's "language tags are compared/stored in
	/// lowercase" rule, logging (not rejecting) a malformed tag. JSON-LD 1.0
	/// is lenient here -- a malformed tag is still stored and used, the same
	/// way the teacher's `LenientLanguageTagBuf` keeps a `Malformed` variant
	/// around rather than failing processing.
	pub(crate) fn normalize_language_tag(tag: &str) -> String {
		if let Err(e) = langtag::LanguageTagBuf::parse_copy(tag) {
			log::warn!("malformed language tag `{tag}`: {e}");
		}
		tag.to_lowercase()
	}

	fn resolve_against_base(&self, value: &str) -> String {
		match (iref::IriRef::new(value), self.base_iri.as_deref().and_then(|b| iref::Iri::new(b).ok())) {
			(Ok(iri_ref), Some(base)) => iri_ref.resolved(base).into_string(),
			_ => value.to_owned(),
		}
	}

	/// IRI expansion (spec.md §6 `IRI-expand`): resolves a term, compact
	/// IRI, or relative/absolute IRI reference against this context.
	pub fn expand_iri(&self, value: &str, document_relative: bool, vocab: bool) -> Option<String> {
		if Keyword::try_from(value).is_ok() || is_keyword_like(value) {
			return Some(value.to_owned());
		}

		if vocab {
			if let Some(def) = self.term_defs.get(value) {
				return Some(def.iri_mapping.clone());
			}
		}

		if crate::json::is_blank_node_id(value) {
			return Some(value.to_owned());
		}

		if let Some(idx) = value.find(':') {
			let (prefix, suffix) = (&value[..idx], &value[idx + 1..]);
			if prefix != "_" && !suffix.starts_with("//") {
				if let Some(def) = self.term_defs.get(prefix) {
					if Keyword::try_from(def.iri_mapping.as_str()).is_err() {
						return Some(format!("{}{}", def.iri_mapping, suffix));
					}
				}
			}
			if crate::json::is_absolute_iri(value) {
				return Some(value.to_owned());
			}
		}

		if vocab {
			if let Some(vocab_mapping) = &self.vocabulary_mapping {
				return Some(format!("{vocab_mapping}{value}"));
			}
		}

		if document_relative {
			return Some(self.resolve_against_base(value));
		}

		Some(value.to_owned())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn simple_term_expands_to_its_iri() {
		let ctx = Context::default()
			.update(&Json::Object(IndexMap::from([(
				"name".to_owned(),
				Json::String("http://schema.org/name".to_owned()),
			)])))
			.unwrap();
		assert_eq!(
			ctx.expand_iri("name", false, true),
			Some("http://schema.org/name".to_owned())
		);
	}

	#[test]
	fn vocab_mapping_expands_bare_terms() {
		let ctx = Context::default()
			.update(&Json::Object(IndexMap::from([(
				"@vocab".to_owned(),
				Json::String("http://schema.org/".to_owned()),
			)])))
			.unwrap();
		assert_eq!(
			ctx.expand_iri("name", false, true),
			Some("http://schema.org/name".to_owned())
		);
	}

	#[test]
	fn remote_context_is_rejected() {
		let ctx = Context::default();
		assert!(matches!(
			ctx.update(&Json::String("http://example.com/context.jsonld".to_owned())),
			Err(Error::RemoteContextUnsupported)
		));
	}

	#[test]
	fn language_tags_are_lowercased_even_when_malformed() {
		assert_eq!(Context::normalize_language_tag("EN-us"), "en-us");
		assert_eq!(Context::normalize_language_tag("not_a_tag"), "not_a_tag");
	}

	#[test]
	fn a_term_resolves_a_dependency_defined_later_in_lexicographic_order() {
		// "a" depends on "b" for its compact-IRI prefix, but "a" < "b"
		// lexicographically -- a naive single-pass, sorted-order resolution
		// would expand "a" against an as-yet-undefined "b".
		let ctx = Context::default()
			.update(&Json::Object(IndexMap::from([
				("a".to_owned(), Json::String("b:foo".to_owned())),
				("b".to_owned(), Json::String("http://example/".to_owned())),
			])))
			.unwrap();
		assert_eq!(
			ctx.expand_iri("a", false, true),
			Some("http://example/foo".to_owned())
		);
	}

	#[test]
	fn mutually_dependent_terms_are_rejected_as_a_cyclic_context() {
		let result = Context::default().update(&Json::Object(IndexMap::from([
			("term1".to_owned(), Json::String("term2:x".to_owned())),
			("term2".to_owned(), Json::String("term1:y".to_owned())),
		])));
		assert!(matches!(result, Err(Error::CyclicContext(_))));
	}

	#[test]
	fn null_context_resets_but_keeps_base() {
		let mut ctx = Context::default();
		ctx.base_iri = Some("http://example.com/".to_owned());
		let reset = ctx.update(&Json::Null).unwrap();
		assert_eq!(reset.base_iri, Some("http://example.com/".to_owned()));
		assert!(reset.term_definition("name").is_none());
	}
}
