//! The fixed set of JSON-LD 1.0 keywords this crate understands.

use std::fmt;

/// A JSON-LD keyword recognized by the 1.0 algorithms this crate implements.
///
/// 1.1-only keywords (`@nest`, `@protected`, `@direction`, `@json`, `@import`,
/// `@included`, `@propagate`, `@prefix`, `@version`) are out of scope per
/// `spec.md`'s Non-goals; `is_keyword_like` in [`crate::json`] still treats
/// them (and any other `@letters` token) as reserved so they are never
/// mistaken for an IRI or a term.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Keyword {
	Base,
	Container,
	Context,
	Graph,
	Id,
	Index,
	Language,
	List,
	None,
	Reverse,
	Set,
	Type,
	Value,
	Vocab,
}

impl Keyword {
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::Base => "@base",
			Self::Container => "@container",
			Self::Context => "@context",
			Self::Graph => "@graph",
			Self::Id => "@id",
			Self::Index => "@index",
			Self::Language => "@language",
			Self::List => "@list",
			Self::None => "@none",
			Self::Reverse => "@reverse",
			Self::Set => "@set",
			Self::Type => "@type",
			Self::Value => "@value",
			Self::Vocab => "@vocab",
		}
	}
}

impl TryFrom<&str> for Keyword {
	type Error = NotAKeyword;

	fn try_from(s: &str) -> Result<Self, Self::Error> {
		match s {
			"@base" => Ok(Self::Base),
			"@container" => Ok(Self::Container),
			"@context" => Ok(Self::Context),
			"@graph" => Ok(Self::Graph),
			"@id" => Ok(Self::Id),
			"@index" => Ok(Self::Index),
			"@language" => Ok(Self::Language),
			"@list" => Ok(Self::List),
			"@none" => Ok(Self::None),
			"@reverse" => Ok(Self::Reverse),
			"@set" => Ok(Self::Set),
			"@type" => Ok(Self::Type),
			"@value" => Ok(Self::Value),
			"@vocab" => Ok(Self::Vocab),
			_ => Err(NotAKeyword),
		}
	}
}

impl fmt::Display for Keyword {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotAKeyword;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn round_trips() {
		for kw in [
			Keyword::Base,
			Keyword::Id,
			Keyword::Value,
			Keyword::Reverse,
			Keyword::Vocab,
		] {
			assert_eq!(Keyword::try_from(kw.as_str()), Ok(kw));
		}
	}

	#[test]
	fn rejects_non_keywords() {
		assert!(Keyword::try_from("@nest").is_err());
		assert!(Keyword::try_from("http://example.com").is_err());
	}
}
