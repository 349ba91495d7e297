//! Term container mappings (`@container` in a term definition).

use std::fmt;

/// The container mapping of a term definition (spec.md §3, "Active
/// context"). Only the four 1.0 container types are modeled; `@type`,
/// `@id`, `@graph` and any combination thereof are 1.1 extensions and are
/// out of scope.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Container {
	List,
	Set,
	Language,
	Index,
}

impl Container {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::List => "@list",
			Self::Set => "@set",
			Self::Language => "@language",
			Self::Index => "@index",
		}
	}
}

impl fmt::Display for Container {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl TryFrom<&str> for Container {
	type Error = ();

	fn try_from(s: &str) -> Result<Self, Self::Error> {
		match s {
			"@list" => Ok(Self::List),
			"@set" => Ok(Self::Set),
			"@language" => Ok(Self::Language),
			"@index" => Ok(Self::Index),
			_ => Err(()),
		}
	}
}
