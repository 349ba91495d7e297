//! The blank-node identifier generator (spec.md §3, "Blank-node identifier
//! map").
//!
//! A single [`BlankIdGenerator`] is created per [`crate::rdf::to_rdf`]
//! invocation and threaded by mutable reference through node-map generation
//! and list materialization, so that both draw from the same monotone
//! counter. It owns no external resource, so "teardown on all exit paths"
//! just falls out of ordinary drop semantics -- there is nothing to leak.

/// Produces fresh, sequential blank-node identifiers `_:b0`, `_:b1`, ...
#[derive(Default, Debug)]
pub struct BlankIdGenerator {
	next: u64,
}

impl BlankIdGenerator {
	pub fn new() -> Self {
		Self::default()
	}

	/// Allocates and returns a fresh identifier, e.g. `"_:b0"`.
	pub fn fresh(&mut self) -> String {
		let id = format!("_:b{}", self.next);
		self.next += 1;
		id
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ids_are_sequential_and_unique() {
		let mut gen = BlankIdGenerator::new();
		assert_eq!(gen.fresh(), "_:b0");
		assert_eq!(gen.fresh(), "_:b1");
		assert_eq!(gen.fresh(), "_:b2");
	}
}
