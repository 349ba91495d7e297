//! The Expansion Algorithm (spec.md §4.1): a recursive, purely value-level
//! rewrite of a generic JSON tree into JSON-LD's expanded form.

mod array;
mod element;
mod node;
mod value;

pub use element::expand_element;
pub use value::expand_value;

use crate::context::Context;
use crate::error::Error;
use crate::json::Json;
use crate::options::Options;

/// `expand(input, options) -> sequence of node objects` (spec.md §4.1,
/// "Public contract").
pub fn expand(input: &Json, options: &Options) -> Result<Vec<Json>, Error> {
	let ctx = Context::new(options)?;
	let expanded = expand_element(&ctx, None, input)?;

	let items = match expanded {
		Json::Null => Vec::new(),
		Json::Array(items) => items,
		other => vec![other],
	};

	// "If the top-level expansion returns a single mapping containing only
	// @graph, the sequence is that @graph's contents."
	if let [Json::Object(map)] = items.as_slice() {
		if map.len() == 1 {
			if let Some(Json::Array(graph_items)) = map.get("@graph") {
				return Ok(graph_items.clone());
			}
		}
	}

	Ok(items)
}
