//! Array expansion (spec.md §4.1, "Array"): folds items left to right into
//! a flat sequence, enforcing the list-of-lists restriction.

use crate::container::Container;
use crate::context::Context;
use crate::error::Error;
use crate::json::{is_list_object, Json};

use super::element::expand_element;

/// Expands each item of `elements` and flattens the results, dropping
/// nulls and splicing nested arrays, exactly as spec.md §4.1's "Array"
/// case describes.
pub fn expand_array(ctx: &Context, active_property: Option<&str>, elements: &[Json]) -> Result<Vec<Json>, Error> {
	let list_container = active_property == Some("@list")
		|| active_property
			.and_then(|p| ctx.term_definition(p))
			.and_then(|def| def.container_mapping)
			== Some(Container::List);

	let mut result = Vec::with_capacity(elements.len());
	for item in elements {
		let expanded = expand_element(ctx, active_property, item)?;

		if expanded.is_null() {
			continue;
		}

		if list_container && (expanded.is_array() || is_list_object(&expanded)) {
			return Err(Error::ListOfLists);
		}

		match expanded {
			Json::Array(items) => result.extend(items),
			other => result.push(other),
		}
	}
	Ok(result)
}
