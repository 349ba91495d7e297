//! Top-level dispatch of the Expansion Algorithm (spec.md §4.1): `match`
//! on the shape of `element`, per the teacher's habit of expressing
//! per-clause logic as a `match` over the value rather than a conditional
//! chain (spec.md §9, "Recursive tree transform in a static language").

use crate::context::Context;
use crate::error::Error;
use crate::json::Json;

use super::array::expand_array;
use super::node::expand_node_object;
use super::value::expand_value;

/// `expand_inner` from spec.md §4.1: recursively expands `element` under
/// `active_context`, in the context of `active_property`.
pub fn expand_element(ctx: &Context, active_property: Option<&str>, element: &Json) -> Result<Json, Error> {
	match element {
		Json::Null => Ok(Json::Null),

		Json::Bool(_) | Json::Integer(_) | Json::Double(_) | Json::String(_) => {
			if matches!(active_property, None | Some("@graph")) {
				// A free-floating scalar is dropped.
				Ok(Json::Null)
			} else {
				expand_value(ctx, active_property, element)
			}
		}

		Json::Array(items) => Ok(Json::Array(expand_array(ctx, active_property, items)?)),

		Json::Object(map) => expand_node_object(ctx, active_property, map),
	}
}
