//! Node object expansion (spec.md §4.1, "Mapping"): the keyword branch,
//! the term branch, and the post-processing steps.

use indexmap::IndexMap;

use crate::container::Container;
use crate::context::Context;
use crate::error::Error;
use crate::json::{is_absolute_iri, is_blank_node_id, is_list_object, is_value_object, sorted_entries, Json};
use crate::keyword::Keyword;

use super::element::expand_element;

/// Outcome of handling one keyword entry, following the `{:skip,
/// new_result}` sentinel the source threads through this branch (spec.md
/// §9, "Skip sentinel"): a clean re-implementation models it as this small
/// enum rather than an out-of-band flag.
enum KeywordOutcome {
	/// Nothing to add to `result` (e.g. a free-floating `@list`, or an
	/// unrecognized `@`-prefixed token).
	Skip,
	/// Set `result[key]` to this value.
	Set(&'static str, Json),
}

fn push_into(map: &mut IndexMap<String, Json>, key: &str, item: Json) {
	match map.get_mut(key) {
		Some(Json::Array(arr)) => arr.push(item),
		Some(_) => {}
		None => {
			map.insert(key.to_owned(), Json::Array(vec![item]));
		}
	}
}

fn merge_items_into(map: &mut IndexMap<String, Json>, key: &str, value: Json) {
	for item in value.into_array() {
		push_into(map, key, item);
	}
}

/// Expands a node object, value object, list object or reverse map
/// (spec.md §4.1's "Mapping" case), in the context of `active_property`.
pub fn expand_node_object(
	ctx: &Context,
	active_property: Option<&str>,
	map: &IndexMap<String, Json>,
) -> Result<Json, Error> {
	// Step 1: update the active context with this object's own `@context`,
	// if any.
	let active_context = match map.get("@context") {
		Some(context_value) => ctx.update(context_value)?,
		None => ctx.clone(),
	};

	let mut result: IndexMap<String, Json> = IndexMap::new();
	let mut reverse_result: IndexMap<String, Json> = IndexMap::new();
	// `@reverse` is folded into `result["@reverse"]` only once, after the
	// whole entry loop finishes, and `reverse_result` also legitimately
	// accumulates entries from ordinary reverse-property terms -- so a
	// second key aliased to the `@reverse` keyword can't be detected via
	// `result`/`reverse_result` contents and needs its own seen-flag.
	let mut seen_reverse_keyword = false;

	// Step 2: iterate entries in lexicographic order of key.
	for (key, value) in sorted_entries(map) {
		// Step 2 (continued): `@context` is handled above, skip it here.
		if key == "@context" {
			continue;
		}

		// Step 3: expand the key itself as an IRI.
		let expanded_property = match active_context.expand_iri(key, false, true) {
			Some(p) if !p.is_empty() => p,
			_ => continue,
		};

		if let Ok(keyword) = Keyword::try_from(expanded_property.as_str()) {
			if active_property == Some("@reverse") && keyword != Keyword::Context {
				return Err(Error::InvalidReversePropertyMap(value.clone()));
			}

			let collides = if keyword == Keyword::Reverse {
				let seen_before = seen_reverse_keyword;
				seen_reverse_keyword = true;
				seen_before
			} else {
				matches!(
					keyword,
					Keyword::Id
						| Keyword::Type | Keyword::Graph
						| Keyword::Value | Keyword::Language
						| Keyword::Index | Keyword::List
						| Keyword::Set
				) && result.contains_key(keyword.as_str())
			};
			if collides {
				return Err(Error::CollidingKeywords(keyword.as_str().to_owned()));
			}

			match handle_keyword(&active_context, active_property, keyword, value, &mut result, &mut reverse_result)?
			{
				KeywordOutcome::Skip => {}
				KeywordOutcome::Set(k, v) => {
					result.insert(k.to_owned(), v);
				}
			}
			continue;
		}

		// Step 5: term branch -- `expanded_property` must be an absolute
		// IRI or a blank node id, otherwise the entry is discarded.
		if !(is_absolute_iri(&expanded_property) || is_blank_node_id(&expanded_property)) {
			continue;
		}

		let term_def = active_context.term_definition(key);
		let container = term_def.and_then(|def| def.container_mapping);
		let is_reverse_property = term_def.map(|def| def.reverse_property).unwrap_or(false);

		let mut expanded_values = expand_term_value(&active_context, key, value, container)?;

		for item in expanded_values.drain(..) {
			if item.is_null() {
				continue;
			}

			let item = if container == Some(Container::List) && !is_list_object(&item) {
				Json::Object(IndexMap::from([("@list".to_owned(), Json::Array(vec![item]))]))
			} else {
				item
			};

			if is_reverse_property {
				if is_value_object(&item) || is_list_object(&item) {
					return Err(Error::InvalidReversePropertyValue(item));
				}
				push_into(&mut reverse_result, &expanded_property, item);
			} else {
				push_into(&mut result, &expanded_property, item);
			}
		}
	}

	if !reverse_result.is_empty() {
		result.insert("@reverse".to_owned(), Json::Object(reverse_result));
	}

	post_process(active_property, result)
}

/// Expands the value of a term entry, honoring `@language`/`@index`
/// container maps (spec.md §4.1 step 5).
fn expand_term_value(
	ctx: &Context,
	key: &str,
	value: &Json,
	container: Option<Container>,
) -> Result<Vec<Json>, Error> {
	match container {
		Some(Container::Language) => {
			let language_map = value
				.as_object()
				.ok_or_else(|| Error::InvalidLanguageMapValue(value.clone()))?;
			let mut out = Vec::new();
			for (language_tag, entry) in sorted_entries(language_map) {
				let items: Vec<&Json> = match entry {
					Json::Array(a) => a.iter().collect(),
					other => vec![other],
				};
				for item in items {
					let s = item
						.as_str()
						.ok_or_else(|| Error::InvalidLanguageMapValue(item.clone()))?;
					out.push(Json::Object(IndexMap::from([
						("@value".to_owned(), Json::String(s.to_owned())),
						("@language".to_owned(), Json::String(language_tag.to_lowercase())),
					])));
				}
			}
			Ok(out)
		}
		Some(Container::Index) => {
			let index_map = value.as_object().ok_or_else(|| Error::InvalidIndexValue(value.clone()))?;
			let mut out = Vec::new();
			for (index, entry) in sorted_entries(index_map) {
				let expanded = expand_element(ctx, Some(key), entry)?;
				for mut item in expanded.into_array() {
					if let Json::Object(obj) = &mut item {
						obj.entry("@index".to_owned()).or_insert_with(|| Json::String(index.to_owned()));
					}
					out.push(item);
				}
			}
			Ok(out)
		}
		_ => {
			let expanded = expand_element(ctx, Some(key), value)?;
			Ok(expanded.into_array())
		}
	}
}

fn handle_keyword(
	ctx: &Context,
	active_property: Option<&str>,
	keyword: Keyword,
	value: &Json,
	result: &mut IndexMap<String, Json>,
	reverse_result: &mut IndexMap<String, Json>,
) -> Result<KeywordOutcome, Error> {
	match keyword {
		Keyword::Id => {
			let id = value.as_str().ok_or_else(|| Error::InvalidIdValue(value.clone()))?;
			let expanded_id = ctx.expand_iri(id, true, false).unwrap_or_else(|| id.to_owned());
			Ok(KeywordOutcome::Set("@id", Json::String(expanded_id)))
		}

		Keyword::Type => {
			let types: Vec<&str> = match value {
				Json::String(s) => vec![s.as_str()],
				Json::Array(items) => items
					.iter()
					.map(|item| item.as_str().ok_or_else(|| Error::InvalidTypeValue(value.clone())))
					.collect::<Result<_, _>>()?,
				_ => return Err(Error::InvalidTypeValue(value.clone())),
			};
			let expanded_types = types
				.into_iter()
				.map(|t| Json::String(ctx.expand_iri(t, true, true).unwrap_or_else(|| t.to_owned())))
				.collect();
			Ok(KeywordOutcome::Set("@type", Json::Array(expanded_types)))
		}

		Keyword::Graph => {
			let expanded = expand_element(ctx, Some("@graph"), value)?;
			Ok(KeywordOutcome::Set("@graph", Json::Array(expanded.into_array())))
		}

		Keyword::Value => match value {
			Json::Null => Ok(KeywordOutcome::Set("@value", Json::Null)),
			v if v.is_scalar() => Ok(KeywordOutcome::Set("@value", v.clone())),
			_ => Err(Error::InvalidValueObjectValue(value.clone())),
		},

		Keyword::Language => {
			let language = value
				.as_str()
				.ok_or_else(|| Error::InvalidLanguageTaggedString(value.clone()))?;
			Ok(KeywordOutcome::Set(
				"@language",
				Json::String(Context::normalize_language_tag(language)),
			))
		}

		Keyword::Index => {
			let index = value.as_str().ok_or_else(|| Error::InvalidIndexValue(value.clone()))?;
			Ok(KeywordOutcome::Set("@index", Json::String(index.to_owned())))
		}

		Keyword::List => {
			if matches!(active_property, None | Some("@graph")) {
				// Free-floating list: dropped.
				return Ok(KeywordOutcome::Skip);
			}
			let expanded = expand_element(ctx, Some("@list"), value)?;
			let items = expanded.into_array();
			for item in &items {
				if item.is_array() || is_list_object(item) {
					return Err(Error::ListOfLists);
				}
			}
			Ok(KeywordOutcome::Set("@list", Json::Array(items)))
		}

		Keyword::Set => {
			let expanded = expand_element(ctx, active_property, value)?;
			Ok(KeywordOutcome::Set("@set", Json::Array(expanded.into_array())))
		}

		Keyword::Reverse => {
			let reverse_map = value.as_object().ok_or_else(|| Error::InvalidReverseValue(value.clone()))?;
			let expanded = expand_node_object(ctx, Some("@reverse"), reverse_map)?;
			let Json::Object(expanded_map) = expanded else {
				return Ok(KeywordOutcome::Skip);
			};

			for (k, v) in &expanded_map {
				if k == "@reverse" {
					// Double reversal: merge directly, un-reversed.
					if let Json::Object(double_reversed) = v {
						for (k2, v2) in double_reversed {
							merge_items_into(result, k2, v2.clone());
						}
					}
					continue;
				}

				let items: Vec<&Json> = match v {
					Json::Array(a) => a.iter().collect(),
					other => vec![other],
				};
				for item in &items {
					if is_value_object(item) || is_list_object(item) {
						return Err(Error::InvalidReversePropertyValue((*item).clone()));
					}
				}
				merge_items_into(reverse_result, k, v.clone());
			}

			Ok(KeywordOutcome::Skip)
		}

		// `@base`, `@vocab`, `@container` and a bare `@none`/`@context` in
		// entry position carry no meaning here: skip.
		Keyword::Base | Keyword::Vocab | Keyword::Container | Keyword::None | Keyword::Context => {
			Ok(KeywordOutcome::Skip)
		}
	}
}

/// Steps 6-8 of spec.md §4.1's "Mapping" case.
fn post_process(active_property: Option<&str>, result: IndexMap<String, Json>) -> Result<Json, Error> {
	if result.contains_key("@value") {
		for key in result.keys() {
			if !matches!(key.as_str(), "@value" | "@language" | "@type" | "@index") {
				return Err(Error::InvalidValueObject(Json::Object(result)));
			}
		}
		if result.contains_key("@language") && result.contains_key("@type") {
			return Err(Error::InvalidValueObject(Json::Object(result)));
		}
		if matches!(result.get("@value"), Some(Json::Null)) {
			return Ok(Json::Null);
		}
		if result.contains_key("@language") && !matches!(result.get("@value"), Some(Json::String(_))) {
			return Err(Error::InvalidLanguageTaggedValue(Json::Object(result)));
		}
		if let Some(ty) = result.get("@type") {
			if !ty.as_str().is_some_and(is_absolute_iri) {
				return Err(Error::InvalidTypedValue(Json::Object(result)));
			}
		}
	} else if result.contains_key("@set") {
		for key in result.keys() {
			if !matches!(key.as_str(), "@set" | "@index") {
				return Err(Error::InvalidSetOrListObject(Json::Object(result)));
			}
		}
		// Step 6: "replace result with the `@set` value" -- the wrapper
		// itself carries no further meaning once validated.
		let mut result = result;
		return Ok(result.swap_remove("@set").unwrap_or(Json::Array(Vec::new())));
	} else if result.contains_key("@list") {
		for key in result.keys() {
			if !matches!(key.as_str(), "@list" | "@index") {
				return Err(Error::InvalidSetOrListObject(Json::Object(result)));
			}
		}
	}

	// Step 7: a lone `@language` entry (from a value object whose `@value`
	// was dropped elsewhere) collapses to null.
	if result.len() == 1 && result.contains_key("@language") {
		return Ok(Json::Null);
	}

	// Step 8: drop free-floating node objects.
	if matches!(active_property, None | Some("@graph")) {
		let drop = result.is_empty()
			|| result.contains_key("@value")
			|| result.contains_key("@list")
			|| (result.len() == 1 && result.contains_key("@id"));
		if drop {
			return Ok(Json::Null);
		}
	}

	Ok(Json::Object(result))
}
