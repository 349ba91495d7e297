//! Value expansion (spec.md §4.2): turns a scalar into a value object,
//! using the active property's term definition.

use crate::context::{Context, LanguageMapping};
use crate::error::Error;
use crate::json::Json;

fn value_object(pairs: Vec<(&'static str, Json)>) -> Json {
	Json::Object(pairs.into_iter().map(|(k, v)| (k.to_owned(), v)).collect())
}

/// Expands a scalar `value` occurring under `active_property` into a value
/// object, following the tie-break order of spec.md §4.2.
pub fn expand_value(ctx: &Context, active_property: Option<&str>, value: &Json) -> Result<Json, Error> {
	let term_def = active_property.and_then(|p| ctx.term_definition(p));

	if let Some(def) = term_def {
		match def.type_mapping.as_deref() {
			Some("@id") => {
				if let Some(s) = value.as_str() {
					let id = ctx.expand_iri(s, true, false).unwrap_or_else(|| s.to_owned());
					return Ok(value_object(vec![("@id", Json::String(id))]));
				}
			}
			Some("@vocab") => {
				if let Some(s) = value.as_str() {
					let id = ctx.expand_iri(s, true, true).unwrap_or_else(|| s.to_owned());
					return Ok(value_object(vec![("@id", Json::String(id))]));
				}
			}
			Some(other_type) => {
				return Ok(value_object(vec![
					("@value", value.clone()),
					("@type", Json::String(other_type.to_owned())),
				]));
			}
			None => {}
		}
	}

	if value.as_str().is_some() {
		match term_def.map(|d| &d.language_mapping) {
			Some(LanguageMapping::Some(lang)) => {
				return Ok(value_object(vec![
					("@value", value.clone()),
					("@language", Json::String(lang.clone())),
				]));
			}
			// The `false`/`null` sentinel: per spec.md §9's open question, resolved
			// (DESIGN.md) per W3C JSON-LD 1.0 §7.4 as "suppress the default
			// language for this term" rather than "re-apply it".
			Some(LanguageMapping::None) => return Ok(value_object(vec![("@value", value.clone())])),
			Some(LanguageMapping::Unset) | None => {
				if let Some(default_language) = &ctx.default_language {
					return Ok(value_object(vec![
						("@value", value.clone()),
						("@language", Json::String(default_language.clone())),
					]));
				}
			}
		}
	}

	Ok(value_object(vec![("@value", value.clone())]))
}

#[cfg(test)]
mod tests {
	use super::*;
	use indexmap::IndexMap;

	#[test]
	fn plain_scalar_without_term_is_a_bare_value_object() {
		let ctx = Context::default();
		let expanded = expand_value(&ctx, None, &Json::String("x".into())).unwrap();
		assert_eq!(
			expanded,
			Json::Object(IndexMap::from([("@value".to_owned(), Json::String("x".into()))]))
		);
	}

	#[test]
	fn id_type_mapping_expands_to_id_reference() {
		let ctx = Context::default()
			.update(&Json::Object(IndexMap::from([(
				"p".to_owned(),
				Json::Object(IndexMap::from([
					("@id".to_owned(), Json::String("http://example/p".into())),
					("@type".to_owned(), Json::String("@id".into())),
				])),
			)])))
			.unwrap();
		let expanded = expand_value(&ctx, Some("p"), &Json::String("http://example/x".into())).unwrap();
		assert_eq!(
			expanded,
			Json::Object(IndexMap::from([(
				"@id".to_owned(),
				Json::String("http://example/x".into())
			)]))
		);
	}

	#[test]
	fn default_language_is_applied_to_strings() {
		let ctx = Context::default()
			.update(&Json::Object(IndexMap::from([(
				"@language".to_owned(),
				Json::String("en".into()),
			)])))
			.unwrap();
		let expanded = expand_value(&ctx, None, &Json::String("hi".into())).unwrap();
		assert_eq!(
			expanded,
			Json::Object(IndexMap::from([
				("@value".to_owned(), Json::String("hi".into())),
				("@language".to_owned(), Json::String("en".into())),
			]))
		);
	}
}
