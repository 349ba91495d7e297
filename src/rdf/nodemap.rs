//! Node Map Generation (spec.md §1 lists this as an external collaborator,
//! "contract only" -- implemented concretely here per SPEC_FULL.md §4.3,
//! since nothing else in this crate can supply it and its input/output
//! contract is fully specified).

use indexmap::IndexMap;

use crate::blank::BlankIdGenerator;
use crate::json::Json;

/// `graph name -> subject id -> node object`, in the shape spec.md §1
/// describes Node Map Generation as producing.
pub type NodeMap = IndexMap<String, IndexMap<String, Json>>;

const DEFAULT_GRAPH: &str = "@default";

/// Builds the node map for an expanded document, flattening embedded node
/// objects into `@id` references and merging repeated `@id` occurrences.
pub fn generate(expanded: &[Json], gen: &mut BlankIdGenerator) -> NodeMap {
	let mut graphs = NodeMap::new();
	graphs.entry(DEFAULT_GRAPH.to_owned()).or_default();
	for item in expanded {
		flatten(item, DEFAULT_GRAPH, &mut graphs, gen);
	}
	graphs
}

fn push_unique(map: &mut IndexMap<String, Json>, key: &str, item: Json) {
	match map.get_mut(key) {
		Some(Json::Array(items)) => {
			if !items.contains(&item) {
				items.push(item);
			}
		}
		Some(_) => {}
		None => {
			map.insert(key.to_owned(), Json::Array(vec![item]));
		}
	}
}

/// Flattens `item` into `graphs`, recursing into nested `@graph` entries
/// and embedded node objects, and returns the `{"@id": ...}` reference that
/// should replace it in its parent (value objects and list objects are
/// returned unchanged -- only node objects are subjects).
fn flatten(item: &Json, graph_name: &str, graphs: &mut NodeMap, gen: &mut BlankIdGenerator) -> Json {
	let Json::Object(map) = item else {
		return item.clone();
	};

	if map.contains_key("@value") {
		return item.clone();
	}

	if let Some(Json::Array(list_items)) = map.get("@list") {
		let flattened_items: Vec<Json> = list_items.iter().map(|i| flatten(i, graph_name, graphs, gen)).collect();
		let mut new_map = map.clone();
		new_map.insert("@list".to_owned(), Json::Array(flattened_items));
		return Json::Object(new_map);
	}

	let id = match map.get("@id") {
		Some(Json::String(s)) => s.clone(),
		_ => gen.fresh(),
	};

	graphs.entry(graph_name.to_owned()).or_default().entry(id.clone()).or_insert_with(|| {
		Json::Object(IndexMap::from([("@id".to_owned(), Json::String(id.clone()))]))
	});

	// Recurse for each property before taking a mutable borrow of the
	// subject's entry, since recursion may itself need to mutate `graphs`
	// (e.g. an embedded `@graph` or a nested node object).
	let mut merged: Vec<(String, Vec<Json>)> = Vec::new();
	// Reverse properties point back at `id`: the referenced node, not this
	// subject, gets the forward triple, so these are recorded separately
	// and applied to the referenced node's entry below.
	let mut reverse_refs: Vec<(String, String)> = Vec::new();
	for (key, value) in map {
		if key == "@id" {
			continue;
		}
		if key == "@graph" {
			for sub_item in value.as_array().unwrap_or_default() {
				flatten(sub_item, &id, graphs, gen);
			}
			continue;
		}
		if key == "@reverse" {
			let Json::Object(reverse_map) = value else { continue };
			for (property, values) in reverse_map {
				for referenced in values.as_array().unwrap_or_default() {
					let reference = flatten(referenced, graph_name, graphs, gen);
					let Json::Object(reference_map) = &reference else { continue };
					let Some(Json::String(referenced_id)) = reference_map.get("@id") else { continue };
					reverse_refs.push((property.clone(), referenced_id.clone()));
				}
			}
			continue;
		}
		let items = match value {
			Json::Array(items) => items.iter().map(|i| flatten(i, graph_name, graphs, gen)).collect(),
			other => vec![flatten(other, graph_name, graphs, gen)],
		};
		merged.push((key.clone(), items));
	}

	for (property, referenced_id) in reverse_refs {
		let reference = Json::Object(IndexMap::from([("@id".to_owned(), Json::String(id.clone()))]));
		if let Some(Json::Object(referenced_node)) = graphs.get_mut(graph_name).and_then(|g| g.get_mut(&referenced_id)) {
			push_unique(referenced_node, &property, reference);
		}
	}

	if let Some(Json::Object(node)) = graphs.get_mut(graph_name).and_then(|g| g.get_mut(&id)) {
		for (key, items) in merged {
			for item in items {
				push_unique(node, &key, item);
			}
		}
	}

	Json::Object(IndexMap::from([("@id".to_owned(), Json::String(id))]))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn obj(pairs: Vec<(&str, Json)>) -> Json {
		Json::Object(pairs.into_iter().map(|(k, v)| (k.to_owned(), v)).collect())
	}

	#[test]
	fn simple_node_lands_in_the_default_graph() {
		let mut gen = BlankIdGenerator::new();
		let expanded = vec![obj(vec![
			("@id", Json::String("http://a".into())),
			(
				"http://p",
				Json::Array(vec![obj(vec![("@value", Json::String("x".into()))])]),
			),
		])];
		let map = generate(&expanded, &mut gen);
		let subjects = &map[DEFAULT_GRAPH];
		assert!(subjects.contains_key("http://a"));
	}

	#[test]
	fn embedded_node_object_is_flattened_and_referenced() {
		let mut gen = BlankIdGenerator::new();
		let expanded = vec![obj(vec![
			("@id", Json::String("http://a".into())),
			(
				"http://p",
				Json::Array(vec![obj(vec![
					("@id", Json::String("http://b".into())),
					(
						"http://q",
						Json::Array(vec![obj(vec![("@value", Json::String("x".into()))])]),
					),
				])]),
			),
		])];
		let map = generate(&expanded, &mut gen);
		let subjects = &map[DEFAULT_GRAPH];
		assert!(subjects.contains_key("http://b"));
		let Json::Object(a) = &subjects["http://a"] else {
			panic!("expected an object")
		};
		assert_eq!(
			a.get("http://p"),
			Some(&Json::Array(vec![obj(vec![("@id", Json::String("http://b".into()))])]))
		);
	}

	#[test]
	fn nodes_without_an_id_get_a_blank_node() {
		let mut gen = BlankIdGenerator::new();
		let expanded = vec![obj(vec![(
			"http://p",
			Json::Array(vec![obj(vec![("@value", Json::String("x".into()))])]),
		)])];
		let map = generate(&expanded, &mut gen);
		let subjects = &map[DEFAULT_GRAPH];
		assert_eq!(subjects.len(), 1);
		assert!(subjects.keys().next().unwrap().starts_with("_:b"));
	}

	#[test]
	fn reverse_property_adds_the_forward_reference_on_the_referenced_node() {
		let mut gen = BlankIdGenerator::new();
		let expanded = vec![obj(vec![
			("@id", Json::String("http://a".into())),
			(
				"@reverse",
				obj(vec![(
					"http://p",
					Json::Array(vec![obj(vec![("@id", Json::String("http://b".into()))])]),
				)]),
			),
		])];
		let map = generate(&expanded, &mut gen);
		let subjects = &map[DEFAULT_GRAPH];
		let Json::Object(b) = &subjects["http://b"] else {
			panic!("expected an object")
		};
		assert_eq!(
			b.get("http://p"),
			Some(&Json::Array(vec![obj(vec![("@id", Json::String("http://a".into()))])]))
		);
	}
}
