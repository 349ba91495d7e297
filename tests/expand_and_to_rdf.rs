//! Whole-document fixtures exercising `expand` and `decode`/`to_rdf`
//! end to end, covering the worked scenarios of spec.md §8.

use jsonld_lite::{decode_str, expansion, rdf, Json, Options};

fn parse(src: &str) -> Json {
	let value: serde_json::Value = serde_json::from_str(src).unwrap();
	Json::from_serde(value)
}

#[test]
fn simple_node_expands_and_materializes() {
	let input = parse(
		r#"{
			"@context": {"name": "http://schema.org/name"},
			"@id": "http://example/alice",
			"name": "Alice"
		}"#,
	);

	let expanded = expansion::expand(&input, &Options::default()).unwrap();
	assert_eq!(expanded.len(), 1);
	let Json::Object(node) = &expanded[0] else {
		panic!("expected a node object")
	};
	assert_eq!(node.get("@id"), Some(&Json::String("http://example/alice".into())));

	let dataset = rdf::to_rdf(&input, &Options::default()).unwrap();
	assert_eq!(dataset.len(), 1);
}

#[test]
fn free_floating_node_without_id_or_properties_is_dropped() {
	let input = parse(r#"{"@context": {"name": "http://schema.org/name"}}"#);
	let expanded = expansion::expand(&input, &Options::default()).unwrap();
	assert!(expanded.is_empty());
}

#[test]
fn list_container_round_trips_through_to_rdf_as_an_rdf_list() {
	let input = parse(
		r#"{
			"@context": {
				"items": {"@id": "http://example/items", "@container": "@list"}
			},
			"@id": "http://example/bag",
			"items": ["a", "b", "c"]
		}"#,
	);

	let dataset = rdf::to_rdf(&input, &Options::default()).unwrap();
	// bag -> items -> _:b0; (_:b0 first a)(_:b0 rest _:b1); (_:b1 first b)(_:b1 rest _:b2);
	// (_:b2 first c)(_:b2 rest nil) == 7 triples.
	assert_eq!(dataset.len(), 7);
}

#[test]
fn vocab_mapping_and_default_language_apply_to_plain_strings() {
	let src = r#"{
		"@context": {"@vocab": "http://schema.org/", "@language": "en"},
		"@id": "http://example/alice",
		"name": "Alice"
	}"#;
	let dataset = decode_str(src, &Options::default()).unwrap();
	assert_eq!(dataset.len(), 1);
}

#[test]
fn reverse_property_materializes_with_subject_and_object_swapped() {
	let src = r#"{
		"@id": "http://example/child",
		"@reverse": {
			"http://example/parentOf": {"@id": "http://example/parent"}
		}
	}"#;
	let dataset = decode_str(src, &Options::default()).unwrap();
	assert_eq!(dataset.len(), 1);
}

#[test]
fn malformed_json_is_rejected_at_the_decode_boundary() {
	assert!(decode_str("{", &Options::default()).is_err());
}

#[test]
fn named_graph_keeps_its_triples_out_of_the_default_graph() {
	let src = r#"{
		"@id": "http://example/g",
		"@graph": [
			{"@id": "http://example/a", "http://example/p": "x"}
		]
	}"#;
	let dataset = decode_str(src, &Options::default()).unwrap();
	assert_eq!(dataset.len(), 1);
	let quad = dataset.iter().next().unwrap();
	assert_ne!(quad.graph_name, oxrdf::GraphNameRef::DefaultGraph);
}
