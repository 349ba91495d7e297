//! The Deserialize JSON-LD to RDF Algorithm (spec.md §4.3): node map
//! generation, literal canonicalization, and list materialization, ending
//! in an `oxrdf::Dataset`.

mod literal;
mod nodemap;

use oxrdf::vocab::{rdf, xsd};
use oxrdf::{BlankNode, Dataset, Graph, Literal, NamedNode, Subject, Term, Triple};

use crate::blank::BlankIdGenerator;
use crate::error::Error;
use crate::json::{is_blank_node_id, is_keyword, is_relative_iri, sorted_entries, Json};
use crate::options::Options;

pub use nodemap::NodeMap;

/// `to_rdf(json_ld_object, options) -> Dataset` (spec.md §4.3, "Public
/// contract"): expands `json_ld_object`, generates its node map, and
/// materializes the result as an RDF dataset.
pub fn to_rdf(json_ld_object: &Json, options: &Options) -> Result<Dataset, Error> {
	let expanded = crate::expansion::expand(json_ld_object, options)?;
	let mut bnode_gen = BlankIdGenerator::new();
	let node_map = nodemap::generate(&expanded, &mut bnode_gen);
	materialize(&node_map, options, &mut bnode_gen)
}

fn node_to_rdf(id: &str) -> Term {
	if let Some(label) = id.strip_prefix("_:") {
		Term::BlankNode(BlankNode::new_unchecked(label))
	} else {
		Term::NamedNode(NamedNode::new_unchecked(id))
	}
}

fn node_to_rdf_subject(id: &str) -> Subject {
	if let Some(label) = id.strip_prefix("_:") {
		Subject::BlankNode(BlankNode::new_unchecked(label))
	} else {
		Subject::NamedNode(NamedNode::new_unchecked(id))
	}
}

/// `object_to_rdf` (spec.md §4.3): maps an expanded item (an `@id`
/// reference or a value object) to an RDF term, or `None` if it must be
/// dropped (a relative `@id`).
fn object_to_rdf(item: &Json) -> Option<Term> {
	let Json::Object(map) = item else {
		return None;
	};

	if let Some(Json::String(id)) = map.get("@id") {
		return if is_relative_iri(id) { None } else { Some(node_to_rdf(id)) };
	}

	let value = map.get("@value")?;
	let explicit_type = map.get("@type").and_then(Json::as_str);
	let language = map.get("@language").and_then(Json::as_str);

	let literal = match value {
		Json::Bool(b) => Literal::new_typed_literal(literal::canonical_boolean(*b), xsd::BOOLEAN),
		Json::Double(d) => Literal::new_typed_literal(literal::canonical_double(*d), xsd::DOUBLE),
		Json::Integer(i) if explicit_type == Some("http://www.w3.org/2001/XMLSchema#double") => {
			Literal::new_typed_literal(literal::canonical_double(*i as f64), xsd::DOUBLE)
		}
		Json::Integer(i) => Literal::new_typed_literal(literal::canonical_integer(*i), xsd::INTEGER),
		Json::String(s) => match (language, explicit_type) {
			(Some(lang), _) => Literal::new_language_tagged_literal_unchecked(s, lang),
			(None, Some(datatype)) => Literal::new_typed_literal(s, NamedNode::new_unchecked(datatype)),
			(None, None) => Literal::new_typed_literal(s, xsd::STRING),
		},
		_ => return None,
	};

	Some(Term::Literal(literal))
}

/// `list_to_rdf` (spec.md §4.3): materializes a JSON-LD list as an RDF
/// linked structure of blank nodes, returning the triples and the head
/// term (`rdf:nil` for an empty, or fully-dropped, list).
fn list_to_rdf(items: &[Json], bnode_gen: &mut BlankIdGenerator) -> (Vec<Triple>, Term) {
	let objects: Vec<Term> = items.iter().filter_map(object_to_rdf).collect();

	if objects.is_empty() {
		return (Vec::new(), Term::NamedNode(rdf::NIL.into_owned()));
	}

	let mut triples = Vec::with_capacity(objects.len() * 2);
	let nodes: Vec<Subject> = objects
		.iter()
		.map(|_| node_to_rdf_subject(&bnode_gen.fresh()))
		.collect();

	for (i, object) in objects.into_iter().enumerate() {
		triples.push(Triple::new(nodes[i].clone(), rdf::FIRST, object));
		let rest = match nodes.get(i + 1) {
			Some(next) => Term::from(next.clone()),
			None => Term::NamedNode(rdf::NIL.into_owned()),
		};
		triples.push(Triple::new(nodes[i].clone(), rdf::REST, rest));
	}

	(triples, Term::from(nodes[0].clone()))
}

fn materialize(node_map: &NodeMap, options: &Options, bnode_gen: &mut BlankIdGenerator) -> Result<Dataset, Error> {
	let mut dataset = Dataset::new();

	let mut graph_names: Vec<&str> = node_map.keys().map(String::as_str).collect();
	graph_names.sort_unstable();

	for graph_name in graph_names {
		if graph_name != "@default" && is_relative_iri(graph_name) {
			continue;
		}

		let subjects = &node_map[graph_name];
		let mut subject_ids: Vec<&str> = subjects.keys().map(String::as_str).collect();
		subject_ids.sort_unstable();

		let mut graph = Graph::new();

		for subject_id in subject_ids {
			if is_relative_iri(subject_id) {
				continue;
			}

			let Json::Object(node) = &subjects[subject_id] else {
				continue;
			};
			let subject = node_to_rdf_subject(subject_id);

			for (property, values) in sorted_entries(node) {
				if property == "@id" {
					continue;
				}

				let items = values.as_array().unwrap_or_default();

				if property == "@type" {
					for type_value in items {
						if let Some(type_id) = type_value.as_str() {
							if is_relative_iri(type_id) {
								continue;
							}
							graph.insert(&Triple::new(subject.clone(), rdf::TYPE, node_to_rdf(type_id)));
						}
					}
					continue;
				}

				if is_keyword(property) {
					continue;
				}
				if is_relative_iri(property) {
					continue;
				}
				// oxrdf's `Triple::predicate` is a `NamedNode`: a blank-node
				// predicate has no RDF term to materialize into, so it is
				// dropped even when `produce_generalized_rdf` is set (see
				// DESIGN.md). Warn rather than fail silently when the caller
				// explicitly asked for generalized RDF.
				if is_blank_node_id(property) {
					if options.produce_generalized_rdf {
						log::warn!("dropping blank-node predicate `{property}`: not representable as an oxrdf NamedNode");
					}
					continue;
				}
				let predicate = NamedNode::new_unchecked(property);

				for item in items {
					if crate::json::is_list_object(item) {
						let Json::Object(list_map) = item else { unreachable!() };
						let Some(Json::Array(list_items)) = list_map.get("@list") else {
							continue;
						};
						let (list_triples, head) = list_to_rdf(list_items, bnode_gen);
						graph.insert(&Triple::new(subject.clone(), predicate.clone(), head));
						for triple in &list_triples {
							graph.insert(triple);
						}
					} else if let Some(object) = object_to_rdf(item) {
						graph.insert(&Triple::new(subject.clone(), predicate.clone(), object));
					}
				}
			}
		}

		if !graph.is_empty() {
			let graph_name_term = if graph_name == "@default" {
				oxrdf::GraphName::DefaultGraph
			} else if let Some(label) = graph_name.strip_prefix("_:") {
				oxrdf::GraphName::BlankNode(BlankNode::new_unchecked(label))
			} else {
				oxrdf::GraphName::NamedNode(NamedNode::new_unchecked(graph_name))
			};
			for triple in graph.iter() {
				dataset.insert(triple.in_graph(graph_name_term.as_ref()));
			}
		}
	}

	Ok(dataset)
}

#[cfg(test)]
mod tests {
	use super::*;
	use indexmap::IndexMap;

	fn obj(pairs: Vec<(&str, Json)>) -> Json {
		Json::Object(pairs.into_iter().map(|(k, v)| (k.to_owned(), v)).collect())
	}

	#[test]
	fn simple_subject_predicate_object() {
		let input = obj(vec![
			("@id", Json::String("http://a".into())),
			("http://p", Json::String("x".into())),
		]);
		let dataset = to_rdf(&input, &Options::default()).unwrap();
		assert_eq!(dataset.len(), 1);
	}

	#[test]
	fn list_materializes_to_linked_blank_nodes() {
		let input = obj(vec![
			("@id", Json::String("http://a".into())),
			(
				"http://p",
				obj(vec![(
					"@list",
					Json::Array(vec![Json::String("x".into()), Json::String("y".into())]),
				)]),
			),
		]);
		let dataset = to_rdf(&input, &Options::default()).unwrap();
		// (a,p,_:b0) (_:b0,first,x) (_:b0,rest,_:b1) (_:b1,first,y) (_:b1,rest,nil)
		assert_eq!(dataset.len(), 5);
	}

	#[test]
	fn empty_list_yields_rdf_nil_and_no_extra_triples() {
		let (triples, head) = list_to_rdf(&[], &mut BlankIdGenerator::new());
		assert!(triples.is_empty());
		assert_eq!(head, Term::NamedNode(rdf::NIL.into_owned()));
	}

	#[test]
	fn reverse_property_swaps_subject_and_object() {
		let input = obj(vec![
			("@id", Json::String("http://a".into())),
			(
				"@reverse",
				obj(vec![("http://p", obj(vec![("@id", Json::String("http://b".into()))]))]),
			),
		]);
		let dataset = to_rdf(&input, &Options::default()).unwrap();
		assert_eq!(dataset.len(), 1);
		let quad = dataset.iter().next().unwrap();
		assert_eq!(quad.subject.into_owned(), Subject::NamedNode(NamedNode::new_unchecked("http://b")));
	}

	#[test]
	fn generalized_rdf_off_by_default_drops_blank_predicate() {
		let mut node = IndexMap::new();
		node.insert("@id".to_owned(), Json::String("http://a".into()));
		node.insert(
			"_:p".to_owned(),
			Json::Array(vec![obj(vec![("@value", Json::String("x".into()))])]),
		);
		let mut graphs = NodeMap::new();
		let mut subjects = IndexMap::new();
		subjects.insert("http://a".to_owned(), Json::Object(node));
		graphs.insert("@default".to_owned(), subjects);

		let dataset = materialize(&graphs, &Options::default(), &mut BlankIdGenerator::new()).unwrap();
		assert!(dataset.is_empty());
	}
}
