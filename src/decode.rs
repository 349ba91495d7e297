//! The outermost boundary: parses bytes as JSON, then runs the
//! Deserialize-to-RDF algorithm over the result (spec.md §4.3, "Public
//! contract"). `serde_json` is only ever used here -- the algorithmic core
//! works over [`crate::json::Json`].

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use oxrdf::Dataset;

use crate::error::Error;
use crate::json::Json;
use crate::options::Options;
use crate::rdf;

/// Parses `bytes` as a JSON document and converts it to an RDF dataset.
pub fn decode(bytes: &[u8], options: &Options) -> Result<Dataset, Error> {
	let value: serde_json::Value = serde_json::from_slice(bytes)?;
	let json = Json::from_serde(value);
	rdf::to_rdf(&json, options)
}

/// Convenience wrapper over [`decode`] for a borrowed string.
pub fn decode_str(input: &str, options: &Options) -> Result<Dataset, Error> {
	decode(input.as_bytes(), options)
}

/// Reads `path` (or stdin, for `-`) and decodes it.
pub fn decode_path(path: &Path, options: &Options) -> Result<Dataset, Error> {
	let bytes = read_input(path)?;
	decode(&bytes, options)
}

fn read_input(path: &Path) -> Result<Vec<u8>, Error> {
	if path == Path::new("-") {
		let mut buf = Vec::new();
		io::stdin().read_to_end(&mut buf)?;
		Ok(buf)
	} else {
		Ok(fs::read(path)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_a_simple_document_into_one_triple() {
		let input = r#"{"@id": "http://a", "http://p": "x"}"#;
		let dataset = decode_str(input, &Options::default()).unwrap();
		assert_eq!(dataset.len(), 1);
	}

	#[test]
	fn rejects_malformed_json() {
		let err = decode_str("{not json", &Options::default()).unwrap_err();
		assert!(matches!(err, Error::Json(_)));
	}
}
