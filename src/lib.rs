//! A small, dependency-light implementation of the
//! [JSON-LD 1.0](https://www.w3.org/TR/2014/REC-json-ld-20140116/) Expansion
//! and Deserialize-to-RDF algorithms.
//!
//! [Linked Data (LD)](https://www.w3.org/standards/semanticweb/data) adds
//! semantics to plain JSON, and this crate turns a JSON-LD document into
//! its expanded form or directly into an [`oxrdf::Dataset`], without
//! pulling in a full 1.1 processor: no scoped contexts, no framing, no
//! compaction.
//!
//! ```
//! use jsonld_lite::{decode_str, Options};
//!
//! let dataset = decode_str(r#"{"@id": "http://example/a", "http://example/p": "x"}"#, &Options::default())
//!     .expect("valid JSON-LD");
//! assert_eq!(dataset.len(), 1);
//! ```

mod blank;
mod container;
mod decode;
mod error;
mod json;
mod keyword;
mod options;

pub mod context;
pub mod expansion;
pub mod rdf;

pub use blank::BlankIdGenerator;
pub use decode::{decode, decode_path, decode_str};
pub use error::Error;
pub use json::Json;
pub use options::Options;
