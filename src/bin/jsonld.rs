//! Command-line front end for `jsonld-lite`: expand a document, or
//! materialize it as RDF, reading from a file or standard input.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use jsonld_lite::{expansion, Error, Json, Options};

#[derive(Parser)]
#[clap(name = "jsonld", author, version, about, long_about = None)]
struct Args {
	/// Sets the level of verbosity. Pass multiple times for more detail.
	#[clap(short, long = "verbose", parse(from_occurrences))]
	verbosity: usize,

	#[clap(subcommand)]
	command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
	/// Run the Expansion Algorithm and print the result as JSON.
	Expand {
		/// Path to the document to expand, or `-` for standard input.
		#[clap(default_value = "-")]
		input: PathBuf,

		/// Base IRI to resolve relative IRI references against.
		#[clap(short, long)]
		base: Option<String>,
	},

	/// Run the Deserialize JSON-LD to RDF algorithm and print the result as
	/// N-Quads.
	ToRdf {
		/// Path to the document to convert, or `-` for standard input.
		#[clap(default_value = "-")]
		input: PathBuf,

		/// Base IRI to resolve relative IRI references against.
		#[clap(short, long)]
		base: Option<String>,

		/// Emit blank-node-predicate triples instead of silently dropping
		/// them.
		#[clap(long)]
		generalized_rdf: bool,
	},
}

fn read_input(path: &PathBuf) -> io::Result<String> {
	if path.as_os_str() == "-" {
		let mut buf = String::new();
		io::stdin().read_to_string(&mut buf)?;
		Ok(buf)
	} else {
		std::fs::read_to_string(path)
	}
}

fn options_with_base(base: Option<String>, generalized_rdf: bool) -> Options {
	let mut options = match base {
		Some(base) => Options::with_base(base),
		None => Options::default(),
	};
	options.produce_generalized_rdf = generalized_rdf;
	options
}

fn run(args: Args) -> Result<(), Error> {
	match args.command {
		Command::Expand { input, base } => {
			let content = read_input(&input)?;
			let value: serde_json::Value = serde_json::from_str(&content)?;
			let options = options_with_base(base, false);
			let expanded = expansion::expand(&Json::from_serde(value), &options)?;
			let as_json: Vec<serde_json::Value> = expanded.iter().map(Json::to_serde).collect();
			println!("{}", serde_json::to_string_pretty(&as_json)?);
		}
		Command::ToRdf { input, base, generalized_rdf } => {
			let content = read_input(&input)?;
			let options = options_with_base(base, generalized_rdf);
			let dataset = jsonld_lite::decode_str(&content, &options)?;
			print!("{dataset}");
		}
	}
	Ok(())
}

fn main() -> ExitCode {
	let args = Args::parse();
	stderrlog::new().verbosity(args.verbosity).init().unwrap();

	match run(args) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			eprintln!("error: {err}");
			ExitCode::FAILURE
		}
	}
}
