use std::path::PathBuf;
use std::process;

use clap::Parser;
use indexmap::IndexMap;

use descriptor_proto_gen::codegen::{self, GenerationStats};
use descriptor_proto_gen::descriptor;
use descriptor_proto_gen::error::{Error, Result};

/// Generate a proto2 schema document from a type-descriptor set.
///
/// Reads a JSON array of type descriptors and writes the generated schema
/// to a file or stdout. The output is deterministic: identical input always
/// produces byte-identical output.
#[derive(Parser)]
#[command(name = "descriptor-proto-gen", version, about)]
struct Cli {
    /// JSON file containing the descriptor array.
    input: PathBuf,

    /// Package name for the generated schema (dot-separated identifiers).
    #[arg(long, env = "PROTO_GEN_PACKAGE")]
    package: Option<String>,

    /// Schema option as KEY=VALUE; repeatable, emitted in argument order.
    #[arg(long = "option", value_name = "KEY=VALUE")]
    options: Vec<String>,

    /// Output path for the schema document; stdout when omitted.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Suppress non-error output.
    #[arg(long, short)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");

        // Print cause chain.
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = std::error::Error::source(cause);
        }

        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if !cli.quiet {
        eprintln!("Loading descriptors from {}", cli.input.display());
    }
    let descriptors = descriptor::load_descriptors(&cli.input)?;
    if !cli.quiet {
        eprintln!("Loaded {} top-level descriptors", descriptors.len());
    }

    let options = parse_options(&cli.options)?;

    let mut stats = GenerationStats::default();
    let schema = codegen::generate_with_stats(
        &descriptors,
        cli.package.as_deref(),
        &options,
        &mut stats,
    )?;

    match &cli.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| Error::Write {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
            std::fs::write(path, &schema).map_err(|e| Error::Write {
                path: path.clone(),
                source: e,
            })?;
        }
        None => print!("{schema}"),
    }

    if !cli.quiet {
        eprintln!(
            "Generated {} messages, {} enums",
            stats.messages_generated, stats.enums_generated
        );
        if stats.fields_renamed > 0 {
            eprintln!("Renamed {} fields to legal identifiers", stats.fields_renamed);
        }
        if stats.default_value_advisories > 0 {
            eprintln!(
                "{} fields carry default values that proto2 cannot express",
                stats.default_value_advisories
            );
        }
        eprintln!("Done.");
    }

    Ok(())
}

fn parse_options(raw: &[String]) -> Result<IndexMap<String, String>> {
    let mut options = IndexMap::new();
    for entry in raw {
        let Some((key, value)) = entry.split_once('=') else {
            return Err(Error::InvalidOption(entry.clone()));
        };
        options.insert(key.to_string(), value.to_string());
    }
    Ok(options)
}
