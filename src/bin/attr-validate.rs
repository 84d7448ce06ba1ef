//! # Attribute Validator
//!
//! A command-line utility for checking a JSON attribute document against a
//! JSON schema document, using the same validation pass as the library.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin attr-validate schema.json attributes.json
//! cargo run --bin attr-validate schema.json attributes.json --all --strict
//! ```
//!
//! - `--all` reports every violation instead of stopping at the first
//! - `--strict` rejects attributes the schema does not declare
//!
//! Set `RUST_LOG=debug` to see each violation as it is found.
//!
//! ## Output Examples
//!
//! ```text
//! Validating attributes.json against schema.json
//! ✓ Attributes are valid
//! ```
//!
//! ```text
//! Validating attributes.json against schema.json
//! ❌ 2 violation(s):
//!   [type] age: "age" must be a number
//!   [strict] nickname: nickname are not in the schema
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: Attributes are valid
//! - `1`: Violations found, or the inputs could not be loaded

use attr_schema::{Schema, SchemaValidator, Snapshot, ValidationError};
use std::env;
use std::fs;
use std::path::Path;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .init();

    let args: Vec<String> = env::args().collect();
    let (paths, flags): (Vec<&String>, Vec<&String>) =
        args.iter().skip(1).partition(|arg| !arg.starts_with("--"));

    if paths.len() != 2 {
        eprintln!("Usage: {} <schema.json> <attributes.json> [--all] [--strict]", args[0]);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} schemas/user.json user.json", args[0]);
        eprintln!("  {} schemas/user.json user.json --all", args[0]);
        process::exit(1);
    }

    let mut builder = SchemaValidator::builder();
    for flag in flags {
        match flag.as_str() {
            "--all" => builder = builder.collect_all_errors(),
            "--strict" => builder = builder.force_strict(true),
            other => {
                eprintln!("Error: unknown option '{}'", other);
                process::exit(1);
            }
        }
    }
    let validator = builder.build();

    let schema_path = Path::new(paths[0]);
    let attributes_path = Path::new(paths[1]);
    println!(
        "Validating {} against {}",
        attributes_path.display(),
        schema_path.display()
    );

    match run(&validator, schema_path, attributes_path) {
        Ok(Ok(())) => println!("✓ Attributes are valid"),
        Ok(Err(violations)) => {
            print_violations(&violations);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("❌ Could not validate: {}", e);
            process::exit(1);
        }
    }
}

fn run(
    validator: &SchemaValidator,
    schema_path: &Path,
    attributes_path: &Path,
) -> Result<Result<(), ValidationError>, Box<dyn std::error::Error>> {
    let schema = Schema::from_json_file(schema_path)?;
    let attributes = Snapshot::from_json_str(&fs::read_to_string(attributes_path)?)?;

    log::info!(
        "Loaded {} fields and {} attributes",
        schema.len(),
        attributes.len()
    );

    Ok(validator.validate(&schema, &attributes))
}

fn print_violations(violations: &ValidationError) {
    match violations {
        ValidationError::Message(message) => println!("❌ {}", message),
        ValidationError::Errors(records) => {
            println!("❌ {} violation(s):", records.len());
            for record in records {
                println!("  [{}] {}: {}", record.err_type, record.key, record.message);
            }
        }
    }
}
