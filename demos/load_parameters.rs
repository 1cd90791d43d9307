//! Example loading, updating and saving a parameter file
//!
//! Run with an optional path to a parameter file:
//!
//! ```text
//! RUST_LOG=optparams_rs=debug cargo run --example load_parameters -- params.txt
//! ```
//!
//! Without a path, a small sample file is written to a temporary directory first.

use optparams_rs::error::Result;
use optparams_rs::parameters::{Category, Parameter, ParameterStore, UpdateStatus};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SAMPLE: &str = "\
# Sample parameter file
PROBLEM int DIMENSION 3
PROBLEM string BB_OUTPUT_TYPE OBJ PB EB
USER string BB_EXE ./bb.exe     # blackbox executable
DISPLAY_DEGREE 3
max_bb_eval 100
";

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("optparams_rs=info")))
        .with(fmt::layer().compact())
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let input = match std::env::args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let path = std::env::temp_dir().join("optparams_sample.txt");
            std::fs::write(&path, SAMPLE)?;
            path
        }
    };

    // Start from the built-in defaults and apply the file on top
    let mut store = ParameterStore::with_builtin_defaults();
    let report = store.read_from_file(&input)?;

    println!("Read {}: {} lines applied", input.display(), report.applied);
    for diagnostic in &report.diagnostics {
        println!("  skipped {}", diagnostic);
    }

    // Const parameters refuse updates
    match store.update("DIMENSION", "10") {
        UpdateStatus::Updated => println!("DIMENSION updated"),
        UpdateStatus::NotUpdated => println!("DIMENSION is const"),
        UpdateStatus::NotFound => println!("DIMENSION is not defined"),
    }

    store.add(Parameter::with_value("SCALE", 0.25, Category::User, false)?)?;

    println!();
    println!("Parameters:");
    for param in store.iter() {
        let marker = if param.is_const() { " (const)" } else { "" };
        println!(
            "  {:<24} {:<8} {:<8} {}{}",
            param.name(),
            param.category().to_string(),
            param.type_str(),
            param.value_str(),
            marker
        );
    }

    let output = std::env::temp_dir().join("optparams_out.txt");
    let saved = store.write_to_file(&output)?;
    println!();
    println!("Wrote {} parameters to {}", saved.written, output.display());
    if !saved.lossy.is_empty() {
        println!("Values that will not read back unchanged: {:?}", saved.lossy);
    }

    Ok(())
}
