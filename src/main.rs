use anyhow::{bail, Context, Result};
use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use merchant_resolver::{
    init_tracing, load_merchants, resolve, resolve_csv_file, Config, MerchantRegistry,
};

const USAGE: &str = "\
Usage:
  merchant-resolver resolve <text...>              Resolve one description, print JSON
  merchant-resolver batch <input.csv> [output.csv] Resolve the 'description' column of a CSV
  merchant-resolver check                          Validate the merchant registry

Environment:
  MERCHANTS_DIR  merchant registry directory (default: data/merchants)
  RUST_LOG       log filter (default: info)";

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let config = Config::from_env()?;

    match args.get(1).map(String::as_str) {
        Some("resolve") => {
            let text = args[2..].join(" ");
            if text.trim().is_empty() {
                bail!("resolve needs some text\n\n{}", USAGE);
            }
            let registry = load_merchants(&config.merchants_dir)?;
            run_resolve(&text, &registry)
        }
        Some("batch") => {
            let Some(input) = args.get(2) else {
                bail!("batch needs an input CSV\n\n{}", USAGE);
            };
            let registry = load_merchants(&config.merchants_dir)?;
            run_batch(Path::new(input), args.get(3).map(Path::new), &registry)
        }
        Some("check") => run_check(&config),
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }
}

fn run_resolve(text: &str, registry: &MerchantRegistry) -> Result<()> {
    let result = resolve(text, registry);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn run_check(config: &Config) -> Result<()> {
    let registry = load_merchants(&config.merchants_dir)?;
    println!(
        "✓ {} merchants valid in {}",
        registry.len(),
        config.merchants_dir.display()
    );
    Ok(())
}

// ============================================================================
// BATCH MODE
// ============================================================================

fn run_batch(input: &Path, output: Option<&Path>, registry: &MerchantRegistry) -> Result<()> {
    let summary = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {:?}", path))?;
            resolve_csv_file(input, BufWriter::new(file), registry)?
        }
        None => resolve_csv_file(input, io::stdout().lock(), registry)?,
    };

    if let Some(path) = output {
        eprintln!(
            "✓ {} rows resolved ({} matched) → {}",
            summary.total,
            summary.matched,
            path.display()
        );
    }
    Ok(())
}
