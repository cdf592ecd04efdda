// 📂 Registry Loader - data/merchants/*.json → MerchantRegistry
//
// One merchant per file. Any invalid file aborts the load: a registry that
// fails validation means the process does not start.

use crate::entities::merchant::{Merchant, MerchantRegistry};
use anyhow::{bail, Context, Result};
use regex::RegexBuilder;
use std::fs;
use std::path::{Path, PathBuf};

/// Load and validate every `*.json` merchant file in `dir`.
///
/// Files are read in file-name order so error reporting is reproducible.
pub fn load_merchants<P: AsRef<Path>>(dir: P) -> Result<MerchantRegistry> {
    let dir = dir.as_ref();
    let files = merchant_files(dir)?;

    let mut registry = MerchantRegistry::new();

    for path in &files {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let merchant = load_merchant_file(path, &filename)?;
        registry.register(merchant)?;
    }

    tracing::info!(count = registry.len(), dir = %dir.display(), "Loaded merchants");
    Ok(registry)
}

fn merchant_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).with_context(|| {
        format!(
            "Merchants directory not found at {} - cannot start without merchant data",
            dir.display()
        )
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read entry in {}", dir.display()))?
            .path();

        if path.is_file() && path.extension().map_or(false, |ext| ext == "json") {
            files.push(path);
        }
    }

    if files.is_empty() {
        bail!(
            "No merchant JSON files found in {} - cannot start without merchant data",
            dir.display()
        );
    }

    files.sort();
    Ok(files)
}

fn load_merchant_file(path: &Path, filename: &str) -> Result<Merchant> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("{}: Failed to read merchant file", filename))?;

    let merchant: Merchant = serde_json::from_str(&content)
        .with_context(|| format!("{}: Invalid merchant JSON", filename))?;

    validate_merchant(&merchant, filename)?;
    Ok(merchant)
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Structural checks serde cannot express
pub fn validate_merchant(merchant: &Merchant, filename: &str) -> Result<()> {
    if merchant.id.trim().is_empty() {
        bail!("{}: Missing or invalid required field \"id\"", filename);
    }
    if merchant.name.trim().is_empty() {
        bail!("{}: Missing or invalid required field \"name\"", filename);
    }

    let expected = merchant.subcategory.category();
    if merchant.category != expected {
        bail!(
            "{}: Subcategory \"{}\" belongs to category \"{}\", not \"{}\"",
            filename,
            merchant.subcategory,
            expected,
            merchant.category
        );
    }

    if merchant.aliases.is_empty() {
        bail!("{}: aliases must contain at least one alias", filename);
    }
    for alias in &merchant.aliases {
        validate_alias(alias, filename)?;
    }

    if let Some(website) = &merchant.website {
        if website.is_empty() {
            bail!("{}: website must be a non-empty string if provided", filename);
        }
        url::Url::parse(website)
            .with_context(|| format!("{}: website \"{}\" is not a valid URL", filename, website))?;
    }

    if let Some(logo_hint) = &merchant.logo_hint {
        if logo_hint.value.is_empty() {
            bail!("{}: Invalid logo_hint - value must be non-empty", filename);
        }
    }

    for pattern in merchant.regex.iter().flatten() {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .with_context(|| format!("{}: Invalid regex pattern \"{}\"", filename, pattern))?;
    }

    Ok(())
}

/// Aliases are stored pre-normalized: lowercase ASCII, no punctuation except spaces
pub fn validate_alias(alias: &str, filename: &str) -> Result<()> {
    if alias.is_empty() {
        bail!("{}: Alias cannot be empty", filename);
    }
    if !alias.is_ascii() {
        bail!(
            "{}: Alias \"{}\" contains diacritics/special characters - aliases must be pre-normalized",
            filename,
            alias
        );
    }
    if alias.chars().any(|c| c.is_ascii_uppercase()) {
        bail!(
            "{}: Alias \"{}\" contains uppercase characters - aliases must be pre-normalized to lowercase",
            filename,
            alias
        );
    }
    if alias
        .chars()
        .any(|c| !(c.is_ascii_alphanumeric() || c == '_' || c.is_ascii_whitespace()))
    {
        bail!(
            "{}: Alias \"{}\" contains punctuation - aliases must be pre-normalized (no punctuation except spaces)",
            filename,
            alias
        );
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
