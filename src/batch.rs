// 📑 Batch Resolution - CSV of bank descriptions → CSV of resolved merchants
//
// Input:  any CSV with a `description` column (header match is case-insensitive)
// Output: description,normalized,merchant_id,name,category,confidence
//
// Unmatched rows keep their best confidence and leave the merchant columns empty.

use crate::matcher::{resolve, ResolveResult};
use crate::normalize::normalize;
use crate::entities::MerchantRegistry;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io;
use std::path::Path;

/// Column read from the input CSV
pub const DESCRIPTION_COLUMN: &str = "description";

#[derive(Debug, Serialize)]
struct BatchRow<'a> {
    description: &'a str,
    normalized: String,
    merchant_id: Option<&'a str>,
    name: Option<&'a str>,
    category: Option<&'static str>,
    confidence: f64,
}

impl<'a> BatchRow<'a> {
    fn new(description: &'a str, result: &'a ResolveResult) -> Self {
        let normalized = normalize(description);

        match result {
            ResolveResult::Matched(m) => BatchRow {
                description,
                normalized,
                merchant_id: Some(&m.merchant_id),
                name: Some(&m.name),
                category: Some(m.category.as_str()),
                confidence: m.confidence,
            },
            ResolveResult::NoMatch { confidence } => BatchRow {
                description,
                normalized,
                merchant_id: None,
                name: None,
                category: None,
                confidence: *confidence,
            },
        }
    }
}

/// Row counts from one batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub matched: usize,
}

impl BatchSummary {
    pub fn unmatched(&self) -> usize {
        self.total - self.matched
    }
}

// ============================================================================
// RESOLVE CSV
// ============================================================================

/// Resolve every row of `input` and write one output row per input row.
///
/// Fails before writing anything when the header has no `description` column.
pub fn resolve_csv<R: io::Read, W: io::Write>(
    input: R,
    output: W,
    registry: &MerchantRegistry,
) -> Result<BatchSummary> {
    let mut reader = csv::Reader::from_reader(input);

    let headers = reader.headers().context("Failed to read CSV headers")?.clone();
    let column = headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(DESCRIPTION_COLUMN))
        .with_context(|| format!("CSV input has no '{}' column", DESCRIPTION_COLUMN))?;

    let mut writer = csv::Writer::from_writer(output);
    let mut summary = BatchSummary::default();

    for (i, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read CSV row {}", i + 1))?;
        let description = record.get(column).unwrap_or("");
        let result = resolve(description, registry);

        if result.is_match() {
            summary.matched += 1;
        }

        writer
            .serialize(BatchRow::new(description, &result))
            .with_context(|| format!("Failed to write CSV row {}", i + 1))?;
        summary.total += 1;
    }

    writer.flush().context("Failed to flush CSV output")?;
    tracing::info!(
        total = summary.total,
        matched = summary.matched,
        unmatched = summary.unmatched(),
        "batch complete"
    );

    Ok(summary)
}

/// `resolve_csv` over a file on disk
pub fn resolve_csv_file<W: io::Write>(
    input: &Path,
    output: W,
    registry: &MerchantRegistry,
) -> Result<BatchSummary> {
    let file = std::fs::File::open(input)
        .with_context(|| format!("Failed to open CSV file: {:?}", input))?;

    resolve_csv(file, output, registry).with_context(|| format!("{:?}", input))
}

// ============================================================================
// TESTS
// ============================================================================
