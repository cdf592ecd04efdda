// Merchant Resolver - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod normalize;      // Normalizer + Tokenizer
pub mod confidence;     // Confidence Scorer
pub mod matcher;        // Resolver
pub mod entities;       // Merchant, taxonomy, registry
pub mod loader;         // Registry loader/validator
pub mod batch;          // CSV batch resolution
pub mod config;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use normalize::{normalize, tokenize};
pub use confidence::{
    aggregate_score, alias_score, jaccard_similarity, regex_score, CONFIDENCE_THRESHOLD,
};
pub use matcher::{find_candidates, resolve, MatchCandidate, MerchantMatch, ResolveResult};
pub use entities::{
    Category, LogoHint, LogoHintType, Merchant, MerchantChannel, MerchantRegistry, MerchantScope,
    RegexSignature, RiskLevel, Subcategory,
};
pub use loader::load_merchants;
pub use batch::{resolve_csv, resolve_csv_file, BatchSummary};
pub use config::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the `tracing` subscriber used by both binaries.
///
/// `RUST_LOG` overrides the default `info` filter. Output goes to stderr so
/// command output on stdout stays machine-readable.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
