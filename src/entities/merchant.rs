// 🏪 Merchant Entity - Canonical merchants and the registry that holds them
//
// Problem solved:
// - "AMZN MKTP DE*2K4", "Amazon.com", "AMAZON" → All the same merchant entity
// - Aliases are stored pre-normalized, so matching never re-normalizes them
// - Regex signatures are compiled ONCE, when the merchant is built or registered
// - The registry is read-only after load, so it can be shared across threads as-is

use crate::entities::taxonomy::{Category, MerchantChannel, MerchantScope, RiskLevel, Subcategory};
use anyhow::{bail, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// LOGO HINT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogoHintType {
    Domain,
}

/// Where a client can fetch a logo for this merchant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogoHint {
    #[serde(rename = "type")]
    pub hint_type: LogoHintType,
    pub value: String,
}

impl LogoHint {
    pub fn domain(value: impl Into<String>) -> Self {
        LogoHint {
            hint_type: LogoHintType::Domain,
            value: value.into(),
        }
    }
}

// ============================================================================
// REGEX SIGNATURE
// ============================================================================

/// A regex pattern paired with its compiled form.
///
/// `compiled` is `None` when the pattern failed to compile; such a signature
/// never matches but does not stop the merchant's other signatures from being tried.
#[derive(Debug, Clone)]
pub struct RegexSignature {
    pub pattern: String,
    compiled: Option<Regex>,
}

impl RegexSignature {
    /// Compile a pattern case-insensitively
    pub fn compile(pattern: &str) -> Self {
        let compiled = match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(regex) => Some(regex),
            Err(e) => {
                tracing::warn!(pattern, error = %e, "regex signature failed to compile, skipping");
                None
            }
        };

        RegexSignature {
            pattern: pattern.to_string(),
            compiled,
        }
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled.is_some()
    }

    pub fn is_match(&self, input: &str) -> bool {
        self.compiled
            .as_ref()
            .map_or(false, |regex| regex.is_match(input))
    }
}

// ============================================================================
// MERCHANT ENTITY
// ============================================================================

/// Merchant Entity - immutable once it enters a registry
///
/// Identity: `id` (unique, non-empty)
/// Matching data: `aliases` (pre-normalized) and optional `regex` signatures
/// Descriptive data: everything else, copied verbatim into a successful resolve result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Merchant {
    // ========================================================================
    // IDENTITY
    // ========================================================================
    pub id: String,

    // ========================================================================
    // DESCRIPTIVE VALUES
    // ========================================================================
    pub name: String,
    pub category: Category,
    pub subcategory: Subcategory,
    pub merchant_channel: MerchantChannel,
    pub merchant_scope: MerchantScope,
    pub subscription_likely: bool,
    pub is_marketplace: bool,
    pub risk_level: RiskLevel,

    // ========================================================================
    // MATCHING DATA
    // ========================================================================
    /// Known spellings, already lowercase ASCII without punctuation
    /// Example: ["amazon", "amazon com", "amzn", "amzn mktp"]
    pub aliases: Vec<String>,

    /// Regex signatures tested against the normalized input
    /// Example: ["^amzn", "^amazon"]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<Vec<String>>,

    // ========================================================================
    // OPTIONAL METADATA
    // ========================================================================
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_hint: Option<LogoHint>,

    /// Compiled counterpart of `regex`, rebuilt by `compile_signatures`
    #[serde(skip)]
    signatures: Vec<RegexSignature>,
}

impl Merchant {
    /// Create a merchant; the category is derived from the subcategory
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        subcategory: Subcategory,
        merchant_channel: MerchantChannel,
        merchant_scope: MerchantScope,
        risk_level: RiskLevel,
    ) -> Self {
        Merchant {
            id: id.into(),
            name: name.into(),
            category: subcategory.category(),
            subcategory,
            merchant_channel,
            merchant_scope,
            subscription_likely: false,
            is_marketplace: false,
            risk_level,
            aliases: Vec::new(),
            regex: None,
            website: None,
            logo_hint: None,
            signatures: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        if !self.aliases.contains(&alias) {
            self.aliases.push(alias);
        }
        self
    }

    pub fn with_aliases<I, S>(self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        aliases
            .into_iter()
            .fold(self, |merchant, alias| merchant.with_alias(alias))
    }

    /// Add a regex signature (compiled immediately)
    pub fn with_regex(mut self, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        self.signatures.push(RegexSignature::compile(&pattern));
        self.regex.get_or_insert_with(Vec::new).push(pattern);
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = Some(website.into());
        self
    }

    pub fn with_logo_domain(mut self, domain: impl Into<String>) -> Self {
        self.logo_hint = Some(LogoHint::domain(domain));
        self
    }

    pub fn subscription_likely(mut self, likely: bool) -> Self {
        self.subscription_likely = likely;
        self
    }

    pub fn marketplace(mut self, is_marketplace: bool) -> Self {
        self.is_marketplace = is_marketplace;
        self
    }

    /// Rebuild compiled signatures from `regex` (needed after deserialization)
    pub fn compile_signatures(&mut self) {
        self.signatures = self
            .regex
            .iter()
            .flatten()
            .map(|pattern| RegexSignature::compile(pattern))
            .collect();
    }

    pub fn signatures(&self) -> &[RegexSignature] {
        &self.signatures
    }

    /// True if any regex signature matches; the first match wins
    pub fn matches_signature(&self, normalized_input: &str) -> bool {
        self.signatures
            .iter()
            .any(|signature| signature.is_match(normalized_input))
    }
}

// ============================================================================
// MERCHANT REGISTRY
// ============================================================================

/// Registry of all known merchants, keyed by id
///
/// Built once at startup and never mutated afterwards. Iteration order is
/// merchant id ascending, which makes candidate ranking reproducible.
#[derive(Debug, Clone, Default)]
pub struct MerchantRegistry {
    merchants: BTreeMap<String, Merchant>,
}

impl MerchantRegistry {
    /// Create new empty registry
    pub fn new() -> Self {
        MerchantRegistry {
            merchants: BTreeMap::new(),
        }
    }

    /// Build a registry, failing on the first duplicate id
    pub fn from_merchants<I>(merchants: I) -> Result<Self>
    where
        I: IntoIterator<Item = Merchant>,
    {
        let mut registry = MerchantRegistry::new();
        for merchant in merchants {
            registry.register(merchant)?;
        }
        Ok(registry)
    }

    /// Register a merchant, compiling its regex signatures
    pub fn register(&mut self, mut merchant: Merchant) -> Result<()> {
        if self.merchants.contains_key(&merchant.id) {
            bail!("Duplicate merchant ID: {}", merchant.id);
        }

        merchant.compile_signatures();
        self.merchants.insert(merchant.id.clone(), merchant);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Merchant> {
        self.merchants.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.merchants.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.merchants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.merchants.is_empty()
    }

    /// All merchants, id ascending
    pub fn iter(&self) -> impl Iterator<Item = &Merchant> {
        self.merchants.values()
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// amazon, starbucks and target, as a bank-statement resolver would ship them
    pub(crate) fn sample_registry() -> MerchantRegistry {
        let amazon = Merchant::new(
            "amazon",
            "Amazon",
            Subcategory::ECommerce,
            MerchantChannel::Hybrid,
            MerchantScope::Global,
            RiskLevel::Low,
        )
        .with_aliases(["amazon", "amazon com", "amzn", "amzn mktp"])
        .with_regex("^amzn")
        .with_regex("^amazon")
        .with_website("https://amazon.com")
        .with_logo_domain("amazon.com")
        .marketplace(true);

        let starbucks = Merchant::new(
            "starbucks",
            "Starbucks",
            Subcategory::Cafe,
            MerchantChannel::Physical,
            MerchantScope::Global,
            RiskLevel::Low,
        )
        .with_aliases(["starbucks", "starbucks coffee", "sbux"])
        .with_website("https://starbucks.com")
        .with_logo_domain("starbucks.com");

        let target = Merchant::new(
            "target",
            "Target",
            Subcategory::DepartmentStore,
            MerchantChannel::Hybrid,
            MerchantScope::National,
            RiskLevel::Low,
        )
        .with_aliases(["target", "target store"])
        .with_website("https://target.com")
        .with_logo_domain("target.com");

        MerchantRegistry::from_merchants([amazon, starbucks, target])
            .expect("fixture ids are unique")
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn netflix() -> Merchant {
        Merchant::new(
            "netflix",
            "Netflix",
            Subcategory::Streaming,
            MerchantChannel::Online,
            MerchantScope::Global,
            RiskLevel::Low,
        )
        .with_aliases(["netflix", "netflix com"])
        .subscription_likely(true)
    }

    #[test]
    fn test_merchant_creation() {
        let merchant = netflix();

        assert_eq!(merchant.id, "netflix");
        assert_eq!(merchant.category, Category::Entertainment);
        assert_eq!(merchant.subcategory, Subcategory::Streaming);
        assert!(merchant.subscription_likely);
        assert!(!merchant.is_marketplace);
        assert_eq!(merchant.aliases.len(), 2);
        assert!(merchant.regex.is_none());
        assert!(merchant.website.is_none());
        assert!(merchant.logo_hint.is_none());
    }

    #[test]
    fn test_merchant_duplicate_alias_ignored() {
        let merchant = netflix().with_alias("netflix");
        assert_eq!(merchant.aliases, vec!["netflix", "netflix com"]);
    }

    #[test]
    fn test_signature_matching_is_case_insensitive() {
        let merchant = netflix().with_regex("^NETFLIX");
        assert!(merchant.matches_signature("netflix com"));
        assert!(!merchant.matches_signature("hulu"));
    }

    #[test]
    fn test_bad_pattern_does_not_block_other_patterns() {
        let merchant = netflix().with_regex("([unclosed").with_regex("^nflx");

        assert_eq!(merchant.signatures().len(), 2);
        assert!(!merchant.signatures()[0].is_compiled());
        assert!(merchant.signatures()[1].is_compiled());
        assert!(merchant.matches_signature("nflx subscription"));
    }

    #[test]
    fn test_deserialized_merchant_compiles_on_register() {
        let json = r#"{
            "id": "spotify",
            "name": "Spotify",
            "category": "ENTERTAINMENT",
            "subcategory": "MUSIC",
            "merchant_channel": "ONLINE",
            "merchant_scope": "GLOBAL",
            "subscription_likely": true,
            "is_marketplace": false,
            "risk_level": "LOW",
            "aliases": ["spotify"],
            "regex": ["^spotify"],
            "logo_hint": { "type": "DOMAIN", "value": "spotify.com" }
        }"#;

        let merchant: Merchant = serde_json::from_str(json).unwrap();
        assert!(merchant.signatures().is_empty());
        assert_eq!(merchant.logo_hint, Some(LogoHint::domain("spotify.com")));

        let registry = MerchantRegistry::from_merchants([merchant]).unwrap();
        let spotify = registry.get("spotify").unwrap();
        assert_eq!(spotify.signatures().len(), 1);
        assert!(spotify.matches_signature("spotify p1a2b3"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let json = r#"{
            "id": "x", "name": "X", "category": "SHOPPING", "subcategory": "CLOTHING",
            "merchant_channel": "ONLINE", "merchant_scope": "LOCAL",
            "subscription_likely": false, "is_marketplace": false, "risk_level": "LOW",
            "aliases": ["x"], "nickname": "xx"
        }"#;

        assert!(serde_json::from_str::<Merchant>(json).is_err());
    }

    #[test]
    fn test_registry_rejects_duplicate_ids() {
        let result = MerchantRegistry::from_merchants([netflix(), netflix()]);

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Duplicate merchant ID: netflix"));
    }

    #[test]
    fn test_registry_iterates_by_id() {
        let registry = fixtures::sample_registry();

        let ids: Vec<&str> = registry.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["amazon", "starbucks", "target"]);
        assert_eq!(registry.len(), 3);
        assert!(registry.contains("target"));
        assert!(registry.get("walmart").is_none());
        assert!(MerchantRegistry::new().is_empty());
    }
}
