// 🔎 Resolver - Raw description → best merchant (or no match)
//
// Pipeline:
// 1. normalize(raw); empty → NoMatch(0)
// 2. score every registry merchant (regex signature + aliases)
// 3. keep confidence > 0, rank descending
// 4. top ≥ 0.70 → Matched, else NoMatch carrying the best confidence
//
// Ties keep registry order (merchant id ascending), so the smallest id wins.

use crate::confidence::{
    aggregate_score, alias_score, regex_score, round_confidence, CONFIDENCE_THRESHOLD,
};
use crate::entities::merchant::{LogoHint, Merchant, MerchantRegistry};
use crate::entities::taxonomy::{Category, MerchantChannel, MerchantScope, RiskLevel, Subcategory};
use crate::normalize::normalize;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

// ============================================================================
// RESULT TYPES
// ============================================================================

/// A merchant paired with its confidence for one resolve call
#[derive(Debug, Clone)]
pub struct MatchCandidate<'a> {
    pub merchant: &'a Merchant,
    pub confidence: f64,
}

/// Success payload - every field a caller needs to label the transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MerchantMatch {
    pub merchant_id: String,
    pub name: String,
    pub category: Category,
    pub subcategory: Subcategory,
    pub merchant_channel: MerchantChannel,
    pub merchant_scope: MerchantScope,
    pub subscription_likely: bool,
    pub is_marketplace: bool,
    pub risk_level: RiskLevel,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_hint: Option<LogoHint>,
}

impl MerchantMatch {
    fn from_merchant(merchant: &Merchant, confidence: f64) -> Self {
        MerchantMatch {
            merchant_id: merchant.id.clone(),
            name: merchant.name.clone(),
            category: merchant.category,
            subcategory: merchant.subcategory,
            merchant_channel: merchant.merchant_channel,
            merchant_scope: merchant.merchant_scope,
            subscription_likely: merchant.subscription_likely,
            is_marketplace: merchant.is_marketplace,
            risk_level: merchant.risk_level,
            confidence: round_confidence(confidence),
            website: merchant.website.clone(),
            logo_hint: merchant.logo_hint.clone(),
        }
    }
}

/// Outcome of a resolve call; confidence is always in [0, 1] with two decimals
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveResult {
    Matched(MerchantMatch),
    NoMatch { confidence: f64 },
}

impl ResolveResult {
    fn no_match(best_confidence: f64) -> Self {
        ResolveResult::NoMatch {
            confidence: round_confidence(best_confidence),
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            ResolveResult::Matched(m) => m.confidence,
            ResolveResult::NoMatch { confidence } => *confidence,
        }
    }

    pub fn merchant_id(&self) -> Option<&str> {
        match self {
            ResolveResult::Matched(m) => Some(&m.merchant_id),
            ResolveResult::NoMatch { .. } => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, ResolveResult::Matched(_))
    }
}

/// Wire shape: a match serializes flat; no match is `{"merchant_id": null, "confidence": x}`
impl Serialize for ResolveResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResolveResult::Matched(m) => m.serialize(serializer),
            ResolveResult::NoMatch { confidence } => {
                let mut state = serializer.serialize_struct("NoMatch", 2)?;
                state.serialize_field("merchant_id", &Option::<&str>::None)?;
                state.serialize_field("confidence", confidence)?;
                state.end()
            }
        }
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Confidence of one merchant against an already-normalized input
pub fn merchant_confidence(normalized_input: &str, merchant: &Merchant) -> f64 {
    let regex = regex_score(merchant.matches_signature(normalized_input));
    let alias = alias_score(normalized_input, &merchant.aliases);

    aggregate_score(regex, alias)
}

/// Every merchant with a positive confidence, best first
pub fn find_candidates<'a>(
    normalized_input: &str,
    registry: &'a MerchantRegistry,
) -> Vec<MatchCandidate<'a>> {
    let mut candidates: Vec<MatchCandidate<'a>> = registry
        .iter()
        .filter_map(|merchant| {
            let confidence = merchant_confidence(normalized_input, merchant);
            (confidence > 0.0).then_some(MatchCandidate {
                merchant,
                confidence,
            })
        })
        .collect();

    // Stable: equal confidences keep id-ascending registry order
    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    candidates
}

/// Resolve a raw transaction description against the registry
pub fn resolve(raw_input: &str, registry: &MerchantRegistry) -> ResolveResult {
    let normalized_input = normalize(raw_input);
    if normalized_input.is_empty() {
        tracing::trace!(raw_input, "input normalized to nothing");
        return ResolveResult::no_match(0.0);
    }

    let candidates = find_candidates(&normalized_input, registry);
    let Some(best) = candidates.first() else {
        tracing::trace!(%normalized_input, "no candidates");
        return ResolveResult::no_match(0.0);
    };

    tracing::debug!(
        %normalized_input,
        merchant_id = %best.merchant.id,
        confidence = best.confidence,
        candidates = candidates.len(),
        "best candidate"
    );

    if best.confidence < CONFIDENCE_THRESHOLD {
        return ResolveResult::no_match(best.confidence);
    }

    ResolveResult::Matched(MerchantMatch::from_merchant(best.merchant, best.confidence))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::merchant::fixtures::sample_registry;

    fn has_two_decimals(confidence: f64) -> bool {
        ((confidence * 100.0).round() / 100.0 - confidence).abs() < 1e-12
    }

    #[test]
    fn test_exact_alias_match() {
        let registry = sample_registry();
        let result = resolve("amazon", &registry);

        assert_eq!(result.merchant_id(), Some("amazon"));
        assert!(result.confidence() >= 0.7);
        // regex ^amazon + exact alias, boosted and capped
        assert_eq!(result.confidence(), 1.0);
    }

    #[test]
    fn test_regex_path_match() {
        let registry = sample_registry();
        let result = resolve("amzn mktp de 12345", &registry);

        assert_eq!(result.merchant_id(), Some("amazon"));
        assert_eq!(result.confidence(), 0.96);
    }

    #[test]
    fn test_noise_words_ignored() {
        let registry = sample_registry();
        let result = resolve("pos purchase starbucks visa", &registry);

        assert_eq!(result.merchant_id(), Some("starbucks"));
        assert_eq!(result.confidence(), 0.95);
    }

    #[test]
    fn test_partial_alias_in_longer_string() {
        let registry = sample_registry();
        let result = resolve("target store t-3346", &registry);

        assert_eq!(result.merchant_id(), Some("target"));
    }

    #[test]
    fn test_success_carries_merchant_fields() {
        let registry = sample_registry();

        match resolve("amazon prime", &registry) {
            ResolveResult::Matched(m) => {
                assert_eq!(m.merchant_id, "amazon");
                assert_eq!(m.name, "Amazon");
                assert_eq!(m.category, Category::Shopping);
                assert_eq!(m.subcategory, Subcategory::ECommerce);
                assert_eq!(m.merchant_channel, MerchantChannel::Hybrid);
                assert_eq!(m.merchant_scope, MerchantScope::Global);
                assert!(!m.subscription_likely);
                assert!(m.is_marketplace);
                assert_eq!(m.risk_level, RiskLevel::Low);
                assert_eq!(m.website.as_deref(), Some("https://amazon.com"));
                assert_eq!(m.logo_hint, Some(LogoHint::domain("amazon.com")));
            }
            other => panic!("expected a match, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_is_no_match() {
        let registry = sample_registry();
        assert_eq!(
            resolve("", &registry),
            ResolveResult::NoMatch { confidence: 0.0 }
        );
    }

    #[test]
    fn test_noise_only_input_is_no_match() {
        let registry = sample_registry();
        assert_eq!(
            resolve("pending payment visa card", &registry),
            ResolveResult::NoMatch { confidence: 0.0 }
        );
        assert!(!resolve("*** --- ...", &registry).is_match());
        assert!(!resolve("123456789", &registry).is_match());
    }

    #[test]
    fn test_unknown_merchant_is_no_match() {
        let registry = sample_registry();
        let result = resolve("random unknown merchant xyz", &registry);

        assert_eq!(result.merchant_id(), None);
        assert_eq!(result.confidence(), 0.0);
    }

    #[test]
    fn test_below_threshold_reports_best_confidence() {
        let registry = sample_registry();
        // {store, shop, retail} vs {target, store}: 1/4 * 0.75
        let result = resolve("store shop retail", &registry);

        assert_eq!(result, ResolveResult::NoMatch { confidence: 0.19 });
    }

    #[test]
    fn test_empty_registry_never_matches() {
        let registry = MerchantRegistry::new();

        for input in ["amazon", "starbucks", "", "anything at all"] {
            assert_eq!(
                resolve(input, &registry),
                ResolveResult::NoMatch { confidence: 0.0 }
            );
        }
    }

    #[test]
    fn test_exact_beats_partial() {
        let registry = sample_registry();
        let exact = resolve("starbucks", &registry);
        let partial = resolve("starbucks coffee shop location", &registry);

        assert!(exact.confidence() >= partial.confidence());
    }

    #[test]
    fn test_ties_resolve_to_smallest_id() {
        let registry = MerchantRegistry::from_merchants([
            Merchant::new(
                "zeta-coffee",
                "Zeta Coffee",
                Subcategory::Cafe,
                MerchantChannel::Physical,
                MerchantScope::Local,
                RiskLevel::Low,
            )
            .with_alias("coffee"),
            Merchant::new(
                "alpha-coffee",
                "Alpha Coffee",
                Subcategory::Cafe,
                MerchantChannel::Physical,
                MerchantScope::Local,
                RiskLevel::Low,
            )
            .with_alias("coffee"),
        ])
        .unwrap();

        assert_eq!(resolve("coffee", &registry).merchant_id(), Some("alpha-coffee"));

        let normalized = normalize("coffee");
        let candidates = find_candidates(&normalized, &registry);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].merchant.id, "alpha-coffee");
    }

    #[test]
    fn test_confidence_bounded_and_rounded() {
        let registry = sample_registry();
        let inputs = [
            "amazon",
            "amazon prime",
            "AMZN Mktp US*2K4LK1ZX0",
            "target store t-3346",
            "store shop retail",
            "sbux 0042",
            "starbucks coffee shop location",
            "Café Ærø 05/12/2024",
            "",
        ];

        for input in inputs {
            let confidence = resolve(input, &registry).confidence();
            assert!((0.0..=1.0).contains(&confidence), "{:?} → {}", input, confidence);
            assert!(has_two_decimals(confidence), "{:?} → {}", input, confidence);
        }
    }

    #[test]
    fn test_no_match_wire_shape() {
        let json = serde_json::to_value(ResolveResult::NoMatch { confidence: 0.19 }).unwrap();
        assert_eq!(json, serde_json::json!({ "merchant_id": null, "confidence": 0.19 }));
    }

    #[test]
    fn test_match_wire_shape() {
        let registry = sample_registry();
        let json = serde_json::to_value(resolve("starbucks", &registry)).unwrap();

        assert_eq!(json["merchant_id"], "starbucks");
        assert_eq!(json["category"], "FOOD_AND_DRINK");
        assert_eq!(json["subcategory"], "CAFE");
        assert_eq!(json["merchant_channel"], "PHYSICAL");
        assert_eq!(json["merchant_scope"], "GLOBAL");
        assert_eq!(json["risk_level"], "LOW");
        assert_eq!(json["confidence"], 0.95);
        assert_eq!(json["logo_hint"]["type"], "DOMAIN");
        assert_eq!(json["logo_hint"]["value"], "starbucks.com");
    }

    #[test]
    fn test_optional_fields_omitted_when_absent() {
        let registry = MerchantRegistry::from_merchants([Merchant::new(
            "corner-deli",
            "Corner Deli",
            Subcategory::Convenience,
            MerchantChannel::Physical,
            MerchantScope::Local,
            RiskLevel::Low,
        )
        .with_alias("corner deli")])
        .unwrap();

        let json = serde_json::to_value(resolve("CORNER DELI #12", &registry)).unwrap();
        assert_eq!(json["merchant_id"], "corner-deli");
        assert!(json.get("website").is_none());
        assert!(json.get("logo_hint").is_none());
    }
}
