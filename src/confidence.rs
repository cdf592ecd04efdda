// 🎯 Confidence Scorer - Two signals, one bounded score
//
// Signals:
// - Regex signature match → flat 0.85
// - Alias similarity      → 0.95 exact, (0.8, 0.95] substring, ≤ 0.75 token overlap
//
// Aggregate = max(regex, alias), +0.05 when both agree strongly, clamped to [0, 1]

use crate::normalize::tokenize;
use std::collections::HashSet;

// ============================================================================
// WEIGHTS
// ============================================================================

pub const REGEX_MATCH_SCORE: f64 = 0.85;
pub const EXACT_ALIAS_SCORE: f64 = 0.95;

/// Floor of the substring (alias contained in input) band
pub const CONTAINS_ALIAS_BASE: f64 = 0.8;

/// Width of the substring band, scaled by alias length / input length
pub const CONTAINS_ALIAS_SPAN: f64 = 0.15;

/// Jaccard similarity is scaled into [0, 0.75]
pub const ALIAS_SIMILARITY_MAX: f64 = 0.75;

/// Added when the regex matched and the alias score exceeds `AGREEMENT_ALIAS_FLOOR`
pub const AGREEMENT_BOOST: f64 = 0.05;
pub const AGREEMENT_ALIAS_FLOOR: f64 = 0.5;

/// Minimum confidence for a successful resolution
pub const CONFIDENCE_THRESHOLD: f64 = 0.7;

// ============================================================================
// SCORING FUNCTIONS
// ============================================================================

/// |A ∩ B| / |A ∪ B|; two empty sets score 0, not 1
pub fn jaccard_similarity<'a>(a: &HashSet<&'a str>, b: &HashSet<&'a str>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(b).count();
    let union = a.union(b).count();

    intersection as f64 / union as f64
}

pub fn regex_score(matched: bool) -> f64 {
    if matched {
        REGEX_MATCH_SCORE
    } else {
        0.0
    }
}

/// Best score of `normalized_input` against any alias.
///
/// An exact alias returns 0.95 immediately. A contained alias scores
/// `min(0.95, 0.8 + len(alias) / len(input) * 0.15)`. Anything else falls back
/// to token Jaccard similarity scaled by 0.75.
pub fn alias_score<S: AsRef<str>>(normalized_input: &str, aliases: &[S]) -> f64 {
    if aliases.is_empty() {
        return 0.0;
    }

    let input_tokens = tokenize(normalized_input);
    let input_len = normalized_input.len() as f64;
    let mut best: f64 = 0.0;

    for alias in aliases {
        let alias = alias.as_ref();

        if normalized_input == alias {
            return EXACT_ALIAS_SCORE;
        }

        let score = if normalized_input.contains(alias) {
            let coverage = alias.len() as f64 / input_len;
            EXACT_ALIAS_SCORE.min(CONTAINS_ALIAS_BASE + coverage * CONTAINS_ALIAS_SPAN)
        } else {
            jaccard_similarity(&input_tokens, &tokenize(alias)) * ALIAS_SIMILARITY_MAX
        };

        best = best.max(score);
    }

    best
}

/// Combine both signals into a confidence in [0, 1]
pub fn aggregate_score(regex_score: f64, alias_score: f64) -> f64 {
    if regex_score == 0.0 && alias_score == 0.0 {
        return 0.0;
    }

    let base = regex_score.max(alias_score);
    let boost = if regex_score > 0.0 && alias_score > AGREEMENT_ALIAS_FLOOR {
        AGREEMENT_BOOST
    } else {
        0.0
    };

    (base + boost).clamp(0.0, 1.0)
}

/// Round half-up to two decimals (inputs are never negative)
pub fn round_confidence(confidence: f64) -> f64 {
    (confidence * 100.0).round() / 100.0
}

// ============================================================================
// TESTS
// ============================================================================
