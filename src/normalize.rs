// 🧹 Normalizer - Raw bank statement text → canonical token string
//
// "PENDING PAYMENT AMAZON.COM*2K4 05/12/2024" → "amazon com 2k4"
//
// Stages run in a fixed order; each one assumes the output of the previous:
// 1. NFKD + drop combining marks      (café → cafe)
// 2. Diacritic table                   (ø → o, æ → ae, ß → ss)
// 3. Lowercase
// 4. Strip UUIDs, long hex, dates, 4+ digit runs
// 5. Punctuation and '*' become separators
// 6. Drop noise words, rejoin with single spaces

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// STATIC TABLES
// ============================================================================

/// Tokens that carry no merchant-identifying signal
const NOISE_WORDS: &[&str] = &[
    "pending",
    "ref",
    "reference",
    "payment",
    "pos",
    "transaction",
    "txn",
    "purchase",
    "debit",
    "credit",
    "card",
    "visa",
    "mastercard",
    "amex",
    "check",
    "ach",
    "wire",
    "transfer",
    "online",
    "mobile",
    "app",
    "inc",
    "llc",
    "ltd",
    "corp",
    "corporation",
    "co",
    "the",
];

/// ASCII replacement for letters NFKD leaves (or may leave) non-ASCII.
/// Looked up with the lowercase form of the character.
fn fold_diacritic(c: char) -> Option<&'static str> {
    let folded = match c {
        // Nordic
        'ø' => "o",
        'æ' => "ae",
        'å' => "a",
        'ö' => "o",
        'ä' => "a",
        'ü' => "u",
        // German
        'ß' => "ss",
        // French
        'é' | 'è' | 'ê' | 'ë' => "e",
        'à' | 'â' => "a",
        'î' | 'ï' => "i",
        'ô' => "o",
        'ù' | 'û' => "u",
        'ç' => "c",
        // Spanish
        'ñ' => "n",
        'á' => "a",
        'í' => "i",
        'ó' => "o",
        'ú' => "u",
        // Polish
        'ł' => "l",
        'ń' => "n",
        'ś' => "s",
        'ź' | 'ż' => "z",
        'ć' => "c",
        // Czech/Slovak
        'č' => "c",
        'ř' => "r",
        'š' => "s",
        'ž' => "z",
        'ý' => "y",
        'ď' => "d",
        'ť' => "t",
        'ň' => "n",
        _ => return None,
    };
    Some(folded)
}

struct NoisePatterns {
    uuid: Regex,
    hash: Regex,
    date: Regex,
    numeric: Regex,
    punctuation: Regex,
}

fn noise_patterns() -> &'static NoisePatterns {
    static PATTERNS: OnceLock<NoisePatterns> = OnceLock::new();

    PATTERNS.get_or_init(|| NoisePatterns {
        uuid: Regex::new(
            r"(?i)[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}",
        )
        .expect("uuid pattern is valid"),
        hash: Regex::new(r"(?i)[0-9a-f]{16,}").expect("hash pattern is valid"),
        // ASCII word boundaries: a non-Latin letter glued to digits still delimits them
        date: Regex::new(
            r"(?-u:\b)[0-9]{1,2}[/\-][0-9]{1,2}[/\-][0-9]{2,4}(?-u:\b)",
        )
        .expect("date pattern is valid"),
        numeric: Regex::new(r"(?-u:\b)[0-9]{4,}(?-u:\b)").expect("numeric pattern is valid"),
        punctuation: Regex::new(r"[^a-zA-Z0-9_\s*]").expect("punctuation pattern is valid"),
    })
}

fn noise_words() -> &'static HashSet<&'static str> {
    static WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    WORDS.get_or_init(|| NOISE_WORDS.iter().copied().collect())
}

/// True if `token` is dropped during normalization
pub fn is_noise_word(token: &str) -> bool {
    noise_words().contains(token)
}

// ============================================================================
// NORMALIZE
// ============================================================================

/// Normalize raw transaction text for matching.
///
/// Total and deterministic; the result may be empty when every token was
/// noise or punctuation. Normalizing an already-normalized string returns it unchanged.
///
/// # Examples
///
/// ```
/// use merchant_resolver::normalize::normalize;
///
/// assert_eq!(normalize("Café"), "cafe");
/// assert_eq!(normalize("pending payment amazon"), "amazon");
/// assert_eq!(normalize("7-Eleven 17635"), "7 eleven");
/// ```
pub fn normalize(raw: &str) -> String {
    let patterns = noise_patterns();

    // 1. Canonical decomposition, then drop combining diacritical marks
    let decomposed: String = raw
        .nfkd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect();

    // 2. Supplementary diacritic table, one character at a time
    let mut folded = String::with_capacity(decomposed.len());
    for c in decomposed.chars() {
        let mut lower = c.to_lowercase();
        let replacement = match (lower.next(), lower.next()) {
            (Some(single), None) => fold_diacritic(single),
            _ => None,
        };

        match replacement {
            Some(ascii) => folded.push_str(ascii),
            None => folded.push(c),
        }
    }

    // 3. Lowercase
    let lowered = folded.to_lowercase();

    // 4. Transactional artifacts (order matters: UUIDs contain hex runs)
    let stripped = patterns.uuid.replace_all(&lowered, " ");
    let stripped = patterns.hash.replace_all(&stripped, " ");
    let stripped = patterns.date.replace_all(&stripped, " ");
    let stripped = patterns.numeric.replace_all(&stripped, " ");

    // 5. Punctuation → space, keeping '*' until now so glued tokens split
    let separated = patterns.punctuation.replace_all(&stripped, " ");
    let separated = separated.replace('*', " ");

    // 6. Drop noise words and rejoin
    separated
        .split_whitespace()
        .filter(|token| !is_noise_word(token))
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// TOKENIZE
// ============================================================================

/// Split a normalized string into its set of unique tokens
pub fn tokenize(normalized: &str) -> HashSet<&str> {
    normalized.split_whitespace().collect()
}

// ============================================================================
// TESTS
// ============================================================================
