//! Ingredient parsing module.
//!
//! Turns free-text ingredient lines (e.g., "1 1/2 cups flour (sifted)") into a
//! count, a canonical short unit and an ingredient name. Parsing is a
//! best-effort heuristic: anything it cannot make sense of degrades to a
//! missing count or an empty unit, never to an error.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Parsed ingredient structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    pub count: Option<f64>,
    pub unit: String,
    pub ingredient: String,
}

/// Unit spellings (lowercase) mapped to their canonical short form.
const UNIT_SYNONYMS: &[(&str, &str)] = &[
    // Volume - US
    ("tablespoons", "tbsp"),
    ("tablespoon", "tbsp"),
    ("tbsps", "tbsp"),
    ("tbsp", "tbsp"),
    ("tbs", "tbsp"),
    ("teaspoons", "tsp"),
    ("teaspoon", "tsp"),
    ("tsps", "tsp"),
    ("tsp", "tsp"),
    ("cups", "cup"),
    ("cup", "cup"),
    ("pints", "pint"),
    ("pint", "pint"),
    ("quarts", "quart"),
    ("quart", "quart"),
    // Volume - Metric
    ("milliliters", "ml"),
    ("millilitres", "ml"),
    ("milliliter", "ml"),
    ("millilitre", "ml"),
    ("ml", "ml"),
    ("liters", "l"),
    ("litres", "l"),
    ("liter", "l"),
    ("litre", "l"),
    // Weight - US
    ("ounces", "oz"),
    ("ounce", "oz"),
    ("oz", "oz"),
    ("pounds", "pound"),
    ("pound", "pound"),
    ("lbs", "pound"),
    ("lb", "pound"),
    // Weight - Metric
    ("kilograms", "kg"),
    ("kilogram", "kg"),
    ("kg", "kg"),
    ("grams", "g"),
    ("gram", "g"),
    ("g", "g"),
];

static UNITS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| UNIT_SYNONYMS.iter().copied().collect());

/// Unicode vulgar fractions seen in scraped recipes.
const VULGAR_FRACTIONS: &[(char, f64)] = &[
    ('½', 0.5),
    ('¼', 0.25),
    ('¾', 0.75),
    ('⅓', 1.0 / 3.0),
    ('⅔', 2.0 / 3.0),
    ('⅛', 0.125),
    ('⅜', 0.375),
    ('⅝', 0.625),
    ('⅞', 0.875),
];

/// Parse a single ingredient line.
pub fn parse_ingredient(raw: &str) -> Ingredient {
    let lower = raw.to_lowercase();
    let cleaned = strip_parentheticals(&lower);
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    // Leading count tokens: "2", "1 1/2", "1-2", "½"
    let count_len = tokens
        .iter()
        .take_while(|t| parse_count_token(t).is_some())
        .count();
    let mut count = combine_counts(&tokens[..count_len]);
    let mut rest = &tokens[count_len..];
    let mut unit = String::new();

    if let Some(first) = rest.first() {
        if let Some(canonical) = canonical_unit(first) {
            unit = canonical.to_string();
            rest = &rest[1..];
        } else if count.is_none() {
            // Amount glued to its unit: "113g", "12oz"
            if let Some((amount, canonical)) = split_glued_amount(first) {
                count = Some(amount);
                unit = canonical.to_string();
                rest = &rest[1..];
            }
        }
    }

    Ingredient {
        count,
        unit,
        ingredient: rest.join(" "),
    }
}

/// Parse every line of a recipe's ingredient list.
pub fn parse_ingredients<S: AsRef<str>>(lines: &[S]) -> Vec<Ingredient> {
    lines.iter().map(|l| parse_ingredient(l.as_ref())).collect()
}

/// Look up the canonical unit for a token, ignoring trailing punctuation.
pub fn canonical_unit(token: &str) -> Option<&'static str> {
    let token = token.trim_end_matches(['.', ',']);
    UNITS.get(token).copied()
}

/// Remove "(...)" annotations, e.g. "1 (15 oz) can" -> "1   can".
/// Nested groups go with their outermost pair; an unmatched opening
/// parenthesis is left in place.
fn strip_parentheticals(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find('(') {
        match matching_close(&rest[start..]) {
            Some(end) => {
                out.push_str(&rest[..start]);
                out.push(' ');
                rest = &rest[start + end + 1..];
            }
            None => {
                out.push_str(&rest[..=start]);
                rest = &rest[start + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Byte offset of the ')' closing the '(' at the start of `s`.
fn matching_close(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Sum leading count tokens so mixed numbers ("1 1/2") become 1.5.
fn combine_counts(tokens: &[&str]) -> Option<f64> {
    if tokens.is_empty() {
        return None;
    }
    tokens
        .iter()
        .map(|t| parse_count_token(t))
        .sum::<Option<f64>>()
}

/// Parse a single count token, including ranges.
///
/// "1-2" is a range and averages to 1.5. When the right side is smaller than
/// the left ("1-1/2") the hyphen joins a mixed number, so the parts are summed.
fn parse_count_token(token: &str) -> Option<f64> {
    let token = token.trim_end_matches(',');
    if let Some((left, right)) = token.split_once(['-', '–']) {
        let low = parse_number(left)?;
        let high = parse_number(right)?;
        return Some(if high >= low {
            (low + high) / 2.0
        } else {
            low + high
        });
    }
    parse_number(token)
}

/// Parse "2", "2.5", "1/2", "½" or "1½".
fn parse_number(s: &str) -> Option<f64> {
    if s.is_empty() {
        return None;
    }

    if let Some(last) = s.chars().last() {
        if let Some(&(_, frac)) = VULGAR_FRACTIONS.iter().find(|(c, _)| *c == last) {
            let whole = &s[..s.len() - last.len_utf8()];
            return if whole.is_empty() {
                Some(frac)
            } else {
                parse_decimal(whole).map(|w| w + frac)
            };
        }
    }

    if let Some((num, den)) = s.split_once('/') {
        let num = parse_decimal(num)?;
        let den = parse_decimal(den)?;
        if den == 0.0 {
            return None;
        }
        return Some(num / den);
    }

    parse_decimal(s)
}

/// Plain non-negative decimal. Rejects "inf", "nan" and signs, which
/// `f64::from_str` would otherwise accept.
fn parse_decimal(s: &str) -> Option<f64> {
    if s.is_empty()
        || !s.chars().all(|c| c.is_ascii_digit() || c == '.')
        || !s.chars().any(|c| c.is_ascii_digit())
    {
        return None;
    }
    s.parse().ok()
}

/// Split "113g" into (113.0, "g").
fn split_glued_amount(token: &str) -> Option<(f64, &'static str)> {
    let idx = token.find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '/'))?;
    if idx == 0 {
        return None;
    }
    let amount = parse_number(&token[..idx])?;
    let unit = canonical_unit(&token[idx..])?;
    Some((amount, unit))
}
