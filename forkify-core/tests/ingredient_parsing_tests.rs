//! Golden file tests for ingredient parsing.
//!
//! Test cases are individual JSON files in `fixtures/ingredient_parsing/curated/`:
//! ```json
//! {
//!   "raw": "1/2 cup milk",
//!   "expected": { "count": 0.5, "unit": "cup", "ingredient": "milk" }
//! }
//! ```

use forkify_core::ingredient_parser::{parse_ingredient, Ingredient};
use glob::glob;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// A test case loaded from a JSON fixture file
#[derive(Debug, Deserialize)]
struct TestCase {
    raw: String,
    expected: Ingredient,
}

fn load_test_cases() -> Vec<(String, TestCase)> {
    let fixtures_dir =
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/ingredient_parsing");
    let pattern = fixtures_dir.join("*").join("*.json");

    let mut cases = Vec::new();
    for entry in glob(&pattern.to_string_lossy()).expect("Failed to read glob pattern") {
        let path = entry.expect("Failed to read directory entry");
        let name = path.file_stem().unwrap().to_string_lossy().into_owned();
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
        let case: TestCase = serde_json::from_str(&content)
            .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e));
        cases.push((name, case));
    }

    // Sort by name for deterministic ordering
    cases.sort_by(|a, b| a.0.cmp(&b.0));
    cases
}

fn counts_match(actual: Option<f64>, expected: Option<f64>) -> bool {
    match (actual, expected) {
        (Some(a), Some(e)) => (a - e).abs() < 1e-9,
        (None, None) => true,
        _ => false,
    }
}

#[test]
fn test_ingredient_parsing_golden_files() {
    let cases = load_test_cases();
    assert!(!cases.is_empty(), "no ingredient parsing fixtures found");

    let mut failures = Vec::new();
    for (name, case) in &cases {
        let actual = parse_ingredient(&case.raw);
        let matches = counts_match(actual.count, case.expected.count)
            && actual.unit == case.expected.unit
            && actual.ingredient == case.expected.ingredient;
        if !matches {
            failures.push((name.clone(), case.raw.clone(), case.expected.clone(), actual));
        }
    }

    if !failures.is_empty() {
        let mut msg = format!(
            "\n{} failures across {} tests:\n",
            failures.len(),
            cases.len()
        );
        for (name, raw, expected, actual) in &failures {
            msg.push_str(&format!("\n=== {} ===\n", name));
            msg.push_str(&format!("Input: {:?}\n", raw));
            msg.push_str(&format!("Expected: {:#?}\n", expected));
            msg.push_str(&format!("Actual:   {:#?}\n", actual));
        }
        panic!("{}", msg);
    }
}
