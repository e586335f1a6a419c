//! Detection of structured test-case content inside free-text chat input.

use once_cell::sync::Lazy;
use regex::Regex;

static TEST_CASE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\{TestCaseID|\bStepNo\b|<StepNo").expect("test case pattern is valid")
});

/// Returns true when `text` looks like a pasted test case.
///
/// Matches `{TestCaseID`, a standalone `StepNo` word, or a `<StepNo` tag,
/// ignoring case.
pub fn contains_test_case(text: &str) -> bool {
    TEST_CASE_PATTERN.is_match(text)
}
