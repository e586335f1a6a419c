//! Extraction of the model's verdict from a task justification.
//!
//! The model is asked to end its answer with an `Overall Result:` line and a
//! `Reasoning and Evidence:` section. When the verdict line is missing the
//! result is reported as [`OverallResult::Unknown`].

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static OVERALL_RESULT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // Optional markdown emphasis around the label and value; never spans lines.
    Regex::new(r"(?i)Overall Result[*_]*[ \t]*:[*_]*[ \t]*[*_]*(PASS|FAIL)\b")
        .expect("overall result pattern is valid")
});

const REASONING_MARKER: &str = "Reasoning and Evidence:";

/// The pass/fail verdict reported by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallResult {
    Pass,
    Fail,
    Unknown,
}

impl fmt::Display for OverallResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// Verdict and explanation parsed from a justification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskVerdict {
    pub result: OverallResult,
    pub reasoning: String,
}

impl TaskVerdict {
    pub fn from_justification(justification: &str) -> Self {
        Self {
            result: extract_overall_result(justification),
            reasoning: extract_reasoning(justification),
        }
    }
}

pub fn extract_overall_result(justification: &str) -> OverallResult {
    OVERALL_RESULT_PATTERN
        .captures(justification)
        .and_then(|caps| caps.get(1))
        .map(|m| {
            if m.as_str().eq_ignore_ascii_case("PASS") {
                OverallResult::Pass
            } else {
                OverallResult::Fail
            }
        })
        .unwrap_or(OverallResult::Unknown)
}

/// Returns the text after the `Reasoning and Evidence:` marker, or the whole
/// justification when the marker is absent.
pub fn extract_reasoning(justification: &str) -> String {
    match justification.find(REASONING_MARKER) {
        Some(index) => justification[index + REASONING_MARKER.len()..]
            .trim()
            .to_string(),
        None => justification.trim().to_string(),
    }
}
