//! Validation prompt preparation.
//!
//! Inputs are capped with [`truncate`] and then combined into a single
//! prompt by [`build_validation_prompt`]. Both functions are pure.

use std::borrow::Cow;

/// Default per-input character cap.
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 50_000;

/// Characters reserved for the truncation notice.
const TRUNCATION_RESERVE: usize = 100;

/// The instruction that closes every validation prompt.
pub const VALIDATION_USER_INSTRUCTION: &str =
    "Perform the validation now and report the result in the required format.";

const VALIDATION_SYSTEM_INSTRUCTION: &str = "\
You are a log validator. Parse the log provided below and validate it against the test case provided below.

For every step of the test case, decide whether the log shows that the step was executed as expected. \
Support each decision with concrete evidence quoted from the log, such as timestamps, request IDs, \
transaction IDs or message excerpts. If the log or the test case is malformed or incomplete, note it \
and still attempt the validation with the information available.

Your answer must end with the verdict in exactly this format:

Overall Result: PASS
or
Overall Result: FAIL

followed by:

Reasoning and Evidence:
- one bullet per test case step, citing the log excerpts that support the result";

/// Caps `content` at `max_length` characters.
///
/// Content within the limit is returned unchanged. Longer content keeps its
/// first `max_length - 100` characters followed by a notice stating the
/// original length and the limit.
pub fn truncate(content: &str, max_length: usize) -> Cow<'_, str> {
    let original_length = content.chars().count();
    if original_length <= max_length {
        return Cow::Borrowed(content);
    }

    let keep = max_length.saturating_sub(TRUNCATION_RESERVE);
    tracing::debug!(
        "[ContentPreparer] Truncating content from {} to {} characters",
        original_length,
        keep
    );

    let mut truncated: String = content.chars().take(keep).collect();
    truncated.push_str(&truncation_notice(original_length, max_length));
    Cow::Owned(truncated)
}

fn truncation_notice(original_length: usize, max_length: usize) -> String {
    format!(
        "\n\n[Content truncated: original length {original_length} characters, limit {max_length} characters]"
    )
}

/// Combines a log and a test case into the validation prompt sent to the model.
///
/// Never fails; malformed inputs are passed through and left for the model
/// to comment on.
pub fn build_validation_prompt(log_content: &str, test_case_content: &str) -> String {
    format!(
        "{VALIDATION_SYSTEM_INSTRUCTION}\n\n\
         Log:\n```\n{log_content}\n```\n\n\
         Test Case:\n```\n{test_case_content}\n```\n\n\
         {VALIDATION_USER_INSTRUCTION}"
    )
}

/// Selects the prompt for a chat request.
///
/// When both a log and a test case are supplied, each is capped at
/// `max_length` and the validation prompt is built from them. Otherwise the
/// message is used verbatim.
pub fn prepare_prompt(
    message: &str,
    log_content: Option<&str>,
    test_case_content: Option<&str>,
    max_length: usize,
) -> String {
    match (log_content, test_case_content) {
        (Some(log), Some(test_case)) => build_validation_prompt(
            &truncate(log, max_length),
            &truncate(test_case, max_length),
        ),
        _ => message.to_string(),
    }
}
