use super::types::ProbeReason;

/// Literal substrings (checked case-insensitively) that flag a probe as
/// carrying a block signal, independent of its `valid` verdict.
const BLOCK_SIGNAL_SUBSTRINGS: [&str; 8] = [
    "blocked",
    "blacklisted",
    "banned",
    "denied",
    "rejected",
    "spam",
    "authentication required",
    "connection refused",
];

/// Classifies the RCPT reply's first three ASCII digits into a verdict.
/// Returns `None` when the reply is invalid (valid ⇒ `250`).
pub fn classify_rcpt_code(code: &str) -> (bool, Option<ProbeReason>) {
    match code {
        "250" => (true, None),
        "550" | "551" | "553" => (false, Some(ProbeReason::InvalidRecipient)),
        "452" => (false, Some(ProbeReason::FullMailbox)),
        _ => (false, Some(ProbeReason::UnknownError)),
    }
}

/// True if `text`'s lowercase form contains any block-signal substring.
pub fn has_block_signal(text: &str) -> bool {
    let lower = text.to_lowercase();
    BLOCK_SIGNAL_SUBSTRINGS.iter().any(|needle| lower.contains(needle))
}
