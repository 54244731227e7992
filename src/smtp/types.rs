use std::net::IpAddr;

use crate::clock::Timestamp;

/// Terminal classification of a single RCPT-probe attempt.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeReason {
    Timeout,
    ConnectionError,
    InvalidRecipient,
    FullMailbox,
    UnknownError,
}

impl ProbeReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "TIMEOUT",
            Self::ConnectionError => "CONNECTION_ERROR",
            Self::InvalidRecipient => "INVALID_RECIPIENT",
            Self::FullMailbox => "FULL_MAILBOX",
            Self::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

/// The outcome of probing one email address via one SMTP session.
///
/// `reason` is required when `valid` is `false`; `details` carries the
/// opaque server text (or local error description) alongside it.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub email: String,
    pub valid: bool,
    pub reason: Option<ProbeReason>,
    pub details: Option<String>,
    pub source_ip: IpAddr,
    pub block_signal: bool,
    pub probed_at: Timestamp,
}
