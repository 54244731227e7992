use std::net::IpAddr;

use crate::clock::Timestamp;

/// A single verification request: the person to find and the employer to
/// resolve a domain for. `provided_domain`, when set, skips both the
/// company lookup and MX-bounded domain guess.
#[derive(Debug, Clone)]
pub struct VerificationRequest {
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub provided_domain: Option<String>,
}

impl VerificationRequest {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, company_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            company_name: company_name.into(),
            provided_domain: None,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.provided_domain = Some(domain.into());
        self
    }
}

/// How a domain was flagged catch-all for this response, if it was.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionMethod {
    /// The domain was already on the deny-list; no probe was sent.
    DatabaseLookup,
    /// A live randomised probe against the domain found it catch-all.
    RandomizedProbe,
}

impl DetectionMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DatabaseLookup => "database_lookup",
            Self::RandomizedProbe => "randomized_probe",
        }
    }
}

/// One accepted candidate address and the source IP the accepting probe
/// used.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedEmail {
    pub email: String,
    pub source_ip: IpAddr,
}

/// Response metadata echoed back alongside the verified addresses.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub domain: String,
    /// `Some(true)` once a catch-all verdict (from either detection path)
    /// is attached to this response; `Some(false)` once a positive has
    /// been confirmed not catch-all; `None` when neither ran.
    pub is_catch_all: Option<bool>,
}

/// The orchestrator's top-level result for one request.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOutcome {
    pub success: bool,
    pub verified_emails: Vec<VerifiedEmail>,
    pub total_patterns_tested: usize,
    pub patterns_tested_before_valid: Option<usize>,
    pub metadata: Metadata,
    pub detection_method: Option<DetectionMethod>,
    pub time_taken_ms: u64,
}

impl VerificationOutcome {
    pub(super) fn precheck_catch_all(request: &VerificationRequest, domain: &str, started_at: Timestamp, now: Timestamp) -> Self {
        Self {
            success: false,
            verified_emails: Vec::new(),
            total_patterns_tested: 0,
            patterns_tested_before_valid: None,
            metadata: Metadata {
                first_name: request.first_name.clone(),
                last_name: request.last_name.clone(),
                company: request.company_name.clone(),
                domain: domain.to_string(),
                is_catch_all: Some(true),
            },
            detection_method: Some(DetectionMethod::DatabaseLookup),
            time_taken_ms: now.0.saturating_sub(started_at.0),
        }
    }
}
