use crate::clock::Timestamp;
use crate::pattern::VerifiedPattern;
use crate::smtp::ProbeResult;

/// A known employer: its discovered domain, catch-all status, and the
/// patterns verified against it so far.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    pub id: String,
    pub name: String,
    pub domain: String,
    pub is_catch_all: bool,
    pub verified_patterns: Vec<VerifiedPattern>,
}

impl Company {
    pub fn new(id: impl Into<String>, name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            domain: domain.into(),
            is_catch_all: false,
            verified_patterns: Vec::new(),
        }
    }
}

/// The cross-company usage counter for one template, independent of any
/// single employer's verified set.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PatternGlobal {
    pub template: crate::pattern::PatternTemplate,
    pub usage_count: u32,
}

/// A person being verified, keyed by the natural (first, last, company) key.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub domain: String,
    pub verified_email: Option<String>,
    pub email_verified_at: Option<Timestamp>,
    pub all_tested_emails: Vec<ProbeResult>,
}

impl Person {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        company: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            company: company.into(),
            domain: domain.into(),
            verified_email: None,
            email_verified_at: None,
            all_tested_emails: Vec::new(),
        }
    }
}

/// A domain already known to accept any local-part. Presence short-circuits
/// all future probing for that domain.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CatchAllDomain {
    pub domain: String,
    pub verification_attempts: u32,
    pub last_verified: Timestamp,
}
