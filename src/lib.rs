#![forbid(unsafe_code)]
//! mailguess_lib — guesses a person's work email address from their name
//! and employer, then confirms the guess by probing the destination mail
//! server over SMTP before any message is ever sent.
//!
//! [`orchestrator::verify`] is the top-level entry point; everything else
//! is a stage in its pipeline: [`mx`] resolves a domain and its mail
//! exchangers, [`pattern`] generates and ranks candidate local-parts,
//! [`smtp`] drives the RCPT-probe state machine over a single TCP
//! connection, [`ip_pool`] rotates probes across a bank of local source
//! addresses, and [`catchall`] screens out domains that accept any
//! local-part. [`repo`] defines the persistence contracts everything else
//! is upserted through, with an in-memory reference implementation for
//! tests and the CLI. [`validator`] checks address/domain *format* at the
//! boundary, ahead of DNS or SMTP.

pub mod catchall;
pub mod clock;
pub mod config;
pub mod ip_pool;
pub mod mx;
pub mod orchestrator;
pub mod pattern;
pub mod repo;
pub mod smtp;
pub mod validator;

pub use clock::{Clock, SystemClock, Timestamp};
pub use config::AppConfig;
pub use ip_pool::{BatchOutcome, IpPool};
pub use orchestrator::{
    DetectionMethod, GuessError, Metadata, Repositories, VerificationOutcome, VerificationRequest,
    VerifiedEmail, verify, verify_against_target,
};
pub use pattern::{ALL_TEMPLATES, DerivedPattern, PatternTemplate, VerifiedPattern, derive, expand, rank};
pub use repo::{
    CatchAllDomain, CatchAllRepository, Company, CompanyRepository, PatternGlobal,
    PatternRepository, Person, PersonRepository, RepoError,
};
pub use smtp::{ProbeOptions, ProbeReason, ProbeResult};
pub use validator::{EmailError, NormalizedEmail, ValidationMode, ValidationReport, normalize_email, validate_email};
