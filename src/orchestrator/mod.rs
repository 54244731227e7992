//! The top-level verification flow: resolve a domain, short-circuit known
//! catch-alls, rank and probe candidate addresses, guard a success against
//! a live catch-all check, then persist what was learned. Ties together
//! every other module in the crate; see [`verify`] for the entry point.

mod error;
mod flow;
mod types;

pub use error::GuessError;
pub use flow::{verify, verify_against_target, Repositories};
pub use types::{DetectionMethod, Metadata, VerificationOutcome, VerificationRequest, VerifiedEmail};
