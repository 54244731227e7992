//! Candidate local-part generation from a person's name, and the reverse
//! mapping from a verified address back to a template. Ten fixed templates,
//! a stable declared order, no configuration.

mod rank;
mod template;

pub use rank::{rank, VerifiedPattern};
pub use template::{derive, expand, DerivedPattern, PatternTemplate, ALL_TEMPLATES};
