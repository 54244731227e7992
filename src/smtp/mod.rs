//! The SMTP RCPT-probe state machine: one TCP connection per address,
//! HELO → MAIL FROM → RCPT TO → QUIT, classified into a terminal verdict.
//! Never issues DATA.

mod classify;
mod error;
mod options;
mod session;
mod state;
mod types;

pub use error::SmtpError as Error;
pub use options::ProbeOptions;
pub use state::{probe, ProbeState};
pub use types::{ProbeReason, ProbeResult};
