//! Rotates outbound SMTP connections across a bank of local source
//! addresses, enforcing a per-address cooldown and bounding how many probes
//! run concurrently.

mod pool;

pub use pool::{BatchOutcome, IpPool};
