//! DNS MX resolution and company-name-to-domain discovery.
//!
//! [`check_mx`] performs a synchronous MX lookup using the system resolver.
//! [`guess_domain`] turns a bare company name into a likely registered
//! domain by slugifying the name and probing a fixed list of TLDs for the
//! first one that has MX records.

mod error;
mod guess;
mod resolver;
mod types;

pub use error::MxError as Error;
pub use guess::{guess_domain, slugify_company_name};
pub use resolver::{check_mx, resolve_exchange_ip};
pub(crate) use resolver::normalize_domain;
pub use types::{MxRecord, MxStatus};
