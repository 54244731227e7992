//! Process-wide configuration, constructed once by a caller (the CLI's
//! `main`, or a test) and threaded explicitly into the orchestrator and the
//! IP pool rather than read from a singleton — see the "process-wide
//! state" design note this crate carries forward from its source spec.

use std::net::IpAddr;
use std::time::Duration;

use crate::smtp::ProbeOptions;

/// Everything a [`crate::orchestrator::verify`] run needs that isn't part
/// of the request itself: the source-IP bank, the SMTP identity a probe
/// presents, and the early-exit policy.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Local source addresses the IP pool rotates across. Must be
    /// non-empty; [`crate::ip_pool::IpPool::new`] asserts this.
    pub pool_addresses: Vec<IpAddr>,
    /// Hostname presented in `HELO`.
    pub helo_hostname: String,
    /// Sender address presented in `MAIL FROM`.
    pub sender: String,
    /// How long a probe waits for a reply before giving up, reset on every
    /// inbound byte.
    pub idle_timeout: Duration,
    /// Whether a success in one batch skips probing the remaining
    /// candidates. A real `bool` field, not the dead `'true' == 'true'`
    /// comparison the source carried — see DESIGN.md. Defaults to `true`.
    pub early_exit: bool,
}

impl AppConfig {
    pub fn new(pool_addresses: Vec<IpAddr>, helo_hostname: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            pool_addresses,
            helo_hostname: helo_hostname.into(),
            sender: sender.into(),
            idle_timeout: Duration::from_secs(10),
            early_exit: true,
        }
    }

    pub fn probe_options(&self) -> ProbeOptions {
        let mut options = ProbeOptions::new(self.helo_hostname.clone(), self.sender.clone());
        options.idle_timeout = self.idle_timeout;
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults_early_exit_on_and_ten_second_timeout() {
        let config = AppConfig::new(vec!["10.0.0.1".parse().unwrap()], "prober.local", "verify@prober.local");
        assert!(config.early_exit);
        assert_eq!(config.idle_timeout, Duration::from_secs(10));
    }

    #[test]
    fn probe_options_carries_identity_and_timeout_through() {
        let config = AppConfig::new(vec!["10.0.0.1".parse().unwrap()], "prober.local", "verify@prober.local");
        let options = config.probe_options();
        assert_eq!(options.helo_hostname, "prober.local");
        assert_eq!(options.sender, "verify@prober.local");
        assert_eq!(options.idle_timeout, config.idle_timeout);
    }
}
