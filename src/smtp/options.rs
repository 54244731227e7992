use std::time::Duration;

/// Constants shared by every probe in a run: the HELO hostname and MAIL
/// FROM sender are fixed configuration, not derived per probe.
#[derive(Debug, Clone)]
pub struct ProbeOptions {
    pub helo_hostname: String,
    pub sender: String,
    pub idle_timeout: Duration,
    pub smtp_port: u16,
}

impl ProbeOptions {
    pub fn new(helo_hostname: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            helo_hostname: helo_hostname.into(),
            sender: sender.into(),
            idle_timeout: Duration::from_secs(10),
            smtp_port: 25,
        }
    }
}
