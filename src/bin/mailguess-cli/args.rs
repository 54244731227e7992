use std::net::IpAddr;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mailguess-cli")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,

    /// local source address the prober binds to (repeatable; at least one required by `guess`)
    #[arg(long = "pool-ip", global = true)]
    pub pool_ips: Vec<IpAddr>,

    /// hostname presented in HELO
    #[arg(long, global = true, default_value = "prober.local")]
    pub helo: String,

    /// sender address presented in MAIL FROM
    #[arg(long, global = true, default_value = "verify@prober.local")]
    pub from: String,

    /// idle timeout per SMTP reply, in milliseconds
    #[arg(long = "idle-timeout-ms", global = true, default_value_t = 10_000)]
    pub idle_timeout_ms: u64,

    /// disable early-exit: probe every ranked candidate even after a success
    #[arg(long, global = true)]
    pub no_early_exit: bool,

    /// output format
    #[arg(long, global = true, default_value = "human")]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full guess-then-verify flow for one person.
    Guess {
        #[arg(long = "first")]
        first_name: String,
        #[arg(long = "last")]
        last_name: String,
        #[arg(long)]
        company: String,
        /// skip domain discovery and use this domain directly
        #[arg(long)]
        domain: Option<String>,
    },
    /// Look up a company's learned patterns (against this process's in-memory store).
    Company {
        name: String,
    },
    /// Top 20 global templates by usage count (against this process's in-memory store).
    Patterns,
    /// Natural-key person lookup (against this process's in-memory store).
    Person {
        #[arg(long = "first")]
        first_name: String,
        #[arg(long = "last")]
        last_name: String,
        #[arg(long)]
        company: String,
    },
    /// Most recently verified catch-all domains (against this process's in-memory store).
    #[command(name = "catch-all")]
    CatchAll {
        #[arg(long, default_value_t = 100)]
        limit: usize,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn json_output(&self) -> bool {
        self.format == "json"
    }
}

pub fn require_pool(ips: &[IpAddr]) -> Result<Vec<IpAddr>> {
    if ips.is_empty() {
        bail!("`guess` needs at least one --pool-ip to source SMTP probes from");
    }
    Ok(ips.to_vec())
}
