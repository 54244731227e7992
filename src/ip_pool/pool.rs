use std::net::IpAddr;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use crate::smtp::ProbeResult;

/// The result of probing one batch (or the whole request, once early-exit
/// stops further batches): every attempted address's verdict, and whether
/// any of them succeeded.
#[derive(Debug)]
pub struct BatchOutcome {
    pub results: Vec<ProbeResult>,
    pub any_success: bool,
}

/// A bank of local source addresses rotated round-robin, each with a
/// minimum 500ms cooldown between successive uses. `verify_batch` chunks
/// its input into pool-width batches, probing each batch's members in
/// parallel and stopping at the first batch containing a success.
pub struct IpPool {
    addresses: Vec<IpAddr>,
    last_used: Mutex<Vec<Instant>>,
    cursor: Mutex<usize>,
    cooldown: Duration,
}

impl IpPool {
    pub fn new(addresses: Vec<IpAddr>) -> Self {
        assert!(!addresses.is_empty(), "IP pool must have at least one address");
        let far_past = Instant::now()
            .checked_sub(Duration::from_secs(3600))
            .unwrap_or_else(Instant::now);
        Self {
            last_used: Mutex::new(vec![far_past; addresses.len()]),
            cursor: Mutex::new(0),
            addresses,
            cooldown: Duration::from_millis(500),
        }
    }

    pub fn width(&self) -> usize {
        self.addresses.len()
    }

    /// Returns the next address in round-robin order, sleeping for whatever
    /// remains of its 500ms cooldown if it was used too recently.
    pub fn acquire(&self) -> IpAddr {
        let index = {
            let mut cursor = self.cursor.lock().expect("cursor mutex poisoned");
            let i = *cursor;
            *cursor = (i + 1) % self.addresses.len();
            i
        };

        let wait = {
            let last_used = self.last_used.lock().expect("last_used mutex poisoned");
            self.cooldown.checked_sub(last_used[index].elapsed())
        };
        if let Some(wait) = wait {
            thread::sleep(wait);
        }

        let mut last_used = self.last_used.lock().expect("last_used mutex poisoned");
        last_used[index] = Instant::now();
        self.addresses[index]
    }

    /// Probes `emails` in chunks of pool width, each chunk run in parallel.
    /// When `early_exit` is set, stops dispatching further chunks once a
    /// completed chunk contains a success; a chunk already in flight always
    /// finishes every member regardless of the flag. With `early_exit`
    /// false every chunk runs, which is only useful for diagnostics — the
    /// orchestrator defaults this on per its configured policy.
    pub fn verify_batch<F>(&self, emails: &[String], probe_fn: F, early_exit: bool) -> BatchOutcome
    where
        F: Fn(IpAddr, &str) -> ProbeResult + Sync,
    {
        let mut results = Vec::with_capacity(emails.len());
        let mut any_success = false;

        for chunk in emails.chunks(self.width()) {
            let chunk_results: Vec<ProbeResult> = thread::scope(|scope| {
                let handles: Vec<_> = chunk
                    .iter()
                    .map(|email| {
                        scope.spawn(move || {
                            let ip = self.acquire();
                            probe_fn(ip, email)
                        })
                    })
                    .collect();
                handles
                    .into_iter()
                    .map(|h| h.join().expect("probe thread panicked"))
                    .collect()
            });

            let chunk_has_success = chunk_results.iter().any(|r| r.valid);
            results.extend(chunk_results);
            if chunk_has_success {
                any_success = true;
                if early_exit {
                    break;
                }
            }
        }

        BatchOutcome { results, any_success }
    }
}
