use std::net::IpAddr;

use rand::Rng;

use crate::clock::Clock;
use crate::repo::{CatchAllRepository, CompanyRepository};
use crate::smtp::{self, ProbeOptions};

/// How many pseudo-random, implausible local-parts are probed to decide
/// catch-all status. Three probes is a weak signal on its own; the
/// threshold below and the retained `verification_attempts` counter exist
/// so a caller can recalibrate later without re-deriving history.
const PROBE_COUNT: usize = 3;
const POSITIVE_THRESHOLD: usize = 2;

/// `true` if `domain` is already on the catch-all deny-list.
pub fn is_known(domain: &str, repo: &dyn CatchAllRepository) -> bool {
    repo.find(domain).is_some()
}

/// Probes `domain` with [`PROBE_COUNT`] local-parts that cannot plausibly
/// exist (a random alphanumeric string plus the current timestamp as a
/// suffix). If at least [`POSITIVE_THRESHOLD`] come back valid, the domain
/// is recorded as catch-all and propagated to every Company on it.
pub fn detect(
    domain: &str,
    local_ip: IpAddr,
    mx_ip: IpAddr,
    options: &ProbeOptions,
    clock: &dyn Clock,
    catch_all_repo: &dyn CatchAllRepository,
    company_repo: &dyn CompanyRepository,
) -> bool {
    let probes = random_local_parts(clock);
    let mut positives = 0;

    for local_part in &probes {
        let email = format!("{local_part}@{domain}");
        let result = smtp::probe(local_ip, mx_ip, &email, options, clock);
        if result.valid {
            positives += 1;
        }
    }

    let is_catch_all = positives >= POSITIVE_THRESHOLD;
    if is_catch_all {
        catch_all_repo.upsert(domain, clock);
        let _ = company_repo.set_catch_all(domain);
    }
    is_catch_all
}

fn random_local_parts(clock: &dyn Clock) -> [String; PROBE_COUNT] {
    let stamp = clock.now().0;
    std::array::from_fn(|i| {
        let suffix: String = rand::thread_rng()
            .sample_iter(&rand::distributions::Alphanumeric)
            .take(12)
            .map(char::from)
            .collect();
        format!("nonexistent-{stamp}-{i}-{suffix}")
    })
}
