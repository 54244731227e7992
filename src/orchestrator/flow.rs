use std::net::IpAddr;

use crate::catchall;
use crate::clock::Clock;
use crate::config::AppConfig;
use crate::ip_pool::IpPool;
use crate::mx;
use crate::pattern::{self, DerivedPattern};
use crate::repo::{CatchAllRepository, Company, CompanyRepository, PatternRepository, Person, PersonRepository};

use super::error::GuessError;
use super::types::{DetectionMethod, Metadata, VerificationOutcome, VerifiedEmail, VerificationRequest};

/// Repository handles the orchestrator needs for one request. Grouped into
/// a struct rather than four loose `&dyn` parameters so call sites read
/// as "these four stores" rather than an easily-reordered parameter list.
pub struct Repositories<'a> {
    pub companies: &'a dyn CompanyRepository,
    pub patterns: &'a dyn PatternRepository,
    pub people: &'a dyn PersonRepository,
    pub catch_all: &'a dyn CatchAllRepository,
}

/// Runs the full guess-then-verify flow for one request: resolve a
/// domain, short-circuit on a known catch-all, look up the domain's
/// primary MX host, then hand off to [`verify_against_target`] for
/// ranking, probing and persistence.
///
/// Fails fast: domain resolution and MX lookup are the only steps that can
/// return `Err` (per spec, a failed domain-discovery stage is the caller's
/// fault, not a transient failure). Everything downstream of a successful
/// MX lookup is folded into the returned [`VerificationOutcome`], even an
/// all-negative batch — that is a normal, successful *run* that happens to
/// find no valid address.
pub fn verify(
    request: &VerificationRequest,
    config: &AppConfig,
    pool: &IpPool,
    clock: &dyn Clock,
    repos: &Repositories<'_>,
) -> Result<VerificationOutcome, GuessError> {
    let started_at = clock.now();

    let domain = resolve_domain(request, repos.companies)?;

    if catchall::is_known(&domain, repos.catch_all) {
        #[cfg(feature = "with-tracing")]
        tracing::info!(target: "catchall", %domain, "skipping probe, domain already catch-all");
        return Ok(VerificationOutcome::precheck_catch_all(request, &domain, started_at, clock.now()));
    }

    repos.companies.upsert(Company::new(String::new(), request.company_name.clone(), domain.clone()));

    let mx_records = match mx::check_mx(&domain) {
        Ok(mx::MxStatus::Records(records)) => records,
        Ok(mx::MxStatus::NoRecords) => return Err(GuessError::NoMxRecord),
        Err(err) => return Err(GuessError::verification(err)),
    };
    // §4.6 step 6 targets only the primary (lowest-preference) host; the
    // design notes preserve this (no fallback to lower-priority MX hosts
    // on a primary-level rejection) as an intentional limitation.
    let primary = &mx_records[0];
    let target_ip = mx::resolve_exchange_ip(&primary.exchange).map_err(GuessError::verification)?;

    Ok(verify_against_target(request, config, pool, clock, repos, &domain, target_ip, started_at))
}

/// The probe-ranking-persistence core of the flow, parameterised on an
/// already-resolved domain and target IP so it can be exercised against a
/// loopback test server without a live MX lookup.
#[allow(clippy::too_many_arguments)]
pub fn verify_against_target(
    request: &VerificationRequest,
    config: &AppConfig,
    pool: &IpPool,
    clock: &dyn Clock,
    repos: &Repositories<'_>,
    domain: &str,
    target_ip: IpAddr,
    started_at: crate::clock::Timestamp,
) -> VerificationOutcome {
    let company = repos.companies.upsert(Company::new(String::new(), request.company_name.clone(), domain.to_string()));

    let ranked_templates = pattern::rank(&company.verified_patterns);
    let candidates: Vec<String> = ranked_templates
        .iter()
        .map(|template| pattern::expand(*template, &request.first_name, &request.last_name, domain))
        .collect();

    let probe_options = config.probe_options();
    let batch = pool.verify_batch(
        &candidates,
        |local_ip, email| crate::smtp::probe(local_ip, target_ip, email, &probe_options, clock),
        config.early_exit,
    );

    let first_success_index = batch.results.iter().position(|r| r.valid);

    let (accept, detection_method) = if first_success_index.is_some() {
        let probe_local_ip = pool.acquire();
        let is_catch_all = catchall::detect(
            domain,
            probe_local_ip,
            target_ip,
            &probe_options,
            clock,
            repos.catch_all,
            repos.companies,
        );
        if is_catch_all {
            #[cfg(feature = "with-tracing")]
            tracing::info!(target: "catchall", %domain, "discarding positive, domain is catch-all");
            (false, Some(DetectionMethod::RandomizedProbe))
        } else {
            (true, Some(DetectionMethod::RandomizedProbe))
        }
    } else {
        (false, None)
    };

    if accept {
        for result in batch.results.iter().filter(|r| r.valid) {
            if let DerivedPattern::Recognized(template) =
                pattern::derive(&result.email, &request.first_name, &request.last_name)
            {
                let _ = repos.companies.bump_pattern(&company.id, template, clock);
                let _ = repos.patterns.bump_global(template);
            }
        }
        #[cfg(feature = "with-tracing")]
        tracing::info!(target: "success", email = %batch.results[first_success_index.unwrap()].email, "verified address");
    } else if batch.results.iter().any(|r| r.block_signal) {
        #[cfg(feature = "with-tracing")]
        tracing::warn!(target: "blocked_ips", ?domain, "probe batch observed a block signal");
    }

    let verified_email = if accept {
        first_success_index.map(|i| batch.results[i].email.clone())
    } else {
        None
    };

    let existing_person = repos.people.find_natural(&request.first_name, &request.last_name, &request.company_name);
    let mut history = existing_person.as_ref().map(|p| p.all_tested_emails.clone()).unwrap_or_default();
    history.extend(batch.results.iter().cloned());
    let person_id = existing_person.map(|p| p.id).unwrap_or_default();

    let mut person = Person::new(person_id, request.first_name.clone(), request.last_name.clone(), request.company_name.clone(), domain);
    person.verified_email = verified_email.clone();
    person.email_verified_at = if accept { Some(clock.now()) } else { None };
    person.all_tested_emails = history;
    repos.people.upsert_with_history(person);

    let is_catch_all_flag = match (first_success_index.is_some(), accept) {
        (true, true) => Some(false),
        (true, false) => Some(true),
        (false, _) => None,
    };

    let verified_emails = match &verified_email {
        Some(email) => {
            let source_ip = batch
                .results
                .iter()
                .find(|r| &r.email == email)
                .map(|r| r.source_ip)
                .unwrap_or(target_ip);
            vec![VerifiedEmail { email: email.clone(), source_ip }]
        }
        None => Vec::new(),
    };

    VerificationOutcome {
        success: accept,
        verified_emails,
        total_patterns_tested: batch.results.len(),
        patterns_tested_before_valid: first_success_index.map(|i| i + 1),
        metadata: Metadata {
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            company: request.company_name.clone(),
            domain: domain.to_string(),
            is_catch_all: is_catch_all_flag,
        },
        detection_method,
        time_taken_ms: clock.now().0.saturating_sub(started_at.0),
    }
}

fn resolve_domain(request: &VerificationRequest, companies: &dyn CompanyRepository) -> Result<String, GuessError> {
    if let Some(provided) = &request.provided_domain {
        return mx::normalize_domain(provided).map_err(GuessError::verification);
    }

    if let Some(company) = companies.find_by_name_or_domain(&request.company_name, "") {
        return Ok(company.domain);
    }

    mx::guess_domain(&request.company_name).ok_or(GuessError::DomainUnknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::repo::memory::{MemoryCatchAllRepository, MemoryCompanyRepository, MemoryPatternRepository, MemoryPersonRepository};
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    fn repos_fixture() -> (
        MemoryCompanyRepository,
        MemoryPatternRepository,
        MemoryPersonRepository,
        MemoryCatchAllRepository,
    ) {
        (
            MemoryCompanyRepository::new(),
            MemoryPatternRepository::new(),
            MemoryPersonRepository::new(),
            MemoryCatchAllRepository::new(),
        )
    }

    #[test]
    fn known_catch_all_domain_short_circuits_without_probing() {
        let (companies, patterns, people, catch_all) = repos_fixture();
        let clock = FixedClock(1_000);
        catch_all.upsert("known-catchall.test", &clock);

        let request = VerificationRequest::new("Ada", "Lovelace", "Analytical Engines").with_domain("known-catchall.test");
        let config = AppConfig::new(vec!["127.0.0.1".parse().unwrap()], "prober.local", "verify@prober.local");
        // Width-1 pool with no listener: if this path ever tried to probe,
        // acquire()+connect would hang/err instead of returning instantly.
        let pool = IpPool::new(config.pool_addresses.clone());
        let repos = Repositories { companies: &companies, patterns: &patterns, people: &people, catch_all: &catch_all };

        let outcome = verify(&request, &config, &pool, &clock, &repos).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.metadata.is_catch_all, Some(true));
        assert_eq!(outcome.detection_method, Some(DetectionMethod::DatabaseLookup));
        assert_eq!(outcome.total_patterns_tested, 0);
    }

    #[test]
    fn company_name_that_slugifies_to_nothing_fails_domain_unknown() {
        let (companies, patterns, people, catch_all) = repos_fixture();
        let clock = FixedClock(1);

        let request = VerificationRequest::new("Ada", "Lovelace", "Inc.");
        let config = AppConfig::new(vec!["127.0.0.1".parse().unwrap()], "prober.local", "verify@prober.local");
        let pool = IpPool::new(config.pool_addresses.clone());
        let repos = Repositories { companies: &companies, patterns: &patterns, people: &people, catch_all: &catch_all };

        let err = verify(&request, &config, &pool, &clock, &repos).unwrap_err();
        assert!(matches!(err, GuessError::DomainUnknown));
    }

    /// Spawns a loopback SMTP server that accepts only the given
    /// `first.last@domain` address and rejects everything else, so the
    /// post-success catch-all probe reports non-catch-all.
    fn spawn_selective_server(accepted_local: &'static str, sessions: usize) -> (std::net::SocketAddr, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            for _ in 0..sessions {
                let (mut stream, _) = listener.accept().unwrap();
                stream.write_all(b"220 mail.example.test ESMTP\r\n").unwrap();
                let mut rcpt_target = String::new();
                for expected in ["HELO", "MAIL FROM", "RCPT TO", "QUIT"] {
                    let mut buf = [0u8; 512];
                    let n = stream.read(&mut buf).unwrap_or(0);
                    let received = String::from_utf8_lossy(&buf[..n]).to_string();
                    assert!(received.starts_with(expected), "got {received:?}");
                    if expected == "RCPT TO" {
                        rcpt_target = received;
                    }
                    let response = match expected {
                        "QUIT" => "221 Bye\r\n",
                        "RCPT TO" if rcpt_target.contains(accepted_local) => "250 OK\r\n",
                        "RCPT TO" => "550 No such user\r\n",
                        _ => "250 OK\r\n",
                    };
                    let _ = stream.write_all(response.as_bytes());
                }
            }
        });
        (addr, handle)
    }

    #[test]
    fn verify_against_target_accepts_first_positive_when_not_catch_all() {
        // 1 accepted candidate + 3 catch-all probes (all rejected).
        let (addr, handle) = spawn_selective_server("ada.lovelace", 4);
        let (companies, patterns, people, catch_all) = repos_fixture();
        let clock = FixedClock(10_000);

        companies.upsert(Company::new(String::new(), "Analytical Engines", "acme-test.invalid"));
        let request = VerificationRequest::new("Ada", "Lovelace", "Analytical Engines").with_domain("acme-test.invalid");
        let mut config = AppConfig::new(vec![addr.ip()], "prober.local", "verify@prober.local");
        config.idle_timeout = std::time::Duration::from_secs(2);
        let pool = IpPool::new(config.pool_addresses.clone());
        let repos = Repositories { companies: &companies, patterns: &patterns, people: &people, catch_all: &catch_all };

        let outcome = verify_against_target(&request, &config, &pool, &clock, &repos, "acme-test.invalid", addr.ip(), clock.now());
        handle.join().unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.metadata.is_catch_all, Some(false));
        assert_eq!(outcome.verified_emails.len(), 1);
        assert_eq!(outcome.verified_emails[0].email, "ada.lovelace@acme-test.invalid");

        let company = companies.find_by_name_or_domain("Analytical Engines", "").unwrap();
        assert_eq!(company.verified_patterns.len(), 1);
        assert_eq!(company.verified_patterns[0].usage_count, 1);

        let person = people.find_natural("Ada", "Lovelace", "Analytical Engines").unwrap();
        assert_eq!(person.verified_email.as_deref(), Some("ada.lovelace@acme-test.invalid"));
    }

    /// Every candidate and every catch-all probe accepted: the domain is
    /// genuinely catch-all, so the positive is discarded.
    fn spawn_accept_all_server(sessions: usize) -> (std::net::SocketAddr, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            for _ in 0..sessions {
                let (mut stream, _) = listener.accept().unwrap();
                stream.write_all(b"220 mail.example.test ESMTP\r\n").unwrap();
                for expected in ["HELO", "MAIL FROM", "RCPT TO", "QUIT"] {
                    let mut buf = [0u8; 512];
                    let n = stream.read(&mut buf).unwrap_or(0);
                    let received = String::from_utf8_lossy(&buf[..n]);
                    assert!(received.starts_with(expected), "got {received:?}");
                    let response = if expected == "QUIT" { "221 Bye\r\n" } else { "250 OK\r\n" };
                    let _ = stream.write_all(response.as_bytes());
                }
            }
        });
        (addr, handle)
    }

    #[test]
    fn verify_against_target_discards_positive_on_live_catch_all() {
        let (addr, handle) = spawn_accept_all_server(4);
        let (companies, patterns, people, catch_all) = repos_fixture();
        let clock = FixedClock(20_000);

        companies.upsert(Company::new(String::new(), "Analytical Engines", "acme-test.invalid"));
        let request = VerificationRequest::new("Ada", "Lovelace", "Analytical Engines").with_domain("acme-test.invalid");
        let mut config = AppConfig::new(vec![addr.ip()], "prober.local", "verify@prober.local");
        config.idle_timeout = std::time::Duration::from_secs(2);
        let pool = IpPool::new(config.pool_addresses.clone());
        let repos = Repositories { companies: &companies, patterns: &patterns, people: &people, catch_all: &catch_all };

        let outcome = verify_against_target(&request, &config, &pool, &clock, &repos, "acme-test.invalid", addr.ip(), clock.now());
        handle.join().unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.metadata.is_catch_all, Some(true));
        assert!(catchall::is_known("acme-test.invalid", &catch_all));

        let person = people.find_natural("Ada", "Lovelace", "Analytical Engines").unwrap();
        assert!(person.verified_email.is_none());
        assert!(!person.all_tested_emails.is_empty());

        let company = companies.find_by_name_or_domain("Analytical Engines", "").unwrap();
        assert_eq!(company.verified_patterns.len(), 0, "discarded positives are never learned");
    }
}
