use mailguess_lib::{CatchAllDomain, Company, Person, VerificationOutcome};

pub fn print_outcome(outcome: &VerificationOutcome, json: bool) {
    if json {
        #[cfg(feature = "with-serde")]
        {
            println!("{}", serde_json::to_string_pretty(outcome).expect("VerificationOutcome always serializes"));
            return;
        }
        #[cfg(not(feature = "with-serde"))]
        {
            eprintln!("--format json requires the `with-serde` feature; falling back to human output");
        }
    }

    println!(
        "{} {} @ {} — {}",
        outcome.metadata.first_name,
        outcome.metadata.last_name,
        outcome.metadata.domain,
        if outcome.success { "VERIFIED" } else { "NOT VERIFIED" }
    );
    for email in &outcome.verified_emails {
        println!("  {}  (via {})", email.email, email.source_ip);
    }
    if let Some(method) = outcome.detection_method {
        println!("  detection method: {}", method.as_str());
    }
    if let Some(is_catch_all) = outcome.metadata.is_catch_all {
        println!("  catch-all: {is_catch_all}");
    }
    println!(
        "  patterns tested: {} (first success at #{})",
        outcome.total_patterns_tested,
        outcome
            .patterns_tested_before_valid
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!("  elapsed: {}ms", outcome.time_taken_ms);
}

pub fn print_company(company: Option<&Company>, json: bool) {
    match company {
        None => {
            if json {
                println!("null");
            } else {
                println!("no company on file");
            }
        }
        Some(company) => {
            if json {
                #[cfg(feature = "with-serde")]
                println!("{}", serde_json::to_string_pretty(company).expect("Company always serializes"));
                #[cfg(not(feature = "with-serde"))]
                eprintln!("--format json requires the `with-serde` feature");
                return;
            }
            println!("{} ({}) catch_all={}", company.name, company.domain, company.is_catch_all);
            let mut patterns = company.verified_patterns.clone();
            patterns.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));
            for pattern in patterns {
                println!("  {} x{}", pattern.template, pattern.usage_count);
            }
        }
    }
}

pub fn print_patterns(patterns: &[(mailguess_lib::PatternTemplate, u32)], json: bool) {
    if json {
        #[cfg(feature = "with-serde")]
        {
            let rows: Vec<_> = patterns.iter().map(|(t, c)| (t.to_string(), *c)).collect();
            println!("{}", serde_json::to_string_pretty(&rows).expect("pattern rows always serialize"));
            return;
        }
        #[cfg(not(feature = "with-serde"))]
        eprintln!("--format json requires the `with-serde` feature");
    }
    for (template, count) in patterns {
        println!("{template} x{count}");
    }
}

pub fn print_person(person: Option<&Person>, json: bool) {
    match person {
        None => {
            if json {
                println!("null");
            } else {
                println!("no person on file");
            }
        }
        Some(person) => {
            if json {
                #[cfg(feature = "with-serde")]
                println!("{}", serde_json::to_string_pretty(person).expect("Person always serializes"));
                #[cfg(not(feature = "with-serde"))]
                eprintln!("--format json requires the `with-serde` feature");
                return;
            }
            println!(
                "{} {} @ {} verified_email={}",
                person.first_name,
                person.last_name,
                person.company,
                person.verified_email.as_deref().unwrap_or("-")
            );
            println!("  tested {} address(es)", person.all_tested_emails.len());
        }
    }
}

pub fn print_catch_all(domains: &[CatchAllDomain], json: bool) {
    if json {
        #[cfg(feature = "with-serde")]
        {
            println!("{}", serde_json::to_string_pretty(domains).expect("catch-all rows always serialize"));
            return;
        }
        #[cfg(not(feature = "with-serde"))]
        eprintln!("--format json requires the `with-serde` feature");
    }
    for domain in domains {
        println!("{} (attempts={})", domain.domain, domain.verification_attempts);
    }
}
