//! In-memory, `Mutex`-guarded reference implementations of the repository
//! traits. This is test/demo scaffolding, not the product: the trait
//! contracts in [`super::traits`] are what a real store implements. Lookups
//! that must be case-insensitive (company name, person natural key) compare
//! against a lowercased key directly — never a compiled regex.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::clock::Clock;
use crate::pattern::{PatternTemplate, VerifiedPattern};

use super::error::RepoError;
use super::model::{CatchAllDomain, Company, Person};
use super::traits::{CatchAllRepository, CompanyRepository, PatternRepository, PersonRepository};

fn fold(s: &str) -> String {
    s.trim().to_lowercase()
}

#[derive(Default)]
pub struct MemoryCompanyRepository {
    companies: Mutex<Vec<Company>>,
    next_id: AtomicU64,
}

impl MemoryCompanyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CompanyRepository for MemoryCompanyRepository {
    fn find_by_name_or_domain(&self, name: &str, domain: &str) -> Option<Company> {
        let companies = self.companies.lock().expect("company store poisoned");
        companies
            .iter()
            .find(|c| fold(&c.name) == fold(name) || fold(&c.domain) == fold(domain))
            .cloned()
    }

    fn upsert(&self, mut company: Company) -> Company {
        let mut companies = self.companies.lock().expect("company store poisoned");
        if let Some(existing) = companies
            .iter_mut()
            .find(|c| fold(&c.name) == fold(&company.name) || fold(&c.domain) == fold(&company.domain))
        {
            existing.domain = company.domain;
            existing.is_catch_all = existing.is_catch_all || company.is_catch_all;
            return existing.clone();
        }
        company.id = format!("company-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        companies.push(company.clone());
        company
    }

    fn bump_pattern(
        &self,
        company_id: &str,
        template: PatternTemplate,
        clock: &dyn Clock,
    ) -> Result<(), RepoError> {
        let mut companies = self.companies.lock().expect("company store poisoned");
        let company = companies
            .iter_mut()
            .find(|c| c.id == company_id)
            .ok_or_else(|| RepoError::UnknownCompany(company_id.to_string()))?;

        let now = clock.now();
        match company.verified_patterns.iter_mut().find(|p| p.template == template) {
            Some(existing) => {
                existing.usage_count += 1;
                existing.last_verified = now;
            }
            None => company.verified_patterns.push(VerifiedPattern {
                template,
                usage_count: 1,
                last_verified: now,
            }),
        }
        Ok(())
    }

    fn set_catch_all(&self, domain: &str) -> Result<(), RepoError> {
        let mut companies = self.companies.lock().expect("company store poisoned");
        for company in companies.iter_mut().filter(|c| fold(&c.domain) == fold(domain)) {
            company.is_catch_all = true;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryPatternRepository {
    counts: Mutex<HashMap<PatternTemplate, u32>>,
}

impl MemoryPatternRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top(&self, limit: usize) -> Vec<(PatternTemplate, u32)> {
        let counts = self.counts.lock().expect("pattern store poisoned");
        let mut entries: Vec<_> = counts.iter().map(|(t, c)| (*t, *c)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(limit);
        entries
    }
}

impl PatternRepository for MemoryPatternRepository {
    fn bump_global(&self, template: PatternTemplate) -> Result<(), RepoError> {
        let mut counts = self.counts.lock().expect("pattern store poisoned");
        *counts.entry(template).or_insert(0) += 1;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryPersonRepository {
    people: Mutex<Vec<Person>>,
    next_id: AtomicU64,
}

impl MemoryPersonRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersonRepository for MemoryPersonRepository {
    fn find_natural(&self, first: &str, last: &str, company: &str) -> Option<Person> {
        let people = self.people.lock().expect("person store poisoned");
        people
            .iter()
            .find(|p| {
                fold(&p.first_name) == fold(first)
                    && fold(&p.last_name) == fold(last)
                    && fold(&p.company) == fold(company)
            })
            .cloned()
    }

    fn upsert_with_history(&self, mut person: Person) -> Person {
        let mut people = self.people.lock().expect("person store poisoned");
        if let Some(existing) = people.iter_mut().find(|p| {
            fold(&p.first_name) == fold(&person.first_name)
                && fold(&p.last_name) == fold(&person.last_name)
                && fold(&p.company) == fold(&person.company)
        }) {
            existing.domain = person.domain;
            existing.verified_email = person.verified_email;
            existing.email_verified_at = person.email_verified_at;
            existing.all_tested_emails = person.all_tested_emails;
            return existing.clone();
        }
        person.id = format!("person-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        people.push(person.clone());
        person
    }
}

#[derive(Default)]
pub struct MemoryCatchAllRepository {
    domains: Mutex<HashMap<String, CatchAllDomain>>,
}

impl MemoryCatchAllRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recent(&self, limit: usize) -> Vec<CatchAllDomain> {
        let domains = self.domains.lock().expect("catch-all store poisoned");
        let mut entries: Vec<_> = domains.values().cloned().collect();
        entries.sort_by(|a, b| b.last_verified.cmp(&a.last_verified));
        entries.truncate(limit);
        entries
    }
}

impl CatchAllRepository for MemoryCatchAllRepository {
    fn find(&self, domain: &str) -> Option<CatchAllDomain> {
        let domains = self.domains.lock().expect("catch-all store poisoned");
        domains.get(&fold(domain)).cloned()
    }

    fn upsert(&self, domain: &str, clock: &dyn Clock) -> CatchAllDomain {
        let mut domains = self.domains.lock().expect("catch-all store poisoned");
        let key = fold(domain);
        let now = clock.now();
        let entry = domains.entry(key).or_insert_with(|| CatchAllDomain {
            domain: domain.to_string(),
            verification_attempts: 0,
            last_verified: now,
        });
        entry.verification_attempts += 1;
        entry.last_verified = now;
        entry.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    #[test]
    fn company_lookup_is_case_insensitive() {
        let repo = MemoryCompanyRepository::new();
        repo.upsert(Company::new("", "Analytical Engines", "analyticalengines.com"));
        let found = repo.find_by_name_or_domain("analytical engines", "").unwrap();
        assert_eq!(found.domain, "analyticalengines.com");
    }

    #[test]
    fn bump_pattern_creates_then_increments() {
        let repo = MemoryCompanyRepository::new();
        let company = repo.upsert(Company::new("", "Acme", "acme.com"));
        let clock = FixedClock(10);
        repo.bump_pattern(&company.id, PatternTemplate::FirstLast, &clock).unwrap();
        repo.bump_pattern(&company.id, PatternTemplate::FirstLast, &clock).unwrap();

        let updated = repo.find_by_name_or_domain("acme", "").unwrap();
        assert_eq!(updated.verified_patterns.len(), 1);
        assert_eq!(updated.verified_patterns[0].usage_count, 2);
    }

    #[test]
    fn set_catch_all_flags_every_company_on_domain() {
        let repo = MemoryCompanyRepository::new();
        repo.upsert(Company::new("", "Acme EU", "acme.com"));
        repo.upsert(Company::new("", "Acme US", "acme.com"));
        repo.set_catch_all("acme.com").unwrap();

        let eu = repo.find_by_name_or_domain("Acme EU", "").unwrap();
        assert!(eu.is_catch_all);
    }

    #[test]
    fn catch_all_upsert_increments_verification_attempts() {
        let repo = MemoryCatchAllRepository::new();
        let clock = FixedClock(1);
        repo.upsert("known-catchall.com", &clock);
        let second = repo.upsert("known-catchall.com", &clock);
        assert_eq!(second.verification_attempts, 2);
    }

    #[test]
    fn person_natural_key_lookup_is_case_insensitive() {
        let repo = MemoryPersonRepository::new();
        repo.upsert_with_history(Person::new("", "Ada", "Lovelace", "Analytical Engines", "analyticalengines.com"));
        let found = repo.find_natural("ada", "lovelace", "analytical engines").unwrap();
        assert_eq!(found.domain, "analyticalengines.com");
    }
}
