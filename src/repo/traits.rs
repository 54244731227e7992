use crate::clock::Clock;
use crate::pattern::PatternTemplate;

use super::error::RepoError;
use super::model::{CatchAllDomain, Company, Person};

/// Company lookup, upsert and the per-pattern/catch-all mutations the
/// orchestrator applies after a probe batch. Each operation is individually
/// atomic; no cross-entity transactions are required.
pub trait CompanyRepository: Send + Sync {
    fn find_by_name_or_domain(&self, name: &str, domain: &str) -> Option<Company>;
    fn upsert(&self, company: Company) -> Company;
    fn bump_pattern(
        &self,
        company_id: &str,
        template: PatternTemplate,
        clock: &dyn Clock,
    ) -> Result<(), RepoError>;
    fn set_catch_all(&self, domain: &str) -> Result<(), RepoError>;
}

/// The cross-company global counter per template.
pub trait PatternRepository: Send + Sync {
    fn bump_global(&self, template: PatternTemplate) -> Result<(), RepoError>;
}

/// Person lookup and upsert-with-history by the natural key.
pub trait PersonRepository: Send + Sync {
    fn find_natural(&self, first: &str, last: &str, company: &str) -> Option<Person>;
    fn upsert_with_history(&self, person: Person) -> Person;
}

/// The catch-all deny-list.
pub trait CatchAllRepository: Send + Sync {
    fn find(&self, domain: &str) -> Option<CatchAllDomain>;
    fn upsert(&self, domain: &str, clock: &dyn Clock) -> CatchAllDomain;
}
