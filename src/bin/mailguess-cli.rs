#[path = "mailguess-cli/args.rs"]
mod args;
#[path = "mailguess-cli/output.rs"]
mod output;

use anyhow::Result;
use args::{Cli, Commands, require_pool};

use mailguess_lib::repo::memory::{
    MemoryCatchAllRepository, MemoryCompanyRepository, MemoryPatternRepository, MemoryPersonRepository,
};
use mailguess_lib::{
    AppConfig, CompanyRepository, IpPool, PersonRepository, Repositories, SystemClock, VerificationRequest,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let json = cli.json_output();

    let companies = MemoryCompanyRepository::new();
    let patterns = MemoryPatternRepository::new();
    let people = MemoryPersonRepository::new();
    let catch_all = MemoryCatchAllRepository::new();
    let repos = Repositories {
        companies: &companies,
        patterns: &patterns,
        people: &people,
        catch_all: &catch_all,
    };
    let clock = SystemClock;

    match cli.cmd {
        Commands::Guess { first_name, last_name, company, domain } => {
            let pool_ips = require_pool(&cli.pool_ips)?;
            let mut config = AppConfig::new(pool_ips, cli.helo.clone(), cli.from.clone());
            config.idle_timeout = std::time::Duration::from_millis(cli.idle_timeout_ms);
            config.early_exit = !cli.no_early_exit;
            let pool = IpPool::new(config.pool_addresses.clone());

            let mut request = VerificationRequest::new(first_name, last_name, company);
            if let Some(domain) = domain {
                request = request.with_domain(domain);
            }

            let outcome = mailguess_lib::verify(&request, &config, &pool, &clock, &repos)?;
            output::print_outcome(&outcome, json);
        }
        Commands::Company { name } => {
            let found = companies.find_by_name_or_domain(&name, "");
            output::print_company(found.as_ref(), json);
        }
        Commands::Patterns => {
            let top = patterns.top(20);
            output::print_patterns(&top, json);
        }
        Commands::Person { first_name, last_name, company } => {
            let found = people.find_natural(&first_name, &last_name, &company);
            output::print_person(found.as_ref(), json);
        }
        Commands::CatchAll { limit } => {
            let recent = catch_all.recent(limit);
            output::print_catch_all(&recent, json);
        }
    }

    Ok(())
}
