use thiserror::Error;

#[derive(Debug, Error)]
pub enum MxError {
    #[error("domain is empty")]
    EmptyDomain,
    #[error("domain IDNA conversion failed")]
    IdnaConversion {
        #[source]
        source: idna::Errors,
    },
    #[error("resolver initialization failed: {source}")]
    ResolverInit {
        #[source]
        source: std::io::Error,
    },
    #[error("MX lookup failed: {source}")]
    Lookup {
        #[source]
        source: trust_dns_resolver::error::ResolveError,
    },
    #[error("could not resolve an address for exchange {exchange}: {source}")]
    ExchangeAddress {
        exchange: String,
        #[source]
        source: std::io::Error,
    },
    #[error("exchange {exchange} resolved to no addresses")]
    ExchangeUnresolvable { exchange: String },
}

impl MxError {
    pub(crate) fn idna(source: idna::Errors) -> Self {
        Self::IdnaConversion { source }
    }

    pub(crate) fn resolver_init(source: std::io::Error) -> Self {
        Self::ResolverInit { source }
    }

    pub(crate) fn lookup(source: trust_dns_resolver::error::ResolveError) -> Self {
        Self::Lookup { source }
    }

    pub(crate) fn exchange_address(exchange: impl Into<String>, source: std::io::Error) -> Self {
        Self::ExchangeAddress {
            exchange: exchange.into(),
            source,
        }
    }

    pub(crate) fn exchange_unresolvable(exchange: impl Into<String>) -> Self {
        Self::ExchangeUnresolvable {
            exchange: exchange.into(),
        }
    }
}
