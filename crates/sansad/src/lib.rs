pub mod candidates;
pub mod config;
pub mod extract;
pub mod fetcher;
pub mod normalizer;
pub mod resolver;
pub mod scheduler;
pub mod types;
pub mod validator;

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod testing;

pub use config::ResolverConfig;
pub use fetcher::{FetchError, HttpFetcher, PageFetcher};
pub use resolver::{MemberResolver, ResolveError};
pub use types::{MemberProfile, NameQuery, ResolutionResult, Role};
