//! Host providers and the built-in detectors.
//!
//! A provider claims a remote either statically, from the credential input
//! alone, or dynamically, from the response to an auto-detection probe.

mod azure_repos;
mod bitbucket;
mod generic;
mod gitea;
mod github;
mod gitlab;

pub use azure_repos::AzureReposHostProvider;
pub use bitbucket::BitbucketHostProvider;
pub use generic::GenericHostProvider;
pub use gitea::GiteaHostProvider;
pub use github::GitHubHostProvider;
pub use gitlab::GitLabHostProvider;

use std::sync::Arc;

use crate::error::Result;
use crate::http::ProbeResponse;
use crate::input::InputArguments;
use crate::registry::HostProviderRegistry;

/// Trait for hosting-service providers.
pub trait HostProvider: Send + Sync {
    /// Unique identifier, matched case-insensitively against overrides.
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Legacy `credential.authority` values this provider answers to.
    fn supported_authority_ids(&self) -> &[&str] {
        &[]
    }

    /// Static check against the credential input. Must not do any I/O.
    fn is_supported(&self, input: &InputArguments) -> bool;

    /// Dynamic check against the auto-detection probe response.
    fn is_supported_response(&self, _response: &ProbeResponse) -> bool {
        false
    }
}

/// Order in which providers are consulted; higher tiers go first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HostProviderPriority {
    Low,
    Normal,
    High,
}

impl HostProviderPriority {
    pub fn as_str(&self) -> &str {
        match self {
            HostProviderPriority::Low => "low",
            HostProviderPriority::Normal => "normal",
            HostProviderPriority::High => "high",
        }
    }
}

/// Register every built-in provider.
pub fn register_builtin_providers(registry: &mut HostProviderRegistry) -> Result<()> {
    registry.register(Arc::new(AzureReposHostProvider), HostProviderPriority::Normal)?;
    registry.register(Arc::new(BitbucketHostProvider), HostProviderPriority::Normal)?;
    registry.register(Arc::new(GitHubHostProvider), HostProviderPriority::Normal)?;
    registry.register(Arc::new(GitLabHostProvider), HostProviderPriority::Normal)?;
    registry.register(Arc::new(GiteaHostProvider), HostProviderPriority::Normal)?;
    registry.register(Arc::new(GenericHostProvider), HostProviderPriority::Low)?;
    Ok(())
}

/// Whether the input uses `http` or `https`.
pub(crate) fn is_http(input: &InputArguments) -> bool {
    input
        .protocol()
        .map(|p| p.eq_ignore_ascii_case("http") || p.eq_ignore_ascii_case("https"))
        .unwrap_or(false)
}

/// Lower-cased hostname of an http(s) input, without the port.
pub(crate) fn http_hostname(input: &InputArguments) -> Option<String> {
    if !is_http(input) {
        return None;
    }
    input.hostname().map(str::to_ascii_lowercase)
}
