//! Host provider resolution for a Git credential helper.
//!
//! Given the `protocol`/`host`/`path` of a credential request, this crate picks
//! the hosting provider responsible for authenticating against the remote, and
//! resolves settings that can be set per environment variable, per URL scope in
//! Git configuration, or globally.

pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod http;
pub mod input;
pub mod provider;
pub mod registry;
pub mod scope;

pub use cache::ResolutionCache;
pub use config::{
    ConfigEntry, ConfigurationLevel, Environment, Git2Configuration, GitConfiguration,
    MapEnvironment, MemoryConfiguration, ProcessEnvironment, ProxyConfiguration, Settings,
};
pub use error::{GcmError, Result};
pub use http::{HttpProbe, ProbeClientConfig, ProbeError, ProbeResponse, ReqwestProbe};
pub use input::InputArguments;
pub use provider::{register_builtin_providers, HostProvider, HostProviderPriority};
pub use registry::HostProviderRegistry;
pub use scope::git_configuration_scopes;
