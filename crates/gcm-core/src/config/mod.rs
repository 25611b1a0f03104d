//! Configuration for the credential helper.
//!
//! Settings come from three kinds of sources, highest precedence first:
//!
//! 1. Environment variables (`GCM_*`)
//! 2. URL-scoped Git configuration (`[credential "https://example.com"]`),
//!    most specific scope first
//! 3. Unscoped Git configuration (`[credential]`)
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use gcm_core::config::{Git2Configuration, ProcessEnvironment, Settings};
//! use url::Url;
//!
//! let config = Git2Configuration::discover(None).unwrap();
//! let remote = Url::parse("https://example.com/org/repo.git").unwrap();
//! let settings = Settings::new(Arc::new(ProcessEnvironment), Arc::new(config), Some(remote));
//!
//! if let Some(provider) = settings.provider_override() {
//!     println!("provider: {}", provider);
//! }
//! ```

mod environment;
mod git_config;
mod memory;
mod settings;
mod store;

pub use environment::{Environment, MapEnvironment, ProcessEnvironment};
pub use git_config::Git2Configuration;
pub use memory::MemoryConfiguration;
pub use settings::{parse_booleany, ProxyConfiguration, Settings};
pub use store::{keys_match, ConfigEntry, ConfigKey, ConfigurationLevel, GitConfiguration};
