//! Remembers the outcome of network auto-detection.
//!
//! A provider found by probing is written to the user's global configuration
//! as `credential.<remote>.provider`, which the ordinary provider override
//! lookup picks up on later runs, so the probe is paid for once per remote.

use std::sync::Arc;

use url::Url;

use crate::config::{ConfigurationLevel, GitConfiguration};
use crate::constants::git_config;

pub struct ResolutionCache {
    configuration: Arc<dyn GitConfiguration>,
}

impl ResolutionCache {
    pub fn new(configuration: Arc<dyn GitConfiguration>) -> Self {
        Self { configuration }
    }

    /// Configuration key under which the provider for `remote` is stored.
    ///
    /// Query and fragment are dropped so the key matches one of the scopes
    /// settings lookups walk.
    pub fn key_for(remote: &Url) -> String {
        let mut remote = remote.clone();
        remote.set_query(None);
        remote.set_fragment(None);

        let uri = remote.as_str();
        let scope = uri.strip_suffix('/').unwrap_or(uri);
        format!(
            "{}.{}.{}",
            git_config::CREDENTIAL_SECTION,
            scope,
            git_config::PROVIDER
        )
    }

    /// Store `provider_id` for `remote`. Failures are logged, never returned.
    pub fn persist(&self, remote: &Url, provider_id: &str) -> bool {
        let key = Self::key_for(remote);
        log::debug!("Remembering host provider for '{}' as '{}'", remote, provider_id);

        match self
            .configuration
            .set(ConfigurationLevel::Global, &key, provider_id)
        {
            Ok(()) => true,
            Err(e) => {
                log::warn!("failed to remember result of host provider detection: {}", e);
                log::warn!("try setting this manually: `git config --global {} {}`", key, provider_id);
                false
            }
        }
    }
}
