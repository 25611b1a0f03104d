//! Host provider registry and resolution.
//!
//! Resolution order:
//!
//! 1. An explicit provider override (`GCM_PROVIDER` / `credential.provider`)
//! 2. The deprecated authority override (`GCM_AUTHORITY` / `credential.authority`)
//! 3. Auto-detection, tier by tier from [`HostProviderPriority::High`] down:
//!    the static check of every provider in the tier, then (if nothing
//!    matched) the response of a single `HEAD` probe of the remote.
//!
//! A provider found through the probe is remembered in the global Git
//! configuration so later runs take step 1 instead.

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::cache::ResolutionCache;
use crate::config::{Environment, GitConfiguration, Settings};
use crate::constants::{AUTHORITY_ID_AUTO, HELP_URL_AUTHORITY_DEPRECATED, HELP_URL_AUTODETECT, PROVIDER_ID_AUTO};
use crate::error::{GcmError, Result};
use crate::http::{HttpProbe, ProbeError, ProbeResponse};
use crate::input::InputArguments;
use crate::provider::{HostProvider, HostProviderPriority};

const TIERS: [HostProviderPriority; 3] = [
    HostProviderPriority::High,
    HostProviderPriority::Normal,
    HostProviderPriority::Low,
];

struct Registration {
    provider: Arc<dyn HostProvider>,
    priority: HostProviderPriority,
}

pub struct HostProviderRegistry {
    environment: Arc<dyn Environment>,
    configuration: Arc<dyn GitConfiguration>,
    probe: Arc<dyn HttpProbe>,
    /// In registration order; the index is the tie-break within a tier.
    providers: Vec<Registration>,
}

impl HostProviderRegistry {
    pub fn new(
        environment: Arc<dyn Environment>,
        configuration: Arc<dyn GitConfiguration>,
        probe: Arc<dyn HttpProbe>,
    ) -> Self {
        Self {
            environment,
            configuration,
            probe,
            providers: Vec::new(),
        }
    }

    /// Add a provider at the given priority.
    ///
    /// Fails if the provider uses the reserved `auto` ID or authority ID.
    pub fn register(
        &mut self,
        provider: Arc<dyn HostProvider>,
        priority: HostProviderPriority,
    ) -> Result<()> {
        if provider.id().eq_ignore_ascii_case(PROVIDER_ID_AUTO) {
            return Err(GcmError::ReservedProviderId(PROVIDER_ID_AUTO.to_string()));
        }

        if provider
            .supported_authority_ids()
            .iter()
            .any(|id| id.eq_ignore_ascii_case(AUTHORITY_ID_AUTO))
        {
            return Err(GcmError::ReservedAuthorityId(AUTHORITY_ID_AUTO.to_string()));
        }

        log::debug!("Registered host provider '{}' with priority '{}'", provider.id(), priority.as_str());
        self.providers.push(Registration { provider, priority });
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Registered providers, highest tier first, then registration order.
    pub fn providers(&self) -> Vec<(Arc<dyn HostProvider>, HostProviderPriority)> {
        self.ordered()
            .map(|reg| (reg.provider.clone(), reg.priority))
            .collect()
    }

    fn tier(&self, priority: HostProviderPriority) -> impl Iterator<Item = &Registration> {
        self.providers.iter().filter(move |reg| reg.priority == priority)
    }

    fn ordered(&self) -> impl Iterator<Item = &Registration> {
        TIERS.into_iter().flat_map(move |tier| self.tier(tier))
    }

    /// Pick the provider that should handle `input`.
    pub async fn resolve(&self, input: &InputArguments) -> Result<Arc<dyn HostProvider>> {
        let remote = input.remote_uri(false);
        let settings = Settings::new(
            self.environment.clone(),
            self.configuration.clone(),
            remote.clone(),
        );

        if let Some(provider) = self.find_by_override(&settings) {
            return Ok(provider);
        }

        if let Some(provider) = self.find_by_authority(&settings) {
            return Ok(provider);
        }

        log::debug!("Performing auto-detection of host provider");
        let mut probe = AutoDetectProbe::new(
            self.probe.as_ref(),
            remote,
            settings.auto_detect_provider_timeout(),
        );

        for priority in TIERS {
            let providers: Vec<&Registration> = self.tier(priority).collect();
            if providers.is_empty() {
                continue;
            }

            log::debug!(
                "Checking against {} host providers registered with priority '{}'",
                providers.len(),
                priority.as_str()
            );

            if let Some(reg) = providers.iter().find(|reg| reg.provider.is_supported(input)) {
                log::debug!("Host provider '{}' supports the input", reg.provider.id());
                return Ok(reg.provider.clone());
            }

            let Some(response) = probe.response().await else {
                continue;
            };

            if let Some(reg) = providers
                .iter()
                .find(|reg| reg.provider.is_supported_response(response))
            {
                log::debug!("Host provider '{}' recognised the probe response", reg.provider.id());
                if let Some(uri) = probe.uri() {
                    ResolutionCache::new(self.configuration.clone()).persist(uri, reg.provider.id());
                }
                return Ok(reg.provider.clone());
            }
        }

        Err(GcmError::NoProviderAvailable)
    }

    fn find_by_override(&self, settings: &Settings) -> Option<Arc<dyn HostProvider>> {
        let id = settings.provider_override()?;
        log::debug!("Host provider override was set id='{}'", id);

        if id.eq_ignore_ascii_case(PROVIDER_ID_AUTO) {
            return None;
        }

        let found = self
            .ordered()
            .find(|reg| reg.provider.id().eq_ignore_ascii_case(&id))
            .map(|reg| reg.provider.clone());

        if found.is_none() {
            log::warn!(
                "a host provider override was set but no such provider '{}' was found. Falling back to auto-detection.",
                id
            );
        }
        found
    }

    fn find_by_authority(&self, settings: &Settings) -> Option<Arc<dyn HostProvider>> {
        let authority = settings.legacy_authority_override()?;
        log::debug!("Host provider authority override was set authority='{}'", authority);
        log::warn!("the `credential.authority` and `GCM_AUTHORITY` settings are deprecated.");
        log::warn!("see {} for more information.", HELP_URL_AUTHORITY_DEPRECATED);

        if authority.eq_ignore_ascii_case(AUTHORITY_ID_AUTO) {
            return None;
        }

        let found = self
            .ordered()
            .find(|reg| {
                reg.provider
                    .supported_authority_ids()
                    .iter()
                    .any(|id| id.eq_ignore_ascii_case(&authority))
            })
            .map(|reg| reg.provider.clone());

        if found.is_none() {
            log::warn!(
                "a supported authority override was set but no such provider supporting authority '{}' was found. Falling back to auto-detection.",
                authority
            );
        }
        found
    }
}

/// The auto-detection request: sent lazily, at most once per resolution.
struct AutoDetectProbe<'a> {
    client: &'a dyn HttpProbe,
    /// Remote to probe; `None` when it cannot be probed.
    uri: Option<Url>,
    timeout: Option<Duration>,
    attempted: bool,
    response: Option<ProbeResponse>,
}

impl<'a> AutoDetectProbe<'a> {
    fn new(client: &'a dyn HttpProbe, remote: Option<Url>, timeout_ms: i64) -> Self {
        let uri = remote.filter(|uri| matches!(uri.scheme(), "http" | "https"));
        if uri.is_none() {
            log::debug!("Remote is not an HTTP(S) URL, auto-detection probe unavailable");
        }

        let timeout = u64::try_from(timeout_ms)
            .ok()
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);
        match timeout {
            Some(timeout) => log::debug!("Auto-detection probe timeout is {}ms", timeout.as_millis()),
            None => log::debug!("Auto-detection probe disabled (timeout {}ms)", timeout_ms),
        }

        Self {
            client,
            uri,
            timeout,
            attempted: false,
            response: None,
        }
    }

    fn uri(&self) -> Option<&Url> {
        self.uri.as_ref()
    }

    async fn response(&mut self) -> Option<&ProbeResponse> {
        if !self.attempted {
            self.attempted = true;

            if let (Some(uri), Some(timeout)) = (&self.uri, self.timeout) {
                log::debug!("Querying remote URL for host provider auto-detection");
                match self.client.head(uri, timeout).await {
                    Ok(response) => self.response = Some(response),
                    Err(ProbeError::Timeout(elapsed)) => {
                        log::warn!(
                            "auto-detection of host provider took too long (>{}ms)",
                            elapsed.as_millis()
                        );
                        log::warn!("see {} for more information.", HELP_URL_AUTODETECT);
                    }
                    Err(e) => {
                        log::warn!("failed to probe '{}' to detect provider", uri);
                        log::warn!("{}", e);
                        log::warn!("see {} for more information.", HELP_URL_AUTODETECT);
                    }
                }
            }
        }

        self.response.as_ref()
    }
}
