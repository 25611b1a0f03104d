use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use url::Url;

use super::environment::Environment;
use super::store::{ConfigKey, ConfigurationLevel, GitConfiguration};
use crate::constants::{envars, git_config, DEFAULT_AUTO_DETECT_PROVIDER_TIMEOUT_MS};
use crate::scope::git_configuration_scopes;

/// Resolves settings from the environment and scoped Git configuration for
/// one remote URL.
#[derive(Clone)]
pub struct Settings {
    environment: Arc<dyn Environment>,
    configuration: Arc<dyn GitConfiguration>,
    remote_url: Option<Url>,
}

impl Settings {
    pub fn new(
        environment: Arc<dyn Environment>,
        configuration: Arc<dyn GitConfiguration>,
        remote_url: Option<Url>,
    ) -> Self {
        Self {
            environment,
            configuration,
            remote_url,
        }
    }

    /// Highest-precedence value of a setting.
    ///
    /// Checks `envar` (if given and non-empty), then `section.<scope>.property`
    /// for every scope of the remote URL, then `section.property`.
    pub fn try_get(
        &self,
        envar: Option<&str>,
        section: &str,
        property: &str,
        is_path: bool,
    ) -> Option<String> {
        self.get_values(envar, section, property, is_path)
            .into_iter()
            .next()
    }

    /// Every value of a setting, highest precedence first.
    ///
    /// For each scope the scheme-qualified key is checked before the
    /// scheme-less one (`https://example.com` then `example.com`). Empty values
    /// are skipped.
    pub fn get_values(
        &self,
        envar: Option<&str>,
        section: &str,
        property: &str,
        is_path: bool,
    ) -> Vec<String> {
        let mut values = Vec::new();

        if let Some(value) = envar.and_then(|name| self.environment.var(name)) {
            values.push(value);
        }

        let entries = match self
            .configuration
            .enumerate(ConfigurationLevel::All, section, property)
        {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Failed to read {}.{} from git config: {}", section, property, e);
                Vec::new()
            }
        };

        // Later entries have higher precedence, so they overwrite earlier ones
        let mut scoped: HashMap<String, String> = HashMap::new();
        let mut unscoped = None;
        for entry in entries {
            let Some(key) = ConfigKey::parse(&entry.key) else {
                continue;
            };
            match key.subsection {
                Some(scope) => {
                    scoped.insert(scope.to_string(), entry.value);
                }
                None => unscoped = Some(entry.value),
            }
        }

        if let Some(url) = &self.remote_url {
            for scope in git_configuration_scopes(url) {
                if let Some(value) = scoped.get(&scope) {
                    values.push(value.clone());
                }

                let without_scheme = scope
                    .split_once("://")
                    .map(|(_, rest)| rest)
                    .unwrap_or(&scope);
                if let Some(value) = scoped.get(without_scheme) {
                    values.push(value.clone());
                }
            }
        }

        values.extend(unscoped);

        values
            .into_iter()
            .filter(|value| !value.is_empty())
            .map(|value| if is_path { canonicalize_path(&value) } else { value })
            .collect()
    }

    /// Explicit host provider ID (`GCM_PROVIDER` / `credential.provider`).
    pub fn provider_override(&self) -> Option<String> {
        self.try_get(
            Some(envars::PROVIDER),
            git_config::CREDENTIAL_SECTION,
            git_config::PROVIDER,
            false,
        )
    }

    /// Deprecated authority override (`GCM_AUTHORITY` / `credential.authority`).
    pub fn legacy_authority_override(&self) -> Option<String> {
        self.try_get(
            Some(envars::AUTHORITY),
            git_config::CREDENTIAL_SECTION,
            git_config::AUTHORITY,
            false,
        )
    }

    /// Provider auto-detection probe timeout in milliseconds.
    ///
    /// Zero or negative disables the probe; a non-numeric value falls back to
    /// the default.
    pub fn auto_detect_provider_timeout(&self) -> i64 {
        match self.try_get(
            Some(envars::AUTODETECT_TIMEOUT),
            git_config::CREDENTIAL_SECTION,
            git_config::AUTODETECT_TIMEOUT,
            false,
        ) {
            Some(value) => value.trim().parse().unwrap_or_else(|_| {
                log::debug!("Ignoring invalid auto-detect timeout '{}'", value);
                DEFAULT_AUTO_DETECT_PROVIDER_TIMEOUT_MS
            }),
            None => DEFAULT_AUTO_DETECT_PROVIDER_TIMEOUT_MS,
        }
    }

    /// Whether the helper may prompt the user.
    pub fn is_interaction_allowed(&self) -> bool {
        match self.try_get(
            Some(envars::INTERACTIVE),
            git_config::CREDENTIAL_SECTION,
            git_config::INTERACTIVE,
            false,
        ) {
            // "auto", "always" and anything unrecognised allow prompting
            Some(value) if value.eq_ignore_ascii_case("never") => false,
            Some(value) => parse_booleany(&value).unwrap_or(true),
            None => true,
        }
    }

    /// Whether TLS certificates are verified. `GIT_SSL_NO_VERIFY` wins over
    /// `http.sslVerify`; anything unparseable keeps verification on.
    pub fn is_certificate_verification_enabled(&self) -> bool {
        if let Some(value) = self.environment.var(envars::GIT_SSL_NO_VERIFY) {
            return !parse_booleany(&value).unwrap_or(false);
        }

        match self.try_get(None, git_config::HTTP_SECTION, git_config::SSL_VERIFY, false) {
            Some(value) => parse_booleany(&value).unwrap_or(true),
            None => true,
        }
    }

    /// Extra CA bundle (`GIT_SSL_CAINFO` / `http.sslCAInfo`).
    pub fn custom_certificate_bundle_path(&self) -> Option<PathBuf> {
        self.try_get(
            Some(envars::GIT_SSL_CAINFO),
            git_config::HTTP_SECTION,
            git_config::SSL_CA_INFO,
            true,
        )
        .map(PathBuf::from)
    }

    /// Proxy for requests to the remote, if one is configured.
    ///
    /// Sources, first match wins:
    ///
    /// 1. `credential.httpsProxy` (https remotes only), `credential.httpProxy` (deprecated)
    /// 2. `http.proxy`
    /// 3. `https_proxy`, `HTTPS_PROXY` (https remotes only), `http_proxy`, `all_proxy`, `ALL_PROXY`
    /// 4. `GCM_HTTP_PROXY` (deprecated)
    pub fn proxy_configuration(&self) -> Option<ProxyConfiguration> {
        let is_https = self
            .remote_url
            .as_ref()
            .is_some_and(|url| url.scheme().eq_ignore_ascii_case("https"));

        let from_config = |section: &str, property: &str| {
            first_url(self.get_values(None, section, property, false))
        };
        let from_env = |name: &str| first_url(self.environment.var(name));

        if is_https {
            if let Some(url) = from_config(git_config::CREDENTIAL_SECTION, git_config::HTTPS_PROXY) {
                return Some(self.proxy_from(url, true));
            }
        }
        if let Some(url) = from_config(git_config::CREDENTIAL_SECTION, git_config::HTTP_PROXY) {
            return Some(self.proxy_from(url, true));
        }

        if let Some(url) = from_config(git_config::HTTP_SECTION, git_config::PROXY) {
            return Some(self.proxy_from(url, false));
        }

        let mut curl_vars = Vec::new();
        if is_https {
            curl_vars.extend([envars::CURL_HTTPS_PROXY, envars::CURL_HTTPS_PROXY_UPPER]);
        }
        curl_vars.extend([envars::CURL_HTTP_PROXY, envars::CURL_ALL_PROXY, envars::CURL_ALL_PROXY_UPPER]);
        if let Some(url) = curl_vars.into_iter().find_map(from_env) {
            return Some(self.proxy_from(url, false));
        }

        from_env(envars::HTTP_PROXY).map(|url| self.proxy_from(url, true))
    }

    fn proxy_from(&self, mut address: Url, is_deprecated_source: bool) -> ProxyConfiguration {
        let username = Some(address.username().to_string()).filter(|u| !u.is_empty());
        let password = address.password().map(str::to_string);

        // Only fails for URLs that cannot carry credentials, which then have none
        let _ = address.set_username("");
        let _ = address.set_password(None);
        address.set_query(None);
        address.set_fragment(None);

        let no_proxy = self
            .environment
            .var(envars::CURL_NO_PROXY)
            .or_else(|| self.environment.var(envars::CURL_NO_PROXY_UPPER))
            .filter(|value| !value.trim().is_empty());

        ProxyConfiguration {
            address,
            username,
            password,
            no_proxy,
            is_deprecated_source,
        }
    }

    /// Trace target from `GCM_TRACE`: `None` when tracing is off.
    pub fn trace_target(&self) -> Option<String> {
        let value = self.environment.var(envars::TRACE)?;
        match parse_booleany(&value) {
            Some(false) => None,
            _ if value.is_empty() => None,
            _ => Some(value),
        }
    }
}

/// Proxy server for outgoing requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfiguration {
    /// Scheme, host, port and path only.
    pub address: Url,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Raw cURL-style `no_proxy` list.
    pub no_proxy: Option<String>,
    /// Set when configured through an option that is going away.
    pub is_deprecated_source: bool,
}

impl ProxyConfiguration {
    /// `no_proxy=*` turns proxying off entirely, as in cURL.
    pub fn bypasses_all(&self) -> bool {
        self.no_proxy.as_deref().is_some_and(|value| value.trim() == "*")
    }
}

/// First value that parses as an absolute URL.
fn first_url(values: impl IntoIterator<Item = String>) -> Option<Url> {
    values.into_iter().find_map(|value| match Url::parse(value.trim()) {
        Ok(url) => Some(url),
        Err(e) => {
            log::debug!("Ignoring proxy value '{}': {}", value, e);
            None
        }
    })
}

/// Parse a Git-style boolean.
pub fn parse_booleany(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Expand a leading `~` and make the path absolute.
fn canonicalize_path(value: &str) -> String {
    let expanded = shellexpand::tilde(value);
    let path = Path::new(expanded.as_ref());

    let absolute: PathBuf = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    absolute.to_string_lossy().into_owned()
}
