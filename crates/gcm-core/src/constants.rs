//! Well-known names shared by the settings resolver and the provider registry.

/// Provider ID meaning "no explicit choice, detect automatically".
pub const PROVIDER_ID_AUTO: &str = "auto";

/// Legacy authority ID meaning "no explicit choice, detect automatically".
pub const AUTHORITY_ID_AUTO: &str = "auto";

pub const DEFAULT_AUTO_DETECT_PROVIDER_TIMEOUT_MS: i64 = 2000;

pub const HELP_URL_AUTODETECT: &str = "https://aka.ms/gcm/autodetect";
pub const HELP_URL_AUTHORITY_DEPRECATED: &str = "https://aka.ms/gcm/authority";
pub const HELP_URL_HTTP_PROXY: &str = "https://aka.ms/gcm/httpproxy";
pub const HELP_URL_TLS_VERIFY: &str = "https://aka.ms/gcm/tlsverify";

/// Environment variables understood by the helper.
pub mod envars {
    pub const PROVIDER: &str = "GCM_PROVIDER";
    pub const AUTHORITY: &str = "GCM_AUTHORITY";
    pub const AUTODETECT_TIMEOUT: &str = "GCM_AUTODETECT_TIMEOUT";
    pub const INTERACTIVE: &str = "GCM_INTERACTIVE";
    pub const TRACE: &str = "GCM_TRACE";
    pub const HTTP_PROXY: &str = "GCM_HTTP_PROXY";

    pub const GIT_SSL_NO_VERIFY: &str = "GIT_SSL_NO_VERIFY";
    pub const GIT_SSL_CAINFO: &str = "GIT_SSL_CAINFO";

    // cURL reads the lowercase forms first; it ignores uppercase HTTP_PROXY
    pub const CURL_HTTPS_PROXY: &str = "https_proxy";
    pub const CURL_HTTPS_PROXY_UPPER: &str = "HTTPS_PROXY";
    pub const CURL_HTTP_PROXY: &str = "http_proxy";
    pub const CURL_ALL_PROXY: &str = "all_proxy";
    pub const CURL_ALL_PROXY_UPPER: &str = "ALL_PROXY";
    pub const CURL_NO_PROXY: &str = "no_proxy";
    pub const CURL_NO_PROXY_UPPER: &str = "NO_PROXY";
}

/// Git configuration section and property names.
pub mod git_config {
    pub const CREDENTIAL_SECTION: &str = "credential";

    pub const PROVIDER: &str = "provider";
    pub const AUTHORITY: &str = "authority";
    pub const AUTODETECT_TIMEOUT: &str = "autoDetectTimeout";
    pub const INTERACTIVE: &str = "interactive";
    pub const HTTP_PROXY: &str = "httpProxy";
    pub const HTTPS_PROXY: &str = "httpsProxy";

    pub const HTTP_SECTION: &str = "http";

    pub const PROXY: &str = "proxy";
    pub const SSL_VERIFY: &str = "sslVerify";
    pub const SSL_CA_INFO: &str = "sslCAInfo";
}
