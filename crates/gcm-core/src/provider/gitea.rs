use reqwest::header::SET_COOKIE;

use super::{http_hostname, HostProvider};
use crate::http::ProbeResponse;
use crate::input::InputArguments;

const GITEA_COOKIE: &str = "i_like_gitea=";

pub struct GiteaHostProvider;

impl HostProvider for GiteaHostProvider {
    fn id(&self) -> &str {
        "gitea"
    }

    fn name(&self) -> &str {
        "Gitea"
    }

    fn is_supported(&self, input: &InputArguments) -> bool {
        let Some(host) = http_hostname(input) else {
            return false;
        };

        // gitea[.subdomain].domain.tld
        let labels: Vec<&str> = host.split('.').collect();
        labels.len() >= 3 && labels[0] == "gitea"
    }

    fn is_supported_response(&self, response: &ProbeResponse) -> bool {
        response
            .header_values(SET_COOKIE.as_str())
            .iter()
            .any(|cookie| cookie.contains(GITEA_COOKIE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::test_support::input;
    use reqwest::header::{HeaderMap, HeaderValue};
    use reqwest::StatusCode;

    #[test]
    fn test_is_supported() {
        let p = GiteaHostProvider;
        assert!(p.is_supported(&input("https", "gitea.example.com")));
        assert!(!p.is_supported(&input("https", "gitea.com")));
        assert!(!p.is_supported(&input("ssh", "gitea.example.com")));
        assert!(p.supported_authority_ids().is_empty());
    }

    #[test]
    fn test_is_supported_response() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("lang=en-US; Path=/"));
        headers.append(SET_COOKIE, HeaderValue::from_static("i_like_gitea=abc123; Path=/; HttpOnly"));
        assert!(GiteaHostProvider.is_supported_response(&ProbeResponse::new(StatusCode::OK, headers)));

        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("lang=en-US; Path=/"));
        assert!(!GiteaHostProvider.is_supported_response(&ProbeResponse::new(StatusCode::OK, headers)));
    }
}
