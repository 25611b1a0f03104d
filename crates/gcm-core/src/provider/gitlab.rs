use super::{http_hostname, HostProvider};
use crate::http::ProbeResponse;
use crate::input::InputArguments;

/// Public GitLab instances recognised by name.
const KNOWN_HOSTS: &[&str] = &["gitlab.com", "gitlab.freedesktop.org", "gitlab.gnome.org"];

pub struct GitLabHostProvider;

impl HostProvider for GitLabHostProvider {
    fn id(&self) -> &str {
        "gitlab"
    }

    fn name(&self) -> &str {
        "GitLab"
    }

    fn supported_authority_ids(&self) -> &[&str] {
        &["gitlab"]
    }

    fn is_supported(&self, input: &InputArguments) -> bool {
        let Some(host) = http_hostname(input) else {
            return false;
        };

        if KNOWN_HOSTS.contains(&host.as_str()) {
            return true;
        }

        // gitlab[.subdomain].domain.tld
        let labels: Vec<&str> = host.split('.').collect();
        labels.len() >= 3 && labels[0] == "gitlab"
    }

    fn is_supported_response(&self, response: &ProbeResponse) -> bool {
        response.has_header("X-Gitlab-Feature-Category")
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
        let p = GitLabHostProvider;
        assert!(p.is_supported(&input("https", "gitlab.com")));
        assert!(p.is_supported(&input("https", "gitlab.freedesktop.org")));
        assert!(p.is_supported(&input("https", "GITLAB.GNOME.ORG")));
        assert!(p.is_supported(&input("https", "gitlab.example.com:8080")));

        assert!(!p.is_supported(&input("ssh", "gitlab.com")));
        assert!(!p.is_supported(&input("https", "gitlab.io")));
        assert!(!p.is_supported(&input("https", "code.example.com")));
    }

    #[test]
    fn test_is_supported_response() {
        let mut headers = HeaderMap::new();
        headers.insert("x-gitlab-feature-category", HeaderValue::from_static("git_protocol"));
        assert!(GitLabHostProvider.is_supported_response(&ProbeResponse::new(StatusCode::UNAUTHORIZED, headers)));
    }
}
