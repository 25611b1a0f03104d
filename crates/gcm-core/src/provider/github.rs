use super::{http_hostname, HostProvider};
use crate::http::ProbeResponse;
use crate::input::InputArguments;

const GITHUB_HOST: &str = "github.com";
const GIST_HOST: &str = "gist.github.com";

pub struct GitHubHostProvider;

impl HostProvider for GitHubHostProvider {
    fn id(&self) -> &str {
        "github"
    }

    fn name(&self) -> &str {
        "GitHub"
    }

    fn supported_authority_ids(&self) -> &[&str] {
        &["github"]
    }

    fn is_supported(&self, input: &InputArguments) -> bool {
        let Some(host) = http_hostname(input) else {
            return false;
        };

        if host == GITHUB_HOST || host == GIST_HOST {
            return true;
        }

        // GitHub Enterprise: github[.subdomain].domain.tld
        // and gist.github[.subdomain].domain.tld
        let labels: Vec<&str> = host.split('.').collect();
        (labels.len() >= 3 && labels[0] == "github")
            || (labels.len() >= 4 && labels[0] == "gist" && labels[1] == "github")
    }

    fn is_supported_response(&self, response: &ProbeResponse) -> bool {
        response.has_header("X-GitHub-Request-Id")
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
        let p = GitHubHostProvider;
        assert!(p.is_supported(&input("https", "github.com")));
        assert!(p.is_supported(&input("https", "GitHub.com")));
        assert!(p.is_supported(&input("http", "gist.github.com")));
        assert!(p.is_supported(&input("https", "github.example.com")));
        assert!(p.is_supported(&input("https", "github.example.com:8443")));
        assert!(p.is_supported(&input("https", "gist.github.example.com")));

        assert!(!p.is_supported(&input("ssh", "github.com")));
        assert!(!p.is_supported(&input("https", "github.io")));
        assert!(!p.is_supported(&input("https", "gist.github.io")));
        assert!(!p.is_supported(&input("https", "example.com")));
        assert!(!p.is_supported(&input("https", "mygithub.com")));
    }

    #[test]
    fn test_is_supported_response() {
        let mut headers = HeaderMap::new();
        headers.insert("x-github-request-id", HeaderValue::from_static("1234:ABCD"));
        assert!(GitHubHostProvider.is_supported_response(&ProbeResponse::new(StatusCode::OK, headers)));

        let empty = ProbeResponse::new(StatusCode::OK, HeaderMap::new());
        assert!(!GitHubHostProvider.is_supported_response(&empty));
    }
}
