use super::{http_hostname, HostProvider};
use crate::http::ProbeResponse;
use crate::input::InputArguments;

const BITBUCKET_HOST: &str = "bitbucket.org";

/// Bitbucket Cloud by hostname; Bitbucket Server and Data Center by probe.
pub struct BitbucketHostProvider;

impl HostProvider for BitbucketHostProvider {
    fn id(&self) -> &str {
        "bitbucket"
    }

    fn name(&self) -> &str {
        "Bitbucket"
    }

    fn supported_authority_ids(&self) -> &[&str] {
        &["bitbucket"]
    }

    fn is_supported(&self, input: &InputArguments) -> bool {
        http_hostname(input)
            .map(|host| host.ends_with(BITBUCKET_HOST))
            .unwrap_or(false)
    }

    fn is_supported_response(&self, response: &ProbeResponse) -> bool {
        response.has_header("X-AREQUESTID")
    }
}
