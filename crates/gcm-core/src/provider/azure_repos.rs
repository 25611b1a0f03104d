use super::{http_hostname, HostProvider};
use crate::input::InputArguments;

const AZURE_DEVOPS_HOST: &str = "dev.azure.com";
const VSTS_HOST_SUFFIX: &str = ".visualstudio.com";

const AUTHORITY_IDS: &[&str] = &[
    "msa",
    "microsoft",
    "microsoftaccount",
    "aad",
    "azure",
    "azuredirectory",
    "live",
    "liveconnect",
    "liveid",
];

pub struct AzureReposHostProvider;

impl HostProvider for AzureReposHostProvider {
    fn id(&self) -> &str {
        "azure-repos"
    }

    fn name(&self) -> &str {
        "Azure Repos"
    }

    fn supported_authority_ids(&self) -> &[&str] {
        AUTHORITY_IDS
    }

    fn is_supported(&self, input: &InputArguments) -> bool {
        http_hostname(input)
            .map(|host| host == AZURE_DEVOPS_HOST || host.ends_with(VSTS_HOST_SUFFIX))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ProbeResponse;
    use crate::provider::test_support::input;
    use reqwest::header::HeaderMap;
    use reqwest::StatusCode;

    #[test]
    fn test_is_supported() {
        let p = AzureReposHostProvider;
        assert!(p.is_supported(&input("https", "dev.azure.com")));
        assert!(p.is_supported(&input("https", "org.visualstudio.com")));
        assert!(p.is_supported(&input("http", "ORG.VisualStudio.com:443")));

        assert!(!p.is_supported(&input("ssh", "dev.azure.com")));
        assert!(!p.is_supported(&input("https", "visualstudio.com")));
        assert!(!p.is_supported(&input("https", "azure.com")));
    }

    #[test]
    fn test_never_matches_response() {
        let response = ProbeResponse::new(StatusCode::OK, HeaderMap::new());
        assert!(!AzureReposHostProvider.is_supported_response(&response));
    }
}
