use super::HostProvider;
use crate::input::InputArguments;

const AUTHORITY_IDS: &[&str] = &["basic", "integrated", "windows", "kerberos", "ntlm", "tfs", "sso"];

/// Catch-all provider for any protocol.
pub struct GenericHostProvider;

impl HostProvider for GenericHostProvider {
    fn id(&self) -> &str {
        "generic"
    }

    fn name(&self) -> &str {
        "Generic"
    }

    fn supported_authority_ids(&self) -> &[&str] {
        AUTHORITY_IDS
    }

    fn is_supported(&self, input: &InputArguments) -> bool {
        input
            .protocol()
            .map(|p| !p.trim().is_empty())
            .unwrap_or(false)
    }
}
