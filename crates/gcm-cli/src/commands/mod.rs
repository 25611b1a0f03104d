pub mod config;
pub mod credential;
pub mod resolve;
pub mod scopes;

use anyhow::{Context as _, Result};
use std::sync::Arc;

use gcm_core::config::{Environment, Git2Configuration, GitConfiguration, ProcessEnvironment, Settings};
use gcm_core::http::{HttpProbe, ReqwestProbe};
use gcm_core::provider::register_builtin_providers;
use gcm_core::{HostProviderRegistry, InputArguments};

/// Collaborators shared by every command.
pub struct Context {
    pub environment: Arc<dyn Environment>,
    pub configuration: Arc<dyn GitConfiguration>,
    /// Fixed probe; when `None` one is built from the remote's HTTP settings.
    pub probe: Option<Arc<dyn HttpProbe>>,
}

impl Context {
    pub fn new(
        environment: Arc<dyn Environment>,
        configuration: Arc<dyn GitConfiguration>,
        probe: Option<Arc<dyn HttpProbe>>,
    ) -> Self {
        Self {
            environment,
            configuration,
            probe,
        }
    }

    /// Process environment and the Git configuration visible from the
    /// current directory.
    pub fn discover() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        let configuration = Git2Configuration::discover(Some(cwd.as_path()))
            .context("Failed to locate Git configuration")?;

        Ok(Self::new(
            Arc::new(ProcessEnvironment),
            Arc::new(configuration),
            None,
        ))
    }

    pub fn settings(&self, input: &InputArguments) -> Settings {
        Settings::new(
            self.environment.clone(),
            self.configuration.clone(),
            input.remote_uri(false),
        )
    }

    /// Registry with the built-in providers, probing through the proxy and
    /// TLS options that apply to `input`'s remote.
    pub fn registry(&self, input: &InputArguments) -> Result<HostProviderRegistry> {
        let probe = match &self.probe {
            Some(probe) => probe.clone(),
            None => {
                let probe = ReqwestProbe::from_settings(&self.settings(input))
                    .context("Failed to create HTTP client")?;
                Arc::new(probe) as Arc<dyn HttpProbe>
            }
        };

        let mut registry = HostProviderRegistry::new(
            self.environment.clone(),
            self.configuration.clone(),
            probe,
        );
        register_builtin_providers(&mut registry)?;
        Ok(registry)
    }
}
