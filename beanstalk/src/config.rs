//! Application configuration is retrieved from an [ApplicationConfigProvider]. The default
//! provider creates the config with opinionated default values, which can then be overwritten by
//! environment variables prefixed with `BEANSTALK_` or `beanstalk.json` file. A fixed
//! [ApplicationConfig] is a provider by itself.

use beanstalk_di::instance_provider::ErrorPtr;
use config::{Config, ConfigError, Environment, File};
#[cfg(test)]
use mockall::automock;
use serde::Deserialize;
use std::sync::Arc;

const CONFIG_ENV_PREFIX: &str = "BEANSTALK";

/// Name of the default config file.
pub const CONFIG_FILE: &str = "beanstalk.json";

/// Default path of the declarative bean definitions.
pub const DEFAULT_BEAN_DEFINITIONS: &str = "beans.json";

/// Application configuration which can be provided by an [ApplicationConfigProvider].
#[non_exhaustive]
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ApplicationConfig {
    /// Path to the file with bean definitions. The format is deduced from the extension.
    pub bean_definitions: String,
    /// Should a default tracing logger be installed by the application.
    pub install_tracing_logger: bool,
    /// Logger filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            bean_definitions: DEFAULT_BEAN_DEFINITIONS.to_string(),
            install_tracing_logger: true,
            log_filter: "info".to_string(),
        }
    }
}

impl From<OptionalApplicationConfig> for ApplicationConfig {
    fn from(value: OptionalApplicationConfig) -> Self {
        let default = Self::default();
        Self {
            bean_definitions: value.bean_definitions.unwrap_or(default.bean_definitions),
            install_tracing_logger: value
                .install_tracing_logger
                .unwrap_or(default.install_tracing_logger),
            log_filter: value.log_filter.unwrap_or(default.log_filter),
        }
    }
}

impl ApplicationConfig {
    /// Creates the config from defaults, the config file and the environment.
    pub fn init_from_environment() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(CONFIG_ENV_PREFIX))
            .build()
            .and_then(|config| config.try_deserialize::<OptionalApplicationConfig>())
            .map(|config| config.into())
    }

    pub fn with_bean_definitions<T: ToString>(mut self, bean_definitions: T) -> Self {
        self.bean_definitions = bean_definitions.to_string();
        self
    }

    pub fn with_install_tracing_logger(mut self, install_tracing_logger: bool) -> Self {
        self.install_tracing_logger = install_tracing_logger;
        self
    }

    pub fn with_log_filter<T: ToString>(mut self, log_filter: T) -> Self {
        self.log_filter = log_filter.to_string();
        self
    }
}

/// Provider for [ApplicationConfig].
#[cfg_attr(test, automock)]
pub trait ApplicationConfigProvider {
    fn config(&self) -> Result<ApplicationConfig, ErrorPtr>;
}

impl ApplicationConfigProvider for ApplicationConfig {
    #[inline]
    fn config(&self) -> Result<ApplicationConfig, ErrorPtr> {
        Ok(self.clone())
    }
}

/// Provider reading the config from the environment once, on creation.
#[derive(Clone, Debug)]
pub struct DefaultApplicationConfigProvider {
    // cached init result
    config: Result<ApplicationConfig, ErrorPtr>,
}

impl Default for DefaultApplicationConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultApplicationConfigProvider {
    pub fn new() -> Self {
        Self {
            config: ApplicationConfig::init_from_environment()
                .map_err(|error| Arc::new(error) as ErrorPtr),
        }
    }
}

impl ApplicationConfigProvider for DefaultApplicationConfigProvider {
    #[inline]
    fn config(&self) -> Result<ApplicationConfig, ErrorPtr> {
        self.config.clone()
    }
}

#[derive(Deserialize)]
struct OptionalApplicationConfig {
    bean_definitions: Option<String>,
    install_tracing_logger: Option<bool>,
    log_filter: Option<String>,
}
