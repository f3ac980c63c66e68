//! Core application framework functionality.

use crate::config::{ApplicationConfig, ApplicationConfigProvider};
use crate::context::ApplicationContext;
use crate::logging::install_tracing_logger;
use beanstalk_di::error::{BeanDefinitionReaderError, BeanInstanceProviderError};
use beanstalk_di::instance_provider::ErrorPtr;
use derive_more::Constructor;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Error retrieving application config: {0}")]
    ConfigError(ErrorPtr),
    #[error("Error reading bean definitions: {0}")]
    DefinitionError(#[from] BeanDefinitionReaderError),
    #[error("Error creating beans: {0}")]
    InstantiationError(#[from] BeanInstanceProviderError),
}

/// Main entrypoint for the application. Bootstraps an [ApplicationContext] from configured bean
/// definitions.
#[derive(Constructor)]
pub struct Application<P: ApplicationConfigProvider> {
    config_provider: P,
}

impl<P: ApplicationConfigProvider> Application<P> {
    /// Installs the logger, if configured to, reads bean definitions and creates all eager
    /// singletons.
    pub fn bootstrap(&self) -> Result<ApplicationContext, ApplicationError> {
        let config = self
            .config_provider
            .config()
            .map_err(ApplicationError::ConfigError)?;

        if config.install_tracing_logger {
            if let Err(error) = install_tracing_logger(&config.log_filter) {
                warn!("Cannot install tracing logger: {}", error);
            }
        }

        self.create_context(&config)
    }

    fn create_context(
        &self,
        config: &ApplicationConfig,
    ) -> Result<ApplicationContext, ApplicationError> {
        info!("Bootstrapping application...");

        let context = ApplicationContext::from_file(&config.bean_definitions)?;

        info!("Creating singletons...");
        context.refresh()?;

        Ok(context)
    }
}
