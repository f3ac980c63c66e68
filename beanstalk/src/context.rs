//! [ApplicationContext] ties together bean definitions and the factory creating beans.

use beanstalk_di::bean_registry::{BeanDefinitionRegistry, DefaultBeanDefinitionRegistry};
use beanstalk_di::catalog::BeanTypeCatalog;
use beanstalk_di::definition_reader::BeanDefinitionReader;
use beanstalk_di::error::{BeanDefinitionReaderError, BeanInstanceProviderError};
use beanstalk_di::factory::{BeanFactory, BeanFactoryBuilder};
use beanstalk_di::instance_provider::{BeanInstancePtr, NamedTypeInstance};
use derive_more::Constructor;
use std::any::Any;
use tracing::info;

/// A ready to use container with definitions read from declarative configuration.
#[derive(Constructor)]
pub struct ApplicationContext {
    factory: BeanFactory,
}

impl ApplicationContext {
    /// Creates a context with definitions read from given file, using types and factory methods
    /// registered in the [BeanTypeCatalog].
    pub fn from_file(path: &str) -> Result<Self, BeanDefinitionReaderError> {
        let catalog = BeanTypeCatalog::from_registrations();
        let mut registry = DefaultBeanDefinitionRegistry::default();
        let count = BeanDefinitionReader::new(&catalog).read_file(path, &mut registry)?;

        info!("Loaded {} bean definitions.", count);

        Ok(Self::from_registry(registry))
    }

    pub fn from_registry<R: BeanDefinitionRegistry + Send + Sync + 'static>(registry: R) -> Self {
        Self::new(
            BeanFactoryBuilder::new()
                .with_definition_registry(Box::new(registry))
                .build(),
        )
    }

    /// Creates all non-lazy singletons.
    pub fn refresh(&self) -> Result<(), BeanInstanceProviderError> {
        self.factory.preinstantiate_singletons()
    }

    /// Returns the bean with given name or alias, checking its type.
    #[inline]
    pub fn bean<T: Any + Send + Sync>(
        &self,
        name: &str,
    ) -> Result<BeanInstancePtr<T>, BeanInstanceProviderError> {
        self.factory.bean(name)
    }

    #[inline]
    pub fn instance(&self, name: &str) -> Result<NamedTypeInstance, BeanInstanceProviderError> {
        self.factory.instance(name)
    }

    #[inline]
    pub fn bean_names(&self) -> Vec<String> {
        self.factory.bean_names()
    }

    #[inline]
    pub fn factory(&self) -> &BeanFactory {
        &self.factory
    }
}
