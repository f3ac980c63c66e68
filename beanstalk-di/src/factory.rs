//! Core functionality for creating bean instances.

use crate::bean_registry::{
    BeanDefinitionPtr, BeanDefinitionRegistry, DefaultBeanDefinitionRegistry,
};
use crate::error::BeanInstanceProviderError;
use crate::instance_provider::{
    downcast_instance, BeanInstanceProvider, BeanInstancePtr, NamedTypeInstance,
};
use crate::instantiation::{InstantiationStrategyPtr, StrategyResolver};
use crate::scope::{PrototypeScope, ScopePtr, SingletonScope, PROTOTYPE, SINGLETON};
use fxhash::FxHashMap;
use itertools::Itertools;
use std::any::Any;
use tracing::{debug, info};

pub type BeanDefinitionRegistryPtr = Box<dyn BeanDefinitionRegistry + Send + Sync>;

pub type ScopeRegistry = FxHashMap<String, ScopePtr>;

/// Builder for [BeanFactory] with sensible defaults, for easy construction.
pub struct BeanFactoryBuilder {
    definition_registry: BeanDefinitionRegistryPtr,
    strategy_resolver: StrategyResolver,
    scopes: ScopeRegistry,
}

impl Default for BeanFactoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BeanFactoryBuilder {
    /// Creates a new builder with a default configuration: an empty registry which doesn't allow
    /// definition overriding, all built-in strategies and scopes.
    pub fn new() -> Self {
        Self {
            definition_registry: Box::<DefaultBeanDefinitionRegistry>::default(),
            strategy_resolver: Default::default(),
            scopes: [
                (
                    SINGLETON.to_string(),
                    Box::<SingletonScope>::default() as ScopePtr,
                ),
                (
                    PROTOTYPE.to_string(),
                    Box::<PrototypeScope>::default() as ScopePtr,
                ),
            ]
            .into_iter()
            .collect(),
        }
    }

    /// Sets new [BeanDefinitionRegistry].
    pub fn with_definition_registry(
        mut self,
        definition_registry: BeanDefinitionRegistryPtr,
    ) -> Self {
        self.definition_registry = definition_registry;
        self
    }

    /// Sets new [StrategyResolver].
    pub fn with_strategy_resolver(mut self, strategy_resolver: StrategyResolver) -> Self {
        self.strategy_resolver = strategy_resolver;
        self
    }

    /// Adds or replaces an instantiation strategy.
    pub fn with_strategy(mut self, strategy: InstantiationStrategyPtr) -> Self {
        self.strategy_resolver = self.strategy_resolver.with_strategy(strategy);
        self
    }

    /// Sets new scopes.
    pub fn with_scopes(mut self, scopes: ScopeRegistry) -> Self {
        self.scopes = scopes;
        self
    }

    /// Adds a new scope.
    pub fn with_scope<T: ToString>(mut self, name: T, scope: ScopePtr) -> Self {
        self.scopes.insert(name.to_string(), scope);
        self
    }

    /// Builds resulting [BeanFactory].
    pub fn build(self) -> BeanFactory {
        BeanFactory::new(
            self.definition_registry,
            self.strategy_resolver,
            self.scopes,
        )
    }
}

/// The container facade. Uses definitions from the [BeanDefinitionRegistry], a [StrategyResolver]
/// to create instances and [scopes](crate::scope) to store instances for reuse.
///
/// All operations take `&self`, so a factory can be shared between threads.
pub struct BeanFactory {
    definition_registry: BeanDefinitionRegistryPtr,
    strategy_resolver: StrategyResolver,
    scopes: ScopeRegistry,
}

impl BeanFactory {
    /// Creates a new factory with given registry, resolver and scopes. The scope map should include
    /// built-in [SINGLETON] and [PROTOTYPE] for maximum compatibility with definitions, since
    /// singleton is the default scope. This is not a hard requirement, but care needs to be taken
    /// to ensure no definition uses them.
    pub fn new(
        definition_registry: BeanDefinitionRegistryPtr,
        strategy_resolver: StrategyResolver,
        scopes: ScopeRegistry,
    ) -> Self {
        Self {
            definition_registry,
            strategy_resolver,
            scopes,
        }
    }

    /// Returns the registry holding definitions used by this factory.
    #[inline]
    pub fn definition_registry(&self) -> &(dyn BeanDefinitionRegistry + Send + Sync) {
        self.definition_registry.as_ref()
    }

    /// Returns the bean with given name or alias, checking that it's a `T`.
    pub fn bean<T: Any + Send + Sync>(
        &self,
        name: &str,
    ) -> Result<BeanInstancePtr<T>, BeanInstanceProviderError> {
        self.instance(name)
            .and_then(|instance| downcast_instance(name, instance))
    }

    /// Returns the type-erased bean with given name or alias, along with its type name.
    pub fn instance(&self, name: &str) -> Result<NamedTypeInstance, BeanInstanceProviderError> {
        CreationContext::new(self).instance_by_name(name)
    }

    #[inline]
    pub fn contains_bean(&self, name: &str) -> bool {
        self.definition_registry.contains(name)
    }

    #[inline]
    pub fn bean_names(&self) -> Vec<String> {
        self.definition_registry.names()
    }

    /// Creates all non-lazy singletons, in definition registration order.
    pub fn preinstantiate_singletons(&self) -> Result<(), BeanInstanceProviderError> {
        info!("Pre-instantiating singletons...");

        for name in self.definition_registry.names() {
            let definition = self.lookup(&name)?;
            if definition.scope == SINGLETON && !definition.lazy_init {
                self.instance(&name)?;
            }
        }

        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<BeanDefinitionPtr, BeanInstanceProviderError> {
        self.definition_registry
            .lookup(name)
            .map_err(|_| BeanInstanceProviderError::NoSuchBeanDefinition(name.to_string()))
    }
}

impl BeanInstanceProvider for BeanFactory {
    #[inline]
    fn instance_by_name(
        &mut self,
        name: &str,
    ) -> Result<NamedTypeInstance, BeanInstanceProviderError> {
        self.instance(name)
    }
}

/// Provider used during a single top-level lookup. Tracks beans in creation to detect circular
/// references without blocking other threads.
struct CreationContext<'a> {
    factory: &'a BeanFactory,
    beans_in_creation: Vec<String>,
}

impl<'a> CreationContext<'a> {
    fn new(factory: &'a BeanFactory) -> Self {
        Self {
            factory,
            beans_in_creation: Vec::new(),
        }
    }
}

impl BeanInstanceProvider for CreationContext<'_> {
    fn instance_by_name(
        &mut self,
        name: &str,
    ) -> Result<NamedTypeInstance, BeanInstanceProviderError> {
        let factory = self.factory;
        let name = factory
            .definition_registry
            .canonical_name(name)
            .ok_or_else(|| BeanInstanceProviderError::NoSuchBeanDefinition(name.to_string()))?;
        let definition = factory.lookup(&name)?;

        let scope = factory.scopes.get(&definition.scope).ok_or_else(|| {
            BeanInstanceProviderError::UnrecognizedScope(definition.scope.clone())
        })?;

        if let Some(instance) = scope.instance(&name) {
            return Ok((instance, definition.type_name));
        }

        if self.beans_in_creation.contains(&name) {
            debug!(
                "Circular reference detected: {} -> {}",
                self.beans_in_creation.iter().join(" -> "),
                name
            );
            return Err(BeanInstanceProviderError::CurrentlyInCreation(name));
        }

        self.beans_in_creation.push(name.clone());
        let instance = scope.instance_or_create(&name, &mut || {
            debug!("Creating instance of bean '{}'", name);
            factory
                .strategy_resolver
                .resolve(&name, &definition, &mut *self)
        });
        self.beans_in_creation.pop();

        instance.map(|instance| (instance, definition.type_name))
    }
}
