//! Functionality related to registering definitions of beans. [BeanFactories](crate::factory::BeanFactory)
//! create bean instances based on those definitions, which can be registered manually or read from
//! declarative configuration by a [BeanDefinitionReader](crate::definition_reader::BeanDefinitionReader).

use crate::arguments::BeanArguments;
use crate::bean::{constructor_of, Bean, ConstructorFn, InstanceFactoryFn, StaticFactoryFn};
use crate::bean_registry::registry::NamedBeanDefinitionMap;
use crate::error::BeanDefinitionRegistryError;
use crate::instantiation::Instantiation;
use crate::scope::SINGLETON;
#[cfg(test)]
use mockall::automock;
use std::any::{type_name, Any, TypeId};
use std::sync::Arc;

pub type BeanDefinitionPtr = Arc<BeanDefinition>;

/// Definition of a bean registered in a definition registry.
#[derive(Clone, Debug)]
pub struct BeanDefinition {
    /// How to create the instance.
    pub instantiation: Instantiation,

    /// Type of the created instance.
    pub type_id: TypeId,

    /// Name of the created instance type, for diagnostics.
    pub type_name: &'static str,

    /// Name of the [Scope](crate::scope::Scope) holding created instances.
    pub scope: String,

    /// Lazy singletons are not created by
    /// [preinstantiate_singletons](crate::factory::BeanFactory::preinstantiate_singletons).
    pub lazy_init: bool,

    /// Arguments passed to the constructor.
    pub arguments: BeanArguments,
}

impl BeanDefinition {
    /// Creates a definition of a `T` instantiated with given type-erased constructor.
    pub fn with_constructor<T: Any + Send + Sync>(constructor: ConstructorFn) -> Self {
        Self::new::<T>(Instantiation::Constructor { constructor })
    }

    /// Creates a definition of a [Bean] instantiated with its own constructor.
    pub fn constructor<T: Bean>() -> Self {
        Self::with_constructor::<T>(constructor_of::<T>())
    }

    /// Creates a definition of a `T` created by a static factory method of `factory_type`.
    pub fn with_static_factory<T: Any + Send + Sync>(
        factory_type: &str,
        method_name: &str,
        method: StaticFactoryFn,
    ) -> Self {
        Self::new::<T>(Instantiation::StaticFactory {
            factory_type: factory_type.to_string(),
            method_name: method_name.to_string(),
            method,
        })
    }

    /// Creates a definition of a `T` created by a method of the bean named `factory_bean`.
    pub fn with_instance_factory<T: Any + Send + Sync>(
        factory_bean: &str,
        method_name: &str,
        method: InstanceFactoryFn,
    ) -> Self {
        Self::new::<T>(Instantiation::InstanceFactory {
            factory_bean: factory_bean.to_string(),
            method_name: method_name.to_string(),
            method,
        })
    }

    /// Creates a definition from its parts, using the default singleton scope.
    pub fn from_parts(
        instantiation: Instantiation,
        type_id: TypeId,
        type_name: &'static str,
    ) -> Self {
        Self {
            instantiation,
            type_id,
            type_name,
            scope: SINGLETON.to_string(),
            lazy_init: false,
            arguments: Default::default(),
        }
    }

    fn new<T: Any + Send + Sync>(instantiation: Instantiation) -> Self {
        Self::from_parts(instantiation, TypeId::of::<T>(), type_name::<T>())
    }

    pub fn with_scope<T: ToString>(mut self, scope: T) -> Self {
        self.scope = scope.to_string();
        self
    }

    pub fn with_lazy_init(mut self, lazy_init: bool) -> Self {
        self.lazy_init = lazy_init;
        self
    }

    pub fn with_arguments(mut self, arguments: BeanArguments) -> Self {
        self.arguments = arguments;
        self
    }
}

/// A registry of bean definitions which can be used when requesting instances via a
/// [BeanInstanceProvider](crate::instance_provider::BeanInstanceProvider).
#[cfg_attr(test, automock)]
pub trait BeanDefinitionRegistry {
    /// Adds a new definition under given name. Note: handling of duplicate names is
    /// registry-dependent.
    fn register(
        &mut self,
        name: &str,
        definition: BeanDefinition,
    ) -> Result<(), BeanDefinitionRegistryError>;

    /// Adds an alternative name for an already registered bean.
    fn register_alias(
        &mut self,
        name: &str,
        alias: &str,
    ) -> Result<(), BeanDefinitionRegistryError>;

    /// Returns the definition with given name or alias.
    fn lookup(&self, name: &str) -> Result<BeanDefinitionPtr, BeanDefinitionRegistryError>;

    /// Resolves an alias to the name the bean was registered with. Returns registered names
    /// unchanged.
    fn canonical_name(&self, name: &str) -> Option<String>;

    /// Checks if there's a definition with given name or alias.
    fn contains(&self, name: &str) -> bool;

    /// Returns all registered names, without aliases, in registration order.
    fn names(&self) -> Vec<String>;

    /// Checks if registering an already registered name replaces its definition.
    fn allows_definition_overriding(&self) -> bool;
}

/// Default registry of bean definitions, keeping definitions in memory.
#[derive(Clone, Debug, Default)]
pub struct DefaultBeanDefinitionRegistry {
    definition_map: NamedBeanDefinitionMap,
    allow_definition_overriding: bool,
}

impl DefaultBeanDefinitionRegistry {
    /// Creates an empty registry. If definition overriding is allowed, registering a name again
    /// replaces the previous definition instead of failing.
    pub fn new(allow_definition_overriding: bool) -> Self {
        Self {
            definition_map: Default::default(),
            allow_definition_overriding,
        }
    }
}

impl BeanDefinitionRegistry for DefaultBeanDefinitionRegistry {
    #[inline]
    fn register(
        &mut self,
        name: &str,
        definition: BeanDefinition,
    ) -> Result<(), BeanDefinitionRegistryError> {
        self.definition_map
            .try_register(name, definition, self.allow_definition_overriding)
    }

    #[inline]
    fn register_alias(
        &mut self,
        name: &str,
        alias: &str,
    ) -> Result<(), BeanDefinitionRegistryError> {
        self.definition_map.try_register_alias(name, alias)
    }

    #[inline]
    fn lookup(&self, name: &str) -> Result<BeanDefinitionPtr, BeanDefinitionRegistryError> {
        self.definition_map
            .definition(name)
            .ok_or_else(|| BeanDefinitionRegistryError::NoSuchBeanDefinition(name.to_string()))
    }

    #[inline]
    fn canonical_name(&self, name: &str) -> Option<String> {
        self.definition_map
            .canonical_name(name)
            .map(|name| name.to_string())
    }

    #[inline]
    fn contains(&self, name: &str) -> bool {
        self.definition_map.canonical_name(name).is_some()
    }

    #[inline]
    fn names(&self) -> Vec<String> {
        self.definition_map.names()
    }

    #[inline]
    fn allows_definition_overriding(&self) -> bool {
        self.allow_definition_overriding
    }
}

mod registry {
    use crate::bean_registry::{BeanDefinition, BeanDefinitionPtr};
    use crate::error::BeanDefinitionRegistryError;
    use fxhash::FxHashMap;
    use std::sync::Arc;
    use tracing::debug;

    #[derive(Default, Clone, Debug)]
    pub(super) struct NamedBeanDefinitionMap {
        definitions: FxHashMap<String, BeanDefinitionPtr>,
        aliases: FxHashMap<String, String>,
        // registration order
        names: Vec<String>,
    }

    impl NamedBeanDefinitionMap {
        pub(super) fn canonical_name<'a>(&'a self, name: &'a str) -> Option<&'a str> {
            if self.definitions.contains_key(name) {
                Some(name)
            } else {
                self.aliases.get(name).map(|name| name.as_str())
            }
        }

        pub(super) fn definition(&self, name: &str) -> Option<BeanDefinitionPtr> {
            self.canonical_name(name)
                .and_then(|name| self.definitions.get(name))
                .cloned()
        }

        pub(super) fn try_register(
            &mut self,
            name: &str,
            definition: BeanDefinition,
            allow_definition_overriding: bool,
        ) -> Result<(), BeanDefinitionRegistryError> {
            if self.aliases.contains_key(name) {
                return Err(BeanDefinitionRegistryError::DuplicateBeanName(
                    name.to_string(),
                ));
            }

            let definition = Arc::new(definition);
            if let Some(existing) = self.definitions.get_mut(name) {
                if !allow_definition_overriding {
                    return Err(BeanDefinitionRegistryError::DuplicateBeanName(
                        name.to_string(),
                    ));
                }

                debug!("Overriding definition of bean '{}'", name);
                *existing = definition;
            } else {
                self.definitions.insert(name.to_string(), definition);
                self.names.push(name.to_string());
            }

            Ok(())
        }

        pub(super) fn try_register_alias(
            &mut self,
            name: &str,
            alias: &str,
        ) -> Result<(), BeanDefinitionRegistryError> {
            if self.definitions.contains_key(alias) || self.aliases.contains_key(alias) {
                return Err(BeanDefinitionRegistryError::DuplicateBeanName(
                    alias.to_string(),
                ));
            }

            let target = self
                .canonical_name(name)
                .ok_or_else(|| BeanDefinitionRegistryError::NoSuchBeanDefinition(name.to_string()))?
                .to_string();

            self.aliases.insert(alias.to_string(), target);
            Ok(())
        }

        #[inline]
        pub(super) fn names(&self) -> Vec<String> {
            self.names.clone()
        }
    }

    #[cfg(test)]
    mod tests {
        use crate::bean_registry::registry::NamedBeanDefinitionMap;
        use crate::bean_registry::BeanDefinition;
        use crate::error::BeanDefinitionRegistryError;
        use crate::instance_provider::{BeanInstanceAnyPtr, BeanInstancePtr, ErrorPtr};

        fn static_factory() -> Result<BeanInstanceAnyPtr, ErrorPtr> {
            Ok(BeanInstancePtr::new(0) as BeanInstanceAnyPtr)
        }

        fn create_definition() -> BeanDefinition {
            BeanDefinition::with_static_factory::<i32>("Factory", "create", static_factory)
        }

        #[test]
        fn should_register_definition() {
            let mut registry = NamedBeanDefinitionMap::default();
            registry
                .try_register("name", create_definition(), false)
                .unwrap();

            assert_eq!(registry.definition("name").unwrap().type_name, "i32");
            assert_eq!(registry.canonical_name("name"), Some("name"));
            assert_eq!(registry.names(), vec!["name".to_string()]);
        }

        #[test]
        fn should_not_register_duplicate_name() {
            let mut registry = NamedBeanDefinitionMap::default();
            registry
                .try_register("name", create_definition(), false)
                .unwrap();

            assert_eq!(
                registry
                    .try_register("name", create_definition(), false)
                    .unwrap_err(),
                BeanDefinitionRegistryError::DuplicateBeanName("name".to_string())
            );
        }

        #[test]
        fn should_override_duplicate_name() {
            let mut registry = NamedBeanDefinitionMap::default();
            registry
                .try_register("name", create_definition(), true)
                .unwrap();
            registry
                .try_register("name", create_definition().with_lazy_init(true), true)
                .unwrap();

            assert!(registry.definition("name").unwrap().lazy_init);
            assert_eq!(registry.names().len(), 1);
        }

        #[test]
        fn should_register_alias() {
            let mut registry = NamedBeanDefinitionMap::default();
            registry
                .try_register("name", create_definition(), false)
                .unwrap();
            registry.try_register_alias("name", "alias").unwrap();
            registry.try_register_alias("alias", "second_alias").unwrap();

            assert_eq!(registry.canonical_name("alias"), Some("name"));
            assert_eq!(registry.canonical_name("second_alias"), Some("name"));
            assert!(registry.definition("second_alias").is_some());
            assert_eq!(registry.names(), vec!["name".to_string()]);
        }

        #[test]
        fn should_reject_clashing_alias() {
            let mut registry = NamedBeanDefinitionMap::default();
            registry
                .try_register("name", create_definition(), false)
                .unwrap();
            registry
                .try_register("other", create_definition(), false)
                .unwrap();

            assert_eq!(
                registry.try_register_alias("name", "other").unwrap_err(),
                BeanDefinitionRegistryError::DuplicateBeanName("other".to_string())
            );
            assert_eq!(
                registry.try_register_alias("missing", "alias").unwrap_err(),
                BeanDefinitionRegistryError::NoSuchBeanDefinition("missing".to_string())
            );

            registry.try_register_alias("name", "alias").unwrap();
            assert_eq!(
                registry
                    .try_register("alias", create_definition(), true)
                    .unwrap_err(),
                BeanDefinitionRegistryError::DuplicateBeanName("alias".to_string())
            );
        }
    }
}
