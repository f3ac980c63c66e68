//! Bean instantiation strategies. Each [BeanDefinition] describes how its instance is created with
//! an [Instantiation] variant, while the actual creation is performed by an
//! [InstantiationStrategy] registered for the variant's [StrategyKind] in a [StrategyResolver].
//!
//! Three strategies are available out of the box:
//!
//! * constructor - calls the constructor of the bean type with the definition's arguments
//! * static factory - calls a factory function which has no instance context; the function decides
//! whether to return a fresh or a shared instance
//! * instance factory - resolves another bean (the factory bean) and calls a method on it

use crate::bean::{ConstructorFn, InstanceFactoryFn, StaticFactoryFn};
use crate::bean_registry::BeanDefinition;
use crate::error::BeanInstanceProviderError;
use crate::instance_provider::{BeanInstanceAnyPtr, BeanInstanceProvider, ErrorPtr};
use derivative::Derivative;
use fxhash::FxHashMap;
#[cfg(test)]
use mockall::automock;
use std::any::Any;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tracing::debug;

/// Tag identifying an instantiation strategy.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum StrategyKind {
    Constructor,
    StaticFactory,
    InstanceFactory,
}

impl StrategyKind {
    /// Name of the strategy as used in declarative configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Constructor => "constructor",
            Self::StaticFactory => "static-factory",
            Self::InstanceFactory => "instance-factory",
        }
    }

    /// Parses a configuration name of a strategy.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "constructor" => Some(Self::Constructor),
            "static-factory" => Some(Self::StaticFactory),
            "instance-factory" => Some(Self::InstanceFactory),
            _ => None,
        }
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Description of how a bean instance is created.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub enum Instantiation {
    /// Create the bean by calling its constructor.
    Constructor {
        #[derivative(Debug = "ignore")]
        constructor: ConstructorFn,
    },
    /// Create the bean by calling a static factory method declared on `factory_type`.
    StaticFactory {
        factory_type: String,
        method_name: String,
        #[derivative(Debug = "ignore")]
        method: StaticFactoryFn,
    },
    /// Create the bean by calling a method on the bean named `factory_bean`.
    InstanceFactory {
        factory_bean: String,
        method_name: String,
        #[derivative(Debug = "ignore")]
        method: InstanceFactoryFn,
    },
}

impl Instantiation {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::Constructor { .. } => StrategyKind::Constructor,
            Self::StaticFactory { .. } => StrategyKind::StaticFactory,
            Self::InstanceFactory { .. } => StrategyKind::InstanceFactory,
        }
    }
}

/// Handler creating instances for definitions using a single [StrategyKind].
#[cfg_attr(test, automock)]
pub trait InstantiationStrategy {
    /// The kind of definitions this strategy can handle.
    fn kind(&self) -> StrategyKind;

    /// Creates a new instance for the named definition. Other beans, if needed, should be
    /// requested from the given [BeanInstanceProvider].
    fn instantiate(
        &self,
        name: &str,
        definition: &BeanDefinition,
        instance_provider: &mut dyn BeanInstanceProvider,
    ) -> Result<BeanInstanceAnyPtr, BeanInstanceProviderError>;
}

pub type InstantiationStrategyPtr = Box<dyn InstantiationStrategy + Send + Sync>;

fn invocation_error(
    name: &str,
    strategy: StrategyKind,
    source: ErrorPtr,
) -> BeanInstanceProviderError {
    BeanInstanceProviderError::Invocation {
        name: name.to_string(),
        strategy,
        source,
    }
}

fn unsupported_strategy(name: &str, definition: &BeanDefinition) -> BeanInstanceProviderError {
    BeanInstanceProviderError::UnsupportedStrategy {
        name: name.to_string(),
        strategy: definition.instantiation.kind(),
    }
}

/// Instantiates beans by calling their constructors.
#[derive(Default, Copy, Clone, Eq, PartialEq, Debug)]
pub struct ConstructorStrategy;

impl InstantiationStrategy for ConstructorStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Constructor
    }

    fn instantiate(
        &self,
        name: &str,
        definition: &BeanDefinition,
        instance_provider: &mut dyn BeanInstanceProvider,
    ) -> Result<BeanInstanceAnyPtr, BeanInstanceProviderError> {
        if let Instantiation::Constructor { constructor } = &definition.instantiation {
            debug!(
                "Instantiating bean '{}' with constructor of {}",
                name, definition.type_name
            );
            constructor(&definition.arguments, instance_provider)
                .map_err(|error| invocation_error(name, self.kind(), error))
        } else {
            Err(unsupported_strategy(name, definition))
        }
    }
}

/// Instantiates beans by calling static factory methods.
#[derive(Default, Copy, Clone, Eq, PartialEq, Debug)]
pub struct StaticFactoryStrategy;

impl InstantiationStrategy for StaticFactoryStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::StaticFactory
    }

    fn instantiate(
        &self,
        name: &str,
        definition: &BeanDefinition,
        _instance_provider: &mut dyn BeanInstanceProvider,
    ) -> Result<BeanInstanceAnyPtr, BeanInstanceProviderError> {
        if let Instantiation::StaticFactory {
            factory_type,
            method_name,
            method,
        } = &definition.instantiation
        {
            debug!(
                "Instantiating bean '{}' with static factory method {}::{}",
                name, factory_type, method_name
            );
            method().map_err(|error| invocation_error(name, self.kind(), error))
        } else {
            Err(unsupported_strategy(name, definition))
        }
    }
}

/// Instantiates beans by calling methods on factory beans. The factory bean is resolved through
/// the instance provider, so it's subject to its own definition and scope.
#[derive(Default, Copy, Clone, Eq, PartialEq, Debug)]
pub struct InstanceFactoryStrategy;

impl InstantiationStrategy for InstanceFactoryStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::InstanceFactory
    }

    fn instantiate(
        &self,
        name: &str,
        definition: &BeanDefinition,
        instance_provider: &mut dyn BeanInstanceProvider,
    ) -> Result<BeanInstanceAnyPtr, BeanInstanceProviderError> {
        if let Instantiation::InstanceFactory {
            factory_bean,
            method_name,
            method,
        } = &definition.instantiation
        {
            let (factory, _) = instance_provider
                .instance_by_name(factory_bean)
                .map_err(|error| invocation_error(name, self.kind(), Arc::new(error)))?;

            debug!(
                "Instantiating bean '{}' with factory method '{}' of bean '{}'",
                name, method_name, factory_bean
            );
            method(&factory).map_err(|error| invocation_error(name, self.kind(), error))
        } else {
            Err(unsupported_strategy(name, definition))
        }
    }
}

/// Selects an [InstantiationStrategy] based on the definition's [StrategyKind] and uses it to
/// create instances.
pub struct StrategyResolver {
    strategies: FxHashMap<StrategyKind, InstantiationStrategyPtr>,
}

impl Default for StrategyResolver {
    fn default() -> Self {
        Self::empty()
            .with_strategy(Box::<ConstructorStrategy>::default())
            .with_strategy(Box::<StaticFactoryStrategy>::default())
            .with_strategy(Box::<InstanceFactoryStrategy>::default())
    }
}

impl StrategyResolver {
    /// Creates a resolver without any strategies.
    pub fn empty() -> Self {
        Self {
            strategies: Default::default(),
        }
    }

    /// Registers given strategy, replacing any previous one of the same kind.
    pub fn with_strategy(mut self, strategy: InstantiationStrategyPtr) -> Self {
        self.strategies.insert(strategy.kind(), strategy);
        self
    }

    #[inline]
    pub fn supports(&self, kind: StrategyKind) -> bool {
        self.strategies.contains_key(&kind)
    }

    /// Creates an instance for the named definition. Fails if the created instance is not of the
    /// type declared by the definition.
    pub fn resolve(
        &self,
        name: &str,
        definition: &BeanDefinition,
        instance_provider: &mut dyn BeanInstanceProvider,
    ) -> Result<BeanInstanceAnyPtr, BeanInstanceProviderError> {
        let instance = self
            .strategies
            .get(&definition.instantiation.kind())
            .ok_or_else(|| unsupported_strategy(name, definition))?
            .instantiate(name, definition, instance_provider)?;

        if (*instance).type_id() != definition.type_id {
            return Err(BeanInstanceProviderError::UnexpectedInstanceType {
                name: name.to_string(),
                declared: definition.type_name,
            });
        }

        Ok(instance)
    }
}

#[cfg(test)]
mod tests {
    use crate::arguments::BeanArguments;
    use crate::bean_registry::BeanDefinition;
    use crate::error::BeanInstanceProviderError;
    use crate::instance_provider::{
        BeanInstanceAnyPtr, BeanInstanceProvider, BeanInstancePtr, ErrorPtr,
        MockBeanInstanceProvider,
    };
    use crate::instantiation::{
        ConstructorStrategy, InstanceFactoryStrategy, InstantiationStrategy,
        MockInstantiationStrategy, StrategyKind, StrategyResolver,
    };
    use mockall::predicate::*;
    use once_cell::sync::Lazy;
    use std::fmt::{Display, Formatter};
    use std::sync::Arc;

    #[derive(Debug)]
    struct TestError;

    impl Display for TestError {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str("test error")
        }
    }

    impl std::error::Error for TestError {}

    static SHARED: Lazy<BeanInstancePtr<u16>> = Lazy::new(|| BeanInstancePtr::new(16));

    fn constructor(
        arguments: &BeanArguments,
        instance_provider: &mut dyn BeanInstanceProvider,
    ) -> Result<BeanInstanceAnyPtr, ErrorPtr> {
        arguments
            .resolve::<u8>(0, instance_provider)
            .map(|value| BeanInstancePtr::new(value) as BeanInstanceAnyPtr)
    }

    fn error_constructor(
        _arguments: &BeanArguments,
        _instance_provider: &mut dyn BeanInstanceProvider,
    ) -> Result<BeanInstanceAnyPtr, ErrorPtr> {
        Err(Arc::new(TestError))
    }

    fn shared_instance() -> Result<BeanInstanceAnyPtr, ErrorPtr> {
        Ok(SHARED.clone() as BeanInstanceAnyPtr)
    }

    fn doubled(factory: &BeanInstanceAnyPtr) -> Result<BeanInstanceAnyPtr, ErrorPtr> {
        let value = factory
            .downcast_ref::<u8>()
            .ok_or_else(|| Arc::new(TestError) as ErrorPtr)?;
        Ok(BeanInstancePtr::new(u16::from(*value) * 2) as BeanInstanceAnyPtr)
    }

    #[test]
    fn should_call_constructor() {
        let definition = BeanDefinition::with_constructor::<u8>(constructor)
            .with_arguments(BeanArguments::default().with_value(3));
        let mut provider = MockBeanInstanceProvider::new();

        let instance = StrategyResolver::default()
            .resolve("number", &definition, &mut provider)
            .unwrap();
        assert_eq!(instance.downcast_ref::<u8>(), Some(&3));
    }

    #[test]
    fn should_wrap_constructor_errors() {
        let definition = BeanDefinition::with_constructor::<u8>(error_constructor);
        let mut provider = MockBeanInstanceProvider::new();

        assert!(matches!(
            StrategyResolver::default()
                .resolve("number", &definition, &mut provider)
                .unwrap_err(),
            BeanInstanceProviderError::Invocation {
                name,
                strategy: StrategyKind::Constructor,
                ..
            } if name == "number"
        ));
    }

    #[test]
    fn should_return_shared_instance_from_static_factory() {
        let definition =
            BeanDefinition::with_static_factory::<u16>("Shared", "instance", shared_instance);
        let mut provider = MockBeanInstanceProvider::new();
        let resolver = StrategyResolver::default();

        let first = resolver
            .resolve("shared", &definition, &mut provider)
            .unwrap();
        let second = resolver
            .resolve("shared", &definition, &mut provider)
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn should_call_method_on_factory_bean() {
        let definition =
            BeanDefinition::with_instance_factory::<u16>("factory", "doubled", doubled);

        let mut provider = MockBeanInstanceProvider::new();
        provider
            .expect_instance_by_name()
            .with(eq("factory"))
            .times(1)
            .returning(|_| Ok((BeanInstancePtr::new(21u8) as BeanInstanceAnyPtr, "u8")));

        let instance = StrategyResolver::default()
            .resolve("product", &definition, &mut provider)
            .unwrap();
        assert_eq!(instance.downcast_ref::<u16>(), Some(&42));
    }

    #[test]
    fn should_fail_invocation_on_unresolvable_factory_bean() {
        let definition =
            BeanDefinition::with_instance_factory::<u16>("factory", "doubled", doubled);

        let mut provider = MockBeanInstanceProvider::new();
        provider
            .expect_instance_by_name()
            .with(eq("factory"))
            .times(1)
            .returning(|name| {
                Err(BeanInstanceProviderError::NoSuchBeanDefinition(
                    name.to_string(),
                ))
            });

        let error = InstanceFactoryStrategy
            .instantiate("product", &definition, &mut provider)
            .unwrap_err();
        match error {
            BeanInstanceProviderError::Invocation {
                name,
                strategy,
                source,
            } => {
                assert_eq!(name, "product");
                assert_eq!(strategy, StrategyKind::InstanceFactory);
                assert!(matches!(
                    source.downcast_ref::<BeanInstanceProviderError>(),
                    Some(BeanInstanceProviderError::NoSuchBeanDefinition(factory)) if factory == "factory"
                ));
            }
            error => panic!("unexpected error: {error}"),
        }
    }

    #[test]
    fn should_reject_unsupported_strategy() {
        let definition =
            BeanDefinition::with_static_factory::<u16>("Shared", "instance", shared_instance);
        let mut provider = MockBeanInstanceProvider::new();
        let resolver = StrategyResolver::empty().with_strategy(Box::new(ConstructorStrategy));

        assert!(!resolver.supports(StrategyKind::StaticFactory));
        assert!(matches!(
            resolver
                .resolve("shared", &definition, &mut provider)
                .unwrap_err(),
            BeanInstanceProviderError::UnsupportedStrategy {
                strategy: StrategyKind::StaticFactory,
                ..
            }
        ));
    }

    #[test]
    fn should_reject_mismatched_definition() {
        let definition =
            BeanDefinition::with_static_factory::<u16>("Shared", "instance", shared_instance);
        let mut provider = MockBeanInstanceProvider::new();

        assert!(matches!(
            ConstructorStrategy
                .instantiate("shared", &definition, &mut provider)
                .unwrap_err(),
            BeanInstanceProviderError::UnsupportedStrategy { .. }
        ));
    }

    #[test]
    fn should_use_custom_strategy() {
        let mut strategy = MockInstantiationStrategy::new();
        strategy
            .expect_kind()
            .return_const(StrategyKind::Constructor);
        strategy
            .expect_instantiate()
            .times(1)
            .returning(|_, _, _| Ok(BeanInstancePtr::new(1u8) as BeanInstanceAnyPtr));

        let definition = BeanDefinition::with_constructor::<u8>(error_constructor);
        let mut provider = MockBeanInstanceProvider::new();

        let instance = StrategyResolver::default()
            .with_strategy(Box::new(strategy))
            .resolve("number", &definition, &mut provider)
            .unwrap();
        assert_eq!(instance.downcast_ref::<u8>(), Some(&1));
    }

    #[test]
    fn should_reject_instance_of_undeclared_type() {
        let definition =
            BeanDefinition::with_static_factory::<u8>("Shared", "instance", shared_instance);
        let mut provider = MockBeanInstanceProvider::new();

        assert!(matches!(
            StrategyResolver::default()
                .resolve("shared", &definition, &mut provider)
                .unwrap_err(),
            BeanInstanceProviderError::UnexpectedInstanceType { name, declared }
                if name == "shared" && declared == "u8"
        ));
    }

    #[test]
    fn should_parse_strategy_names() {
        for kind in [
            StrategyKind::Constructor,
            StrategyKind::StaticFactory,
            StrategyKind::InstanceFactory,
        ] {
            assert_eq!(StrategyKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(StrategyKind::from_name("reflection"), None);
    }
}
