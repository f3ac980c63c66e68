//! Catalog of bean types and factory methods available to declarative configuration. Instead of
//! looking types up at runtime by name, types and methods are registered statically, typically by
//! `#[derive(Bean)]` and `#[factory_methods]`, and collected when a catalog is created.

use crate::bean::{ConstructorFn, InstanceFactoryFn, StaticFactoryFn};
use derivative::Derivative;
use fxhash::FxHashMap;
use std::any::TypeId;
use tracing::warn;

/// A factory method registered for a type.
#[derive(Derivative, Clone, Copy)]
#[derivative(Debug)]
pub enum FactoryMethod {
    Static(#[derivative(Debug = "ignore")] StaticFactoryFn),
    Instance(#[derivative(Debug = "ignore")] InstanceFactoryFn),
}

/// Registration information for a bean type.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct BeanTypeMetadata {
    /// Name used to refer to this type in configuration.
    pub name: &'static str,

    pub type_id: TypeId,

    /// Full name of the type.
    pub type_name: &'static str,

    /// Constructor, if the type can be created by the constructor strategy.
    #[derivative(Debug = "ignore")]
    pub constructor: Option<ConstructorFn>,
}

/// Registration information for a factory method.
#[derive(Clone, Debug)]
pub struct FactoryMethodMetadata {
    /// Type declaring the method.
    pub owner: TypeId,

    pub method_name: &'static str,

    /// Type of the produced bean.
    pub produces: TypeId,

    /// Full name of the produced type.
    pub produces_name: &'static str,

    pub method: FactoryMethod,
}

/// Collection of known bean types and their factory methods.
#[derive(Clone, Debug, Default)]
pub struct BeanTypeCatalog {
    types: FxHashMap<&'static str, BeanTypeMetadata>,
    methods: FxHashMap<TypeId, FxHashMap<&'static str, FactoryMethodMetadata>>,
}

impl BeanTypeCatalog {
    /// Creates a catalog with all statically registered types and methods.
    pub fn from_registrations() -> Self {
        let mut catalog = Self::default();

        for registerer in inventory::iter::<internal::BeanTypeRegisterer> {
            catalog.register_type((registerer.register)());
        }

        for registerer in inventory::iter::<internal::FactoryMethodRegisterer> {
            catalog.register_factory_method((registerer.register)());
        }

        catalog
    }

    /// Adds a type. Registering a type again merges constructors, so a type can be registered both
    /// as a bean and as an owner of factory methods.
    pub fn register_type(&mut self, metadata: BeanTypeMetadata) {
        if let Some(existing) = self.types.get_mut(metadata.name) {
            if existing.type_id != metadata.type_id {
                warn!(
                    "Ignoring type {} registered under already used name '{}'",
                    metadata.type_name, metadata.name
                );
                return;
            }

            existing.constructor = existing.constructor.or(metadata.constructor);
        } else {
            self.types.insert(metadata.name, metadata);
        }
    }

    pub fn register_factory_method(&mut self, metadata: FactoryMethodMetadata) {
        self.methods
            .entry(metadata.owner)
            .or_default()
            .insert(metadata.method_name, metadata);
    }

    #[inline]
    pub fn bean_type(&self, name: &str) -> Option<&BeanTypeMetadata> {
        self.types.get(name)
    }

    #[inline]
    pub fn factory_method(
        &self,
        owner: TypeId,
        method_name: &str,
    ) -> Option<&FactoryMethodMetadata> {
        self.methods
            .get(&owner)
            .and_then(|methods| methods.get(method_name))
    }
}

#[doc(hidden)]
pub mod internal {
    use crate::catalog::{BeanTypeMetadata, FactoryMethodMetadata};
    use crate::error::FactoryBeanTypeError;
    use crate::instance_provider::{BeanInstanceAnyPtr, ErrorPtr};
    use inventory::collect;
    pub use inventory::submit;
    use std::any::{type_name, Any};
    use std::sync::Arc;

    pub struct BeanTypeRegisterer {
        pub register: fn() -> BeanTypeMetadata,
    }

    pub struct FactoryMethodRegisterer {
        pub register: fn() -> FactoryMethodMetadata,
    }

    collect!(BeanTypeRegisterer);
    collect!(FactoryMethodRegisterer);

    /// Downcasts a factory bean passed to an instance factory method.
    pub fn factory_instance<T: Any>(factory: &BeanInstanceAnyPtr) -> Result<&T, ErrorPtr> {
        factory.downcast_ref::<T>().ok_or_else(|| {
            Arc::new(FactoryBeanTypeError {
                expected: type_name::<T>(),
            }) as ErrorPtr
        })
    }
}
