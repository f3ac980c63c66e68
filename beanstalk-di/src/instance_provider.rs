//! Functionality related to providing bean instances.

pub use crate::error::BeanInstanceProviderError;
#[cfg(test)]
use mockall::automock;
use std::any::{type_name, Any};
use std::error::Error;
use std::sync::Arc;

pub type BeanInstancePtr<T> = Arc<T>;

pub type BeanInstanceAnyPtr = BeanInstancePtr<dyn Any + Send + Sync + 'static>;

/// Shared error type for errors raised by user code, e.g. constructors or factory methods.
pub type ErrorPtr = Arc<dyn Error + Send + Sync>;

/// Type-erased instance along with the name of its concrete type, used for diagnostics.
pub type NamedTypeInstance = (BeanInstanceAnyPtr, &'static str);

/// Generic provider for bean instances.
#[cfg_attr(test, automock)]
pub trait BeanInstanceProvider {
    /// Returns an instance of the bean with given name or alias, creating it if needed.
    fn instance_by_name(
        &mut self,
        name: &str,
    ) -> Result<NamedTypeInstance, BeanInstanceProviderError>;
}

/// Helper trait for [BeanInstanceProvider] providing strongly-typed access.
pub trait TypedBeanInstanceProvider {
    /// Typesafe version of [BeanInstanceProvider::instance_by_name]. Fails with
    /// [BeanInstanceProviderError::TypeMismatch] if the bean is not a `T`.
    fn instance_by_name_typed<T: Any + Send + Sync>(
        &mut self,
        name: &str,
    ) -> Result<BeanInstancePtr<T>, BeanInstanceProviderError>;
}

impl<P: BeanInstanceProvider + ?Sized> TypedBeanInstanceProvider for P {
    fn instance_by_name_typed<T: Any + Send + Sync>(
        &mut self,
        name: &str,
    ) -> Result<BeanInstancePtr<T>, BeanInstanceProviderError> {
        self.instance_by_name(name)
            .and_then(|instance| downcast_instance(name, instance))
    }
}

pub(crate) fn downcast_instance<T: Any + Send + Sync>(
    name: &str,
    (instance, actual): NamedTypeInstance,
) -> Result<BeanInstancePtr<T>, BeanInstanceProviderError> {
    instance
        .downcast::<T>()
        .map_err(|_| BeanInstanceProviderError::TypeMismatch {
            name: name.to_string(),
            expected: type_name::<T>(),
            actual,
        })
}
