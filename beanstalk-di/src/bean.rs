//! One of the basic blocks of the container is a [Bean] - an object which can be created by the
//! constructor strategy. Beans produced by factory methods don't need to implement it; only the
//! factory methods need to be registered.
//!
//! ## Registering bean types
//!
//! Bean types are looked up by name when reading declarative configuration. For convenience, the
//! trait can be automatically derived along with the static registration, if the `derive` feature
//! is enabled:
//!
//! ```
//! use beanstalk_di::instance_provider::BeanInstancePtr;
//! use beanstalk_di::Bean;
//!
//! #[derive(Bean)]
//! struct Engine;
//!
//! #[derive(Bean)]
//! struct Car {
//!     // first constructor argument - a reference to another bean
//!     engine: BeanInstancePtr<Engine>,
//!     // second constructor argument - a literal value
//!     model: String,
//!     // not taken from arguments
//!     #[bean(default)]
//!     mileage: u64,
//! }
//! ```
//!
//! ### Supported `#[bean]` struct configuration
//!
//! * `constructor = "expr"` - call `expr(arguments, instance_provider)` to construct the bean,
//! instead of using field-by-field construction
//!
//! ### Supported `#[bean]` field configuration
//!
//! * `default` - use `Default::default()` initialization
//! * `default = "expr"` - call `expr()` for initialization
//!
//! Fields without configuration consume consecutive constructor arguments via
//! [FromBeanArgument](crate::arguments::FromBeanArgument).
//!
//! ## Registering factory methods
//!
//! Static and instance factory methods are registered with the `#[factory_methods]` attribute on an
//! inherent `impl` block. Every method marked with `#[factory_method]` is registered under its own
//! name: methods without a receiver become static factory methods, methods taking `&self` become
//! instance factory methods. Factory methods take no other parameters and return either a
//! [BeanInstancePtr] or a `Result` of one.
//!
//! ```
//! use beanstalk_di::instance_provider::BeanInstancePtr;
//! use beanstalk_di::{factory_methods, Bean};
//!
//! struct Wheel;
//!
//! #[derive(Bean)]
//! struct WheelFactory;
//!
//! #[factory_methods]
//! impl WheelFactory {
//!     #[factory_method]
//!     fn create_wheel(&self) -> BeanInstancePtr<Wheel> {
//!         BeanInstancePtr::new(Wheel)
//!     }
//! }
//! ```

use crate::arguments::BeanArguments;
use crate::instance_provider::{
    BeanInstanceAnyPtr, BeanInstanceProvider, BeanInstancePtr, ErrorPtr,
};
use std::any::Any;

/// Type-erased constructor used by the constructor strategy.
pub type ConstructorFn = fn(
    arguments: &BeanArguments,
    instance_provider: &mut dyn BeanInstanceProvider,
) -> Result<BeanInstanceAnyPtr, ErrorPtr>;

/// Type-erased static factory method. Has no access to any instance.
pub type StaticFactoryFn = fn() -> Result<BeanInstanceAnyPtr, ErrorPtr>;

/// Type-erased instance factory method, called with the factory bean instance.
pub type InstanceFactoryFn =
    fn(factory: &BeanInstanceAnyPtr) -> Result<BeanInstanceAnyPtr, ErrorPtr>;

/// Base trait for beans created by the constructor strategy.
pub trait Bean: Any + Send + Sync + Sized {
    /// Creates an instance of this bean using given constructor arguments. References to other
    /// beans are resolved using the [BeanInstanceProvider].
    fn create(
        arguments: &BeanArguments,
        instance_provider: &mut dyn BeanInstanceProvider,
    ) -> Result<Self, ErrorPtr>;
}

fn construct<T: Bean>(
    arguments: &BeanArguments,
    instance_provider: &mut dyn BeanInstanceProvider,
) -> Result<BeanInstanceAnyPtr, ErrorPtr> {
    T::create(arguments, instance_provider)
        .map(|bean| BeanInstancePtr::new(bean) as BeanInstanceAnyPtr)
}

/// Returns the type-erased constructor for given [Bean].
pub fn constructor_of<T: Bean>() -> ConstructorFn {
    construct::<T>
}

/// Conversion of factory method results into type-erased instances. Implemented for
/// [BeanInstancePtr] and `Result`s of it.
pub trait IntoBeanInstance {
    /// The produced bean type.
    type Bean: Any + Send + Sync;

    fn into_bean_instance(self) -> Result<BeanInstancePtr<Self::Bean>, ErrorPtr>;
}

impl<T: Any + Send + Sync> IntoBeanInstance for BeanInstancePtr<T> {
    type Bean = T;

    #[inline]
    fn into_bean_instance(self) -> Result<BeanInstancePtr<T>, ErrorPtr> {
        Ok(self)
    }
}

impl<T: Any + Send + Sync, E: Into<ErrorPtr>> IntoBeanInstance for Result<BeanInstancePtr<T>, E> {
    type Bean = T;

    #[inline]
    fn into_bean_instance(self) -> Result<BeanInstancePtr<T>, ErrorPtr> {
        self.map_err(Into::into)
    }
}
