//! Dependency injection container creating beans with one of three instantiation strategies:
//! calling a constructor, calling a static factory method, or calling a method on another bean
//! (an instance factory). Beans are described by [bean definitions](bean_registry::BeanDefinition),
//! registered either in code or read from configuration files, and created on demand by a
//! [BeanFactory](factory::BeanFactory).
//!
//! ```
//! use beanstalk_di::bean_registry::{BeanDefinition, BeanDefinitionRegistry, DefaultBeanDefinitionRegistry};
//! use beanstalk_di::factory::BeanFactoryBuilder;
//! use beanstalk_di::instance_provider::{BeanInstanceAnyPtr, BeanInstancePtr, ErrorPtr};
//!
//! struct Clock;
//!
//! fn system_clock() -> Result<BeanInstanceAnyPtr, ErrorPtr> {
//!     Ok(BeanInstancePtr::new(Clock) as BeanInstanceAnyPtr)
//! }
//!
//! let mut registry = DefaultBeanDefinitionRegistry::default();
//! registry
//!     .register(
//!         "clock",
//!         BeanDefinition::with_static_factory::<Clock>("Clock", "system", system_clock),
//!     )
//!     .unwrap();
//!
//! let factory = BeanFactoryBuilder::new()
//!     .with_definition_registry(Box::new(registry))
//!     .build();
//!
//! let first = factory.bean::<Clock>("clock").unwrap();
//! let second = factory.bean::<Clock>("clock").unwrap();
//! assert!(BeanInstancePtr::ptr_eq(&first, &second));
//! ```

pub mod arguments;
pub mod bean;
pub mod bean_registry;
pub mod catalog;
pub mod definition_reader;
pub mod error;
pub mod factory;
pub mod instance_provider;
pub mod instantiation;
pub mod scope;

#[cfg(feature = "derive")]
pub use beanstalk_di_derive::{factory_methods, Bean};
