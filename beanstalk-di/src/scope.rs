//! Bean instances are contained in [Scope]s - containers which decide when to reuse or create an
//! instance. There's a built-in one for singletons, which is the default for all definitions, and
//! one for prototypes, but there also can be other, specialized ones.
//!
//! Note: scope resolution happens at bean instantiation time, which can lead to unexpected
//! consequences if incompatible scopes are mixed together, e.g. an instance factory method of a
//! [prototype](PROTOTYPE) factory bean can produce a [singleton](SINGLETON) bean. In such case a
//! new factory instance will be created to produce the singleton, but only once.

use crate::error::BeanInstanceProviderError;
use crate::instance_provider::BeanInstanceAnyPtr;
use fxhash::FxHashMap;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::sync::Arc;

pub type ScopePtr = Box<dyn Scope + Send + Sync>;

/// Function creating a new instance, passed to [Scope]s.
pub type InstanceCreator<'a> =
    &'a mut dyn FnMut() -> Result<BeanInstanceAnyPtr, BeanInstanceProviderError>;

/// Name of the [SingletonScope].
pub const SINGLETON: &str = "SINGLETON";

/// Name of the [PrototypeScope].
pub const PROTOTYPE: &str = "PROTOTYPE";

/// A scope containing bean instances. See module documentation for information on scopes.
pub trait Scope {
    /// Returns an instance for the bean with given name, if available in this scope.
    fn instance(&self, name: &str) -> Option<BeanInstanceAnyPtr>;

    /// Returns an instance for the bean with given name, using `create` to make a new one if the
    /// scope decides to. Errors from `create` are forwarded as-is.
    fn instance_or_create(
        &self,
        name: &str,
        create: InstanceCreator<'_>,
    ) -> Result<BeanInstanceAnyPtr, BeanInstanceProviderError>;
}

/// Scope for instances shared between all users. Creation of a given bean is guarded, so
/// concurrent requests for the same bean create only one instance, while requests for already
/// created beans don't wait for other creations.
#[derive(Default)]
pub struct SingletonScope {
    instances: RwLock<FxHashMap<String, Arc<OnceCell<BeanInstanceAnyPtr>>>>,
}

impl SingletonScope {
    fn cell(&self, name: &str) -> Arc<OnceCell<BeanInstanceAnyPtr>> {
        if let Some(cell) = self.instances.read().get(name) {
            return cell.clone();
        }

        self.instances
            .write()
            .entry(name.to_string())
            .or_default()
            .clone()
    }
}

impl Scope for SingletonScope {
    fn instance(&self, name: &str) -> Option<BeanInstanceAnyPtr> {
        self.instances
            .read()
            .get(name)
            .and_then(|cell| cell.get())
            .cloned()
    }

    fn instance_or_create(
        &self,
        name: &str,
        create: InstanceCreator<'_>,
    ) -> Result<BeanInstanceAnyPtr, BeanInstanceProviderError> {
        // the lock is released before creation, since it can recursively request other beans
        let cell = self.cell(name);
        cell.get_or_try_init(create).cloned()
    }
}

/// A scope which creates a new instance of a given bean on each request. Stateful beans usually
/// should be stored in a prototype scope.
#[derive(Default, Copy, Clone, Eq, PartialEq)]
pub struct PrototypeScope;

impl Scope for PrototypeScope {
    #[inline]
    fn instance(&self, _name: &str) -> Option<BeanInstanceAnyPtr> {
        None
    }

    #[inline]
    fn instance_or_create(
        &self,
        _name: &str,
        create: InstanceCreator<'_>,
    ) -> Result<BeanInstanceAnyPtr, BeanInstanceProviderError> {
        create()
    }
}
