//! Constructor arguments for beans created with the constructor strategy. Arguments are positional
//! and are either literal values, converted on demand, or references to other beans, resolved
//! through the [BeanInstanceProvider] at construction time.

use crate::error::BeanArgumentError;
use crate::instance_provider::{
    BeanInstanceProvider, BeanInstancePtr, ErrorPtr, TypedBeanInstanceProvider,
};
use std::any::{type_name, Any};
use std::sync::Arc;

/// A single constructor argument.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum BeanArgument {
    /// Literal value, converted to the target type by the constructor.
    Value(String),
    /// Name of another bean.
    Ref(String),
}

/// Ordered list of constructor arguments.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct BeanArguments {
    arguments: Vec<BeanArgument>,
}

impl BeanArguments {
    pub fn new(arguments: Vec<BeanArgument>) -> Self {
        Self { arguments }
    }

    /// Appends a literal value.
    pub fn with_value<T: ToString>(mut self, value: T) -> Self {
        self.arguments.push(BeanArgument::Value(value.to_string()));
        self
    }

    /// Appends a reference to another bean.
    pub fn with_ref<T: ToString>(mut self, name: T) -> Self {
        self.arguments.push(BeanArgument::Ref(name.to_string()));
        self
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&BeanArgument> {
        self.arguments.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BeanArgument> {
        self.arguments.iter()
    }

    /// Returns the literal value at given index.
    pub fn value(&self, index: usize) -> Result<&str, BeanArgumentError> {
        match self.arguments.get(index) {
            Some(BeanArgument::Value(value)) => Ok(value),
            Some(BeanArgument::Ref(reference)) => Err(BeanArgumentError::ExpectedValue {
                index,
                reference: reference.clone(),
            }),
            None => Err(BeanArgumentError::MissingArgument(index)),
        }
    }

    /// Converts the argument at given index to `T`.
    pub fn resolve<T: FromBeanArgument>(
        &self,
        index: usize,
        instance_provider: &mut dyn BeanInstanceProvider,
    ) -> Result<T, ErrorPtr> {
        T::from_bean_argument(self.arguments.get(index), index, instance_provider)
    }
}

impl FromIterator<BeanArgument> for BeanArguments {
    fn from_iter<I: IntoIterator<Item = BeanArgument>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Conversion from a constructor argument. Implemented for common value types, which are parsed
/// from literal values, for [BeanInstancePtr], which is resolved from a reference, and for
/// `Option` wrapping any of those, which accepts a missing argument.
pub trait FromBeanArgument: Sized {
    fn from_bean_argument(
        argument: Option<&BeanArgument>,
        index: usize,
        instance_provider: &mut dyn BeanInstanceProvider,
    ) -> Result<Self, ErrorPtr>;
}

fn parse_value<T: std::str::FromStr>(
    argument: Option<&BeanArgument>,
    index: usize,
) -> Result<T, BeanArgumentError> {
    match argument {
        Some(BeanArgument::Value(value)) => {
            value.parse().map_err(|_| BeanArgumentError::InvalidValue {
                index,
                value: value.clone(),
                target: type_name::<T>(),
            })
        }
        Some(BeanArgument::Ref(reference)) => Err(BeanArgumentError::ExpectedValue {
            index,
            reference: reference.clone(),
        }),
        None => Err(BeanArgumentError::MissingArgument(index)),
    }
}

macro_rules! impl_from_value_argument {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromBeanArgument for $ty {
                fn from_bean_argument(
                    argument: Option<&BeanArgument>,
                    index: usize,
                    _instance_provider: &mut dyn BeanInstanceProvider,
                ) -> Result<Self, ErrorPtr> {
                    parse_value(argument, index).map_err(|error| Arc::new(error) as ErrorPtr)
                }
            }
        )*
    };
}

impl_from_value_argument!(
    String, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl<T: Any + Send + Sync> FromBeanArgument for BeanInstancePtr<T> {
    fn from_bean_argument(
        argument: Option<&BeanArgument>,
        index: usize,
        instance_provider: &mut dyn BeanInstanceProvider,
    ) -> Result<Self, ErrorPtr> {
        match argument {
            Some(BeanArgument::Ref(name)) => instance_provider
                .instance_by_name_typed::<T>(name)
                .map_err(|error| Arc::new(error) as ErrorPtr),
            Some(BeanArgument::Value(value)) => {
                let error = BeanArgumentError::ExpectedReference {
                    index,
                    value: value.clone(),
                };
                Err(Arc::new(error) as ErrorPtr)
            }
            None => Err(Arc::new(BeanArgumentError::MissingArgument(index)) as ErrorPtr),
        }
    }
}

impl<T: FromBeanArgument> FromBeanArgument for Option<T> {
    fn from_bean_argument(
        argument: Option<&BeanArgument>,
        index: usize,
        instance_provider: &mut dyn BeanInstanceProvider,
    ) -> Result<Self, ErrorPtr> {
        argument
            .map(|argument| T::from_bean_argument(Some(argument), index, instance_provider))
            .transpose()
    }
}
