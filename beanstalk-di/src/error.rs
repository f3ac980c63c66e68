use crate::instance_provider::ErrorPtr;
use crate::instantiation::StrategyKind;
use config::ConfigError;
use thiserror::Error;

/// Errors related to creating and managing bean instances.
#[derive(Error, Clone, Debug)]
pub enum BeanInstanceProviderError {
    #[error("No bean named '{0}' is defined")]
    NoSuchBeanDefinition(String),
    #[error("No instantiation strategy registered for '{strategy}', required by bean '{name}'")]
    UnsupportedStrategy {
        name: String,
        strategy: StrategyKind,
    },
    #[error("Error instantiating bean '{name}' using {strategy} strategy: {source}")]
    Invocation {
        name: String,
        strategy: StrategyKind,
        source: ErrorPtr,
    },
    #[error(
        "Bean '{name}' is expected to be of type '{expected}', but is actually of type '{actual}'"
    )]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("Bean '{name}' created an instance which is not of its declared type '{declared}'")]
    UnexpectedInstanceType {
        name: String,
        declared: &'static str,
    },
    #[error("Requested bean is currently in creation - unresolvable circular reference: {0}")]
    CurrentlyInCreation(String),
    #[error("Unrecognized scope: {0}")]
    UnrecognizedScope(String),
}

/// Error related to bean definition registries.
#[derive(Error, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum BeanDefinitionRegistryError {
    #[error("Attempted to register a duplicated bean with name: {0}")]
    DuplicateBeanName(String),
    #[error("No bean named '{0}' is defined")]
    NoSuchBeanDefinition(String),
}

/// Errors related to converting constructor arguments.
#[derive(Error, Clone, Eq, PartialEq, Debug)]
pub enum BeanArgumentError {
    #[error("Missing constructor argument at index {0}")]
    MissingArgument(usize),
    #[error(
        "Constructor argument at index {index} should be a value, but is a reference to '{reference}'"
    )]
    ExpectedValue { index: usize, reference: String },
    #[error("Constructor argument at index {index} should be a reference, but is a value: {value}")]
    ExpectedReference { index: usize, value: String },
    #[error("Cannot convert constructor argument '{value}' at index {index} to {target}")]
    InvalidValue {
        index: usize,
        value: String,
        target: &'static str,
    },
}

/// Errors related to reading declarative bean configuration.
#[derive(Error, Debug)]
pub enum BeanDefinitionReaderError {
    #[error("Error reading bean configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Registry(#[from] BeanDefinitionRegistryError),
    #[error("Unsupported instantiation strategy '{strategy}' for bean '{bean}'")]
    UnsupportedStrategy { bean: String, strategy: String },
    #[error("Bean '{bean}' is missing the '{attribute}' attribute")]
    MissingAttribute {
        bean: String,
        attribute: &'static str,
    },
    #[error("Unknown type '{type_name}' used by bean '{bean}'")]
    UnknownBeanType { bean: String, type_name: String },
    #[error("Type '{type_name}' used by bean '{bean}' has no registered constructor")]
    MissingConstructor { bean: String, type_name: String },
    #[error("Unknown {kind} factory method '{method}' used by bean '{bean}'")]
    UnknownFactoryMethod {
        bean: String,
        method: String,
        kind: StrategyKind,
    },
    #[error("Unknown factory bean '{factory_bean}' used by bean '{bean}'")]
    UnknownFactoryBean { bean: String, factory_bean: String },
    #[error("Circular factory bean reference involving bean '{0}'")]
    CircularFactoryReference(String),
    #[error(
        "Constructor argument {index} of bean '{bean}' should have exactly one of 'value' or 'ref'"
    )]
    InvalidArgument { bean: String, index: usize },
    #[error("Bean '{0}' declares constructor arguments, but is not created by a constructor")]
    UnexpectedArguments(String),
}

/// Error returned when an instance factory method is called on a bean of an unexpected type.
#[derive(Error, Clone, Copy, Eq, PartialEq, Debug)]
#[error("Factory bean is not an instance of '{expected}'")]
pub struct FactoryBeanTypeError {
    pub expected: &'static str,
}
