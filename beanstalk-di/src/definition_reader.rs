//! Declarative bean configuration. Bean definitions can be read from configuration files (JSON by
//! default, but any format supported by the [config] crate works), with bean types and factory
//! methods resolved by name through a [BeanTypeCatalog].
//!
//! Example configuration:
//!
//! ```json
//! {
//!   "beans": [
//!     { "id": "person", "class": "Person", "constructor-args": [{ "value": "Alice" }] },
//!     { "id": "clock", "class": "Clock", "factory-method": "system" },
//!     { "id": "wheel", "factory-bean": "car", "factory-method": "create_wheel", "scope": "prototype" }
//!   ]
//! }
//! ```
//!
//! Unless given explicitly by `strategy`, the instantiation strategy is inferred: a bean with a
//! `factory-bean` uses the instance factory strategy, a bean with a `class` and a
//! `factory-method` uses the static factory strategy, and a bean with only a `class` uses the
//! constructor strategy.

use crate::arguments::{BeanArgument, BeanArguments};
use crate::bean_registry::{BeanDefinition, BeanDefinitionRegistry};
use crate::catalog::{BeanTypeCatalog, FactoryMethod};
use crate::error::{BeanDefinitionReaderError, BeanDefinitionRegistryError};
use crate::instantiation::{Instantiation, StrategyKind};
use crate::scope::{PROTOTYPE, SINGLETON};
use config::{Config, File, FileFormat, Source};
use fxhash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use std::iter;
use tracing::{debug, info};

/// A single bean entry in declarative configuration.
#[derive(Clone, Default, Eq, PartialEq, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BeanRecord {
    pub id: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Catalog name of the bean type, or the type declaring a static factory method.
    pub class: Option<String>,
    /// Explicit strategy name, overriding inference.
    pub strategy: Option<String>,
    pub factory_method: Option<String>,
    pub factory_bean: Option<String>,
    /// `singleton` (default), `prototype` or a custom scope name.
    pub scope: Option<String>,
    #[serde(default)]
    pub lazy_init: bool,
    #[serde(default)]
    pub constructor_args: Vec<ArgumentRecord>,
}

/// A constructor argument entry - exactly one of `value` and `ref` should be present.
#[derive(Clone, Default, Eq, PartialEq, Debug, Deserialize)]
pub struct ArgumentRecord {
    pub value: Option<String>,
    #[serde(rename = "ref")]
    pub reference: Option<String>,
}

#[derive(Deserialize)]
struct BeansDocument {
    #[serde(default)]
    beans: Vec<BeanRecord>,
}

/// Converts [BeanRecord]s to [BeanDefinition]s and registers them in a registry.
pub struct BeanDefinitionReader<'a> {
    catalog: &'a BeanTypeCatalog,
}

impl<'a> BeanDefinitionReader<'a> {
    pub fn new(catalog: &'a BeanTypeCatalog) -> Self {
        Self { catalog }
    }

    /// Reads definitions from a file with given name. The format is deduced from the extension.
    /// Returns the number of registered definitions.
    pub fn read_file(
        &self,
        path: &str,
        registry: &mut dyn BeanDefinitionRegistry,
    ) -> Result<usize, BeanDefinitionReaderError> {
        info!("Reading bean definitions from: {}", path);
        self.read_source(File::with_name(path), registry)
    }

    /// Reads definitions from given string contents.
    pub fn read_str(
        &self,
        contents: &str,
        format: FileFormat,
        registry: &mut dyn BeanDefinitionRegistry,
    ) -> Result<usize, BeanDefinitionReaderError> {
        self.read_source(File::from_str(contents, format), registry)
    }

    /// Registers definitions for given records, in order. Instance factory beans can refer to
    /// factory beans defined in the same batch, regardless of order, or already registered.
    ///
    /// Either all records are registered, or none when an error is returned.
    pub fn load_records(
        &self,
        records: &[BeanRecord],
        registry: &mut dyn BeanDefinitionRegistry,
    ) -> Result<usize, BeanDefinitionReaderError> {
        check_names(records, &*registry)?;

        // aliases can name factory beans too
        let records_by_name: FxHashMap<&str, &BeanRecord> = records
            .iter()
            .flat_map(|record| {
                iter::once(record.id.as_str())
                    .chain(record.aliases.iter().map(String::as_str))
                    .map(move |name| (name, record))
            })
            .collect();

        let mut conversion = Conversion {
            catalog: self.catalog,
            records: &records_by_name,
            registry: &*registry,
            converted: Default::default(),
            in_conversion: vec![],
        };

        let definitions = records
            .iter()
            .map(|record| conversion.convert(record))
            .collect::<Result<Vec<_>, _>>()?;

        for (record, definition) in records.iter().zip(definitions) {
            debug!(
                "Registering bean '{}' of type {} using {} strategy.",
                record.id,
                definition.type_name,
                definition.instantiation.kind()
            );

            registry.register(&record.id, definition)?;
        }

        for record in records {
            for alias in &record.aliases {
                registry.register_alias(&record.id, alias)?;
            }
        }

        Ok(records.len())
    }

    fn read_source<S: Source + Send + Sync + 'static>(
        &self,
        source: S,
        registry: &mut dyn BeanDefinitionRegistry,
    ) -> Result<usize, BeanDefinitionReaderError> {
        let document = Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize::<BeansDocument>()?;

        self.load_records(&document.beans, registry)
    }
}

/// Checks that no id or alias clashes with another name in the batch or in the registry, so
/// registration can't fail halfway.
fn check_names(
    records: &[BeanRecord],
    registry: &dyn BeanDefinitionRegistry,
) -> Result<(), BeanDefinitionRegistryError> {
    let allow_overriding = registry.allows_definition_overriding();
    let mut ids = FxHashSet::default();

    for record in records {
        let id = record.id.as_str();
        let registered = registry.canonical_name(id);
        let is_alias = matches!(&registered, Some(name) if name.as_str() != id);
        let is_duplicate = registered.is_some() || ids.contains(id);

        if is_alias || (is_duplicate && !allow_overriding) {
            return Err(BeanDefinitionRegistryError::DuplicateBeanName(
                id.to_string(),
            ));
        }

        ids.insert(id);
    }

    let mut aliases = FxHashSet::default();
    for alias in records.iter().flat_map(|record| &record.aliases) {
        if ids.contains(alias.as_str()) || registry.contains(alias) || !aliases.insert(alias) {
            return Err(BeanDefinitionRegistryError::DuplicateBeanName(
                alias.clone(),
            ));
        }
    }

    Ok(())
}

struct Conversion<'r> {
    catalog: &'r BeanTypeCatalog,
    records: &'r FxHashMap<&'r str, &'r BeanRecord>,
    registry: &'r dyn BeanDefinitionRegistry,
    converted: FxHashMap<String, BeanDefinition>,
    in_conversion: Vec<String>,
}

impl<'r> Conversion<'r> {
    fn convert(
        &mut self,
        record: &BeanRecord,
    ) -> Result<BeanDefinition, BeanDefinitionReaderError> {
        if let Some(definition) = self.converted.get(&record.id) {
            return Ok(definition.clone());
        }

        if self.in_conversion.contains(&record.id) {
            return Err(BeanDefinitionReaderError::CircularFactoryReference(
                record.id.clone(),
            ));
        }

        self.in_conversion.push(record.id.clone());
        let definition = self.create_definition(record);
        self.in_conversion.pop();

        let definition = definition?;
        self.converted.insert(record.id.clone(), definition.clone());
        Ok(definition)
    }

    fn create_definition(
        &mut self,
        record: &BeanRecord,
    ) -> Result<BeanDefinition, BeanDefinitionReaderError> {
        let kind = strategy_kind(record)?;
        if kind != StrategyKind::Constructor && !record.constructor_args.is_empty() {
            return Err(BeanDefinitionReaderError::UnexpectedArguments(
                record.id.clone(),
            ));
        }

        let definition = match kind {
            StrategyKind::Constructor => self.constructor_definition(record)?,
            StrategyKind::StaticFactory => self.static_factory_definition(record)?,
            StrategyKind::InstanceFactory => self.instance_factory_definition(record)?,
        };

        Ok(definition
            .with_scope(scope_name(record.scope.as_deref()))
            .with_lazy_init(record.lazy_init)
            .with_arguments(arguments(record)?))
    }

    fn constructor_definition(
        &self,
        record: &BeanRecord,
    ) -> Result<BeanDefinition, BeanDefinitionReaderError> {
        let class = required(record, &record.class, "class")?;
        let metadata = self.catalog.bean_type(class).ok_or_else(|| {
            BeanDefinitionReaderError::UnknownBeanType {
                bean: record.id.clone(),
                type_name: class.to_string(),
            }
        })?;

        let constructor =
            metadata
                .constructor
                .ok_or_else(|| BeanDefinitionReaderError::MissingConstructor {
                    bean: record.id.clone(),
                    type_name: class.to_string(),
                })?;

        Ok(BeanDefinition::from_parts(
            Instantiation::Constructor { constructor },
            metadata.type_id,
            metadata.type_name,
        ))
    }

    fn static_factory_definition(
        &self,
        record: &BeanRecord,
    ) -> Result<BeanDefinition, BeanDefinitionReaderError> {
        let class = required(record, &record.class, "class")?;
        let method_name = required(record, &record.factory_method, "factory-method")?;

        let owner = self.catalog.bean_type(class).ok_or_else(|| {
            BeanDefinitionReaderError::UnknownBeanType {
                bean: record.id.clone(),
                type_name: class.to_string(),
            }
        })?;

        let (metadata, method) = self
            .catalog
            .factory_method(owner.type_id, method_name)
            .and_then(|metadata| match metadata.method {
                FactoryMethod::Static(method) => Some((metadata, method)),
                FactoryMethod::Instance(_) => None,
            })
            .ok_or_else(|| BeanDefinitionReaderError::UnknownFactoryMethod {
                bean: record.id.clone(),
                method: format!("{class}::{method_name}"),
                kind: StrategyKind::StaticFactory,
            })?;

        Ok(BeanDefinition::from_parts(
            Instantiation::StaticFactory {
                factory_type: class.to_string(),
                method_name: method_name.to_string(),
                method,
            },
            metadata.produces,
            metadata.produces_name,
        ))
    }

    fn instance_factory_definition(
        &mut self,
        record: &BeanRecord,
    ) -> Result<BeanDefinition, BeanDefinitionReaderError> {
        let factory_bean = required(record, &record.factory_bean, "factory-bean")?;
        let method_name = required(record, &record.factory_method, "factory-method")?;

        let records = self.records;
        let factory_type = match records.get(factory_bean) {
            Some(factory_record) => self.convert(factory_record)?.type_id,
            None => self
                .registry
                .lookup(factory_bean)
                .map(|definition| definition.type_id)
                .map_err(|_| BeanDefinitionReaderError::UnknownFactoryBean {
                    bean: record.id.clone(),
                    factory_bean: factory_bean.to_string(),
                })?,
        };

        let (metadata, method) = self
            .catalog
            .factory_method(factory_type, method_name)
            .and_then(|metadata| match metadata.method {
                FactoryMethod::Instance(method) => Some((metadata, method)),
                FactoryMethod::Static(_) => None,
            })
            .ok_or_else(|| BeanDefinitionReaderError::UnknownFactoryMethod {
                bean: record.id.clone(),
                method: format!("{factory_bean}.{method_name}"),
                kind: StrategyKind::InstanceFactory,
            })?;

        Ok(BeanDefinition::from_parts(
            Instantiation::InstanceFactory {
                factory_bean: factory_bean.to_string(),
                method_name: method_name.to_string(),
                method,
            },
            metadata.produces,
            metadata.produces_name,
        ))
    }
}

fn strategy_kind(record: &BeanRecord) -> Result<StrategyKind, BeanDefinitionReaderError> {
    if let Some(strategy) = &record.strategy {
        return StrategyKind::from_name(strategy).ok_or_else(|| {
            BeanDefinitionReaderError::UnsupportedStrategy {
                bean: record.id.clone(),
                strategy: strategy.clone(),
            }
        });
    }

    match (&record.class, &record.factory_bean, &record.factory_method) {
        (_, Some(_), _) => Ok(StrategyKind::InstanceFactory),
        (Some(_), None, Some(_)) => Ok(StrategyKind::StaticFactory),
        (Some(_), None, None) => Ok(StrategyKind::Constructor),
        (None, None, _) => Err(BeanDefinitionReaderError::MissingAttribute {
            bean: record.id.clone(),
            attribute: "class",
        }),
    }
}

fn required<'v>(
    record: &BeanRecord,
    value: &'v Option<String>,
    attribute: &'static str,
) -> Result<&'v str, BeanDefinitionReaderError> {
    value
        .as_deref()
        .ok_or_else(|| BeanDefinitionReaderError::MissingAttribute {
            bean: record.id.clone(),
            attribute,
        })
}

fn scope_name(scope: Option<&str>) -> String {
    match scope {
        None => SINGLETON.to_string(),
        Some(scope) if scope.eq_ignore_ascii_case(SINGLETON) => SINGLETON.to_string(),
        Some(scope) if scope.eq_ignore_ascii_case(PROTOTYPE) => PROTOTYPE.to_string(),
        Some(scope) => scope.to_uppercase(),
    }
}

fn arguments(record: &BeanRecord) -> Result<BeanArguments, BeanDefinitionReaderError> {
    record
        .constructor_args
        .iter()
        .enumerate()
        .map(
            |(index, argument)| match (&argument.value, &argument.reference) {
                (Some(value), None) => Ok(BeanArgument::Value(value.clone())),
                (None, Some(reference)) => Ok(BeanArgument::Ref(reference.clone())),
                _ => Err(BeanDefinitionReaderError::InvalidArgument {
                    bean: record.id.clone(),
                    index,
                }),
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::arguments::{BeanArgument, BeanArguments};
    use crate::bean_registry::{
        BeanDefinition, BeanDefinitionRegistry, DefaultBeanDefinitionRegistry,
    };
    use crate::catalog::{BeanTypeCatalog, BeanTypeMetadata, FactoryMethod, FactoryMethodMetadata};
    use crate::definition_reader::{BeanDefinitionReader, BeanRecord};
    use crate::error::{BeanDefinitionReaderError, BeanDefinitionRegistryError};
    use crate::instance_provider::{
        BeanInstanceAnyPtr, BeanInstanceProvider, BeanInstancePtr, ErrorPtr,
    };
    use crate::instantiation::StrategyKind;
    use crate::scope::{PROTOTYPE, SINGLETON};
    use config::FileFormat;
    use std::any::{type_name, TypeId};

    struct Person;
    struct Clock;
    struct Car;
    struct Wheel;

    fn construct_person(
        _arguments: &BeanArguments,
        _instance_provider: &mut dyn BeanInstanceProvider,
    ) -> Result<BeanInstanceAnyPtr, ErrorPtr> {
        Ok(BeanInstancePtr::new(Person) as BeanInstanceAnyPtr)
    }

    fn construct_car(
        _arguments: &BeanArguments,
        _instance_provider: &mut dyn BeanInstanceProvider,
    ) -> Result<BeanInstanceAnyPtr, ErrorPtr> {
        Ok(BeanInstancePtr::new(Car) as BeanInstanceAnyPtr)
    }

    fn system_clock() -> Result<BeanInstanceAnyPtr, ErrorPtr> {
        Ok(BeanInstancePtr::new(Clock) as BeanInstanceAnyPtr)
    }

    fn create_wheel(_car: &BeanInstanceAnyPtr) -> Result<BeanInstanceAnyPtr, ErrorPtr> {
        Ok(BeanInstancePtr::new(Wheel) as BeanInstanceAnyPtr)
    }

    fn catalog() -> BeanTypeCatalog {
        let mut catalog = BeanTypeCatalog::default();
        catalog.register_type(BeanTypeMetadata {
            name: "Person",
            type_id: TypeId::of::<Person>(),
            type_name: type_name::<Person>(),
            constructor: Some(construct_person),
        });
        catalog.register_type(BeanTypeMetadata {
            name: "Clock",
            type_id: TypeId::of::<Clock>(),
            type_name: type_name::<Clock>(),
            constructor: None,
        });
        catalog.register_type(BeanTypeMetadata {
            name: "Car",
            type_id: TypeId::of::<Car>(),
            type_name: type_name::<Car>(),
            constructor: Some(construct_car),
        });
        catalog.register_factory_method(FactoryMethodMetadata {
            owner: TypeId::of::<Clock>(),
            method_name: "system",
            produces: TypeId::of::<Clock>(),
            produces_name: type_name::<Clock>(),
            method: FactoryMethod::Static(system_clock),
        });
        catalog.register_factory_method(FactoryMethodMetadata {
            owner: TypeId::of::<Car>(),
            method_name: "create_wheel",
            produces: TypeId::of::<Wheel>(),
            produces_name: type_name::<Wheel>(),
            method: FactoryMethod::Instance(create_wheel),
        });
        catalog
    }

    fn read(contents: &str) -> Result<DefaultBeanDefinitionRegistry, BeanDefinitionReaderError> {
        let catalog = catalog();
        let mut registry = DefaultBeanDefinitionRegistry::default();
        BeanDefinitionReader::new(&catalog).read_str(contents, FileFormat::Json, &mut registry)?;
        Ok(registry)
    }

    fn record(id: &str) -> BeanRecord {
        BeanRecord {
            id: id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn should_read_all_strategies() {
        let registry = read(
            r#"{
                "beans": [
                    { "id": "wheel", "factory-bean": "car", "factory-method": "create_wheel", "scope": "prototype" },
                    { "id": "person", "class": "Person", "aliases": ["human"], "constructor-args": [{ "value": "Alice" }, { "ref": "clock" }] },
                    { "id": "clock", "class": "Clock", "factory-method": "system", "lazy-init": true },
                    { "id": "car", "class": "Car" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(registry.names(), vec!["wheel", "person", "clock", "car"]);

        let person = registry.lookup("human").unwrap();
        assert_eq!(person.instantiation.kind(), StrategyKind::Constructor);
        assert_eq!(person.type_id, TypeId::of::<Person>());
        assert_eq!(person.scope, SINGLETON);
        assert_eq!(
            person.arguments,
            BeanArguments::new(vec![
                BeanArgument::Value("Alice".to_string()),
                BeanArgument::Ref("clock".to_string())
            ])
        );

        let clock = registry.lookup("clock").unwrap();
        assert_eq!(clock.instantiation.kind(), StrategyKind::StaticFactory);
        assert_eq!(clock.type_id, TypeId::of::<Clock>());
        assert!(clock.lazy_init);

        let wheel = registry.lookup("wheel").unwrap();
        assert_eq!(wheel.instantiation.kind(), StrategyKind::InstanceFactory);
        assert_eq!(wheel.type_id, TypeId::of::<Wheel>());
        assert_eq!(wheel.scope, PROTOTYPE);
    }

    #[test]
    fn should_resolve_factory_bean_from_registry() {
        let catalog = catalog();
        let mut registry = DefaultBeanDefinitionRegistry::default();
        registry
            .register(
                "car",
                BeanDefinition::with_constructor::<Car>(construct_car),
            )
            .unwrap();

        let mut wheel = record("wheel");
        wheel.factory_bean = Some("car".to_string());
        wheel.factory_method = Some("create_wheel".to_string());

        BeanDefinitionReader::new(&catalog)
            .load_records(&[wheel], &mut registry)
            .unwrap();

        assert_eq!(
            registry.lookup("wheel").unwrap().type_id,
            TypeId::of::<Wheel>()
        );
    }

    #[test]
    fn should_honor_explicit_strategy() {
        let error = read(r#"{ "beans": [{ "id": "clock", "class": "Clock", "strategy": "magic" }] }"#)
            .unwrap_err();
        assert!(matches!(
            error,
            BeanDefinitionReaderError::UnsupportedStrategy { strategy, .. } if strategy == "magic"
        ));

        let error = read(
            r#"{ "beans": [{ "id": "clock", "class": "Clock", "strategy": "static-factory" }] }"#,
        )
        .unwrap_err();
        assert!(matches!(
            error,
            BeanDefinitionReaderError::MissingAttribute {
                attribute: "factory-method",
                ..
            }
        ));
    }

    #[test]
    fn should_reject_unknown_types_and_methods() {
        let error = read(r#"{ "beans": [{ "id": "ghost", "class": "Ghost" }] }"#).unwrap_err();
        assert!(matches!(
            error,
            BeanDefinitionReaderError::UnknownBeanType { .. }
        ));

        let error = read(r#"{ "beans": [{ "id": "clock", "class": "Clock" }] }"#).unwrap_err();
        assert!(matches!(
            error,
            BeanDefinitionReaderError::MissingConstructor { .. }
        ));

        let error = read(
            r#"{ "beans": [{ "id": "clock", "class": "Clock", "factory-method": "atomic" }] }"#,
        )
        .unwrap_err();
        assert!(matches!(
            error,
            BeanDefinitionReaderError::UnknownFactoryMethod {
                kind: StrategyKind::StaticFactory,
                ..
            }
        ));

        let error = read(
            r#"{ "beans": [{ "id": "car", "class": "Car", "factory-method": "create_wheel" }] }"#,
        )
        .unwrap_err();
        assert!(matches!(
            error,
            BeanDefinitionReaderError::UnknownFactoryMethod { .. }
        ));
    }

    #[test]
    fn should_reject_unknown_factory_bean() {
        let error = read(
            r#"{ "beans": [{ "id": "wheel", "factory-bean": "car", "factory-method": "create_wheel" }] }"#,
        )
        .unwrap_err();
        assert!(matches!(
            error,
            BeanDefinitionReaderError::UnknownFactoryBean { factory_bean, .. } if factory_bean == "car"
        ));
    }

    #[test]
    fn should_detect_circular_factory_beans() {
        let mut first = record("first");
        first.factory_bean = Some("second".to_string());
        first.factory_method = Some("create_wheel".to_string());

        let mut second = record("second");
        second.factory_bean = Some("first".to_string());
        second.factory_method = Some("create_wheel".to_string());

        let catalog = catalog();
        let mut registry = DefaultBeanDefinitionRegistry::default();
        let error = BeanDefinitionReader::new(&catalog)
            .load_records(&[first, second], &mut registry)
            .unwrap_err();

        assert!(matches!(
            error,
            BeanDefinitionReaderError::CircularFactoryReference(_)
        ));
        assert!(registry.names().is_empty());
    }

    #[test]
    fn should_validate_arguments() {
        let error = read(
            r#"{ "beans": [{ "id": "person", "class": "Person", "constructor-args": [{ "value": "a", "ref": "b" }] }] }"#,
        )
        .unwrap_err();
        assert!(matches!(
            error,
            BeanDefinitionReaderError::InvalidArgument { index: 0, .. }
        ));

        let error = read(
            r#"{ "beans": [{ "id": "clock", "class": "Clock", "factory-method": "system", "constructor-args": [{ "value": "a" }] }] }"#,
        )
        .unwrap_err();
        assert!(matches!(
            error,
            BeanDefinitionReaderError::UnexpectedArguments(_)
        ));
    }

    fn read_into(
        contents: &str,
        registry: &mut DefaultBeanDefinitionRegistry,
    ) -> Result<usize, BeanDefinitionReaderError> {
        BeanDefinitionReader::new(&catalog()).read_str(contents, FileFormat::Json, registry)
    }

    #[test]
    fn should_reject_duplicate_ids() {
        let mut registry = DefaultBeanDefinitionRegistry::default();
        let error = read_into(
            r#"{ "beans": [{ "id": "car", "class": "Car" }, { "id": "car", "class": "Person" }] }"#,
            &mut registry,
        )
        .unwrap_err();

        assert!(matches!(
            error,
            BeanDefinitionReaderError::Registry(BeanDefinitionRegistryError::DuplicateBeanName(name))
                if name == "car"
        ));
        assert!(registry.names().is_empty());
    }

    #[test]
    fn should_not_register_anything_on_alias_clash() {
        let mut registry = DefaultBeanDefinitionRegistry::default();
        let error = read_into(
            r#"{ "beans": [{ "id": "a", "class": "Car" }, { "id": "b", "class": "Car", "aliases": ["a"] }] }"#,
            &mut registry,
        )
        .unwrap_err();

        assert!(matches!(
            error,
            BeanDefinitionReaderError::Registry(BeanDefinitionRegistryError::DuplicateBeanName(name))
                if name == "a"
        ));
        assert!(registry.names().is_empty());
        assert!(!registry.contains("a"));
    }

    #[test]
    fn should_check_names_against_registry() {
        let mut registry = DefaultBeanDefinitionRegistry::default();
        read_into(
            r#"{ "beans": [{ "id": "car", "class": "Car", "aliases": ["auto"] }] }"#,
            &mut registry,
        )
        .unwrap();

        assert!(read_into(
            r#"{ "beans": [{ "id": "person", "class": "Person" }, { "id": "auto", "class": "Car" }] }"#,
            &mut registry,
        )
        .is_err());
        assert!(read_into(
            r#"{ "beans": [{ "id": "person", "class": "Person", "aliases": ["car"] }] }"#,
            &mut registry,
        )
        .is_err());
        assert_eq!(registry.names(), vec!["car"]);
    }

    #[test]
    fn should_override_registered_definitions_when_allowed() {
        let mut registry = DefaultBeanDefinitionRegistry::new(true);
        read_into(
            r#"{ "beans": [{ "id": "car", "class": "Car" }] }"#,
            &mut registry,
        )
        .unwrap();
        read_into(
            r#"{ "beans": [{ "id": "car", "class": "Person" }] }"#,
            &mut registry,
        )
        .unwrap();

        assert_eq!(registry.names(), vec!["car"]);
        assert_eq!(
            registry.lookup("car").unwrap().type_id,
            TypeId::of::<Person>()
        );
    }

    #[test]
    fn should_resolve_factory_bean_by_alias() {
        let registry = read(
            r#"{
                "beans": [
                    { "id": "car", "class": "Car", "aliases": ["auto"] },
                    { "id": "wheel", "factory-bean": "auto", "factory-method": "create_wheel" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            registry.lookup("wheel").unwrap().type_id,
            TypeId::of::<Wheel>()
        );
    }

    #[test]
    fn should_keep_custom_scope_names() {
        let registry =
            read(r#"{ "beans": [{ "id": "car", "class": "Car", "scope": "request" }] }"#).unwrap();
        assert_eq!(registry.lookup("car").unwrap().scope, "REQUEST");
    }
}
