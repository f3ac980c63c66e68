use beanstalk::application::Application;
use beanstalk::config::ApplicationConfig;
use beanstalk_di::instance_provider::BeanInstancePtr;
use beanstalk_di::{factory_methods, Bean};
use once_cell::sync::Lazy;
use std::fmt::{Display, Formatter};
use tracing::info;

// created by calling its constructor
#[derive(Bean)]
struct Person {
    name: String,
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} instantiated by constructor instantiation", self.name)
    }
}

static STATIC_FACTORY_METHOD: Lazy<BeanInstancePtr<StaticFactoryMethod>> =
    Lazy::new(|| BeanInstancePtr::new(StaticFactoryMethod { _private: () }));

// can only be created by its own static factory method, which always returns the same instance
struct StaticFactoryMethod {
    _private: (),
}

#[factory_methods]
impl StaticFactoryMethod {
    #[factory_method]
    fn get_instance() -> BeanInstancePtr<StaticFactoryMethod> {
        STATIC_FACTORY_METHOD.clone()
    }
}

impl Display for StaticFactoryMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("instantiated by static factory method instantiation")
    }
}

// created by calling a method on another bean
struct InstanceFactoryMethod;

impl Display for InstanceFactoryMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("instantiated by instance factory method instantiation")
    }
}

#[derive(Bean)]
struct InstanceFactory;

#[factory_methods]
impl InstanceFactory {
    #[factory_method]
    fn create_instance(&self) -> BeanInstancePtr<InstanceFactoryMethod> {
        BeanInstancePtr::new(InstanceFactoryMethod)
    }
}

const BEAN_DEFINITIONS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/examples/beans.json");

// note: for the sake of simplicity, errors are unwrapped, rather than gracefully handled
fn main() {
    // usually ApplicationConfig is read from beanstalk.json or BEANSTALK_* environment variables,
    // but here we point directly to the definitions next to this example
    let config = ApplicationConfig::default().with_bean_definitions(BEAN_DEFINITIONS);

    let context = Application::new(config)
        .bootstrap()
        .expect("error bootstrapping application");

    info!(
        "{}",
        context
            .bean::<Person>("person")
            .expect("error retrieving person")
    );
    info!(
        "{}",
        context
            .bean::<StaticFactoryMethod>("staticFactoryMethod")
            .expect("error retrieving staticFactoryMethod")
    );
    info!(
        "{}",
        context
            .bean::<InstanceFactoryMethod>("instanceFactoryMethod")
            .expect("error retrieving instanceFactoryMethod")
    );
}
