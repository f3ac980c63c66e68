// note: this example assumes you've analyzed the previous one

use beanstalk_di::bean_registry::DefaultBeanDefinitionRegistry;
use beanstalk_di::catalog::BeanTypeCatalog;
use beanstalk_di::definition_reader::{BeanDefinitionReader, BeanRecord};
use beanstalk_di::factory::BeanFactoryBuilder;
use beanstalk_di::factory_methods;
use beanstalk_di::instance_provider::BeanInstancePtr;
use once_cell::sync::Lazy;

static INSTANCE: Lazy<BeanInstancePtr<Settings>> = Lazy::new(|| {
    println!("Settings created!");
    BeanInstancePtr::new(Settings { verbose: true })
});

// a type which cannot be created from the outside, only via its static factory method
struct Settings {
    verbose: bool,
}

// factory methods are registered in a catalog under the type name, so definitions can refer to
// them by name
#[factory_methods]
impl Settings {
    // static factory methods don't take self
    #[factory_method]
    fn get_instance() -> BeanInstancePtr<Settings> {
        INSTANCE.clone()
    }
}

//noinspection DuplicatedCode
fn main() {
    // the catalog contains all types and factory methods registered with derives
    let catalog = BeanTypeCatalog::from_registrations();

    // definitions can be created from records, which usually come from configuration files
    let mut registry = DefaultBeanDefinitionRegistry::default();
    BeanDefinitionReader::new(&catalog)
        .load_records(
            &[
                BeanRecord {
                    id: "settings".to_string(),
                    class: Some("Settings".to_string()),
                    factory_method: Some("get_instance".to_string()),
                    ..Default::default()
                },
                BeanRecord {
                    id: "other-settings".to_string(),
                    class: Some("Settings".to_string()),
                    factory_method: Some("get_instance".to_string()),
                    ..Default::default()
                },
            ],
            &mut registry,
        )
        .expect("error reading definitions");

    let factory = BeanFactoryBuilder::new()
        .with_definition_registry(Box::new(registry))
        .build();

    // prints "Settings created!" once
    let settings = factory
        .bean::<Settings>("settings")
        .expect("error creating settings");
    let other_settings = factory
        .bean::<Settings>("other-settings")
        .expect("error creating other settings");

    // prints "true true"
    println!(
        "{} {}",
        settings.verbose,
        BeanInstancePtr::ptr_eq(&settings, &other_settings)
    );
}
