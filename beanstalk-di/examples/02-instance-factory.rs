// note: this example assumes you've analyzed the previous ones

use beanstalk_di::bean_registry::DefaultBeanDefinitionRegistry;
use beanstalk_di::catalog::BeanTypeCatalog;
use beanstalk_di::definition_reader::BeanDefinitionReader;
use beanstalk_di::factory::BeanFactoryBuilder;
use beanstalk_di::instance_provider::BeanInstancePtr;
use beanstalk_di::{factory_methods, Bean};
use config::FileFormat;
use std::sync::atomic::{AtomicU32, Ordering};

struct Ticket {
    number: u32,
}

// the factory bean is a regular bean, created by its constructor
#[derive(Bean)]
struct TicketMachine {
    #[bean(default)]
    next: AtomicU32,
}

#[factory_methods]
impl TicketMachine {
    // instance factory methods are called on the factory bean
    #[factory_method]
    fn issue(&self) -> BeanInstancePtr<Ticket> {
        BeanInstancePtr::new(Ticket {
            number: self.next.fetch_add(1, Ordering::SeqCst),
        })
    }
}

// scopes decide when to create and when to reuse instances - "prototype" beans are created on
// every request, while the default "singleton" beans are created once
const BEANS: &str = r#"{
    "beans": [
        { "id": "machine", "class": "TicketMachine" },
        { "id": "ticket", "factory-bean": "machine", "factory-method": "issue", "scope": "prototype" }
    ]
}"#;

//noinspection DuplicatedCode
fn main() {
    let catalog = BeanTypeCatalog::from_registrations();

    let mut registry = DefaultBeanDefinitionRegistry::default();
    BeanDefinitionReader::new(&catalog)
        .read_str(BEANS, FileFormat::Json, &mut registry)
        .expect("error reading definitions");

    let factory = BeanFactoryBuilder::new()
        .with_definition_registry(Box::new(registry))
        .build();

    // prints "0" "1" "2"
    for _ in 0..3 {
        let ticket = factory
            .bean::<Ticket>("ticket")
            .expect("error creating ticket");
        println!("{}", ticket.number);
    }
}
