use beanstalk_di::arguments::BeanArguments;
use beanstalk_di::bean_registry::{
    BeanDefinition, BeanDefinitionRegistry, DefaultBeanDefinitionRegistry,
};
use beanstalk_di::factory::BeanFactoryBuilder;
use beanstalk_di::instance_provider::BeanInstancePtr;
use beanstalk_di::Bean;

// beans created by the constructor strategy implement the Bean trait, which is easiest to derive
#[derive(Bean)]
struct Greeting {
    // the first constructor argument is parsed into a String
    text: String,
}

#[derive(Bean)]
struct Person {
    // the first constructor argument is a literal value
    name: String,
    // the second one is a reference to another bean
    greeting: BeanInstancePtr<Greeting>,
}

impl Person {
    fn say_hello(&self) {
        println!("{}, {}!", self.greeting.text, self.name);
    }
}

// note: for the sake of simplicity, errors are unwrapped, rather than gracefully handled
fn main() {
    // definitions describe how to create beans and are stored in a registry
    let mut registry = DefaultBeanDefinitionRegistry::default();
    registry
        .register(
            "greeting",
            BeanDefinition::constructor::<Greeting>()
                .with_arguments(BeanArguments::default().with_value("Hello")),
        )
        .expect("error registering greeting");
    registry
        .register(
            "person",
            BeanDefinition::constructor::<Person>().with_arguments(
                BeanArguments::default()
                    .with_value("Alice")
                    .with_ref("greeting"),
            ),
        )
        .expect("error registering person");

    // beans are created by a BeanFactory
    // for convenience, BeanFactoryBuilder can be used to create the factory with a reasonable
    // default configuration
    let factory = BeanFactoryBuilder::new()
        .with_definition_registry(Box::new(registry))
        .build();

    let person = factory
        .bean::<Person>("person")
        .expect("error creating person");

    // prints "Hello, Alice!"
    person.say_hello();
}
