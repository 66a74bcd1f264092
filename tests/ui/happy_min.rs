use mmg_consumer_wiring::prelude::*;

struct Msg;

const TOPIC: &str = "orders";

#[mmg_consumer_wiring::component]
struct Base;

#[mmg_consumer_wiring::component]
impl Base {
    #[mmg_consumer_wiring::subscribe(group = "base", topic = TOPIC)]
    fn on_base(&self, _m: &Msg) {}
}

#[mmg_consumer_wiring::component(extends(Base))]
struct C;

#[mmg_consumer_wiring::component]
impl C {
    #[mmg_consumer_wiring::subscribe(group = "g", topic = "t", tag = "a || b", broker_address = "127.0.0.1:9876")]
    fn on_msg(&self, _m: &Msg) -> bool { true }

    #[mmg_consumer_wiring::produces]
    fn make(&self) -> Self { C }
}

fn main() {
    let catalog = TypeCatalog::from_registry();
    let _ = catalog.describe(&TypeName::of::<C>());
}
