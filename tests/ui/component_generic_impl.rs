#![allow(dead_code)]
use mmg_consumer_wiring::component;

struct Holder<T>(T);

#[component]
impl<T> Holder<T> {
    fn get(&self) -> &T {
        &self.0
    }
}

fn main() {}
