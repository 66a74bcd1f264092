#![allow(dead_code)]
use mmg_consumer_wiring::{component, produces};

struct Made;

struct Factory;

#[component]
impl Factory {
    #[produces(fast)]
    fn make(&self) -> Made {
        Made
    }
}

fn main() {}
