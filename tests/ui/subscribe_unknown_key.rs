#![allow(dead_code)]
use mmg_consumer_wiring::{component, subscribe};

struct Msg;

struct Listener;

#[component]
impl Listener {
    #[subscribe(group = "g1", topic = "t1", colour = "red")]
    fn on_msg(&self, _m: &Msg) {}
}

fn main() {}
