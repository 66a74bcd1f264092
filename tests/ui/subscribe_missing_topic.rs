#![allow(dead_code)]
use mmg_consumer_wiring::{component, subscribe};

struct Msg;

struct Listener;

#[component]
impl Listener {
    #[subscribe(group = "g1")]
    fn on_msg(&self, _m: &Msg) {}
}

fn main() {}
