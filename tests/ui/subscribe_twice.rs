#![allow(dead_code)]
use mmg_consumer_wiring::{component, subscribe};

struct Msg;

struct Listener;

#[component]
impl Listener {
    #[subscribe(group = "g1", topic = "t1")]
    #[subscribe(group = "g2", topic = "t2")]
    fn on_msg(&self, _m: &Msg) {}
}

fn main() {}
