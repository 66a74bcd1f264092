// Centralized compile-time diagnostic strings for the macro codegen layer.

pub(super) const ERR_COMPONENT_TARGET: &str = "#[component] only supports struct or impl blocks";
pub(super) const ERR_COMPONENT_ARG: &str =
    "#[component] only accepts extends(TypeA, TypeB, ..)";
pub(super) const ERR_COMPONENT_GENERIC: &str =
    "#[component] does not support generic types or impl blocks";

pub(super) const ERR_SUBSCRIBE_NEEDS_ARGS: &str =
    "#[subscribe] requires arguments: #[subscribe(group = \"..\", topic = \"..\")]";
pub(super) const ERR_SUBSCRIBE_UNKNOWN_KEY: &str =
    "#[subscribe] only accepts group, topic, tag and broker_address";
pub(super) const ERR_SUBSCRIBE_DUP_KEY: &str = "#[subscribe] key given more than once";
pub(super) const ERR_SUBSCRIBE_NEED_GROUP: &str = "#[subscribe] requires `group = ..`";
pub(super) const ERR_SUBSCRIBE_NEED_TOPIC: &str = "#[subscribe] requires `topic = ..`";
pub(super) const ERR_SUBSCRIBE_MULTI_ATTR: &str =
    "a method can only have one #[subscribe(...)] attribute";

pub(super) const ERR_PRODUCES_NO_ARGS: &str = "#[produces] does not accept any arguments";
pub(super) const ERR_PRODUCES_NEED_RET: &str =
    "#[produces] method must declare the produced type as its return type";
pub(super) const ERR_PRODUCES_IMPL_TRAIT: &str =
    "#[produces] method must return a concrete type, not `impl Trait`";
pub(super) const ERR_PRODUCES_GENERIC: &str = "#[produces] method cannot be generic";
