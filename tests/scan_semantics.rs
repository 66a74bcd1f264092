use mmg_consumer_wiring::config::{CollisionPolicy, ScanConfig, DEFAULT_BROKER_ADDRESS};
use mmg_consumer_wiring::declaration::{
    ComponentDeclaration, ConsumerDeclaration, Declaration, DeclarationStore,
};
use mmg_consumer_wiring::error::WiringError;
use mmg_consumer_wiring::meta::{
    MethodDescriptor, MethodSignature, SubscriptionMetadata, TypeDescriptor,
};
use mmg_consumer_wiring::registry::TypeCatalog;
use mmg_consumer_wiring::scanner::ConsumerScanner;

fn sub(group: &str, topic: &str) -> SubscriptionMetadata {
    SubscriptionMetadata::new(group, topic)
}

fn consumers(store: &DeclarationStore) -> Vec<&ConsumerDeclaration> {
    store
        .list_declarations()
        .filter_map(Declaration::as_consumer)
        .collect()
}

fn bindings(store: &DeclarationStore) -> Vec<(String, String, String)> {
    consumers(store)
        .into_iter()
        .map(|c| (c.name.clone(), c.bound_component.clone(), c.bound_method.to_string()))
        .collect()
}

fn order_catalog() -> TypeCatalog {
    TypeCatalog::new()
        .with_type(
            TypeDescriptor::new("OrderHandler")
                .method(MethodDescriptor::new("onOrder", &["Msg"]).subscribe(sub("g1", "t1")))
                .method(MethodDescriptor::new("toString", &[])),
        )
        .with_type(
            TypeDescriptor::new("AuditHandler")
                .method(MethodDescriptor::new("onAudit", &["Msg"]).subscribe(sub("g1", "t1"))),
        )
        .with_type(
            TypeDescriptor::new("HandlerConfig")
                .method(MethodDescriptor::new("make", &[]).returns("OrderHandler").produces()),
        )
        .with_type(
            TypeDescriptor::new("Broken")
                .method(MethodDescriptor::new("onGood", &["Msg"]).subscribe(sub("g5", "t5")))
                .method(MethodDescriptor::new("onBad", &["Msg"]).subscribe(sub("g6", ""))),
        )
}

#[test]
fn tagged_method_becomes_consumer_named_topic_group() {
    let types = order_catalog();
    let cfg = ScanConfig::default();
    let mut store = DeclarationStore::new();
    store
        .insert(ComponentDeclaration::direct("orderHandler", "OrderHandler"))
        .unwrap();

    let report = ConsumerScanner::new(&types, &cfg).scan(&mut store).unwrap();

    assert_eq!(report.scanned, 1);
    assert_eq!(report.registered, vec!["t1_g1"]);
    let c = store.get("t1_g1").unwrap().as_consumer().unwrap();
    assert_eq!(c.group, "g1");
    assert_eq!(c.topic, "t1");
    assert_eq!(c.tag, "*");
    assert_eq!(c.broker_address, DEFAULT_BROKER_ADDRESS);
    assert_eq!(c.bound_component, "orderHandler");
    assert_eq!(c.bound_method, MethodSignature::new("onOrder", &["Msg"]));
    // 原组件声明保留，消费者追加在其后
    assert_eq!(store.len(), 2);
}

#[test]
fn factory_produced_component_is_scanned_through_its_producer() {
    let types = order_catalog();
    let cfg = ScanConfig::default();
    let mut store = DeclarationStore::new();
    store
        .insert(ComponentDeclaration::direct("handlerConfig", "HandlerConfig"))
        .unwrap();
    store
        .insert(ComponentDeclaration::factory("orderHandler", "handlerConfig", "make"))
        .unwrap();

    ConsumerScanner::new(&types, &cfg).scan(&mut store).unwrap();

    assert_eq!(
        bindings(&store),
        vec![("t1_g1".to_string(), "orderHandler".to_string(), "onOrder(Msg)".to_string())]
    );
}

fn colliding_store() -> DeclarationStore {
    let mut store = DeclarationStore::new();
    store
        .insert(ComponentDeclaration::direct("orderHandler", "OrderHandler"))
        .unwrap();
    store
        .insert(ComponentDeclaration::direct("auditHandler", "AuditHandler"))
        .unwrap();
    store
}

#[test]
fn collision_fails_fast_by_default_and_keeps_first_binding() {
    let types = order_catalog();
    let cfg = ScanConfig::default();
    assert_eq!(cfg.collision, CollisionPolicy::FailFast);
    let mut store = colliding_store();

    let err = ConsumerScanner::new(&types, &cfg)
        .scan(&mut store)
        .unwrap_err();

    assert_eq!(err, WiringError::DuplicateName { name: "t1_g1".into() });
    assert_eq!(
        bindings(&store),
        vec![("t1_g1".to_string(), "orderHandler".to_string(), "onOrder(Msg)".to_string())]
    );
}

#[test]
fn collision_under_last_write_wins_keeps_later_binding() {
    let types = order_catalog();
    let cfg = ScanConfig::default().with_collision(CollisionPolicy::LastWriteWins);
    let mut store = colliding_store();

    let report = ConsumerScanner::new(&types, &cfg).scan(&mut store).unwrap();

    assert_eq!(report.replaced, vec!["t1_g1"]);
    assert_eq!(report.registered, vec!["t1_g1"]);
    assert_eq!(
        bindings(&store),
        vec![("t1_g1".to_string(), "auditHandler".to_string(), "onAudit(Msg)".to_string())]
    );
    assert_eq!(store.len(), 3);
}

#[test]
fn last_write_wins_never_overwrites_a_component_declaration() {
    let types = order_catalog().with_type(
        TypeDescriptor::new("Shadowed")
            .method(MethodDescriptor::new("onShadow", &["Msg"]).subscribe(sub("g2", "t2"))),
    );
    let cfg = ScanConfig::default().with_collision(CollisionPolicy::LastWriteWins);
    let mut store = DeclarationStore::new();
    store
        .insert(ComponentDeclaration::direct("orderHandler", "OrderHandler"))
        .unwrap();
    store
        .insert(ComponentDeclaration::direct("t1_g1", "Shadowed"))
        .unwrap();

    let err = ConsumerScanner::new(&types, &cfg)
        .scan(&mut store)
        .unwrap_err();

    assert_eq!(err, WiringError::DuplicateName { name: "t1_g1".into() });
    let kept = store.get("t1_g1").unwrap().as_component().expect("component kept");
    assert_eq!(kept, &ComponentDeclaration::direct("t1_g1", "Shadowed"));
    assert!(consumers(&store).is_empty());
}

#[test]
fn collision_with_existing_component_name_fails_fast() {
    let types = order_catalog();
    let cfg = ScanConfig::default();
    let mut store = DeclarationStore::new();
    store
        .insert(ComponentDeclaration::direct("orderHandler", "OrderHandler"))
        .unwrap();
    store
        .insert(ComponentDeclaration::direct("t1_g1", "SomethingElse"))
        .unwrap();
    assert!(matches!(
        ConsumerScanner::new(&types, &cfg).scan(&mut store),
        Err(WiringError::DuplicateName { .. })
    ));
}

#[test]
fn empty_topic_aborts_before_inserting_any_handler_of_that_component() {
    let types = order_catalog();
    let cfg = ScanConfig::default();
    let mut store = DeclarationStore::new();
    store
        .insert(ComponentDeclaration::direct("broken", "Broken"))
        .unwrap();

    let err = ConsumerScanner::new(&types, &cfg)
        .scan(&mut store)
        .unwrap_err();

    assert!(matches!(err, WiringError::MissingRequiredField { field: "topic", .. }));
    // onGood 排在 onBad 之后也不会被写入：整个类型先校验后写入
    assert!(consumers(&store).is_empty());
}

#[test]
fn failure_keeps_registrations_of_earlier_components() {
    let types = order_catalog();
    let cfg = ScanConfig::default();
    let mut store = DeclarationStore::new();
    store
        .insert(ComponentDeclaration::direct("orderHandler", "OrderHandler"))
        .unwrap();
    store
        .insert(ComponentDeclaration::factory("ghost", "missingFactory", "make"))
        .unwrap();

    let err = ConsumerScanner::new(&types, &cfg)
        .scan(&mut store)
        .unwrap_err();

    assert_eq!(
        err,
        WiringError::NotFound {
            name: "missingFactory".into(),
            referenced_by: Some("ghost".into()),
        }
    );
    let msg = err.to_string();
    assert!(msg.contains("`ghost`"), "{msg}");
    assert!(msg.contains("`missingFactory`"), "{msg}");
    assert!(store.contains("t1_g1"));
}

#[test]
fn existing_consumer_declarations_are_not_rescanned() {
    let types = order_catalog();
    let cfg = ScanConfig::default();
    let mut store = DeclarationStore::new();
    store
        .insert(ConsumerDeclaration {
            name: "legacy_g0".into(),
            group: "g0".into(),
            topic: "legacy".into(),
            tag: "*".into(),
            broker_address: DEFAULT_BROKER_ADDRESS.into(),
            bound_component: "legacy".into(),
            bound_method: MethodSignature::new("on_legacy", &[]),
        })
        .unwrap();
    store
        .insert(ComponentDeclaration::direct("orderHandler", "OrderHandler"))
        .unwrap();
    store
        .insert(ComponentDeclaration::direct("dataSource", "DataSource"))
        .unwrap();

    let report = ConsumerScanner::new(&types, &cfg).scan(&mut store).unwrap();

    assert_eq!(report.scanned, 2);
    assert_eq!(report.registered, vec!["t1_g1"]);
    let names: Vec<&str> = store.list_declarations().map(|d| d.name()).collect();
    assert_eq!(names, vec!["legacy_g0", "orderHandler", "dataSource", "t1_g1"]);
}

#[test]
fn tag_and_broker_address_defaults_come_from_config() {
    let types = TypeCatalog::new().with_type(
        TypeDescriptor::new("Mixed")
            .method(MethodDescriptor::new("a", &[]).subscribe(sub("g", "plain")))
            .method(
                MethodDescriptor::new("b", &[]).subscribe(
                    sub("g", "explicit")
                        .with_tag("paid || refunded")
                        .with_broker_address("10.0.0.7:9876"),
                ),
            ),
    );
    let cfg = ScanConfig {
        default_broker_address: "mq.internal:9876".into(),
        default_tag: "all".into(),
        ..ScanConfig::default()
    };
    let mut store = DeclarationStore::new();
    store
        .insert(ComponentDeclaration::direct("mixed", "Mixed"))
        .unwrap();

    ConsumerScanner::new(&types, &cfg).scan(&mut store).unwrap();

    let plain = store.get("plain_g").unwrap().as_consumer().unwrap();
    assert_eq!(plain.tag, "all");
    assert_eq!(plain.broker_address, "mq.internal:9876");
    let explicit = store.get("explicit_g").unwrap().as_consumer().unwrap();
    assert_eq!(explicit.tag, "paid || refunded");
    assert_eq!(explicit.broker_address, "10.0.0.7:9876");
}

#[test]
fn repeated_scans_over_same_declarations_are_deterministic() {
    let types = TypeCatalog::new()
        .with_type(
            TypeDescriptor::new("Multi")
                .method(MethodDescriptor::new("on_c", &[]).subscribe(sub("g", "c")))
                .method(MethodDescriptor::new("on_a", &[]).subscribe(sub("g", "a")))
                .method(MethodDescriptor::new("on_b", &[]).subscribe(sub("g", "b"))),
        )
        .with_type(
            TypeDescriptor::new("Single")
                .method(MethodDescriptor::new("on_z", &[]).subscribe(sub("h", "z"))),
        );
    let cfg = ScanConfig::default();
    let build = || {
        let mut store = DeclarationStore::new();
        store
            .insert(ComponentDeclaration::direct("single", "Single"))
            .unwrap();
        store
            .insert(ComponentDeclaration::direct("multi", "Multi"))
            .unwrap();
        store
    };

    let mut first = build();
    let mut second = build();
    let r1 = ConsumerScanner::new(&types, &cfg).scan(&mut first).unwrap();
    let r2 = ConsumerScanner::new(&types, &cfg).scan(&mut second).unwrap();

    assert_eq!(r1.registered, vec!["z_h", "a_g", "b_g", "c_g"]);
    assert_eq!(r1.registered, r2.registered);
    assert_ne!(r1.run_id, r2.run_id);
    assert_eq!(bindings(&first), bindings(&second));
}

#[test]
fn rescanning_the_same_store_collides_under_fail_fast() {
    let types = order_catalog();
    let cfg = ScanConfig::default();
    let mut store = DeclarationStore::new();
    store
        .insert(ComponentDeclaration::direct("orderHandler", "OrderHandler"))
        .unwrap();
    ConsumerScanner::new(&types, &cfg).scan(&mut store).unwrap();
    assert!(matches!(
        ConsumerScanner::new(&types, &cfg).scan(&mut store),
        Err(WiringError::DuplicateName { .. })
    ));
}
