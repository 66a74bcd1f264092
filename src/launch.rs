//! 与 broker 客户端层的交接契约：每个消费者声明以属性包形式交出，
//! broker 层只读取下列键来建立真实订阅并把消息分发给绑定方法。
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use crate::declaration::ConsumerDeclaration;

pub const GROUP: &str = "group";
pub const TOPIC: &str = "topic";
pub const TAG: &str = "tag";
pub const BROKER_ADDRESS: &str = "brokerAddress";
pub const BOUND_COMPONENT: &str = "boundComponentName";
pub const BOUND_METHOD: &str = "boundMethodSignature";

/// 消费者属性包（恰好包含上述六个键）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerProperties {
    name: String,
    props: Map<String, Value>,
}

impl ConsumerProperties {
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn get(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(Value::as_str)
    }
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.props
    }
    pub fn into_value(self) -> Value {
        Value::Object(self.props)
    }
}

impl From<&ConsumerDeclaration> for ConsumerProperties {
    fn from(c: &ConsumerDeclaration) -> Self {
        let mut props = Map::new();
        props.insert(GROUP.into(), Value::String(c.group.clone()));
        props.insert(TOPIC.into(), Value::String(c.topic.clone()));
        props.insert(TAG.into(), Value::String(c.tag.clone()));
        props.insert(BROKER_ADDRESS.into(), Value::String(c.broker_address.clone()));
        props.insert(BOUND_COMPONENT.into(), Value::String(c.bound_component.clone()));
        props.insert(BOUND_METHOD.into(), Value::String(c.bound_method.to_string()));
        Self {
            name: c.name.clone(),
            props,
        }
    }
}

impl ConsumerDeclaration {
    pub fn properties(&self) -> ConsumerProperties {
        ConsumerProperties::from(self)
    }
}

struct StopFlag {
    set: AtomicBool,
    notify: Notify,
}

/// 停机信号：由 `Bootstrap::stop` 触发，所有消费者任务共享同一份
#[derive(Clone)]
pub struct StopSignal {
    flag: Arc<StopFlag>,
}

impl StopSignal {
    pub(crate) fn new() -> Self {
        Self {
            flag: Arc::new(StopFlag {
                set: AtomicBool::new(false),
                notify: Notify::new(),
            }),
        }
    }
    pub(crate) fn trigger(&self) {
        if !self.flag.set.swap(true, Ordering::Release) {
            self.flag.notify.notify_waiters();
        }
    }
    pub fn is_set(&self) -> bool {
        self.flag.set.load(Ordering::Acquire)
    }
    /// 等待停机；已触发则立即返回
    pub async fn stopped(&self) {
        let notified = self.flag.notify.notified();
        if self.is_set() {
            return;
        }
        notified.await;
    }
}

/// broker 客户端层实现：为一个消费者声明建立订阅并持续消费，收到停机信号后返回。
#[async_trait]
pub trait ConsumerLauncher: Send + Sync {
    async fn launch(&self, consumer: ConsumerProperties, stop: StopSignal) -> anyhow::Result<()>;
}
