//! 消费者声明的合成、命名与写入。
use crate::config::{CollisionPolicy, ScanConfig};
use crate::declaration::{ConsumerDeclaration, Declaration, DeclarationStore};
use crate::error::{Result, WiringError};
use crate::introspect::HandlerMethod;
use crate::meta::SubscriptionMetadata;

/// 消费者声明名称：`topic_group`
pub fn consumer_name(meta: &SubscriptionMetadata) -> String {
    format!("{}_{}", meta.topic, meta.group)
}

pub fn synthesize(owner: &str, handler: &HandlerMethod, cfg: &ScanConfig) -> ConsumerDeclaration {
    let meta = &handler.metadata;
    ConsumerDeclaration {
        name: consumer_name(meta),
        group: meta.group.clone(),
        topic: meta.topic.clone(),
        tag: or_default(meta.tag.as_deref(), &cfg.default_tag),
        broker_address: or_default(meta.broker_address.as_deref(), &cfg.default_broker_address),
        bound_component: owner.to_string(),
        bound_method: handler.signature.clone(),
    }
}

fn or_default(v: Option<&str>, default: &str) -> String {
    match v {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => default.to_string(),
    }
}

/// 按冲突策略写入仓库；返回被覆盖的旧消费者声明（仅 last-write-wins 下可能存在）。
/// 与组件声明重名时无论策略如何都报 `DuplicateName`：扫描只新增消费者，不覆盖组件。
pub fn register(
    store: &mut DeclarationStore,
    decl: ConsumerDeclaration,
    policy: CollisionPolicy,
) -> Result<Option<Declaration>> {
    match policy {
        CollisionPolicy::FailFast => store.insert(decl).map(|_| None),
        CollisionPolicy::LastWriteWins => {
            let prev_binding = match store.get(&decl.name) {
                Ok(Declaration::Component(c)) => {
                    tracing::error!(consumer = %decl.name, component = %c.name, "consumer name collides with a component declaration");
                    return Err(WiringError::DuplicateName { name: decl.name });
                }
                Ok(Declaration::Consumer(c)) => {
                    Some(format!("{}::{}", c.bound_component, c.bound_method))
                }
                Err(_) => None,
            };
            if let Some(prev_binding) = prev_binding {
                tracing::warn!(consumer = %decl.name, replaced = %prev_binding, "consumer name collision; later registration wins");
            }
            Ok(store.replace(decl))
        }
    }
}
