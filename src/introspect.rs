use crate::error::{Result, WiringError};
use crate::meta::{MethodSignature, SubscriptionMetadata, TypeName};
use crate::registry::TypeIntrospector;

/// 一个带 #[subscribe] 的处理方法（扫描期临时产物）
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandlerMethod {
    /// 被扫描的组件类型
    pub owner_type: TypeName,
    /// 实际声明该方法的类型（继承而来时为父类型）
    pub declared_on: TypeName,
    pub signature: MethodSignature,
    pub metadata: SubscriptionMetadata,
}

/// Finds every `#[subscribe]` method reachable on `ty`, inherited ones included.
///
/// Overridden methods are reported once, using the most-derived declaration: an
/// override without `#[subscribe]` hides the subscription of the method it overrides.
/// The result is ordered by signature. All handlers of the type are validated before
/// anything is returned, so a bad one aborts before any registration for this type.
///
/// A type the introspector knows nothing about has no handlers.
pub fn find_handlers<I: TypeIntrospector + ?Sized>(
    types: &I,
    ty: &TypeName,
) -> Result<Vec<HandlerMethod>> {
    if types.describe(ty).is_none() {
        tracing::trace!(ty = %ty, "type not described; no handlers");
        return Ok(Vec::new());
    }
    let mut handlers = Vec::new();
    for view in types.methods_of(ty)? {
        let Some(meta) = view.method.subscription() else {
            continue;
        };
        for (field, value) in [("topic", &meta.topic), ("group", &meta.group)] {
            if value.trim().is_empty() {
                return Err(WiringError::MissingRequiredField {
                    owner: view.declared_on.clone(),
                    method: view.method.signature.clone(),
                    field,
                });
            }
        }
        handlers.push(HandlerMethod {
            owner_type: ty.clone(),
            declared_on: view.declared_on.clone(),
            signature: view.method.signature.clone(),
            metadata: meta.clone(),
        });
    }
    handlers.sort_by(|a, b| a.signature.cmp(&b.signature));
    Ok(handlers)
}
