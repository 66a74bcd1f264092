use std::collections::{HashMap, HashSet};

use crate::error::{Result, WiringError};
use crate::meta::{MethodDescriptor, TypeDescriptor, TypeName};

/// Static type registration emitted by `#[component]` and collected via inventory.
/// A struct and its impl blocks submit separate fragments; the catalog merges them by name.
pub struct TypeRegistration {
    pub describe: fn() -> TypeDescriptor,
}

inventory::collect!(TypeRegistration);

/// Iterate all registrations
pub fn all() -> Vec<&'static TypeRegistration> {
    inventory::iter::<TypeRegistration>.into_iter().collect()
}

/// 某个方法在类型层级中的可见视图：方法本身 + 声明它的类型
#[derive(Clone, Copy, Debug)]
pub struct MethodView<'a> {
    pub declared_on: &'a TypeName,
    pub method: &'a MethodDescriptor,
}

/// 类型内省能力。
pub trait TypeIntrospector {
    fn describe(&self, ty: &TypeName) -> Option<&TypeDescriptor>;

    /// Every method reachable on `ty`, own and inherited, one entry per signature.
    ///
    /// Types are visited so that each type comes before all of its supertypes, so the
    /// entry kept for an overridden signature is always the most-derived declaration.
    /// Each supertype is visited once even when reachable through several paths.
    fn methods_of(&self, ty: &TypeName) -> Result<Vec<MethodView<'_>>> {
        let mut postorder: Vec<&TypeDescriptor> = Vec::new();
        let mut visited: HashSet<&TypeName> = HashSet::new();
        let root = self
            .describe(ty)
            .ok_or_else(|| undescribed(ty, "type is not described by the introspector"))?;
        visit(self, root, &mut visited, &mut postorder)?;

        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for desc in postorder.into_iter().rev() {
            for m in &desc.methods {
                if seen.insert(&m.signature) {
                    out.push(MethodView {
                        declared_on: &desc.name,
                        method: m,
                    });
                }
            }
        }
        Ok(out)
    }
}

fn visit<'a, I: TypeIntrospector + ?Sized>(
    types: &'a I,
    desc: &'a TypeDescriptor,
    visited: &mut HashSet<&'a TypeName>,
    postorder: &mut Vec<&'a TypeDescriptor>,
) -> Result<()> {
    if !visited.insert(&desc.name) {
        return Ok(());
    }
    for sup in &desc.supertypes {
        let sup_desc = types.describe(sup).ok_or_else(|| {
            undescribed(
                sup,
                &format!("supertype of `{}` is not described by the introspector", desc.name),
            )
        })?;
        visit(types, sup_desc, visited, postorder)?;
    }
    postorder.push(desc);
    Ok(())
}

fn undescribed(ty: &TypeName, reason: &str) -> WiringError {
    WiringError::UnresolvedComponentType {
        declaration: ty.to_string(),
        reason: reason.to_string(),
    }
}

/// 类型目录：内省能力的具体实现。
#[derive(Clone, Debug, Default)]
pub struct TypeCatalog {
    types: HashMap<TypeName, TypeDescriptor>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 汇总 inventory 收集到的全部静态注册
    pub fn from_registry() -> Self {
        let mut catalog = Self::new();
        for reg in all() {
            catalog.insert((reg.describe)());
        }
        tracing::debug!(types = catalog.len(), "type catalog built from static registrations");
        catalog
    }

    pub fn with_type(mut self, desc: TypeDescriptor) -> Self {
        self.insert(desc);
        self
    }

    pub fn insert(&mut self, desc: TypeDescriptor) {
        match self.types.get_mut(&desc.name) {
            Some(existing) => existing.merge(desc),
            None => {
                self.types.insert(desc.name.clone(), desc);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeIntrospector for TypeCatalog {
    fn describe(&self, ty: &TypeName) -> Option<&TypeDescriptor> {
        self.types.get(ty)
    }
}
