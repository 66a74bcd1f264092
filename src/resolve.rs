//! 组件类型解析：直接类型原样返回；工厂形式则在工厂类型上寻找唯一的 #[produces] 同名方法，
//! 以其返回类型作为组件类型。工厂不允许嵌套（工厂组件本身必须是直接类型）。
use smallvec::SmallVec;

use crate::declaration::{ComponentDeclaration, Declaration, DeclarationSource, DeclarationStore};
use crate::error::{Result, WiringError};
use crate::meta::TypeName;
use crate::registry::{MethodView, TypeIntrospector};

pub struct ClassResolver<'a, I: TypeIntrospector + ?Sized> {
    store: &'a DeclarationStore,
    types: &'a I,
}

impl<'a, I: TypeIntrospector + ?Sized> ClassResolver<'a, I> {
    pub fn new(store: &'a DeclarationStore, types: &'a I) -> Self {
        Self { store, types }
    }

    pub fn resolve(&self, decl: &ComponentDeclaration) -> Result<TypeName> {
        match &decl.source {
            DeclarationSource::Direct(ty) => Ok(ty.clone()),
            DeclarationSource::Factory { component, method } => {
                self.resolve_factory(decl, component, method)
            }
        }
    }

    fn resolve_factory(
        &self,
        decl: &ComponentDeclaration,
        factory_component: &str,
        factory_method: &str,
    ) -> Result<TypeName> {
        let unresolved = |reason: String| WiringError::UnresolvedComponentType {
            declaration: decl.name.clone(),
            reason,
        };
        let factory = self.store.get(factory_component).map_err(|_| WiringError::NotFound {
            name: factory_component.to_string(),
            referenced_by: Some(decl.name.clone()),
        })?;
        let factory_ty = match factory {
            Declaration::Component(ComponentDeclaration {
                source: DeclarationSource::Direct(ty),
                ..
            }) => ty,
            Declaration::Component(_) => {
                return Err(unresolved(format!(
                    "factory component `{factory_component}` is itself factory-produced; nested factories are not supported"
                )))
            }
            Declaration::Consumer(_) => {
                return Err(unresolved(format!(
                    "factory component `{factory_component}` is a consumer declaration"
                )))
            }
        };
        if self.types.describe(factory_ty).is_none() {
            tracing::error!(declaration = %decl.name, factory_type = %factory_ty, "factory type is not described; cannot inspect its methods");
            return Err(unresolved(format!(
                "factory type `{factory_ty}` is not described by the introspector"
            )));
        }

        let candidates: SmallVec<[MethodView<'_>; 2]> = self
            .types
            .methods_of(factory_ty)?
            .into_iter()
            .filter(|v| v.method.signature.name == factory_method && v.method.is_producer())
            .collect();
        if candidates.len() != 1 {
            let mut sigs: Vec<_> = candidates
                .iter()
                .map(|v| v.method.signature.clone())
                .collect();
            sigs.sort();
            return Err(WiringError::AmbiguousFactoryResolution {
                factory_type: factory_ty.clone(),
                method: factory_method.to_string(),
                candidates: sigs,
            });
        }
        let chosen = candidates[0];
        chosen.method.returns.clone().ok_or_else(|| {
            unresolved(format!(
                "#[produces] method `{}` on `{}` declares no return type",
                chosen.method.signature, chosen.declared_on
            ))
        })
    }
}
