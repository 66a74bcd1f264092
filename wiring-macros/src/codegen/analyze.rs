use super::msgs::{
    ERR_PRODUCES_GENERIC, ERR_PRODUCES_IMPL_TRAIT, ERR_PRODUCES_NEED_RET, ERR_PRODUCES_NO_ARGS,
    ERR_SUBSCRIBE_MULTI_ATTR,
};
use syn::{ImplItemFn, ItemImpl, Type};

use super::parse::{attr_is, parse_subscribe_attr, produces_has_args, render_type, SubscribeArgs};

/// impl 块中单个方法的注册信息（所有方法都登记，未标注者仅参与覆写去重）
pub struct MethodSpec {
    pub name: String,
    pub params: Vec<String>,
    /// 仅 #[produces] 方法记录返回类型
    pub produces: Option<Type>,
    pub subscribe: Option<SubscribeArgs>,
}

pub fn collect_methods(
    item: &ItemImpl,
    self_ty: &Type,
) -> (Vec<MethodSpec>, Vec<proc_macro2::TokenStream>) {
    let mut methods = Vec::new();
    let mut errs = Vec::new();
    for it in &item.items {
        if let syn::ImplItem::Fn(m) = it {
            let params = m
                .sig
                .inputs
                .iter()
                .filter_map(|arg| match arg {
                    syn::FnArg::Typed(p) => Some(render_type(&p.ty)),
                    syn::FnArg::Receiver(_) => None,
                })
                .collect();
            let subscribe = match collect_subscribe(m) {
                Ok(s) => s,
                Err(e) => {
                    errs.push(e.to_compile_error());
                    None
                }
            };
            let produces = match collect_produces(m, self_ty) {
                Ok(p) => p,
                Err(e) => {
                    errs.push(e.to_compile_error());
                    None
                }
            };
            methods.push(MethodSpec {
                name: m.sig.ident.to_string(),
                params,
                produces,
                subscribe,
            });
        }
    }
    (methods, errs)
}

fn collect_subscribe(m: &ImplItemFn) -> syn::Result<Option<SubscribeArgs>> {
    let mut found = None;
    for a in m.attrs.iter().filter(|a| attr_is(a, "subscribe")) {
        if found.is_some() {
            return Err(syn::Error::new_spanned(a, ERR_SUBSCRIBE_MULTI_ATTR));
        }
        found = Some(parse_subscribe_attr(a)?);
    }
    Ok(found)
}

fn collect_produces(m: &ImplItemFn, self_ty: &Type) -> syn::Result<Option<Type>> {
    let Some(a) = m.attrs.iter().find(|a| attr_is(a, "produces")) else {
        return Ok(None);
    };
    if produces_has_args(a) {
        return Err(syn::Error::new_spanned(a, ERR_PRODUCES_NO_ARGS));
    }
    if !m.sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(&m.sig, ERR_PRODUCES_GENERIC));
    }
    let ty = match &m.sig.output {
        syn::ReturnType::Default => {
            return Err(syn::Error::new_spanned(&m.sig, ERR_PRODUCES_NEED_RET))
        }
        syn::ReturnType::Type(_, ty) => &**ty,
    };
    match ty {
        Type::ImplTrait(_) => Err(syn::Error::new_spanned(ty, ERR_PRODUCES_IMPL_TRAIT)),
        Type::Tuple(t) if t.elems.is_empty() => {
            Err(syn::Error::new_spanned(ty, ERR_PRODUCES_NEED_RET))
        }
        // 生成代码位于 impl 块之外，`Self` 需替换为具体类型
        Type::Path(tp) if tp.qself.is_none() && tp.path.is_ident("Self") => {
            Ok(Some(self_ty.clone()))
        }
        other => Ok(Some(other.clone())),
    }
}
