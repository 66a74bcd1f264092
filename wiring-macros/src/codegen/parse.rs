use super::msgs::{
    ERR_COMPONENT_ARG, ERR_SUBSCRIBE_DUP_KEY, ERR_SUBSCRIBE_NEEDS_ARGS, ERR_SUBSCRIBE_NEED_GROUP,
    ERR_SUBSCRIBE_NEED_TOPIC, ERR_SUBSCRIBE_UNKNOWN_KEY,
};
use quote::ToTokens;
use syn::{Attribute, Expr, Path};

// 低层解析与判别辅助

#[inline]
pub fn attr_is(a: &Attribute, name: &str) -> bool {
    a.path().segments.last().is_some_and(|s| s.ident == name)
}

/// #[component(extends(A, B))] 的参数
pub fn parse_component_args(args: proc_macro2::TokenStream) -> syn::Result<Vec<Path>> {
    let mut extends = Vec::new();
    if args.is_empty() {
        return Ok(extends);
    }
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("extends") {
            meta.parse_nested_meta(|inner| {
                extends.push(inner.path.clone());
                Ok(())
            })
        } else {
            Err(meta.error(ERR_COMPONENT_ARG))
        }
    });
    syn::parse::Parser::parse2(parser, args)?;
    Ok(extends)
}

#[derive(Default)]
pub struct SubscribeArgs {
    pub group: Option<Expr>,
    pub topic: Option<Expr>,
    pub tag: Option<Expr>,
    pub broker_address: Option<Expr>,
}

// 取值为任意 &str 表达式（字面量或常量）；空串留到扫描期报 MissingRequiredField
pub fn parse_subscribe_attr(a: &Attribute) -> syn::Result<SubscribeArgs> {
    if let syn::Meta::Path(_) = &a.meta {
        return Err(syn::Error::new_spanned(a, ERR_SUBSCRIBE_NEEDS_ARGS));
    }
    let mut args = SubscribeArgs::default();
    a.parse_nested_meta(|meta| {
        let slot = if meta.path.is_ident("group") {
            &mut args.group
        } else if meta.path.is_ident("topic") {
            &mut args.topic
        } else if meta.path.is_ident("tag") {
            &mut args.tag
        } else if meta.path.is_ident("broker_address") {
            &mut args.broker_address
        } else {
            return Err(meta.error(ERR_SUBSCRIBE_UNKNOWN_KEY));
        };
        if slot.is_some() {
            return Err(meta.error(ERR_SUBSCRIBE_DUP_KEY));
        }
        *slot = Some(meta.value()?.parse::<Expr>()?);
        Ok(())
    })?;
    if args.group.is_none() {
        return Err(syn::Error::new_spanned(a, ERR_SUBSCRIBE_NEED_GROUP));
    }
    if args.topic.is_none() {
        return Err(syn::Error::new_spanned(a, ERR_SUBSCRIBE_NEED_TOPIC));
    }
    Ok(args)
}

#[inline]
pub fn produces_has_args(a: &Attribute) -> bool {
    a.meta.require_path_only().is_err()
}

/// 类型的签名文本：去掉 token 间多余空格，例如 `& OrderMsg` -> `&OrderMsg`
pub fn render_type(ty: &syn::Type) -> String {
    let raw = ty.to_token_stream().to_string();
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    let mut prev: Option<char> = None;
    while let Some(c) = chars.next() {
        if c == ' ' {
            let next = chars.peek().copied();
            let glue_prev = matches!(prev, Some('&' | '<' | ':' | '(' | '[' | '\''));
            let glue_next = matches!(next, Some('<' | '>' | ':' | ',' | ')' | ']'));
            if glue_prev || glue_next {
                continue;
            }
        }
        out.push(c);
        prev = Some(c);
    }
    out
}
