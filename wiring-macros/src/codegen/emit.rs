use quote::quote;
use syn::{Path, Type};

use super::analyze::MethodSpec;

fn method_tokens(m: &MethodSpec) -> proc_macro2::TokenStream {
    let name = &m.name;
    let params = &m.params;
    let mut chain = quote! {
        mmg_consumer_wiring::meta::MethodDescriptor::new(#name, &[#(#params),*])
    };
    if let Some(ret) = &m.produces {
        chain = quote! { #chain.returns(::std::any::type_name::<#ret>()).produces() };
    }
    if let Some(sub) = &m.subscribe {
        let group = &sub.group;
        let topic = &sub.topic;
        let mut meta = quote! {
            mmg_consumer_wiring::meta::SubscriptionMetadata::new(#group, #topic)
        };
        if let Some(tag) = &sub.tag {
            meta = quote! { #meta.with_tag(#tag) };
        }
        if let Some(addr) = &sub.broker_address {
            meta = quote! { #meta.with_broker_address(#addr) };
        }
        chain = quote! { #chain.subscribe(#meta) };
    }
    chain
}

/// 生成一份类型描述片段并通过 inventory 提交
pub fn emit_registration(
    self_ty: &Type,
    extends: &[Path],
    methods: &[MethodSpec],
) -> proc_macro2::TokenStream {
    let method_chain: Vec<_> = methods.iter().map(method_tokens).collect();
    quote! {
        #[doc(hidden)]
        const _: () = {
            fn __describe() -> mmg_consumer_wiring::meta::TypeDescriptor {
                mmg_consumer_wiring::meta::TypeDescriptor::new(::std::any::type_name::<#self_ty>())
                    #( .extends(::std::any::type_name::<#extends>()) )*
                    #( .method(#method_chain) )*
            }
            inventory::submit! { mmg_consumer_wiring::registry::TypeRegistration { describe: __describe } };
        };
    }
}
