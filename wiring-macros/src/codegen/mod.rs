mod analyze;
mod emit;
mod msgs;
mod parse;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Item, ItemImpl, ItemStruct};

use analyze::collect_methods;
use emit::emit_registration;
use msgs::{ERR_COMPONENT_GENERIC, ERR_COMPONENT_TARGET};
use parse::parse_component_args;

pub fn entrypoint(args: TokenStream, input: TokenStream) -> TokenStream {
    let args_ts = proc_macro2::TokenStream::from(args);
    let item_any = parse_macro_input!(input as Item);
    let expanded = match item_any {
        Item::Struct(item) => component_for_struct(item, args_ts),
        Item::Impl(item) => component_for_impl(item, args_ts),
        other => syn::Error::new_spanned(other, ERR_COMPONENT_TARGET).to_compile_error(),
    };
    expanded.into()
}

fn component_for_struct(item: ItemStruct, args: proc_macro2::TokenStream) -> proc_macro2::TokenStream {
    let extends = match parse_component_args(args) {
        Ok(e) => e,
        Err(e) => return with_error(&item, e),
    };
    if !item.generics.params.is_empty() {
        return with_error(&item, syn::Error::new_spanned(&item.generics, ERR_COMPONENT_GENERIC));
    }
    let ident = &item.ident;
    let self_ty: syn::Type = syn::parse_quote!(#ident);
    let registration = emit_registration(&self_ty, &extends, &[]);
    quote! {
        #item
        #registration
    }
}

fn component_for_impl(item: ItemImpl, args: proc_macro2::TokenStream) -> proc_macro2::TokenStream {
    let extends = match parse_component_args(args) {
        Ok(e) => e,
        Err(e) => return with_error(&item, e),
    };
    if !item.generics.params.is_empty() {
        return with_error(&item, syn::Error::new_spanned(&item.generics, ERR_COMPONENT_GENERIC));
    }
    let self_ty = (*item.self_ty).clone();
    let (methods, compile_errors) = collect_methods(&item, &self_ty);
    let registration = emit_registration(&self_ty, &extends, &methods);
    quote! {
        #item
        #registration
        #(#compile_errors)*
    }
}

// 出错时保留原始条目，避免连带产生大量无关报错
fn with_error<T: quote::ToTokens>(item: &T, err: syn::Error) -> proc_macro2::TokenStream {
    let err = err.to_compile_error();
    quote! {
        #item
        #err
    }
}
