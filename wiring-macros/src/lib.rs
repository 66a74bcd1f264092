use proc_macro::TokenStream;

mod codegen;

// 唯一入口：#[component] 同时用于 struct 与 impl 块

/// 注册组件类型及其方法。
///
/// - struct 上：`#[component]` 或 `#[component(extends(Base))]`，登记类型与父类型。
/// - impl 块上：登记块内全部方法（签名、`#[subscribe]`、`#[produces]`）。
#[proc_macro_attribute]
pub fn component(args: TokenStream, input: TokenStream) -> TokenStream {
    codegen::entrypoint(args, input)
}

/// 订阅标记：`#[subscribe(group = "..", topic = "..", tag = "..", broker_address = "..")]`。
/// 标记型属性：保持方法不变，由 #[component] 标注的 impl 展开阶段统一解析。
#[proc_macro_attribute]
pub fn subscribe(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// 工厂产出方法标记，返回类型即被产出组件的类型。
#[proc_macro_attribute]
pub fn produces(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}
