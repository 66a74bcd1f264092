//! 类型内省的数据模型：类型标识、方法签名、方法属性与类型描述。
//!
//! 这些描述既可由 `#[component]` 宏在编译期静态注册，也可在测试或动态场景中手工构造；
//! 两条路径产出的描述完全等价。
use serde::{Deserialize, Serialize};
use std::fmt;

/// 类型标识。宏注册路径下取 `std::any::type_name`。
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        TypeName(name.into())
    }
    pub fn of<T: ?Sized>() -> Self {
        TypeName(std::any::type_name::<T>().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(s: &str) -> Self {
        TypeName(s.to_string())
    }
}

impl From<String> for TypeName {
    fn from(s: String) -> Self {
        TypeName(s)
    }
}

/// 方法签名：名称 + 参数类型（不含接收者与返回类型）。
/// 覆写判定以签名为键；排序按名称再按参数，保证跨运行的注册顺序稳定。
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodSignature {
    pub name: String,
    pub params: Vec<String>,
}

impl MethodSignature {
    pub fn new(name: impl Into<String>, params: &[&str]) -> Self {
        Self {
            name: name.into(),
            params: params.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.params.join(", "))
    }
}

/// `#[subscribe]` 携带的订阅元数据，原样保存，缺省值在合成阶段才补齐。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionMetadata {
    pub group: String,
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broker_address: Option<String>,
}

impl SubscriptionMetadata {
    pub fn new(group: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            topic: topic.into(),
            tag: None,
            broker_address: None,
        }
    }
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
    pub fn with_broker_address(mut self, addr: impl Into<String>) -> Self {
        self.broker_address = Some(addr.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MethodAttr {
    /// 订阅标记
    Subscribe(SubscriptionMetadata),
    /// 工厂产出方法标记，仅用于工厂解析消歧
    Produces,
    /// 与本引擎无关的其他标记，保留名称便于诊断
    Marker(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub signature: MethodSignature,
    pub returns: Option<TypeName>,
    pub attrs: Vec<MethodAttr>,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>, params: &[&str]) -> Self {
        Self {
            signature: MethodSignature::new(name, params),
            returns: None,
            attrs: Vec::new(),
        }
    }
    pub fn returns(mut self, ty: impl Into<TypeName>) -> Self {
        self.returns = Some(ty.into());
        self
    }
    pub fn subscribe(mut self, meta: SubscriptionMetadata) -> Self {
        self.attrs.push(MethodAttr::Subscribe(meta));
        self
    }
    pub fn produces(mut self) -> Self {
        self.attrs.push(MethodAttr::Produces);
        self
    }
    pub fn marker(mut self, name: impl Into<String>) -> Self {
        self.attrs.push(MethodAttr::Marker(name.into()));
        self
    }

    pub fn subscription(&self) -> Option<&SubscriptionMetadata> {
        self.attrs.iter().find_map(|a| match a {
            MethodAttr::Subscribe(m) => Some(m),
            _ => None,
        })
    }
    pub fn is_producer(&self) -> bool {
        self.attrs.iter().any(|a| matches!(a, MethodAttr::Produces))
    }
}

/// 单个类型的描述：自身方法 + 直接父类型列表（按声明顺序）。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub name: TypeName,
    pub supertypes: Vec<TypeName>,
    pub methods: Vec<MethodDescriptor>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            supertypes: Vec::new(),
            methods: Vec::new(),
        }
    }
    pub fn extends(mut self, ty: impl Into<TypeName>) -> Self {
        let ty = ty.into();
        if !self.supertypes.contains(&ty) {
            self.supertypes.push(ty);
        }
        self
    }
    pub fn method(mut self, m: MethodDescriptor) -> Self {
        self.methods.push(m);
        self
    }

    /// 合并同一类型的另一份描述（struct 与 impl 分别注册时出现）
    pub(crate) fn merge(&mut self, other: TypeDescriptor) {
        for s in other.supertypes {
            if !self.supertypes.contains(&s) {
                self.supertypes.push(s);
            }
        }
        self.methods.extend(other.methods);
    }
}
