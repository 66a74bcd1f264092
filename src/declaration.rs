//! 声明仓库：启动期唯一的可变注册表，扫描完成后冻结为只读。
use std::{collections::HashMap, sync::Arc};

use crate::error::{Result, WiringError};
use crate::meta::{MethodSignature, TypeName};

/// 组件类型的来源：直接给出，或由工厂组件的产出方法间接给出（二者必居其一）
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeclarationSource {
    Direct(TypeName),
    Factory { component: String, method: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentDeclaration {
    pub name: String,
    pub source: DeclarationSource,
}

impl ComponentDeclaration {
    pub fn direct(name: impl Into<String>, ty: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            source: DeclarationSource::Direct(ty.into()),
        }
    }
    pub fn of<T: ?Sized>(name: impl Into<String>) -> Self {
        Self::direct(name, TypeName::of::<T>())
    }
    pub fn factory(
        name: impl Into<String>,
        factory_component: impl Into<String>,
        factory_method: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source: DeclarationSource::Factory {
                component: factory_component.into(),
                method: factory_method.into(),
            },
        }
    }
}

/// 合成的消费者声明：订阅参数（缺省值已补齐）+ 绑定的组件与方法
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsumerDeclaration {
    pub name: String,
    pub group: String,
    pub topic: String,
    pub tag: String,
    pub broker_address: String,
    pub bound_component: String,
    pub bound_method: MethodSignature,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Declaration {
    Component(ComponentDeclaration),
    Consumer(ConsumerDeclaration),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Component(c) => &c.name,
            Declaration::Consumer(c) => &c.name,
        }
    }
    pub fn as_component(&self) -> Option<&ComponentDeclaration> {
        match self {
            Declaration::Component(c) => Some(c),
            Declaration::Consumer(_) => None,
        }
    }
    pub fn as_consumer(&self) -> Option<&ConsumerDeclaration> {
        match self {
            Declaration::Consumer(c) => Some(c),
            Declaration::Component(_) => None,
        }
    }
}

impl From<ComponentDeclaration> for Declaration {
    fn from(c: ComponentDeclaration) -> Self {
        Declaration::Component(c)
    }
}

impl From<ConsumerDeclaration> for Declaration {
    fn from(c: ConsumerDeclaration) -> Self {
        Declaration::Consumer(c)
    }
}

/// 按注册顺序保存声明；覆盖写入保持原位置。
#[derive(Debug, Default, Clone)]
pub struct DeclarationStore {
    order: Vec<String>,
    entries: HashMap<String, Declaration>,
}

impl DeclarationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_declarations(&self) -> impl Iterator<Item = &Declaration> + '_ {
        self.order.iter().filter_map(|n| self.entries.get(n))
    }

    /// 当前名称快照（按注册顺序）；扫描只遍历该快照，新插入的声明不会被再次扫描
    pub fn names(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn get(&self, name: &str) -> Result<&Declaration> {
        self.entries.get(name).ok_or_else(|| WiringError::NotFound {
            name: name.to_string(),
            referenced_by: None,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn insert(&mut self, decl: impl Into<Declaration>) -> Result<()> {
        let decl = decl.into();
        if self.entries.contains_key(decl.name()) {
            return Err(WiringError::DuplicateName {
                name: decl.name().to_string(),
            });
        }
        self.order.push(decl.name().to_string());
        self.entries.insert(decl.name().to_string(), decl);
        Ok(())
    }

    /// 插入或覆盖，返回被替换的旧声明
    pub fn replace(&mut self, decl: impl Into<Declaration>) -> Option<Declaration> {
        let decl = decl.into();
        let name = decl.name().to_string();
        let prev = self.entries.insert(name.clone(), decl);
        if prev.is_none() {
            self.order.push(name);
        }
        prev
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn freeze(self) -> FrozenStore {
        FrozenStore {
            inner: Arc::new(self),
        }
    }
}

/// 冻结后的只读仓库，供 broker 层读取消费者声明
#[derive(Debug, Clone)]
pub struct FrozenStore {
    inner: Arc<DeclarationStore>,
}

impl FrozenStore {
    pub fn get(&self, name: &str) -> Result<&Declaration> {
        self.inner.get(name)
    }
    pub fn list_declarations(&self) -> impl Iterator<Item = &Declaration> + '_ {
        self.inner.list_declarations()
    }
    pub fn consumers(&self) -> impl Iterator<Item = &ConsumerDeclaration> + '_ {
        self.inner.list_declarations().filter_map(Declaration::as_consumer)
    }
    pub fn len(&self) -> usize {
        self.inner.len()
    }
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
