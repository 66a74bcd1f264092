//! 启动期统一错误类型：所有变体均为致命错误，扫描立即中止，不做回滚与重试。
use std::{error::Error as StdError, fmt};

use crate::meta::{MethodSignature, TypeName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WiringError {
    /// 引用的声明名称在仓库中不存在；`referenced_by` 为发起引用的声明（工厂引用时）
    NotFound {
        name: String,
        referenced_by: Option<String>,
    },
    /// 无法确定组件的具体类型
    UnresolvedComponentType { declaration: String, reason: String },
    /// 工厂类型上同名且带 #[produces] 的候选方法数量不为 1
    AmbiguousFactoryResolution {
        factory_type: TypeName,
        method: String,
        candidates: Vec<MethodSignature>,
    },
    /// #[subscribe] 缺少 topic 或 group（空字符串视同缺失）
    MissingRequiredField {
        owner: TypeName,
        method: MethodSignature,
        field: &'static str,
    },
    /// fail-fast 策略下合成名称与已有声明冲突
    DuplicateName { name: String },
    InvalidConfig(String),
}

impl fmt::Display for WiringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WiringError::NotFound {
                name,
                referenced_by: None,
            } => write!(f, "no declaration named `{name}`"),
            WiringError::NotFound {
                name,
                referenced_by: Some(by),
            } => write!(
                f,
                "declaration `{by}` references `{name}`, but no declaration with that name exists"
            ),
            WiringError::UnresolvedComponentType {
                declaration,
                reason,
            } => write!(
                f,
                "cannot resolve component type of declaration `{declaration}`: {reason}"
            ),
            WiringError::AmbiguousFactoryResolution {
                factory_type,
                method,
                candidates,
            } => {
                write!(
                    f,
                    "factory type `{factory_type}` has {} #[produces] candidates named `{method}` (expected exactly 1)",
                    candidates.len()
                )?;
                if !candidates.is_empty() {
                    let listed: Vec<String> = candidates.iter().map(|c| c.to_string()).collect();
                    write!(f, ": [{}]", listed.join(", "))?;
                }
                Ok(())
            }
            WiringError::MissingRequiredField {
                owner,
                method,
                field,
            } => write!(
                f,
                "#[subscribe] on `{owner}::{method}` is missing required field `{field}`"
            ),
            WiringError::DuplicateName { name } => {
                write!(f, "a declaration named `{name}` is already registered")
            }
            WiringError::InvalidConfig(msg) => write!(f, "invalid scan config: {msg}"),
        }
    }
}
impl StdError for WiringError {}

pub type Result<T = ()> = std::result::Result<T, WiringError>;
