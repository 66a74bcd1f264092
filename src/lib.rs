pub mod app;
pub mod config;
pub mod declaration;
pub mod error;
pub mod introspect;
pub mod launch;
pub mod meta;
pub mod registry;
pub mod resolve;
pub mod scanner;
pub mod synth;

// 允许在本 crate 内通过 `mmg_consumer_wiring::...` 自引用（供 proc-macro 展开使用）
extern crate self as mmg_consumer_wiring;

pub mod prelude {
    pub use crate::app::Bootstrap;
    pub use crate::config::{CollisionPolicy, ScanConfig};
    pub use crate::declaration::{ComponentDeclaration, ConsumerDeclaration, DeclarationStore};
    pub use crate::error::{Result, WiringError};
    pub use crate::launch::{ConsumerLauncher, ConsumerProperties, StopSignal};
    pub use crate::meta::{MethodSignature, TypeName};
    pub use crate::registry::{TypeCatalog, TypeIntrospector};
}

pub use wiring_macros::*;
