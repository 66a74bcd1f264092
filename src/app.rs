use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::{
    config::ScanConfig,
    declaration::{ConsumerDeclaration, Declaration, DeclarationStore, FrozenStore},
    error::Result,
    launch::{ConsumerLauncher, StopSignal},
    registry::{TypeCatalog, TypeIntrospector},
    scanner::{ConsumerScanner, ScanReport},
};

/// 启动期生命周期：收集声明 → 扫描合成消费者 → 冻结 → 交给 broker 层启动。
pub struct Bootstrap {
    cfg: ScanConfig,
    // 扫描前可变；扫描成功后移入 frozen
    store: DeclarationStore,
    frozen: Option<FrozenStore>,
    report: Option<ScanReport>,
    tasks: Vec<JoinHandle<()>>,
    started: bool,
    stop: StopSignal,
}

impl Bootstrap {
    pub fn new(cfg: ScanConfig) -> Self {
        Self {
            cfg,
            store: DeclarationStore::new(),
            frozen: None,
            report: None,
            tasks: Vec::new(),
            started: false,
            stop: StopSignal::new(),
        }
    }

    /// 声明入口：仅在扫描前允许；之后的声明被忽略并告警。
    pub fn declare(&mut self, decl: impl Into<Declaration>) -> Result<&mut Self> {
        let decl = decl.into();
        if self.frozen.is_some() {
            tracing::warn!(declaration = %decl.name(), "declare called after scan; ignoring");
            return Ok(self);
        }
        self.store.insert(decl)?;
        Ok(self)
    }

    /// 扫描并冻结（仅一次，重复调用返回首次结果）。
    /// 失败时仓库保持失败时刻的状态（已写入的消费者不回滚），可通过 `store()` 查看；
    /// 成功后仓库移入 `frozen()`。
    pub fn scan_with<I: TypeIntrospector + ?Sized>(&mut self, types: &I) -> Result<&ScanReport> {
        let report = match self.report.take() {
            Some(r) => r,
            None => {
                let report = ConsumerScanner::new(types, &self.cfg).scan(&mut self.store)?;
                let store = std::mem::take(&mut self.store);
                self.frozen = Some(store.freeze());
                report
            }
        };
        let report: &ScanReport = self.report.insert(report);
        Ok(report)
    }

    /// 使用 `#[component]` 静态注册的类型目录启动
    pub async fn start(&mut self, launcher: Arc<dyn ConsumerLauncher>) -> Result<()> {
        let catalog = TypeCatalog::from_registry();
        self.start_with(&catalog, launcher).await
    }

    pub async fn start_with<I: TypeIntrospector + ?Sized>(
        &mut self,
        types: &I,
        launcher: Arc<dyn ConsumerLauncher>,
    ) -> Result<()> {
        if self.started {
            return Ok(());
        }
        self.scan_with(types)?;
        self.stop = StopSignal::new();
        let consumers: Vec<ConsumerDeclaration> = self.consumers();
        for consumer in consumers {
            let props = consumer.properties();
            let launcher = launcher.clone();
            let stop = self.stop.clone();
            let name = consumer.name.clone();
            let fut = async move {
                if let Err(e) = launcher.launch(props, stop).await {
                    tracing::error!(consumer = %name, component = %consumer.bound_component, error = %e, "consumer exited with error");
                }
            };
            self.tasks.push(tokio::spawn(fut));
        }
        // 让出一次调度，使各消费者任务尽快进入 launch
        tokio::task::yield_now().await;
        self.started = true;
        Ok(())
    }

    pub async fn stop(&mut self) {
        self.stop.trigger();
        let mut rest = Vec::new();
        rest.append(&mut self.tasks);
        for h in rest.into_iter() {
            // panic/取消同样视为已退出
            let _ = h.await;
        }
        self.started = false;
    }

    pub fn consumers(&self) -> Vec<ConsumerDeclaration> {
        self.frozen
            .as_ref()
            .map(|f| f.consumers().cloned().collect())
            .unwrap_or_default()
    }
    pub fn frozen(&self) -> Option<&FrozenStore> {
        self.frozen.as_ref()
    }
    /// 扫描前（或扫描失败后）的可变仓库；冻结后返回 `None`，请改用 `frozen()`
    pub fn store(&self) -> Option<&DeclarationStore> {
        match self.frozen {
            Some(_) => None,
            None => Some(&self.store),
        }
    }
    pub fn report(&self) -> Option<&ScanReport> {
        self.report.as_ref()
    }
    pub fn is_started(&self) -> bool {
        self.started
    }
}
