//! 扫描引擎：Scan → Resolve → Introspect → Synthesize → Insert，单线程、一次性执行。
use uuid::Uuid;

use crate::config::ScanConfig;
use crate::declaration::{Declaration, DeclarationStore};
use crate::error::Result;
use crate::introspect::find_handlers;
use crate::registry::TypeIntrospector;
use crate::resolve::ClassResolver;
use crate::synth::{register, synthesize};

/// 一次扫描的结果摘要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub run_id: Uuid,
    /// 参与扫描的组件声明数
    pub scanned: usize,
    /// 本次写入的消费者名称（去重，按首次写入顺序）
    pub registered: Vec<String>,
    /// last-write-wins 下被覆盖过的名称
    pub replaced: Vec<String>,
}

pub struct ConsumerScanner<'a, I: TypeIntrospector + ?Sized> {
    types: &'a I,
    cfg: &'a ScanConfig,
}

impl<'a, I: TypeIntrospector + ?Sized> ConsumerScanner<'a, I> {
    pub fn new(types: &'a I, cfg: &'a ScanConfig) -> Self {
        Self { types, cfg }
    }

    /// Scans every declaration present when the call starts, in registration order, and
    /// inserts one consumer declaration per `#[subscribe]` handler found.
    ///
    /// Declarations inserted by this pass are not scanned again. The first failure aborts
    /// the scan; consumers already inserted for earlier declarations stay in the store.
    pub fn scan(&self, store: &mut DeclarationStore) -> Result<ScanReport> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("consumer_scan", %run_id);
        let _enter = span.enter();

        let mut report = ScanReport {
            run_id,
            scanned: 0,
            registered: Vec::new(),
            replaced: Vec::new(),
        };
        for name in store.names() {
            let decl = match store.get(&name)? {
                Declaration::Component(c) => c.clone(),
                Declaration::Consumer(_) => {
                    tracing::trace!(declaration = %name, "consumer declaration; skipped");
                    continue;
                }
            };
            report.scanned += 1;
            let ty = ClassResolver::new(store, self.types).resolve(&decl)?;
            let handlers = find_handlers(self.types, &ty)?;
            if handlers.is_empty() {
                tracing::trace!(declaration = %name, ty = %ty, "no #[subscribe] handlers");
                continue;
            }
            for handler in &handlers {
                let consumer = synthesize(&name, handler, self.cfg);
                let consumer_name = consumer.name.clone();
                if register(store, consumer, self.cfg.collision)?.is_some() {
                    report.replaced.push(consumer_name.clone());
                }
                tracing::info!(
                    consumer = %consumer_name,
                    component = %name,
                    method = %handler.signature,
                    "registered #[subscribe] method as push consumer"
                );
                if !report.registered.contains(&consumer_name) {
                    report.registered.push(consumer_name);
                }
            }
        }
        tracing::info!(
            scanned = report.scanned,
            registered = report.registered.len(),
            "consumer scan finished"
        );
        Ok(report)
    }
}
