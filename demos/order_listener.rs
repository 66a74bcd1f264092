//! 演示：#[component] + #[subscribe] 声明消费者，启动期扫描后交给一个仅打印属性包的 launcher。
use async_trait::async_trait;
use mmg_consumer_wiring::prelude::*;
use std::sync::Arc;
use std::time::Duration;

pub struct OrderCreated {
    pub id: u64,
}

#[mmg_consumer_wiring::component]
#[derive(Default)]
struct OrderListener;

#[mmg_consumer_wiring::component]
impl OrderListener {
    #[mmg_consumer_wiring::subscribe(group = "order-group", topic = "order-created")]
    fn on_created(&self, msg: &OrderCreated) -> bool {
        msg.id > 0
    }

    #[mmg_consumer_wiring::subscribe(group = "order-group", topic = "order-paid", tag = "card || wallet")]
    fn on_paid(&self, msg: &OrderCreated) -> bool {
        msg.id > 0
    }
}

struct RefundListener;

#[mmg_consumer_wiring::component]
impl RefundListener {
    #[mmg_consumer_wiring::subscribe(group = "refund-group", topic = "refund")]
    fn on_refund(&self, _msg: &OrderCreated) -> bool {
        true
    }
}

#[mmg_consumer_wiring::component]
struct ListenerConfig;

#[mmg_consumer_wiring::component]
impl ListenerConfig {
    #[mmg_consumer_wiring::produces]
    fn refund_listener(&self) -> RefundListener {
        RefundListener
    }
}

struct PrintLauncher;

#[async_trait]
impl ConsumerLauncher for PrintLauncher {
    async fn launch(&self, consumer: ConsumerProperties, stop: StopSignal) -> anyhow::Result<()> {
        let name = consumer.name().to_string();
        println!("{name} => {}", serde_json::to_string_pretty(&consumer.into_value())?);
        stop.stopped().await;
        println!("{name} stopped");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let mut boot = Bootstrap::new(ScanConfig::from_env());
    boot.declare(ComponentDeclaration::of::<OrderListener>("orderListener"))?
        .declare(ComponentDeclaration::of::<ListenerConfig>("listenerConfig"))?
        .declare(ComponentDeclaration::factory(
            "refundListener",
            "listenerConfig",
            "refund_listener",
        ))?;
    boot.start(Arc::new(PrintLauncher)).await?;

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = tokio::time::sleep(Duration::from_secs(2)) => {}
    }
    boot.stop().await;
    Ok(())
}
