//! 餐厅后台的一次脚本化页面会话：
//! 人事、库存、财务页面挂载后相互通过事件总线协作，通知中心与调试面板旁观。
//!
mod pages;
mod settings;

use anyhow::Result as AnyResult;
use chrono::Utc;
use gastro_events::taxonomy::{Employee, FinancialAccount, InventoryItem};
use gastro_events::{AppEventBus, EventBus};
use gastro_ui::NotificationCenter;
use pages::{InventoryPage, KontenPage, PersonnelPage, settings_emitter};
use settings::Settings;
use std::time::Duration;

#[tokio::main(flavor = "current_thread")]
async fn main() -> AnyResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gastro=debug,info")),
        )
        .init();

    let settings = Settings::load()?;
    tracing::info!(?settings, "starting page session");

    let bus: AppEventBus = EventBus::with_config(settings.bus.clone())?;

    #[cfg(feature = "devtools")]
    gastro_ui::devtools::expose(&bus);

    let notifications = NotificationCenter::mount(&bus, settings.notifications.clone())?;

    #[cfg(feature = "devtools")]
    let mut inspector = gastro_ui::EventBusInspector::mount(&bus, settings.inspector.clone())?;

    let personnel = PersonnelPage::mount(&bus);
    let inventory = InventoryPage::mount(&bus);
    let mut konten = KontenPage::mount(&bus);
    konten.render("r-1");

    // --- 会话脚本 ---
    settings_emitter(&bus).emit_restaurant_selected("r-1", Some("Zur Linde".into()));

    personnel.employee_saved(Employee {
        id: "e-1".into(),
        first_name: "Anna".into(),
        last_name: Some("Berger".into()),
        position: Some("Küche".into()),
    });
    personnel.employee_save_failed("409 Conflict: E-Mail bereits vergeben");

    inventory.stock_changed(InventoryItem {
        id: "flour".into(),
        name: "Mehl".into(),
        quantity: 2.0,
        unit: "kg".into(),
        min_quantity: 5.0,
    });

    konten.account_saved(FinancialAccount {
        id: "acc-1".into(),
        name: "Kasse".into(),
        account_type: "cash".into(),
        balance_cents: 25_000,
    });
    settings_emitter(&bus).emit_data_refresh("all", Some("settings saved".into()));

    // 切换餐厅：财务页重新渲染，调用点的监听器随之重新绑定
    konten.render("r-2");
    konten.render("r-2");

    println!("== notifications @ {}", Utc::now().format("%H:%M:%S"));
    println!("{}", notifications.render());

    tokio::time::sleep(Duration::from_millis(4500)).await;
    println!("== notifications after 4.5s");
    println!("{}", notifications.render());

    #[cfg(feature = "devtools")]
    {
        inspector.show();
        tokio::time::sleep(Duration::from_millis(1100)).await;
        if let Some(panel) = inspector.render() {
            println!("== inspector\n{panel}");
        }
        inspector.hide();
    }

    tracing::info!(
        employees = personnel.employee_count(),
        low_stock = ?inventory.low_stock_items(),
        konten_reloads = konten.reloads(),
        "session finished"
    );

    drop(konten);
    drop(inventory);
    drop(personnel);
    drop(notifications);

    let stats = bus.stats();
    tracing::info!(
        listeners = stats.total_listener_count,
        history = stats.history_length,
        failed = stats.failed_invocations,
        "all components unmounted"
    );
    Ok(())
}
