//! 模拟页面组件：每个页面持有自己的订阅作用域与本地状态
//!
use chrono::Utc;
use gastro_events::taxonomy::{
    DataRefreshRequested, Employee, EmployeeCreated, EmployeeDeleted, FinancialAccount,
    FinancialAccountCreated, InventoryItem, InventoryLowStock, RestaurantSelected, Transaction,
};
use gastro_events::AppEventBus;
use gastro_ui::{EventEmitter, EventScope, ListenerSlot};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// 人事页：维护员工列表，切换餐厅时清空
pub struct PersonnelPage {
    scope: EventScope,
    employees: Arc<Mutex<Vec<Employee>>>,
}

impl PersonnelPage {
    pub fn mount(bus: &AppEventBus) -> Self {
        let mut scope = EventScope::new(bus, "Personal");
        let employees = Arc::new(Mutex::new(Vec::new()));

        let list = employees.clone();
        scope.listen::<EmployeeCreated, _>(move |p| {
            list.lock()
                .map_err(|_| anyhow::anyhow!("employee list poisoned"))?
                .push(p.employee.clone());
            Ok(())
        });
        let list = employees.clone();
        scope.listen::<EmployeeDeleted, _>(move |p| {
            list.lock()
                .map_err(|_| anyhow::anyhow!("employee list poisoned"))?
                .retain(|e| e.id != p.employee_id);
            Ok(())
        });
        let list = employees.clone();
        scope.listen::<RestaurantSelected, _>(move |_| {
            list.lock()
                .map_err(|_| anyhow::anyhow!("employee list poisoned"))?
                .clear();
            Ok(())
        });

        Self { scope, employees }
    }

    /// REST 调用成功后的回调
    pub fn employee_saved(&self, employee: Employee) {
        let emitter = self.scope.emitter();
        let name = employee.display_name();
        emitter.emit_employee_created(employee);
        emitter.emit_success(format!("{name} angelegt"));
    }

    pub fn employee_save_failed(&self, reason: &str) {
        self.scope
            .emitter()
            .emit_error("Mitarbeiter konnte nicht gespeichert werden", Some(reason.to_string()));
    }

    pub fn employee_count(&self) -> usize {
        self.employees.lock().map(|list| list.len()).unwrap_or_default()
    }
}

/// 库存页：低库存时提醒
pub struct InventoryPage {
    scope: EventScope,
    items: Arc<Mutex<BTreeMap<String, InventoryItem>>>,
}

impl InventoryPage {
    pub fn mount(bus: &AppEventBus) -> Self {
        let mut scope = EventScope::new(bus, "Inventar");
        let items = Arc::new(Mutex::new(BTreeMap::new()));

        let warn = scope.emitter();
        scope.listen::<InventoryLowStock, _>(move |p| {
            warn.emit_warning(format!(
                "{} nur noch {} {}",
                p.item.name, p.item.quantity, p.item.unit
            ));
            Ok(())
        });

        Self { scope, items }
    }

    pub fn stock_changed(&self, item: InventoryItem) {
        if let Ok(mut items) = self.items.lock() {
            items.insert(item.id.clone(), item.clone());
        }
        self.scope.emitter().emit_inventory_item_updated(item);
    }

    pub fn low_stock_items(&self) -> Vec<String> {
        self.items
            .lock()
            .map(|items| {
                items
                    .values()
                    .filter(|i| i.is_low_stock())
                    .map(|i| i.name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// 财务页：账户变化与跨组件刷新请求都会触发重新加载
pub struct KontenPage {
    scope: EventScope,
    slot: ListenerSlot<String>,
    reloads: Arc<AtomicUsize>,
}

impl KontenPage {
    pub fn mount(bus: &AppEventBus) -> Self {
        let mut scope = EventScope::new(bus, "Konten");
        let reloads = Arc::new(AtomicUsize::new(0));

        let counter = reloads.clone();
        scope.listen::<DataRefreshRequested, _>(move |p| {
            if p.scope == "konten" || p.scope == "all" {
                counter.fetch_add(1, Ordering::Relaxed);
                tracing::info!(scope = %p.scope, reason = ?p.reason, "konten reloading");
            }
            Ok(())
        });

        Self {
            slot: ListenerSlot::new(bus),
            scope,
            reloads,
        }
    }

    /// 渲染：依赖当前餐厅，切换餐厅时重新绑定账户监听
    pub fn render(&mut self, restaurant_id: &str) {
        let counter = self.reloads.clone();
        let restaurant = restaurant_id.to_string();
        self.slot
            .sync::<FinancialAccountCreated, _>(restaurant_id.to_string(), move |p| {
                counter.fetch_add(1, Ordering::Relaxed);
                tracing::info!(%restaurant, account = %p.account.name, "konten reloading");
                Ok(())
            });
    }

    pub fn account_saved(&self, account: FinancialAccount) {
        let emitter = self.scope.emitter();
        emitter.emit_transaction_created(Transaction {
            id: format!("tx-{}", Utc::now().timestamp_millis()),
            account_id: account.id.clone(),
            amount_cents: account.balance_cents,
            description: Some("Eröffnungssaldo".into()),
        });
        emitter.emit_financial_account_created(account);
        emitter.emit_success("Konto gespeichert");
    }

    pub fn reloads(&self) -> usize {
        self.reloads.load(Ordering::Relaxed)
    }
}

/// 设置页：只发布，不订阅
pub fn settings_emitter(bus: &AppEventBus) -> EventEmitter {
    EventEmitter::new(bus, "Settings")
}
