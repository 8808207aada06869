use gastro_events::taxonomy::*;
use gastro_events::{AppEvent, AppEventBus, EventPayload};

/// 具名发布器：每个事件种类一个方法，负责拼装正确形状的载荷
///
/// 提示消息的来源组件取自构造时的 `component`。
#[derive(Clone, Debug)]
pub struct EventEmitter {
    bus: AppEventBus,
    component: String,
}

impl EventEmitter {
    pub fn new(bus: &AppEventBus, component: impl Into<String>) -> Self {
        Self {
            bus: bus.clone(),
            component: component.into(),
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    /// 换一个来源组件名
    pub fn with_component(&self, component: impl Into<String>) -> Self {
        Self::new(&self.bus, component)
    }

    pub fn emit(&self, event: impl Into<AppEvent>) {
        self.bus.emit(event.into());
    }

    pub fn publish<P: EventPayload<AppEvent>>(&self, payload: P) {
        self.bus.publish(payload);
    }

    // --- 餐厅 ---

    pub fn emit_restaurant_selected(&self, restaurant_id: impl Into<String>, name: Option<String>) {
        self.publish(RestaurantSelected {
            restaurant_id: restaurant_id.into(),
            restaurant_name: name,
        });
    }

    pub fn emit_restaurant_created(&self, restaurant: Restaurant) {
        self.publish(RestaurantCreated { restaurant });
    }

    pub fn emit_restaurant_updated(&self, restaurant: Restaurant) {
        self.publish(RestaurantUpdated { restaurant });
    }

    pub fn emit_restaurant_deleted(&self, restaurant_id: impl Into<String>) {
        self.publish(RestaurantDeleted {
            restaurant_id: restaurant_id.into(),
        });
    }

    // --- 客户与收款 ---

    pub fn emit_client_created(&self, client: Client) {
        self.publish(ClientCreated { client });
    }

    pub fn emit_client_updated(&self, client: Client) {
        self.publish(ClientUpdated { client });
    }

    pub fn emit_payment_recorded(&self, payment: Payment) {
        self.publish(PaymentRecorded { payment });
    }

    // --- 人事 ---

    pub fn emit_employee_created(&self, employee: Employee) {
        self.publish(EmployeeCreated { employee });
    }

    pub fn emit_employee_updated(&self, employee: Employee) {
        self.publish(EmployeeUpdated { employee });
    }

    pub fn emit_employee_deleted(&self, employee_id: impl Into<String>) {
        self.publish(EmployeeDeleted {
            employee_id: employee_id.into(),
        });
    }

    // --- 财务 ---

    pub fn emit_financial_account_created(&self, account: FinancialAccount) {
        self.publish(FinancialAccountCreated { account });
    }

    pub fn emit_financial_account_updated(&self, account: FinancialAccount) {
        self.publish(FinancialAccountUpdated { account });
    }

    pub fn emit_financial_account_deleted(&self, account_id: impl Into<String>) {
        self.publish(FinancialAccountDeleted {
            account_id: account_id.into(),
        });
    }

    pub fn emit_transaction_created(&self, transaction: Transaction) {
        self.publish(TransactionCreated { transaction });
    }

    // --- 日历 ---

    pub fn emit_calendar_event_created(&self, event: CalendarEvent) {
        self.publish(CalendarEventCreated { event });
    }

    pub fn emit_calendar_event_updated(&self, event: CalendarEvent) {
        self.publish(CalendarEventUpdated { event });
    }

    pub fn emit_calendar_event_deleted(&self, event_id: impl Into<String>) {
        self.publish(CalendarEventDeleted {
            event_id: event_id.into(),
        });
    }

    // --- 库存与采购 ---

    pub fn emit_inventory_item_created(&self, item: InventoryItem) {
        self.publish(InventoryItemCreated { item });
    }

    /// 更新后若低于最低库存，紧接着发布 `INVENTORY_LOW_STOCK`
    pub fn emit_inventory_item_updated(&self, item: InventoryItem) {
        let low = item.is_low_stock();
        self.publish(InventoryItemUpdated { item: item.clone() });
        if low {
            self.emit_inventory_low_stock(item);
        }
    }

    pub fn emit_inventory_low_stock(&self, item: InventoryItem) {
        self.publish(InventoryLowStock { item });
    }

    pub fn emit_purchase_created(&self, purchase: Purchase) {
        self.publish(PurchaseCreated { purchase });
    }

    // --- 跨组件刷新 ---

    pub fn emit_data_refresh(&self, scope: impl Into<String>, reason: Option<String>) {
        self.publish(DataRefreshRequested {
            scope: scope.into(),
            reason,
        });
    }

    // --- 提示消息 ---

    pub fn emit_success(&self, message: impl Into<String>) {
        self.publish(SuccessMessage {
            message: message.into(),
            component: self.component.clone(),
        });
    }

    pub fn emit_error(&self, message: impl Into<String>, details: Option<String>) {
        self.publish(ErrorOccurred {
            message: message.into(),
            component: self.component.clone(),
            details,
        });
    }

    pub fn emit_warning(&self, message: impl Into<String>) {
        self.publish(WarningMessage {
            message: message.into(),
            component: self.component.clone(),
        });
    }

    pub fn emit_info(&self, message: impl Into<String>) {
        self.publish(InfoMessage {
            message: message.into(),
            component: self.component.clone(),
        });
    }
}
