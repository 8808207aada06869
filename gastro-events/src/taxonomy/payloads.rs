//! 事件载荷：每个事件种类对应一个独立类型
//!
use super::records::{
    CalendarEvent, Client, Employee, FinancialAccount, InventoryItem, Payment, Purchase,
    Restaurant, Transaction,
};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// 餐厅
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSelected {
    pub restaurant_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantCreated {
    pub restaurant: Restaurant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantUpdated {
    pub restaurant: Restaurant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDeleted {
    pub restaurant_id: String,
}

// ---------------------------------------------------------------------------
// 客户与收款
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientCreated {
    pub client: Client,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientUpdated {
    pub client: Client,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecorded {
    pub payment: Payment,
}

// ---------------------------------------------------------------------------
// 人事
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeCreated {
    pub employee: Employee,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeUpdated {
    pub employee: Employee,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDeleted {
    pub employee_id: String,
}

// ---------------------------------------------------------------------------
// 财务
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialAccountCreated {
    pub account: FinancialAccount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialAccountUpdated {
    pub account: FinancialAccount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialAccountDeleted {
    pub account_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionCreated {
    pub transaction: Transaction,
}

// ---------------------------------------------------------------------------
// 日历
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEventCreated {
    pub event: CalendarEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEventUpdated {
    pub event: CalendarEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventDeleted {
    pub event_id: String,
}

// ---------------------------------------------------------------------------
// 库存与采购
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItemCreated {
    pub item: InventoryItem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItemUpdated {
    pub item: InventoryItem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryLowStock {
    pub item: InventoryItem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseCreated {
    pub purchase: Purchase,
}

// ---------------------------------------------------------------------------
// 跨组件刷新
// ---------------------------------------------------------------------------

/// 请求某一数据域重新拉取，`scope` 例如 `"employees"`、`"inventory"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRefreshRequested {
    pub scope: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

// ---------------------------------------------------------------------------
// 提示消息
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessMessage {
    pub message: String,
    pub component: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorOccurred {
    pub message: String,
    pub component: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningMessage {
    pub message: String,
    pub component: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoMessage {
    pub message: String,
    pub component: String,
}
