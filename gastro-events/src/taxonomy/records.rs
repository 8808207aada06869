//! 事件载荷中引用的业务记录
//!
//! 只保留监听方刷新或展示所需的标识与显示字段，不是完整的 CRUD 实体。
//!
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub client_id: String,
    pub amount_cents: i64,
    pub currency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl Employee {
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialAccount {
    pub id: String,
    pub name: String,
    /// 账户类别，例如 `bank`、`cash`、`credit`
    pub account_type: String,
    pub balance_cents: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub amount_cents: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub starts_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    /// 低于或等于该值即视为库存不足
    pub min_quantity: f64,
}

impl InventoryItem {
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_quantity
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: String,
    pub supplier: String,
    pub total_cents: i64,
    pub item_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_stock_threshold_is_inclusive() {
        let mut item = InventoryItem {
            id: "i-1".into(),
            name: "Mehl".into(),
            quantity: 5.0,
            unit: "kg".into(),
            min_quantity: 5.0,
        };
        assert!(item.is_low_stock());
        item.quantity = 5.5;
        assert!(!item.is_low_stock());
    }

    #[test]
    fn employee_uses_camel_case_on_the_wire() {
        let employee: Employee =
            serde_json::from_value(serde_json::json!({"id": "1", "firstName": "Anna"})).unwrap();
        assert_eq!(employee.first_name, "Anna");
        assert_eq!(employee.last_name, None);
        assert_eq!(employee.display_name(), "Anna");
        assert_eq!(
            serde_json::to_value(&employee).unwrap(),
            serde_json::json!({"id": "1", "firstName": "Anna"})
        );
    }
}
