//! 事件分类（Event Taxonomy）
//!
//! 餐厅后台的全部事件词汇。种类与载荷形状在编译期确定：新增种类需扩展 `AppEvent`，
//! 删除种类对所有生产方/消费方都是破坏性变更。
//!
//! 线上格式为相邻标签：`{"kind": "EMPLOYEE_CREATED", "payload": {...}}`。

mod payloads;
mod records;

pub use payloads::*;
pub use records::*;

use gastro_macros::app_event;

#[app_event(kind = AppEventKind)]
#[serde(tag = "kind", content = "payload")]
pub enum AppEvent {
    // --- 餐厅 ---
    RestaurantSelected(RestaurantSelected),
    RestaurantCreated(RestaurantCreated),
    RestaurantUpdated(RestaurantUpdated),
    RestaurantDeleted(RestaurantDeleted),

    // --- 客户与收款 ---
    ClientCreated(ClientCreated),
    ClientUpdated(ClientUpdated),
    PaymentRecorded(PaymentRecorded),

    // --- 人事 ---
    EmployeeCreated(EmployeeCreated),
    EmployeeUpdated(EmployeeUpdated),
    EmployeeDeleted(EmployeeDeleted),

    // --- 财务 ---
    FinancialAccountCreated(FinancialAccountCreated),
    FinancialAccountUpdated(FinancialAccountUpdated),
    FinancialAccountDeleted(FinancialAccountDeleted),
    TransactionCreated(TransactionCreated),

    // --- 日历 ---
    CalendarEventCreated(CalendarEventCreated),
    CalendarEventUpdated(CalendarEventUpdated),
    CalendarEventDeleted(CalendarEventDeleted),

    // --- 库存与采购 ---
    InventoryItemCreated(InventoryItemCreated),
    InventoryItemUpdated(InventoryItemUpdated),
    InventoryLowStock(InventoryLowStock),
    PurchaseCreated(PurchaseCreated),

    // --- 跨组件刷新 ---
    #[event(kind = "DATA_REFRESH")]
    DataRefreshRequested(DataRefreshRequested),

    // --- 提示消息 ---
    SuccessMessage(SuccessMessage),
    ErrorOccurred(ErrorOccurred),
    WarningMessage(WarningMessage),
    InfoMessage(InfoMessage),
}

impl AppEventKind {
    /// 通知中心关注的四种提示消息
    pub const MESSAGES: [AppEventKind; 4] = [
        AppEventKind::SuccessMessage,
        AppEventKind::ErrorOccurred,
        AppEventKind::WarningMessage,
        AppEventKind::InfoMessage,
    ];

    pub fn is_message(self) -> bool {
        Self::MESSAGES.contains(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BusEvent, EventPayload};

    #[test]
    fn kinds_use_screaming_snake_wire_names() {
        assert_eq!(AppEventKind::EmployeeCreated.as_str(), "EMPLOYEE_CREATED");
        assert_eq!(AppEventKind::InventoryLowStock.to_string(), "INVENTORY_LOW_STOCK");
        assert_eq!(AppEventKind::DataRefreshRequested.as_str(), "DATA_REFRESH");
        assert_eq!(
            "FINANCIAL_ACCOUNT_CREATED".parse::<AppEventKind>().unwrap(),
            AppEventKind::FinancialAccountCreated
        );
        assert!("NOT_A_KIND".parse::<AppEventKind>().is_err());
    }

    #[test]
    fn all_kinds_are_listed_once_in_declaration_order() {
        assert_eq!(AppEventKind::ALL.len(), 26);
        assert_eq!(AppEventKind::ALL[0], AppEventKind::RestaurantSelected);
        assert_eq!(AppEventKind::ALL[25], AppEventKind::InfoMessage);
        let mut names: Vec<&str> = AppEventKind::ALL.iter().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), AppEventKind::ALL.len());
    }

    #[test]
    fn payload_is_bound_to_exactly_one_kind() {
        let event: AppEvent = SuccessMessage {
            message: "Saved".into(),
            component: "Konten".into(),
        }
        .into();

        assert_eq!(event.kind(), AppEventKind::SuccessMessage);
        assert_eq!(SuccessMessage::KIND, AppEventKind::SuccessMessage);
        assert!(SuccessMessage::from_event(&event).is_some());
        assert!(ErrorOccurred::from_event(&event).is_none());
    }

    #[test]
    fn events_serialize_with_adjacent_kind_tag() {
        let event = EmployeeCreated {
            employee: Employee {
                id: "1".into(),
                first_name: "Anna".into(),
                ..Default::default()
            },
        }
        .into_event();

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "EMPLOYEE_CREATED",
                "payload": {"employee": {"id": "1", "firstName": "Anna"}}
            })
        );

        let back: AppEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn message_kinds_are_recognised() {
        assert!(AppEventKind::ErrorOccurred.is_message());
        assert!(!AppEventKind::EmployeeCreated.is_message());
    }
}
