//! gastro 事件分类宏
//!
//! 目前只提供 `#[app_event]`：把一个由 `Variant(Payload)` 组成的枚举变成封闭的事件分类，
//! 生成配套的 `Kind` 枚举、`BusEvent` 与 `EventPayload` 实现。
//!
use proc_macro::TokenStream;

mod app_event;
mod utils;

/// 事件分类宏
///
/// 仅支持形如：
/// ```ignore
/// #[app_event(kind = AppEventKind)]
/// pub enum AppEvent {
///     EmployeeCreated(EmployeeCreated),
///     #[event(kind = "DATA_REFRESH")]
///     DataRefreshRequested(DataRefreshRequested),
/// }
/// ```
/// 的单字段元组变体，每个变体携带一个独立的载荷类型。
///
/// - 合并派生：`Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize`
/// - `#[app_event(kind = Name)]` 指定配套 Kind 枚举名，默认 `<Enum>Kind`
/// - 变体可通过 `#[event(kind = "...")]` 覆写线上名称，默认取变体名的 SCREAMING_SNAKE_CASE
/// - 为枚举实现 `::gastro_events::BusEvent`，为每个载荷实现
///   `::gastro_events::EventPayload<Enum>` 与 `From<Payload> for Enum`
#[proc_macro_attribute]
pub fn app_event(attr: TokenStream, item: TokenStream) -> TokenStream {
    app_event::expand(attr, item)
}
