//! 事件与载荷协议
//!
//! `BusEvent` 描述一个封闭的事件集合：每个事件值都能报告自己的种类；
//! `EventPayload` 把单个载荷类型与其唯一的种类绑定，从而在编译期保证
//! “某种类的每次发布都携带符合该种类声明形状的载荷”。
//!
//! 两者通常由 `#[app_event]` 生成，无需手写。
//!
use std::fmt;
use std::hash::Hash;

/// 可在总线上传递的事件集合
pub trait BusEvent: Clone + fmt::Debug + Send + Sync + 'static {
    /// 事件种类：封闭、可比较、可作为注册表键
    type Kind: Copy + Eq + Hash + Ord + fmt::Debug + fmt::Display + Send + Sync + 'static;

    fn kind(&self) -> Self::Kind;
}

/// 绑定到唯一事件种类的载荷类型
pub trait EventPayload<E: BusEvent>: Sized + Send + Sync + 'static {
    const KIND: E::Kind;

    /// 事件种类匹配时借出载荷
    fn from_event(event: &E) -> Option<&Self>;

    fn into_event(self) -> E;
}
