use super::{Listener, ListenerId};
use crate::event::BusEvent;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

struct Entry<E: BusEvent> {
    id: ListenerId,
    listener: Listener<E>,
}

/// 种类 -> 监听器列表（按插入顺序，允许重复注册同一监听器）
pub(crate) struct Registry<E: BusEvent> {
    by_kind: HashMap<E::Kind, Vec<Entry<E>>>,
}

impl<E: BusEvent> Default for Registry<E> {
    fn default() -> Self {
        Self {
            by_kind: HashMap::new(),
        }
    }
}

impl<E: BusEvent> Registry<E> {
    pub(crate) fn insert(&mut self, kind: E::Kind, id: ListenerId, listener: Listener<E>) {
        self.by_kind
            .entry(kind)
            .or_default()
            .push(Entry { id, listener });
    }

    // 移除的监听器交还给调用方，在释放锁之后再析构：
    // 监听器闭包可能持有 Subscription，析构时会再次访问注册表

    /// 按注册项移除
    pub(crate) fn remove_by_id(&mut self, kind: E::Kind, id: ListenerId) -> Option<Listener<E>> {
        self.remove_where(kind, |e| e.id == id)
            .map(|(_, listener)| listener)
    }

    /// 按引用身份移除第一个匹配项
    pub(crate) fn remove_by_listener(
        &mut self,
        kind: E::Kind,
        listener: &Listener<E>,
    ) -> Option<(ListenerId, Listener<E>)> {
        self.remove_where(kind, |e| Arc::ptr_eq(&e.listener, listener))
    }

    fn remove_where(
        &mut self,
        kind: E::Kind,
        pred: impl Fn(&Entry<E>) -> bool,
    ) -> Option<(ListenerId, Listener<E>)> {
        let list = self.by_kind.get_mut(&kind)?;
        let pos = list.iter().position(pred)?;
        let removed = list.remove(pos);
        if list.is_empty() {
            self.by_kind.remove(&kind);
        }
        Some((removed.id, removed.listener))
    }

    /// 分发用的快照：拷贝出列表，分发期间注册表可被自由修改
    pub(crate) fn snapshot(&self, kind: E::Kind) -> Vec<(ListenerId, Listener<E>)> {
        self.by_kind
            .get(&kind)
            .map(|list| {
                list.iter()
                    .map(|e| (e.id, Arc::clone(&e.listener)))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn contains(&self, kind: E::Kind, id: ListenerId) -> bool {
        self.by_kind
            .get(&kind)
            .is_some_and(|list| list.iter().any(|e| e.id == id))
    }

    pub(crate) fn count(&self, kind: E::Kind) -> usize {
        self.by_kind.get(&kind).map_or(0, Vec::len)
    }

    pub(crate) fn total(&self) -> usize {
        self.by_kind.values().map(Vec::len).sum()
    }

    pub(crate) fn counts_by_kind(&self) -> BTreeMap<E::Kind, usize> {
        self.by_kind
            .iter()
            .map(|(kind, list)| (*kind, list.len()))
            .collect()
    }

    pub(crate) fn clear(&mut self) -> Vec<Listener<E>> {
        self.by_kind
            .drain()
            .flat_map(|(_, list)| list.into_iter().map(|e| e.listener))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::{AppEvent, AppEventKind};

    fn noop() -> Listener<AppEvent> {
        Arc::new(|_: &AppEvent| -> anyhow::Result<()> { Ok(()) })
    }

    #[test]
    fn duplicates_are_kept_and_removed_one_at_a_time() {
        let mut reg = Registry::<AppEvent>::default();
        let l = noop();
        reg.insert(AppEventKind::InfoMessage, ListenerId(1), l.clone());
        reg.insert(AppEventKind::InfoMessage, ListenerId(2), l.clone());
        assert_eq!(reg.count(AppEventKind::InfoMessage), 2);

        let (id, _) = reg
            .remove_by_listener(AppEventKind::InfoMessage, &l)
            .unwrap();
        assert_eq!(id, ListenerId(1));
        assert_eq!(reg.count(AppEventKind::InfoMessage), 1);
        assert!(reg.contains(AppEventKind::InfoMessage, ListenerId(2)));
    }

    #[test]
    fn empty_lists_are_dropped_from_counts() {
        let mut reg = Registry::<AppEvent>::default();
        reg.insert(AppEventKind::EmployeeCreated, ListenerId(7), noop());
        assert!(reg.remove_by_id(AppEventKind::EmployeeCreated, ListenerId(7)).is_some());
        assert!(reg.remove_by_id(AppEventKind::EmployeeCreated, ListenerId(7)).is_none());
        assert!(reg.counts_by_kind().is_empty());
        assert_eq!(reg.total(), 0);
    }

    #[test]
    fn removal_is_scoped_to_the_kind() {
        let mut reg = Registry::<AppEvent>::default();
        let l = noop();
        reg.insert(AppEventKind::ErrorOccurred, ListenerId(1), l.clone());
        assert!(reg.remove_by_listener(AppEventKind::InfoMessage, &l).is_none());
        assert_eq!(reg.count(AppEventKind::ErrorOccurred), 1);
    }
}
