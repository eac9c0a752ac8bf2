//! 视图管道：过滤、排序与选择
//!
//! `derive` 是纯函数：相同的条目与条件总是得到相同的列表。
//! `ViewState` 缓存结果，直到集合或条件变化。

use crate::models::{
    item::InventoryItem,
    view::{FilterCriteria, SortCriteria, SortDirection},
};
use std::collections::BTreeSet;

/// 先过滤，再稳定排序
pub fn derive(
    items: &[InventoryItem],
    filter: &FilterCriteria,
    sort: &SortCriteria,
) -> Vec<InventoryItem> {
    let mut result: Vec<InventoryItem> = items
        .iter()
        .filter(|item| matches(item, filter))
        .cloned()
        .collect();

    if let Some(field) = sort.field {
        // sort_by 为稳定排序，相等元素保持原有相对顺序
        result.sort_by(|a, b| {
            let ord = field.compare(a, b);
            match sort.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
    }

    result
}

/// 所有生效的条件都须满足
pub fn matches(item: &InventoryItem, filter: &FilterCriteria) -> bool {
    matches_search(item, &filter.search)
        && filter.category.as_ref().map_or(true, |c| &item.category == c)
        && filter.status.map_or(true, |s| item.status == s)
        && filter.location.as_ref().map_or(true, |l| &item.location == l)
}

fn matches_search(item: &InventoryItem, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    item.item_no.to_lowercase().contains(&needle) || item.name.to_lowercase().contains(&needle)
}

/// 列表视图的条件、选择与缓存结果
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    filter: FilterCriteria,
    sort: SortCriteria,
    selection: BTreeSet<String>,
    cache: Option<Vec<InventoryItem>>,
}

impl ViewState {
    pub fn new(filter: FilterCriteria, sort: SortCriteria) -> Self {
        Self {
            filter,
            sort,
            selection: BTreeSet::new(),
            cache: None,
        }
    }

    pub fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    pub fn sort(&self) -> &SortCriteria {
        &self.sort
    }

    pub fn set_filter(&mut self, filter: FilterCriteria) {
        if self.filter != filter {
            self.filter = filter;
            self.invalidate();
        }
    }

    pub fn set_sort(&mut self, sort: SortCriteria) {
        if self.sort != sort {
            self.sort = sort;
            self.invalidate();
        }
    }

    /// 丢弃缓存，下次读取时重新计算
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    pub fn is_stale(&self) -> bool {
        self.cache.is_none()
    }

    /// `items` 的派生列表，仅在失效后重新计算。
    /// 每次重新计算都会移除已不在视图中的选择。
    pub fn visible<'a>(&'a mut self, items: &[InventoryItem]) -> &'a [InventoryItem] {
        if self.is_stale() {
            let derived = derive(items, &self.filter, &self.sort);
            let before = self.selection.len();
            self.selection
                .retain(|id| derived.iter().any(|item| &item.id == id));
            if self.selection.len() != before {
                tracing::debug!(
                    dropped = before - self.selection.len(),
                    "Purged stale selection"
                );
            }
            self.cache = Some(derived);
        }
        self.cache.as_deref().unwrap_or_default()
    }

    /// 全选当前视图
    pub fn select_all(&mut self, items: &[InventoryItem]) {
        let ids: BTreeSet<String> = self.visible(items).iter().map(|i| i.id.clone()).collect();
        self.selection = ids;
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// 勾选或取消一行；视图外的 id 被忽略
    pub fn set_selected(&mut self, items: &[InventoryItem], id: &str, checked: bool) {
        if !checked {
            self.selection.remove(id);
            return;
        }
        if self.visible(items).iter().any(|item| item.id == id) {
            self.selection.insert(id.to_string());
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    pub fn selection(&self) -> &BTreeSet<String> {
        &self.selection
    }

    /// 非空视图中所有行均已选中
    pub fn all_selected(&mut self, items: &[InventoryItem]) -> bool {
        let visible = self.visible(items).len();
        visible > 0 && self.selection.len() == visible
    }

    /// 已选条目，按视图顺序
    pub fn selected_items(&mut self, items: &[InventoryItem]) -> Vec<InventoryItem> {
        let selection = self.selection.clone();
        self.visible(items)
            .iter()
            .filter(|item| selection.contains(&item.id))
            .cloned()
            .collect()
    }
}
