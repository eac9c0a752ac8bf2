//! 列表视图的过滤与排序条件

use crate::models::item::{ItemField, ItemStatus};
use serde::{Deserialize, Serialize};

pub const ALL_CATEGORIES: &str = "all-categories";
pub const ALL_STATUSES: &str = "all-statuses";
pub const ALL_LOCATIONS: &str = "all-locations";

/// 列表过滤条件。`None` 或空搜索表示不限制
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// 在编号或名称中做忽略大小写的子串匹配
    #[serde(default)]
    pub search: String,
    pub category: Option<String>,
    pub status: Option<ItemStatus>,
    pub location: Option<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.category.is_none()
            && self.status.is_none()
            && self.location.is_none()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// 接受下拉框原始值；"" 与 "all-categories" 表示不限制
    pub fn with_category(mut self, value: &str) -> Self {
        self.category = constraint(value, ALL_CATEGORIES);
        self
    }

    pub fn with_location(mut self, value: &str) -> Self {
        self.location = constraint(value, ALL_LOCATIONS);
        self
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// 状态下拉框原始值；未知状态返回 `None`
    pub fn with_status_value(mut self, value: &str) -> Option<Self> {
        self.status = match constraint(value, ALL_STATUSES) {
            None => None,
            Some(v) => Some(ItemStatus::parse(&v)?),
        };
        Some(self)
    }
}

fn constraint(value: &str, sentinel: &str) -> Option<String> {
    if value.is_empty() || value == sentinel {
        None
    } else {
        Some(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// 视图排序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortCriteria {
    pub field: Option<ItemField>,
    pub direction: SortDirection,
}

impl SortCriteria {
    /// 保持集合原有顺序
    pub fn none() -> Self {
        Self {
            field: None,
            direction: SortDirection::Asc,
        }
    }

    pub fn asc(field: ItemField) -> Self {
        Self {
            field: Some(field),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: ItemField) -> Self {
        Self {
            field: Some(field),
            direction: SortDirection::Desc,
        }
    }

    /// 点击列头：同一列升序时切换为降序，否则升序
    pub fn toggled(&self, field: ItemField) -> Self {
        if self.field == Some(field) && self.direction == SortDirection::Asc {
            Self::desc(field)
        } else {
            Self::asc(field)
        }
    }
}

impl Default for SortCriteria {
    /// 默认按最近更新时间倒序
    fn default() -> Self {
        Self::desc(ItemField::LastUpdated)
    }
}
