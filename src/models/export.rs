//! 导出请求与回执模型

use crate::models::{item::ItemField, item::InventoryItem, view::FilterCriteria};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Excel,
    Pdf,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "excel",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "excel" => Some(ExportFormat::Excel),
            "pdf" => Some(ExportFormat::Pdf),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 导出范围
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportScope {
    /// 全部条目，忽略过滤条件
    All,
    /// 当前过滤后的视图
    #[default]
    Filtered,
    /// 当前视图中已选条目；未选择时导出整个视图
    Selected,
}

/// 导出列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportColumns(BTreeSet<ItemField>);

impl ExportColumns {
    pub fn new(fields: impl IntoIterator<Item = ItemField>) -> Self {
        Self(fields.into_iter().collect())
    }

    pub fn contains(&self, field: ItemField) -> bool {
        self.0.contains(&field)
    }

    pub fn include(&mut self, field: ItemField, included: bool) {
        if included {
            self.0.insert(field);
        } else {
            self.0.remove(&field);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = ItemField> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 按列名投影单条记录
    pub fn project(&self, item: &InventoryItem) -> serde_json::Map<String, serde_json::Value> {
        self.iter()
            .map(|field| (field.as_str().to_string(), field.value(item)))
            .collect()
    }
}

impl Default for ExportColumns {
    /// 除 id 与创建人外的全部列
    fn default() -> Self {
        Self::new(
            ItemField::ALL
                .into_iter()
                .filter(|f| !matches!(f, ItemField::Id | ItemField::CreatedBy)),
        )
    }
}

/// 用户选择的导出设置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub scope: ExportScope,
    pub format: ExportFormat,
    pub columns: ExportColumns,
}

/// 导出目标收到的数据
#[derive(Debug, Clone, Copy)]
pub struct ExportBatch<'a> {
    pub records: &'a [InventoryItem],
    pub filter: &'a FilterCriteria,
    pub format: ExportFormat,
    pub columns: &'a ExportColumns,
}

/// 导出回执
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportReceipt {
    pub item_count: usize,
    pub format: ExportFormat,
    pub exported_at: DateTime<Utc>,
}
