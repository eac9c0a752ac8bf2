//! 库存条目领域模型

use crate::error::{AppError, FieldErrors};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use validator::Validate;

/// 条目状态，声明顺序即排序顺序
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ItemStatus {
    #[default]
    Active,
    Inactive,
    Reserved,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Active => "Active",
            ItemStatus::Inactive => "Inactive",
            ItemStatus::Reserved => "Reserved",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Active" => Some(ItemStatus::Active),
            "Inactive" => Some(ItemStatus::Inactive),
            "Reserved" => Some(ItemStatus::Reserved),
            _ => None,
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 库存条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub item_no: String,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub quantity: f64,
    pub location: String,
    pub unit_price: f64,
    /// 恒为 `quantity * unit_price`，由仓储维护
    pub total_price: f64,
    pub status: ItemStatus,
    pub last_updated: DateTime<Utc>,
    /// 创建人显示名
    pub created_by: String,
}

impl InventoryItem {
    /// 可编辑部分，用于更新校验
    pub fn input(&self) -> ItemInput {
        ItemInput {
            item_no: self.item_no.clone(),
            name: self.name.clone(),
            category: self.category.clone(),
            unit: self.unit.clone(),
            quantity: self.quantity,
            location: self.location.clone(),
            unit_price: self.unit_price,
            status: self.status,
        }
    }
}

/// 新建条目输入：不含 id、时间戳、创建人与总价
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ItemInput {
    #[validate(length(min = 1, message = "Item No is required"))]
    pub item_no: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "Unit is required"))]
    pub unit: String,
    #[validate(range(min = 0.0, message = "Quantity must be 0 or greater"))]
    pub quantity: f64,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[validate(range(min = 0.0, message = "Unit price must be 0 or greater"))]
    pub unit_price: f64,
    #[serde(default)]
    pub status: ItemStatus,
}

impl ItemInput {
    pub fn total_price(&self) -> f64 {
        self.quantity * self.unit_price
    }

    /// 字段级校验，任一错误都会阻止写入
    pub fn check(&self) -> Result<(), AppError> {
        let mut fields = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => crate::error::field_messages(&e),
        };

        // range() 不拦截 NaN
        if !self.quantity.is_finite() {
            fields
                .entry("quantity".to_string())
                .or_insert_with(|| "Quantity must be 0 or greater".to_string());
        }
        if !self.unit_price.is_finite() {
            fields
                .entry("unitPrice".to_string())
                .or_insert_with(|| "Unit price must be 0 or greater".to_string());
        }
        // 两个有限值的乘积仍可能溢出
        if fields.is_empty() && !self.total_price().is_finite() {
            fields.insert(
                "totalPrice".to_string(),
                "Total price is too large".to_string(),
            );
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(fields))
        }
    }
}

/// 条目字段，用于排序与导出列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemField {
    Id,
    ItemNo,
    Name,
    Category,
    Unit,
    Quantity,
    Location,
    UnitPrice,
    TotalPrice,
    Status,
    LastUpdated,
    CreatedBy,
}

impl ItemField {
    pub const ALL: [ItemField; 12] = [
        ItemField::Id,
        ItemField::ItemNo,
        ItemField::Name,
        ItemField::Category,
        ItemField::Unit,
        ItemField::Quantity,
        ItemField::Location,
        ItemField::UnitPrice,
        ItemField::TotalPrice,
        ItemField::Status,
        ItemField::LastUpdated,
        ItemField::CreatedBy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemField::Id => "id",
            ItemField::ItemNo => "itemNo",
            ItemField::Name => "name",
            ItemField::Category => "category",
            ItemField::Unit => "unit",
            ItemField::Quantity => "quantity",
            ItemField::Location => "location",
            ItemField::UnitPrice => "unitPrice",
            ItemField::TotalPrice => "totalPrice",
            ItemField::Status => "status",
            ItemField::LastUpdated => "lastUpdated",
            ItemField::CreatedBy => "createdBy",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == value)
    }

    /// 按该字段的自然升序比较
    pub fn compare(&self, a: &InventoryItem, b: &InventoryItem) -> Ordering {
        match self {
            ItemField::Id => a.id.cmp(&b.id),
            ItemField::ItemNo => a.item_no.cmp(&b.item_no),
            ItemField::Name => a.name.cmp(&b.name),
            ItemField::Category => a.category.cmp(&b.category),
            ItemField::Unit => a.unit.cmp(&b.unit),
            ItemField::Quantity => a.quantity.total_cmp(&b.quantity),
            ItemField::Location => a.location.cmp(&b.location),
            ItemField::UnitPrice => a.unit_price.total_cmp(&b.unit_price),
            ItemField::TotalPrice => a.total_price.total_cmp(&b.total_price),
            ItemField::Status => a.status.cmp(&b.status),
            ItemField::LastUpdated => a.last_updated.cmp(&b.last_updated),
            ItemField::CreatedBy => a.created_by.cmp(&b.created_by),
        }
    }

    /// 字段值（JSON），用于导出
    pub fn value(&self, item: &InventoryItem) -> serde_json::Value {
        use serde_json::json;
        match self {
            ItemField::Id => json!(item.id),
            ItemField::ItemNo => json!(item.item_no),
            ItemField::Name => json!(item.name),
            ItemField::Category => json!(item.category),
            ItemField::Unit => json!(item.unit),
            ItemField::Quantity => json!(item.quantity),
            ItemField::Location => json!(item.location),
            ItemField::UnitPrice => json!(item.unit_price),
            ItemField::TotalPrice => json!(item.total_price),
            ItemField::Status => json!(item.status),
            ItemField::LastUpdated => json!(item.last_updated.to_rfc3339()),
            ItemField::CreatedBy => json!(item.created_by),
        }
    }
}

impl fmt::Display for ItemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 条目分类（参考数据）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// 存放位置（参考数据）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ItemInput {
        ItemInput {
            item_no: "TL002".to_string(),
            name: "Hammer".to_string(),
            category: "Tools".to_string(),
            unit: "Piece".to_string(),
            quantity: 8.0,
            location: "Remote Site".to_string(),
            unit_price: 120.0,
            status: ItemStatus::Active,
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(input().check().is_ok());
    }

    #[test]
    fn test_missing_fields_reported_per_field() {
        let mut candidate = input();
        candidate.item_no.clear();
        candidate.location.clear();

        match candidate.check() {
            Err(AppError::Validation(fields)) => {
                assert_eq!(fields.get("itemNo").map(String::as_str), Some("Item No is required"));
                assert_eq!(fields.get("location").map(String::as_str), Some("Location is required"));
                assert_eq!(fields.len(), 2);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_and_nan_amounts_rejected() {
        let mut candidate = input();
        candidate.quantity = -1.0;
        candidate.unit_price = f64::NAN;

        match candidate.check() {
            Err(AppError::Validation(fields)) => {
                assert!(fields.contains_key("quantity"));
                assert!(fields.contains_key("unitPrice"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_total_rejected() {
        let mut candidate = input();
        candidate.quantity = 1e200;
        candidate.unit_price = 1e200;

        match candidate.check() {
            Err(AppError::Validation(fields)) => {
                assert_eq!(
                    fields.get("totalPrice").map(String::as_str),
                    Some("Total price is too large")
                );
                assert_eq!(fields.len(), 1);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_status_order_is_lexicographic() {
        assert!(ItemStatus::Active < ItemStatus::Inactive);
        assert!(ItemStatus::Inactive < ItemStatus::Reserved);
    }

    #[test]
    fn test_field_parse() {
        assert_eq!(ItemField::parse("unitPrice"), Some(ItemField::UnitPrice));
        assert_eq!(ItemField::parse("price"), None);
    }
}
