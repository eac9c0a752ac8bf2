//! Item repository (库存条目数据访问)
//!
//! 内存中的权威集合。计算字段由仓储负责：
//! `total_price`、`last_updated` 与 `created_by` 从不采用调用方传入的值。

use crate::{
    error::AppError,
    models::{
        item::{InventoryItem, ItemInput, ItemStatus},
        user::Identity,
    },
};
use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use uuid::Uuid;

#[rustfmt::skip]
static SEED_ITEMS: Lazy<Vec<InventoryItem>> = Lazy::new(|| {
    vec![
        seed("1", "EL001", "Laptop Dell XPS 13", "Electronics", "Piece", 15.0, "Warehouse A", 1200.0, ItemStatus::Active, date(2023, 5, 15), "TP Admin"),
        seed("2", "FU001", "Office Chair", "Furniture", "Piece", 30.0, "Warehouse B", 150.0, ItemStatus::Active, date(2023, 6, 20), "TP Operation"),
        seed("3", "OS001", "Printer Paper", "Office Supplies", "Box", 50.0, "Office Building 1", 25.0, ItemStatus::Active, date(2023, 7, 10), "TP SITE"),
        seed("4", "NW001", "Network Switch", "Networking", "Piece", 5.0, "Office Building 2", 350.0, ItemStatus::Reserved, date(2023, 8, 5), "TP Admin"),
        seed("5", "TL001", "Power Drill", "Tools", "Piece", 8.0, "Remote Site", 120.0, ItemStatus::Inactive, date(2023, 9, 12), "TP Operation"),
    ]
});

#[allow(clippy::too_many_arguments)]
fn seed(
    id: &str,
    item_no: &str,
    name: &str,
    category: &str,
    unit: &str,
    quantity: f64,
    location: &str,
    unit_price: f64,
    status: ItemStatus,
    last_updated: DateTime<Utc>,
    created_by: &str,
) -> InventoryItem {
    InventoryItem {
        id: id.to_string(),
        item_no: item_no.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        unit: unit.to_string(),
        quantity,
        location: location.to_string(),
        unit_price,
        total_price: quantity * unit_price,
        status,
        last_updated,
        created_by: created_by.to_string(),
    }
}

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

#[derive(Debug, Clone, Default)]
pub struct ItemRepository {
    items: Vec<InventoryItem>,
}

impl ItemRepository {
    /// 空集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 五条演示数据
    pub fn seeded() -> Self {
        Self::from_items(SEED_ITEMS.clone())
    }

    pub fn from_items(items: Vec<InventoryItem>) -> Self {
        Self { items }
    }

    /// 创建条目
    pub fn create(
        &mut self,
        input: ItemInput,
        actor: Option<&Identity>,
    ) -> Result<InventoryItem, AppError> {
        let actor = actor.ok_or(AppError::Unauthenticated)?;

        let item = InventoryItem {
            id: Uuid::new_v4().to_string(),
            total_price: input.total_price(),
            item_no: input.item_no,
            name: input.name,
            category: input.category,
            unit: input.unit,
            quantity: input.quantity,
            location: input.location,
            unit_price: input.unit_price,
            status: input.status,
            last_updated: Utc::now(),
            created_by: actor.display_name.clone(),
        };

        self.items.push(item.clone());

        tracing::debug!(item_id = %item.id, item_no = %item.item_no, "Item created");
        Ok(item)
    }

    /// 更新条目（整条替换）。id 不存在时不做任何修改并返回 None
    pub fn update(&mut self, record: InventoryItem) -> Option<InventoryItem> {
        let Some(existing) = self.items.iter_mut().find(|item| item.id == record.id) else {
            tracing::debug!(item_id = %record.id, "Update ignored, item not found");
            return None;
        };

        let created_by = std::mem::take(&mut existing.created_by);
        *existing = InventoryItem {
            total_price: record.quantity * record.unit_price,
            last_updated: Utc::now(),
            created_by,
            ..record
        };

        Some(existing.clone())
    }

    /// 删除条目。返回是否删除了记录
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        if !removed {
            tracing::debug!(item_id = %id, "Delete ignored, item not found");
        }
        removed
    }

    pub fn find(&self, id: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// 按插入顺序
    pub fn list(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
