//! 库存服务：带权限与校验的增删改，以及列表视图

use crate::{
    error::AppError,
    models::{
        item::{Category, InventoryItem, ItemField, ItemInput, Location},
        role::{Action, Module},
        view::{FilterCriteria, SortCriteria},
    },
    repository::{ItemRepository, ReferenceRepository},
    services::{permission_service::PermissionService, view_pipeline::ViewState},
};

pub struct InventoryService {
    permissions: PermissionService,
    items: ItemRepository,
    references: ReferenceRepository,
    view: ViewState,
}

impl InventoryService {
    pub fn new(permissions: PermissionService, items: ItemRepository) -> Self {
        metrics::gauge!("inventory_items").set(items.len() as f64);
        Self {
            permissions,
            items,
            references: ReferenceRepository::new(),
            view: ViewState::default(),
        }
    }

    // ==================== 写操作 ====================

    /// 新建条目（需要 registration:create）
    pub fn add_item(&mut self, input: ItemInput) -> Result<InventoryItem, AppError> {
        self.permissions
            .require_permission(Action::Create, Module::Registration)?;
        input.check()?;

        let actor = self.permissions.session().current_identity();
        let item = self.items.create(input, actor.as_ref())?;
        self.after_mutation("create");

        tracing::info!(
            item_id = %item.id,
            item_no = %item.item_no,
            created_by = %item.created_by,
            "Inventory item added"
        );
        Ok(item)
    }

    /// 更新条目（需要 registration:update）。id 不存在时静默忽略，返回 None
    pub fn update_item(&mut self, record: InventoryItem) -> Result<Option<InventoryItem>, AppError> {
        self.permissions
            .require_permission(Action::Update, Module::Registration)?;
        record.input().check()?;

        let updated = self.items.update(record);
        if let Some(item) = &updated {
            self.after_mutation("update");
            tracing::info!(item_id = %item.id, "Inventory item updated");
        }
        Ok(updated)
    }

    /// 删除条目（需要 registration:delete）。返回是否删除
    pub fn delete_item(&mut self, id: &str) -> Result<bool, AppError> {
        self.permissions
            .require_permission(Action::Delete, Module::Registration)?;

        let removed = self.items.delete(id);
        if removed {
            self.after_mutation("delete");
            tracing::info!(item_id = %id, "Inventory item deleted");
        }
        Ok(removed)
    }

    fn after_mutation(&mut self, kind: &'static str) {
        self.view.invalidate();
        metrics::counter!("inventory_item_mutations_total", "kind" => kind).increment(1);
        metrics::gauge!("inventory_items").set(self.items.len() as f64);
    }

    // ==================== 读操作 ====================

    /// 编辑视图使用：不存在时返回 NotFound
    pub fn get_item(&self, id: &str) -> Result<InventoryItem, AppError> {
        self.items
            .find(id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("inventory item {}", id)))
    }

    /// 权威集合，按插入顺序
    pub fn items(&self) -> &[InventoryItem] {
        self.items.list()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.find(id).is_some()
    }

    pub fn categories(&self) -> &'static [Category] {
        self.references.list_categories()
    }

    pub fn locations(&self) -> &'static [Location] {
        self.references.list_locations()
    }

    // ==================== 视图 ====================

    /// 过滤并排序后的列表
    pub fn visible_items(&mut self) -> &[InventoryItem] {
        self.view.visible(self.items.list())
    }

    pub fn filter(&self) -> &FilterCriteria {
        self.view.filter()
    }

    pub fn set_filter(&mut self, filter: FilterCriteria) {
        tracing::debug!(?filter, "Filter changed");
        self.view.set_filter(filter);
    }

    pub fn sort(&self) -> &SortCriteria {
        self.view.sort()
    }

    pub fn set_sort(&mut self, sort: SortCriteria) {
        self.view.set_sort(sort);
    }

    /// 点击列头排序
    pub fn toggle_sort(&mut self, field: ItemField) {
        let next = self.view.sort().toggled(field);
        self.view.set_sort(next);
    }

    pub fn select_all(&mut self) {
        self.view.select_all(self.items.list());
    }

    pub fn clear_selection(&mut self) {
        self.view.clear_selection();
    }

    pub fn set_selected(&mut self, id: &str, checked: bool) {
        self.view.set_selected(self.items.list(), id, checked);
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.view.is_selected(id)
    }

    pub fn selection_len(&self) -> usize {
        self.view.selection().len()
    }

    pub fn all_selected(&mut self) -> bool {
        self.view.all_selected(self.items.list())
    }

    /// 已选条目，按视图顺序
    pub fn selected_items(&mut self) -> Vec<InventoryItem> {
        self.view.selected_items(self.items.list())
    }

    pub fn permissions(&self) -> &PermissionService {
        &self.permissions
    }
}
