//! 导出服务
//!
//! 判断当前用户可导出的条目，并交给 `ExportSink`。
//! 文件内容由导出目标负责。

use crate::{
    error::AppError,
    models::{
        export::{ExportBatch, ExportReceipt, ExportRequest, ExportScope},
        item::InventoryItem,
        role::{Action, ExportCapability, Module},
    },
    services::inventory_service::InventoryService,
};
use chrono::Utc;
use std::sync::Arc;

/// 导出目标：根据一批条目生成可下载文件
pub trait ExportSink: Send + Sync {
    fn write(&self, batch: ExportBatch<'_>) -> Result<ExportReceipt, AppError>;
}

/// 只记录日志、不生成文件的导出目标
#[derive(Debug, Clone, Copy, Default)]
pub struct LogExportSink;

impl ExportSink for LogExportSink {
    fn write(&self, batch: ExportBatch<'_>) -> Result<ExportReceipt, AppError> {
        tracing::info!(
            count = batch.records.len(),
            format = %batch.format,
            filter = ?batch.filter,
            "Exporting items"
        );

        if tracing::enabled!(tracing::Level::DEBUG) {
            let rows: Vec<_> = batch
                .records
                .iter()
                .map(|item| batch.columns.project(item))
                .collect();
            let payload = serde_json::to_string(&rows)?;
            tracing::debug!(rows = %payload, "Export payload");
        }

        Ok(ExportReceipt {
            item_count: batch.records.len(),
            format: batch.format,
            exported_at: Utc::now(),
        })
    }
}

pub struct ExportService {
    sink: Arc<dyn ExportSink>,
}

impl ExportService {
    pub fn new(sink: Arc<dyn ExportSink>) -> Self {
        Self { sink }
    }

    /// 导出。全量导出需要 export:read；仅有 export:export 时只能导出过滤结果
    pub fn export(
        &self,
        inventory: &mut InventoryService,
        request: &ExportRequest,
    ) -> Result<ExportReceipt, AppError> {
        if !inventory.permissions().session().is_authenticated() {
            return Err(AppError::Unauthenticated);
        }

        let capability = inventory.permissions().export_capability();
        let records = Self::records_for(inventory, capability, request.scope)?;

        if records.is_empty() {
            return Err(AppError::BadRequest("No items to export".to_string()));
        }
        if request.columns.is_empty() {
            return Err(AppError::BadRequest("Select at least one column".to_string()));
        }

        let filter = inventory.filter().clone();
        let receipt = self.sink.write(ExportBatch {
            records: &records,
            filter: &filter,
            format: request.format,
            columns: &request.columns,
        })?;

        metrics::counter!("inventory_exports_total", "format" => request.format.as_str())
            .increment(1);
        tracing::info!(
            count = receipt.item_count,
            format = %receipt.format,
            scope = ?request.scope,
            "Export completed"
        );
        Ok(receipt)
    }

    /// `scope` 覆盖的条目（需 `capability` 允许）
    pub fn records_for(
        inventory: &mut InventoryService,
        capability: ExportCapability,
        scope: ExportScope,
    ) -> Result<Vec<InventoryItem>, AppError> {
        match (capability, scope) {
            (ExportCapability::None, _) => {
                Err(AppError::permission_denied(Action::Read, Module::Export))
            }
            (ExportCapability::FilteredOnly, ExportScope::All) => {
                tracing::warn!("Full export requested without export:read");
                Err(AppError::permission_denied(Action::Read, Module::Export))
            }
            (ExportCapability::Full, ExportScope::All) => Ok(inventory.items().to_vec()),
            (_, ExportScope::Filtered) => Ok(inventory.visible_items().to_vec()),
            (_, ExportScope::Selected) => {
                let selected = inventory.selected_items();
                if selected.is_empty() {
                    Ok(inventory.visible_items().to_vec())
                } else {
                    Ok(selected)
                }
            }
        }
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new(Arc::new(LogExportSink))
    }
}
