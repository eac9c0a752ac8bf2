//! 业务逻辑服务层

pub mod export_service;
pub mod inventory_service;
pub mod permission_service;
pub mod session_service;
pub mod view_pipeline;

pub use export_service::{ExportService, ExportSink, LogExportSink};
pub use inventory_service::InventoryService;
pub use permission_service::PermissionService;
pub use session_service::{SessionState, SessionStore};
pub use view_pipeline::{derive, ViewState};
