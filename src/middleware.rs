//! 应用状态与导航守卫
//! 登录校验、权限校验，以及编辑目标是否存在

use crate::{
    auth::{FileSessionStorage, IdentityRegistry, SessionStorage},
    config::AppConfig,
    error::AppError,
    models::{
        export::{ExportReceipt, ExportRequest},
        role::{Action, Module},
    },
    repository::ItemRepository,
    routes::View,
    services::{ExportService, ExportSink, InventoryService, LogExportSink, PermissionService, SessionStore},
};
use std::sync::Arc;

/// 应用状态
///
/// 顶层组合对象，由二进制入口或测试创建并持有；
/// 会话以 Arc 共享给权限服务与库存服务。
pub struct AppState {
    pub config: AppConfig,
    pub session: Arc<SessionStore>,
    pub permission_service: PermissionService,
    pub inventory: InventoryService,
    pub export_service: ExportService,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        storage: Arc<dyn SessionStorage>,
        sink: Arc<dyn ExportSink>,
    ) -> Self {
        let session = Arc::new(SessionStore::open(
            &config.session,
            IdentityRegistry::builtin(),
            storage,
        ));
        let permission_service = PermissionService::new(session.clone());

        let items = if config.session.seed_demo_items {
            ItemRepository::seeded()
        } else {
            ItemRepository::new()
        };
        let inventory = InventoryService::new(permission_service.clone(), items);

        Self {
            config,
            session,
            permission_service,
            inventory,
            export_service: ExportService::new(sink),
        }
    }

    /// 文件会话存储 + 日志导出
    pub fn from_config(config: AppConfig) -> Self {
        let storage = Arc::new(FileSessionStorage::new(&config.session.storage_path));
        Self::new(config, storage, Arc::new(LogExportSink))
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), AppError> {
        self.session.login(email, password).await?;
        self.inventory.clear_selection();
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), AppError> {
        self.inventory.clear_selection();
        self.session.logout()
    }

    pub fn export(&mut self, request: &ExportRequest) -> Result<ExportReceipt, AppError> {
        self.export_service.export(&mut self.inventory, request)
    }
}

/// 导航守卫：判断当前会话能否进入 `view`
pub fn authorize(state: &AppState, view: &View) -> Result<(), AppError> {
    if !state.session.is_authenticated() {
        return match view {
            View::Login => Ok(()),
            _ => Err(AppError::Unauthenticated),
        };
    }

    let permissions = &state.permission_service;
    match view {
        View::Login => Ok(()),
        View::List => permissions.require_permission(Action::Read, Module::List),
        View::Register => permissions.require_permission(Action::Create, Module::Registration),
        View::Edit(id) => {
            permissions.require_permission(Action::Update, Module::Registration)?;
            if state.inventory.contains(id) {
                Ok(())
            } else {
                tracing::warn!(item_id = %id, "Edit requested for missing item");
                Err(AppError::not_found(format!("inventory item {}", id)))
            }
        }
        View::Export => permissions.require_any(&[
            (Action::Read, Module::Export),
            (Action::Export, Module::Export),
        ]),
    }
}
