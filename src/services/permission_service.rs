//! 权限检查服务

use crate::{
    auth::matrix,
    error::AppError,
    models::role::{Action, ExportCapability, Module, PermissionSummary},
    services::session_service::SessionStore,
};
use std::sync::Arc;

/// 基于当前会话的权限检查
#[derive(Clone)]
pub struct PermissionService {
    session: Arc<SessionStore>,
}

impl PermissionService {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }

    /// 检查当前用户是否拥有权限
    pub fn check_permission(&self, action: Action, module: Module) -> bool {
        self.session.has_permission(action, module)
    }

    /// 检查权限，如果无权限则返回错误
    pub fn require_permission(&self, action: Action, module: Module) -> Result<(), AppError> {
        let Some(identity) = self.session.current_identity() else {
            return Err(AppError::Unauthenticated);
        };

        if !matrix::has_permission(identity.role, action, module) {
            tracing::warn!(
                user_id = %identity.id,
                role = %identity.role,
                action = %action,
                module = %module,
                "Permission denied"
            );
            return Err(AppError::permission_denied(action, module));
        }

        Ok(())
    }

    /// 满足任一权限即可
    pub fn require_any(&self, checks: &[(Action, Module)]) -> Result<(), AppError> {
        let Some(identity) = self.session.current_identity() else {
            return Err(AppError::Unauthenticated);
        };

        if checks
            .iter()
            .any(|(action, module)| matrix::has_permission(identity.role, *action, *module))
        {
            return Ok(());
        }

        let (action, module) = checks.first().copied().unwrap_or((Action::Read, Module::List));
        tracing::warn!(
            user_id = %identity.id,
            role = %identity.role,
            action = %action,
            module = %module,
            "Permission denied"
        );
        Err(AppError::permission_denied(action, module))
    }

    /// 当前用户的导出能力；匿名为 None
    pub fn export_capability(&self) -> ExportCapability {
        self.session
            .current_identity()
            .map(|identity| matrix::export_capability(identity.role))
            .unwrap_or(ExportCapability::None)
    }

    /// 获取当前用户的所有权限摘要
    pub fn get_user_permissions(&self) -> Vec<PermissionSummary> {
        let Some(identity) = self.session.current_identity() else {
            return Vec::new();
        };

        Module::ALL
            .into_iter()
            .flat_map(|module| {
                matrix::permissions(identity.role, module)
                    .iter()
                    .map(move |action| PermissionSummary {
                        module,
                        action: *action,
                    })
            })
            .collect()
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }
}
