//! 角色 × 模块权限矩阵
//!
//! 策略即数据：每个角色一行，每个模块一组动作。
//! 查询不会失败，未列出的一律拒绝。

use crate::models::role::{Action, ExportCapability, Module, Role};

const CRUD: &[Action] = &[Action::Create, Action::Read, Action::Update, Action::Delete];
const READ: &[Action] = &[Action::Read];
const EXPORT: &[Action] = &[Action::Export];
const NONE: &[Action] = &[];

/// (角色, [(模块, 动作)])
const MATRIX: [(Role, [(Module, &[Action]); 3]); 6] = [
    (
        Role::SuperAdmin,
        [(Module::Registration, NONE), (Module::List, READ), (Module::Export, READ)],
    ),
    (
        Role::TpAdmin,
        [(Module::Registration, CRUD), (Module::List, READ), (Module::Export, READ)],
    ),
    (
        Role::TpOperation,
        [(Module::Registration, CRUD), (Module::List, READ), (Module::Export, READ)],
    ),
    (
        Role::TpSite,
        [(Module::Registration, CRUD), (Module::List, READ), (Module::Export, EXPORT)],
    ),
    (
        Role::McmcAdmin,
        [(Module::Registration, NONE), (Module::List, READ), (Module::Export, EXPORT)],
    ),
    (
        Role::McmcOperation,
        [(Module::Registration, NONE), (Module::List, READ), (Module::Export, EXPORT)],
    ),
];

/// `role` 在 `module` 上允许的动作
pub fn permissions(role: Role, module: Module) -> &'static [Action] {
    MATRIX
        .iter()
        .find(|(r, _)| *r == role)
        .and_then(|(_, modules)| modules.iter().find(|(m, _)| *m == module))
        .map(|(_, actions)| *actions)
        .unwrap_or(NONE)
}

pub fn has_permission(role: Role, action: Action, module: Module) -> bool {
    permissions(role, module).contains(&action)
}

/// 导出模块的 `read` 与 `export` 分别判断，互不包含
pub fn export_capability(role: Role) -> ExportCapability {
    if has_permission(role, Action::Read, Module::Export) {
        ExportCapability::Full
    } else if has_permission(role, Action::Export, Module::Export) {
        ExportCapability::FilteredOnly
    } else {
        ExportCapability::None
    }
}
