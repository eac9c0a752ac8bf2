//! 角色与权限领域模型

use serde::{Deserialize, Serialize};
use std::fmt;

/// 用户角色。固定集合，序列化为界面显示名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Super Admin")]
    SuperAdmin,
    #[serde(rename = "TP Admin")]
    TpAdmin,
    #[serde(rename = "TP Operation")]
    TpOperation,
    #[serde(rename = "TP SITE")]
    TpSite,
    #[serde(rename = "MCMC Admin")]
    McmcAdmin,
    #[serde(rename = "MCMC Operation")]
    McmcOperation,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::SuperAdmin,
        Role::TpAdmin,
        Role::TpOperation,
        Role::TpSite,
        Role::McmcAdmin,
        Role::McmcOperation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::TpAdmin => "TP Admin",
            Role::TpOperation => "TP Operation",
            Role::TpSite => "TP SITE",
            Role::McmcAdmin => "MCMC Admin",
            Role::McmcOperation => "MCMC Operation",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 受权限控制的功能模块
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Registration,
    List,
    Export,
}

impl Module {
    pub const ALL: [Module; 3] = [Module::Registration, Module::List, Module::Export];

    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Registration => "registration",
            Module::List => "list",
            Module::Export => "export",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 动作。`Export` 是独立能力，不是 `Read` 的别名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    Export,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
        Action::Export,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Export => "export",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 角色的导出能力
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportCapability {
    /// export:read，任意范围，包括未过滤的全部数据
    Full,
    /// export:export，仅限过滤结果或其中的选择
    FilteredOnly,
    None,
}

/// 权限摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionSummary {
    pub module: Module,
    pub action: Action,
}
