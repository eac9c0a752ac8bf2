//! 身份领域模型

use crate::models::role::Role;
use serde::{Deserialize, Serialize};

/// 已登录用户的身份信息
///
/// 登录时由会话签发，之后不再修改。
/// 持久化格式使用 camelCase；读取时接受 `name` 作为 `displayName`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    #[serde(alias = "name")]
    pub display_name: String,
    pub email: String,
    pub role: Role,
}

impl Identity {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            email: email.into(),
            role,
        }
    }
}

/// 登录请求
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
