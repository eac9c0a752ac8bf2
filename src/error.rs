//! 统一错误模型
//! 定义所有错误类型，以及错误到用户提示与跳转视图的映射

use crate::models::role::{Action, Module};
use crate::routes::View;
use std::collections::BTreeMap;
use thiserror::Error;

/// 字段名（camelCase）-> 错误消息
pub type FieldErrors = BTreeMap<String, String>;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Login cancelled by logout")]
    LoginCancelled,

    #[error("Permission denied: {action} on {module}")]
    PermissionDenied { action: Action, module: Module },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {}", join_fields(.0))]
    Validation(FieldErrors),

    #[error("Malformed persisted session: {0}")]
    MalformedSession(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn not_found(what: impl Into<String>) -> Self {
        AppError::NotFound(what.into())
    }

    pub fn permission_denied(action: Action, module: Module) -> Self {
        AppError::PermissionDenied { action, module }
    }

    /// 稳定的错误码，供界面与日志使用
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::Unauthenticated => "unauthenticated",
            AppError::LoginCancelled => "login_cancelled",
            AppError::PermissionDenied { .. } => "permission_denied",
            AppError::NotFound(_) => "not_found",
            AppError::Validation(_) => "validation_error",
            AppError::MalformedSession(_) => "malformed_session",
            AppError::BadRequest(_) => "bad_request",
            AppError::Storage(_) => "storage_error",
            AppError::Serialization(_) => "serialization_error",
            AppError::Config(_) => "config_error",
        }
    }

    /// 获取用户友好的错误消息（不包含内部细节）
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidCredentials => "Invalid email or password".to_string(),
            AppError::Unauthenticated => "Please sign in to continue".to_string(),
            AppError::LoginCancelled => "Sign-in was cancelled".to_string(),
            AppError::PermissionDenied { .. } => {
                "You don't have permission to perform this action".to_string()
            }
            AppError::NotFound(_) => "The requested item could not be found".to_string(),
            AppError::Validation(_) => "Please correct the highlighted fields".to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::MalformedSession(_)
            | AppError::Storage(_)
            | AppError::Serialization(_)
            | AppError::Config(_) => "An unexpected error occurred".to_string(),
        }
    }

    /// 用户可以直接重试的错误
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::InvalidCredentials | AppError::Validation(_) | AppError::Storage(_)
        )
    }

    /// 出错后应跳转到的安全视图；`None` 表示停留在当前视图
    pub fn fallback_view(&self) -> Option<View> {
        match self {
            AppError::Unauthenticated | AppError::LoginCancelled => Some(View::Login),
            AppError::PermissionDenied { .. } | AppError::NotFound(_) => Some(View::List),
            _ => None,
        }
    }

    /// 字段级错误（仅 Validation）
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            AppError::Validation(fields) => Some(fields),
            _ => None,
        }
    }
}

fn join_fields(fields: &FieldErrors) -> String {
    fields.keys().cloned().collect::<Vec<_>>().join(", ")
}

/// 将 validator 结果整理为每字段一条消息，字段名转为 camelCase
pub fn field_messages(errors: &validator::ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            let message = errs.first().map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })?;
            Some((camel_case(&field.to_string()), message))
        })
        .collect()
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(field_messages(&e))
    }
}

/// 从 config::ConfigError 转换
impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}
