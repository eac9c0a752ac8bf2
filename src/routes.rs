//! 视图路由
//! 可寻址视图、路径解析，以及受守卫保护的导航

use crate::middleware::{authorize, AppState};
use std::fmt;

/// 可寻址视图
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Login,
    /// 条目列表，默认安全视图
    List,
    Register,
    Edit(String),
    Export,
}

impl View {
    pub fn path(&self) -> String {
        match self {
            View::Login => "/login".to_string(),
            View::List => "/".to_string(),
            View::Register => "/register".to_string(),
            View::Edit(id) => format!("/edit/{}", id),
            View::Export => "/export".to_string(),
        }
    }

    pub fn parse(path: &str) -> Option<View> {
        let path = path.trim_end_matches('/');
        match path {
            "" => Some(View::List),
            "/login" => Some(View::Login),
            "/register" => Some(View::Register),
            "/export" => Some(View::Export),
            _ => path
                .strip_prefix("/edit/")
                .filter(|id| !id.is_empty() && !id.contains('/'))
                .map(|id| View::Edit(id.to_string())),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// 导航结果；被重定向时附带提示信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub view: View,
    pub notice: Option<String>,
}

impl Navigation {
    pub fn redirected(&self) -> bool {
        self.notice.is_some()
    }
}

/// 导航到 `requested`；被拒绝时跳转到错误对应的安全视图
pub fn resolve(state: &AppState, requested: View) -> Navigation {
    // 已登录用户访问登录页时回到列表
    if requested == View::Login && state.session.is_authenticated() {
        return Navigation {
            view: View::List,
            notice: None,
        };
    }

    match authorize(state, &requested) {
        Ok(()) => Navigation {
            view: requested,
            notice: None,
        },
        Err(e) => {
            let view = e.fallback_view().unwrap_or(View::List);
            tracing::debug!(
                requested = %requested,
                redirect = %view,
                code = e.code(),
                "Navigation redirected"
            );
            Navigation {
                view,
                notice: Some(e.user_message()),
            }
        }
    }
}

/// 解析原始路径；未知路径进入列表
pub fn navigate(state: &AppState, path: &str) -> Navigation {
    match View::parse(path) {
        Some(view) => resolve(state, view),
        None => resolve(state, View::List),
    }
}
