//! 会话服务：登录、登出、会话恢复与权限判断
//!
//! 状态机：Anonymous -> Authenticating -> Authenticated | AuthenticationFailed。
//! 登录按会话串行：并发调用按发起顺序排队执行。
//! 登出作废进行中的登录：登录在延迟结束后发现已登出则丢弃结果。

use crate::{
    auth::{matrix, IdentityRegistry, SessionStorage},
    config::SessionConfig,
    error::AppError,
    models::{
        role::{Action, Module},
        user::{Identity, LoginRequest},
    },
};
use secrecy::{ExposeSecret, Secret};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tokio::sync::Mutex;

/// 会话状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticating,
    Authenticated(Identity),
    AuthenticationFailed(String),
}

pub struct SessionStore {
    registry: IdentityRegistry,
    storage: Arc<dyn SessionStorage>,
    shared_secret: Secret<String>,
    login_delay: Duration,
    state: RwLock<SessionState>,
    // 串行化登录；tokio Mutex 按 FIFO 唤醒
    login_gate: Mutex<()>,
    // 每次登出递增
    epoch: AtomicU64,
}

impl SessionStore {
    pub fn new(
        config: &SessionConfig,
        registry: IdentityRegistry,
        storage: Arc<dyn SessionStorage>,
    ) -> Self {
        Self {
            registry,
            storage,
            shared_secret: config.shared_secret.clone(),
            login_delay: config.login_delay(),
            state: RwLock::new(SessionState::Anonymous),
            login_gate: Mutex::new(()),
            epoch: AtomicU64::new(0),
        }
    }

    /// 创建并尝试从持久化存储恢复会话
    pub fn open(
        config: &SessionConfig,
        registry: IdentityRegistry,
        storage: Arc<dyn SessionStorage>,
    ) -> Self {
        let store = Self::new(config, registry, storage);
        store.restore();
        store
    }

    /// 从持久化存储恢复会话。损坏或无法读取的数据视为无会话，只记录日志
    pub fn restore(&self) {
        let identity = match self.load_persisted() {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(error = %e, code = e.code(), "Ignoring persisted session");
                None
            }
        };

        match identity {
            Some(identity) => {
                tracing::info!(
                    user_id = %identity.id,
                    role = %identity.role,
                    "Session restored"
                );
                *self.write_state() = SessionState::Authenticated(identity);
            }
            None => *self.write_state() = SessionState::Anonymous,
        }
    }

    fn load_persisted(&self) -> Result<Option<Identity>, AppError> {
        let Some(payload) = self.storage.load()? else {
            return Ok(None);
        };
        serde_json::from_str::<Identity>(&payload)
            .map(Some)
            .map_err(|e| AppError::MalformedSession(e.to_string()))
    }

    /// 用户登录
    ///
    /// 延迟期间发生登出时放弃本次结果，返回 `LoginCancelled`，会话保持匿名。
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, AppError> {
        let _gate = self.login_gate.lock().await;

        let epoch = {
            let mut state = self.write_state();
            *state = SessionState::Authenticating;
            self.epoch.load(Ordering::SeqCst)
        };
        tracing::debug!(email = %email, "Authenticating");

        // 模拟网络延迟
        if !self.login_delay.is_zero() {
            tokio::time::sleep(self.login_delay).await;
        }

        // 持有写锁完成校验、持久化与状态切换，与 logout 互斥
        let mut state = self.write_state();
        if self.epoch.load(Ordering::SeqCst) != epoch {
            metrics::counter!("inventory_logins_total", "outcome" => "cancelled").increment(1);
            tracing::info!(email = %email, "Login discarded, logged out while authenticating");
            return Err(AppError::LoginCancelled);
        }

        let outcome = self.authenticate(email, password).and_then(|identity| {
            let payload = serde_json::to_string(&identity)?;
            self.storage.save(&payload)?;
            Ok(identity)
        });

        match outcome {
            Ok(identity) => {
                *state = SessionState::Authenticated(identity.clone());
                metrics::counter!("inventory_logins_total", "outcome" => "success").increment(1);
                tracing::info!(
                    user_id = %identity.id,
                    role = %identity.role,
                    "Login succeeded"
                );
                Ok(identity)
            }
            Err(e) => {
                *state = SessionState::AuthenticationFailed(e.user_message());
                metrics::counter!("inventory_logins_total", "outcome" => "failure").increment(1);
                tracing::warn!(email = %email, code = e.code(), "Login failed");
                Err(e)
            }
        }
    }

    pub async fn login_with(&self, req: &LoginRequest) -> Result<Identity, AppError> {
        self.login(&req.email, &req.password).await
    }

    /// 模拟凭据校验（明文共享口令，不是真正的认证边界）
    fn authenticate(&self, email: &str, password: &str) -> Result<Identity, AppError> {
        let identity = self
            .registry
            .find_by_email(email)
            .ok_or(AppError::InvalidCredentials)?;

        if password != self.shared_secret.expose_secret().as_str() {
            return Err(AppError::InvalidCredentials);
        }

        Ok(identity.clone())
    }

    /// 登出：回到匿名状态并清除持久化会话。进行中的登录将被作废
    pub fn logout(&self) -> Result<(), AppError> {
        let mut state = self.write_state();
        self.epoch.fetch_add(1, Ordering::SeqCst);

        let previous = std::mem::replace(&mut *state, SessionState::Anonymous);
        if let SessionState::Authenticated(identity) = previous {
            tracing::info!(user_id = %identity.id, "Logged out");
        }

        self.storage.clear().map_err(|e| {
            tracing::error!(error = %e, "Failed to clear persisted session");
            e
        })
    }

    pub fn state(&self) -> SessionState {
        self.read_state().clone()
    }

    pub fn current_identity(&self) -> Option<Identity> {
        match &*self.read_state() {
            SessionState::Authenticated(identity) => Some(identity.clone()),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.read_state(), SessionState::Authenticated(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(*self.read_state(), SessionState::Authenticating)
    }

    /// 最近一次登录失败的提示信息
    pub fn last_error(&self) -> Option<String> {
        match &*self.read_state() {
            SessionState::AuthenticationFailed(reason) => Some(reason.clone()),
            _ => None,
        }
    }

    /// 匿名时恒为 false，否则查询权限矩阵
    pub fn has_permission(&self, action: Action, module: Module) -> bool {
        match &*self.read_state() {
            SessionState::Authenticated(identity) => {
                matrix::has_permission(identity.role, action, module)
            }
            _ => false,
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}
