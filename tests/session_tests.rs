//! 会话集成测试
//! 登录、登出、会话恢复与并发登录

use inventory_system::{
    auth::{IdentityRegistry, MemorySessionStorage, SessionStorage},
    error::AppError,
    models::{
        role::{Action, Module, Role},
        user::{Identity, LoginRequest},
    },
    services::{SessionState, SessionStore},
};
use std::sync::Arc;

mod common;
use common::{create_test_app, create_test_app_with, create_test_config, PASSWORD};

fn store_with_delay(delay_ms: u64, storage: Arc<MemorySessionStorage>) -> Arc<SessionStore> {
    let mut config = create_test_config();
    config.session.login_delay_ms = delay_ms;
    Arc::new(SessionStore::open(
        &config.session,
        IdentityRegistry::builtin(),
        storage,
    ))
}

// ==================== 登录 ====================

#[tokio::test]
async fn test_login_as_super_admin() {
    let mut app = create_test_app();
    app.state.login("super@example.com", PASSWORD).await.unwrap();

    let identity = app.state.session.current_identity().unwrap();
    assert_eq!(identity.display_name, "Super Admin");
    assert_eq!(identity.role, Role::SuperAdmin);
    assert!(app.state.session.has_permission(Action::Read, Module::List));
    assert!(!app.state.session.has_permission(Action::Create, Module::Registration));

    let persisted: Identity = serde_json::from_str(&app.storage.snapshot().unwrap()).unwrap();
    assert_eq!(persisted.email, "super@example.com");
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let mut app = create_test_app();
    app.state.login("  TPSite@Example.COM ", PASSWORD).await.unwrap();
    assert_eq!(app.state.session.current_identity().unwrap().role, Role::TpSite);
}

#[tokio::test]
async fn test_login_with_request() {
    let app = create_test_app();
    let req = LoginRequest {
        email: "tpop@example.com".to_string(),
        password: PASSWORD.to_string(),
    };
    let identity = app.state.session.login_with(&req).await.unwrap();
    assert_eq!(identity.role, Role::TpOperation);
}

#[tokio::test]
async fn test_unknown_email_rejected() {
    let mut app = create_test_app();
    let result = app.state.login("nobody@example.com", PASSWORD).await;

    assert!(matches!(result, Err(AppError::InvalidCredentials)));
    assert!(!app.state.session.is_authenticated());
    assert_eq!(
        app.state.session.state(),
        SessionState::AuthenticationFailed("Invalid email or password".to_string())
    );
    assert!(app.storage.snapshot().is_none());
}

#[tokio::test]
async fn test_failed_login_drops_previous_identity() {
    let mut app = create_test_app();
    app.state.login("tpadmin@example.com", PASSWORD).await.unwrap();
    let persisted = app.storage.snapshot();

    let result = app.state.login("tpadmin@example.com", "wrong").await;
    assert!(result.is_err());
    assert!(app.state.session.current_identity().is_none());
    // 登录失败不改动存储
    assert_eq!(app.storage.snapshot(), persisted);
}

#[tokio::test]
async fn test_loading_flag_during_login() {
    let storage = Arc::new(MemorySessionStorage::new());
    let session = store_with_delay(200, storage);

    let handle = {
        let session = session.clone();
        tokio::spawn(async move { session.login("mcmcadmin@example.com", PASSWORD).await })
    };

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    assert!(session.is_loading());
    assert!(!session.has_permission(Action::Read, Module::List));

    let identity = handle.await.unwrap().unwrap();
    assert_eq!(identity.role, Role::McmcAdmin);
    assert!(!session.is_loading());
}

#[tokio::test]
async fn test_logout_during_login_wins() {
    let storage = Arc::new(MemorySessionStorage::new());
    let session = store_with_delay(200, storage.clone());

    let handle = {
        let session = session.clone();
        tokio::spawn(async move { session.login("tpadmin@example.com", PASSWORD).await })
    };

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    assert!(session.is_loading());
    session.logout().unwrap();
    assert_eq!(session.state(), SessionState::Anonymous);

    let result = handle.await.unwrap();
    assert!(matches!(result, Err(AppError::LoginCancelled)));
    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(session.current_identity().is_none());
    assert!(storage.snapshot().is_none());

    // 之后的登录不受影响
    session.login("tpadmin@example.com", PASSWORD).await.unwrap();
    assert_eq!(session.current_identity().unwrap().role, Role::TpAdmin);
}

#[tokio::test]
async fn test_concurrent_logins_apply_in_order() {
    let storage = Arc::new(MemorySessionStorage::new());
    let session = store_with_delay(30, storage.clone());

    let (first, second) = futures::join!(
        session.login("tpadmin@example.com", PASSWORD),
        session.login("mcmcop@example.com", PASSWORD),
    );
    assert!(first.is_ok());
    assert!(second.is_ok());

    // 最后发起的登录生效
    let current = session.current_identity().unwrap();
    assert_eq!(current.role, Role::McmcOperation);
    let persisted: Identity = serde_json::from_str(&storage.snapshot().unwrap()).unwrap();
    assert_eq!(persisted, current);
}

// ==================== 登出与恢复 ====================

#[tokio::test]
async fn test_logout_clears_session_and_storage() {
    let mut app = create_test_app();
    app.state.login("tpsite@example.com", PASSWORD).await.unwrap();

    app.state.logout().unwrap();
    assert_eq!(app.state.session.state(), SessionState::Anonymous);
    assert!(app.storage.snapshot().is_none());
    assert!(app.state.permission_service.get_user_permissions().is_empty());
}

#[test]
fn test_restore_from_persisted_identity() {
    let payload = r#"{"id":"4","name":"TP SITE","email":"tpsite@example.com","role":"TP SITE"}"#;
    let app = create_test_app_with(MemorySessionStorage::with_payload(payload));

    let identity = app.state.session.current_identity().unwrap();
    assert_eq!(identity.display_name, "TP SITE");
    assert!(app.state.session.has_permission(Action::Export, Module::Export));
}

#[test]
fn test_restore_malformed_payload_is_anonymous() {
    for payload in ["", "null", "{\"id\":1}", r#"{"id":"1","name":"X","email":"x","role":"Root"}"#] {
        let app = create_test_app_with(MemorySessionStorage::with_payload(payload));
        assert_eq!(app.state.session.state(), SessionState::Anonymous, "{}", payload);
    }
}

#[test]
fn test_memory_storage_roundtrip() {
    let storage = MemorySessionStorage::new();
    assert!(storage.load().unwrap().is_none());
    storage.save("{}").unwrap();
    assert_eq!(storage.load().unwrap().as_deref(), Some("{}"));
    storage.clear().unwrap();
    assert!(storage.load().unwrap().is_none());
}
