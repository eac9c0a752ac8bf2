//! 测试公共模块
//! 提供测试配置、内存会话存储和记录型导出目标

#![allow(dead_code)]

use inventory_system::{
    auth::MemorySessionStorage,
    config::{AppConfig, LoggingConfig, SessionConfig},
    error::AppError,
    middleware::AppState,
    models::{
        export::{ExportBatch, ExportReceipt},
        item::{InventoryItem, ItemInput, ItemStatus},
    },
    services::ExportSink,
};
use chrono::Utc;
use secrecy::Secret;
use std::sync::{Arc, Mutex};

pub const PASSWORD: &str = "password";

/// 创建测试配置（无登录延迟）
pub fn create_test_config() -> AppConfig {
    AppConfig {
        session: SessionConfig {
            storage_path: "unused-in-tests.json".to_string(),
            login_delay_ms: 0,
            shared_secret: Secret::new(PASSWORD.to_string()),
            seed_demo_items: true,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
    }
}

/// 记录收到的每一批导出数据
#[derive(Default)]
pub struct RecordingSink {
    batches: Mutex<Vec<RecordedBatch>>,
}

#[derive(Debug, Clone)]
pub struct RecordedBatch {
    pub ids: Vec<String>,
    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
}

impl RecordingSink {
    pub fn batches(&self) -> Vec<RecordedBatch> {
        self.batches.lock().unwrap().clone()
    }

    pub fn last_ids(&self) -> Vec<String> {
        self.batches().last().map(|b| b.ids.clone()).unwrap_or_default()
    }
}

impl ExportSink for RecordingSink {
    fn write(&self, batch: ExportBatch<'_>) -> Result<ExportReceipt, AppError> {
        let recorded = RecordedBatch {
            ids: batch.records.iter().map(|item| item.id.clone()).collect(),
            rows: batch
                .records
                .iter()
                .map(|item| batch.columns.project(item))
                .collect(),
        };
        self.batches.lock().unwrap().push(recorded);
        Ok(ExportReceipt {
            item_count: batch.records.len(),
            format: batch.format,
            exported_at: Utc::now(),
        })
    }
}

pub struct TestApp {
    pub state: AppState,
    pub storage: Arc<MemorySessionStorage>,
    pub sink: Arc<RecordingSink>,
}

/// 创建测试应用状态（内存存储，种子数据）
pub fn create_test_app() -> TestApp {
    create_test_app_with(MemorySessionStorage::new())
}

pub fn create_test_app_with(storage: MemorySessionStorage) -> TestApp {
    let storage = Arc::new(storage);
    let sink = Arc::new(RecordingSink::default());
    let state = AppState::new(create_test_config(), storage.clone(), sink.clone());
    TestApp {
        state,
        storage,
        sink,
    }
}

/// 创建并以指定账号登录
pub async fn logged_in(email: &str) -> TestApp {
    let mut app = create_test_app();
    app.state
        .login(email, PASSWORD)
        .await
        .expect("Failed to log in test user");
    app
}

pub fn sample_input() -> ItemInput {
    ItemInput {
        item_no: "TL002".to_string(),
        name: "Hammer".to_string(),
        category: "Tools".to_string(),
        unit: "Piece".to_string(),
        quantity: 8.0,
        location: "Remote Site".to_string(),
        unit_price: 120.0,
        status: ItemStatus::Active,
    }
}

pub fn ids(items: &[InventoryItem]) -> Vec<&str> {
    items.iter().map(|item| item.id.as_str()).collect()
}
