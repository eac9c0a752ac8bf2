//! 会话持久化存储
//!
//! 单个键下保存一份序列化身份。读写均为同步操作，
//! 在调用方报告成功之前完成。

use crate::error::AppError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub trait SessionStorage: Send + Sync {
    /// 读取原始内容，无数据时返回 `None`
    fn load(&self) -> Result<Option<String>, AppError>;

    fn save(&self, payload: &str) -> Result<(), AppError>;

    /// 清除不存在的数据不视为错误
    fn clear(&self) -> Result<(), AppError>;
}

/// 文件存储：每个会话一个 JSON 文件
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<Option<String>, AppError> {
        match std::fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, payload: &str) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        // 先写临时文件再重命名
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, payload)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// 进程内存储，用于测试与嵌入
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    payload: Mutex<Option<String>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Mutex::new(Some(payload.into())),
        }
    }

    /// 当前内容快照
    pub fn snapshot(&self) -> Option<String> {
        self.slot().clone()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.payload.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<String>, AppError> {
        Ok(self.slot().clone())
    }

    fn save(&self, payload: &str) -> Result<(), AppError> {
        *self.slot() = Some(payload.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        *self.slot() = None;
        Ok(())
    }
}
