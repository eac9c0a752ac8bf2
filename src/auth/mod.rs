//! 认证与授权模块

pub mod matrix;
pub mod registry;
pub mod storage;

pub use matrix::{export_capability, has_permission, permissions};
pub use registry::IdentityRegistry;
pub use storage::{FileSessionStorage, MemorySessionStorage, SessionStorage};
