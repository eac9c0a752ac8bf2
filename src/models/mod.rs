//! 数据模型模块
//! 身份与角色、库存条目、视图条件、导出设置

pub mod export;
pub mod item;
pub mod role;
pub mod user;
pub mod view;
