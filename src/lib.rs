//! 库存管理系统库
//! 会话、权限矩阵、库存条目与导出

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;
