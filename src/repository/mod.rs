//! Repository layer (内存数据)

pub mod item_repo;
pub mod reference_repo;

pub use item_repo::*;
pub use reference_repo::*;
