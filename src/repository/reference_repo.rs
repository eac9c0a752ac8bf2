//! Reference data repository (分类与存放位置)

use crate::models::item::{Category, Location};
use once_cell::sync::Lazy;

static CATEGORIES: Lazy<Vec<Category>> = Lazy::new(|| {
    [
        "Electronics",
        "Furniture",
        "Office Supplies",
        "Networking",
        "Tools",
    ]
    .iter()
    .enumerate()
    .map(|(i, name)| Category {
        id: (i + 1).to_string(),
        name: name.to_string(),
    })
    .collect()
});

static LOCATIONS: Lazy<Vec<Location>> = Lazy::new(|| {
    [
        "Warehouse A",
        "Warehouse B",
        "Office Building 1",
        "Office Building 2",
        "Remote Site",
    ]
    .iter()
    .enumerate()
    .map(|(i, name)| Location {
        id: (i + 1).to_string(),
        name: name.to_string(),
    })
    .collect()
});

/// 只读的分类与存放位置
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceRepository;

impl ReferenceRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn list_categories(&self) -> &'static [Category] {
        &CATEGORIES
    }

    pub fn list_locations(&self) -> &'static [Location] {
        &LOCATIONS
    }

    pub fn find_category(&self, name: &str) -> Option<&'static Category> {
        CATEGORIES.iter().find(|c| c.name == name)
    }

    pub fn find_location(&self, name: &str) -> Option<&'static Location> {
        LOCATIONS.iter().find(|l| l.name == name)
    }
}
