//! 导出集成测试
//! 导出范围、导出能力与列选择

use inventory_system::{
    error::AppError,
    models::{
        export::{ExportColumns, ExportFormat, ExportRequest, ExportScope},
        item::{ItemField, ItemStatus},
        view::FilterCriteria,
    },
};

mod common;
use common::{create_test_app, logged_in};

fn request(scope: ExportScope) -> ExportRequest {
    ExportRequest {
        scope,
        ..ExportRequest::default()
    }
}

fn reserved_only() -> FilterCriteria {
    FilterCriteria::default().with_status(ItemStatus::Reserved)
}

// ==================== 全量导出 ====================

#[tokio::test]
async fn test_full_export_ignores_filter() {
    let mut app = logged_in("super@example.com").await;
    app.state.inventory.set_filter(reserved_only());

    let receipt = app.state.export(&request(ExportScope::All)).unwrap();
    assert_eq!(receipt.item_count, 5);
    assert_eq!(app.sink.last_ids(), vec!["1", "2", "3", "4", "5"]);
}

#[tokio::test]
async fn test_full_export_denied_for_filtered_only_roles() {
    for email in ["tpsite@example.com", "mcmcadmin@example.com", "mcmcop@example.com"] {
        let mut app = logged_in(email).await;
        let result = app.state.export(&request(ExportScope::All));
        assert!(
            matches!(result, Err(AppError::PermissionDenied { .. })),
            "{}",
            email
        );
        assert!(app.sink.batches().is_empty());
    }
}

// ==================== 过滤导出 ====================

#[tokio::test]
async fn test_filtered_export_uses_current_view() {
    let mut app = logged_in("tpsite@example.com").await;
    app.state.inventory.set_filter(reserved_only());

    let receipt = app.state.export(&request(ExportScope::Filtered)).unwrap();
    assert_eq!(receipt.item_count, 1);
    assert_eq!(receipt.format, ExportFormat::Excel);
    assert_eq!(app.sink.last_ids(), vec!["4"]);
}

#[tokio::test]
async fn test_filtered_export_with_empty_view_rejected() {
    let mut app = logged_in("tpadmin@example.com").await;
    app.state
        .inventory
        .set_filter(FilterCriteria::default().with_search("no such item"));

    match app.state.export(&request(ExportScope::Filtered)) {
        Err(AppError::BadRequest(msg)) => assert_eq!(msg, "No items to export"),
        other => panic!("expected bad request, got {:?}", other),
    }
}

// ==================== 选择导出 ====================

#[tokio::test]
async fn test_selected_export_uses_selection_in_view_order() {
    let mut app = logged_in("mcmcop@example.com").await;
    app.state.inventory.set_selected("2", true);
    app.state.inventory.set_selected("5", true);

    let receipt = app.state.export(&request(ExportScope::Selected)).unwrap();
    assert_eq!(receipt.item_count, 2);
    // 默认视图按最近更新倒序
    assert_eq!(app.sink.last_ids(), vec!["5", "2"]);
}

#[tokio::test]
async fn test_selected_export_without_selection_falls_back_to_view() {
    let mut app = logged_in("tpop@example.com").await;
    app.state.inventory.set_filter(reserved_only());

    let receipt = app.state.export(&request(ExportScope::Selected)).unwrap();
    assert_eq!(receipt.item_count, 1);
}

// ==================== 列与格式 ====================

#[tokio::test]
async fn test_default_columns_exclude_id_and_creator() {
    let mut app = logged_in("super@example.com").await;
    let request = ExportRequest {
        scope: ExportScope::All,
        format: ExportFormat::Pdf,
        columns: ExportColumns::default(),
    };

    let receipt = app.state.export(&request).unwrap();
    assert_eq!(receipt.format, ExportFormat::Pdf);

    let batch = app.sink.batches().pop().unwrap();
    let row = &batch.rows[0];
    assert_eq!(row.len(), 10);
    assert!(!row.contains_key("id"));
    assert!(!row.contains_key("createdBy"));
    assert_eq!(row["itemNo"], "EL001");
    assert_eq!(row["totalPrice"], 18000.0);
}

#[tokio::test]
async fn test_export_requires_a_column() {
    let mut app = logged_in("super@example.com").await;
    let request = ExportRequest {
        columns: ExportColumns::new(Vec::<ItemField>::new()),
        ..ExportRequest::default()
    };
    assert!(matches!(app.state.export(&request), Err(AppError::BadRequest(_))));
}

#[tokio::test]
async fn test_custom_columns() {
    let mut app = logged_in("tpsite@example.com").await;
    let mut columns = ExportColumns::new([ItemField::Name]);
    columns.include(ItemField::Status, true);
    columns.include(ItemField::Name, false);

    let request = ExportRequest {
        columns,
        ..ExportRequest::default()
    };
    app.state.export(&request).unwrap();

    let batch = app.sink.batches().pop().unwrap();
    assert_eq!(batch.rows.len(), 5);
    assert!(batch.rows.iter().all(|row| row.len() == 1 && row.contains_key("status")));
}

#[test]
fn test_anonymous_export_rejected() {
    let mut app = create_test_app();
    assert!(matches!(
        app.state.export(&ExportRequest::default()),
        Err(AppError::Unauthenticated)
    ));
}

#[test]
fn test_format_parsing() {
    assert_eq!(ExportFormat::parse("PDF"), Some(ExportFormat::Pdf));
    assert_eq!(ExportFormat::parse("excel"), Some(ExportFormat::Excel));
    assert_eq!(ExportFormat::parse("csv"), None);
}
