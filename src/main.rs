//! 库存管理系统主入口
//! 命令行前端：登录、查看、导出

use inventory_system::{
    config::AppConfig,
    middleware::AppState,
    models::{
        export::{ExportFormat, ExportRequest, ExportScope},
        view::FilterCriteria,
    },
    routes::{self, View},
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ===== CLI 参数处理 =====
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("--version") => {
            println!("inventory-system {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Some("--help") | None => {
            print_help();
            return Ok(());
        }
        _ => {}
    }

    // 加载 .env 文件（开发环境）
    // 按优先级加载：.env.local > .env.development > .env
    if let Ok(env) = std::env::var("INVENTORY_ENV") {
        dotenv::from_filename(format!(".env.{}", env)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::from_filename(".env.development").ok();
        dotenv::dotenv().ok();
    }

    // 1. 加载配置
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    // 2. 初始化日志与指标
    telemetry::init_telemetry(&config);
    telemetry::init_metrics();

    // 3. 构建应用状态（恢复持久化会话）
    let mut state = AppState::from_config(config);

    let command = args[0].as_str();
    let rest = &args[1..];
    tracing::debug!(command, "Running command");

    match command {
        "login" => {
            let (Some(email), Some(password)) = (rest.first(), rest.get(1)) else {
                anyhow::bail!("usage: inventory-system login EMAIL PASSWORD");
            };
            state.login(email, password).await?;
            if let Some(identity) = state.session.current_identity() {
                println!("Signed in as {} ({})", identity.display_name, identity.role);
            }
        }
        "logout" => {
            state.logout()?;
            println!("Signed out");
        }
        "whoami" => match state.session.current_identity() {
            Some(identity) => {
                println!("{} <{}> [{}]", identity.display_name, identity.email, identity.role);
                for permission in state.permission_service.get_user_permissions() {
                    println!("  {}:{}", permission.module, permission.action);
                }
            }
            None => println!("Not signed in"),
        },
        "list" => {
            if !enter(&state, View::List) {
                return Ok(());
            }
            if let Some(search) = rest.first() {
                state
                    .inventory
                    .set_filter(FilterCriteria::default().with_search(search.as_str()));
            }
            for item in state.inventory.visible_items() {
                println!(
                    "{:<6} {:<8} {:<24} {:<16} {:>8} {:>10.2} {:<10} {}",
                    item.id,
                    item.item_no,
                    item.name,
                    item.category,
                    item.quantity,
                    item.total_price,
                    item.status,
                    item.location
                );
            }
        }
        "export" => {
            if !enter(&state, View::Export) {
                return Ok(());
            }
            let format = match rest.first() {
                Some(value) => ExportFormat::parse(value)
                    .ok_or_else(|| anyhow::anyhow!("Unknown export format: {}", value))?,
                None => ExportFormat::default(),
            };
            let request = ExportRequest {
                scope: ExportScope::Filtered,
                format,
                ..ExportRequest::default()
            };
            let receipt = state.export(&request)?;
            println!("Exported {} items as {}", receipt.item_count, receipt.format);
        }
        other => {
            eprintln!("未知命令: {}", other);
            print_help();
            std::process::exit(1);
        }
    }

    Ok(())
}

/// 导航守卫；被拒绝时打印提示
fn enter(state: &AppState, view: View) -> bool {
    let navigation = routes::resolve(state, view.clone());
    if navigation.view == view {
        return true;
    }
    if let Some(notice) = navigation.notice {
        eprintln!("{}", notice);
    }
    false
}

/// 打印帮助信息
fn print_help() {
    println!("inventory-system {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("用法: inventory-system <命令> [参数]");
    println!();
    println!("命令:");
    println!("  login EMAIL PASSWORD   登录并持久化会话");
    println!("  logout                 登出并清除会话");
    println!("  whoami                 显示当前用户与权限");
    println!("  list [SEARCH]          列出库存条目");
    println!("  export [excel|pdf]     导出当前视图");
    println!();
    println!("选项:");
    println!("  --version     打印版本信息并退出");
    println!("  --help        打印此帮助信息并退出");
    println!();
    println!("环境变量:");
    println!("  INVENTORY_SESSION__STORAGE_PATH, INVENTORY_LOGGING__LEVEL 等");
}
