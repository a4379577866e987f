//! correlation-rest - 关联规则 REST 服务
//!
//! 加载配置、初始化日志，把 listener 注入 HTTP 服务器后启动

use std::sync::Arc;

use anyhow::Context;
use correlation_rest::application::RestListener;
use correlation_rest::config::{load_config, print_config, LogConfig};
use correlation_rest::infrastructure::http::{AppState, HttpServer, ServerConfig};
use correlation_rest::infrastructure::memory::InMemoryRestListener;

fn init_tracing(log: &LogConfig) {
    let log_filter = format!(
        "{},correlation_rest={},tower_http=debug",
        log.level, log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().context("Failed to load config")?;

    init_tracing(&config.log);

    tracing::info!("correlation-rest {}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    let listener: Arc<dyn RestListener> = InMemoryRestListener::new().arc();

    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_base_path(&config.server.base_path)
        .with_max_body_bytes(usize::try_from(config.server.max_body_bytes)?);
    let server = HttpServer::new(server_config, AppState::new(listener));

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
