use kiosk_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载配置 (.env + 环境变量)
    let config = Config::from_env()?;

    // 2. 设置环境 (日志)
    setup_environment(&config);

    print_banner();

    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        "🍧 Kiosk server starting..."
    );

    // 3. 初始化服务器状态
    let state = ServerState::initialize(&config)?;

    // 4. 启动 HTTP 服务器 (Server::run 会自动启动后台任务)
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
