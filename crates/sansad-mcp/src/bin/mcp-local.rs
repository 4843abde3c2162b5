use rmcp::{ServiceExt, transport::stdio};
use sansad_mcp::McpServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Stderr)
        .write_style(env_logger::WriteStyle::Never)
        .init();

    log::info!(
        "Starting sansad MCP server on stdio (resolving against {})",
        sansad::config::BASE_URL
    );

    let service = McpServer::new()?.serve(stdio()).await.inspect_err(|e| {
        log::error!("Serve error: {e:?}");
    })?;

    service.waiting().await?;

    Ok(())
}
