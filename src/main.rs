mod config;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e.into());
        }
    }
    tracing_subscriber::fmt::init();

    let config = config::HostConfig::from_env()?;
    let port = config.port;
    tracing::info!(api_url = %config.api_url, demo_accounts = config.demo_accounts, "host config loaded");

    let state = state::AppState::new(config)?;
    let app = routes::leptos_app(state)?;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!(%port, "badal listening");
    axum::serve(listener, app).await?;
    Ok(())
}
