use user_api::{build_app, seed, serve, AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "user_api=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    tracing::info!(profile = %config.profile, storage = ?config.storage, "configuration loaded");

    let (host, port, seeds) = (config.host.clone(), config.port, config.seeds_demo_data());
    let app_state = AppState::init(config).await?;

    if seeds {
        let inserted = seed::seed_demo_users(&app_state.users).await?;
        tracing::info!(inserted, "demo data seeded");
    }

    serve(build_app(app_state), &host, port).await
}
