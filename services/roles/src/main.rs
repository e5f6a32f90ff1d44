use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use gymdash_auth_types::identity::SessionSecret;
use gymdash_core::config::Config as _;
use gymdash_core::tracing::init_tracing;

use gymdash_roles::config::RolesConfig;
use gymdash_roles::router::build_router;
use gymdash_roles::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");

    let config = RolesConfig::from_env().context("load roles config")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;

    let router = build_router(
        AppState::from_db(db),
        SessionSecret::new(config.session_secret),
    );
    let http_addr = format!("0.0.0.0:{}", config.roles_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("bind {http_addr}"))?;

    info!("roles service listening on {http_addr}");
    axum::serve(listener, router).await.context("serve")?;
    Ok(())
}
