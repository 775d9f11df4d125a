use gallery_server::infrastructure::config::AppConfig;
use gallery_server::infrastructure::database::{create_pool, run_migrations};
use gallery_server::infrastructure::logging::init_logging;
use gallery_server::server::{AppState, start_server};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env()?;
    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;

    start_server(AppState::new(config, pool)).await
}
