use std::sync::Arc;

use tokio::net::TcpListener;

use soundvault::config::{Config, Environment};
use soundvault::state::AppState;
use soundvault::store::LocalBucket;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soundvault=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env();
    print_banner(&config);

    let db = soundvault::db::create_pool(&config.database_url)
        .await
        .expect("failed to create database pool");

    // Development skips eager index creation; SQLite builds it on demand
    if config.environment != Environment::Development {
        soundvault::db::sounds::ensure_indexes(&db)
            .await
            .expect("failed to create indexes");
    }

    // Create storage directories
    for subdir in &["sounds", "tmp"] {
        let dir = config.storage_path.join(subdir);
        if let Err(e) = tokio::fs::create_dir_all(&dir).await {
            tracing::error!("failed to create storage directory {:?}: {:?}", dir, e);
        }
    }

    let store = Arc::new(LocalBucket::new(&config.storage_path, &config.public_url));

    let state = AppState {
        db,
        store,
        tmp_dir: config.storage_path.join("tmp"),
        storage_path: config.storage_path.clone(),
    };

    let app = soundvault::routes::router(state);

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("failed to bind");

    let actual_port = listener
        .local_addr()
        .expect("failed to get local address")
        .port();
    eprintln!("  \x1b[32m→ listening on 0.0.0.0:{actual_port}\x1b[0m");
    eprintln!();

    axum::serve(listener, app).await.expect("server error");
}

fn print_banner(config: &Config) {
    let version = env!("CARGO_PKG_VERSION");
    let env = match config.environment {
        Environment::Development => "development",
        Environment::Production => "production",
    };

    eprintln!();
    eprintln!("  \x1b[1;36msoundvault\x1b[0m \x1b[2mv{version}\x1b[0m");
    eprintln!();
    eprintln!("  \x1b[2menv\x1b[0m          {env}");
    eprintln!("  \x1b[2mport\x1b[0m         {}", config.port);
    eprintln!("  \x1b[2mdatabase\x1b[0m     {}", config.database_url);
    eprintln!("  \x1b[2mstorage\x1b[0m      {}", config.storage_path.display());
    eprintln!("  \x1b[2mpublic url\x1b[0m   {}", config.public_url);
    eprintln!();
}
