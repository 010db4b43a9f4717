use std::sync::Arc;
use std::time::Duration;
use tokio::task;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinema_system::{app, config::Config, store::DataStore, AppState};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cinema API ({})", config.app.environment);

    // Поднимаем состояние из снимка, если он настроен
    let store = DataStore::load_or_default(config.snapshot.path.as_deref());

    let app_state = Arc::new(AppState {
        store: store.clone(),
        config: config.clone(),
    });

    // --- Фоновые задачи ---

    // Периодический сброс снимка на диск, если были изменения
    if let Some(path) = config.snapshot.path.clone() {
        let store = store.clone();
        let interval = Duration::from_secs(config.snapshot.flush_interval_secs.max(1));
        task::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                if store.take_dirty() {
                    if let Err(e) = store.flush(&path).await {
                        error!("snapshot flush failed: {e:#}");
                    }
                }
            }
        });
    }

    // --- Запуск веб-сервера ---

    let router = app(app_state);
    let addr = format!("{}:{}", config.app.host, config.app.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    axum::serve(listener, router.into_make_service())
        .await
        .expect("Server error");
}
