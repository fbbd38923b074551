use calorie_log::{
    clock::SystemClock, router, storage::FileStorage, AppState, Config, EntryStore,
};
use std::net::SocketAddr;
use tokio::{fs, task};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    fs::create_dir_all(&config.data_dir).await?;

    let storage = FileStorage::new(&config.data_dir);
    info!("storing entries under {}", storage.dir().display());

    let store = task::spawn_blocking(move || {
        let mut store = EntryStore::new(storage, SystemClock);
        let loaded = store.load().len();
        info!(entries = loaded, "loaded entries");
        store
    })
    .await?;

    let app = router(AppState::new(store));
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
