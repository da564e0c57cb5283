use routine_tracker::{
    dates, load_store, persist_store, reconcile, resolve_data_path, router, AppState, SyncClient,
};
use std::{env, net::SocketAddr};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_path = resolve_data_path()?;
    if let Some(parent) = data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let today = dates::today();
    let mut store = load_store(&data_path, today).await;

    let sync = SyncClient::from_env();
    if let Some(remote) = sync.pull_all().await {
        // Full overwrite: the last bulk pull wins. An empty remote keeps the
        // local day set.
        if !remote.is_empty() {
            info!(
                "replacing {} local day record(s) with {} from remote",
                store.days.len(),
                remote.len()
            );
            store.days = remote;
        }
    }

    reconcile::ensure_day(&mut store, today);
    persist_store(&data_path, &store)
        .await
        .map_err(|err| err.message)?;

    let state = AppState::new(data_path, store, sync);
    tokio::spawn(reconcile::run_rollover_loop(state.clone()));

    let app = router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
