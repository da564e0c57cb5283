pub mod app;
pub mod dates;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod reconcile;
pub mod state;
pub mod stats;
pub mod storage;
pub mod sync;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use storage::{load_store, persist_store, resolve_data_path};
pub use sync::SyncClient;
