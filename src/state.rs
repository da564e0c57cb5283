use crate::models::Store;
use crate::sync::SyncClient;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub store: Arc<Mutex<Store>>,
    pub sync: SyncClient,
}

impl AppState {
    pub fn new(data_path: PathBuf, store: Store, sync: SyncClient) -> Self {
        Self {
            data_path,
            store: Arc::new(Mutex::new(store)),
            sync,
        }
    }
}
