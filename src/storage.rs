use crate::dates::date_key;
use crate::errors::{AppError, ImportError};
use crate::models::Store;
use chrono::NaiveDate;
use serde_json::Value;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/store.json"))
}

/// Read the snapshot. An absent, unreadable, or malformed file degrades to a
/// seeded Store for `today`; this never fails.
pub async fn load_store(path: &Path, today: NaiveDate) -> Store {
    match fs::read(path).await {
        Ok(bytes) => parse_store(&bytes, today),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Store::seeded(date_key(today)),
        Err(err) => {
            error!("failed to read store file: {err}");
            Store::seeded(date_key(today))
        }
    }
}

fn parse_store(bytes: &[u8], today: NaiveDate) -> Store {
    match serde_json::from_slice(bytes) {
        Ok(store) => store,
        Err(err) => {
            error!("failed to parse store file: {err}");
            Store::seeded(date_key(today))
        }
    }
}

/// Whole-snapshot write. There are no partial updates; every mutation goes
/// through read-modify-write of the full Store.
pub async fn persist_store(path: &Path, store: &Store) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(store).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

/// Validate an import payload and turn it into a Store. Anything without
/// array-valued `days` and `routines` is rejected, leaving the caller's
/// current Store in place.
pub fn replace_store(incoming: Value) -> Result<Store, ImportError> {
    let days_ok = incoming.get("days").is_some_and(Value::is_array);
    let routines_ok = incoming.get("routines").is_some_and(Value::is_array);
    if !days_ok {
        return Err(ImportError("missing days"));
    }
    if !routines_ok {
        return Err(ImportError("missing routines"));
    }

    serde_json::from_value(incoming).map_err(|_| ImportError("malformed day records"))
}
