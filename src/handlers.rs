use crate::dates::{self, date_key};
use crate::errors::AppError;
use crate::models::{CheckRequest, StatsOverview, Store, TodayResponse};
use crate::reconcile::ensure_day;
use crate::state::AppState;
use crate::stats::build_stats;
use crate::storage::{persist_store, replace_store};
use crate::ui::render_index;
use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    Json,
};

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let today = dates::today();
    let mut store = state.store.lock().await;
    if ensure_day(&mut store, today) {
        persist_store(&state.data_path, &store).await?;
    }

    Ok(Html(render_index(&date_key(today))))
}

pub async fn get_today(State(state): State<AppState>) -> Result<Json<TodayResponse>, AppError> {
    let today = dates::today();
    let mut store = state.store.lock().await;
    if ensure_day(&mut store, today) {
        persist_store(&state.data_path, &store).await?;
    }

    Ok(Json(today_response(&store, &date_key(today))))
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsOverview>, AppError> {
    let store = state.store.lock().await;
    Ok(Json(build_stats(&store)))
}

/// Toggle one routine on today's record, persist the snapshot, then mirror
/// the day to the remote without waiting for it.
pub async fn check(
    State(state): State<AppState>,
    Json(payload): Json<CheckRequest>,
) -> Result<Json<TodayResponse>, AppError> {
    let today = date_key(dates::today());
    let mut store = state.store.lock().await;
    if !store.routines.contains(&payload.routine) {
        return Err(AppError::bad_request(format!(
            "unknown routine '{}'",
            payload.routine
        )));
    }

    ensure_day(&mut store, dates::today());
    let record = store
        .day_mut(&today)
        .ok_or_else(|| AppError::bad_request("no record for today"))?;
    record.checks.insert(payload.routine, payload.done);
    let checks = record.checks.clone();

    persist_store(&state.data_path, &store).await?;
    push_today(&state, today.clone(), checks);

    Ok(Json(today_response(&store, &today)))
}

/// Set all of today's checks back to false. History stays as it is.
pub async fn reset_today(State(state): State<AppState>) -> Result<Json<TodayResponse>, AppError> {
    let today = date_key(dates::today());
    let mut store = state.store.lock().await;
    ensure_day(&mut store, dates::today());
    let record = store
        .day_mut(&today)
        .ok_or_else(|| AppError::bad_request("no record for today"))?;
    for done in record.checks.values_mut() {
        *done = false;
    }
    let checks = record.checks.clone();

    persist_store(&state.data_path, &store).await?;
    push_today(&state, today.clone(), checks);

    Ok(Json(today_response(&store, &today)))
}

/// Drop all history and start over with a seeded Store.
pub async fn clear_all(State(state): State<AppState>) -> Result<Json<TodayResponse>, AppError> {
    let today = date_key(dates::today());
    let mut store = state.store.lock().await;
    *store = Store::seeded(today.clone());

    persist_store(&state.data_path, &store).await?;

    Ok(Json(today_response(&store, &today)))
}

pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let store = state.store.lock().await.clone();
    let disposition = format!(
        "attachment; filename=\"routine-tracker-{}.json\"",
        date_key(dates::today())
    );

    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(store)))
}

/// Replace the whole Store from an uploaded snapshot. Rejected payloads leave
/// the current state untouched.
pub async fn import(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<TodayResponse>, AppError> {
    let incoming = replace_store(payload)?;

    let today = date_key(dates::today());
    let mut store = state.store.lock().await;
    *store = incoming;
    // An imported snapshot may predate today.
    ensure_day(&mut store, dates::today());

    persist_store(&state.data_path, &store).await?;

    Ok(Json(today_response(&store, &today)))
}

fn today_response(store: &Store, today: &str) -> TodayResponse {
    match store.day(today) {
        Some(record) => TodayResponse::from_record(record, &store.routines),
        None => TodayResponse::from_record(
            &crate::models::DayRecord::blank(today.to_string(), &store.routines),
            &store.routines,
        ),
    }
}

fn push_today(state: &AppState, date: String, checks: std::collections::BTreeMap<String, bool>) {
    let sync = state.sync.clone();
    tokio::spawn(async move {
        sync.push_day(&date, &checks).await;
    });
}
