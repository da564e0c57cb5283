use crate::dates::{self, date_key};
use crate::models::{DayRecord, Store};
use crate::state::AppState;
use crate::storage::persist_store;
use chrono::NaiveDate;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

/// How often the rollover loop re-checks the calendar. One minute is enough
/// to catch midnight while a session stays open.
pub const ROLLOVER_INTERVAL: Duration = Duration::from_secs(60);

/// Append a blank record for `today` if none exists yet. Uses the Store's
/// current routine set, so older records are never backfilled. Returns true
/// when a record was created. Existing records are never touched or removed,
/// including records for dates that were "today" before a clock shift.
pub fn ensure_day(store: &mut Store, today: NaiveDate) -> bool {
    let key = date_key(today);
    if store.day(&key).is_some() {
        return false;
    }

    let record = DayRecord::blank(key, &store.routines);
    store.days.push(record);
    true
}

/// Periodic tick that keeps the "today" invariant while the process runs.
/// Each tick is idempotent; the snapshot is only rewritten when a new day
/// actually starts.
pub async fn run_rollover_loop(state: AppState) {
    let mut ticker = interval(ROLLOVER_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let today = dates::today();
        let mut store = state.store.lock().await;
        if ensure_day(&mut store, today) {
            info!("day rollover: created record for {}", date_key(today));
            if let Err(err) = persist_store(&state.data_path, &store).await {
                error!("failed to persist rollover record: {}", err.message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn creates_today_with_all_checks_false() {
        let mut store = Store::seeded("2024-01-01".to_string());
        assert!(ensure_day(&mut store, date(2024, 1, 2)));

        let today = store.day("2024-01-02").expect("today missing");
        assert_eq!(today.checks.len(), store.routines.len());
        assert_eq!(today.completed(), 0);
        assert_eq!(store.days.len(), 2);
    }

    #[test]
    fn repeated_runs_are_no_ops() {
        let mut store = Store::seeded("2024-01-01".to_string());
        assert!(ensure_day(&mut store, date(2024, 1, 2)));
        assert!(!ensure_day(&mut store, date(2024, 1, 2)));
        assert!(!ensure_day(&mut store, date(2024, 1, 2)));
        assert_eq!(store.days.len(), 2);
    }

    #[test]
    fn does_not_disturb_prior_days() {
        let mut store = Store::seeded("2024-01-01".to_string());
        store
            .day_mut("2024-01-01")
            .unwrap()
            .checks
            .insert("Water".to_string(), true);
        let before = store.day("2024-01-01").unwrap().clone();

        ensure_day(&mut store, date(2024, 1, 2));
        assert_eq!(store.day("2024-01-01").unwrap(), &before);
    }

    #[test]
    fn uses_current_routine_set_without_backfill() {
        let mut store = Store::seeded("2024-01-01".to_string());
        store.routines.push("Reading".to_string());
        ensure_day(&mut store, date(2024, 1, 2));

        assert!(store.day("2024-01-02").unwrap().checks.contains_key("Reading"));
        // The older record predates the routine and stays as it was.
        assert!(!store.day("2024-01-01").unwrap().checks.contains_key("Reading"));
    }

    #[test]
    fn backward_clock_shift_keeps_future_record() {
        let mut store = Store::seeded("2024-01-05".to_string());
        assert!(ensure_day(&mut store, date(2024, 1, 4)));
        assert!(store.day("2024-01-05").is_some());
        assert!(store.day("2024-01-04").is_some());
        assert_eq!(store.days.len(), 2);
    }
}
