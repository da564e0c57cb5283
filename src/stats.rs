use crate::dates::{self, date_key, parse_date_key, weekday_index};
use crate::models::{DayRecord, DayStat, HeatmapCell, ScorePoint, StatsOverview, Store};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// Number of week columns in the heatmap window.
pub const HEATMAP_WEEKS: usize = 52;

pub fn build_stats(store: &Store) -> StatsOverview {
    build_stats_at(dates::today(), store)
}

/// Derive everything the UI charts from the Store. Pure: the Store is never
/// mutated, so this is safe to run on every request.
pub fn build_stats_at(today: NaiveDate, store: &Store) -> StatsOverview {
    let per_day = per_day_stats(&store.days, store.routines.len());
    let cumulative = cumulative_series(&per_day);
    let heatmap_weeks = heatmap_weeks(today, &store.days);

    StatsOverview {
        per_day,
        cumulative,
        heatmap_weeks,
        routine_count: store.routines.len(),
    }
}

/// Strict majority: exactly half does not count.
pub fn is_success(completed: usize, routine_count: usize) -> bool {
    completed * 2 > routine_count
}

/// Per-day completion counts in date order. Date keys are fixed-width, so
/// string sort is chronological sort, and the result does not depend on the
/// insertion order of `days`.
pub fn per_day_stats(days: &[DayRecord], routine_count: usize) -> Vec<DayStat> {
    let mut sorted: Vec<&DayRecord> = days.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));

    sorted
        .into_iter()
        .map(|day| {
            let completed = day.completed();
            DayStat {
                date: day.date.clone(),
                completed,
                success: is_success(completed, routine_count),
            }
        })
        .collect()
}

/// Prefix scan over the sorted per-day stats: +1 for a success day, -1
/// otherwise, carried from the earliest record.
pub fn cumulative_series(per_day: &[DayStat]) -> Vec<ScorePoint> {
    let mut score = 0i64;
    per_day
        .iter()
        .map(|day| {
            score += if day.success { 1 } else { -1 };
            ScorePoint {
                date: day.date.clone(),
                score,
            }
        })
        .collect()
}

/// Every date in the inclusive window `[today - 7*52 + 1, today]`, zero-filled
/// where no record exists, grouped into week columns that break at each
/// Monday. The first and last columns may be shorter than seven days.
pub fn heatmap_weeks(today: NaiveDate, days: &[DayRecord]) -> Vec<Vec<HeatmapCell>> {
    let by_date: BTreeMap<&str, &DayRecord> =
        days.iter().map(|d| (d.date.as_str(), d)).collect();
    let window = (7 * HEATMAP_WEEKS) as i64;
    let start = today - Duration::days(window - 1);

    let mut weeks: Vec<Vec<HeatmapCell>> = Vec::with_capacity(HEATMAP_WEEKS + 1);
    let mut bucket: Vec<HeatmapCell> = Vec::with_capacity(7);

    for offset in 0..window {
        let date = start + Duration::days(offset);
        if weekday_index(date) == 0 && !bucket.is_empty() {
            weeks.push(std::mem::take(&mut bucket));
        }
        let key = date_key(date);
        let completed = by_date
            .get(key.as_str())
            .map(|day| day.completed())
            .unwrap_or(0);
        bucket.push(HeatmapCell {
            date: key,
            completed,
        });
    }
    if !bucket.is_empty() {
        weeks.push(bucket);
    }

    weeks
}
