use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Routine set a fresh Store starts with. The set is stored per snapshot, so
/// an imported Store may carry a different one.
pub const DEFAULT_ROUTINES: [&str; 5] = ["Exercise", "Meals", "Water", "Sleep", "Work"];

/// Completion flags for one calendar date. Records created before a routine
/// was added simply lack that key; readers treat missing as unchecked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: String,
    pub checks: BTreeMap<String, bool>,
}

impl DayRecord {
    pub fn blank(date: String, routines: &[String]) -> Self {
        let checks = routines.iter().map(|r| (r.clone(), false)).collect();
        Self { date, checks }
    }

    pub fn completed(&self) -> usize {
        self.checks.values().filter(|done| **done).count()
    }

    pub fn is_checked(&self, routine: &str) -> bool {
        self.checks.get(routine).copied().unwrap_or(false)
    }
}

/// The whole persisted state: one JSON document, read and written as a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub routines: Vec<String>,
    pub days: Vec<DayRecord>,
    #[serde(default = "default_version")]
    pub version: u32,
}

fn default_version() -> u32 {
    1
}

impl Store {
    /// Fresh state: default routines and a single all-unchecked record for
    /// `today`.
    pub fn seeded(today: String) -> Self {
        let routines: Vec<String> = DEFAULT_ROUTINES.iter().map(|r| (*r).to_string()).collect();
        let days = vec![DayRecord::blank(today, &routines)];
        Self {
            routines,
            days,
            version: 1,
        }
    }

    pub fn day(&self, date: &str) -> Option<&DayRecord> {
        self.days.iter().find(|d| d.date == date)
    }

    pub fn day_mut(&mut self, date: &str) -> Option<&mut DayRecord> {
        self.days.iter_mut().find(|d| d.date == date)
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub routine: String,
    pub done: bool,
}

/// Today's record as the UI sees it: every routine in the current set is
/// present, with missing flags filled in as false.
#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: String,
    pub checks: BTreeMap<String, bool>,
    pub completed: usize,
    pub routine_count: usize,
}

impl TodayResponse {
    pub fn from_record(record: &DayRecord, routines: &[String]) -> Self {
        let checks: BTreeMap<String, bool> = routines
            .iter()
            .map(|r| (r.clone(), record.is_checked(r)))
            .collect();
        let completed = checks.values().filter(|done| **done).count();
        Self {
            date: record.date.clone(),
            checks,
            completed,
            routine_count: routines.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayStat {
    pub date: String,
    pub completed: usize,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorePoint {
    pub date: String,
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub date: String,
    pub completed: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsOverview {
    pub per_day: Vec<DayStat>,
    pub cumulative: Vec<ScorePoint>,
    pub heatmap_weeks: Vec<Vec<HeatmapCell>>,
    pub routine_count: usize,
}

// Wire types for the remote proxy (/api/saveDay, /api/loadDays).

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveDayRequest {
    pub date: String,
    pub checks: BTreeMap<String, bool>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SaveDayAck {
    #[serde(default)]
    pub created: bool,
    #[serde(default)]
    pub updated: bool,
    #[serde(default, rename = "pageId", skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoadDaysResponse {
    pub days: Vec<DayRecord>,
}
