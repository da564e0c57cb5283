use crate::models::{DayRecord, LoadDaysResponse, SaveDayAck, SaveDayRequest};
use reqwest::Client;
use std::collections::BTreeMap;
use std::env;
use tracing::{info, warn};

/// Shared-secret header the remote proxy checks when it has a key configured.
pub const CLIENT_KEY_HEADER: &str = "x-client-key";

/// Best-effort mirror of day records to the remote proxy. The local Store is
/// the source of truth for the session; nothing here blocks or retries, and
/// every failure path ends in a log line rather than an error to the caller.
#[derive(Clone)]
pub struct SyncClient {
    http: Client,
    base_url: Option<String>,
    client_key: Option<String>,
}

/// What happened to a single-day push. Callers are free to ignore this
/// entirely; `Failed` already carries no obligation beyond the warning that
/// was logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Created,
    Updated,
    /// No remote configured; nothing was sent.
    Skipped,
    Failed,
}

impl SyncClient {
    pub fn new(base_url: Option<String>, client_key: Option<String>) -> Self {
        let base_url = base_url.map(|url| url.trim_end_matches('/').to_string());
        Self {
            http: Client::new(),
            base_url,
            client_key,
        }
    }

    pub fn from_env() -> Self {
        let base_url = env::var("REMOTE_SYNC_URL").ok().filter(|v| !v.is_empty());
        let client_key = env::var("REMOTE_CLIENT_KEY").ok().filter(|v| !v.is_empty());
        if base_url.is_none() {
            info!("no REMOTE_SYNC_URL configured, remote sync disabled");
        }
        Self::new(base_url, client_key)
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    /// Upsert one day at the remote. Never propagates an error: a failed push
    /// is simply lost until the next state change for that date.
    pub async fn push_day(&self, date: &str, checks: &BTreeMap<String, bool>) -> PushOutcome {
        let Some(base) = &self.base_url else {
            return PushOutcome::Skipped;
        };

        let body = SaveDayRequest {
            date: date.to_string(),
            checks: checks.clone(),
        };
        let mut request = self.http.post(format!("{base}/api/saveDay")).json(&body);
        if let Some(key) = &self.client_key {
            request = request.header(CLIENT_KEY_HEADER, key);
        }

        match request.send().await {
            Ok(resp) if resp.status().is_success() => match resp.json::<SaveDayAck>().await {
                Ok(ack) if ack.updated => PushOutcome::Updated,
                Ok(_) => PushOutcome::Created,
                Err(err) => {
                    warn!("remote save for {date} returned unreadable body: {err}");
                    PushOutcome::Failed
                }
            },
            Ok(resp) => {
                warn!("remote save for {date} failed: {}", resp.status());
                PushOutcome::Failed
            }
            Err(err) => {
                warn!("remote save for {date} failed: {err}");
                PushOutcome::Failed
            }
        }
    }

    /// Fetch every day record the remote knows about. `None` covers both "not
    /// configured / call failed" and is indistinguishable from it at this
    /// level; an empty `Some` is a successful pull of an empty remote, which
    /// callers also treat as "keep local state".
    pub async fn pull_all(&self) -> Option<Vec<DayRecord>> {
        let base = self.base_url.as_ref()?;

        let mut request = self.http.get(format!("{base}/api/loadDays"));
        if let Some(key) = &self.client_key {
            request = request.header(CLIENT_KEY_HEADER, key);
        }

        match request.send().await {
            Ok(resp) if resp.status().is_success() => match resp.json::<LoadDaysResponse>().await {
                Ok(body) => Some(body.days),
                Err(err) => {
                    warn!("remote load returned unreadable body: {err}");
                    None
                }
            },
            Ok(resp) => {
                warn!("remote load failed: {}", resp.status());
                None
            }
            Err(err) => {
                warn!("remote load failed: {err}");
                None
            }
        }
    }
}
