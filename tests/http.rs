use once_cell::sync::Lazy;
use reqwest::Client;
use routine_tracker::models::{StatsOverview, TodayResponse};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "routine_tracker_http_{}_{}.json",
        std::process::id(),
        nanos
    ));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/today")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_routine_tracker"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .env_remove("REMOTE_SYNC_URL")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn fetch_today(client: &Client, base_url: &str) -> TodayResponse {
    client
        .get(format!("{base_url}/api/today"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_today_carries_the_full_routine_set() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let today = fetch_today(&client, &server.base_url).await;
    assert_eq!(today.routine_count, 5);
    assert_eq!(today.checks.len(), 5);
    assert!(!today.date.is_empty());
}

#[tokio::test]
async fn http_check_toggles_one_routine() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_today(&client, &server.base_url).await;
    let routine = before.checks.keys().next().unwrap().clone();

    let on: TodayResponse = client
        .post(format!("{}/api/check", server.base_url))
        .json(&serde_json::json!({ "routine": routine, "done": true }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(on.checks[&routine], true);
    assert!(on.completed >= 1);

    let off: TodayResponse = client
        .post(format!("{}/api/check", server.base_url))
        .json(&serde_json::json!({ "routine": routine, "done": false }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(off.checks[&routine], false);
    assert_eq!(off.completed, on.completed - 1);
}

#[tokio::test]
async fn http_check_rejects_unknown_routine() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/check", server.base_url))
        .json(&serde_json::json!({ "routine": "Jetpacks", "done": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_stats_overview_has_expected_shape() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let today = fetch_today(&client, &server.base_url).await;
    let stats: StatsOverview = client
        .get(format!("{}/api/stats", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(stats.routine_count, 5);
    assert!(!stats.per_day.is_empty());
    assert_eq!(stats.per_day.len(), stats.cumulative.len());
    assert_eq!(stats.per_day.last().unwrap().date, today.date);

    let heatmap_cells: usize = stats.heatmap_weeks.iter().map(Vec::len).sum();
    assert_eq!(heatmap_cells, 7 * 52);
    assert_eq!(stats.heatmap_weeks.iter().flatten().last().unwrap().date, today.date);
}

#[tokio::test]
async fn http_reset_today_clears_all_checks() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let today = fetch_today(&client, &server.base_url).await;
    let routine = today.checks.keys().next().unwrap().clone();
    client
        .post(format!("{}/api/check", server.base_url))
        .json(&serde_json::json!({ "routine": routine, "done": true }))
        .send()
        .await
        .unwrap();

    let after: TodayResponse = client
        .post(format!("{}/api/resetToday", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(after.completed, 0);
    assert!(after.checks.values().all(|done| !done));
}

#[tokio::test]
async fn http_import_missing_days_is_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_today(&client, &server.base_url).await;

    let response = client
        .post(format!("{}/api/import", server.base_url))
        .json(&serde_json::json!({ "routines": ["A", "B"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    // Existing state is untouched by the failed import.
    let after = fetch_today(&client, &server.base_url).await;
    assert_eq!(after.routine_count, before.routine_count);
    assert_eq!(after.checks, before.checks);
}

#[tokio::test]
async fn http_export_import_round_trips() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let export = client
        .get(format!("{}/api/export", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(export.status().is_success());
    let disposition = export
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains("routine-tracker-"));

    let snapshot: serde_json::Value = export.json().await.unwrap();
    assert!(snapshot.get("days").is_some_and(|v| v.is_array()));
    assert!(snapshot.get("routines").is_some_and(|v| v.is_array()));

    let before = fetch_today(&client, &server.base_url).await;
    let response = client
        .post(format!("{}/api/import", server.base_url))
        .json(&snapshot)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let after = fetch_today(&client, &server.base_url).await;
    assert_eq!(after.checks, before.checks);
}
