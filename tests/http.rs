use green_track::carbon::{Activity, FoodType, TransportMode};
use green_track::{calculate_carbon, green_score};
use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct CarbonReport {
    total_kg: f64,
}

#[derive(Debug, Deserialize)]
struct LogActivityResponse {
    success: bool,
    carbon: CarbonReport,
    green_score: u8,
    message: String,
    ai_feedback: String,
}

#[derive(Debug, Deserialize)]
struct TodaySummary {
    green_score: u8,
}

#[derive(Debug, Deserialize)]
struct HistoryPoint {
    green_score: u8,
}

#[derive(Debug, Deserialize)]
struct DashboardResponse {
    today: TodaySummary,
    history_30d: Vec<HistoryPoint>,
    badges: Vec<serde_json::Value>,
    daily_tip: String,
}

#[derive(Debug, Deserialize)]
struct RankingRow {
    rank: u32,
    is_current_user: bool,
}

#[derive(Debug, Deserialize)]
struct LeaderboardResponse {
    school: String,
    rankings: Vec<RankingRow>,
}

#[derive(Debug, Deserialize)]
struct WasteClassification {
    mocked: bool,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    message: String,
    version: String,
}

#[derive(Debug, Deserialize)]
struct TipResponse {
    tip: String,
    avg_carbon_kg: f64,
    top_category: String,
}

#[derive(Debug, Deserialize)]
struct UserProfile {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    user: UserProfile,
    days_logged: usize,
    category_totals: BTreeMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct NewsArticle {
    summary: String,
    ai_summary: String,
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    articles: Vec<NewsArticle>,
}

struct TestServer {
    base_url: String,
    data_path: String,
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
    path.push(format!("green_track_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/health")).send().await {
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
    let child = Command::new(env!("CARGO_BIN_EXE_green_track"))
        .env("PORT", port.to_string())
        .env("GREEN_TRACK_DATA_PATH", &data_path)
        .env("GREEN_TRACK_SEED", "42")
        .env_remove("AI_API_KEY")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer {
        base_url,
        data_path,
        child,
    }
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

async fn get_json<T: serde::de::DeserializeOwned>(client: &Client, url: String) -> T {
    let response = client.get(url).send().await.unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

async fn post_activity(client: &Client, base_url: &str, body: serde_json::Value) -> reqwest::Response {
    client
        .post(format!("{base_url}/api/log-activity"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

async fn dashboard(client: &Client, base_url: &str) -> DashboardResponse {
    client
        .get(format!("{base_url}/api/dashboard/demo_user"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_dashboard_has_month_of_history() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let data = dashboard(&client, &server.base_url).await;
    assert_eq!(data.history_30d.len(), 30);
    assert!(data.history_30d.iter().all(|p| p.green_score <= 100));
    assert!(data.badges.len() >= 2);
    assert!(!data.daily_tip.is_empty());
}

#[tokio::test]
async fn http_log_activity_becomes_today() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/log-activity", server.base_url))
        .json(&serde_json::json!({
            "user_id": "demo_user",
            "transport": "bus",
            "km": 6,
            "electricity_hours": 2.5,
            "food": "vegan",
            "plastic_items": 1,
            "shower_minutes": 7
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let logged: LogActivityResponse = response.json().await.unwrap();

    let expected = calculate_carbon(&Activity {
        transport: TransportMode::Bus,
        km: 6.0,
        electricity_hours: 2.5,
        food: FoodType::Vegan,
        plastic_items: 1,
        shower_minutes: 7.0,
    });
    assert!(logged.success);
    assert!((logged.carbon.total_kg - expected.total()).abs() < 0.001);
    assert_eq!(logged.green_score, green_score(expected.total()));
    assert!(!logged.message.is_empty());
    assert!(!logged.ai_feedback.is_empty());

    let data = dashboard(&client, &server.base_url).await;
    assert_eq!(data.today.green_score, logged.green_score);
    assert_eq!(data.history_30d.len(), 30);

    let snapshot = std::fs::read_to_string(&server.data_path).expect("snapshot written");
    assert!(snapshot.contains("\"entries\""));
}

#[tokio::test]
async fn http_log_activity_rejects_negative_distance() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/log-activity", server.base_url))
        .json(&serde_json::json!({ "transport": "walk", "km": -2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.text().await.unwrap().contains("km"));
}

#[tokio::test]
async fn http_leaderboard_includes_current_user() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let board: LeaderboardResponse = client
        .get(format!("{}/api/leaderboard/green-school", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(board.school, "green-school");
    assert_eq!(board.rankings.len(), 10);
    let me: Vec<_> = board.rankings.iter().filter(|r| r.is_current_user).collect();
    assert_eq!(me.len(), 1);
    assert_eq!(me[0].rank, 7);
}

#[tokio::test]
async fn http_analyze_image_falls_back_without_ai() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let result: WasteClassification = client
        .post(format!("{}/api/analyze-image", server.base_url))
        .json(&serde_json::json!({ "image_base64": "iVBORw0KGgo=", "media_type": "image/png" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(result.mocked);

    let empty = client
        .post(format!("{}/api/analyze-image", server.base_url))
        .json(&serde_json::json!({ "image_base64": "  " }))
        .send()
        .await
        .unwrap();
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_index_renders_page() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let body = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Green Score"));
    assert!(!body.contains("{{"));
}

#[tokio::test]
async fn http_log_activity_rejects_negative_plastic_count() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = post_activity(
        &client,
        &server.base_url,
        serde_json::json!({ "plastic_items": -2 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_activity(
        &client,
        &server.base_url,
        serde_json::json!({ "plastic_items": "many" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_log_activity_rejects_out_of_range_dates() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    for date in ["-262143-01-01", "1999-01-01", "9999-12-31"] {
        let response = post_activity(
            &client,
            &server.base_url,
            serde_json::json!({ "date": date, "km": 1 }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "date {date}");
        assert!(response.text().await.unwrap().contains("date"));
    }

    let data = dashboard(&client, &server.base_url).await;
    assert_eq!(data.history_30d.len(), 30);
}

#[tokio::test]
async fn http_health_reports_version() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let health: HealthResponse = get_json(&client, format!("{}/api/health", server.base_url)).await;
    assert!(health.message.contains("running"));
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn http_tip_uses_static_tip_without_ai() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let tip: TipResponse = get_json(&client, format!("{}/api/tip", server.base_url)).await;
    assert_eq!(tip.tip, green_track::feedback::FALLBACK_TIP);
    assert!(tip.avg_carbon_kg > 0.0);
    assert!(!tip.top_category.is_empty());
}

#[tokio::test]
async fn http_profile_for_unknown_user_is_demo_profile() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let demo: ProfileResponse =
        get_json(&client, format!("{}/api/profile/demo_user", server.base_url)).await;
    let stranger: ProfileResponse =
        get_json(&client, format!("{}/api/profile/nobody-here", server.base_url)).await;
    assert_eq!(stranger.user.name, demo.user.name);
    assert_eq!(stranger.user.name, "Lam Tran");
    assert!(stranger.days_logged >= 30);
    assert_eq!(stranger.category_totals.len(), 5);
}

#[tokio::test]
async fn http_news_has_summaries_without_ai() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let news: NewsResponse = get_json(&client, format!("{}/api/news", server.base_url)).await;
    assert_eq!(news.articles.len(), 4);
    for article in &news.articles {
        assert!(!article.ai_summary.is_empty());
        assert!(article.ai_summary.starts_with("🌍 "));
        assert!(article.ai_summary.ends_with("..."));
        assert!(article.ai_summary.chars().count() <= article.summary.chars().count() + 5);
    }
}
