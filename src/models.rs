use crate::carbon::{
    calculate_carbon, green_score, Activity, CarbonBreakdown, CarbonReport, Category, ScoreBand,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEMO_USER_ID: &str = "demo_user";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub date: NaiveDate,
    pub activity: Activity,
    pub carbon: CarbonBreakdown,
    pub green_score: u8,
}

impl LogEntry {
    pub fn new(date: NaiveDate, activity: Activity) -> Self {
        let carbon = calculate_carbon(&activity);
        Self {
            date,
            green_score: green_score(carbon.total()),
            carbon,
            activity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub school: String,
    pub grade: String,
    pub joined: NaiveDate,
}

impl UserProfile {
    pub fn demo() -> Self {
        Self {
            name: "Lam Tran".to_string(),
            school: "Ly Thai To High School".to_string(),
            grade: "11Q1".to_string(),
            joined: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppData {
    pub users: BTreeMap<String, UserProfile>,
    pub entries: Vec<LogEntry>,
}

impl Default for AppData {
    fn default() -> Self {
        let mut users = BTreeMap::new();
        users.insert(DEMO_USER_ID.to_string(), UserProfile::demo());
        Self {
            users,
            entries: Vec::new(),
        }
    }
}

impl AppData {
    pub fn with_entries(entries: Vec<LogEntry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    /// Unknown ids resolve to the demo profile.
    pub fn profile(&self, user_id: &str) -> UserProfile {
        self.users
            .get(user_id)
            .or_else(|| self.users.get(DEMO_USER_ID))
            .cloned()
            .unwrap_or_else(UserProfile::demo)
    }
}

#[derive(Debug, Deserialize)]
pub struct LogActivityRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(flatten)]
    pub activity: Activity,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogActivityResponse {
    pub success: bool,
    pub date: NaiveDate,
    pub carbon: CarbonReport,
    pub green_score: u8,
    pub band: ScoreBand,
    pub dominant_category: Category,
    pub title: String,
    pub message: String,
    pub ai_feedback: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodaySummary {
    pub green_score: u8,
    pub band: ScoreBand,
    pub carbon: CarbonReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Worsening,
    Steady,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeekSummary {
    pub avg_carbon_kg: f64,
    pub prev_avg_carbon_kg: f64,
    pub improvement_pct: f64,
    pub trend: Trend,
    pub goal_pct: f64,
    pub goal_progress_pct: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EcoImpact {
    pub total_saved_kg: f64,
    pub trees_equivalent: f64,
    pub plastic_avoided: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub earned: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassRank {
    pub rank: u32,
    pub total: u32,
    pub percentile: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub green_score: u8,
    pub band: ScoreBand,
    pub carbon_kg: f64,
    pub breakdown: CarbonBreakdown,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub user: UserProfile,
    pub today: TodaySummary,
    pub week_summary: WeekSummary,
    pub eco_impact: EcoImpact,
    pub streak_days: u32,
    pub history_30d: Vec<HistoryPoint>,
    pub badges: Vec<Badge>,
    pub daily_tip: String,
    pub class_rank: ClassRank,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: UserProfile,
    pub avg_score: f64,
    pub days_logged: usize,
    pub trees_equivalent: f64,
    pub category_totals: BTreeMap<Category, f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TipResponse {
    pub tip: String,
    pub avg_carbon_kg: f64,
    pub top_category: Category,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RankingRow {
    pub rank: u32,
    pub name: String,
    pub green_score: u8,
    pub carbon_kg_avg: f64,
    pub streak_days: u32,
    pub is_current_user: bool,
    pub highlight: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub school: String,
    pub period: String,
    pub rankings: Vec<RankingRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: u32,
    pub title: String,
    pub summary: String,
    pub ai_summary: String,
    pub action: String,
    pub source: String,
    pub tag: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewsResponse {
    pub articles: Vec<NewsArticle>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeImageRequest {
    /// Base64 payload without the `data:` prefix.
    pub image_base64: String,
    #[serde(default)]
    pub media_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WasteCategory {
    Plastic,
    Organic,
    Paper,
    Metal,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteClassification {
    pub category: WasteCategory,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub co2_impact_kg: f64,
    #[serde(default)]
    pub tip: String,
    #[serde(default)]
    pub action: String,
    /// True when the answer came from the fallback table instead of the model.
    #[serde(default)]
    pub mocked: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
    pub version: String,
}
