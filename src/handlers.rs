use crate::carbon::{round_to, ScoreBand};
use crate::errors::AppError;
use crate::feedback::{feedback_message, greeting, modal_title, random_tip};
use crate::mock::{leaderboard, news_articles};
use crate::models::{
    AnalyzeImageRequest, DashboardResponse, HealthResponse, LeaderboardResponse,
    LogActivityRequest, LogActivityResponse, LogEntry, NewsResponse, ProfileResponse,
    TipResponse, WasteClassification, DEMO_USER_ID,
};
use crate::state::AppState;
use crate::stats::{
    average_total, build_dashboard, build_profile, last_n, today_summary, top_category,
};
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Html,
    Json,
};
use chrono::{Duration, Local, NaiveDate, Timelike};
use tracing::info;

/// How far back an activity may be logged.
const MAX_BACKDATE_DAYS: i64 = 365;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let hour = Local::now().hour();
    let data = state.data.lock().await;
    let user = data.profile(DEMO_USER_ID);
    let today = today_summary(&data.entries);
    Html(render_index(greeting(hour), &user, &today))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Green Track API is running 🌿".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<DashboardResponse>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(build_dashboard(&data, &user_id, random_tip().to_string())))
}

pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileResponse>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(build_profile(&data, &user_id)))
}

pub async fn get_tip(State(state): State<AppState>) -> Result<Json<TipResponse>, AppError> {
    let (avg_kg, top) = {
        let data = state.data.lock().await;
        let week = last_n(&data.entries, 7);
        (average_total(week), top_category(week))
    };

    let tip = state.coach.daily_tip(avg_kg, top).await;
    Ok(Json(TipResponse {
        tip,
        avg_carbon_kg: round_to(avg_kg, 2),
        top_category: top,
    }))
}

pub async fn log_activity(
    State(state): State<AppState>,
    payload: Result<Json<LogActivityRequest>, JsonRejection>,
) -> Result<Json<LogActivityResponse>, AppError> {
    let Json(payload) = payload?;
    payload.activity.validate()?;

    let today = today();
    let date = payload.date.unwrap_or(today);
    check_log_date(date, today)?;
    let entry = LogEntry::new(date, payload.activity);
    let user_id = payload.user_id.as_deref().unwrap_or(DEMO_USER_ID);

    {
        let mut data = state.data.lock().await;
        match &state.data_path {
            Some(path) => {
                let mut next = data.clone();
                next.entries.push(entry.clone());
                persist_data(path, &next).await?;
                *data = next;
            }
            None => data.entries.push(entry.clone()),
        }
    }
    info!(
        "logged {date} for {user_id}: {:.3} kg, score {}",
        entry.carbon.total(),
        entry.green_score
    );

    let report = entry.carbon.report();
    let dominant = entry.carbon.dominant();
    let ai_feedback = state
        .coach
        .activity_feedback(entry.green_score, &report, &entry.activity, dominant)
        .await;

    Ok(Json(LogActivityResponse {
        success: true,
        date,
        carbon: report,
        green_score: entry.green_score,
        band: ScoreBand::from_score(entry.green_score),
        dominant_category: dominant,
        title: modal_title(entry.green_score).to_string(),
        message: feedback_message(entry.green_score).to_string(),
        ai_feedback,
    }))
}

pub async fn get_leaderboard(
    State(state): State<AppState>,
    Path(school): Path<String>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    let user = {
        let data = state.data.lock().await;
        data.profile(DEMO_USER_ID)
    };
    let period = Local::now().format("%B %Y").to_string();
    let board = leaderboard(&mut rand::thread_rng(), &school, &user.name, &period);
    Ok(Json(board))
}

pub async fn get_news(State(state): State<AppState>) -> Result<Json<NewsResponse>, AppError> {
    let mut articles = news_articles();
    for article in &mut articles {
        article.ai_summary = state
            .coach
            .news_summary(&article.title, &article.summary)
            .await;
    }
    Ok(Json(NewsResponse { articles }))
}

pub async fn analyze_image(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeImageRequest>, JsonRejection>,
) -> Result<Json<WasteClassification>, AppError> {
    let Json(payload) = payload?;
    let image = payload.image_base64.trim();
    if image.is_empty() {
        return Err(AppError::bad_request("image_base64 must not be empty"));
    }
    let media_type = payload.media_type.as_deref().unwrap_or("image/jpeg");
    if !media_type.starts_with("image/") {
        return Err(AppError::bad_request("media_type must be an image type"));
    }

    Ok(Json(state.coach.classify_waste(image, media_type).await))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn check_log_date(date: NaiveDate, today: NaiveDate) -> Result<(), AppError> {
    if date > today {
        return Err(AppError::bad_request("date must not be in the future"));
    }
    let earliest = today
        .checked_sub_signed(Duration::days(MAX_BACKDATE_DAYS))
        .unwrap_or(NaiveDate::MIN);
    if date < earliest {
        return Err(AppError::bad_request(format!(
            "date must be within the last {MAX_BACKDATE_DAYS} days"
        )));
    }
    Ok(())
}
