//! Canned social content: class leaderboard, news feed and waste samples.

use crate::carbon::round_to;
use crate::models::{
    LeaderboardResponse, NewsArticle, RankingRow, WasteCategory, WasteClassification,
};
use rand::Rng;

pub const CLASS_SIZE: u32 = 42;
/// Rank the current user holds on the mocked board.
pub const CURRENT_USER_RANK: u32 = 7;

const CLASSMATES: [&str; 9] = [
    "Thanh Ha",
    "Duc Anh",
    "Thu Trang",
    "Hoang Nam",
    "Linh Chi",
    "Phuong Thao",
    "Van Duc",
    "Quang Huy",
    "Ngoc Bich",
];

/// Ten rows; the current user takes the `CURRENT_USER_RANK` slot.
pub fn leaderboard<R: Rng + ?Sized>(
    rng: &mut R,
    school: &str,
    current_user: &str,
    period: &str,
) -> LeaderboardResponse {
    let mut names: Vec<&str> = CLASSMATES.to_vec();
    names.insert(CURRENT_USER_RANK as usize - 1, current_user);

    let rankings = names
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let rank = i as u32 + 1;
            let is_current_user = rank == CURRENT_USER_RANK;
            let jitter: i32 = rng.gen_range(-3..=3);
            RankingRow {
                rank,
                name: name.to_string(),
                green_score: (95 - i as i32 * 5 + jitter).max(40) as u8,
                carbon_kg_avg: round_to(3.2 + i as f64 * 0.4, 1),
                streak_days: 28u32.saturating_sub(i as u32 * 2).max(1),
                is_current_user,
                highlight: (i == 0).then(|| "🚲 Cycles 5 days a week".to_string()),
            }
        })
        .collect();

    LeaderboardResponse {
        school: school.to_string(),
        period: period.to_string(),
        rankings,
    }
}

pub fn news_articles() -> Vec<NewsArticle> {
    vec![
        article(
            1,
            "Vietnam pledges a 43.5% cut in CO₂ emissions by 2030",
            "The government announced a plan built on renewable energy and green transport.",
            "Cycle or walk at least once this week",
            "VnExpress",
            "Policy",
        ),
        article(
            2,
            "Ocean plastic hits a record 170 trillion pieces",
            "New research finds ocean plastic has doubled in the last 15 years.",
            "Use a refillable bottle instead of plastic ones for 7 days",
            "BBC Earth",
            "Oceans",
        ),
        article(
            3,
            "The Amazon lost 10,000 km² of rainforest in 2023",
            "Deforestation remains worrying even though it slowed compared to the year before.",
            "Print double-sided and skip unnecessary paper this week",
            "NASA Climate",
            "Forests",
        ),
        article(
            4,
            "Vietnam's solar capacity reaches 20 GW, the most in Southeast Asia",
            "Vietnam became the country with the largest solar capacity in the region in 2023.",
            "Turn off lights and devices you are not using",
            "Tuoi Tre",
            "Energy",
        ),
    ]
}

fn article(
    id: u32,
    title: &str,
    summary: &str,
    action: &str,
    source: &str,
    tag: &str,
) -> NewsArticle {
    NewsArticle {
        id,
        title: title.to_string(),
        summary: summary.to_string(),
        ai_summary: String::new(),
        action: action.to_string(),
        source: source.to_string(),
        tag: tag.to_string(),
    }
}

pub fn waste_samples() -> Vec<WasteClassification> {
    vec![
        WasteClassification {
            category: WasteCategory::Plastic,
            emoji: "🍶".to_string(),
            co2_impact_kg: 0.082,
            tip: "Put plastic bottles in the yellow recycling bin. Rinse them first.".to_string(),
            action: "Use a refillable bottle instead of single-use plastic".to_string(),
            mocked: true,
        },
        WasteClassification {
            category: WasteCategory::Organic,
            emoji: "🌿".to_string(),
            co2_impact_kg: 0.012,
            tip: "Organic waste can be composted to feed plants.".to_string(),
            action: "Sort organic waste separately for compost".to_string(),
            mocked: true,
        },
        WasteClassification {
            category: WasteCategory::Paper,
            emoji: "📄".to_string(),
            co2_impact_kg: 0.031,
            tip: "Clean paper is recyclable and saves 70% of production energy.".to_string(),
            action: "Collect scrap paper for the school recycling box".to_string(),
            mocked: true,
        },
    ]
}

pub fn random_waste_sample() -> WasteClassification {
    let mut samples = waste_samples();
    let index = rand::thread_rng().gen_range(0..samples.len());
    samples.swap_remove(index)
}
