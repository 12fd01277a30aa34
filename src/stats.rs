use crate::carbon::{round_to, CarbonBreakdown, Category, ScoreBand, BASELINE_KG};
use crate::mock::{CLASS_SIZE, CURRENT_USER_RANK};
use crate::models::{
    AppData, Badge, ClassRank, DashboardResponse, EcoImpact, HistoryPoint, LogEntry,
    ProfileResponse, TodaySummary, Trend, WeekSummary,
};
use std::collections::BTreeMap;

const WEEK: usize = 7;
/// kg of CO2 one tree absorbs in a year.
const TREE_KG_PER_YEAR: f64 = 21.77;
const PLASTIC_ALLOWANCE: u32 = 3;
const GOAL_REDUCTION_PCT: f64 = 20.0;
const DEFAULT_SCORE: u8 = 70;

pub fn build_dashboard(data: &AppData, user_id: &str, daily_tip: String) -> DashboardResponse {
    let entries = &data.entries;
    DashboardResponse {
        user: data.profile(user_id),
        today: today_summary(entries),
        week_summary: week_summary(entries),
        eco_impact: eco_impact(entries),
        streak_days: streak_days(entries),
        history_30d: history_points(last_n(entries, 30)),
        badges: compute_badges(entries),
        daily_tip,
        class_rank: class_rank(CURRENT_USER_RANK, CLASS_SIZE),
    }
}

pub fn build_profile(data: &AppData, user_id: &str) -> ProfileResponse {
    let entries = &data.entries;
    let avg_score = if entries.is_empty() {
        0.0
    } else {
        let sum: f64 = entries.iter().map(|e| f64::from(e.green_score)).sum();
        round_to(sum / entries.len() as f64, 0)
    };

    ProfileResponse {
        user: data.profile(user_id),
        avg_score,
        days_logged: entries.len(),
        trees_equivalent: round_to(saved_kg(entries) / TREE_KG_PER_YEAR, 1),
        category_totals: category_totals(last_n(entries, 30))
            .into_iter()
            .map(|(category, kg)| (category, round_to(kg, 1)))
            .collect(),
    }
}

pub fn today_summary(entries: &[LogEntry]) -> TodaySummary {
    match entries.last() {
        Some(latest) => TodaySummary {
            green_score: latest.green_score,
            band: ScoreBand::from_score(latest.green_score),
            carbon: latest.carbon.report(),
        },
        None => TodaySummary {
            green_score: DEFAULT_SCORE,
            band: ScoreBand::from_score(DEFAULT_SCORE),
            carbon: CarbonBreakdown::default().report(),
        },
    }
}

pub fn week_summary(entries: &[LogEntry]) -> WeekSummary {
    let split = entries.len().saturating_sub(WEEK);
    let this_week = &entries[split..];
    let prev_week = last_n(&entries[..split], WEEK);

    let avg = average_total(this_week);
    let prev_avg = average_total(prev_week);
    let improvement_pct = if prev_avg > 0.0 {
        round_to((prev_avg - avg) / prev_avg * 100.0, 1)
    } else {
        0.0
    };
    let trend = if improvement_pct > 0.0 {
        Trend::Improving
    } else if improvement_pct < 0.0 {
        Trend::Worsening
    } else {
        Trend::Steady
    };
    let goal_pct = improvement_pct.clamp(0.0, 100.0);

    WeekSummary {
        avg_carbon_kg: round_to(avg, 2),
        prev_avg_carbon_kg: round_to(prev_avg, 2),
        improvement_pct,
        trend,
        goal_pct,
        goal_progress_pct: round_to((goal_pct / GOAL_REDUCTION_PCT * 100.0).min(100.0), 1),
    }
}

pub fn eco_impact(entries: &[LogEntry]) -> EcoImpact {
    let saved = saved_kg(entries);
    EcoImpact {
        total_saved_kg: round_to(saved, 1),
        trees_equivalent: round_to(saved / TREE_KG_PER_YEAR, 2),
        plastic_avoided: entries
            .iter()
            .map(|e| PLASTIC_ALLOWANCE.saturating_sub(e.activity.plastic_items))
            .sum(),
    }
}

/// Badges are judged on the most recent week. The last two are goals the demo
/// never awards.
pub fn compute_badges(entries: &[LogEntry]) -> Vec<Badge> {
    let recent = last_n(entries, WEEK);
    let mut badges = Vec::new();

    let plastic_free = recent.iter().filter(|e| e.activity.plastic_items == 0).count();
    if plastic_free >= 7 {
        badges.push(badge("plastic_free_week", "7 Plastic-Free Days", "♻️", true));
    } else if plastic_free >= 3 {
        badges.push(badge("plastic_free_3", "3 Plastic-Free Days", "♻️", true));
    }

    let green_days = recent.iter().filter(|e| e.activity.transport.is_green()).count();
    if green_days >= 5 {
        badges.push(badge("green_commuter", "Green Commuter", "🚲", true));
    }

    let score_sum: f64 = recent.iter().map(|e| f64::from(e.green_score)).sum();
    if score_sum / recent.len().max(1) as f64 >= 75.0 {
        badges.push(badge("eco_champion", "Eco Champion", "🏆", true));
    }

    badges.push(badge("vegan_week", "Vegan Week", "🥗", false));
    badges.push(badge("zero_emission", "Zero Emission Day", "⚡", false));
    badges
}

/// Consecutive calendar days with at least one entry, counted back from the latest entry.
pub fn streak_days(entries: &[LogEntry]) -> u32 {
    let Some(latest) = entries.last() else {
        return 0;
    };
    let mut streak = 1;
    let mut current = latest.date;
    for entry in entries.iter().rev().skip(1) {
        if entry.date == current {
            continue;
        }
        match current.pred_opt() {
            Some(previous) if entry.date == previous => {
                streak += 1;
                current = previous;
            }
            _ => break,
        }
    }
    streak
}

pub fn class_rank(rank: u32, total: u32) -> ClassRank {
    let percentile = if total == 0 {
        0
    } else {
        ((1.0 - f64::from(rank) / f64::from(total)) * 100.0).round() as u32
    };
    ClassRank {
        rank,
        total,
        percentile,
    }
}

pub fn category_totals(entries: &[LogEntry]) -> BTreeMap<Category, f64> {
    let mut sum = CarbonBreakdown::default();
    for entry in entries {
        sum.accumulate(&entry.carbon);
    }
    Category::ALL
        .into_iter()
        .map(|category| (category, sum.get(category)))
        .collect()
}

pub fn top_category(entries: &[LogEntry]) -> Category {
    let mut sum = CarbonBreakdown::default();
    for entry in entries {
        sum.accumulate(&entry.carbon);
    }
    sum.dominant()
}

pub fn average_total(entries: &[LogEntry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    entries.iter().map(|e| e.carbon.total()).sum::<f64>() / entries.len() as f64
}

pub fn last_n(entries: &[LogEntry], n: usize) -> &[LogEntry] {
    &entries[entries.len().saturating_sub(n)..]
}

fn history_points(entries: &[LogEntry]) -> Vec<HistoryPoint> {
    entries
        .iter()
        .map(|entry| {
            let report = entry.carbon.report();
            HistoryPoint {
                date: entry.date,
                green_score: entry.green_score,
                band: ScoreBand::from_score(entry.green_score),
                carbon_kg: report.total_kg,
                breakdown: report.breakdown,
            }
        })
        .collect()
}

fn saved_kg(entries: &[LogEntry]) -> f64 {
    entries
        .iter()
        .map(|e| (BASELINE_KG - e.carbon.total()).max(0.0))
        .sum()
}

fn badge(id: &str, name: &str, icon: &str, earned: bool) -> Badge {
    Badge {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        earned,
    }
}
