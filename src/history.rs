use crate::carbon::{round_to, Activity, FoodType, TransportMode};
use crate::models::LogEntry;
use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;

pub const HISTORY_DAYS: i64 = 30;

const TRANSPORTS: [TransportMode; 5] = [
    TransportMode::Motorbike,
    TransportMode::Bicycle,
    TransportMode::Walk,
    TransportMode::Bus,
    TransportMode::Motorbike,
];

const FOODS: [FoodType; 4] = [
    FoodType::Meat,
    FoodType::Meat,
    FoodType::Vegetarian,
    FoodType::Vegan,
];

/// Builds a month of demo entries ending yesterday, oldest first. Older days
/// travel further and use more electricity so the demo shows an improving trend.
pub fn generate_history<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> Vec<LogEntry> {
    let mut entries = Vec::with_capacity(HISTORY_DAYS as usize);
    for offset in (1..=HISTORY_DAYS).rev() {
        let date = today - Duration::days(offset);
        let improvement = offset as f64 / HISTORY_DAYS as f64;
        let activity = Activity {
            transport: *TRANSPORTS.choose(rng).unwrap_or(&TransportMode::Motorbike),
            km: round_to(rng.gen_range(2.0..15.0) * (0.5 + improvement * 0.5), 1),
            electricity_hours: round_to(rng.gen_range(2.0..6.0) * (0.6 + improvement * 0.4), 1),
            food: *FOODS.choose(rng).unwrap_or(&FoodType::Meat),
            plastic_items: rng.gen_range(0..=5),
            shower_minutes: f64::from(rng.gen_range(5u32..=20)),
        };
        entries.push(LogEntry::new(date, activity));
    }
    entries
}
