use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::warn;

/// Average daily emissions of a student, in kg CO2e. Scores and eco impact are
/// measured against it.
pub const BASELINE_KG: f64 = 8.0;

const GRID_KG_PER_KWH: f64 = 0.4935;
const KWH_PER_HOUR: f64 = 0.15;
const PLASTIC_KG_PER_ITEM: f64 = 0.082;
const SHOWER_KG_PER_MINUTE: f64 = 0.298 / 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TransportMode {
    #[default]
    Motorbike,
    Car,
    Bus,
    Bicycle,
    Walk,
}

impl TransportMode {
    pub fn kg_per_km(self) -> f64 {
        match self {
            TransportMode::Motorbike => 0.104,
            TransportMode::Car => 0.192,
            TransportMode::Bus => 0.089,
            TransportMode::Bicycle | TransportMode::Walk => 0.0,
        }
    }

    pub fn is_green(self) -> bool {
        matches!(self, TransportMode::Bicycle | TransportMode::Walk)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Motorbike => "motorbike",
            TransportMode::Car => "car",
            TransportMode::Bus => "bus",
            TransportMode::Bicycle => "bicycle",
            TransportMode::Walk => "walk",
        }
    }
}

impl From<String> for TransportMode {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "motorbike" => TransportMode::Motorbike,
            "car" => TransportMode::Car,
            "bus" => TransportMode::Bus,
            "bicycle" => TransportMode::Bicycle,
            "walk" => TransportMode::Walk,
            other => {
                warn!("unknown transport mode {other:?}, using motorbike");
                TransportMode::default()
            }
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum FoodType {
    #[default]
    Meat,
    Vegetarian,
    Vegan,
}

impl FoodType {
    pub fn kg_per_day(self) -> f64 {
        match self {
            FoodType::Meat => 3.3,
            FoodType::Vegetarian => 1.7,
            FoodType::Vegan => 0.9,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FoodType::Meat => "meat",
            FoodType::Vegetarian => "vegetarian",
            FoodType::Vegan => "vegan",
        }
    }
}

impl From<String> for FoodType {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "meat" => FoodType::Meat,
            "vegetarian" => FoodType::Vegetarian,
            "vegan" => FoodType::Vegan,
            other => {
                warn!("unknown food type {other:?}, using meat");
                FoodType::default()
            }
        }
    }
}

impl fmt::Display for FoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One day of lifestyle inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    pub transport: TransportMode,
    pub km: f64,
    pub electricity_hours: f64,
    pub food: FoodType,
    pub plastic_items: u32,
    pub shower_minutes: f64,
}

impl Default for Activity {
    fn default() -> Self {
        Self {
            transport: TransportMode::default(),
            km: 0.0,
            electricity_hours: 0.0,
            food: FoodType::default(),
            plastic_items: 0,
            shower_minutes: 10.0,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
}

impl Activity {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("km", self.km),
            ("electricity_hours", self.electricity_hours),
            ("shower_minutes", self.shower_minutes),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::NotFinite { field });
            }
            if value < 0.0 {
                return Err(ValidationError::Negative { field });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Transport,
    Electricity,
    Food,
    Plastic,
    Water,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Transport,
        Category::Electricity,
        Category::Food,
        Category::Plastic,
        Category::Water,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Transport => "transport",
            Category::Electricity => "electricity",
            Category::Food => "food",
            Category::Plastic => "plastic",
            Category::Water => "water",
        }
    }
}

/// Per-category emissions for one day, in kg CO2e, unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CarbonBreakdown {
    pub transport: f64,
    pub electricity: f64,
    pub plastic: f64,
    pub food: f64,
    pub water: f64,
}

impl CarbonBreakdown {
    pub fn total(&self) -> f64 {
        self.transport + self.electricity + self.plastic + self.food + self.water
    }

    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Transport => self.transport,
            Category::Electricity => self.electricity,
            Category::Food => self.food,
            Category::Plastic => self.plastic,
            Category::Water => self.water,
        }
    }

    /// Largest contributor. Ties go to the category listed first in `Category::ALL`.
    pub fn dominant(&self) -> Category {
        let mut best = Category::Transport;
        for category in Category::ALL {
            if self.get(category) > self.get(best) {
                best = category;
            }
        }
        best
    }

    pub fn accumulate(&mut self, other: &CarbonBreakdown) {
        self.transport += other.transport;
        self.electricity += other.electricity;
        self.plastic += other.plastic;
        self.food += other.food;
        self.water += other.water;
    }

    pub fn report(&self) -> CarbonReport {
        CarbonReport {
            total_kg: round_to(self.total(), 3),
            breakdown: CarbonBreakdown {
                transport: round_to(self.transport, 3),
                electricity: round_to(self.electricity, 3),
                plastic: round_to(self.plastic, 3),
                food: round_to(self.food, 3),
                water: round_to(self.water, 3),
            },
        }
    }
}

/// Rounded view of a breakdown, as returned by the API.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CarbonReport {
    pub total_kg: f64,
    pub breakdown: CarbonBreakdown,
}

pub fn calculate_carbon(activity: &Activity) -> CarbonBreakdown {
    CarbonBreakdown {
        transport: activity.transport.kg_per_km() * activity.km,
        electricity: KWH_PER_HOUR * activity.electricity_hours * GRID_KG_PER_KWH,
        plastic: PLASTIC_KG_PER_ITEM * f64::from(activity.plastic_items),
        food: activity.food.kg_per_day(),
        water: SHOWER_KG_PER_MINUTE * activity.shower_minutes,
    }
}

/// Maps a daily total onto 0..=100. The baseline scores 20, zero emissions score 100.
pub fn green_score(total_kg: f64) -> u8 {
    if total_kg <= 0.0 {
        return 100;
    }
    let ratio = total_kg / BASELINE_KG;
    let raw = ((1.0 - ratio) * 80.0 + 20.0).round();
    if raw.is_nan() {
        return 0;
    }
    raw.clamp(0.0, 100.0) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Good,
    Ok,
    Bad,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        if score >= 70 {
            ScoreBand::Good
        } else if score >= 50 {
            ScoreBand::Ok
        } else {
            ScoreBand::Bad
        }
    }
}

/// Values too large to scale are returned as they are.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}
