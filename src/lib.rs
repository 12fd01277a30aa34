pub mod ai;
pub mod app;
pub mod carbon;
pub mod coach;
pub mod config;
pub mod errors;
pub mod feedback;
pub mod handlers;
pub mod history;
pub mod mock;
pub mod models;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod state;

pub use app::router;
pub use carbon::{calculate_carbon, green_score};
pub use config::Config;
pub use state::AppState;
pub use storage::initial_data;
