//! `TripPlanner` - AI-assisted day-by-day trip itineraries
//!
//! This library turns a trip brief into a sanitized itinerary via a
//! text-generation model, and adds the supporting pieces the trip page
//! needs: place photos, cost estimates, deep links and a printable sheet.

pub mod api;
pub mod cache;
pub mod config;
pub mod costs;
pub mod deeplinks;
pub mod error;
pub mod format;
pub mod itinerary;
pub mod llm;
pub mod logging;
pub mod models;
pub mod photos;
pub mod planner;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use cache::PersistentCache;
pub use config::TripPlannerConfig;
pub use error::TripPlannerError;
pub use llm::{GeminiClient, TextGenerator};
pub use models::{AiPlan, BudgetTier, DayPlan, PlanItem, TripForm, Travelers};
pub use photos::PhotoResolver;
pub use planner::PlanService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripPlannerError>;
