//! Request and response models shared by the planner, the trip sheet and the API

pub mod plan;
pub mod trip;

pub use plan::{AiPlan, Checkpoint, CostHints, DayPlan, PlanItem, SimilarPlace, Transport, Venue};
pub use trip::{BudgetTier, TripForm, Travelers};
