//! The sanitized itinerary returned to the client

use serde::{Deserialize, Serialize};

/// One time-boxed block of a day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanItem {
    #[serde(default)]
    pub time: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl PlanItem {
    pub fn new(time: &str, title: &str, note: &str) -> Self {
        Self {
            time: time.to_string(),
            title: title.to_string(),
            note: Some(note.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub date: String,
    #[serde(default)]
    pub plan: Vec<PlanItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stay_tonight: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why: Option<String>,
}

/// A hotel or restaurant suggestion with the text to search it by
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub google_query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transport {
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub google_query: String,
}

/// Rough per-unit prices suggested by the model, all INR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostHints {
    #[serde(
        rename = "stayPerNightHintINR",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub stay_per_night_hint_inr: Option<f64>,
    #[serde(
        rename = "foodPerAdultPerDayINR",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub food_per_adult_per_day_inr: Option<f64>,
    #[serde(
        rename = "attractionsPerAdultINR",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub attractions_per_adult_inr: Option<f64>,
}

impl CostHints {
    #[must_use]
    pub fn zero() -> Self {
        Self {
            stay_per_night_hint_inr: Some(0.0),
            food_per_adult_per_day_inr: Some(0.0),
            attractions_per_adult_inr: Some(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarPlace {
    pub place: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why: Option<String>,
}

/// Itinerary built for a single request; no identity, no versioning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiPlan {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub days: Vec<DayPlan>,
    #[serde(default)]
    pub checkpoints: Vec<Checkpoint>,
    #[serde(default)]
    pub hotels: Vec<Venue>,
    #[serde(default)]
    pub restaurants: Vec<Venue>,
    #[serde(default)]
    pub transports: Vec<Transport>,
    #[serde(default = "CostHints::zero")]
    pub cost_hints: CostHints,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub similar_places: Vec<SimilarPlace>,
}
