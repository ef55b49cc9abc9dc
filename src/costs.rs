//! Rough trip cost estimate in INR.

use serde::{Deserialize, Serialize};

use crate::models::{BudgetTier, Travelers};

const LOCAL_KM_DEFAULT: f64 = 40.0;
const LOCAL_RATE_PER_KM: f64 = 25.0;
const ATTRACTIONS_PER_ADULT: f64 = 1200.0;
const KID_FOOD_SHARE: f64 = 0.6;
const KID_ATTRACTION_SHARE: f64 = 0.5;
const BUFFER_RATE: f64 = 0.12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostCategory {
    Transport,
    Stay,
    Food,
    Local,
    Attractions,
    Buffer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostItem {
    pub label: String,
    #[serde(rename = "amountINR")]
    pub amount_inr: f64,
    pub category: CostCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub items: Vec<CostItem>,
    pub total: f64,
    pub per_person: f64,
}

/// Inputs to [`estimate_costs`]. `None` overrides fall back to tier defaults.
#[derive(Debug, Clone, Default)]
pub struct CostParams {
    pub nights: u32,
    pub travelers: Travelers,
    pub budget: BudgetTier,
    pub flight_median_inr: Option<f64>,
    /// Per room per night
    pub stay_nightly_inr: Option<f64>,
    pub rooms: Option<u32>,
    pub km_local: Option<f64>,
    pub attraction_inr: Option<f64>,
}

impl CostParams {
    #[must_use]
    pub fn new(nights: u32, travelers: Travelers, budget: BudgetTier) -> Self {
        Self {
            nights,
            travelers,
            budget,
            ..Self::default()
        }
    }
}

#[must_use]
pub fn estimate_costs(params: &CostParams) -> CostEstimate {
    let adults = f64::from(params.travelers.adults);
    let kids = f64::from(params.travelers.kids);
    let nights = f64::from(params.nights);

    // two adults per room
    let rooms = params
        .rooms
        .unwrap_or_else(|| params.travelers.adults.div_ceil(2).max(1));
    let stay = params
        .stay_nightly_inr
        .unwrap_or_else(|| params.budget.stay_per_night_inr())
        * nights
        * f64::from(rooms);
    let flights = params.flight_median_inr.unwrap_or(0.0);
    let food = params.budget.food_per_adult_per_day_inr()
        * (adults + KID_FOOD_SHARE * kids)
        * (nights + 1.0);
    let local = params.km_local.unwrap_or(LOCAL_KM_DEFAULT) * LOCAL_RATE_PER_KM;
    let attractions = params
        .attraction_inr
        .unwrap_or_else(|| ATTRACTIONS_PER_ADULT * (adults + KID_ATTRACTION_SHARE * kids));
    let buffer = (flights + stay + food + local + attractions) * BUFFER_RATE;

    let items = vec![
        item("Flights", flights, CostCategory::Transport),
        item("Stay", stay, CostCategory::Stay),
        item("Food", food, CostCategory::Food),
        item("Local commute", local, CostCategory::Local),
        item("Attractions", attractions, CostCategory::Attractions),
        item("Buffer (12%)", buffer, CostCategory::Buffer),
    ];

    let total: f64 = items.iter().map(|i| i.amount_inr).sum();
    let heads = params.travelers.total().max(1);
    CostEstimate {
        items,
        total,
        per_person: total / f64::from(heads),
    }
}

fn item(label: &str, amount_inr: f64, category: CostCategory) -> CostItem {
    CostItem {
        label: label.to_string(),
        amount_inr,
        category,
    }
}
