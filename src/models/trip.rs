//! The trip brief submitted by the planner form

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::TripPlannerError;

const ISO_DATE: &str = "%Y-%m-%d";

/// Cost preset chosen by the traveler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Cheap,
    #[default]
    Value,
    Top,
}

impl BudgetTier {
    pub const ALL: [BudgetTier; 3] = [BudgetTier::Cheap, BudgetTier::Value, BudgetTier::Top];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BudgetTier::Cheap => "cheap",
            BudgetTier::Value => "value",
            BudgetTier::Top => "top",
        }
    }

    /// Room rate per night in INR
    #[must_use]
    pub fn stay_per_night_inr(self) -> f64 {
        match self {
            BudgetTier::Cheap => 1800.0,
            BudgetTier::Value => 3200.0,
            BudgetTier::Top => 6000.0,
        }
    }

    /// Food spend per adult per day in INR
    #[must_use]
    pub fn food_per_adult_per_day_inr(self) -> f64 {
        match self {
            BudgetTier::Cheap => 500.0,
            BudgetTier::Value => 900.0,
            BudgetTier::Top => 1500.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Travelers {
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub kids: u32,
}

fn default_adults() -> u32 {
    2
}

impl Default for Travelers {
    fn default() -> Self {
        Self {
            adults: default_adults(),
            kids: 0,
        }
    }
}

impl Travelers {
    /// Adult count as quoted to the model; an unset (zero) count reads as two.
    #[must_use]
    pub fn prompt_adults(&self) -> u32 {
        if self.adults == 0 { 2 } else { self.adults }
    }

    /// Head count; saturates instead of wrapping on absurd inputs.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.adults.saturating_add(self.kids)
    }
}

/// User input for one planning session. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripForm {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default = "default_domestic")]
    pub domestic: bool,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub travelers: Travelers,
    #[serde(default)]
    pub budget: BudgetTier,
}

fn default_domestic() -> bool {
    true
}

impl Default for TripForm {
    fn default() -> Self {
        Self {
            origin: String::new(),
            destination: String::new(),
            domestic: default_domestic(),
            start_date: String::new(),
            end_date: String::new(),
            travelers: Travelers::default(),
            budget: BudgetTier::default(),
        }
    }
}

impl TripForm {
    pub fn validate(&self) -> Result<(), TripPlannerError> {
        if self.destination.trim().is_empty() {
            return Err(TripPlannerError::validation("Please enter a destination"));
        }
        Ok(())
    }

    #[must_use]
    pub fn start(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.start_date)
    }

    #[must_use]
    pub fn end(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.end_date)
    }

    /// Every calendar day from start to end inclusive, as `YYYY-MM-DD`.
    ///
    /// Falls back to `[today]` when either date is unusable or the range is
    /// empty, and stops after `max_days` days.
    #[must_use]
    pub fn trip_dates(&self, today: NaiveDate, max_days: usize) -> Vec<String> {
        let dates: Vec<String> = match (self.start(), self.end()) {
            (Some(start), Some(end)) => start
                .iter_days()
                .take_while(|day| *day <= end)
                .take(max_days.max(1))
                .map(|day| day.format(ISO_DATE).to_string())
                .collect(),
            _ => Vec::new(),
        };

        if dates.is_empty() {
            vec![today.format(ISO_DATE).to_string()]
        } else {
            dates
        }
    }

    /// Whole nights between start and end; at least one.
    #[must_use]
    pub fn nights(&self) -> u32 {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) if end > start => {
                u32::try_from((end - start).num_days()).unwrap_or(1)
            }
            _ => 1,
        }
    }
}

fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    // Accept full timestamps too; only the calendar day matters.
    let day = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(day, ISO_DATE).ok()
}
