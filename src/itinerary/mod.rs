//! The trip sheet: everything the trip page shows for one brief.
//!
//! Works purely from the submitted form and (optionally) a plan returned by
//! `/api/ai/plan`; no upstream calls are made here.

pub mod packing;
pub mod refine;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::costs::{CostEstimate, CostParams, estimate_costs};
use crate::deeplinks::{self, TravelMode};
use crate::format::{money_inr, to_dmy};
use crate::models::{AiPlan, BudgetTier, DayPlan, PlanItem, TripForm, Venue};
use crate::Result;

pub use packing::packing_list;
pub use refine::{Intensity, Interest, interest_score, refine_days};

#[derive(Debug, Clone, Deserialize)]
pub struct TripSheetRequest {
    pub form: TripForm,
    #[serde(default)]
    pub plan: Option<AiPlan>,
    #[serde(default)]
    pub intensity: Intensity,
    /// `None` selects culture and food
    #[serde(default)]
    pub interests: Option<Vec<Interest>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetItem {
    pub time: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub maps_url: String,
    pub images_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetDay {
    pub day: usize,
    pub date: String,
    pub date_dmy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stay_tonight: Option<String>,
    pub items: Vec<SheetItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetVenue {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub maps_url: String,
    pub images_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierQuote {
    pub budget: BudgetTier,
    pub total: f64,
    pub per_person: f64,
    pub total_label: String,
    pub per_person_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickLink {
    pub label: &'static str,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSheet {
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub nights: u32,
    pub intensity: Intensity,
    pub interests: Vec<Interest>,
    pub costs: CostEstimate,
    pub tier_comparison: Vec<TierQuote>,
    pub days: Vec<SheetDay>,
    pub stays: Vec<SheetVenue>,
    pub restaurants: Vec<SheetVenue>,
    pub tips: Vec<String>,
    pub packing_list: Vec<String>,
    pub itinerary_text: String,
    pub links: Vec<QuickLink>,
}

/// Builds the sheet for `request`. Plan days are used when present,
/// otherwise the fixed template fills the trip dates.
pub fn build_sheet(request: &TripSheetRequest, today: NaiveDate, max_days: usize) -> Result<TripSheet> {
    let form = &request.form;
    form.validate()?;

    let destination = form.destination.trim();
    let interests = request
        .interests
        .clone()
        .unwrap_or_else(|| Interest::DEFAULT.to_vec());
    let nights = form.nights();

    let base_days = match &request.plan {
        Some(plan) if !plan.days.is_empty() => plan.days.clone(),
        _ => fallback_days(&form.trip_dates(today, max_days)),
    };
    let days = refine_days(&base_days, request.intensity, &interests);

    let plan = request.plan.as_ref();

    Ok(TripSheet {
        destination: destination.to_string(),
        summary: plan
            .map(|p| p.summary.clone())
            .filter(|s| !s.is_empty()),
        nights,
        intensity: request.intensity,
        costs: estimate_costs(&CostParams::new(nights, form.travelers, form.budget)),
        tier_comparison: tier_comparison(form, nights),
        stays: plan
            .map(|p| sheet_venues(&p.hotels, destination))
            .unwrap_or_default(),
        restaurants: plan
            .map(|p| sheet_venues(&p.restaurants, destination))
            .unwrap_or_default(),
        tips: plan.map(|p| p.tips.clone()).unwrap_or_default(),
        packing_list: packing_list(nights, form.travelers.kids, request.intensity, &interests),
        itinerary_text: itinerary_text(form, &days),
        links: quick_links(form),
        days: sheet_days(&days, destination),
        interests,
    })
}

/// Template days used before any plan exists, one per date.
#[must_use]
pub fn fallback_days(dates: &[String]) -> Vec<DayPlan> {
    dates
        .iter()
        .enumerate()
        .map(|(idx, date)| {
            let odd = idx % 2 == 1;
            let pick = |yes: &'static str, no: &'static str| if odd { yes } else { no };
            let temple = if idx % 3 == 0 { "Van Vihar Park" } else { "Hadimba Devi Temple" };
            DayPlan {
                date: date.clone(),
                plan: vec![
                    PlanItem::new("09:00", pick("Old Manali Walk", "Mall Road Stroll"), "Coffee & photo spots"),
                    PlanItem::new("11:00", temple, "Short visit"),
                    PlanItem::new("13:00", "Local lunch", "Try siddu / dham"),
                    PlanItem::new("15:00", pick("Jogini Waterfall", "Vashisht Hot Springs"), "Nature time"),
                    PlanItem::new("18:00", pick("Beas Riverside Promenade", "Sunset viewpoint"), "Golden hour"),
                    PlanItem::new("21:00", "Dinner spot", "Popular local place"),
                ],
                stay_tonight: None,
            }
        })
        .collect()
}

/// Plain-text itinerary for copying or printing.
#[must_use]
pub fn itinerary_text(form: &TripForm, days: &[DayPlan]) -> String {
    let start = non_empty_or(&form.start_date, "Start");
    let end = non_empty_or(&form.end_date, "End");
    let header = format!(
        "{} ({start} → {end}) — {} adults, {} kids\n\n",
        form.destination, form.travelers.adults, form.travelers.kids
    );

    let body = days
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let lines: Vec<String> = day
                .plan
                .iter()
                .map(|item| match item.note.as_deref().filter(|n| !n.is_empty()) {
                    Some(note) => format!("  {}  {} — {note}", item.time, item.title),
                    None => format!("  {}  {}", item.time, item.title),
                })
                .collect();
            format!("Day {} — {}\n{}", i + 1, day.date, lines.join("\n"))
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    if body.is_empty() {
        header + "No itinerary yet."
    } else {
        header + &body
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() { fallback } else { value }
}

fn tier_comparison(form: &TripForm, nights: u32) -> Vec<TierQuote> {
    BudgetTier::ALL
        .iter()
        .map(|&budget| {
            let estimate = estimate_costs(&CostParams::new(nights, form.travelers, budget));
            TierQuote {
                budget,
                total: estimate.total,
                per_person: estimate.per_person,
                total_label: money_inr(estimate.total),
                per_person_label: money_inr(estimate.per_person),
            }
        })
        .collect()
}

/// Search links for the whole destination.
#[must_use]
pub fn quick_links(form: &TripForm) -> Vec<QuickLink> {
    let dest = form.destination.trim();
    let origin = form.origin.trim();

    let mut links = vec![
        QuickLink { label: "Hotels", url: deeplinks::hotels(dest) },
        QuickLink { label: "Restaurants", url: deeplinks::restaurants(dest, "") },
        QuickLink { label: "Attractions", url: deeplinks::attractions(dest) },
        QuickLink {
            label: "Family",
            url: deeplinks::gmaps_search(&format!("family friendly activities {dest}")),
        },
        QuickLink {
            label: "Street Food",
            url: deeplinks::gmaps_search(&format!("street food {dest}")),
        },
        QuickLink {
            label: "Viewpoints",
            url: deeplinks::gmaps_search(&format!("best viewpoints {dest}")),
        },
    ];

    if !origin.is_empty() {
        links.push(QuickLink {
            label: "Flights",
            url: deeplinks::google_flights_search(origin, dest, Some(form.start_date.as_str())),
        });
        if form.domestic {
            links.push(QuickLink {
                label: "Directions",
                url: deeplinks::gmaps_directions(origin, dest, TravelMode::Driving),
            });
        }
    }
    links
}

fn sheet_days(days: &[DayPlan], destination: &str) -> Vec<SheetDay> {
    days.iter()
        .enumerate()
        .map(|(i, day)| SheetDay {
            day: i + 1,
            date: day.date.clone(),
            date_dmy: to_dmy(&day.date),
            stay_tonight: day.stay_tonight.clone(),
            items: day
                .plan
                .iter()
                .map(|item| {
                    let query = format!("{} {destination}", item.title);
                    SheetItem {
                        time: item.time.clone(),
                        title: item.title.clone(),
                        note: item.note.clone(),
                        maps_url: deeplinks::gmaps_search(&query),
                        images_url: deeplinks::google_images(&query),
                    }
                })
                .collect(),
        })
        .collect()
}

fn sheet_venues(venues: &[Venue], destination: &str) -> Vec<SheetVenue> {
    venues
        .iter()
        .map(|venue| {
            let query = if venue.google_query.trim().is_empty() {
                format!("{} {destination}", venue.name)
            } else {
                venue.google_query.clone()
            };
            SheetVenue {
                name: venue.name.clone(),
                note: venue.note.clone(),
                maps_url: deeplinks::gmaps_search(&query),
                images_url: deeplinks::google_images(&query),
            }
        })
        .collect()
}
