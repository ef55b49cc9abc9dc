//! Turns whatever the model returned into a balanced, repeat-free itinerary.
//!
//! Model titles and restaurant names seed two rotating pools (attractions and
//! eats), topped up with the static fallback lists. Each date then draws up
//! to four attractions and two eats that no earlier day has used, lays them
//! onto the fixed time slots and backfills any gap from the fallback lists.

use std::collections::HashSet;

use super::fallback::FallbackPools;
use super::parse::RawPlan;
use crate::models::{AiPlan, CostHints, DayPlan, PlanItem, Venue};

pub const TIME_SLOTS: [&str; 6] = ["09:00", "11:30", "14:30", "16:30", "19:30", "21:00"];

pub const MAX_ITEMS_PER_DAY: usize = 6;
const ATTRACTIONS_PER_DAY: usize = 4;
const EATS_PER_DAY: usize = 2;
const ATTRACTION_ROTATION: usize = 3;
const EAT_ROTATION: usize = 2;
const BACKFILL_ATTEMPTS: usize = 12;
const MAX_VENUES: usize = 6;

/// Comparison key for titles and names.
#[must_use]
pub fn normalize(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Keeps the first item per key, in order. Items whose key is empty are dropped.
pub fn dedupe_by<T, F>(items: impl IntoIterator<Item = T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> String,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| {
            let k = key(item);
            !k.is_empty() && seen.insert(k)
        })
        .collect()
}

/// Titles already placed anywhere in the itinerary
#[derive(Debug, Default)]
struct UsedTitles(HashSet<String>);

impl UsedTitles {
    /// Returns `false` when the title was already taken.
    fn claim(&mut self, title: &str) -> bool {
        self.0.insert(normalize(title))
    }
}

/// Up to `limit` pool entries nobody has claimed yet, claiming them.
fn draw(pool: &[String], used: &mut UsedTitles, limit: usize) -> Vec<String> {
    let mut picks = Vec::with_capacity(limit);
    for title in pool {
        if picks.len() >= limit {
            break;
        }
        if used.claim(title) {
            picks.push(title.clone());
        }
    }
    picks
}

fn build_day(
    date: &str,
    picks: &[String],
    eats: &[String],
    fallback: &FallbackPools,
    used: &mut UsedTitles,
) -> DayPlan {
    let mut picks = picks.iter();
    let mut eats = eats.iter();
    let mut plan = Vec::with_capacity(MAX_ITEMS_PER_DAY);

    let layout: [(bool, &str, &str); 6] = [
        (false, TIME_SLOTS[0], "Morning highlights"),
        (false, TIME_SLOTS[1], "Short visit"),
        (true, TIME_SLOTS[2], "Local lunch"),
        (false, TIME_SLOTS[3], "Light activity"),
        (false, TIME_SLOTS[4], "Golden hour photos"),
        (true, TIME_SLOTS[5], "Dinner — reserve if needed"),
    ];
    for (is_meal, time, note) in layout {
        let next = if is_meal { eats.next() } else { picks.next() };
        if let Some(title) = next {
            plan.push(PlanItem::new(time, title, note));
        }
    }

    // Alternate attraction / eat from the static lists until the day is full.
    let mut attempt = 0;
    while plan.len() < MAX_ITEMS_PER_DAY && attempt < BACKFILL_ATTEMPTS {
        let (pool, note) = if attempt % 2 == 0 {
            (fallback.attractions, "Short stop")
        } else {
            (fallback.eats, "Quick bite")
        };
        if let Some(title) = pool.get(attempt / 2) {
            if used.claim(title) {
                let slot = plan.len().min(TIME_SLOTS.len() - 1);
                plan.push(PlanItem::new(TIME_SLOTS[slot], title, note));
            }
        }
        attempt += 1;
    }

    plan.truncate(MAX_ITEMS_PER_DAY);
    DayPlan {
        date: date.to_string(),
        plan,
        stay_tonight: None,
    }
}

fn fallback_venues(names: &[&str], note: &str, destination: &str) -> Vec<Venue> {
    names
        .iter()
        .map(|name| Venue {
            name: (*name).to_string(),
            note: Some(note.to_string()),
            google_query: format!("{name} {destination}"),
        })
        .collect()
}

fn dedupe_venues(venues: Vec<Venue>) -> Vec<Venue> {
    let mut venues = dedupe_by(venues, |venue| normalize(&venue.name));
    venues.truncate(MAX_VENUES);
    venues
}

/// Builds the final plan: one day per date, no title repeated across days,
/// at most six items per day.
#[must_use]
pub fn sanitize_plan(raw: RawPlan, destination: &str, dates: &[String]) -> AiPlan {
    let fallback = FallbackPools::for_destination(destination);

    let model_attractions = dedupe_by(raw.day_titles().map(str::to_string), |t| normalize(t));
    let model_eats = dedupe_by(raw.restaurants.iter().map(|r| r.name.clone()), |t| {
        normalize(t)
    });

    let mut attraction_pool = dedupe_by(
        model_attractions
            .into_iter()
            .chain(fallback.attractions.iter().map(|t| (*t).to_string())),
        |t| normalize(t),
    );
    let mut eat_pool = dedupe_by(
        model_eats
            .into_iter()
            .chain(fallback.eats.iter().map(|t| (*t).to_string())),
        |t| normalize(t),
    );

    let mut used = UsedTitles::default();
    let mut days = Vec::with_capacity(dates.len());
    for date in dates {
        let picks = draw(&attraction_pool, &mut used, ATTRACTIONS_PER_DAY);
        let eats = draw(&eat_pool, &mut used, EATS_PER_DAY);

        // next day starts from a different point in each pool
        let shift = ATTRACTION_ROTATION.min(attraction_pool.len());
        attraction_pool.rotate_left(shift);
        let shift = EAT_ROTATION.min(eat_pool.len());
        eat_pool.rotate_left(shift);

        days.push(build_day(date, &picks, &eats, &fallback, &mut used));
    }

    let hotels = dedupe_venues(raw.hotels);
    let hotels = if hotels.is_empty() {
        fallback_venues(fallback.stays, "Good base area", destination)
    } else {
        hotels
    };
    attach_stays(&mut days, &hotels);

    let restaurants = if raw.restaurants.is_empty() {
        let first = &fallback.eats[..fallback.eats.len().min(MAX_VENUES)];
        fallback_venues(first, "Popular choice", destination)
    } else {
        dedupe_venues(raw.restaurants)
    };

    AiPlan {
        summary: raw
            .summary
            .unwrap_or_else(|| format!("Trip plan for {destination}")),
        days,
        checkpoints: raw.checkpoints,
        hotels,
        restaurants,
        transports: raw.transports,
        cost_hints: raw.cost_hints.unwrap_or_else(CostHints::zero),
        tips: raw.tips,
        similar_places: raw.similar_places,
    }
}

/// Rotates through the hotels so consecutive nights suggest different stays.
fn attach_stays(days: &mut [DayPlan], hotels: &[Venue]) {
    let unique = dedupe_by(hotels.iter(), |hotel| normalize(&hotel.name));
    if unique.is_empty() {
        return;
    }
    for (i, day) in days.iter_mut().enumerate() {
        day.stay_tonight = Some(unique[i % unique.len()].name.clone());
    }
}
