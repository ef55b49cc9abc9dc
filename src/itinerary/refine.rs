//! Re-ranks a day's items by the traveler's interests and trims to pace.

use serde::{Deserialize, Serialize};

use crate::models::{DayPlan, PlanItem};

/// How many items a day may hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Relaxed,
    #[default]
    Standard,
    Packed,
}

impl Intensity {
    #[must_use]
    pub fn max_items(self) -> usize {
        match self {
            Intensity::Relaxed => 4,
            Intensity::Standard => 6,
            Intensity::Packed => 9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interest {
    Culture,
    Nature,
    Food,
    Shopping,
    Adventure,
    Kids,
}

impl Interest {
    pub const DEFAULT: [Interest; 2] = [Interest::Culture, Interest::Food];

    /// Lowercase substrings that mark a title as matching this interest.
    #[must_use]
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Interest::Culture => &[
                "museum", "temple", "church", "palace", "heritage", "gallery", "historic", "fort",
            ],
            Interest::Nature => &[
                "park", "garden", "beach", "lake", "waterfall", "trail", "forest", "viewpoint",
                "valley",
            ],
            Interest::Food => &["cafe", "restaurant", "street food", "brew", "diner", "eatery"],
            Interest::Shopping => &["market", "bazaar", "mall", "shopping", "souvenir"],
            Interest::Adventure => &[
                "trek", "zip", "rafting", "surf", "climb", "paragliding", "kayak", "ski",
            ],
            Interest::Kids => &["aquarium", "zoo", "theme park", "toy", "science", "play"],
        }
    }

    fn matches(self, title: &str) -> bool {
        self.keywords().iter().any(|kw| title.contains(kw))
    }
}

/// Number of selected interests with at least one keyword in `title`.
#[must_use]
pub fn interest_score(title: &str, interests: &[Interest]) -> usize {
    let title = title.to_lowercase();
    interests.iter().filter(|i| i.matches(&title)).count()
}

/// Stable-sorts each day's items by score, highest first, then clamps the
/// day to the intensity's item count.
#[must_use]
pub fn refine_days(days: &[DayPlan], intensity: Intensity, interests: &[Interest]) -> Vec<DayPlan> {
    days.iter()
        .map(|day| {
            let mut plan: Vec<PlanItem> = day.plan.clone();
            plan.sort_by_key(|item| std::cmp::Reverse(interest_score(&item.title, interests)));
            plan.truncate(intensity.max_items());
            DayPlan {
                plan,
                ..day.clone()
            }
        })
        .collect()
}
