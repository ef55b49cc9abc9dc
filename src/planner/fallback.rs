//! Static suggestion pools used when the model gives too little to fill a day.
//!
//! Generic lists work anywhere; a few destinations get curated lists.

const COMMON_ATTRACTIONS: &[&str] = &[
    "Old Town Walk",
    "Local Bazaar Stroll",
    "Riverside Promenade",
    "City Viewpoint",
    "Heritage Museum",
    "Botanical Garden",
    "Popular Temple",
    "Sunset Point",
    "Artisanal Market",
];

const MANALI_ATTRACTIONS: &[&str] = &[
    "Old Manali Walk",
    "Hadimba Devi Temple",
    "Jogini Waterfall",
    "Vashisht Hot Springs",
    "Van Vihar Walk",
    "Solang Valley Day Trip",
    "Mall Road Stroll",
    "Manu Temple",
    "Beas Riverside Promenade",
    "Siyal Market",
    "Gadhan Thekchhokling Gompa",
    "Nehru Kund Viewpoint",
];

const COMMON_EATS: &[&str] = &[
    "Popular Local Cafe",
    "Old Town Street Food Lane",
    "Riverside Diner",
    "Market Corner Eatery",
    "Family Veg Restaurant",
    "Top Rated Dessert Shop",
];

const MANALI_EATS: &[&str] = &[
    "Cafe 1947",
    "Dylan's Toasted & Roasted",
    "Fat Plate Cafe",
    "Il Forno",
    "Johnson's Cafe",
    "Chopsticks Restaurant",
    "Drifters' Cafe",
];

const COMMON_STAYS: &[&str] = &[
    "Central Budget Hotel",
    "Best Value Inn",
    "City Boutique Stay",
    "Riverside Resort",
    "Hill View Homestay",
    "Top Rated Lodge",
];

const MANALI_STAYS: &[&str] = &[
    "Johnson Lodge",
    "The Himalayan",
    "Larisa Resort Manali",
    "Apple Country Resort",
    "Snow Valley Resorts",
    "Zostel Manali (Old Manali)",
];

/// Fallback pools for one destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackPools {
    pub attractions: &'static [&'static str],
    pub eats: &'static [&'static str],
    pub stays: &'static [&'static str],
}

impl FallbackPools {
    #[must_use]
    pub fn for_destination(destination: &str) -> Self {
        if destination.to_lowercase().contains("manali") {
            Self {
                attractions: MANALI_ATTRACTIONS,
                eats: MANALI_EATS,
                stays: MANALI_STAYS,
            }
        } else {
            Self {
                attractions: COMMON_ATTRACTIONS,
                eats: COMMON_EATS,
                stays: COMMON_STAYS,
            }
        }
    }
}
