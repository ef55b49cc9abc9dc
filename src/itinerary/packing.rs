//! Packing checklist derived from trip length, party and pace.

use super::refine::{Intensity, Interest};

const BASE: [&str; 6] = [
    "Passport/ID, tickets, wallet",
    "Phone + charger + power bank",
    "Light jacket / rain layer",
    "Comfortable shoes + spare socks",
    "Med kit (pain relief, band-aids, personal meds)",
    "Reusable water bottle",
];
const KIDS: [&str; 3] = ["Snacks for kids", "Wipes/tissues", "Small games/books"];
const SUN: [&str; 2] = ["Sunscreen", "Hat/sunglasses"];
const ADVENTURE: [&str; 3] = ["Sports shoes", "Dry bag", "Action camera (optional)"];
const GADGETS: [&str; 2] = ["Travel adapter", "Camera (optional)"];
const LONG_STAY: [&str; 1] = ["Laundry bag"];
const PACKED_PACE: [&str; 2] = ["Electrolyte sachets", "Band-aids for blisters"];

#[must_use]
pub fn packing_list(nights: u32, kids: u32, intensity: Intensity, interests: &[Interest]) -> Vec<String> {
    let groups: [(&[&str], bool); 7] = [
        (&BASE, true),
        (&KIDS, kids > 0),
        (&SUN, interests.contains(&Interest::Nature)),
        (&ADVENTURE, interests.contains(&Interest::Adventure)),
        (&GADGETS, true),
        (&LONG_STAY, nights >= 3),
        (&PACKED_PACE, intensity == Intensity::Packed),
    ];

    groups
        .into_iter()
        .filter(|(_, include)| *include)
        .flat_map(|(items, _)| items.iter().map(|s| (*s).to_string()))
        .collect()
}
