//! Outbound search links for maps, flights, hotels and images.

use urlencoding::encode;

const MAPS_SEARCH: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Travel modes accepted by Google Maps directions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TravelMode {
    #[default]
    Driving,
    Transit,
    Walking,
    Bicycling,
}

impl TravelMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Transit => "transit",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
        }
    }
}

#[must_use]
pub fn gmaps_search(query: &str) -> String {
    format!("{MAPS_SEARCH}{}", encode(query))
}

#[must_use]
pub fn gmaps_directions(from: &str, to: &str, mode: TravelMode) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&origin={}&destination={}&travelmode={}",
        encode(from),
        encode(to),
        mode.as_str()
    )
}

/// Google search for flights, optionally on a given `YYYY-MM-DD` date.
#[must_use]
pub fn google_flights_search(from: &str, to: &str, date: Option<&str>) -> String {
    let query = match date.filter(|d| !d.is_empty()) {
        Some(date) => format!("flights {from} to {to} on {date}"),
        None => format!("flights {from} to {to}"),
    };
    format!("https://www.google.com/search?q={}", encode(&query))
}

#[must_use]
pub fn hotels(destination: &str) -> String {
    format!("https://www.google.com/travel/hotels/{}?hl=en", encode(destination))
}

/// Restaurants near `destination`; `tag` narrows the search ("street food").
#[must_use]
pub fn restaurants(destination: &str, tag: &str) -> String {
    let query = if tag.is_empty() {
        format!("restaurants near {destination}")
    } else {
        format!("{tag} restaurants near {destination}")
    };
    gmaps_search(&query)
}

#[must_use]
pub fn attractions(destination: &str) -> String {
    gmaps_search(&format!("top attractions in {destination}"))
}

#[must_use]
pub fn google_images(query: &str) -> String {
    format!("https://www.google.com/search?tbm=isch&q={}", encode(query))
}
