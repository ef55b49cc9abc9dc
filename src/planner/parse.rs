//! Lenient parsing of model output.
//!
//! Model text is often wrapped in Markdown fences, prefixed with chatter, or
//! carries list entries of the wrong shape. Nothing here fails: whatever
//! cannot be read becomes empty and the sanitizer fills the gaps.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::models::{Checkpoint, CostHints, SimilarPlace, Transport, Venue};

/// Parses the model's text into a JSON object, or an empty one.
#[must_use]
pub fn parse_model_json(text: &str) -> Map<String, Value> {
    if let Some(map) = parse_object(text) {
        return map;
    }

    let unfenced = strip_code_fence(text);
    if let Some(map) = parse_object(unfenced) {
        debug!("Parsed model JSON after stripping code fence");
        return map;
    }

    if let (Some(start), Some(end)) = (unfenced.find('{'), unfenced.rfind('}')) {
        if start < end {
            if let Some(map) = parse_object(&unfenced[start..=end]) {
                debug!("Parsed model JSON from embedded object");
                return map;
            }
        }
    }

    debug!("Model output is not usable JSON, continuing with an empty plan");
    Map::new()
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text.trim()) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the info string, e.g. ```json
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// A raw day as the model wrote it; only titles are used downstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDay {
    pub titles: Vec<String>,
}

/// Typed view over the model's JSON with malformed entries dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPlan {
    pub summary: Option<String>,
    pub days: Vec<RawDay>,
    pub checkpoints: Vec<Checkpoint>,
    pub hotels: Vec<Venue>,
    pub restaurants: Vec<Venue>,
    pub transports: Vec<Transport>,
    pub cost_hints: Option<CostHints>,
    pub tips: Vec<String>,
    pub similar_places: Vec<SimilarPlace>,
}

impl RawPlan {
    #[must_use]
    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            summary: map.get("summary").and_then(Value::as_str).map(str::to_string),
            days: array(map, "days").iter().map(raw_day).collect(),
            checkpoints: items(map, "checkpoints"),
            hotels: items(map, "hotels"),
            restaurants: items(map, "restaurants"),
            transports: items(map, "transports"),
            cost_hints: map
                .get("costHints")
                .and_then(Value::as_object)
                .map(cost_hints),
            tips: items(map, "tips"),
            similar_places: items(map, "similarPlaces"),
        }
    }

    /// Every plan title across all days, in model order.
    pub fn day_titles(&self) -> impl Iterator<Item = &str> {
        self.days
            .iter()
            .flat_map(|day| day.titles.iter().map(String::as_str))
    }
}

fn array<'a>(map: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    map.get(key)
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

fn items<T: DeserializeOwned>(map: &Map<String, Value>, key: &str) -> Vec<T> {
    array(map, key)
        .iter()
        .filter_map(|value| serde_json::from_value(value.clone()).ok())
        .collect()
}

/// Each hint is read on its own; a non-numeric one is dropped alone.
fn cost_hints(hints: &Map<String, Value>) -> CostHints {
    let number = |key: &str| hints.get(key).and_then(Value::as_f64);
    CostHints {
        stay_per_night_hint_inr: number("stayPerNightHintINR"),
        food_per_adult_per_day_inr: number("foodPerAdultPerDayINR"),
        attractions_per_adult_inr: number("attractionsPerAdultINR"),
    }
}

fn raw_day(value: &Value) -> RawDay {
    let titles = value
        .get("plan")
        .and_then(Value::as_array)
        .map(|plan| {
            plan.iter()
                .filter_map(|item| item.get("title"))
                .filter_map(title_text)
                .collect()
        })
        .unwrap_or_default();
    RawDay { titles }
}

fn title_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
