//! Prompt sent to the text-generation model

use crate::models::TripForm;

/// Builds the instruction asking for strict JSON with one entry per date.
#[must_use]
pub fn build_prompt(form: &TripForm, dates: &[String]) -> String {
    let budget = form.budget.as_str();
    let destination = &form.destination;
    let origin = &form.origin;
    let kids = form.travelers.kids;
    let adults = form.travelers.prompt_adults();

    format!(
        r#"Return STRICT JSON (no markdown). Build a DISTINCT, non-repeating trip plan:

{{
  "summary": "one line",
  "days": [
    {{ "date": "YYYY-MM-DD", "plan": [
      {{ "time": "09:00", "title": "Place or activity", "note": "short tip" }}
    ]}}
  ],
  "checkpoints": [{{ "name": "Popular spot", "why": "short reason" }}],
  "hotels": [{{ "name": "Hotel", "note": "why it fits ({budget})", "googleQuery": "Hotel name {destination}" }}],
  "restaurants": [{{ "name": "Restaurant", "note": "why", "googleQuery": "Restaurant {destination}" }}],
  "transports": [{{ "mode": "flight/train/bus/taxi", "note": "when to use", "googleQuery": "Flights {origin} to {destination}" }}],
  "costHints": {{ "stayPerNightHintINR": 0, "foodPerAdultPerDayINR": 0, "attractionsPerAdultINR": 0 }},
  "tips": ["compact bullets (no live weather)"],
  "similarPlaces": [{{ "place": "Similar city", "why": "vibe/budget similarity" }}]
}}

Rules:
- Create a day for EACH of these dates: {dates}.
- ABSOLUTELY NO REPEATED titles across all days. Vary neighborhoods/themes.
- Per day: include a landmark walk, a cultural stop, a nature/activity block, a viewpoint/sunset, and two food breaks (lunch & dinner).
- If kids > 0 ({kids}), add family-friendly notes/breaks.
- Respect budget "{budget}" in notes. Max 6 items per day. Keep notes short.

Inputs: origin="{origin}", destination="{destination}", domestic={domestic}, adults={adults}, kids={kids}."#,
        dates = dates.join(", "),
        domestic = form.domestic,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetTier, Travelers};

    fn sample_form() -> TripForm {
        TripForm {
            origin: "Delhi".to_string(),
            destination: "Manali".to_string(),
            domestic: true,
            start_date: "2025-05-01".to_string(),
            end_date: "2025-05-02".to_string(),
            travelers: Travelers { adults: 0, kids: 2 },
            budget: BudgetTier::Cheap,
        }
    }

    #[test]
    fn test_prompt_lists_every_date() {
        let dates = vec!["2025-05-01".to_string(), "2025-05-02".to_string()];
        let prompt = build_prompt(&sample_form(), &dates);
        assert!(prompt.contains("Create a day for EACH of these dates: 2025-05-01, 2025-05-02."));
    }

    #[test]
    fn test_prompt_carries_inputs() {
        let prompt = build_prompt(&sample_form(), &["2025-05-01".to_string()]);
        assert!(prompt.starts_with("Return STRICT JSON (no markdown)."));
        assert!(prompt.contains(
            r#"Inputs: origin="Delhi", destination="Manali", domestic=true, adults=2, kids=2."#
        ));
        assert!(prompt.contains(r#"Respect budget "cheap""#));
        assert!(prompt.contains(r#""googleQuery": "Flights Delhi to Manali""#));
        assert!(prompt.contains("If kids > 0 (2)"));
    }

    #[test]
    fn test_prompt_template_braces_render_as_json() {
        let prompt = build_prompt(&sample_form(), &["2025-05-01".to_string()]);
        assert!(prompt.contains(r#""costHints": { "stayPerNightHintINR": 0"#));
        assert!(!prompt.contains("{{"));
    }
}
