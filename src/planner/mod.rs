//! Itinerary generation: prompt, model call, lenient parse, sanitize.

pub mod fallback;
pub mod parse;
pub mod prompt;
pub mod sanitize;

use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument};

use crate::llm::TextGenerator;
use crate::models::{AiPlan, TripForm};
use crate::{Result, TripPlannerError};

pub use fallback::FallbackPools;
pub use parse::{RawPlan, parse_model_json};
pub use prompt::build_prompt;
pub use sanitize::{MAX_ITEMS_PER_DAY, TIME_SLOTS, sanitize_plan};

/// Turns a trip form into a sanitized day-by-day plan.
pub struct PlanService {
    generator: Option<Arc<dyn TextGenerator>>,
    max_days: usize,
}

impl PlanService {
    /// `generator` is `None` when no API key is configured; every request
    /// then fails with a configuration error instead of reaching the model.
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, max_days: usize) -> Self {
        Self {
            generator,
            max_days: max_days.max(1),
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    /// Longest itinerary, in days, this service produces.
    #[must_use]
    pub fn max_days(&self) -> usize {
        self.max_days
    }

    #[instrument(skip(self, form), fields(destination = %form.destination))]
    pub async fn generate(&self, form: &TripForm, today: NaiveDate) -> Result<AiPlan> {
        let generator = self
            .generator
            .as_ref()
            .ok_or_else(|| TripPlannerError::config("GEMINI_API_KEY missing"))?;
        form.validate()?;

        let destination = form.destination.trim();
        let dates = form.trip_dates(today, self.max_days);
        let prompt = build_prompt(form, &dates);

        let start = Instant::now();
        let text = generator.generate(&prompt).await?;
        let raw = RawPlan::from_map(&parse_model_json(&text));
        let model_days = raw.days.len();
        let plan = sanitize_plan(raw, destination, &dates);

        info!(
            "Planned {} day(s) for {} in {:.3}s ({} day(s) from model)",
            plan.days.len(),
            destination,
            start.elapsed().as_secs_f64(),
            model_days
        );
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetTier, Travelers};
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;

    struct ScriptedGenerator {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Err(TripPlannerError::api("connection refused"))
        }
    }

    fn form(destination: &str, start: &str, end: &str) -> TripForm {
        TripForm {
            origin: "Delhi".to_string(),
            destination: destination.to_string(),
            domestic: true,
            start_date: start.to_string(),
            end_date: end.to_string(),
            travelers: Travelers { adults: 2, kids: 0 },
            budget: BudgetTier::Value,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 20).unwrap()
    }

    #[tokio::test]
    async fn test_missing_generator_is_config_error() {
        let service = PlanService::new(None, 30);
        let err = service
            .generate(&form("Goa", "2025-05-01", "2025-05-02"), today())
            .await
            .unwrap_err();
        assert!(matches!(err, TripPlannerError::Config { .. }));
        assert_eq!(err.user_message(), "GEMINI_API_KEY missing");
    }

    #[tokio::test]
    async fn test_blank_destination_is_rejected_before_model_call() {
        let generator = ScriptedGenerator::new("{}");
        let service = PlanService::new(Some(generator.clone()), 30);
        let err = service
            .generate(&form("   ", "2025-05-01", "2025-05-02"), today())
            .await
            .unwrap_err();
        assert!(matches!(err, TripPlannerError::Validation { .. }));
        assert!(generator.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fenced_reply_is_sanitized() {
        let reply = "```json\n{\"summary\":\"Beach days\",\"days\":[{\"date\":\"2025-05-01\",\"plan\":[\
            {\"title\":\"Baga Beach\"},{\"title\":\"baga beach \"},{\"title\":\"Fort Aguada\"}]}]}\n```";
        let generator = ScriptedGenerator::new(reply);
        let service = PlanService::new(Some(generator.clone()), 30);

        let plan = service
            .generate(&form("Goa", "2025-05-01", "2025-05-03"), today())
            .await
            .unwrap();

        assert_eq!(plan.summary, "Beach days");
        assert_eq!(plan.days.len(), 3);
        assert_eq!(plan.days[0].plan[0].title, "Baga Beach");
        assert_eq!(plan.days[0].plan[1].title, "Fort Aguada");

        let mut seen = HashSet::new();
        for day in &plan.days {
            assert!(day.plan.len() <= MAX_ITEMS_PER_DAY);
            for item in &day.plan {
                assert!(seen.insert(item.title.trim().to_lowercase()), "{}", item.title);
            }
        }

        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("2025-05-01, 2025-05-02, 2025-05-03"));
    }

    #[tokio::test]
    async fn test_garbage_reply_yields_fallback_plan() {
        let service = PlanService::new(Some(ScriptedGenerator::new("I cannot help with that")), 30);
        let plan = service
            .generate(&form("Jaipur", "2025-05-01", "2025-05-01"), today())
            .await
            .unwrap();
        assert_eq!(plan.summary, "Trip plan for Jaipur");
        assert_eq!(plan.days.len(), 1);
        assert_eq!(plan.days[0].plan.len(), MAX_ITEMS_PER_DAY);
        assert!(!plan.hotels.is_empty());
    }

    #[tokio::test]
    async fn test_missing_dates_plan_for_today() {
        let service = PlanService::new(Some(ScriptedGenerator::new("{}")), 30);
        let plan = service.generate(&form("Jaipur", "", ""), today()).await.unwrap();
        assert_eq!(plan.days.len(), 1);
        assert_eq!(plan.days[0].date, "2025-04-20");
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let service = PlanService::new(Some(Arc::new(FailingGenerator)), 30);
        let err = service
            .generate(&form("Goa", "2025-05-01", "2025-05-01"), today())
            .await
            .unwrap_err();
        assert!(matches!(err, TripPlannerError::Api { .. }));
    }
}
