use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use tripplanner::config::TripPlannerConfig;
use tripplanner::{
    AppState, GeminiClient, PersistentCache, PhotoResolver, PlanService, TextGenerator, logging,
    web,
};

#[tokio::main]
async fn main() -> Result<()> {
    let explicit = std::env::args_os().nth(1).map(PathBuf::from);
    let config = match explicit {
        Some(path) => TripPlannerConfig::load_from_path(Some(path)),
        None => TripPlannerConfig::load(),
    }
    .context("Failed to load configuration")?;

    logging::init(&config.logging)?;
    info!("TripPlanner {} starting", tripplanner::VERSION);

    let cache = if config.cache.enabled {
        match PersistentCache::open(&config.cache.location) {
            Ok(cache) => Some(Arc::new(cache)),
            Err(e) => {
                warn!("Photo cache disabled, could not open {}: {}", config.cache.location, e);
                None
            }
        }
    } else {
        None
    };

    let generator: Option<Arc<dyn TextGenerator>> = match config.gemini.api_key.clone() {
        Some(key) => Some(Arc::new(GeminiClient::new(&config.gemini, key)?)),
        None => {
            warn!("GEMINI_API_KEY is not set; /api/ai/plan will answer with an error");
            None
        }
    };

    let planner = PlanService::new(generator, config.planner.max_trip_days as usize);
    let photos = PhotoResolver::new(&config.photos, cache)?;

    web::run(&config.server, AppState::new(planner, photos)).await
}
