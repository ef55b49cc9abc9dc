//! JSON routes mounted under `/api`.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, warn};

use crate::TripPlannerError;
use crate::itinerary::{TripSheet, TripSheetRequest, build_sheet};
use crate::models::{AiPlan, TripForm};
use crate::photos::{PhotoRedirect, PhotoRequest, PhotoResolver};
use crate::planner::PlanService;

const PHOTO_CACHE_HIT: &str = "public, max-age=86400, stale-while-revalidate=604800";
const PHOTO_CACHE_MISS: &str = "no-store";

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<PlanService>,
    pub photos: Arc<PhotoResolver>,
}

impl AppState {
    pub fn new(planner: PlanService, photos: PhotoResolver) -> Self {
        Self {
            planner: Arc::new(planner),
            photos: Arc::new(photos),
        }
    }
}

/// Renders a [`TripPlannerError`] as `{"error": ...}` with a matching status.
#[derive(Debug)]
pub struct ApiError(TripPlannerError);

impl From<TripPlannerError> for ApiError {
    fn from(err: TripPlannerError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(TripPlannerError::validation(rejection.body_text()))
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            TripPlannerError::Validation { .. } => StatusCode::BAD_REQUEST,
            TripPlannerError::Api { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        } else {
            warn!("Request rejected: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.user_message() }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ai/plan", post(plan_trip))
        .route("/photo", get(place_photo))
        .route("/place-photo", get(place_photo))
        .route("/trip/sheet", post(trip_sheet))
        .with_state(state)
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Health {
    status: &'static str,
    version: &'static str,
    planner_configured: bool,
}

async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        version: crate::VERSION,
        planner_configured: state.planner.is_configured(),
    })
}

async fn plan_trip(
    State(state): State<AppState>,
    body: Result<Json<TripForm>, JsonRejection>,
) -> Result<Json<AiPlan>, ApiError> {
    let Json(form) = body?;
    let plan = state.planner.generate(&form, today()).await?;
    Ok(Json(plan))
}

async fn trip_sheet(
    State(state): State<AppState>,
    body: Result<Json<TripSheetRequest>, JsonRejection>,
) -> Result<Json<TripSheet>, ApiError> {
    let Json(request) = body?;
    let sheet = build_sheet(&request, today(), state.planner.max_days())?;
    Ok(Json(sheet))
}

#[derive(Debug, Default, Deserialize)]
struct PhotoParams {
    q: Option<String>,
    w: Option<String>,
    h: Option<String>,
}

/// Always redirects; an unparseable query string falls back to the defaults.
async fn place_photo(
    State(state): State<AppState>,
    query: Result<Query<PhotoParams>, QueryRejection>,
) -> Response {
    let params = query.map(|Query(params)| params).unwrap_or_else(|rejection| {
        warn!("Ignoring photo query: {}", rejection.body_text());
        PhotoParams::default()
    });
    let request = PhotoRequest::from_params(
        params.q.as_deref(),
        params.w.as_deref(),
        params.h.as_deref(),
    );
    photo_redirect(state.photos.redirect(&request).await)
}

fn photo_redirect(redirect: PhotoRedirect) -> Response {
    let cache_control = if redirect.resolved {
        PHOTO_CACHE_HIT
    } else {
        PHOTO_CACHE_MISS
    };
    let location = HeaderValue::from_str(&redirect.location)
        .unwrap_or_else(|_| HeaderValue::from_static("https://picsum.photos/800/600"));

    (
        StatusCode::FOUND,
        [
            (header::LOCATION, location),
            (header::CACHE_CONTROL, HeaderValue::from_static(cache_control)),
        ],
    )
        .into_response()
}
