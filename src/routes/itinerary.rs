use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::models::preferences::UserPreferences;
use crate::services::itinerary_generation_service::ItineraryGenerator;
use crate::services::request_tracker::RequestTracker;

#[derive(Debug, Deserialize)]
pub struct ReplanRequest {
    pub preferences: UserPreferences,
    /// Caller-chosen key for the screen issuing the request. When set, only
    /// the most recent request for the key gets its itinerary back.
    pub request_id: Option<String>,
}

/*
    /api/itineraries/generate
*/
pub async fn generate(
    generator: web::Data<ItineraryGenerator>,
    input: web::Json<UserPreferences>,
) -> impl Responder {
    let preferences = input.into_inner();
    log::debug!("Generating itinerary for {:?}", preferences);

    let trip = generator.generate(&preferences).await;
    HttpResponse::Ok().json(trip)
}

/*
    /api/itineraries/replan
*/
pub async fn replan(
    generator: web::Data<ItineraryGenerator>,
    tracker: web::Data<RequestTracker>,
    input: web::Json<ReplanRequest>,
) -> impl Responder {
    let ReplanRequest {
        preferences,
        request_id,
    } = input.into_inner();

    let key = match request_id.filter(|id| !id.trim().is_empty()) {
        Some(key) => key,
        None => return HttpResponse::Ok().json(generator.generate(&preferences).await),
    };

    let guard = tracker.begin(&key);
    let trip = generator.generate(&preferences).await;

    if guard.finish() {
        HttpResponse::Ok().json(trip)
    } else {
        log::info!(
            "Discarding itinerary for {}: superseded by a newer request",
            key
        );
        HttpResponse::Conflict().json(serde_json::json!({ "error": "superseded" }))
    }
}
