#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::{web, App};
use async_trait::async_trait;
use serde_json::json;

use tripvibe_api::config::GenerationConfig;
use tripvibe_api::error::GenerationError;
use tripvibe_api::routes;
use tripvibe_api::services::gemini_service::{GenerationRequest, GenerativeModel};
use tripvibe_api::services::itinerary_generation_service::ItineraryGenerator;
use tripvibe_api::services::request_tracker::RequestTracker;

#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Text(String),
    Empty,
    Status(u16),
}

/// Test double for the generative model: hands out scripted replies in
/// order and remembers every request it saw. Once the script runs out it
/// keeps failing.
pub struct ScriptedModel {
    replies: Mutex<VecDeque<(ScriptedReply, Duration)>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| (r, Duration::ZERO)).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delays(replies: Vec<(ScriptedReply, Duration)>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self::new(vec![])
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate_content(
        &self,
        request: &GenerationRequest,
    ) -> Result<Option<String>, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.replies.lock().unwrap().pop_front();

        let (reply, delay) = match next {
            Some(next) => next,
            None => (ScriptedReply::Status(503), Duration::ZERO),
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match reply {
            ScriptedReply::Text(text) => Ok(Some(text)),
            ScriptedReply::Empty => Ok(None),
            ScriptedReply::Status(status) => Err(GenerationError::Status {
                status,
                body: "scripted failure".to_string(),
            }),
        }
    }

    fn provider(&self) -> &str {
        "scripted"
    }
}

pub fn fast_config() -> GenerationConfig {
    GenerationConfig {
        fallback_delay: Duration::ZERO,
        ..GenerationConfig::default()
    }
}

pub fn generator_with(model: Arc<dyn GenerativeModel>) -> ItineraryGenerator {
    ItineraryGenerator::with_config(model, fast_config())
}

pub fn create_app(
    model: Arc<dyn GenerativeModel>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    create_app_with_tracker(model, web::Data::new(RequestTracker::new()))
}

pub fn create_app_with_tracker(
    model: Arc<dyn GenerativeModel>,
    tracker: web::Data<RequestTracker>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(generator_with(model)))
        .app_data(tracker)
        .configure(routes::configure)
}

pub fn three_day_trip() -> String {
    json!({
        "id": "model-trip-id",
        "destination": "Lisbon, Portugal",
        "days": [
            {
                "id": "lx-1",
                "date": "Day 1",
                "vibeLabel": "Tiles & Trams",
                "summary": "Ride tram 28 and climb to the castle.",
                "mainActivities": [
                    { "id": "a1", "title": "Tram 28", "description": "Classic yellow tram loop.", "time": "09:00", "type": "main", "location": "Graca" },
                    { "id": "a2", "title": "Pasteis de Belem", "description": "Custard tarts, still warm.", "time": "12:00", "type": "food", "location": "Belem" }
                ],
                "alternatives": [
                    { "id": "a3", "title": "Tile Museum", "description": "Five centuries of azulejos.", "time": "15:00", "type": "main", "location": "Xabregas" }
                ]
            },
            {
                "date": "Day 2",
                "vibeLabel": "Fado Night",
                "summary": "Slow afternoon, soulful evening.",
                "mainActivities": [
                    { "id": "b1", "title": "Miradouro nap", "description": "Viewpoint siesta.", "time": "14:00", "type": "rest", "location": "Santa Luzia" },
                    { "id": "b2", "title": "Fado in Alfama", "description": "Dinner with live fado.", "time": "20:00", "type": "social", "location": "Alfama" }
                ]
            },
            {
                "id": "",
                "date": "Day 3",
                "vibeLabel": "Coastline",
                "summary": "Train out to Cascais.",
                "mainActivities": null,
                "alternatives": []
            }
        ]
    })
    .to_string()
}
