use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::env;

use crate::services::itinerary_generation_service::ItineraryGenerator;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(generator: web::Data<ItineraryGenerator>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let generator_result = check_generator(&generator);
    health
        .services
        .insert("generator".to_string(), generator_result.clone());

    // Without a model every itinerary is the fallback one.
    if generator_result.status != "ok" {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

fn check_generator(generator: &ItineraryGenerator) -> ServiceStatus {
    let model = generator.model();
    if model.is_available() {
        ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!(
                "{} ({})",
                model.provider(),
                generator.config().model
            )),
        }
    } else {
        ServiceStatus {
            status: "error".to_string(),
            details: Some("No generative model configured, serving fallback itineraries".to_string()),
        }
    }
}
