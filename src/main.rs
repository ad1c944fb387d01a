use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use tripvibe_api::config::AppConfig;
use tripvibe_api::routes;
use tripvibe_api::services::gemini_service::{GeminiClient, GenerativeModel, UnavailableModel};
use tripvibe_api::services::itinerary_generation_service::ItineraryGenerator;
use tripvibe_api::services::request_tracker::RequestTracker;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    let model: Arc<dyn GenerativeModel> = match GeminiClient::new(&config.gemini) {
        Ok(client) => {
            log::info!("Gemini client initialized for model {}", config.generation.model);
            Arc::new(client)
        }
        Err(e) => {
            log::warn!("Gemini client not available: {}. Serving fallback itineraries.", e);
            Arc::new(UnavailableModel::new(e.to_string()))
        }
    };

    let generator = web::Data::new(ItineraryGenerator::with_config(
        model,
        config.generation.clone(),
    ));
    let tracker = web::Data::new(RequestTracker::new());

    log::info!("Binding to {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(generator.clone())
            .app_data(tracker.clone())
            .configure(routes::configure)
    })
    .bind((config.host.clone(), config.port))?
    .run()
    .await
}
