use actix_web::web;

pub mod health;
pub mod itinerary;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api").service(
                web::scope("/itineraries")
                    .route("/generate", web::post().to(itinerary::generate))
                    .route("/replan", web::post().to(itinerary::replan)),
            ),
        );
}
