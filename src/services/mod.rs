pub mod fallback_itinerary;
pub mod gemini_service;
pub mod itinerary_generation_service;
pub mod itinerary_prompt;
pub mod request_tracker;
