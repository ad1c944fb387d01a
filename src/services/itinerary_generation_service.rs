use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use chrono::Utc;
use regex::Regex;
use uuid::Uuid;

use crate::config::GenerationConfig;
use crate::error::GenerationError;
use crate::models::preferences::UserPreferences;
use crate::models::trip::{DayPlan, GeneratedTrip, Trip, TripSource, UNKNOWN_DESTINATION};
use crate::services::fallback_itinerary::{fallback_days, FALLBACK_DESTINATION};
use crate::services::gemini_service::{GenerationRequest, GenerativeModel};
use crate::services::itinerary_prompt::{
    build_prompt, response_schema, EXPECTED_ALTERNATIVES, EXPECTED_DAYS, MAX_DESCRIPTION_WORDS,
    MAX_MAIN_ACTIVITIES, MIN_MAIN_ACTIVITIES,
};

pub struct ItineraryGenerator {
    model: Arc<dyn GenerativeModel>,
    config: GenerationConfig,
}

impl ItineraryGenerator {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self::with_config(model, GenerationConfig::default())
    }

    pub fn with_config(model: Arc<dyn GenerativeModel>, config: GenerationConfig) -> Self {
        Self { model, config }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn model(&self) -> &dyn GenerativeModel {
        self.model.as_ref()
    }

    /// Generate an itinerary for the given preferences.
    ///
    /// Never fails: any problem with the model call or its answer is logged
    /// and answered with the built-in fallback itinerary after a short pause.
    pub async fn generate(&self, preferences: &UserPreferences) -> Trip {
        match self.try_generate(preferences).await {
            Ok(trip) => {
                log::info!(
                    "Generated {}-day itinerary ({} activities) for {}",
                    trip.days.len(),
                    trip.activity_count(),
                    trip.destination
                );
                trip
            }
            Err(e) => {
                log::warn!("Itinerary generation failed, serving fallback: {}", e);
                tokio::time::sleep(self.config.fallback_delay).await;
                fallback_trip(preferences)
            }
        }
    }

    /// Single generation attempt without the fallback.
    pub async fn try_generate(
        &self,
        preferences: &UserPreferences,
    ) -> Result<Trip, GenerationError> {
        let request = self.build_request(preferences);

        let payload = self
            .model
            .generate_content(&request)
            .await?
            .filter(|text| !text.trim().is_empty())
            .ok_or(GenerationError::EmptyPayload)?;

        let generated = parse_generated_trip(&payload)?;
        let trip = sanitize_trip(generated, preferences)?;

        for issue in soft_constraint_issues(&trip) {
            log::debug!("Itinerary for {} deviates from prompt: {}", trip.destination, issue);
        }

        Ok(trip)
    }

    pub fn build_request(&self, preferences: &UserPreferences) -> GenerationRequest {
        GenerationRequest {
            model: self.config.model.clone(),
            prompt: build_prompt(preferences),
            temperature: self.config.temperature,
            max_output_tokens: self.config.max_output_tokens,
            response_schema: response_schema(),
        }
    }
}

fn code_fence() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)^\s*```[a-zA-Z]*\s*(.*?)\s*```\s*$").expect("static regex is valid")
    })
}

/// Parse the model's text payload, tolerating a Markdown code fence around it.
pub fn parse_generated_trip(payload: &str) -> Result<GeneratedTrip, GenerationError> {
    let body = match code_fence().captures(payload) {
        Some(caps) => caps.get(1).map_or(payload, |m| m.as_str()),
        None => payload,
    };
    Ok(serde_json::from_str(body)?)
}

/// Turn a parsed model answer into a trustworthy [`Trip`].
pub fn sanitize_trip(
    generated: GeneratedTrip,
    preferences: &UserPreferences,
) -> Result<Trip, GenerationError> {
    let days = match generated.days {
        Some(days) if !days.is_empty() => days,
        _ => return Err(GenerationError::NoDays),
    };

    let destination = generated
        .destination
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .or_else(|| preferences.requested_destination().map(str::to_string))
        .unwrap_or_else(|| UNKNOWN_DESTINATION.to_string());

    // Model ids are kept only while they stay unique within the trip; the
    // first day to use an id keeps it.
    let mut seen_ids = HashSet::new();
    let days = days
        .into_iter()
        .enumerate()
        .map(|(index, day)| DayPlan {
            id: day
                .id
                .filter(|id| !id.trim().is_empty() && seen_ids.insert(id.clone()))
                .unwrap_or_else(|| fresh_day_id(index)),
            date: day.date,
            vibe_label: day.vibe_label,
            summary: day.summary,
            main_activities: day.main_activities.unwrap_or_default(),
            alternatives: day.alternatives.unwrap_or_default(),
        })
        .collect();

    Ok(Trip {
        id: fresh_trip_id(),
        destination,
        days,
        source: TripSource::Generated,
    })
}

pub fn fallback_trip(preferences: &UserPreferences) -> Trip {
    let destination = preferences
        .requested_destination()
        .unwrap_or(FALLBACK_DESTINATION)
        .to_string();

    let days = fallback_days()
        .into_iter()
        .enumerate()
        .map(|(index, day)| DayPlan {
            id: fresh_day_id(index),
            ..day
        })
        .collect();

    Trip {
        id: fresh_trip_id(),
        destination,
        days,
        source: TripSource::Fallback,
    }
}

fn fresh_trip_id() -> String {
    Uuid::new_v4().to_string()
}

// Position plus a freshness token: the timestamp keeps ids readable, the
// uuid fragment keeps calls within the same millisecond apart.
fn fresh_day_id(index: usize) -> String {
    let nonce = Uuid::new_v4().simple().to_string();
    format!(
        "day-{}-{}-{}",
        index + 1,
        Utc::now().timestamp_millis(),
        &nonce[..8]
    )
}

/// Prompt-level constraints the model did not honour. These are hints only;
/// the itinerary is served regardless.
pub fn soft_constraint_issues(trip: &Trip) -> Vec<String> {
    let mut issues = Vec::new();

    if trip.days.len() != EXPECTED_DAYS {
        issues.push(format!(
            "expected {} days, got {}",
            EXPECTED_DAYS,
            trip.days.len()
        ));
    }
    if !trip.destination.contains(',') {
        issues.push(format!(
            "destination '{}' is not \"City, Country\"",
            trip.destination
        ));
    }

    for day in &trip.days {
        let mains = day.main_activities.len();
        if !(MIN_MAIN_ACTIVITIES..=MAX_MAIN_ACTIVITIES).contains(&mains) {
            issues.push(format!("{} has {} main activities", day.id, mains));
        }
        if day.alternatives.len() != EXPECTED_ALTERNATIVES {
            issues.push(format!(
                "{} has {} alternatives",
                day.id,
                day.alternatives.len()
            ));
        }
        for activity in day.main_activities.iter().chain(day.alternatives.iter()) {
            let words = activity.description.split_whitespace().count();
            if words > MAX_DESCRIPTION_WORDS {
                issues.push(format!(
                    "'{}' description runs {} words",
                    activity.title, words
                ));
            }
        }
    }

    issues
}
