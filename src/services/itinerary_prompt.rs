use serde_json::json;

use crate::models::preferences::UserPreferences;

pub const EXPECTED_DAYS: usize = 3;
pub const MIN_MAIN_ACTIVITIES: usize = 2;
pub const MAX_MAIN_ACTIVITIES: usize = 3;
pub const EXPECTED_ALTERNATIVES: usize = 1;
pub const MAX_DESCRIPTION_WORDS: usize = 20;

const OPEN_DESTINATION: &str = "a surprising destination of your choice";
const NO_VIBES: &str = "balanced";

pub fn build_prompt(preferences: &UserPreferences) -> String {
    let destination = preferences
        .requested_destination()
        .unwrap_or(OPEN_DESTINATION);

    let vibes = if preferences.vibes.is_empty() {
        NO_VIBES.to_string()
    } else {
        preferences.vibes.join(", ")
    };

    format!(
        "Plan a {days}-day trip to {destination} for a traveller whose vibe is: {vibes}. \
         Their energy level is {energy}% (0% means fully relaxed, 100% means non-stop adventure). \
         Return exactly {days} days. Format the destination as \"City, Country\". \
         Each day needs {min_main}-{max_main} mainActivities and exactly {alts} entry in alternatives. \
         Activity type should be one of: main, food, rest, social. \
         Keep every description under {words} words.",
        days = EXPECTED_DAYS,
        destination = destination,
        vibes = vibes,
        energy = preferences.energy,
        min_main = MIN_MAIN_ACTIVITIES,
        max_main = MAX_MAIN_ACTIVITIES,
        alts = EXPECTED_ALTERNATIVES,
        words = MAX_DESCRIPTION_WORDS,
    )
}

fn activity_schema() -> serde_json::Value {
    // `type` stays a plain string: forcing an enum here makes the model
    // return empty itineraries.
    json!({
        "type": "OBJECT",
        "properties": {
            "id": { "type": "STRING" },
            "title": { "type": "STRING" },
            "description": { "type": "STRING" },
            "time": { "type": "STRING" },
            "type": { "type": "STRING" },
            "location": { "type": "STRING" }
        }
    })
}

/// Structured output schema for the `Trip` shape.
pub fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "destination": { "type": "STRING" },
            "days": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "date": { "type": "STRING" },
                        "vibeLabel": { "type": "STRING" },
                        "summary": { "type": "STRING" },
                        "mainActivities": { "type": "ARRAY", "items": activity_schema() },
                        "alternatives": { "type": "ARRAY", "items": activity_schema() }
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_preferences() {
        let prefs = UserPreferences::new(
            vec!["foodie".to_string(), "nightlife".to_string()],
            75,
            Some("Lisbon, Portugal".to_string()),
        );
        let prompt = build_prompt(&prefs);

        assert!(prompt.contains("trip to Lisbon, Portugal"));
        assert!(prompt.contains("foodie, nightlife"));
        assert!(prompt.contains("75%"));
        assert!(prompt.contains("exactly 3 days"));
    }

    #[test]
    fn test_prompt_without_destination_or_vibes() {
        let prefs = UserPreferences::new(vec![], 10, Some(String::new()));
        let prompt = build_prompt(&prefs);

        assert!(prompt.contains(OPEN_DESTINATION));
        assert!(prompt.contains("vibe is: balanced"));
    }

    #[test]
    fn test_schema_leaves_activity_type_unconstrained() {
        let schema = response_schema();
        let activity = &schema["properties"]["days"]["items"]["properties"]["mainActivities"]["items"];

        assert_eq!(activity["properties"]["type"]["type"], "STRING");
        assert!(activity["properties"]["type"].get("enum").is_none());
        assert_eq!(
            schema["properties"]["days"]["items"]["properties"]["vibeLabel"]["type"],
            "STRING"
        );
    }
}
