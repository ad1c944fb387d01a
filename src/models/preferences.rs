use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

pub const MAX_ENERGY: u8 = 100;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Explorer,
    Nomad,
}

/// Everything the onboarding flow collects about the traveller.
///
/// Only `vibes`, `energy` and `destination` feed the itinerary prompt; the
/// remaining fields are carried for the other screens.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default)]
    pub vibes: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_energy")]
    pub energy: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default)]
    pub toggles: HashMap<String, bool>,
    #[serde(default)]
    pub character_answers: Vec<String>,
    #[serde(default)]
    pub tier: SubscriptionTier,
}

impl UserPreferences {
    pub fn new(vibes: Vec<String>, energy: u8, destination: Option<String>) -> Self {
        Self {
            vibes,
            energy: energy.min(MAX_ENERGY),
            destination,
            ..Default::default()
        }
    }

    /// The requested destination, if the traveller actually typed one.
    pub fn requested_destination(&self) -> Option<&str> {
        self.destination
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

// The front end sends the slider value as a JS number, which may be
// fractional or out of range.
fn deserialize_energy<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        Some(serde_json::Value::Number(n)) => {
            let raw = n.as_f64().unwrap_or(0.0);
            Ok(raw.round().clamp(0.0, MAX_ENERGY as f64) as u8)
        }
        _ => Ok(0),
    }
}
